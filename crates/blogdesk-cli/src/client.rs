#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;

use blogdesk::application::PostService;
use blogdesk::config::{self, LoadError, Settings};
use blogdesk::domain::DraftError;
use blogdesk::infra::error::InfraError;
use blogdesk::infra::http::HttpPostService;
use thiserror::Error;

use crate::args::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("site URL is required (use --site or BLOGDESK_SITE_URL)")]
    MissingSite,
    #[error("configuration error: {0}")]
    Config(LoadError),
    #[error("infrastructure error: {0}")]
    Infra(#[from] InfraError),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid cover: {0}")]
    Cover(#[from] DraftError),
    #[error("{0}")]
    Rejected(String),
}

impl From<LoadError> for CliError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Missing {
                key: "api.base_url",
            } => CliError::MissingSite,
            other => CliError::Config(other),
        }
    }
}

#[derive(Clone)]
pub struct Ctx {
    pub service: Arc<dyn PostService>,
    pub settings: Settings,
}

impl Ctx {
    pub fn new(settings: Settings) -> Result<Self, CliError> {
        let service = HttpPostService::new(&settings.api)?;
        Ok(Self {
            service: Arc::new(service),
            settings,
        })
    }

    pub fn placeholder_cover(&self) -> &str {
        &self.settings.ui.placeholder_cover
    }
}

pub fn build_ctx_from_cli(cli: &Cli) -> Result<Ctx, CliError> {
    let settings = config::load(cli.config_file.as_deref(), &cli.overrides)?;
    Ctx::new(settings)
}
