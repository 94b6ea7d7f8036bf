//! Command-line surface for `blogdesk-cli`.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use blogdesk::config::ClientOverrides;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "blogdesk-cli", version, about = "Write, edit, and browse blog posts", long_about = None)]
pub struct Cli {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "BLOGDESK_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ClientOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Post management (list/show/create/edit)
    Posts(PostsArgs),
}

#[derive(Parser, Debug)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Subcommand, Debug)]
pub enum PostsCmd {
    /// List every post, newest first as the server orders them
    List,
    /// Print one post as JSON
    Show { id: String },
    /// Create a post
    Create {
        #[arg(long)]
        title: String,
        #[command(flatten)]
        fields: DraftArgs,
    },
    /// Edit a post you authored; only the given fields change
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: DraftArgs,
    },
}

/// Optional post fields shared by create and edit. A file beats its inline twin.
#[derive(Args, Debug, Default)]
pub struct DraftArgs {
    #[arg(long)]
    pub summary: Option<String>,
    #[arg(long)]
    pub summary_file: Option<PathBuf>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub content_file: Option<PathBuf>,
    /// Cover image to upload (png, jpg, gif, webp, ...)
    #[arg(long, value_name = "IMAGE")]
    pub cover: Option<PathBuf>,
}
