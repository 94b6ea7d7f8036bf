//! blogdesk-cli: drives the create, edit, and listing views from a terminal.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod console;
mod handlers;
mod io;


use blogdesk::infra::telemetry;
use clap::Parser;

use args::{Cli, Commands};
use client::{CliError, build_ctx_from_cli};
use handlers::posts;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = build_ctx_from_cli(&cli)?;
    telemetry::init(&ctx.settings.logging)?;

    match cli.command {
        Commands::Posts(cmd) => posts::handle(&ctx, cmd.action).await?,
    }

    Ok(())
}
