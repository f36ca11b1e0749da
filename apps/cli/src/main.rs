//! mdsite CLI — renders the documentation site's pages from the command line.
//!
//! Fetches markdown from the configured content origin and emits complete
//! HTML documents, plus small utilities for releases, theme, and config.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
