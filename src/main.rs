// Draftloop - iterative writer/critic engine for short social posts
// Main entry point

use anyhow::Result;
use clap::Parser;

use draftloop::cli::{run_generate, Cli, Commands};
use draftloop::config::{load_config, load_config_from};
use draftloop::logging::{init_tracing, with_bootstrap_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = with_bootstrap_logging(|| match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    })?;
    init_tracing(&config.logging)?;

    match cli.command {
        Commands::Generate(args) => run_generate(config, args).await,
    }
}
