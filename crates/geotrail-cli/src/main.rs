mod export;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::render::RenderArgs;

#[derive(Debug, Parser)]
#[command(name = "geotrail-cli")]
#[command(about = "Render a location-history export as a map and coordinate table")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Filter a location history to a date range and export it
    Render(RenderArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = geotrail_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render(args) => render::run_render(&config, &args),
    }
}
