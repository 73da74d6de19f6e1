mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pumpwatch-cli")]
#[command(about = "Scraper for the UK CMA fuel price transparency scheme")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Discover the participating retailers and scrape their price feeds
    Scrape {
        /// Restrict the run to one retailer, matched by name
        /// case-insensitively
        #[arg(long)]
        retailer: Option<String>,

        /// List the discovered retailers without fetching any feeds
        #[arg(long)]
        dry_run: bool,

        /// Write output files here instead of the configured directory
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pumpwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape {
            retailer,
            dry_run,
            out_dir,
        } => scrape::run_scrape(&config, retailer.as_deref(), dry_run, out_dir).await,
    }
}
