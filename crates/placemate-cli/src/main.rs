//! Placemate CLI
//!
//! Retrieval-augmented placements assistant for campus recruitment data.

use anyhow::Result;
use clap::Parser;
use placemate_core::{Config, Database};

mod app;
mod commands;

use app::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    // Open database (use PLACEMATE_DB env var if set, otherwise use default)
    let db_path = std::env::var("PLACEMATE_DB")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| Database::default_path());
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db = Database::open(&db_path)?;
    db.initialize()?;

    let config = Config::load()?;

    match cli.command {
        Commands::Ask(args) => commands::ask::run(args, &db, &config).await,
        Commands::LoadStats(args) => commands::load::run_stats(args, &db),
        Commands::LoadInsights(args) => commands::load::run_insights(args, &db),
        Commands::Embed(args) => commands::embed::run(args, &db, &config).await,
        Commands::Status => commands::status::run(&db),
        Commands::Cache(args) => commands::cache::run(args, &db),
    }
}
