//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "placemate")]
#[command(
    author,
    version,
    about = "Retrieval-augmented placements assistant for campus recruitment data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the assistant a placement question
    Ask(AskArgs),

    /// Load company stat records from a CSV file
    LoadStats(LoadArgs),

    /// Load insight documents from a JSON file
    LoadInsights(LoadArgs),

    /// Generate embeddings for pending insight documents
    Embed(EmbedArgs),

    /// Show store status
    Status,

    /// Manage the answer cache
    Cache(CacheArgs),
}

#[derive(Args)]
pub struct AskArgs {
    /// The question, joined from remaining arguments
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Print the source tag alongside the answer
    #[arg(long)]
    pub show_source: bool,
}

#[derive(Args)]
pub struct LoadArgs {
    /// Input file path
    pub path: PathBuf,
}

#[derive(Args)]
pub struct EmbedArgs {
    /// Number of documents to embed per request batch
    #[arg(long, default_value = "16")]
    pub batch_size: usize,
}

#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

#[derive(Subcommand)]
pub enum CacheAction {
    /// Remove expired entries
    Purge,
    /// Remove every entry
    Clear,
}
