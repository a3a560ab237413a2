//! Database layer for placemate
//!
//! SQLite-backed storage for:
//! - company stat records (structured retrieval)
//! - insight documents and their embeddings (semantic retrieval)
//! - the shared answer cache

mod cache;
mod insights;
mod schema;
mod stats;
mod status;

pub use insights::{bytes_to_embedding, cosine_similarity, embedding_to_bytes, hash_content};
pub use schema::Database;
pub use status::DatabaseStatus;

use std::path::PathBuf;

impl Database {
    /// Get the default database path
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CACHE_DIR_NAME)
            .join("placemate.sqlite")
    }
}
