//! Placemate Core Library
//!
//! Core functionality for the placemate placements-assistant pipeline.
//!
//! # Features
//! - Intent classification (greeting / irrelevant / retrieval candidate)
//! - Lexicon-driven entity extraction (organizations, years)
//! - Vector similarity search over company insight documents
//! - Structured statistics retrieval with equality/conjunction filters
//! - Grounded prompt composition for a local LLM runtime
//! - Shared answer cache with fixed TTL

pub mod chat;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod retrieval;
pub mod types;

pub use chat::{Chatbot, EntityExtractor, Intent, IntentClassifier, Lexicon};
pub use config::{Config, LlmServiceConfig, RetrievalConfig};
pub use db::Database;
pub use error::{Error, PlacemateError, Result};
pub use llm::{Embedder, HttpEmbedder, LlmClient, OllamaClient};
pub use retrieval::RetrievedContext;
pub use types::{
    AnswerResponse, AnswerSource, CompanyStatRecord, Entity, EntityLabel, InsightDocument,
    StatsFilter,
};

/// Default cache directory name
pub const CACHE_DIR_NAME: &str = "placemate";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "placemate";
