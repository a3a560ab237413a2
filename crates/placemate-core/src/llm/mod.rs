//! LLM integration
//!
//! Traits and implementations for:
//! - Answer generation via a local Ollama-compatible runtime
//! - Embedding generation for semantic retrieval

mod client;
mod http_embedder;
mod traits;

pub use client::OllamaClient;
pub use http_embedder::HttpEmbedder;
pub use traits::{Embedder, LlmClient};
