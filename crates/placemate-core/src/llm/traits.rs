//! LLM trait definitions

use crate::error::Result;
use async_trait::async_trait;

/// Answer generation trait
///
/// One prompt in, one completion out. No streaming, no function calling.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a completion for a single text prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Embedding generation trait
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embedding for single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for batch of texts
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Get model name
    fn model_name(&self) -> &str;
}
