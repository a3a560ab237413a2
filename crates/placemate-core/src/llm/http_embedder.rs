//! Embedder adapter over the HTTP model runtime

use super::{Embedder, OllamaClient};
use crate::config::LlmServiceConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Embedder that delegates to a shared runtime client.
///
/// Exists as its own seam so the embedding service can be pointed at a
/// different runtime than answer generation.
pub struct HttpEmbedder {
    client: Arc<OllamaClient>,
}

impl HttpEmbedder {
    /// Create from an existing client
    pub fn new(client: Arc<OllamaClient>) -> Self {
        Self { client }
    }

    /// Create from configuration
    pub fn from_config(config: LlmServiceConfig) -> Result<Self> {
        let client = OllamaClient::new(config)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let client = OllamaClient::from_env()?;
        Ok(Self {
            client: Arc::new(client),
        })
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Embedder::embed(&*self.client, text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Embedder::embed_batch(&*self.client, texts).await
    }

    fn dimensions(&self) -> usize {
        Embedder::dimensions(&*self.client)
    }

    fn model_name(&self) -> &str {
        Embedder::model_name(&*self.client)
    }
}
