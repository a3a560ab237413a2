//! HTTP client for a local Ollama-compatible model runtime

use crate::config::LlmServiceConfig;
use crate::error::{PlacemateError, Result};
use crate::llm::{Embedder, LlmClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for an Ollama-style runtime (`/api/generate`, `/api/embeddings`)
pub struct OllamaClient {
    http_client: reqwest::Client,
    config: LlmServiceConfig,
    embedding_dimensions: usize,
}

impl OllamaClient {
    /// Create new client from configuration
    pub fn new(config: LlmServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(PlacemateError::Http)?;

        let embedding_dimensions = config.embedding_dimensions.unwrap_or(768);

        Ok(Self {
            http_client,
            config,
            embedding_dimensions,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(LlmServiceConfig::default())
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            req.header("Authorization", format!("Bearer {}", api_key))
        } else {
            req
        }
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        #[derive(Serialize)]
        struct GenerateRequest<'a> {
            model: &'a str,
            prompt: &'a str,
            stream: bool,
        }

        #[derive(Deserialize)]
        struct GenerateResponse {
            response: String,
        }

        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
        };

        let url = format!("{}/api/generate", self.config.url);
        let req = self.apply_auth(self.http_client.post(&url).json(&request));

        let response = req.send().await.map_err(PlacemateError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PlacemateError::ExternalError(format!(
                "LLM service error (HTTP {}): {}",
                status, body
            )));
        }

        let completion: GenerateResponse =
            response.json().await.map_err(PlacemateError::Http)?;

        if completion.response.is_empty() {
            return Err(PlacemateError::Llm("Empty response from LLM".to_string()));
        }

        Ok(completion.response)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl Embedder for OllamaClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        #[derive(Serialize)]
        struct EmbedRequest<'a> {
            model: &'a str,
            prompt: &'a str,
        }

        #[derive(Deserialize)]
        struct EmbedResponse {
            embedding: Vec<f32>,
        }

        let request = EmbedRequest {
            model: &self.config.embedding_model,
            prompt: text,
        };

        let url = format!("{}/api/embeddings", self.config.embeddings_url());
        let req = self.apply_auth(self.http_client.post(&url).json(&request));

        let response = req.send().await.map_err(PlacemateError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PlacemateError::ExternalError(format!(
                "Embedding service error (HTTP {}): {}",
                status, body
            )));
        }

        let embed_response: EmbedResponse =
            response.json().await.map_err(PlacemateError::Http)?;

        if embed_response.embedding.is_empty() {
            return Err(PlacemateError::Llm("No embedding returned".to_string()));
        }

        Ok(embed_response.embedding)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        // The runtime has no batch endpoint; requests go out one at a time
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    fn dimensions(&self) -> usize {
        self.embedding_dimensions
    }

    fn model_name(&self) -> &str {
        &self.config.embedding_model
    }
}
