//! Configuration management

use crate::chat::Lexicon;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM service configuration
    #[serde(default)]
    pub llm_service: LlmServiceConfig,

    /// Retrieval tuning
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Phrase/keyword tables for intent classification and entity extraction
    #[serde(default)]
    pub lexicon: Lexicon,
}

/// LLM service configuration for the local model runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmServiceConfig {
    /// Base URL of the LLM runtime for completions
    pub url: String,

    /// Model name for answer generation
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Base URL for the embeddings service (can be different from the LLM URL)
    #[serde(default)]
    pub embedding_url: Option<String>,

    /// Model name for embeddings
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Embedding dimensions
    #[serde(default)]
    pub embedding_dimensions: Option<usize>,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl LlmServiceConfig {
    /// Get the embeddings URL (falls back to main URL if not specified)
    pub fn embeddings_url(&self) -> &str {
        self.embedding_url.as_deref().unwrap_or(&self.url)
    }
}

impl Default for LlmServiceConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("PLACEMATE_LLM_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            model: default_chat_model(),
            embedding_url: std::env::var("PLACEMATE_EMBEDDING_URL").ok(),
            embedding_model: default_embedding_model(),
            embedding_dimensions: std::env::var("PLACEMATE_EMBEDDING_DIMS")
                .ok()
                .and_then(|s| s.parse().ok()),
            api_key: std::env::var("PLACEMATE_LLM_API_KEY").ok(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_chat_model() -> String {
    std::env::var("PLACEMATE_LLM_MODEL").unwrap_or_else(|_| "llama3".to_string())
}

fn default_embedding_model() -> String {
    std::env::var("PLACEMATE_EMBEDDING_MODEL").unwrap_or_else(|_| "nomic-embed-text".to_string())
}

fn default_timeout() -> u64 {
    60
}

/// Retrieval tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of semantic matches to feed into the prompt
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Embedding count above which the HNSW index is built
    #[serde(default = "default_ann_threshold")]
    pub ann_threshold: usize,

    /// Answer cache time-to-live in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            ann_threshold: default_ann_threshold(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_top_k() -> usize {
    5
}

fn default_ann_threshold() -> usize {
    1000
}

fn default_cache_ttl() -> u64 {
    3600
}

impl Config {
    /// Load config from default path
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_defaults() {
        let cfg = RetrievalConfig::default();
        assert_eq!(cfg.top_k, 5);
        assert_eq!(cfg.cache_ttl_secs, 3600);
    }

    #[test]
    fn test_config_yaml_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.retrieval.top_k, config.retrieval.top_k);
        assert_eq!(parsed.llm_service.model, config.llm_service.model);
        assert_eq!(parsed.lexicon.version, config.lexicon.version);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "llm_service:\n  url: http://inference:11434\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.llm_service.url, "http://inference:11434");
        assert_eq!(config.retrieval.top_k, 5);
        assert!(!config.lexicon.greetings.is_empty());
    }
}
