//! The query-answering pipeline
//!
//! Sequences intent classification, the answer cache, entity extraction,
//! dual-source retrieval, prompt composition, and generation. The states
//! are terminal on first match: GREETING → IRRELEVANT → CACHED → LLM.

mod entities;
mod intent;
mod lexicon;
mod prompt;

pub use entities::EntityExtractor;
pub use intent::{Intent, IntentClassifier};
pub use lexicon::{GreetingEntry, Lexicon};
pub use prompt::{compose_prompt, NO_COMPANY_DETAILS_FALLBACK, NO_INFORMATION_FALLBACK};

use crate::config::{Config, RetrievalConfig};
use crate::db::Database;
use crate::error::Result;
use crate::llm::{Embedder, LlmClient};
use crate::retrieval::{semantic, stats};
use crate::types::{AnswerResponse, EntityLabel, StatsFilter};
use std::sync::Arc;
use std::time::Duration;

/// Apology markers that must keep an answer out of the cache.
/// Checked as verbatim substrings, not case-insensitively.
const APOLOGY_MARKERS: &[&str] = &["sorry", "Sorry"];

/// The placements assistant pipeline.
///
/// Holds the process-wide handles: the store, the model runtime client,
/// and the embedder. All are immutable after construction; one `Chatbot`
/// serves any number of concurrent request tasks.
pub struct Chatbot {
    db: Database,
    llm: Arc<dyn LlmClient>,
    embedder: Arc<dyn Embedder>,
    classifier: IntentClassifier,
    extractor: EntityExtractor,
    lexicon: Lexicon,
    retrieval: RetrievalConfig,
}

impl Chatbot {
    pub fn new(
        db: Database,
        llm: Arc<dyn LlmClient>,
        embedder: Arc<dyn Embedder>,
        config: &Config,
    ) -> Self {
        let lexicon = config.lexicon.clone();
        Self {
            db,
            llm,
            embedder,
            classifier: IntentClassifier::new(lexicon.clone()),
            extractor: EntityExtractor::new(&lexicon),
            lexicon,
            retrieval: config.retrieval.clone(),
        }
    }

    /// Answer one query. Exactly one source tag per response: rule-based
    /// short-circuits, a cache hit, or one LLM invocation.
    pub async fn answer(&self, query: &str) -> Result<AnswerResponse> {
        // 1. Greetings
        match self.classifier.classify(query) {
            Intent::Greeting(response) => {
                return Ok(AnswerResponse::rule_based(response));
            }
            Intent::Irrelevant => {
                // 2. Outside the placement domain
                return Ok(AnswerResponse::rule_based(
                    self.lexicon.irrelevant_response.clone(),
                ));
            }
            Intent::Candidate => {}
        }

        // 3. Cache, keyed by the raw query. A broken cache store is a soft
        // dependency: log and fall through to the LLM path.
        if let Some(cached) = self.lookup_cache(query).await {
            return Ok(AnswerResponse::cached(cached.answer));
        }

        // 4. Entities → optional company/year
        let entities = self.extractor.extract(query);
        let mut company: Option<String> = None;
        let mut year: Option<i64> = None;
        for entity in &entities {
            match entity.label {
                EntityLabel::Org => company = Some(entity.text.clone()),
                EntityLabel::Date => {
                    if entity.text.chars().all(|c| c.is_ascii_digit()) {
                        year = entity.text.parse().ok();
                    }
                }
            }
        }

        // 5. + 6. Dual-source context, both isolate-and-degrade
        let semantic_context =
            semantic::retrieve(&self.db, self.embedder.as_ref(), query, &self.retrieval).await;
        if let Some(reason) = degraded_reason(&semantic_context) {
            tracing::warn!("Semantic context degraded: {}", reason);
        }

        let filter = StatsFilter::new(company.as_deref(), year);
        let stats_context = stats::retrieve(&self.db, filter).await;
        if let Some(reason) = degraded_reason(&stats_context) {
            tracing::warn!("Stats context degraded: {}", reason);
        }

        // 7. Compose and generate
        let prompt = compose_prompt(semantic_context.text(), stats_context.text(), query);

        let answer = match self.llm.generate(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("LLM generation failed: {}", e);
                return Ok(AnswerResponse::rule_based(
                    self.lexicon.unavailable_response.clone(),
                ));
            }
        };

        let response = AnswerResponse::llm(answer);

        // 8. Write-through, only for real answers
        if should_cache(&response.answer) {
            let ttl = Duration::from_secs(self.retrieval.cache_ttl_secs);
            let db = self.db.clone();
            let key = query.to_string();
            let value = response.clone();
            let stored = tokio::task::spawn_blocking(move || {
                db.set_cached_answer(&key, &value, ttl)
            })
            .await;

            match stored {
                Ok(Ok(())) => tracing::debug!("Cached answer for query"),
                Ok(Err(e)) => tracing::warn!("Cache write failed: {}", e),
                Err(e) => tracing::warn!("Cache write task failed: {}", e),
            }
        }

        Ok(response)
    }

    async fn lookup_cache(&self, query: &str) -> Option<AnswerResponse> {
        let db = self.db.clone();
        let key = query.to_string();
        let looked_up =
            tokio::task::spawn_blocking(move || db.get_cached_answer(&key)).await;

        match looked_up {
            Ok(Ok(hit)) => {
                if hit.is_some() {
                    tracing::debug!("Cache hit for query");
                }
                hit
            }
            Ok(Err(e)) => {
                tracing::warn!("Cache lookup failed: {}", e);
                None
            }
            Err(e) => {
                tracing::warn!("Cache lookup task failed: {}", e);
                None
            }
        }
    }
}

fn degraded_reason(context: &crate::retrieval::RetrievedContext) -> Option<&str> {
    match context {
        crate::retrieval::RetrievedContext::Degraded { reason } => Some(reason.as_str()),
        _ => None,
    }
}

/// An answer goes into the cache only when it is non-empty and carries no
/// apology marker.
fn should_cache(answer: &str) -> bool {
    !answer.is_empty()
        && !APOLOGY_MARKERS
            .iter()
            .any(|marker| answer.contains(marker))
}
