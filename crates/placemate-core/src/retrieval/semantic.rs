//! Semantic retrieval over insight documents
//!
//! Embeds the query with the same model used at indexing time and ranks
//! stored insight embeddings by cosine similarity. Brute force below the
//! ANN threshold, HNSW above it. The store scan runs off the async
//! scheduler so a slow disk never stalls unrelated requests.

use super::{InsightAnnIndex, RetrievedContext};
use crate::config::RetrievalConfig;
use crate::db::{cosine_similarity, Database};
use crate::error::Result;
use crate::llm::Embedder;

/// Retrieve up to `top_k` insight document texts for the query, best first.
///
/// Failures never propagate: embedding or store errors degrade to empty
/// context with the reason preserved.
pub async fn retrieve(
    db: &Database,
    embedder: &dyn Embedder,
    query: &str,
    config: &RetrievalConfig,
) -> RetrievedContext {
    let query_embedding = match embedder.embed(query).await {
        Ok(embedding) => embedding,
        Err(e) => {
            tracing::warn!("Query embedding failed: {}", e);
            return RetrievedContext::Degraded {
                reason: format!("query embedding failed: {}", e),
            };
        }
    };

    let db = db.clone();
    let top_k = config.top_k;
    let ann_threshold = config.ann_threshold;

    let joined = tokio::task::spawn_blocking(move || -> Result<Vec<String>> {
        let hashes = rank_insights(&db, &query_embedding, top_k, ann_threshold)?;
        db.get_insight_texts(&hashes)
    })
    .await;

    match joined {
        Ok(Ok(texts)) if texts.is_empty() => RetrievedContext::Empty,
        Ok(Ok(texts)) => RetrievedContext::Found(texts.join("\n\n")),
        Ok(Err(e)) => {
            tracing::warn!("Semantic retrieval failed: {}", e);
            RetrievedContext::Degraded {
                reason: format!("semantic retrieval failed: {}", e),
            }
        }
        Err(e) => {
            tracing::warn!("Semantic retrieval task failed: {}", e);
            RetrievedContext::Degraded {
                reason: format!("semantic retrieval task failed: {}", e),
            }
        }
    }
}

/// Rank stored insight embeddings against the query, returning the top-k
/// document hashes, best first.
fn rank_insights(
    db: &Database,
    query_embedding: &[f32],
    top_k: usize,
    ann_threshold: usize,
) -> Result<Vec<String>> {
    let ann = InsightAnnIndex::build_from_db(db, ann_threshold)?;
    if ann.is_built() {
        return Ok(ann
            .search(query_embedding, top_k)
            .into_iter()
            .map(|(hash, _)| hash)
            .collect());
    }

    // Brute force: rank every stored embedding
    let stored = db.get_all_insight_embeddings()?;
    let mut similarities: Vec<(String, f32)> = stored
        .into_iter()
        .map(|(hash, embedding)| {
            let sim = cosine_similarity(query_embedding, &embedding);
            (hash, sim)
        })
        .collect();

    similarities.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    Ok(similarities
        .into_iter()
        .take(top_k)
        .map(|(hash, _)| hash)
        .collect())
}
