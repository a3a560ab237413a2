//! Generate embeddings for pending insight documents

use crate::app::EmbedArgs;
use anyhow::Result;
use placemate_core::{Config, Database, Embedder, HttpEmbedder};

pub async fn run(args: EmbedArgs, db: &Database, config: &Config) -> Result<()> {
    let embedder = HttpEmbedder::from_config(config.llm_service.clone())?;
    let model = embedder.model_name().to_string();

    let pending = db.get_insights_missing_embeddings()?;
    if pending.is_empty() {
        println!("All insight documents are embedded.");
        return Ok(());
    }

    let total = pending.len();
    println!("Embedding {} insight documents with {}...", total, model);

    let mut done = 0usize;
    for chunk in pending.chunks(args.batch_size.max(1)) {
        let texts: Vec<String> = chunk.iter().map(|doc| doc.doc.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        for (doc, embedding) in chunk.iter().zip(embeddings.iter()) {
            db.insert_insight_embedding(&doc.hash, &model, embedding)?;
        }

        done += chunk.len();
        tracing::info!("Embedded {}/{} documents", done, total);
    }

    println!("Embedded {} documents.", done);
    Ok(())
}
