//! Insight document storage and embedding vectors
//!
//! Documents are content-addressable by SHA-256; embeddings are stored as
//! little-endian f32 BLOBs and similarity is computed in Rust.

use super::Database;
use crate::error::Result;
use crate::types::InsightDocument;
use chrono::Utc;
use rusqlite::params;
use sha2::{Digest, Sha256};

/// Hash content using SHA-256
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Convert f32 embedding to bytes
pub fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes to f32 embedding
pub fn bytes_to_embedding(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Compute cosine similarity between two embeddings
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

impl Database {
    /// Insert an insight document if not present. Returns true when the row
    /// is new.
    pub fn insert_insight(&self, doc: &InsightDocument) -> Result<bool> {
        let now = Utc::now().to_rfc3339();
        let conn = self.conn()?;
        let rows = conn.execute(
            "INSERT OR IGNORE INTO insights (hash, company_name, doc, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![doc.hash, doc.company_name, doc.doc, now],
        )?;
        Ok(rows > 0)
    }

    /// Store the embedding for an insight document
    pub fn insert_insight_embedding(
        &self,
        hash: &str,
        model: &str,
        embedding: &[f32],
    ) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let bytes = embedding_to_bytes(embedding);
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO insight_embeddings (hash, model, embedding, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![hash, model, bytes, now],
        )?;
        Ok(())
    }

    /// Get all insight embeddings for similarity search
    pub fn get_all_insight_embeddings(&self) -> Result<Vec<(String, Vec<f32>)>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT hash, embedding FROM insight_embeddings")?;

        let results = stmt
            .query_map([], |row| {
                let hash: String = row.get(0)?;
                let bytes: Vec<u8> = row.get(1)?;
                Ok((hash, bytes_to_embedding(&bytes)))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(results)
    }

    /// Fetch document texts for the given hashes, preserving input order
    pub fn get_insight_texts(&self, hashes: &[String]) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT doc FROM insights WHERE hash = ?1")?;

        let mut texts = Vec::with_capacity(hashes.len());
        for hash in hashes {
            let result = stmt.query_row(params![hash], |row| row.get::<_, String>(0));
            match result {
                Ok(doc) => texts.push(doc),
                Err(rusqlite::Error::QueryReturnedNoRows) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(texts)
    }

    /// Insight documents that have no stored embedding yet
    pub fn get_insights_missing_embeddings(&self) -> Result<Vec<InsightDocument>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT i.hash, i.company_name, i.doc FROM insights i
             WHERE i.hash NOT IN (SELECT hash FROM insight_embeddings)",
        )?;

        let results = stmt
            .query_map([], |row| {
                Ok(InsightDocument {
                    hash: row.get(0)?,
                    company_name: row.get(1)?,
                    doc: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(results)
    }

    /// Count insight documents
    pub fn insight_count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM insights", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Count insight documents with an embedding
    pub fn embedded_insight_count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM insight_embeddings", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
