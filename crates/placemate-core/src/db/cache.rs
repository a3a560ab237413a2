//! Shared answer cache with fixed TTL
//!
//! Keyed by the RAW query string, deliberately without normalization, so
//! exact-string idempotence holds for callers. The table lives in the
//! shared database file, so every server instance sees the same entries.

use super::Database;
use crate::error::Result;
use crate::types::AnswerResponse;
use chrono::Utc;
use rusqlite::params;
use std::time::Duration;

impl Database {
    /// Look up a cached answer by raw query. Expired entries are invisible
    /// and removed on the way out.
    pub fn get_cached_answer(&self, query: &str) -> Result<Option<AnswerResponse>> {
        let now = Utc::now().timestamp_millis();
        let conn = self.conn()?;

        let row: Option<(String, i64)> = match conn.query_row(
            "SELECT value, expires_at FROM answer_cache WHERE query = ?1",
            params![query],
            |row| Ok((row.get(0)?, row.get(1)?)),
        ) {
            Ok(row) => Some(row),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(e.into()),
        };

        match row {
            Some((value, expires_at)) if expires_at > now => {
                let response: AnswerResponse = serde_json::from_str(&value)?;
                Ok(Some(response))
            }
            Some(_) => {
                conn.execute("DELETE FROM answer_cache WHERE query = ?1", params![query])?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Store an answer under the raw query with the given TTL
    pub fn set_cached_answer(
        &self,
        query: &str,
        response: &AnswerResponse,
        ttl: Duration,
    ) -> Result<()> {
        let now = Utc::now();
        let expires_at = now.timestamp_millis() + ttl.as_millis() as i64;
        let value = serde_json::to_string(response)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO answer_cache (query, value, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![query, value, now.to_rfc3339(), expires_at],
        )?;
        Ok(())
    }

    /// Remove expired cache rows, returning how many were purged
    pub fn purge_expired_answers(&self) -> Result<usize> {
        let now = Utc::now().timestamp_millis();
        let conn = self.conn()?;
        let rows = conn.execute(
            "DELETE FROM answer_cache WHERE expires_at <= ?1",
            params![now],
        )?;
        Ok(rows)
    }

    /// Drop every cache row
    pub fn clear_answer_cache(&self) -> Result<usize> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM answer_cache", [])?;
        Ok(rows)
    }

    /// Count live (unexpired) cache rows
    pub fn cached_answer_count(&self) -> Result<usize> {
        let now = Utc::now().timestamp_millis();
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM answer_cache WHERE expires_at > ?1",
            params![now],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
