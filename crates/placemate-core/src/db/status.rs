//! Database status reporting

use super::Database;
use crate::error::Result;

/// Store counts for the status command
#[derive(Debug, Clone, serde::Serialize)]
pub struct DatabaseStatus {
    pub stat_record_count: usize,
    pub insight_count: usize,
    pub embedded_count: usize,
    pub pending_embedding: usize,
    pub cached_answers: usize,
}

impl Database {
    /// Get store counts
    pub fn status(&self) -> Result<DatabaseStatus> {
        let insight_count = self.insight_count()?;
        let embedded_count = self.embedded_insight_count()?;

        Ok(DatabaseStatus {
            stat_record_count: self.stat_record_count()?,
            insight_count,
            embedded_count,
            pending_embedding: insight_count.saturating_sub(embedded_count),
            cached_answers: self.cached_answer_count()?,
        })
    }

    /// Vacuum the database
    pub fn vacuum(&self) -> Result<()> {
        self.conn()?.execute("VACUUM", [])?;
        Ok(())
    }
}
