//! Database schema and initialization

use crate::error::{PlacemateError, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Main database handle.
///
/// Cheap to clone; all clones share one connection behind a mutex so the
/// handle can move into `spawn_blocking` closures from concurrent request
/// tasks.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

const SCHEMA_VERSION: i32 = 1;

const CREATE_TABLES: &str = r#"
-- Structured recruitment statistics, one row per company per drive year
CREATE TABLE IF NOT EXISTS company_stats (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_name TEXT NOT NULL,
    year INTEGER NOT NULL,
    salary REAL,
    internship_ppo INTEGER,
    total_offers INTEGER,
    cse INTEGER,
    csbs INTEGER,
    cys INTEGER,
    aiml INTEGER,
    ds INTEGER,
    iot INTEGER,
    it INTEGER,
    ece INTEGER,
    eee INTEGER,
    eie INTEGER,
    mech INTEGER,
    civil INTEGER,
    auto INTEGER,
    created_at TEXT NOT NULL,
    UNIQUE(company_name, year)
);

-- Free-text company insight documents (content-addressable by SHA-256)
CREATE TABLE IF NOT EXISTS insights (
    hash TEXT PRIMARY KEY,
    company_name TEXT,
    doc TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Insight embeddings, one vector per document
CREATE TABLE IF NOT EXISTS insight_embeddings (
    hash TEXT PRIMARY KEY REFERENCES insights(hash),
    model TEXT NOT NULL,
    embedding BLOB NOT NULL,
    created_at TEXT NOT NULL
);

-- Answer cache keyed by the raw query string
CREATE TABLE IF NOT EXISTS answer_cache (
    query TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    created_at TEXT NOT NULL,
    expires_at INTEGER NOT NULL
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_company_stats_company ON company_stats(company_name);
CREATE INDEX IF NOT EXISTS idx_company_stats_year ON company_stats(year);
CREATE INDEX IF NOT EXISTS idx_answer_cache_expires ON answer_cache(expires_at);
"#;

impl Database {
    /// Open a database at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "busy_timeout", 5000)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database (tests)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create tables and record the schema version
    pub fn initialize(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(CREATE_TABLES)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            [SCHEMA_VERSION],
        )?;
        Ok(())
    }

    /// Lock the shared connection
    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| PlacemateError::Store(format!("connection lock poisoned: {}", e)))
    }
}
