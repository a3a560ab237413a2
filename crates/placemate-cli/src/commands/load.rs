//! Data loading commands
//!
//! `load-stats` ingests a CSV of company stat rows (headers matching the
//! record fields, branch columns uppercase: CSE, CSBS, ...). `load-insights`
//! ingests a JSON array of `{company_name?, text}` documents.

use crate::app::LoadArgs;
use anyhow::{Context, Result};
use placemate_core::db::hash_content;
use placemate_core::{CompanyStatRecord, Database, InsightDocument};
use serde::Deserialize;
use std::fs;

pub fn run_stats(args: LoadArgs, db: &Database) -> Result<()> {
    let content = fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read CSV file {:?}", args.path))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut loaded = 0usize;
    for (line, row) in reader.deserialize::<CompanyStatRecord>().enumerate() {
        let record = row.with_context(|| format!("Bad stat row at line {}", line + 2))?;
        db.upsert_stat_record(&record)?;
        loaded += 1;
    }

    tracing::info!("Loaded {} stat records from {:?}", loaded, args.path);
    println!("Loaded {} stat records", loaded);
    Ok(())
}

#[derive(Deserialize)]
struct InsightEntry {
    #[serde(default)]
    company_name: Option<String>,
    text: String,
}

pub fn run_insights(args: LoadArgs, db: &Database) -> Result<()> {
    let content = fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read JSON file {:?}", args.path))?;

    let entries: Vec<InsightEntry> =
        serde_json::from_str(&content).context("Expected a JSON array of insight documents")?;

    let mut inserted = 0usize;
    let mut skipped = 0usize;
    for entry in entries {
        let doc = InsightDocument {
            hash: hash_content(&entry.text),
            company_name: entry.company_name,
            doc: entry.text,
        };
        if db.insert_insight(&doc)? {
            inserted += 1;
        } else {
            skipped += 1;
        }
    }

    tracing::info!(
        "Loaded {} insight documents ({} already present) from {:?}",
        inserted,
        skipped,
        args.path
    );
    println!(
        "Loaded {} insight documents ({} already present)",
        inserted, skipped
    );
    println!("Run `placemate embed` to index them for semantic search.");
    Ok(())
}
