//! Structured statistics retrieval
//!
//! Filters the stats store by extracted company/year and renders matching
//! records into deterministic text blocks for the prompt. Store failures
//! degrade to empty context; they never abort the pipeline.

use super::RetrievedContext;
use crate::db::Database;
use crate::types::{CompanyStatRecord, StatsFilter};

/// Retrieve stats context for the filter.
///
/// The fetch runs off the async scheduler; any error is caught, logged,
/// and returned as `Degraded`.
pub async fn retrieve(db: &Database, filter: StatsFilter) -> RetrievedContext {
    tracing::debug!("Stats filter: {}", filter);

    let db = db.clone();
    let joined =
        tokio::task::spawn_blocking(move || db.fetch_stat_records(&filter)).await;

    match joined {
        Ok(Ok(records)) if records.is_empty() => RetrievedContext::Empty,
        Ok(Ok(records)) => RetrievedContext::Found(render_records(&records)),
        Ok(Err(e)) => {
            tracing::warn!("Failed to fetch stats context: {}", e);
            RetrievedContext::Degraded {
                reason: format!("stats fetch failed: {}", e),
            }
        }
        Err(e) => {
            tracing::warn!("Stats retrieval task failed: {}", e);
            RetrievedContext::Degraded {
                reason: format!("stats task failed: {}", e),
            }
        }
    }
}

/// Render all records, blocks joined by a blank line
pub fn render_records(records: &[CompanyStatRecord]) -> String {
    records
        .iter()
        .map(render_record)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render one record as a fixed multi-line block.
///
/// Missing counts read as 0 and a missing salary as "N/A", so the model
/// always sees every field.
fn render_record(record: &CompanyStatRecord) -> String {
    let salary = record
        .salary
        .map(|s| s.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "Company: {company}, Year: {year}\n\
         Salary: {salary} LPA, Internship PPOs: {ppo}\n\
         Total Offers: {offers}\n\
         Branch-wise Offers: CSE: {cse}, CSBS: {csbs}, CYS: {cys}, AIML: {aiml}, DS: {ds}, \
         IOT: {iot}, IT: {it}, ECE: {ece}, EEE: {eee}, EIE: {eie}, MECH: {mech}, \
         CIVIL: {civil}, AUTO: {auto}",
        company = record.company_name,
        year = record.year,
        salary = salary,
        ppo = record.internship_ppo.unwrap_or(0),
        offers = record.total_offers.unwrap_or(0),
        cse = record.cse.unwrap_or(0),
        csbs = record.csbs.unwrap_or(0),
        cys = record.cys.unwrap_or(0),
        aiml = record.aiml.unwrap_or(0),
        ds = record.ds.unwrap_or(0),
        iot = record.iot.unwrap_or(0),
        it = record.it.unwrap_or(0),
        ece = record.ece.unwrap_or(0),
        eee = record.eee.unwrap_or(0),
        eie = record.eie.unwrap_or(0),
        mech = record.mech.unwrap_or(0),
        civil = record.civil.unwrap_or(0),
        auto = record.auto.unwrap_or(0),
    )
}
