//! Company stat record storage and filtered retrieval

use super::Database;
use crate::error::Result;
use crate::types::{CompanyStatRecord, StatsFilter};
use chrono::Utc;
use rusqlite::{params, Row};

const RECORD_COLUMNS: &str = "company_name, year, salary, internship_ppo, total_offers, \
     cse, csbs, cys, aiml, ds, iot, it, ece, eee, eie, mech, civil, auto";

fn collect_records(
    stmt: &mut rusqlite::Statement<'_>,
    params: &[&dyn rusqlite::ToSql],
) -> Result<Vec<CompanyStatRecord>> {
    let rows = stmt
        .query_map(params, record_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<CompanyStatRecord> {
    Ok(CompanyStatRecord {
        company_name: row.get(0)?,
        year: row.get(1)?,
        salary: row.get(2)?,
        internship_ppo: row.get(3)?,
        total_offers: row.get(4)?,
        cse: row.get(5)?,
        csbs: row.get(6)?,
        cys: row.get(7)?,
        aiml: row.get(8)?,
        ds: row.get(9)?,
        iot: row.get(10)?,
        it: row.get(11)?,
        ece: row.get(12)?,
        eee: row.get(13)?,
        eie: row.get(14)?,
        mech: row.get(15)?,
        civil: row.get(16)?,
        auto: row.get(17)?,
    })
}

impl Database {
    /// Insert or replace a stat record, keyed by (company_name, year).
    /// The company name is stored uppercased.
    pub fn upsert_stat_record(&self, record: &CompanyStatRecord) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO company_stats
             (company_name, year, salary, internship_ppo, total_offers,
              cse, csbs, cys, aiml, ds, iot, it, ece, eee, eie, mech, civil, auto,
              created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
            params![
                record.company_name.to_uppercase(),
                record.year,
                record.salary,
                record.internship_ppo,
                record.total_offers,
                record.cse,
                record.csbs,
                record.cys,
                record.aiml,
                record.ds,
                record.iot,
                record.it,
                record.ece,
                record.eee,
                record.eie,
                record.mech,
                record.civil,
                record.auto,
                now,
            ],
        )?;
        Ok(())
    }

    /// Fetch stat records matching the filter.
    ///
    /// One key applies a single equality condition, two keys a conjunction,
    /// an empty filter fetches everything.
    pub fn fetch_stat_records(&self, filter: &StatsFilter) -> Result<Vec<CompanyStatRecord>> {
        let conn = self.conn()?;

        match (&filter.company, filter.year) {
            (Some(company), Some(year)) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM company_stats WHERE company_name = ?1 AND year = ?2
                     ORDER BY year, company_name",
                    RECORD_COLUMNS
                ))?;
                collect_records(&mut stmt, &[company, &year])
            }
            (Some(company), None) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM company_stats WHERE company_name = ?1
                     ORDER BY year, company_name",
                    RECORD_COLUMNS
                ))?;
                collect_records(&mut stmt, &[company])
            }
            (None, Some(year)) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM company_stats WHERE year = ?1
                     ORDER BY year, company_name",
                    RECORD_COLUMNS
                ))?;
                collect_records(&mut stmt, &[&year])
            }
            (None, None) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM company_stats ORDER BY year, company_name",
                    RECORD_COLUMNS
                ))?;
                collect_records(&mut stmt, &[])
            }
        }
    }

    /// Count stat records
    pub fn stat_record_count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM company_stats", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();

        db.upsert_stat_record(&CompanyStatRecord {
            company_name: "TCS".into(),
            year: 2022,
            salary: Some(3.5),
            total_offers: Some(40),
            cse: Some(12),
            ..Default::default()
        })
        .unwrap();
        db.upsert_stat_record(&CompanyStatRecord {
            company_name: "TCS".into(),
            year: 2023,
            salary: Some(3.8),
            total_offers: Some(55),
            ..Default::default()
        })
        .unwrap();
        db.upsert_stat_record(&CompanyStatRecord {
            company_name: "INFOSYS".into(),
            year: 2023,
            salary: Some(4.0),
            total_offers: Some(30),
            ..Default::default()
        })
        .unwrap();
        db
    }

    #[test]
    fn test_conjunction_filter() {
        let db = seeded_db();
        let records = db
            .fetch_stat_records(&StatsFilter::new(Some("infosys"), Some(2023)))
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company_name, "INFOSYS");
        assert_eq!(records[0].year, 2023);
    }

    #[test]
    fn test_single_key_filter() {
        let db = seeded_db();
        let records = db
            .fetch_stat_records(&StatsFilter::new(Some("tcs"), None))
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.company_name == "TCS"));

        let records = db
            .fetch_stat_records(&StatsFilter::new(None, Some(2023)))
            .unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_unfiltered_fetch() {
        let db = seeded_db();
        let records = db.fetch_stat_records(&StatsFilter::default()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(db.stat_record_count().unwrap(), 3);
    }

    #[test]
    fn test_upsert_replaces_by_company_year() {
        let db = seeded_db();
        db.upsert_stat_record(&CompanyStatRecord {
            company_name: "TCS".into(),
            year: 2022,
            salary: Some(3.6),
            ..Default::default()
        })
        .unwrap();

        let records = db
            .fetch_stat_records(&StatsFilter::new(Some("TCS"), Some(2022)))
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].salary, Some(3.6));
    }

    #[test]
    fn test_no_match_returns_empty() {
        let db = seeded_db();
        let records = db
            .fetch_stat_records(&StatsFilter::new(Some("WIPRO"), Some(2020)))
            .unwrap();
        assert!(records.is_empty());
    }
}
