//! Store status

use anyhow::Result;
use placemate_core::Database;

pub fn run(db: &Database) -> Result<()> {
    let status = db.status()?;

    println!("Placemate backend is running successfully!");
    println!();
    println!("Stat records:      {}", status.stat_record_count);
    println!("Insight documents: {}", status.insight_count);
    println!("Embedded:          {}", status.embedded_count);
    println!("Pending embedding: {}", status.pending_embedding);
    println!("Cached answers:    {}", status.cached_answers);

    Ok(())
}
