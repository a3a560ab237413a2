//! Answer cache maintenance

use crate::app::{CacheAction, CacheArgs};
use anyhow::Result;
use placemate_core::Database;

pub fn run(args: CacheArgs, db: &Database) -> Result<()> {
    match args.action {
        CacheAction::Purge => {
            let removed = db.purge_expired_answers()?;
            println!("Purged {} expired entries", removed);
        }
        CacheAction::Clear => {
            let removed = db.clear_answer_cache()?;
            println!("Cleared {} entries", removed);
        }
    }
    Ok(())
}
