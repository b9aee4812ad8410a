//! Layout revisions for the dashboard store.
//!
//! Each revision is a SQL script applied once, oldest first. Upgrades from
//! any older revision run in a single transaction, and the revision reached is
//! stamped into `PRAGMA user_version` alongside each script.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Revision number paired with its upgrade script.
type Revision = (u32, &'static str);

const REVISIONS: [Revision; 1] = [(1, include_str!("0001_kv_store.sql"))];

/// Newest store layout this build can read.
pub fn supported_revision() -> u32 {
    REVISIONS.iter().map(|(revision, _)| *revision).max().unwrap_or(0)
}

/// Brings the store layout up to [`supported_revision`].
pub fn upgrade_store(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let supported = supported_revision();

    match found.cmp(&supported) {
        std::cmp::Ordering::Greater => Err(DbError::StoreFromNewerBuild { found, supported }),
        std::cmp::Ordering::Equal => Ok(()),
        std::cmp::Ordering::Less => {
            let tx = conn.transaction()?;
            for (revision, script) in REVISIONS.iter().skip_while(|(revision, _)| *revision <= found) {
                tx.execute_batch(script)?;
                tx.pragma_update(None, "user_version", revision)?;
            }
            tx.commit()?;
            Ok(())
        }
    }
}
