//! Local store for dashboard state.
//!
//! All persisted dashboard state (activity log, premium flag) lives in one
//! `kv_store` table. This module owns opening that database and bringing its
//! layout up to date; repositories only ever see a ready connection.
//!
//! The layout revision is kept in `PRAGMA user_version`. A store stamped with
//! a revision this build does not know is refused and left untouched.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The store was written by a newer build.
    StoreFromNewerBuild { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "dashboard store: {err}"),
            Self::StoreFromNewerBuild { found, supported } => write!(
                f,
                "dashboard store layout r{found} needs a newer build (this build reads up to r{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            return Some(err);
        }
        None
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
