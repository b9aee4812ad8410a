//! Domain model for the progress-tracking core.
//!
//! # Responsibility
//! - Define the records shared by the activity log, readiness tracker, and
//!   journey timeline.
//! - Keep display-independent derivations (descriptions, badges) next to the
//!   data they read.
//!
//! # Invariants
//! - Timestamps are Unix epoch milliseconds (UTC).

pub mod activity;
pub mod document;
pub mod milestone;
pub mod scan;

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
