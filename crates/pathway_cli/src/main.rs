//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `pathway_core` linkage without the Flutter/FFI runtime.
//! - Print a deterministic summary of the stage table and, when a database
//!   path is given, of the persisted dashboard state.

use pathway_core::db::open_db;
use pathway_core::{now_epoch_ms, Dashboard, SqliteKeyValueStore, StageRequirements};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("pathway_core ping={}", pathway_core::ping());
    println!("pathway_core version={}", pathway_core::core_version());

    let stages = StageRequirements::standard();
    for stage_id in stages.stage_ids() {
        println!(
            "stage={} required_documents={}",
            stage_id,
            stages.documents_for(stage_id).join(",")
        );
    }

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };
    let dashboard = Dashboard::open(SqliteKeyValueStore::new(&conn));
    println!("premium={}", dashboard.entitlement().is_premium());
    println!("activity_entries={}", dashboard.activity().len());
    for item in dashboard.activity().feed(now_epoch_ms()) {
        println!("[{}] {}: {}", item.timestamp_text, item.label, item.description);
    }

    ExitCode::SUCCESS
}
