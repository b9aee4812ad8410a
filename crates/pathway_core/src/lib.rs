//! Core progress-tracking engine for the Pathway immigration dashboard.
//! This crate is the single source of truth for activity, readiness, and
//! journey invariants; presentation layers only read projections from it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::{
    describe, format_timestamp, ActivityConfig, ActivityDetails, ActivityEvent, ActivityEventId,
    ActivityKind,
};
pub use model::document::{
    DocumentId, DocumentRecord, DocumentStatus, StageId, StageRequirements,
};
pub use model::milestone::{Milestone, MilestoneStatus};
pub use model::now_epoch_ms;
pub use model::scan::{ScanPayload, ScanResult, ScanSummary, SCAN_SCHEMA_VERSION};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use service::activity_service::{
    ActivityFeedItem, AppendOutcome, EventLog, ACTIVITY_LOG_CAPACITY, ACTIVITY_LOG_KEY,
    MERGE_WINDOW_MS,
};
pub use service::dashboard::Dashboard;
pub use service::entitlement_service::{EntitlementFlag, PREMIUM_FLAG_KEY};
pub use service::journey_service::{JourneyError, JourneyTimeline};
pub use service::readiness_service::{ReadinessTracker, StageProgress, StatusChange};
pub use service::scan_service::{DocumentScanner, MockScanner, ScanError, ScanOutcome, ScanService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
