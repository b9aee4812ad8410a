//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose dashboard use-cases to Dart via FRB as sync calls.
//! - Translate core types into flat, string-keyed envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures are reported inside envelopes (`ok=false`, `message`), never
//!   as panics.
//! - When the database cannot be opened, calls continue on an in-memory store.

use log::warn;
use pathway_core::db::open_db;
use pathway_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, now_epoch_ms,
    ping as ping_inner, ActivityDetails, ActivityFeedItem, ActivityKind, Dashboard,
    DocumentRecord, DocumentStatus, JourneyTimeline, KeyValueStore, MemoryKeyValueStore,
    Milestone, MilestoneStatus, ReadinessTracker, RepoResult, SqliteKeyValueStore,
    StageRequirements,
};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;

const ENTRY_DB_FILE_NAME: &str = "pathway_dashboard.sqlite3";
static ENTRY_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
/// - Idempotent for the same `level + log_dir`; conflicting calls return an
///   error message.
/// - Returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Activity feed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub id: String,
    /// Wire kind (`score_assessed|...|profile_updated`).
    pub kind: String,
    pub label: String,
    pub icon: String,
    pub color: String,
    pub description: String,
    pub timestamp_ms: i64,
    pub timestamp_text: String,
}

/// Activity feed envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityListResponse {
    pub items: Vec<ActivityEntry>,
    /// Whether the log is running without persistence.
    pub memory_only: bool,
}

/// Sparse activity details supplied by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityDetailsInput {
    pub previous_value: Option<i64>,
    pub new_value: Option<i64>,
    pub item_name: Option<String>,
    pub checked: Option<bool>,
    pub document_name: Option<String>,
    pub section_name: Option<String>,
    pub field_name: Option<String>,
}

/// Generic action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    pub ok: bool,
    /// Affected activity entry, when one was created or merged.
    pub event_id: Option<String>,
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, event_id: Option<String>) -> Self {
        Self {
            ok: true,
            event_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            event_id: None,
            message: message.into(),
        }
    }
}

/// Document as exchanged with the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentItem {
    pub id: String,
    pub name: String,
    /// `pending|have_it|scanned|verified`.
    pub status: String,
    /// Display badge text; ignored on input.
    pub badge: String,
    pub relevant_stages: Vec<String>,
}

/// Stage readiness envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageProgressResponse {
    pub ok: bool,
    pub ready: u32,
    pub total: u32,
    pub percentage: u32,
    /// Required documents present in the catalog, in catalog order.
    pub documents: Vec<DocumentItem>,
    pub message: String,
}

/// Document update envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpdateResponse {
    pub ok: bool,
    pub changed: bool,
    pub documents: Vec<DocumentItem>,
    pub message: String,
}

/// Milestone as supplied by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneInput {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    pub date: Option<String>,
    /// `completed|current|upcoming`.
    pub status: String,
}

/// Journey validation envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyResponse {
    pub ok: bool,
    pub current_index: Option<u32>,
    /// Per-milestone interaction gate, in input order.
    pub clickable: Vec<bool>,
    pub message: String,
}

/// Lists the activity feed, newest-first.
#[flutter_rust_bridge::frb(sync)]
pub fn activity_list() -> ActivityListResponse {
    with_dashboard(|dashboard| {
        let now = now_epoch_ms();
        ActivityListResponse {
            items: dashboard
                .activity()
                .feed(now)
                .into_iter()
                .map(to_activity_entry)
                .collect(),
            memory_only: dashboard.activity().is_persistence_degraded(),
        }
    })
}

/// Records one user action.
///
/// # FFI contract
/// - `kind` must be a known wire kind; unknown kinds are rejected.
/// - Profile updates inside the merge window report the merged entry id.
#[flutter_rust_bridge::frb(sync)]
pub fn activity_record(kind: String, details: ActivityDetailsInput) -> EntryActionResponse {
    let Some(kind) = ActivityKind::parse(kind.as_str()) else {
        return EntryActionResponse::failure(format!("activity_record failed: unknown kind `{kind}`"));
    };
    let details = to_core_details(details);
    with_dashboard(|dashboard| {
        let outcome = dashboard.activity_mut().append(kind, details);
        EntryActionResponse::success(
            "Activity recorded.",
            Some(outcome.event_id().to_string()),
        )
    })
}

/// Clears the activity log and its persisted copy.
#[flutter_rust_bridge::frb(sync)]
pub fn activity_clear() -> EntryActionResponse {
    with_dashboard(|dashboard| {
        dashboard.activity_mut().clear();
        EntryActionResponse::success("Activity cleared.", None)
    })
}

/// Returns the persisted premium flag.
#[flutter_rust_bridge::frb(sync)]
pub fn premium_status() -> bool {
    with_dashboard(|dashboard| dashboard.entitlement().is_premium())
}

/// Persists the premium flag.
#[flutter_rust_bridge::frb(sync)]
pub fn premium_set(premium: bool) -> EntryActionResponse {
    with_dashboard(|dashboard| {
        dashboard.entitlement_mut().set_premium(premium);
        EntryActionResponse::success("Premium flag updated.", None)
    })
}

/// Required document ids for one stage; empty for unknown stages.
#[flutter_rust_bridge::frb(sync)]
pub fn stage_required_documents(stage_id: String) -> Vec<String> {
    StageRequirements::standard()
        .documents_for(stage_id.as_str())
        .to_vec()
}

/// Computes readiness for one stage over the supplied catalog.
#[flutter_rust_bridge::frb(sync)]
pub fn stage_progress(stage_id: String, documents: Vec<DocumentItem>) -> StageProgressResponse {
    let documents = match to_core_documents(documents) {
        Ok(documents) => documents,
        Err(message) => {
            return StageProgressResponse {
                ok: false,
                ready: 0,
                total: 0,
                percentage: 0,
                documents: Vec::new(),
                message: format!("stage_progress failed: {message}"),
            };
        }
    };

    let table = StageRequirements::standard();
    let tracker = ReadinessTracker::new(&table);
    let progress = tracker.progress(stage_id.as_str(), &documents);
    StageProgressResponse {
        ok: true,
        ready: clamp_u32(progress.ready),
        total: clamp_u32(progress.total),
        percentage: u32::from(progress.percentage),
        documents: tracker
            .stage_documents(stage_id.as_str(), &documents)
            .into_iter()
            .map(to_document_item)
            .collect(),
        message: String::new(),
    }
}

/// Self-reports one document as ready and returns the updated catalog.
///
/// # FFI contract
/// - Only `pending` documents move to `have_it`; everything else is a no-op.
/// - A transition is recorded in the activity log.
#[flutter_rust_bridge::frb(sync)]
pub fn document_mark_have_it(doc_id: String, documents: Vec<DocumentItem>) -> DocumentUpdateResponse {
    let mut documents = match to_core_documents(documents) {
        Ok(documents) => documents,
        Err(message) => {
            return DocumentUpdateResponse {
                ok: false,
                changed: false,
                documents: Vec::new(),
                message: format!("document_mark_have_it failed: {message}"),
            };
        }
    };

    let change = with_dashboard(|dashboard| {
        dashboard.mark_document_ready(doc_id.trim(), &mut documents)
    });
    DocumentUpdateResponse {
        ok: true,
        changed: change.is_transition(),
        documents: documents.iter().map(to_document_item).collect(),
        message: String::new(),
    }
}

/// Validates a milestone list and returns current index and gating.
#[flutter_rust_bridge::frb(sync)]
pub fn journey_validate(milestones: Vec<MilestoneInput>) -> JourneyResponse {
    let milestones = match milestones
        .into_iter()
        .map(to_core_milestone)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(milestones) => milestones,
        Err(message) => return journey_failure(message),
    };

    match JourneyTimeline::validate(milestones) {
        Ok(timeline) => JourneyResponse {
            ok: true,
            current_index: timeline.current_index().map(clamp_u32),
            clickable: (0..timeline.milestones().len())
                .map(|index| timeline.is_clickable(index))
                .collect(),
            message: String::new(),
        },
        Err(err) => journey_failure(err.to_string()),
    }
}

fn journey_failure(message: String) -> JourneyResponse {
    JourneyResponse {
        ok: false,
        current_index: None,
        clickable: Vec::new(),
        message: format!("journey_validate failed: {message}"),
    }
}

/// Store used by FFI calls: the entry database, or memory when unavailable.
#[derive(Clone)]
enum EntryStore<'conn> {
    Sqlite(SqliteKeyValueStore<'conn>),
    Memory(MemoryKeyValueStore),
}

impl KeyValueStore for EntryStore<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        match self {
            Self::Sqlite(store) => store.get(key),
            Self::Memory(store) => store.get(key),
        }
    }

    fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        match self {
            Self::Sqlite(store) => store.put(key, value),
            Self::Memory(store) => store.put(key, value),
        }
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        match self {
            Self::Sqlite(store) => store.remove(key),
            Self::Memory(store) => store.remove(key),
        }
    }
}

fn with_dashboard<T>(f: impl FnOnce(&mut Dashboard<EntryStore<'_>>) -> T) -> T {
    let db_path = resolve_entry_db_path();
    let conn: Option<Connection> = match open_db(&db_path) {
        Ok(conn) => Some(conn),
        Err(err) => {
            warn!("event=ffi_db_open module=ffi status=degraded error={err}");
            None
        }
    };
    let store = match conn.as_ref() {
        Some(conn) => EntryStore::Sqlite(SqliteKeyValueStore::new(conn)),
        None => EntryStore::Memory(MemoryKeyValueStore::new()),
    };
    let mut dashboard = Dashboard::open(store);
    f(&mut dashboard)
}

fn resolve_entry_db_path() -> PathBuf {
    ENTRY_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("PATHWAY_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(ENTRY_DB_FILE_NAME)
        })
        .clone()
}

fn to_activity_entry(item: ActivityFeedItem) -> ActivityEntry {
    ActivityEntry {
        id: item.id.to_string(),
        kind: item.kind.as_str().to_string(),
        label: item.label.to_string(),
        icon: item.icon.to_string(),
        color: item.color.to_string(),
        description: item.description,
        timestamp_ms: item.timestamp,
        timestamp_text: item.timestamp_text,
    }
}

fn to_core_details(input: ActivityDetailsInput) -> ActivityDetails {
    ActivityDetails {
        previous_value: input.previous_value,
        new_value: input.new_value,
        item_name: input.item_name,
        checked: input.checked,
        document_name: input.document_name,
        section_name: input.section_name,
        field_name: input.field_name,
    }
}

fn to_core_documents(items: Vec<DocumentItem>) -> Result<Vec<DocumentRecord>, String> {
    items
        .into_iter()
        .map(|item| {
            let status = DocumentStatus::parse(item.status.as_str())
                .ok_or_else(|| format!("unknown document status `{}`", item.status))?;
            Ok(DocumentRecord::new(item.id, item.name)
                .with_status(status)
                .with_stages(item.relevant_stages))
        })
        .collect()
}

fn to_document_item(document: &DocumentRecord) -> DocumentItem {
    DocumentItem {
        id: document.id.clone(),
        name: document.name.clone(),
        status: document.status.as_str().to_string(),
        badge: document.status.badge_label().to_string(),
        relevant_stages: document.relevant_stages.iter().cloned().collect(),
    }
}

fn to_core_milestone(input: MilestoneInput) -> Result<Milestone, String> {
    let status = MilestoneStatus::parse(input.status.as_str())
        .ok_or_else(|| format!("unknown milestone status `{}`", input.status))?;
    Ok(Milestone {
        id: input.id,
        label: input.label,
        description: input.description,
        date: input.date,
        status,
    })
}

fn clamp_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
