//! Activity log use-case service.
//!
//! # Responsibility
//! - Own the ordered activity log: append, throttle-merge, clear, list.
//! - Persist the whole log through a `KeyValueStore` after every mutation.
//! - Project entries into feed items for presentation.
//!
//! # Invariants
//! - Entries are ordered newest-first.
//! - `len() <= ACTIVITY_LOG_CAPACITY` after every call.
//! - A merge never changes the length of the log.
//! - Storage failures never surface to callers; after the first failed write
//!   the log continues in memory only.

use crate::model::activity::{
    describe, format_timestamp, ActivityDetails, ActivityEvent, ActivityEventId, ActivityKind,
};
use crate::model::now_epoch_ms;
use crate::repo::kv_repo::KeyValueStore;
use log::{debug, info, warn};

/// Store key of the serialized activity log.
pub const ACTIVITY_LOG_KEY: &str = "pathway.activity_log";
/// Maximum retained entries; older ones are evicted.
pub const ACTIVITY_LOG_CAPACITY: usize = 50;
/// Same-kind entries younger than this are merged for throttled kinds.
pub const MERGE_WINDOW_MS: i64 = 30 * 60 * 1000;

/// Result of one `append` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Inserted(ActivityEventId),
    Merged(ActivityEventId),
}

impl AppendOutcome {
    pub fn event_id(self) -> ActivityEventId {
        match self {
            Self::Inserted(id) | Self::Merged(id) => id,
        }
    }
}

/// Presentation projection of one activity entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFeedItem {
    pub id: ActivityEventId,
    pub kind: ActivityKind,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub description: String,
    pub timestamp: i64,
    pub timestamp_text: String,
}

/// Bounded, throttled, persisted activity log.
pub struct EventLog<S: KeyValueStore> {
    store: S,
    entries: Vec<ActivityEvent>,
    persistence_degraded: bool,
}

impl<S: KeyValueStore> EventLog<S> {
    /// Loads the persisted log, treating missing or corrupt data as empty.
    pub fn load(store: S) -> Self {
        let entries = read_persisted(&store);
        Self {
            store,
            entries,
            persistence_degraded: false,
        }
    }

    /// Records one action at the current wall-clock time.
    pub fn append(&mut self, kind: ActivityKind, details: ActivityDetails) -> AppendOutcome {
        self.append_at(kind, details, now_epoch_ms())
    }

    /// Records one action at `now_ms`.
    ///
    /// Throttled kinds merge into the most recent same-kind entry when it is
    /// younger than `MERGE_WINDOW_MS`; the merged entry moves to the head.
    pub fn append_at(
        &mut self,
        kind: ActivityKind,
        details: ActivityDetails,
        now_ms: i64,
    ) -> AppendOutcome {
        let outcome = match self.merge_candidate(kind, now_ms) {
            Some(index) => {
                let mut event = self.entries.remove(index);
                event.timestamp = now_ms;
                event.details.merge_from(details);
                let id = event.id;
                self.entries.insert(0, event);
                AppendOutcome::Merged(id)
            }
            None => {
                let event = ActivityEvent::new(kind, details, now_ms);
                let id = event.id;
                self.entries.insert(0, event);
                self.entries.truncate(ACTIVITY_LOG_CAPACITY);
                AppendOutcome::Inserted(id)
            }
        };

        debug!(
            "event=activity_append module=activity status=ok kind={} merged={} len={}",
            kind.as_str(),
            matches!(outcome, AppendOutcome::Merged(_)),
            self.entries.len()
        );
        self.persist();
        outcome
    }

    /// Empties the log and erases the persisted copy.
    ///
    /// The erase runs even in degraded mode. A successful erase re-arms
    /// persistence.
    pub fn clear(&mut self) {
        self.entries.clear();
        info!("event=activity_clear module=activity status=ok");
        match self.store.remove(ACTIVITY_LOG_KEY) {
            Ok(()) => {
                if self.persistence_degraded {
                    info!("event=activity_persist module=activity status=rearmed");
                }
                self.persistence_degraded = false;
            }
            Err(err) => self.degrade(&err),
        }
    }

    /// Full log, newest-first.
    pub fn list(&self) -> &[ActivityEvent] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a write failed and the log now lives in memory only.
    pub fn is_persistence_degraded(&self) -> bool {
        self.persistence_degraded
    }

    /// Feed projection with labels, descriptions and timestamp text.
    pub fn feed(&self, now_ms: i64) -> Vec<ActivityFeedItem> {
        self.entries
            .iter()
            .map(|event| to_feed_item(event, now_ms))
            .collect()
    }

    fn merge_candidate(&self, kind: ActivityKind, now_ms: i64) -> Option<usize> {
        if !kind.is_throttled() {
            return None;
        }

        let mut latest: Option<(usize, i64)> = None;
        for (index, event) in self.entries.iter().enumerate() {
            if event.kind != kind {
                continue;
            }
            if latest.map_or(true, |(_, timestamp)| event.timestamp > timestamp) {
                latest = Some((index, event.timestamp));
            }
        }

        let (index, timestamp) = latest?;
        (now_ms.saturating_sub(timestamp) < MERGE_WINDOW_MS).then_some(index)
    }

    fn persist(&mut self) {
        if self.persistence_degraded {
            return;
        }

        let serialized = match serde_json::to_string(&self.entries) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=activity_persist module=activity status=error error_code=serialize_failed error={err}"
                );
                self.persistence_degraded = true;
                return;
            }
        };

        if let Err(err) = self.store.put(ACTIVITY_LOG_KEY, serialized.as_str()) {
            self.degrade(&err);
        }
    }

    fn degrade(&mut self, err: &dyn std::error::Error) {
        warn!(
            "event=activity_persist module=activity status=degraded error_code=store_write_failed error={err}"
        );
        self.persistence_degraded = true;
    }
}

/// Builds the presentation projection of one entry.
pub fn to_feed_item(event: &ActivityEvent, now_ms: i64) -> ActivityFeedItem {
    let config = event.kind.config();
    ActivityFeedItem {
        id: event.id,
        kind: event.kind,
        label: config.label,
        icon: config.icon,
        color: config.color,
        description: describe(event),
        timestamp: event.timestamp,
        timestamp_text: format_timestamp(event.timestamp, now_ms),
    }
}

fn read_persisted(store: &impl KeyValueStore) -> Vec<ActivityEvent> {
    let raw = match store.get(ACTIVITY_LOG_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(
                "event=activity_load module=activity status=error error_code=store_read_failed error={err}"
            );
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<ActivityEvent>>(raw.as_str()) {
        Ok(mut entries) => {
            entries.truncate(ACTIVITY_LOG_CAPACITY);
            info!(
                "event=activity_load module=activity status=ok len={}",
                entries.len()
            );
            entries
        }
        Err(err) => {
            warn!(
                "event=activity_load module=activity status=error error_code=corrupt_log line={} column={}",
                err.line(),
                err.column()
            );
            Vec::new()
        }
    }
}
