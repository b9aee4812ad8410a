use pathway_core::db::open_db;
use pathway_core::{
    describe, ActivityDetails, ActivityKind, AppendOutcome, EventLog, KeyValueStore,
    MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore, ACTIVITY_LOG_CAPACITY,
    ACTIVITY_LOG_KEY, MERGE_WINDOW_MS,
};
use proptest::prelude::*;
use std::cell::Cell;

const T0: i64 = 1_760_000_000_000;
const MINUTE_MS: i64 = 60 * 1000;

/// Store that accepts reads but fails every write.
#[derive(Default)]
struct ReadOnlyStore {
    write_attempts: Cell<usize>,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> RepoResult<Option<String>> {
        Ok(None)
    }

    fn put(&self, key: &str, _value: &str) -> RepoResult<()> {
        self.write_attempts.set(self.write_attempts.get() + 1);
        Err(RepoError::InvalidKey(key.to_string()))
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.write_attempts.set(self.write_attempts.get() + 1);
        Err(RepoError::InvalidKey(key.to_string()))
    }
}

#[test]
fn profile_updates_within_window_merge_into_one_entry() {
    let mut log = EventLog::load(MemoryKeyValueStore::new());
    log.append_at(
        ActivityKind::ProfileUpdated,
        ActivityDetails::profile(Some("Education".into()), Some("Degree".into())),
        T0,
    );
    let second = log.append_at(
        ActivityKind::ProfileUpdated,
        ActivityDetails::profile(None, Some("Institution".into())),
        T0 + 10 * MINUTE_MS,
    );

    assert!(matches!(second, AppendOutcome::Merged(_)));
    assert_eq!(log.len(), 1);
    let entry = &log.list()[0];
    assert_eq!(entry.timestamp, T0 + 10 * MINUTE_MS);
    assert_eq!(entry.details.section_name.as_deref(), Some("Education"));
    assert_eq!(entry.details.field_name.as_deref(), Some("Institution"));
}

#[test]
fn profile_updates_beyond_window_stay_distinct() {
    let mut log = EventLog::load(MemoryKeyValueStore::new());
    log.append_at(ActivityKind::ProfileUpdated, ActivityDetails::default(), T0);
    log.append_at(
        ActivityKind::ProfileUpdated,
        ActivityDetails::default(),
        T0 + MERGE_WINDOW_MS + MINUTE_MS,
    );

    assert_eq!(log.len(), 2);
    assert_ne!(log.list()[0].id, log.list()[1].id);
    assert!(log.list()[0].timestamp > log.list()[1].timestamp);
}

#[test]
fn score_events_are_listed_newest_first_with_descriptions() {
    let mut log = EventLog::load(MemoryKeyValueStore::new());
    log.append_at(
        ActivityKind::ScoreAssessed,
        ActivityDetails::score(None, 450),
        T0,
    );
    log.append_at(
        ActivityKind::ScoreModified,
        ActivityDetails::score(Some(450), 470),
        T0 + MINUTE_MS,
    );

    let entries = log.list();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].kind, ActivityKind::ScoreModified);
    assert_eq!(entries[1].kind, ActivityKind::ScoreAssessed);
    assert_eq!(describe(&entries[0]), "450 → 470 points");
    assert_eq!(describe(&entries[1]), "Score: 450 points");
}

#[test]
fn log_survives_reopen_and_clear_erases_persisted_copy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pathway.db");

    {
        let conn = open_db(&path).unwrap();
        let mut log = EventLog::load(SqliteKeyValueStore::new(&conn));
        log.append_at(
            ActivityKind::ChecklistToggled,
            ActivityDetails::checklist("Request police certificate", true),
            T0,
        );
        log.append_at(
            ActivityKind::DocumentMarkedReady,
            ActivityDetails::document("Passport"),
            T0 + 1,
        );
    }

    let conn = open_db(&path).unwrap();
    let mut reloaded = EventLog::load(SqliteKeyValueStore::new(&conn));
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.list()[0].kind, ActivityKind::DocumentMarkedReady);

    reloaded.clear();
    reloaded.clear();
    assert!(reloaded.is_empty());

    let fresh = EventLog::load(SqliteKeyValueStore::new(&conn));
    assert!(fresh.is_empty());
    assert_eq!(
        SqliteKeyValueStore::new(&conn).get(ACTIVITY_LOG_KEY).unwrap(),
        None
    );
}

#[test]
fn corrupt_persisted_log_loads_empty() {
    let store = MemoryKeyValueStore::new();
    store.put(ACTIVITY_LOG_KEY, "{not json").unwrap();

    let mut log = EventLog::load(store.clone());
    assert!(log.is_empty());

    log.append_at(ActivityKind::ScoreAssessed, ActivityDetails::score(None, 400), T0);
    let persisted = store.get(ACTIVITY_LOG_KEY).unwrap().unwrap();
    assert!(persisted.starts_with('['));
}

#[test]
fn oversized_persisted_log_is_truncated_on_load() {
    let source = MemoryKeyValueStore::new();
    let mut log = EventLog::load(source.clone());
    for offset in 0..ACTIVITY_LOG_CAPACITY as i64 {
        log.append_at(ActivityKind::ScoreAssessed, ActivityDetails::score(None, offset), T0 + offset);
    }
    let raw = source.get(ACTIVITY_LOG_KEY).unwrap().unwrap();
    let mut entries: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    let extra = entries.clone();
    entries.extend(extra.into_iter().map(|mut entry| {
        entry["id"] = serde_json::Value::String("00000000-0000-4000-8000-000000000000".into());
        entry
    }));

    let store = MemoryKeyValueStore::new();
    store
        .put(ACTIVITY_LOG_KEY, &serde_json::to_string(&entries).unwrap())
        .unwrap();

    let reloaded = EventLog::load(store);
    assert_eq!(reloaded.len(), ACTIVITY_LOG_CAPACITY);
    assert_eq!(reloaded.list()[0].details.new_value, Some(49));
}

#[test]
fn write_failures_degrade_to_memory_without_error() {
    let store = ReadOnlyStore::default();
    let mut log = EventLog::load(&store);

    log.append_at(ActivityKind::ScoreAssessed, ActivityDetails::score(None, 420), T0);
    assert!(log.is_persistence_degraded());
    log.append_at(ActivityKind::ScoreModified, ActivityDetails::score(Some(420), 430), T0 + 1);
    log.clear();
    log.append_at(ActivityKind::DocumentVerified, ActivityDetails::default(), T0 + 2);

    assert_eq!(log.len(), 1);
    assert!(log.is_persistence_degraded());
    // One failed put, then the erase that clear always attempts.
    assert_eq!(store.write_attempts.get(), 2);
}

/// Store whose puts fail above a size limit while removes still succeed.
struct QuotaStore {
    inner: MemoryKeyValueStore,
    max_value_len: usize,
}

impl KeyValueStore for QuotaStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        if value.len() > self.max_value_len {
            return Err(RepoError::InvalidKey(key.to_string()));
        }
        self.inner.put(key, value)
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.inner.remove(key)
    }
}

#[test]
fn clear_in_degraded_mode_still_erases_stale_snapshot() {
    let backing = MemoryKeyValueStore::new();
    let store = QuotaStore {
        inner: backing.clone(),
        max_value_len: 400,
    };
    let mut log = EventLog::load(&store);
    for offset in 0..5 {
        log.append_at(
            ActivityKind::ScoreAssessed,
            ActivityDetails::score(None, 400 + offset),
            T0 + offset,
        );
    }
    assert!(log.is_persistence_degraded());
    assert!(backing.get(ACTIVITY_LOG_KEY).unwrap().is_some());

    log.clear();

    assert!(log.is_empty());
    assert!(!log.is_persistence_degraded());
    assert_eq!(backing.get(ACTIVITY_LOG_KEY).unwrap(), None);
    assert!(EventLog::load(&store).is_empty());

    log.append_at(ActivityKind::ScoreAssessed, ActivityDetails::score(None, 410), T0 + 10);
    assert_eq!(EventLog::load(&store).len(), 1);
}

fn arb_kind() -> impl Strategy<Value = ActivityKind> {
    prop::sample::select(ActivityKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn log_never_exceeds_capacity(
        steps in prop::collection::vec((arb_kind(), 0i64..(2 * MERGE_WINDOW_MS)), 1..160)
    ) {
        let mut log = EventLog::load(MemoryKeyValueStore::new());
        let mut now = T0;
        for (kind, gap) in steps {
            now += gap;
            let before = log.len();
            let outcome = log.append_at(kind, ActivityDetails::default(), now);

            prop_assert!(log.len() <= ACTIVITY_LOG_CAPACITY);
            if let AppendOutcome::Merged(_) = outcome {
                prop_assert_eq!(log.len(), before);
            }
            prop_assert!(log
                .list()
                .windows(2)
                .all(|pair| pair[0].timestamp >= pair[1].timestamp));
        }
    }
}
