use pathway_core::db::migrations::supported_revision;
use pathway_core::db::{open_db, open_db_in_memory, DbError};
use pathway_core::{KeyValueStore, SqliteKeyValueStore};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_reaches_supported_revision() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), supported_revision());
    assert_table_exists(&conn, "kv_store");
}

#[test]
fn reopening_file_database_keeps_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pathway.db");

    let conn_first = open_db(&path).unwrap();
    SqliteKeyValueStore::new(&conn_first)
        .put("pathway.test", "kept")
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), supported_revision());
    let value = SqliteKeyValueStore::new(&conn_second)
        .get("pathway.test")
        .unwrap();
    assert_eq!(value.as_deref(), Some("kept"));
}

#[test]
fn store_from_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::StoreFromNewerBuild { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, supported_revision());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sqlite_store_upserts_and_removes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    store.put("pathway.key", "one").unwrap();
    store.put("pathway.key", "two").unwrap();
    assert_eq!(store.get("pathway.key").unwrap().as_deref(), Some("two"));

    store.remove("pathway.key").unwrap();
    store.remove("pathway.key").unwrap();
    assert_eq!(store.get("pathway.key").unwrap(), None);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
