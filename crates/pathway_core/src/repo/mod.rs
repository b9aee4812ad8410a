//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value contract the services persist through.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Keys are namespaced, non-blank strings.
//! - Each key is an independent resource; writes are last-write-wins.

pub mod kv_repo;
