//! Premium entitlement flag.
//!
//! # Responsibility
//! - Load the persisted premium flag at startup.
//! - Persist the flag on every change.
//!
//! # Invariants
//! - Missing or unreadable values mean "not premium".
//! - Write failures keep the in-memory value and stop further writes.

use crate::repo::kv_repo::KeyValueStore;
use log::{info, warn};

/// Store key of the serialized premium flag.
pub const PREMIUM_FLAG_KEY: &str = "pathway.premium";

/// Persisted boolean read by the entitlement gate.
pub struct EntitlementFlag<S: KeyValueStore> {
    store: S,
    premium: bool,
    persistence_degraded: bool,
}

impl<S: KeyValueStore> EntitlementFlag<S> {
    pub fn load(store: S) -> Self {
        let premium = match store.get(PREMIUM_FLAG_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<bool>(raw.as_str()).unwrap_or_else(|_| {
                warn!("event=premium_load module=entitlement status=error error_code=corrupt_flag");
                false
            }),
            Ok(None) => false,
            Err(err) => {
                warn!(
                    "event=premium_load module=entitlement status=error error_code=store_read_failed error={err}"
                );
                false
            }
        };

        Self {
            store,
            premium,
            persistence_degraded: false,
        }
    }

    pub fn is_premium(&self) -> bool {
        self.premium
    }

    pub fn set_premium(&mut self, premium: bool) {
        self.premium = premium;
        info!("event=premium_set module=entitlement status=ok premium={premium}");
        if self.persistence_degraded {
            return;
        }

        let value = if premium { "true" } else { "false" };
        if let Err(err) = self.store.put(PREMIUM_FLAG_KEY, value) {
            warn!(
                "event=premium_persist module=entitlement status=degraded error_code=store_write_failed error={err}"
            );
            self.persistence_degraded = true;
        }
    }

    /// Flips the flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.set_premium(!self.premium);
        self.premium
    }

    pub fn is_persistence_degraded(&self) -> bool {
        self.persistence_degraded
    }
}
