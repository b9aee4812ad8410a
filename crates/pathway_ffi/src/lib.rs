//! Flutter-facing bindings for `pathway_core`.

pub mod api;
