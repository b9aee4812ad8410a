//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model rules and store access into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod activity_service;
pub mod dashboard;
pub mod entitlement_service;
pub mod journey_service;
pub mod readiness_service;
pub mod scan_service;
