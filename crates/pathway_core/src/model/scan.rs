//! Scanned-document payloads produced by the scanning collaborator.
//!
//! # Responsibility
//! - Give scan output a typed shape keyed by document type.
//! - Expose a metadata-only summary that is safe to log.
//!
//! # Invariants
//! - `ScanSummary` never carries field values extracted from a document.
//! - `schema_version` identifies the payload layout; readers reject versions
//!   newer than `SCAN_SCHEMA_VERSION`.

use serde::{Deserialize, Serialize};

/// Latest payload layout understood by this build.
pub const SCAN_SCHEMA_VERSION: u32 = 1;

/// Extracted document fields, tagged by document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "document_type", rename_all = "snake_case")]
pub enum ScanPayload {
    Passport {
        surname: String,
        given_names: String,
        nationality: String,
        expiry_date: String,
    },
    LanguageTest {
        test_name: String,
        overall_score: String,
    },
    EducationalCredential {
        institution: String,
        credential_level: String,
    },
    WorkLetter {
        employer: String,
    },
    /// Any document without a dedicated layout.
    Generic {
        document_id: String,
    },
}

impl ScanPayload {
    pub fn document_type(&self) -> &'static str {
        match self {
            Self::Passport { .. } => "passport",
            Self::LanguageTest { .. } => "language_test",
            Self::EducationalCredential { .. } => "educational_credential",
            Self::WorkLetter { .. } => "work_letter",
            Self::Generic { .. } => "generic",
        }
    }
}

/// Versioned scan result envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub schema_version: u32,
    /// Unix epoch milliseconds when scanning finished.
    pub scanned_at: i64,
    pub payload: ScanPayload,
}

impl ScanResult {
    pub fn new(payload: ScanPayload, scanned_at: i64) -> Self {
        Self {
            schema_version: SCAN_SCHEMA_VERSION,
            scanned_at,
            payload,
        }
    }

    /// Stable, loggable subset of the result.
    pub fn summary(&self) -> ScanSummary {
        ScanSummary {
            document_type: self.payload.document_type(),
            schema_version: self.schema_version,
            scanned_at: self.scanned_at,
        }
    }

    pub fn is_supported_version(&self) -> bool {
        self.schema_version >= 1 && self.schema_version <= SCAN_SCHEMA_VERSION
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub document_type: &'static str,
    pub schema_version: u32,
    pub scanned_at: i64,
}
