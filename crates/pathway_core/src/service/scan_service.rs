//! Document scanning collaborator boundary.
//!
//! # Responsibility
//! - Define the scanner contract: document in, typed payload and status out.
//! - Apply a completed scan to the catalog and record it in the activity log.
//! - Provide a deterministic mock scanner standing in for a real provider.
//!
//! # Invariants
//! - Scanners may only report `Scanned` or `Verified`.
//! - Only `ScanSummary` metadata is logged, never extracted field values.
//! - A scan never regresses document status.

use crate::model::activity::{ActivityDetails, ActivityKind};
use crate::model::document::{DocumentRecord, DocumentStatus};
use crate::model::now_epoch_ms;
use crate::model::scan::{ScanPayload, ScanResult};
use crate::repo::kv_repo::KeyValueStore;
use crate::service::activity_service::EventLog;
use crate::service::readiness_service::{advance_status, StatusChange};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Scan failure reported by a scanner or rejected by the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Target document id is not in the catalog.
    DocumentNotFound(String),
    /// Scanner could not read the document.
    Unreadable(String),
    /// Scanner reported a status other than `Scanned` or `Verified`.
    InvalidStatus(DocumentStatus),
    /// Payload layout is newer than this build understands.
    UnsupportedSchema(u32),
}

impl Display for ScanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DocumentNotFound(id) => write!(f, "document not found: {id}"),
            Self::Unreadable(reason) => write!(f, "document could not be scanned: {reason}"),
            Self::InvalidStatus(status) => {
                write!(f, "scanner reported invalid status `{}`", status.as_str())
            }
            Self::UnsupportedSchema(version) => {
                write!(f, "unsupported scan schema version {version}")
            }
        }
    }
}

impl Error for ScanError {}

/// Output of one finished scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub result: ScanResult,
    pub status: DocumentStatus,
}

/// Recognition provider contract.
pub trait DocumentScanner {
    fn scan(&self, document: &DocumentRecord) -> Result<ScanOutcome, ScanError>;
}

/// Deterministic stand-in scanner.
///
/// Passports are reported `Verified`; everything else `Scanned`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockScanner;

impl DocumentScanner for MockScanner {
    fn scan(&self, document: &DocumentRecord) -> Result<ScanOutcome, ScanError> {
        let payload = match document.id.as_str() {
            "passport" => ScanPayload::Passport {
                surname: "SAMPLE".to_string(),
                given_names: "APPLICANT".to_string(),
                nationality: "XXX".to_string(),
                expiry_date: "2031-01-01".to_string(),
            },
            "language-test" => ScanPayload::LanguageTest {
                test_name: "IELTS General".to_string(),
                overall_score: "8.0".to_string(),
            },
            "educational-credentials" => ScanPayload::EducationalCredential {
                institution: "Sample University".to_string(),
                credential_level: "Bachelor".to_string(),
            },
            "work-letters" => ScanPayload::WorkLetter {
                employer: "Sample Employer Ltd.".to_string(),
            },
            other => ScanPayload::Generic {
                document_id: other.to_string(),
            },
        };

        let status = if matches!(payload, ScanPayload::Passport { .. }) {
            DocumentStatus::Verified
        } else {
            DocumentStatus::Scanned
        };

        Ok(ScanOutcome {
            result: ScanResult::new(payload, now_epoch_ms()),
            status,
        })
    }
}

/// Applies scanner output to the catalog and activity log.
pub struct ScanService<C: DocumentScanner> {
    scanner: C,
}

impl<C: DocumentScanner> ScanService<C> {
    pub fn new(scanner: C) -> Self {
        Self { scanner }
    }

    /// Scans `doc_id`, advances its status, and records the activity.
    ///
    /// An entry is appended only when the status actually moved forward.
    pub fn complete_scan<S: KeyValueStore>(
        &self,
        doc_id: &str,
        documents: &mut [DocumentRecord],
        log: &mut EventLog<S>,
    ) -> Result<ScanOutcome, ScanError> {
        let document = documents
            .iter()
            .find(|document| document.id == doc_id)
            .ok_or_else(|| ScanError::DocumentNotFound(doc_id.to_string()))?;
        let document_name = document.name.clone();

        let outcome = self.scanner.scan(document).inspect_err(|err| {
            warn!("event=document_scan module=scan status=error error={err}");
        })?;
        if !matches!(
            outcome.status,
            DocumentStatus::Scanned | DocumentStatus::Verified
        ) {
            return Err(ScanError::InvalidStatus(outcome.status));
        }
        if !outcome.result.is_supported_version() {
            return Err(ScanError::UnsupportedSchema(outcome.result.schema_version));
        }

        let summary = outcome.result.summary();
        info!(
            "event=document_scan module=scan status=ok document_type={} schema_version={} scanned_at={}",
            summary.document_type, summary.schema_version, summary.scanned_at
        );

        if let StatusChange::Transitioned { to, .. } =
            advance_status(doc_id, outcome.status, documents)
        {
            let kind = if to == DocumentStatus::Verified {
                ActivityKind::DocumentVerified
            } else {
                ActivityKind::DocumentMarkedReady
            };
            log.append(kind, ActivityDetails::document(document_name));
        }

        Ok(outcome)
    }
}
