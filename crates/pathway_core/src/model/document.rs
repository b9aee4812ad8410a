//! Document readiness domain model.
//!
//! # Responsibility
//! - Define document records and their forward-only status order.
//! - Define the static stage → required-document table.
//!
//! # Invariants
//! - `DocumentStatus` order is `Pending < HaveIt < Scanned < Verified`.
//! - Requirement lists are ordered and free of duplicates.
//! - Unknown stage ids resolve to an empty requirement list.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Stable identifier of a journey stage (e.g. `build-profile`).
pub type StageId = String;

/// Stable identifier of a document in the applicant's catalog.
pub type DocumentId = String;

/// Readiness state of one document.
///
/// Variant order is significant: derived `Ord` is the forward-only order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
    /// Self-reported by the applicant.
    HaveIt,
    /// Set by the scanning collaborator only.
    Scanned,
    /// Set by the scanning collaborator only.
    Verified,
}

impl DocumentStatus {
    /// Whether the document counts toward stage readiness.
    pub fn is_ready(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Badge text shown next to a document.
    pub fn badge_label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::HaveIt => "Have It",
            Self::Scanned => "Scanned",
            Self::Verified => "Verified",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::HaveIt => "have_it",
            Self::Scanned => "scanned",
            Self::Verified => "verified",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "pending" => Some(Self::Pending),
            "have_it" => Some(Self::HaveIt),
            "scanned" => Some(Self::Scanned),
            "verified" => Some(Self::Verified),
            _ => None,
        }
    }
}

/// One document in the applicant's catalog.
///
/// The catalog lifecycle (create/remove) belongs to the caller; core code
/// only advances `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub name: String,
    pub status: DocumentStatus,
    #[serde(default)]
    pub relevant_stages: BTreeSet<StageId>,
}

impl DocumentRecord {
    /// Creates a pending document.
    pub fn new(id: impl Into<DocumentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: DocumentStatus::Pending,
            relevant_stages: BTreeSet::new(),
        }
    }

    pub fn with_status(mut self, status: DocumentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_stages<I, S>(mut self, stages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StageId>,
    {
        self.relevant_stages = stages.into_iter().map(Into::into).collect();
        self
    }
}

const STANDARD_STAGES: &[(&str, &[&str])] = &[
    (
        "check-eligibility",
        &["language-test", "educational-credentials"],
    ),
    (
        "build-profile",
        &[
            "passport",
            "educational-credentials",
            "work-letters",
            "language-test",
        ],
    ),
    ("receive-invitation", &["proof-of-funds"]),
    (
        "submit-application",
        &[
            "passport",
            "police-certificates",
            "medical-exam",
            "proof-of-funds",
            "digital-photo",
        ],
    ),
    ("prepare-landing", &["passport", "confirmation-of-residence"]),
];

/// Static stage → ordered required-document mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageRequirements {
    stages: BTreeMap<StageId, Vec<DocumentId>>,
}

impl StageRequirements {
    /// The five-stage table used by the standard journey.
    pub fn standard() -> Self {
        Self::from_pairs(
            STANDARD_STAGES
                .iter()
                .map(|(stage, documents)| (*stage, documents.iter().copied())),
        )
    }

    /// Builds a table from `(stage, documents)` pairs.
    ///
    /// Blank ids are skipped; repeated document ids keep their first position.
    pub fn from_pairs<I, S, D, DI>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, DI)>,
        S: AsRef<str>,
        DI: IntoIterator<Item = D>,
        D: AsRef<str>,
    {
        let mut stages = BTreeMap::new();
        for (stage, documents) in pairs {
            let stage = stage.as_ref().trim();
            if stage.is_empty() {
                continue;
            }
            let entry: &mut Vec<DocumentId> = stages.entry(stage.to_string()).or_default();
            for document in documents {
                let document = document.as_ref().trim();
                if document.is_empty() || entry.iter().any(|known| known == document) {
                    continue;
                }
                entry.push(document.to_string());
            }
        }
        Self { stages }
    }

    /// Required document ids for `stage_id`; empty for unknown stages.
    pub fn documents_for(&self, stage_id: &str) -> &[DocumentId] {
        self.stages
            .get(stage_id.trim())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Known stage ids in sorted order.
    pub fn stage_ids(&self) -> impl Iterator<Item = &str> {
        self.stages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
