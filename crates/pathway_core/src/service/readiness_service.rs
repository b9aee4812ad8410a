//! Document readiness use-case service.
//!
//! # Responsibility
//! - Resolve required documents per stage from the static table.
//! - Derive per-stage readiness counts and percentage.
//! - Apply forward-only document status transitions.
//!
//! # Invariants
//! - Unknown stage ids and unknown document ids are normal, non-error states.
//! - No call moves a document backward along
//!   `Pending < HaveIt < Scanned < Verified`.
//! - Percentage is computed only when `total > 0`.

use crate::model::document::{DocumentId, DocumentRecord, DocumentStatus, StageRequirements};
use log::debug;

/// Readiness projection for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageProgress {
    pub ready: usize,
    pub total: usize,
    /// Rounded integer percent in `0..=100`.
    pub percentage: u8,
}

impl StageProgress {
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.ready == self.total
    }
}

/// Result of one status transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// Status moved forward.
    Transitioned {
        from: DocumentStatus,
        to: DocumentStatus,
    },
    /// Document already at or beyond the requested status.
    Unchanged(DocumentStatus),
    /// No document with the requested id.
    NotFound,
}

impl StatusChange {
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

/// Stateless tracker over a borrowed requirement table.
#[derive(Debug, Clone, Copy)]
pub struct ReadinessTracker<'a> {
    requirements: &'a StageRequirements,
}

impl<'a> ReadinessTracker<'a> {
    pub fn new(requirements: &'a StageRequirements) -> Self {
        Self { requirements }
    }

    /// Ordered required document ids; empty for unknown stages.
    pub fn required_documents(&self, stage_id: &str) -> &'a [DocumentId] {
        self.requirements.documents_for(stage_id)
    }

    /// Counts ready documents among those required by `stage_id`.
    pub fn progress(&self, stage_id: &str, documents: &[DocumentRecord]) -> StageProgress {
        let required = self.required_documents(stage_id);
        let mut ready = 0usize;
        let mut total = 0usize;
        for document in documents
            .iter()
            .filter(|document| required.contains(&document.id))
        {
            total += 1;
            if document.status.is_ready() {
                ready += 1;
            }
        }

        if total == 0 {
            return StageProgress::default();
        }

        StageProgress {
            ready,
            total,
            percentage: rounded_percentage(ready, total),
        }
    }

    /// Documents required by `stage_id`, in catalog order.
    pub fn stage_documents<'d>(
        &self,
        stage_id: &str,
        documents: &'d [DocumentRecord],
    ) -> Vec<&'d DocumentRecord> {
        let required = self.required_documents(stage_id);
        documents
            .iter()
            .filter(|document| required.contains(&document.id))
            .collect()
    }

    /// Self-report: `Pending -> HaveIt`; anything else is a no-op.
    pub fn mark_as_have_it(&self, doc_id: &str, documents: &mut [DocumentRecord]) -> StatusChange {
        advance_status(doc_id, DocumentStatus::HaveIt, documents)
    }

    /// Moves a document forward to `status`; never regresses.
    pub fn advance_status(
        &self,
        doc_id: &str,
        status: DocumentStatus,
        documents: &mut [DocumentRecord],
    ) -> StatusChange {
        advance_status(doc_id, status, documents)
    }
}

/// Forward-only status transition over a caller-owned catalog.
pub fn advance_status(
    doc_id: &str,
    status: DocumentStatus,
    documents: &mut [DocumentRecord],
) -> StatusChange {
    let Some(document) = documents.iter_mut().find(|document| document.id == doc_id) else {
        debug!("event=document_status module=readiness status=skipped reason=not_found");
        return StatusChange::NotFound;
    };

    let from = document.status;
    if status <= from {
        return StatusChange::Unchanged(from);
    }

    document.status = status;
    debug!(
        "event=document_status module=readiness status=ok from={} to={}",
        from.as_str(),
        status.as_str()
    );
    StatusChange::Transitioned { from, to: status }
}

fn rounded_percentage(ready: usize, total: usize) -> u8 {
    let rounded = (ready * 200 + total) / (total * 2);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::{rounded_percentage, ReadinessTracker, StatusChange};
    use crate::model::document::{DocumentRecord, DocumentStatus, StageRequirements};

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(rounded_percentage(1, 3), 33);
        assert_eq!(rounded_percentage(2, 3), 67);
        assert_eq!(rounded_percentage(1, 8), 13);
        assert_eq!(rounded_percentage(4, 4), 100);
    }

    #[test]
    fn have_it_does_not_regress_scanned_document() {
        let table = StageRequirements::standard();
        let tracker = ReadinessTracker::new(&table);
        let mut documents =
            vec![DocumentRecord::new("passport", "Passport").with_status(DocumentStatus::Scanned)];

        let change = tracker.mark_as_have_it("passport", &mut documents);
        assert_eq!(change, StatusChange::Unchanged(DocumentStatus::Scanned));
        assert_eq!(documents[0].status, DocumentStatus::Scanned);
    }

    #[test]
    fn stage_documents_keeps_catalog_order() {
        let table = StageRequirements::standard();
        let tracker = ReadinessTracker::new(&table);
        let documents = vec![
            DocumentRecord::new("language-test", "Language Test"),
            DocumentRecord::new("medical-exam", "Medical Exam"),
            DocumentRecord::new("passport", "Passport"),
        ];

        let ids = tracker
            .stage_documents("build-profile", &documents)
            .into_iter()
            .map(|document| document.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["language-test", "passport"]);
    }
}
