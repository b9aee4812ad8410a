//! Dashboard application context.
//!
//! # Responsibility
//! - Construct the activity log, premium flag, and stage table once at
//!   startup from a single store handle.
//! - Offer use-cases that combine a state change with its activity record.
//!
//! # Invariants
//! - There is no process-global dashboard state; callers own the context and
//!   pass it by reference.
//! - A document transition is recorded in the log only when status moved.

use crate::model::activity::{ActivityDetails, ActivityKind};
use crate::model::document::{DocumentRecord, StageRequirements};
use crate::repo::kv_repo::KeyValueStore;
use crate::service::activity_service::{AppendOutcome, EventLog};
use crate::service::entitlement_service::EntitlementFlag;
use crate::service::readiness_service::{ReadinessTracker, StageProgress, StatusChange};
use crate::service::scan_service::{DocumentScanner, ScanError, ScanOutcome, ScanService};

/// Explicit owner of all dashboard core state.
pub struct Dashboard<S: KeyValueStore + Clone> {
    activity: EventLog<S>,
    entitlement: EntitlementFlag<S>,
    requirements: StageRequirements,
}

impl<S: KeyValueStore + Clone> Dashboard<S> {
    /// Loads persisted state with the standard stage table.
    pub fn open(store: S) -> Self {
        Self::with_requirements(store, StageRequirements::standard())
    }

    pub fn with_requirements(store: S, requirements: StageRequirements) -> Self {
        Self {
            activity: EventLog::load(store.clone()),
            entitlement: EntitlementFlag::load(store),
            requirements,
        }
    }

    pub fn activity(&self) -> &EventLog<S> {
        &self.activity
    }

    pub fn activity_mut(&mut self) -> &mut EventLog<S> {
        &mut self.activity
    }

    pub fn entitlement(&self) -> &EntitlementFlag<S> {
        &self.entitlement
    }

    pub fn entitlement_mut(&mut self) -> &mut EntitlementFlag<S> {
        &mut self.entitlement
    }

    pub fn requirements(&self) -> &StageRequirements {
        &self.requirements
    }

    pub fn readiness(&self) -> ReadinessTracker<'_> {
        ReadinessTracker::new(&self.requirements)
    }

    pub fn stage_progress(&self, stage_id: &str, documents: &[DocumentRecord]) -> StageProgress {
        self.readiness().progress(stage_id, documents)
    }

    /// Self-reports a document and records `DocumentMarkedReady` on change.
    pub fn mark_document_ready(
        &mut self,
        doc_id: &str,
        documents: &mut [DocumentRecord],
    ) -> StatusChange {
        let change = ReadinessTracker::new(&self.requirements).mark_as_have_it(doc_id, documents);
        if change.is_transition() {
            if let Some(document) = documents.iter().find(|document| document.id == doc_id) {
                self.activity.append(
                    ActivityKind::DocumentMarkedReady,
                    ActivityDetails::document(document.name.clone()),
                );
            }
        }
        change
    }

    /// Runs `scanner` against one document and records the result.
    pub fn scan_document<C: DocumentScanner>(
        &mut self,
        scanner: C,
        doc_id: &str,
        documents: &mut [DocumentRecord],
    ) -> Result<ScanOutcome, ScanError> {
        ScanService::new(scanner).complete_scan(doc_id, documents, &mut self.activity)
    }

    /// Records a score calculation. First scores are `ScoreAssessed`.
    pub fn record_score(&mut self, previous: Option<i64>, new_value: i64) -> AppendOutcome {
        let kind = if previous.is_some() {
            ActivityKind::ScoreModified
        } else {
            ActivityKind::ScoreAssessed
        };
        self.activity
            .append(kind, ActivityDetails::score(previous, new_value))
    }

    pub fn toggle_checklist_item(
        &mut self,
        item_name: impl Into<String>,
        checked: bool,
    ) -> AppendOutcome {
        self.activity.append(
            ActivityKind::ChecklistToggled,
            ActivityDetails::checklist(item_name, checked),
        )
    }

    /// Records a profile edit; rapid edits coalesce into one entry.
    pub fn update_profile(
        &mut self,
        section_name: Option<String>,
        field_name: Option<String>,
    ) -> AppendOutcome {
        self.activity.append(
            ActivityKind::ProfileUpdated,
            ActivityDetails::profile(section_name, field_name),
        )
    }
}
