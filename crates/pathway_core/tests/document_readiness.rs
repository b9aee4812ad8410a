use pathway_core::{
    DocumentRecord, DocumentStatus, ReadinessTracker, StageProgress, StageRequirements,
    StatusChange,
};

fn build_profile_catalog() -> Vec<DocumentRecord> {
    vec![
        DocumentRecord::new("passport", "Passport")
            .with_status(DocumentStatus::Verified)
            .with_stages(["build-profile", "submit-application"]),
        DocumentRecord::new("educational-credentials", "Educational Credential Assessment")
            .with_stages(["check-eligibility", "build-profile"]),
        DocumentRecord::new("work-letters", "Reference Letters").with_stages(["build-profile"]),
        DocumentRecord::new("language-test", "Language Test Results")
            .with_status(DocumentStatus::HaveIt)
            .with_stages(["check-eligibility", "build-profile"]),
        DocumentRecord::new("medical-exam", "Medical Exam").with_stages(["submit-application"]),
    ]
}

#[test]
fn build_profile_scenario_reports_half_ready() {
    let table = StageRequirements::standard();
    let tracker = ReadinessTracker::new(&table);

    let progress = tracker.progress("build-profile", &build_profile_catalog());
    assert_eq!(
        progress,
        StageProgress {
            ready: 2,
            total: 4,
            percentage: 50,
        }
    );
    assert!(!progress.is_complete());
}

#[test]
fn unknown_stage_has_no_requirements_and_zero_progress() {
    let table = StageRequirements::standard();
    let tracker = ReadinessTracker::new(&table);

    assert!(tracker.required_documents("become-citizen").is_empty());
    assert_eq!(
        tracker.progress("become-citizen", &build_profile_catalog()),
        StageProgress::default()
    );
}

#[test]
fn stage_without_matching_documents_reports_zero() {
    let table = StageRequirements::standard();
    let tracker = ReadinessTracker::new(&table);

    let progress = tracker.progress("receive-invitation", &build_profile_catalog());
    assert_eq!(progress.total, 0);
    assert_eq!(progress.percentage, 0);
}

#[test]
fn all_non_pending_documents_reach_one_hundred_percent() {
    let table = StageRequirements::standard();
    let tracker = ReadinessTracker::new(&table);
    let mut documents = build_profile_catalog();
    for document in &mut documents {
        if document.status == DocumentStatus::Pending {
            document.status = DocumentStatus::Scanned;
        }
    }

    let progress = tracker.progress("build-profile", &documents);
    assert_eq!(progress.percentage, 100);
    assert!(progress.is_complete());
}

#[test]
fn mark_as_have_it_only_moves_pending_documents() {
    let table = StageRequirements::standard();
    let tracker = ReadinessTracker::new(&table);
    let mut documents = build_profile_catalog();

    let change = tracker.mark_as_have_it("work-letters", &mut documents);
    assert_eq!(
        change,
        StatusChange::Transitioned {
            from: DocumentStatus::Pending,
            to: DocumentStatus::HaveIt,
        }
    );

    let repeat = tracker.mark_as_have_it("work-letters", &mut documents);
    assert_eq!(repeat, StatusChange::Unchanged(DocumentStatus::HaveIt));

    let verified = tracker.mark_as_have_it("passport", &mut documents);
    assert_eq!(verified, StatusChange::Unchanged(DocumentStatus::Verified));
    assert_eq!(documents[0].status, DocumentStatus::Verified);

    let missing = tracker.mark_as_have_it("birth-certificate", &mut documents);
    assert_eq!(missing, StatusChange::NotFound);
}

#[test]
fn advance_status_never_regresses() {
    let table = StageRequirements::standard();
    let tracker = ReadinessTracker::new(&table);
    let mut documents = build_profile_catalog();

    tracker.advance_status("language-test", DocumentStatus::Scanned, &mut documents);
    let change = tracker.advance_status("language-test", DocumentStatus::Pending, &mut documents);

    assert_eq!(change, StatusChange::Unchanged(DocumentStatus::Scanned));
    assert_eq!(documents[3].status, DocumentStatus::Scanned);
}

#[test]
fn custom_requirement_table_is_honored() {
    let table = StageRequirements::from_pairs([("intake", ["passport", "medical-exam"])]);
    let tracker = ReadinessTracker::new(&table);

    let progress = tracker.progress("intake", &build_profile_catalog());
    assert_eq!(progress.ready, 1);
    assert_eq!(progress.total, 2);
    assert_eq!(progress.percentage, 50);
}
