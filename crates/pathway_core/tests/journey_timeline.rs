use pathway_core::{JourneyError, JourneyTimeline, Milestone, MilestoneStatus};

fn milestone(id: &str, status: MilestoneStatus) -> Milestone {
    Milestone::new(id, id.replace('-', " "), status)
}

#[test]
fn valid_sequence_exposes_current_index_and_gating() {
    let timeline = JourneyTimeline::validate(vec![
        milestone("check-eligibility", MilestoneStatus::Completed),
        milestone("build-profile", MilestoneStatus::Completed),
        milestone("receive-invitation", MilestoneStatus::Current),
        milestone("submit-application", MilestoneStatus::Upcoming),
        milestone("prepare-landing", MilestoneStatus::Upcoming),
    ])
    .unwrap();

    assert_eq!(timeline.current_index(), Some(2));
    assert_eq!(timeline.completed_count(), 2);
    assert!(timeline.is_clickable(0));
    assert!(timeline.is_clickable(2));
    assert!(!timeline.is_clickable(3));
    assert!(!timeline.is_clickable(99));
    assert_eq!(
        timeline.current().map(|current| current.id.as_str()),
        Some("receive-invitation")
    );
}

#[test]
fn sequence_without_current_is_valid() {
    let timeline = JourneyTimeline::validate(vec![
        milestone("a", MilestoneStatus::Completed),
        milestone("b", MilestoneStatus::Upcoming),
    ])
    .unwrap();
    assert_eq!(timeline.current_index(), None);

    let empty = JourneyTimeline::validate(Vec::new()).unwrap();
    assert!(empty.milestones().is_empty());
}

#[test]
fn two_current_milestones_are_rejected() {
    let err = JourneyTimeline::validate(vec![
        milestone("a", MilestoneStatus::Current),
        milestone("b", MilestoneStatus::Current),
    ])
    .unwrap_err();

    assert_eq!(err, JourneyError::MultipleCurrent { first: 0, second: 1 });
}

#[test]
fn completed_after_current_is_rejected() {
    let err = JourneyTimeline::validate(vec![
        milestone("a", MilestoneStatus::Completed),
        milestone("b", MilestoneStatus::Current),
        milestone("c", MilestoneStatus::Completed),
    ])
    .unwrap_err();

    assert_eq!(
        err,
        JourneyError::OutOfOrder {
            index: 2,
            status: MilestoneStatus::Completed,
            after: MilestoneStatus::Current,
        }
    );
    assert!(err.to_string().contains("milestone 2"));
}

#[test]
fn current_after_upcoming_is_rejected() {
    let err = JourneyTimeline::validate(vec![
        milestone("a", MilestoneStatus::Upcoming),
        milestone("b", MilestoneStatus::Current),
    ])
    .unwrap_err();

    assert!(matches!(err, JourneyError::OutOfOrder { index: 1, .. }));
}

#[test]
fn identity_problems_are_rejected() {
    let duplicate = JourneyTimeline::validate(vec![
        milestone("a", MilestoneStatus::Completed),
        milestone("a", MilestoneStatus::Current),
    ])
    .unwrap_err();
    assert_eq!(duplicate, JourneyError::DuplicateId("a".to_string()));

    let blank = JourneyTimeline::validate(vec![milestone("  ", MilestoneStatus::Upcoming)])
        .unwrap_err();
    assert_eq!(blank, JourneyError::BlankId(0));
}
