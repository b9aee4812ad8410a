//! Journey timeline validation.
//!
//! # Responsibility
//! - Validate caller-assembled milestone lists before presentation reads them.
//! - Expose the current milestone and interaction gating.
//!
//! # Invariants
//! - Statuses are non-decreasing in list order
//!   (`Completed < Current < Upcoming`).
//! - At most one milestone is `Current`.
//! - Milestone ids are non-blank and unique.

use crate::model::milestone::{Milestone, MilestoneStatus};
use log::warn;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Contract violation in a caller-assembled milestone list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JourneyError {
    /// More than one milestone is marked current.
    MultipleCurrent { first: usize, second: usize },
    /// A milestone's status precedes the status before it.
    OutOfOrder {
        index: usize,
        status: MilestoneStatus,
        after: MilestoneStatus,
    },
    /// Two milestones share an id.
    DuplicateId(String),
    /// Milestone id is blank after trim.
    BlankId(usize),
}

impl Display for JourneyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MultipleCurrent { first, second } => write!(
                f,
                "milestones {first} and {second} are both marked current"
            ),
            Self::OutOfOrder {
                index,
                status,
                after,
            } => write!(
                f,
                "milestone {index} is `{}` after a `{}` milestone",
                status.as_str(),
                after.as_str()
            ),
            Self::DuplicateId(id) => write!(f, "duplicate milestone id: `{id}`"),
            Self::BlankId(index) => write!(f, "milestone {index} has a blank id"),
        }
    }
}

impl Error for JourneyError {}

/// Milestone list that satisfies the timeline invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyTimeline {
    milestones: Vec<Milestone>,
    current_index: Option<usize>,
}

impl JourneyTimeline {
    /// Validates `milestones` in list order.
    ///
    /// # Errors
    /// - `BlankId` / `DuplicateId` for identity problems.
    /// - `MultipleCurrent` when a second `Current` appears.
    /// - `OutOfOrder` when a status precedes the one before it.
    pub fn validate(milestones: Vec<Milestone>) -> Result<Self, JourneyError> {
        check_sequence(&milestones).inspect_err(|err| {
            warn!("event=journey_validate module=journey status=error error={err}");
        })?;

        let current_index = milestones
            .iter()
            .position(|milestone| milestone.status == MilestoneStatus::Current);
        Ok(Self {
            milestones,
            current_index,
        })
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current(&self) -> Option<&Milestone> {
        self.current_index.map(|index| &self.milestones[index])
    }

    /// Whether the milestone at `index` accepts interaction.
    ///
    /// Upcoming milestones and out-of-range indexes are not clickable.
    pub fn is_clickable(&self, index: usize) -> bool {
        self.milestones
            .get(index)
            .is_some_and(|milestone| milestone.status != MilestoneStatus::Upcoming)
    }

    pub fn completed_count(&self) -> usize {
        self.milestones
            .iter()
            .take_while(|milestone| milestone.status == MilestoneStatus::Completed)
            .count()
    }

    pub fn into_milestones(self) -> Vec<Milestone> {
        self.milestones
    }
}

fn check_sequence(milestones: &[Milestone]) -> Result<(), JourneyError> {
    let mut seen_ids = HashSet::new();
    let mut current_at: Option<usize> = None;
    let mut previous = MilestoneStatus::Completed;

    for (index, milestone) in milestones.iter().enumerate() {
        let id = milestone.id.trim();
        if id.is_empty() {
            return Err(JourneyError::BlankId(index));
        }
        if !seen_ids.insert(id) {
            return Err(JourneyError::DuplicateId(id.to_string()));
        }

        if milestone.status == MilestoneStatus::Current {
            if let Some(first) = current_at {
                return Err(JourneyError::MultipleCurrent {
                    first,
                    second: index,
                });
            }
            current_at = Some(index);
        }

        if milestone.status < previous {
            return Err(JourneyError::OutOfOrder {
                index,
                status: milestone.status,
                after: previous,
            });
        }
        previous = milestone.status;
    }

    Ok(())
}
