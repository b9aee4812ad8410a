//! Journey milestone model.
//!
//! Milestones are assembled by the caller; core code only validates and
//! reads them (see `service::journey_service`).

use serde::{Deserialize, Serialize};

/// Position of a milestone on the journey timeline.
///
/// Variant order is the required list order: completed, current, upcoming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Completed,
    Current,
    Upcoming,
}

impl MilestoneStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Current => "current",
            Self::Upcoming => "upcoming",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "completed" => Some(Self::Completed),
            "current" => Some(Self::Current),
            "upcoming" => Some(Self::Upcoming),
            _ => None,
        }
    }
}

/// One timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display date as supplied by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub status: MilestoneStatus,
}

impl Milestone {
    pub fn new(id: impl Into<String>, label: impl Into<String>, status: MilestoneStatus) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            date: None,
            status,
        }
    }
}
