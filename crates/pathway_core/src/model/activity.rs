//! Activity log domain model.
//!
//! # Responsibility
//! - Define the closed set of activity kinds and their display config.
//! - Define the event record persisted by the activity log.
//! - Derive one-line descriptions and timestamp text for feed rendering.
//!
//! # Invariants
//! - Every `ActivityKind` maps to exactly one `ActivityConfig`; the mapping is
//!   an exhaustive `match`, so adding a kind fails to compile until configured.
//! - `ActivityEvent::id` is never reused within one log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one activity entry.
pub type ActivityEventId = Uuid;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const RELATIVE_TEXT_MAX_DAYS: i64 = 7;

/// Category of user action recorded by the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// First eligibility score calculation.
    ScoreAssessed,
    /// Score recalculated after an input changed.
    ScoreModified,
    /// Checklist item checked or unchecked.
    ChecklistToggled,
    /// User self-reported a document as ready.
    DocumentMarkedReady,
    /// Document confirmed by the scanning collaborator.
    DocumentVerified,
    /// Profile section edited. Subject to throttle-merge.
    ProfileUpdated,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 6] = [
        ActivityKind::ScoreAssessed,
        ActivityKind::ScoreModified,
        ActivityKind::ChecklistToggled,
        ActivityKind::DocumentMarkedReady,
        ActivityKind::DocumentVerified,
        ActivityKind::ProfileUpdated,
    ];

    /// Returns the display configuration for this kind.
    pub fn config(self) -> ActivityConfig {
        match self {
            Self::ScoreAssessed => ActivityConfig {
                label: "Score Assessed",
                icon: "calculator",
                color: "blue",
            },
            Self::ScoreModified => ActivityConfig {
                label: "Score Updated",
                icon: "trending-up",
                color: "purple",
            },
            Self::ChecklistToggled => ActivityConfig {
                label: "Checklist Updated",
                icon: "check-square",
                color: "green",
            },
            Self::DocumentMarkedReady => ActivityConfig {
                label: "Document Ready",
                icon: "file-check",
                color: "amber",
            },
            Self::DocumentVerified => ActivityConfig {
                label: "Document Verified",
                icon: "shield-check",
                color: "emerald",
            },
            Self::ProfileUpdated => ActivityConfig {
                label: "Profile Updated",
                icon: "user",
                color: "slate",
            },
        }
    }

    /// Stable wire name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ScoreAssessed => "score_assessed",
            Self::ScoreModified => "score_modified",
            Self::ChecklistToggled => "checklist_toggled",
            Self::DocumentMarkedReady => "document_marked_ready",
            Self::DocumentVerified => "document_verified",
            Self::ProfileUpdated => "profile_updated",
        }
    }

    /// Parses a wire name. Accepts `-` as a separator too.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
    }

    /// Whether repeated entries of this kind coalesce within the merge window.
    pub fn is_throttled(self) -> bool {
        matches!(self, Self::ProfileUpdated)
    }
}

/// Static display attributes for one activity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityConfig {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// Sparse, kind-dependent payload of one activity entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
}

impl ActivityDetails {
    pub fn score(previous_value: Option<i64>, new_value: i64) -> Self {
        Self {
            previous_value,
            new_value: Some(new_value),
            ..Self::default()
        }
    }

    pub fn checklist(item_name: impl Into<String>, checked: bool) -> Self {
        Self {
            item_name: Some(item_name.into()),
            checked: Some(checked),
            ..Self::default()
        }
    }

    pub fn document(document_name: impl Into<String>) -> Self {
        Self {
            document_name: Some(document_name.into()),
            ..Self::default()
        }
    }

    pub fn profile(section_name: Option<String>, field_name: Option<String>) -> Self {
        Self {
            section_name,
            field_name,
            ..Self::default()
        }
    }

    /// Shallow merge: every populated field of `newer` overwrites `self`.
    pub fn merge_from(&mut self, newer: ActivityDetails) {
        let ActivityDetails {
            previous_value,
            new_value,
            item_name,
            checked,
            document_name,
            section_name,
            field_name,
        } = newer;

        self.previous_value = previous_value.or(self.previous_value);
        self.new_value = new_value.or(self.new_value);
        self.item_name = item_name.or(self.item_name.take());
        self.checked = checked.or(self.checked);
        self.document_name = document_name.or(self.document_name.take());
        self.section_name = section_name.or(self.section_name.take());
        self.field_name = field_name.or(self.field_name.take());
    }
}

/// One recorded user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub id: ActivityEventId,
    pub kind: ActivityKind,
    /// Unix epoch milliseconds of the action (or of the latest merge).
    pub timestamp: i64,
    #[serde(default)]
    pub details: ActivityDetails,
}

impl ActivityEvent {
    pub fn new(kind: ActivityKind, details: ActivityDetails, timestamp: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            timestamp,
            details,
        }
    }
}

/// Derives a one-line human description from kind and details.
pub fn describe(event: &ActivityEvent) -> String {
    let details = &event.details;
    match event.kind {
        ActivityKind::ScoreAssessed => match details.new_value {
            Some(value) => format!("Score: {value} points"),
            None => "Score assessed".to_string(),
        },
        ActivityKind::ScoreModified => match (details.previous_value, details.new_value) {
            (Some(previous), Some(new)) => format!("{previous} → {new} points"),
            (None, Some(new)) => format!("Updated to {new} points"),
            _ => "Score updated".to_string(),
        },
        ActivityKind::ChecklistToggled => match (non_blank(&details.item_name), details.checked) {
            (Some(item), Some(true)) => format!("Completed: {item}"),
            (Some(item), Some(false)) => format!("Unchecked: {item}"),
            (Some(item), None) => item.to_string(),
            (None, _) => "Checklist item updated".to_string(),
        },
        ActivityKind::DocumentMarkedReady => non_blank(&details.document_name)
            .map(str::to_string)
            .unwrap_or_else(|| "Document marked as ready".to_string()),
        ActivityKind::DocumentVerified => non_blank(&details.document_name)
            .map(str::to_string)
            .unwrap_or_else(|| "Document verified".to_string()),
        ActivityKind::ProfileUpdated => {
            match (
                non_blank(&details.section_name),
                non_blank(&details.field_name),
            ) {
                (Some(section), Some(field)) => format!("{section}: {field}"),
                (Some(section), None) => section.to_string(),
                (None, Some(field)) => field.to_string(),
                (None, None) => "Profile information updated".to_string(),
            }
        }
    }
}

/// Renders a timestamp relative to `now_ms`, or as an absolute UTC date once
/// it is a week old.
pub fn format_timestamp(timestamp_ms: i64, now_ms: i64) -> String {
    let elapsed = now_ms.saturating_sub(timestamp_ms).max(0);

    if elapsed < MINUTE_MS {
        return "Just now".to_string();
    }
    if elapsed < HOUR_MS {
        return plural(elapsed / MINUTE_MS, "minute");
    }
    if elapsed < DAY_MS {
        return plural(elapsed / HOUR_MS, "hour");
    }
    let days = elapsed / DAY_MS;
    if days == 1 {
        return "Yesterday".to_string();
    }
    if days < RELATIVE_TEXT_MAX_DAYS {
        return format!("{days} days ago");
    }

    match DateTime::<Utc>::from_timestamp_millis(timestamp_ms) {
        Some(at) => at.format("%b %-d, %Y").to_string(),
        None => format!("{days} days ago"),
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
