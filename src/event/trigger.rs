//! Trigger categories.

use serde::{Deserialize, Serialize};

use super::kind::EventKind;

/// Which trigger family an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCategory {
    /// A comment that may carry the resolved-comment trigger phrase.
    Comment,
    /// A label added to or removed from a PR.
    Label,
    /// Any other recognized PR activity. Always evaluated.
    Other,
}

impl TriggerCategory {
    /// Returns the category of an event kind. Total; cannot fail.
    pub fn of(kind: EventKind) -> Self {
        match kind {
            EventKind::IssueCommentCreated => TriggerCategory::Comment,
            EventKind::PullRequestLabeled | EventKind::PullRequestUnlabeled => {
                TriggerCategory::Label
            }
            _ => TriggerCategory::Other,
        }
    }
}

impl From<EventKind> for TriggerCategory {
    fn from(kind: EventKind) -> Self {
        TriggerCategory::of(kind)
    }
}
