//! Classification of `(event name, action)` pairs.
//!
//! GitHub identifies a workflow trigger by the webhook event name (the
//! `GITHUB_EVENT_NAME` variable) plus the `action` field of the payload. Only
//! the pairs listed in [`EventKind::ALL`] are accepted; anything else is an
//! [`ContextError::InvalidEventKind`].

use serde::{Deserialize, Serialize};

use crate::context::ContextError;

/// A recognized workflow trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A comment was posted on an issue or on a PR conversation tab.
    IssueCommentCreated,
    /// A label was added to a PR.
    PullRequestLabeled,
    /// A label was removed from a PR.
    PullRequestUnlabeled,
    PullRequestOpened,
    PullRequestReopened,
    /// New commits were pushed to the PR head.
    PullRequestSynchronize,
    PullRequestReadyForReview,
    PullRequestReviewSubmitted,
    PullRequestReviewDismissed,
    PullRequestReviewCommentCreated,
    PullRequestReviewCommentEdited,
    PullRequestReviewCommentDeleted,
    /// A review thread was marked resolved.
    PullRequestReviewThreadResolved,
    /// A resolved review thread was reopened.
    PullRequestReviewThreadUnresolved,
}

impl EventKind {
    /// Every recognized kind, in table order.
    pub const ALL: [EventKind; 14] = [
        EventKind::IssueCommentCreated,
        EventKind::PullRequestLabeled,
        EventKind::PullRequestUnlabeled,
        EventKind::PullRequestOpened,
        EventKind::PullRequestReopened,
        EventKind::PullRequestSynchronize,
        EventKind::PullRequestReadyForReview,
        EventKind::PullRequestReviewSubmitted,
        EventKind::PullRequestReviewDismissed,
        EventKind::PullRequestReviewCommentCreated,
        EventKind::PullRequestReviewCommentEdited,
        EventKind::PullRequestReviewCommentDeleted,
        EventKind::PullRequestReviewThreadResolved,
        EventKind::PullRequestReviewThreadUnresolved,
    ];

    /// Classifies a raw `(event name, action)` pair.
    ///
    /// Matching is exact: `"Labeled"` is not `"labeled"`.
    pub fn classify(event_name: &str, action: &str) -> Result<Self, ContextError> {
        let kind = match (event_name, action) {
            ("issue_comment", "created") => EventKind::IssueCommentCreated,
            ("pull_request", "labeled") => EventKind::PullRequestLabeled,
            ("pull_request", "unlabeled") => EventKind::PullRequestUnlabeled,
            ("pull_request", "opened") => EventKind::PullRequestOpened,
            ("pull_request", "reopened") => EventKind::PullRequestReopened,
            ("pull_request", "synchronize") => EventKind::PullRequestSynchronize,
            ("pull_request", "ready_for_review") => EventKind::PullRequestReadyForReview,
            ("pull_request_review", "submitted") => EventKind::PullRequestReviewSubmitted,
            ("pull_request_review", "dismissed") => EventKind::PullRequestReviewDismissed,
            ("pull_request_review_comment", "created") => {
                EventKind::PullRequestReviewCommentCreated
            }
            ("pull_request_review_comment", "edited") => EventKind::PullRequestReviewCommentEdited,
            ("pull_request_review_comment", "deleted") => {
                EventKind::PullRequestReviewCommentDeleted
            }
            ("pull_request_review_thread", "resolved") => {
                EventKind::PullRequestReviewThreadResolved
            }
            ("pull_request_review_thread", "unresolved") => {
                EventKind::PullRequestReviewThreadUnresolved
            }
            _ => {
                return Err(ContextError::InvalidEventKind {
                    event_name: event_name.to_string(),
                    action: action.to_string(),
                });
            }
        };
        Ok(kind)
    }

    /// The webhook event name this kind is delivered under.
    pub fn event_name(&self) -> &'static str {
        match self {
            EventKind::IssueCommentCreated => "issue_comment",
            EventKind::PullRequestLabeled
            | EventKind::PullRequestUnlabeled
            | EventKind::PullRequestOpened
            | EventKind::PullRequestReopened
            | EventKind::PullRequestSynchronize
            | EventKind::PullRequestReadyForReview => "pull_request",
            EventKind::PullRequestReviewSubmitted | EventKind::PullRequestReviewDismissed => {
                "pull_request_review"
            }
            EventKind::PullRequestReviewCommentCreated
            | EventKind::PullRequestReviewCommentEdited
            | EventKind::PullRequestReviewCommentDeleted => "pull_request_review_comment",
            EventKind::PullRequestReviewThreadResolved
            | EventKind::PullRequestReviewThreadUnresolved => "pull_request_review_thread",
        }
    }

    /// The payload `action` this kind is delivered with.
    pub fn action(&self) -> &'static str {
        match self {
            EventKind::IssueCommentCreated | EventKind::PullRequestReviewCommentCreated => {
                "created"
            }
            EventKind::PullRequestLabeled => "labeled",
            EventKind::PullRequestUnlabeled => "unlabeled",
            EventKind::PullRequestOpened => "opened",
            EventKind::PullRequestReopened => "reopened",
            EventKind::PullRequestSynchronize => "synchronize",
            EventKind::PullRequestReadyForReview => "ready_for_review",
            EventKind::PullRequestReviewSubmitted => "submitted",
            EventKind::PullRequestReviewDismissed => "dismissed",
            EventKind::PullRequestReviewCommentEdited => "edited",
            EventKind::PullRequestReviewCommentDeleted => "deleted",
            EventKind::PullRequestReviewThreadResolved => "resolved",
            EventKind::PullRequestReviewThreadUnresolved => "unresolved",
        }
    }
}
