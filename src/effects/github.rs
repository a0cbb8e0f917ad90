//! GitHub API effect types.
//!
//! These types describe GitHub API operations as data, without executing them.
//! An interpreter (see [`crate::github`]) executes them against the real API;
//! tests substitute a recording mock.

use serde::{Deserialize, Serialize};

use crate::types::{CommentId, PrNumber, PullRequestDescriptor, Sha};

/// State of a commit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusState {
    Pending,
    Success,
    Failure,
    Error,
}

impl StatusState {
    /// Returns the GitHub API string for this state.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            StatusState::Pending => "pending",
            StatusState::Success => "success",
            StatusState::Failure => "failure",
            StatusState::Error => "error",
        }
    }
}

/// A commit status to attach to a SHA.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitStatus {
    /// The commit the status is attached to.
    pub sha: Sha,
    pub state: StatusState,
    /// The status check name shown on the PR, e.g. "Unresolved Review Threads".
    pub context: String,
    pub description: String,
    /// Link shown as "Details" next to the status.
    pub target_url: String,
}

/// A GitHub API effect.
///
/// Effects are repo-scoped: the interpreter is constructed with a `RepoId`, so
/// effects don't include it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GitHubEffect {
    // ─── Queries ──────────────────────────────────────────────────────────────
    /// Fetch a single PR by number.
    GetPullRequest { pr: PrNumber },

    /// Count the PR's review threads that are not marked resolved (via GraphQL).
    CountUnresolvedThreads { pr: PrNumber },

    // ─── Mutations ────────────────────────────────────────────────────────────
    /// Create a commit status.
    CreateCommitStatus(CommitStatus),

    /// Add a label to a PR.
    AddLabel { pr: PrNumber, label: String },

    /// Remove a label from a PR. Removing a label that is not there succeeds.
    RemoveLabel { pr: PrNumber, label: String },

    /// Delete an issue comment.
    DeleteComment { comment_id: CommentId },
}

impl GitHubEffect {
    /// Short operation name, for logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            GitHubEffect::GetPullRequest { .. } => "get_pull_request",
            GitHubEffect::CountUnresolvedThreads { .. } => "count_unresolved_threads",
            GitHubEffect::CreateCommitStatus(_) => "create_commit_status",
            GitHubEffect::AddLabel { .. } => "add_label",
            GitHubEffect::RemoveLabel { .. } => "remove_label",
            GitHubEffect::DeleteComment { .. } => "delete_comment",
        }
    }
}

// ─── Response Types ───────────────────────────────────────────────────────────

/// Response from a GitHub effect.
///
/// Each variant corresponds to the response from a particular effect type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum GitHubResponse {
    /// Response to `GetPullRequest`.
    PullRequest(PullRequestDescriptor),

    /// Response to `CountUnresolvedThreads`.
    UnresolvedThreads(usize),

    /// Response to `CreateCommitStatus`.
    StatusCreated,

    /// Response to `AddLabel`.
    LabelAdded,

    /// Response to `RemoveLabel`.
    LabelRemoved,

    /// Response to `DeleteComment`.
    CommentDeleted,
}
