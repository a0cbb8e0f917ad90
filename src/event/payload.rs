//! Raw webhook payload shape.
//!
//! The runner hands us the full webhook JSON. Which sections are present depends
//! on the event: `pull_request` for PR, review and thread events; `issue` and
//! `comment` for issue comments; `label` for labeled/unlabeled. Every section is
//! optional here and required-ness is enforced where the section is consumed.
//! Unknown fields are ignored.

use serde::Deserialize;

/// The subset of a webhook payload this action reads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventPayload {
    pub action: Option<String>,
    pub pull_request: Option<RawPullRequest>,
    pub issue: Option<RawIssue>,
    pub comment: Option<RawComment>,
    /// The label that was added or removed (labeled/unlabeled only).
    pub label: Option<RawLabel>,
}

impl EventPayload {
    /// Parses a payload from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// The payload action, or `""` when the event has none.
    pub fn action(&self) -> &str {
        self.action.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPullRequest {
    pub number: u64,
    pub head: RawHead,
    #[serde(default)]
    pub labels: Vec<RawLabel>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawHead {
    pub sha: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawLabel {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawIssue {
    pub number: u64,
    // Present (and non-null) only when the issue is actually a PR.
    pub pull_request: Option<serde_json::Value>,
}

impl RawIssue {
    /// Returns true if GitHub marked this issue as a pull request.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawComment {
    pub id: u64,
    pub body: Option<String>,
}
