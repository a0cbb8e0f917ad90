//! Normalized pull request data.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ids::{PrNumber, Sha};

/// The slice of a pull request this action cares about.
///
/// Built either straight from a `pull_request` webhook section or from the
/// pulls API response for comment events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestDescriptor {
    /// The PR number.
    pub number: PrNumber,

    /// The head commit at event time. Commit statuses are attached here.
    pub head_ref: Sha,

    /// Names of the labels currently on the PR.
    pub labels: BTreeSet<String>,
}

impl PullRequestDescriptor {
    pub fn new(
        number: PrNumber,
        head_ref: Sha,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        PullRequestDescriptor {
            number,
            head_ref,
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the PR carries a label with exactly this name.
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.contains(name)
    }
}
