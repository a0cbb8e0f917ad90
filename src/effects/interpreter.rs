//! Effect interpreter trait.
//!
//! Implemented by [`crate::github::OctocrabClient`] for real runs and by the
//! recording mock in `test_utils` for tests.

use std::future::Future;

use super::github::{GitHubEffect, GitHubResponse};

/// Interprets GitHub effects against the GitHub API.
///
/// An interpreter is bound to one repository; effects never name it.
///
/// ```ignore
/// struct CannedGitHub(GitHubResponse);
///
/// impl GitHubInterpreter for CannedGitHub {
///     type Error = String;
///
///     async fn interpret(&self, _effect: GitHubEffect) -> Result<GitHubResponse, String> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait GitHubInterpreter {
    /// Passed through unchanged as [`crate::error::ActionError::GitHub`].
    type Error;

    /// Executes `effect` and returns the matching response variant.
    fn interpret(
        &self,
        effect: GitHubEffect,
    ) -> impl Future<Output = Result<GitHubResponse, Self::Error>> + Send;
}
