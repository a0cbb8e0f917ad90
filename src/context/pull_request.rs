//! Resolution of the pull request an event refers to.
//!
//! PR, review and thread events embed the pull request in the payload.
//! Issue comments only embed the issue; when the issue is a PR we fetch it,
//! which is the one network call made while building a context.

use tracing::debug;

use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::error::ActionError;
use crate::event::EventPayload;
use crate::types::{PrNumber, PullRequestDescriptor, Sha};

use super::error::ContextError;

/// Extracts the pull request embedded in a label (or other PR) event.
///
/// Fails with [`ContextError::NoAssociatedPullRequest`] when the payload has
/// no `pull_request` section.
pub fn resolve_from_label_event(
    payload: &EventPayload,
) -> Result<PullRequestDescriptor, ContextError> {
    let raw = payload
        .pull_request
        .as_ref()
        .ok_or(ContextError::NoAssociatedPullRequest)?;

    let head_ref = Sha::parse(&raw.head.sha).map_err(|_| ContextError::InvalidField {
        field: "pull_request.head.sha",
        value: raw.head.sha.clone(),
    })?;

    Ok(PullRequestDescriptor::new(
        PrNumber(raw.number),
        head_ref,
        raw.labels.iter().map(|label| label.name.as_str()),
    ))
}

/// Resolves the pull request an issue comment was posted on.
///
/// Returns `Ok(None)` without calling GitHub when the issue is not a PR, or
/// when the payload has no issue section at all.
/// Otherwise fetches the PR by the issue number; interpreter failures are
/// returned unchanged as [`ActionError::GitHub`].
pub async fn resolve_from_comment_event<G: GitHubInterpreter>(
    payload: &EventPayload,
    github: &G,
) -> Result<Option<PullRequestDescriptor>, ActionError<G::Error>> {
    let Some(issue) = payload.issue.as_ref().filter(|issue| issue.is_pull_request()) else {
        debug!("Comment is not on a pull request; no PR lookup");
        return Ok(None);
    };

    let number = PrNumber(issue.number);
    let effect = GitHubEffect::GetPullRequest { pr: number };
    let effect_name = effect.name();
    match github.interpret(effect).await.map_err(ActionError::GitHub)? {
        GitHubResponse::PullRequest(pr) => Ok(Some(PullRequestDescriptor { number, ..pr })),
        other => Err(ActionError::UnexpectedResponse {
            effect: effect_name,
            response: format!("{other:?}"),
        }),
    }
}
