//! Publishing statuses through a [`GitHubInterpreter`].

use tracing::info;

use crate::context::PullRequestContext;
use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::error::ActionError;

use super::format::{failure_status, success_status};

/// Marks the head commit as having no unresolved threads.
pub async fn report_success<G: GitHubInterpreter>(
    github: &G,
    ctx: PullRequestContext<'_>,
) -> Result<(), ActionError<G::Error>> {
    info!(pr = %ctx.pull_request().number, "Reporting success");
    create_status(github, GitHubEffect::CreateCommitStatus(success_status(ctx))).await
}

/// Marks the head commit as failing with `unresolved` open threads.
pub async fn report_failure<G: GitHubInterpreter>(
    github: &G,
    ctx: PullRequestContext<'_>,
    unresolved: usize,
) -> Result<(), ActionError<G::Error>> {
    info!(pr = %ctx.pull_request().number, unresolved, "Reporting failure");
    create_status(
        github,
        GitHubEffect::CreateCommitStatus(failure_status(ctx, unresolved)),
    )
    .await
}

async fn create_status<G: GitHubInterpreter>(
    github: &G,
    effect: GitHubEffect,
) -> Result<(), ActionError<G::Error>> {
    let name = effect.name();
    match github.interpret(effect).await.map_err(ActionError::GitHub)? {
        GitHubResponse::StatusCreated => Ok(()),
        other => Err(ActionError::UnexpectedResponse {
            effect: name,
            response: format!("{other:?}"),
        }),
    }
}
