//! Commit status construction.

use crate::context::PullRequestContext;
use crate::effects::{CommitStatus, StatusState};
use crate::types::{RepoId, RunId};

/// The status check name shown on the pull request.
pub const STATUS_CONTEXT: &str = "Unresolved Review Threads";

pub const SUCCESS_DESCRIPTION: &str = "no unresolved threads found";

/// Appended to the thread count in the failure description.
pub const FAILURE_DESCRIPTION_SUFFIX: &str = "unresolved threads found";

/// Link to the workflow run, used as the status "Details" target.
pub fn run_url(repo: &RepoId, run_id: RunId) -> String {
    format!(
        "https://github.com/{}/{}/actions/runs/{}",
        repo.owner, repo.repo, run_id
    )
}

fn status(ctx: PullRequestContext<'_>, state: StatusState, description: String) -> CommitStatus {
    let context = ctx.context();
    CommitStatus {
        sha: ctx.pull_request().head_ref.clone(),
        state,
        context: STATUS_CONTEXT.to_string(),
        description,
        target_url: run_url(context.repo(), context.run_id()),
    }
}

/// The status reported when no review thread is left open.
pub fn success_status(ctx: PullRequestContext<'_>) -> CommitStatus {
    status(ctx, StatusState::Success, SUCCESS_DESCRIPTION.to_string())
}

/// The status reported when `unresolved` threads are still open.
pub fn failure_status(ctx: PullRequestContext<'_>, unresolved: usize) -> CommitStatus {
    status(
        ctx,
        StatusState::Failure,
        format!("{unresolved} {FAILURE_DESCRIPTION_SUFFIX}"),
    )
}
