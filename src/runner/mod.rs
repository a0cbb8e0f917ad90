//! End-to-end evaluation of a built [`ActionContext`].
//!
//! Once the context says an event should be processed, the runner counts the
//! pull request's unresolved review threads, publishes the commit status, keeps
//! the unresolved label in sync with the result, and cleans up the triggering
//! comment when configured to.

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::context::{ActionContext, ContextError, EventSubject, PullRequestContext};
use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::error::ActionError;
use crate::status::{report_failure, report_success};

/// Why a run stopped without checking threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The context decided the event should not be processed.
    NotTriggered,
    /// A label other than the unresolved label was added or removed.
    UnrelatedLabel,
}

/// Result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Skipped { reason: SkipReason },
    Resolved,
    Unresolved { count: usize },
}

/// Evaluates `ctx` against GitHub.
///
/// Makes no API call when the run is skipped.
#[instrument(skip_all, fields(kind = ?ctx.event_kind(), run_id = %ctx.run_id()))]
pub async fn run<G: GitHubInterpreter>(
    github: &G,
    ctx: &ActionContext,
) -> Result<Outcome, ActionError<G::Error>> {
    if !ctx.should_process_event() {
        info!("Event does not qualify for processing; skipping");
        return Ok(Outcome::Skipped {
            reason: SkipReason::NotTriggered,
        });
    }

    if let Some(label) = unrelated_label(ctx) {
        info!(
            label = %label,
            unresolved_label = %ctx.config().unresolved_label,
            "Changed label is not the unresolved label; skipping"
        );
        return Ok(Outcome::Skipped {
            reason: SkipReason::UnrelatedLabel,
        });
    }

    let pr_ctx = ctx
        .pull_request_context()
        .ok_or(ContextError::NoAssociatedPullRequest)?;

    let count = count_unresolved_threads(github, pr_ctx).await?;
    info!(pr = %pr_ctx.pull_request().number, count, "Counted unresolved threads");

    if count > 0 {
        report_failure(github, pr_ctx, count).await?;
    } else {
        report_success(github, pr_ctx).await?;
    }
    sync_label(github, pr_ctx, count).await?;

    if let EventSubject::Comment(comment) = ctx.subject() {
        if ctx.config().delete_resolved_comment_trigger {
            info!(comment_id = %comment.comment_id, "Deleting trigger comment");
            expect_response(
                github,
                GitHubEffect::DeleteComment {
                    comment_id: comment.comment_id,
                },
                |r| matches!(r, GitHubResponse::CommentDeleted),
            )
            .await?;
        }
    }

    Ok(if count > 0 {
        Outcome::Unresolved { count }
    } else {
        Outcome::Resolved
    })
}

/// The changed label, when this is a label event for some other label.
fn unrelated_label(ctx: &ActionContext) -> Option<&str> {
    if !ctx.is_label_triggered() {
        return None;
    }
    let EventSubject::PullRequest(subject) = ctx.subject() else {
        return None;
    };
    let label = subject.label.as_deref().unwrap_or_default();
    (label != ctx.config().unresolved_label).then_some(label)
}

async fn count_unresolved_threads<G: GitHubInterpreter>(
    github: &G,
    ctx: PullRequestContext<'_>,
) -> Result<usize, ActionError<G::Error>> {
    let effect = GitHubEffect::CountUnresolvedThreads {
        pr: ctx.pull_request().number,
    };
    let name = effect.name();
    match github.interpret(effect).await.map_err(ActionError::GitHub)? {
        GitHubResponse::UnresolvedThreads(count) => Ok(count),
        other => Err(ActionError::UnexpectedResponse {
            effect: name,
            response: format!("{other:?}"),
        }),
    }
}

/// Adds the unresolved label while threads are open and removes it once
/// they are all resolved. Does nothing when label triggering is off.
async fn sync_label<G: GitHubInterpreter>(
    github: &G,
    ctx: PullRequestContext<'_>,
    count: usize,
) -> Result<(), ActionError<G::Error>> {
    let config = ctx.context().config();
    if !config.use_label_trigger {
        return Ok(());
    }

    let pr = ctx.pull_request();
    let label = config.unresolved_label.clone();
    let has_label = pr.has_label(&label);

    if count > 0 && !has_label {
        info!(pr = %pr.number, label = %label, "Adding unresolved label");
        expect_response(
            github,
            GitHubEffect::AddLabel { pr: pr.number, label },
            |r| matches!(r, GitHubResponse::LabelAdded),
        )
        .await
    } else if count == 0 && has_label {
        info!(pr = %pr.number, label = %label, "Removing unresolved label");
        expect_response(
            github,
            GitHubEffect::RemoveLabel { pr: pr.number, label },
            |r| matches!(r, GitHubResponse::LabelRemoved),
        )
        .await
    } else {
        debug!(pr = %pr.number, has_label, count, "Label already in sync");
        Ok(())
    }
}

async fn expect_response<G: GitHubInterpreter>(
    github: &G,
    effect: GitHubEffect,
    expected: impl Fn(&GitHubResponse) -> bool,
) -> Result<(), ActionError<G::Error>> {
    let name = effect.name();
    let response = github.interpret(effect).await.map_err(ActionError::GitHub)?;
    if expected(&response) {
        Ok(())
    } else {
        Err(ActionError::UnexpectedResponse {
            effect: name,
            response: format!("{response:?}"),
        })
    }
}
