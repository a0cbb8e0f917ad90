//! The per-run decision record.
//!
//! [`build_context`] turns the raw event and the action inputs into an
//! [`ActionContext`]: the validated configuration, what kind of event arrived,
//! which trigger family it belongs to, the pull request it concerns, and
//! whether the run should go on to check review threads at all.
//!
//! The record is immutable once built. Its event-specific part is an
//! [`EventSubject`]: comment-triggered runs carry the comment and an optional
//! pull request, every other run carries a pull request.

pub mod builder;
pub mod error;
pub mod pull_request;

pub use builder::{build_context, should_process_event};
pub use error::{ContextError, GatedInput};
pub use pull_request::{resolve_from_comment_event, resolve_from_label_event};

use serde::Serialize;

use crate::config::Configuration;
use crate::event::{EventKind, RunMetadata, TriggerCategory};
use crate::types::{CommentId, PullRequestDescriptor, RepoId, RunId};

/// The comment that triggered a comment-category run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentSubject {
    pub comment_id: CommentId,
    pub comment_body: String,
    /// `None` when the comment was posted on a plain issue.
    pub pull_request: Option<PullRequestDescriptor>,
}

/// The pull request a label or other PR event concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestSubject {
    pub pull_request: PullRequestDescriptor,
    /// The label added or removed, for labeled/unlabeled events.
    pub label: Option<String>,
}

/// Event-specific part of the context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum EventSubject {
    Comment(CommentSubject),
    PullRequest(PullRequestSubject),
}

impl EventSubject {
    /// The resolved pull request, if any.
    pub fn pull_request(&self) -> Option<&PullRequestDescriptor> {
        match self {
            EventSubject::Comment(comment) => comment.pull_request.as_ref(),
            EventSubject::PullRequest(subject) => Some(&subject.pull_request),
        }
    }
}

/// The immutable decision record for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionContext {
    config: Configuration,
    event_kind: EventKind,
    trigger: TriggerCategory,
    run: RunMetadata,
    should_process_event: bool,
    subject: EventSubject,
}

impl ActionContext {
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn event_kind(&self) -> EventKind {
        self.event_kind
    }

    pub fn trigger(&self) -> TriggerCategory {
        self.trigger
    }

    pub fn is_label_triggered(&self) -> bool {
        self.trigger == TriggerCategory::Label
    }

    pub fn is_comment_triggered(&self) -> bool {
        self.trigger == TriggerCategory::Comment
    }

    pub fn run(&self) -> &RunMetadata {
        &self.run
    }

    pub fn run_id(&self) -> RunId {
        self.run.run_id
    }

    pub fn workflow_name(&self) -> &str {
        &self.run.workflow_name
    }

    pub fn job_name(&self) -> &str {
        &self.run.job_name
    }

    pub fn repo(&self) -> &RepoId {
        &self.run.repo
    }

    pub fn repo_owner(&self) -> &str {
        &self.run.repo.owner
    }

    pub fn repo_name(&self) -> &str {
        &self.run.repo.repo
    }

    /// Whether the caller should go on to evaluate review threads.
    pub fn should_process_event(&self) -> bool {
        self.should_process_event
    }

    pub fn subject(&self) -> &EventSubject {
        &self.subject
    }

    /// The triggering comment, for comment-category runs.
    pub fn comment(&self) -> Option<&CommentSubject> {
        match &self.subject {
            EventSubject::Comment(comment) => Some(comment),
            EventSubject::PullRequest(_) => None,
        }
    }

    pub fn pull_request(&self) -> Option<&PullRequestDescriptor> {
        self.subject.pull_request()
    }

    /// A view of this context that is guaranteed to have a pull request.
    ///
    /// Returns `None` for a comment posted on a plain issue.
    pub fn pull_request_context(&self) -> Option<PullRequestContext<'_>> {
        self.pull_request()
            .map(|pull_request| PullRequestContext {
                context: self,
                pull_request,
            })
    }
}

/// A borrowed [`ActionContext`] whose pull request is known to be resolved.
///
/// Reporting requires this view rather than the bare context.
#[derive(Debug, Clone, Copy)]
pub struct PullRequestContext<'a> {
    context: &'a ActionContext,
    pull_request: &'a PullRequestDescriptor,
}

impl<'a> PullRequestContext<'a> {
    pub fn context(&self) -> &'a ActionContext {
        self.context
    }

    pub fn pull_request(&self) -> &'a PullRequestDescriptor {
        self.pull_request
    }
}
