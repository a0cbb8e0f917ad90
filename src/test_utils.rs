//! Shared test utilities: a recording GitHub interpreter and fixture builders.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::event::{EventPayload, EventSnapshot, RunMetadata};
use crate::types::{PrNumber, PullRequestDescriptor, RepoId, RunId, Sha};

/// Mock GitHub interpreter that records every effect it is asked to run.
///
/// Responses are scripted: `GetPullRequest` returns the configured PR (or
/// fails with "not found"), `CountUnresolvedThreads` returns the configured
/// count, and mutations succeed. `failing_on` makes one effect kind fail.
#[derive(Debug, Default)]
pub struct RecordingGitHub {
    effects: Mutex<Vec<GitHubEffect>>,
    pull_request: Option<PullRequestDescriptor>,
    unresolved_threads: usize,
    fail_on: Option<&'static str>,
    wrong_responses: bool,
}

impl RecordingGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pull_request(mut self, pr: PullRequestDescriptor) -> Self {
        self.pull_request = Some(pr);
        self
    }

    pub fn with_unresolved_threads(mut self, count: usize) -> Self {
        self.unresolved_threads = count;
        self
    }

    /// Makes effects with this [`GitHubEffect::name`] fail.
    pub fn failing_on(mut self, effect_name: &'static str) -> Self {
        self.fail_on = Some(effect_name);
        self
    }

    /// Answers every effect with `StatusCreated`, whatever it was.
    pub fn with_wrong_responses(mut self) -> Self {
        self.wrong_responses = true;
        self
    }

    /// The effects issued so far, in order.
    pub fn effects(&self) -> Vec<GitHubEffect> {
        self.effects.lock().unwrap().clone()
    }

    fn respond(&self, effect: &GitHubEffect) -> Result<GitHubResponse, String> {
        if self.fail_on == Some(effect.name()) {
            return Err(format!("{} failed", effect.name()));
        }
        if self.wrong_responses {
            return Ok(GitHubResponse::StatusCreated);
        }
        match effect {
            GitHubEffect::GetPullRequest { pr } => self
                .pull_request
                .clone()
                .map(GitHubResponse::PullRequest)
                .ok_or_else(|| format!("PR {pr} not found")),
            GitHubEffect::CountUnresolvedThreads { .. } => {
                Ok(GitHubResponse::UnresolvedThreads(self.unresolved_threads))
            }
            GitHubEffect::CreateCommitStatus(_) => Ok(GitHubResponse::StatusCreated),
            GitHubEffect::AddLabel { .. } => Ok(GitHubResponse::LabelAdded),
            GitHubEffect::RemoveLabel { .. } => Ok(GitHubResponse::LabelRemoved),
            GitHubEffect::DeleteComment { .. } => Ok(GitHubResponse::CommentDeleted),
        }
    }
}

impl GitHubInterpreter for RecordingGitHub {
    type Error = String;

    fn interpret(
        &self,
        effect: GitHubEffect,
    ) -> impl Future<Output = Result<GitHubResponse, Self::Error>> + Send {
        let result = self.respond(&effect);
        self.effects.lock().unwrap().push(effect);
        async move { result }
    }
}

/// A SHA made of one repeated hex digit.
pub fn sha(digit: char) -> Sha {
    Sha::parse(digit.to_string().repeat(40)).unwrap()
}

pub fn pull_request(number: u64, labels: &[&str]) -> PullRequestDescriptor {
    PullRequestDescriptor::new(PrNumber(number), sha('a'), labels.iter().copied())
}

pub fn inputs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn run_metadata() -> RunMetadata {
    RunMetadata {
        run_id: RunId(777),
        workflow_name: "Unresolved threads".to_string(),
        job_name: "check".to_string(),
        repo: RepoId::new("octo", "widgets"),
    }
}

pub fn snapshot(event_name: &str, payload: serde_json::Value) -> EventSnapshot {
    EventSnapshot {
        event_name: event_name.to_string(),
        payload: serde_json::from_value::<EventPayload>(payload).unwrap(),
        run: run_metadata(),
    }
}

/// A `pull_request` event with the given action, PR labels and changed label.
pub fn label_event(action: &str, labels: &[&str], changed: &str) -> EventSnapshot {
    let labels: Vec<_> = labels
        .iter()
        .map(|name| serde_json::json!({ "name": name }))
        .collect();
    snapshot(
        "pull_request",
        serde_json::json!({
            "action": action,
            "label": { "name": changed },
            "pull_request": {
                "number": 42,
                "head": { "sha": "a".repeat(40), "ref": "feature" },
                "labels": labels,
            },
        }),
    )
}

/// An `issue_comment.created` event; `on_pr` controls the PR marker.
pub fn comment_event(body: &str, on_pr: bool) -> EventSnapshot {
    let issue = if on_pr {
        serde_json::json!({ "number": 42, "pull_request": { "url": "https://api.github.com/pulls/42" } })
    } else {
        serde_json::json!({ "number": 42 })
    };
    snapshot(
        "issue_comment",
        serde_json::json!({
            "action": "created",
            "comment": { "id": 9001, "body": body },
            "issue": issue,
        }),
    )
}
