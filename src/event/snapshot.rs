//! The inbound event as seen by one workflow run.
//!
//! GitHub Actions exposes the triggering event through environment variables
//! and a JSON file on disk. [`EventSnapshot::from_vars`] reads them through a
//! lookup closure so that nothing below the binary touches the process
//! environment directly.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::types::{RepoId, RunId};

use super::payload::EventPayload;

const VAR_EVENT_NAME: &str = "GITHUB_EVENT_NAME";
const VAR_EVENT_PATH: &str = "GITHUB_EVENT_PATH";
const VAR_RUN_ID: &str = "GITHUB_RUN_ID";
const VAR_WORKFLOW: &str = "GITHUB_WORKFLOW";
const VAR_JOB: &str = "GITHUB_JOB";
const VAR_REPOSITORY: &str = "GITHUB_REPOSITORY";

/// Errors reading the runner environment.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidVar { name: &'static str, value: String },

    #[error("failed to read event payload {}: {source}", .path.display())]
    ReadPayload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("event payload {} is not valid JSON: {source}", .path.display())]
    ParsePayload {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Identifies the workflow run that is evaluating the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunMetadata {
    pub run_id: RunId,
    pub workflow_name: String,
    pub job_name: String,
    pub repo: RepoId,
}

/// A raw event plus the run it was delivered to.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSnapshot {
    /// The webhook event name, e.g. `pull_request`.
    pub event_name: String,
    pub payload: EventPayload,
    pub run: RunMetadata,
}

impl EventSnapshot {
    /// Reads the snapshot from the process environment.
    pub fn from_env() -> Result<Self, SnapshotError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Reads the snapshot through `var`, which maps a variable name to its value.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, SnapshotError> {
        let required = |name: &'static str| {
            var(name)
                .filter(|v| !v.is_empty())
                .ok_or(SnapshotError::MissingVar(name))
        };

        let event_name = required(VAR_EVENT_NAME)?;

        let path = PathBuf::from(required(VAR_EVENT_PATH)?);
        let bytes = fs::read(&path).map_err(|source| SnapshotError::ReadPayload {
            path: path.clone(),
            source,
        })?;
        let payload = EventPayload::from_slice(&bytes)
            .map_err(|source| SnapshotError::ParsePayload { path, source })?;

        let run_id = required(VAR_RUN_ID)?;
        let run_id = run_id
            .parse()
            .map(RunId)
            .map_err(|_| SnapshotError::InvalidVar {
                name: VAR_RUN_ID,
                value: run_id.clone(),
            })?;

        let repository = required(VAR_REPOSITORY)?;
        let repo = RepoId::parse(&repository).ok_or(SnapshotError::InvalidVar {
            name: VAR_REPOSITORY,
            value: repository.clone(),
        })?;

        Ok(EventSnapshot {
            event_name,
            payload,
            run: RunMetadata {
                run_id,
                // Workflow and job names are informational; tolerate their absence.
                workflow_name: var(VAR_WORKFLOW).unwrap_or_default(),
                job_name: var(VAR_JOB).unwrap_or_default(),
                repo,
            },
        })
    }
}
