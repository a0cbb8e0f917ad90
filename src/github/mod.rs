//! GitHub API client and effect interpreter.
//!
//! [`OctocrabClient`] wraps an octocrab instance scoped to one repository and
//! implements [`crate::effects::GitHubInterpreter`]. REST is used for pull
//! requests, statuses, labels and comments. Review thread resolution is only
//! exposed through GraphQL.

mod client;
mod error;
mod interpreter;

pub use client::OctocrabClient;
pub use error::GitHubApiError;
pub use interpreter::UNRESOLVED_THREADS_QUERY;
