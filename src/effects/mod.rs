//! GitHub operations described as data.
//!
//! The builder and runner never call GitHub directly. They produce
//! [`GitHubEffect`] values and hand them to a [`GitHubInterpreter`], so the
//! whole decision path runs against a recording mock in tests.

pub mod github;
pub mod interpreter;

pub use github::{CommitStatus, GitHubEffect, GitHubResponse, StatusState};
pub use interpreter::GitHubInterpreter;
