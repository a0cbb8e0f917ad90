//! Core domain types for the unresolved threads action.
//!
//! Identifiers are newtypes so that issue numbers, comment IDs and run IDs
//! cannot be swapped by accident.

pub mod ids;
pub mod pr;

pub use ids::{CommentId, InvalidSha, PrNumber, RepoId, RunId, Sha};
pub use pr::PullRequestDescriptor;
