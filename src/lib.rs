//! Unresolved Threads - a GitHub Actions step that keeps a pull request's commit
//! status failing while any of its review threads is unresolved.
//!
//! The library builds an immutable [`context::ActionContext`] from the action
//! inputs and the triggering event, then [`runner::run`] evaluates it: count
//! unresolved threads, publish the commit status, sync the unresolved label and
//! clean up the triggering comment.

pub mod config;
pub mod context;
pub mod effects;
pub mod error;
pub mod event;
pub mod github;
pub mod runner;
pub mod status;
pub mod types;

#[cfg(test)]
mod test_utils;
