//! The triggering event: what happened, and to which trigger family it belongs.
//!
//! - [`EventKind`] classifies the `(event name, action)` pair
//! - [`TriggerCategory`] groups kinds into comment, label and other triggers
//! - [`EventPayload`] is the raw webhook JSON, reduced to the fields we read
//! - [`EventSnapshot`] bundles the payload with the run it was delivered to

pub mod kind;
pub mod payload;
pub mod snapshot;
pub mod trigger;

pub use kind::EventKind;
pub use payload::{EventPayload, RawComment, RawHead, RawIssue, RawLabel, RawPullRequest};
pub use snapshot::{EventSnapshot, RunMetadata, SnapshotError};
pub use trigger::TriggerCategory;
