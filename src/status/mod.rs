//! Commit status reporting.
//!
//! The outcome of a check is published as a commit status on the pull
//! request's head commit, under the fixed context [`STATUS_CONTEXT`]. The
//! status links back to the workflow run that produced it.

pub mod format;
pub mod report;

pub use format::{
    FAILURE_DESCRIPTION_SUFFIX, STATUS_CONTEXT, SUCCESS_DESCRIPTION, failure_status, run_url,
    success_status,
};
pub use report::{report_failure, report_success};
