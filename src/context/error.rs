//! Errors raised while building an action context.
//!
//! Every variant is fatal for the current run. None of them are transient, so
//! callers report and exit rather than retry.

use std::fmt;

use thiserror::Error;

use crate::config::{
    DELETE_RESOLVED_COMMENT_TRIGGER, RESOLVED_COMMENT_TRIGGER, UNRESOLVED_LABEL,
    USE_COMMENT_TRIGGER, USE_LABEL_TRIGGER,
};

/// An input that may only be set while its owning trigger is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatedInput {
    /// `unresolvedLabel`, owned by `useLabelTrigger`.
    UnresolvedLabel,
    /// `resolvedCommentTrigger`, owned by `useCommentTrigger`.
    ResolvedCommentTrigger,
    /// `deleteResolvedCommentTrigger`, owned by `useCommentTrigger`.
    DeleteResolvedCommentTrigger,
}

impl GatedInput {
    /// The input name as written in the workflow file.
    pub fn input(&self) -> &'static str {
        match self {
            GatedInput::UnresolvedLabel => UNRESOLVED_LABEL,
            GatedInput::ResolvedCommentTrigger => RESOLVED_COMMENT_TRIGGER,
            GatedInput::DeleteResolvedCommentTrigger => DELETE_RESOLVED_COMMENT_TRIGGER,
        }
    }

    /// The feature flag that must be `true` for the input to be set.
    pub fn feature(&self) -> &'static str {
        match self {
            GatedInput::UnresolvedLabel => USE_LABEL_TRIGGER,
            GatedInput::ResolvedCommentTrigger | GatedInput::DeleteResolvedCommentTrigger => {
                USE_COMMENT_TRIGGER
            }
        }
    }
}

impl fmt::Display for GatedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.input())
    }
}

/// Validation and classification failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// A boolean input was something other than exactly `true` or `false`.
    #[error("input `{input}` must be \"true\" or \"false\", got {value:?}")]
    InvalidBooleanInput { input: &'static str, value: String },

    /// A gated input was set while its trigger is disabled.
    #[error(
        "input `{}` is set but `{}` is false; enable `{}` or remove `{}`",
        .0.input(), .0.feature(), .0.feature(), .0.input()
    )]
    OptionRequiresDisabledFeature(GatedInput),

    /// Both `useLabelTrigger` and `useCommentTrigger` are false.
    #[error("at least one of `useLabelTrigger` or `useCommentTrigger` must be true")]
    AtLeastOneTriggerRequired,

    /// The `(event name, action)` pair is not one this action handles.
    #[error("unsupported event `{event_name}` with action {action:?}")]
    InvalidEventKind { event_name: String, action: String },

    /// The event carries no pull request.
    #[error("no pull request is associated with this event")]
    NoAssociatedPullRequest,

    /// A payload section the event kind requires is missing.
    #[error("event payload is missing `{0}`")]
    MissingPayloadField(&'static str),

    /// A payload field has a malformed value.
    #[error("invalid value for `{field}`: {value:?}")]
    InvalidField { field: &'static str, value: String },
}
