//! Action configuration.
//!
//! Five inputs control which triggers are active:
//!
//! | input | default |
//! |---|---|
//! | `useLabelTrigger` | `true` |
//! | `unresolvedLabel` | `unresolvedThreads` |
//! | `useCommentTrigger` | `false` |
//! | `resolvedCommentTrigger` | `LGTM` |
//! | `deleteResolvedCommentTrigger` | `true` |
//!
//! The label input may only be set while label triggering is on, and the two
//! comment inputs only while comment triggering is on. [`Configuration::load`]
//! checks those per input; the "at least one trigger" rule is a separate final
//! gate, [`Configuration::ensure_trigger_enabled`].

pub mod inputs;

pub use inputs::{EnvInputs, InputSource};

use serde::Serialize;

use crate::context::{ContextError, GatedInput};

pub const USE_LABEL_TRIGGER: &str = "useLabelTrigger";
pub const UNRESOLVED_LABEL: &str = "unresolvedLabel";
pub const USE_COMMENT_TRIGGER: &str = "useCommentTrigger";
pub const RESOLVED_COMMENT_TRIGGER: &str = "resolvedCommentTrigger";
pub const DELETE_RESOLVED_COMMENT_TRIGGER: &str = "deleteResolvedCommentTrigger";

pub const DEFAULT_USE_LABEL_TRIGGER: bool = true;
pub const DEFAULT_UNRESOLVED_LABEL: &str = "unresolvedThreads";
pub const DEFAULT_USE_COMMENT_TRIGGER: bool = false;
pub const DEFAULT_RESOLVED_COMMENT_TRIGGER: &str = "LGTM";
pub const DEFAULT_DELETE_RESOLVED_COMMENT_TRIGGER: bool = true;

/// Validated trigger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Evaluate on label added/removed events.
    pub use_label_trigger: bool,
    /// Label kept on PRs that still have unresolved threads.
    pub unresolved_label: String,
    /// Evaluate when a comment equal to `resolved_comment_trigger` is posted.
    pub use_comment_trigger: bool,
    /// Exact comment body that requests a re-check.
    pub resolved_comment_trigger: String,
    /// Delete the triggering comment once the check has run.
    pub delete_resolved_comment_trigger: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            use_label_trigger: DEFAULT_USE_LABEL_TRIGGER,
            unresolved_label: DEFAULT_UNRESOLVED_LABEL.to_string(),
            use_comment_trigger: DEFAULT_USE_COMMENT_TRIGGER,
            resolved_comment_trigger: DEFAULT_RESOLVED_COMMENT_TRIGGER.to_string(),
            delete_resolved_comment_trigger: DEFAULT_DELETE_RESOLVED_COMMENT_TRIGGER,
        }
    }
}

impl Configuration {
    /// Loads the configuration, failing on the first invalid input.
    ///
    /// Does not apply the at-least-one-trigger rule; see
    /// [`Configuration::ensure_trigger_enabled`].
    pub fn load(inputs: &(impl InputSource + ?Sized)) -> Result<Self, ContextError> {
        let use_label_trigger =
            boolean_input(inputs, USE_LABEL_TRIGGER, DEFAULT_USE_LABEL_TRIGGER)?;
        let unresolved_label = gated_input(
            inputs,
            GatedInput::UnresolvedLabel,
            use_label_trigger,
            DEFAULT_UNRESOLVED_LABEL,
        )?;

        let use_comment_trigger =
            boolean_input(inputs, USE_COMMENT_TRIGGER, DEFAULT_USE_COMMENT_TRIGGER)?;
        let resolved_comment_trigger = gated_input(
            inputs,
            GatedInput::ResolvedCommentTrigger,
            use_comment_trigger,
            DEFAULT_RESOLVED_COMMENT_TRIGGER,
        )?;
        ensure_gate_open(
            inputs,
            GatedInput::DeleteResolvedCommentTrigger,
            use_comment_trigger,
        )?;
        let delete_resolved_comment_trigger = boolean_input(
            inputs,
            DELETE_RESOLVED_COMMENT_TRIGGER,
            DEFAULT_DELETE_RESOLVED_COMMENT_TRIGGER,
        )?;

        Ok(Configuration {
            use_label_trigger,
            unresolved_label,
            use_comment_trigger,
            resolved_comment_trigger,
            delete_resolved_comment_trigger,
        })
    }

    /// Fails with [`ContextError::AtLeastOneTriggerRequired`] when both
    /// trigger families are disabled.
    pub fn ensure_trigger_enabled(&self) -> Result<(), ContextError> {
        if self.use_label_trigger || self.use_comment_trigger {
            Ok(())
        } else {
            Err(ContextError::AtLeastOneTriggerRequired)
        }
    }

    /// Re-checks every invariant on an already-built configuration.
    ///
    /// A gated value counts as "set" when it differs from its default, since
    /// that is the only way a loaded configuration can carry one.
    pub fn validate(&self) -> Result<(), ContextError> {
        let gates = [
            (
                GatedInput::UnresolvedLabel,
                self.use_label_trigger,
                self.unresolved_label != DEFAULT_UNRESOLVED_LABEL,
            ),
            (
                GatedInput::ResolvedCommentTrigger,
                self.use_comment_trigger,
                self.resolved_comment_trigger != DEFAULT_RESOLVED_COMMENT_TRIGGER,
            ),
            (
                GatedInput::DeleteResolvedCommentTrigger,
                self.use_comment_trigger,
                self.delete_resolved_comment_trigger != DEFAULT_DELETE_RESOLVED_COMMENT_TRIGGER,
            ),
        ];
        for (input, enabled, customized) in gates {
            if customized && !enabled {
                return Err(ContextError::OptionRequiresDisabledFeature(input));
            }
        }
        self.ensure_trigger_enabled()
    }
}

/// Parses a strict boolean input. Only `true` and `false` are accepted.
fn boolean_input(
    inputs: &(impl InputSource + ?Sized),
    name: &'static str,
    default: bool,
) -> Result<bool, ContextError> {
    match inputs.input(name).as_deref() {
        None => Ok(default),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(ContextError::InvalidBooleanInput {
            input: name,
            value: other.to_string(),
        }),
    }
}

/// Rejects `input` if it is set while its feature is disabled.
fn ensure_gate_open(
    inputs: &(impl InputSource + ?Sized),
    input: GatedInput,
    feature_enabled: bool,
) -> Result<(), ContextError> {
    if !feature_enabled && inputs.input(input.input()).is_some() {
        return Err(ContextError::OptionRequiresDisabledFeature(input));
    }
    Ok(())
}

/// Reads a gated string input, falling back to `default`.
fn gated_input(
    inputs: &(impl InputSource + ?Sized),
    input: GatedInput,
    feature_enabled: bool,
    default: &str,
) -> Result<String, ContextError> {
    ensure_gate_open(inputs, input, feature_enabled)?;
    Ok(inputs
        .input(input.input())
        .unwrap_or_else(|| default.to_string()))
}
