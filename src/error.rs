//! Top-level error for building and running an action context.

use thiserror::Error;

use crate::context::ContextError;

/// An error from building or running an action context.
///
/// Generic over the interpreter's error type so that API failures pass through
/// unchanged.
#[derive(Debug, Error)]
pub enum ActionError<E> {
    /// Invalid configuration, unrecognized event, or missing pull request.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// The GitHub interpreter failed.
    #[error(transparent)]
    GitHub(E),

    /// The interpreter answered an effect with a response of the wrong kind.
    #[error("unexpected response to {effect}: {response}")]
    UnexpectedResponse {
        effect: &'static str,
        response: String,
    },
}

impl<E> ActionError<E> {
    /// Returns the context error, if this is one.
    pub fn as_context(&self) -> Option<&ContextError> {
        match self {
            ActionError::Context(e) => Some(e),
            _ => None,
        }
    }
}
