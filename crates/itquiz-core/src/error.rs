//! Quiz error types.
//!
//! Every variant is a recoverable contract violation: the presentation layer
//! is expected to surface it to the player and carry on.

use thiserror::Error;

use crate::session::SessionState;

/// Errors raised by the normalizer, the session, and the game controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// An authored question is malformed (unmatched or ambiguous correct text).
    #[error("invalid question {prompt:?}: {reason}")]
    Configuration { prompt: String, reason: String },

    /// A transition was invoked in a state that does not allow it.
    #[error("cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    /// A question index past the end of the run's question list.
    #[error("question index {index} out of range (run has {len} questions)")]
    OutOfRange { index: usize, len: usize },

    /// An answer choice outside the current question's options.
    #[error("answer choice {choice} out of range (question has {options} options)")]
    InvalidInput { choice: usize, options: usize },

    /// A score record was requested before a nickname was set.
    #[error("no nickname set; cannot build a score record")]
    MissingNickname,
}

impl QuizError {
    pub(crate) fn configuration(prompt: &str, reason: impl Into<String>) -> Self {
        QuizError::Configuration {
            prompt: prompt.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error comes from bad authored content rather
    /// than from a caller driving the session out of order.
    pub fn is_configuration(&self) -> bool {
        matches!(self, QuizError::Configuration { .. })
    }
}
