// File: src/error.rs
// Purpose: Errors reported by submission and status-update collaborators

use thiserror::Error;

/// Failure of an external collaborator call
///
/// Field-level problems are not errors; they are reported through
/// `ValidationResult` and `FieldStatus`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// The collaborator refused the data (bad input, forbidden, not found)
    #[error("{0}")]
    Rejected(String),

    /// The call never completed (network, timeout, undecodable response)
    #[error("network error: {0}")]
    Transport(String),
}

impl SubmissionError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        SubmissionError::Rejected(reason.into())
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        SubmissionError::Transport(reason.into())
    }
}
