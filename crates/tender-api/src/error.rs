//! Errors returned by the REST client

use tender_forms::SubmissionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status on a JSON call
    #[error("{method} {path} failed: {status}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
    },

    /// Login refused; message comes from the server's `error` field when present
    #[error("Login failed: {status} - {message}")]
    Login { status: u16, message: String },

    /// An update was requested for a record that was never saved
    #[error("{0} has no id")]
    MissingId(&'static str),

    /// A form value could not be mapped onto the model
    #[error("invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    /// Transport failure, timeout, or undecodable body
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } | ApiError::Login { status, .. } => Some(*status),
            ApiError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<ApiError> for SubmissionError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http(inner) => SubmissionError::transport(inner.to_string()),
            other => SubmissionError::rejected(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
