//! Error types for the payment API client.
//!
//! # Design
//! Two failure shapes reach callers of the facade: `Validation` is produced
//! locally before any request leaves the process, `Remote` carries the status
//! and body of any response with status >= 400. Transport-level failures from
//! reqwest are wrapped unchanged in `Network`.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Caller-facing code attached to a local validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCode {
    /// Login credentials were incomplete.
    Authentication,
    /// A required id or token was missing. Renders as `400`.
    BadRequest,
}

impl ValidationCode {
    /// HTTP-style status carried by the code, if any.
    pub fn status(self) -> Option<u16> {
        match self {
            ValidationCode::Authentication => None,
            ValidationCode::BadRequest => Some(400),
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationCode::Authentication => write!(f, "authentication"),
            ValidationCode::BadRequest => write!(f, "400"),
        }
    }
}

/// Errors returned by `Transport` and `PaymentClient`.
#[derive(Debug, Error)]
pub enum PayError {
    /// The base URL given at construction is not an absolute http(s) URL.
    #[error("The base URL provided is not valid: {0}")]
    InvalidBaseUrl(String),

    /// A required parameter was missing; no request was sent.
    #[error("{code}: {message}")]
    Validation { code: ValidationCode, message: String },

    /// The server answered with status >= 400.
    #[error("HTTP {status}: {message}")]
    Remote { status: u16, message: Value },

    /// Request data could not be URL-encoded.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// Client configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PayError {
    pub(crate) fn validation(code: ValidationCode, subject: &str) -> Self {
        PayError::Validation {
            code,
            message: format!("The {subject} is missing!"),
        }
    }

    /// Status code of a remote error, or of a `BadRequest` validation error.
    pub fn status(&self) -> Option<u16> {
        match self {
            PayError::Remote { status, .. } => Some(*status),
            PayError::Validation { code, .. } => code.status(),
            PayError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Validation code, if this is a local validation failure.
    pub fn code(&self) -> Option<ValidationCode> {
        match self {
            PayError::Validation { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<serde_urlencoded::ser::Error> for PayError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        PayError::Serialization(err.to_string())
    }
}
