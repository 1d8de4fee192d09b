//! Error taxonomy for the repository API client.
//!
//! # Design
//! Every failure leaves the crate as an [`ApiError`], discriminated by where
//! it arose: before any HTTP response existed (`NetworkFailure`), as a
//! non-2xx status (`HttpError`), or after a well-received body failed the
//! declared shape (`ShapeMismatch`). Callers never see raw transport errors,
//! and nothing in the crate retries or substitutes defaults — the error is
//! handed up unchanged for the caller to decide.

use std::fmt;

use serde::Deserialize;
use ureq::http::StatusCode;

/// Errors returned by `ApiClient` operations.
#[derive(Debug)]
pub enum ApiError {
    /// The request failed before a response was obtained — connection
    /// refused, DNS failure, timeout, or a transport error mid-body.
    NetworkFailure(String),

    /// The server responded with a non-2xx status. `message` carries the
    /// server's own description when its error body provides one, otherwise
    /// the status' canonical reason phrase.
    HttpError { status: u16, message: String },

    /// The response arrived with a success status but its body does not
    /// match the shape the caller declared.
    ShapeMismatch(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NetworkFailure(msg) => write!(f, "network failure: {msg}"),
            ApiError::HttpError { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            ApiError::ShapeMismatch(msg) => write!(f, "shape mismatch: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error document the server attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub code: Option<u16>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Normalize a non-2xx response into [`ApiError::HttpError`].
pub(crate) fn status_error(status: StatusCode, body: &str) -> ApiError {
    let message = server_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unrecognized status")
            .to_string()
    });
    ApiError::HttpError {
        status: status.as_u16(),
        message,
    }
}

/// Normalize a transport-level failure into [`ApiError::NetworkFailure`].
pub(crate) fn transport_error(err: &ureq::Error) -> ApiError {
    ApiError::NetworkFailure(err.to_string())
}

/// Pull the human-readable message out of a server error body, if any.
fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorResponse = serde_json::from_str(body).ok()?;
    parsed.error_description.or(parsed.error)
}
