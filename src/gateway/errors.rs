//! Gateway errors.

use thiserror::Error;

/// Errors that can occur when communicating with the storefront backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered `success: false` with a message.
    #[error("backend rejected the request: {0}")]
    Rejected(String),

    /// The backend returned a non-2xx response or unexpected body.
    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),
}
