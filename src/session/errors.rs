//! Session errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::gateway::GatewayError;

/// Errors raised while establishing or ending a session.
#[derive(Debug, Error)]
pub enum SessionServiceError {
    /// The host provided nothing verifiable and production rules forbid a
    /// stand-in.
    #[error("no verifiable identity assertion available")]
    AssertionUnavailable,

    /// The verification exchange failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The durable store misbehaved.
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

/// Errors raised by the durable session store.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// The session file could not be written or removed.
    #[error("could not write session file {}", path.display())]
    Write {
        /// Path of the session file.
        path: PathBuf,

        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The session could not be encoded.
    #[error("could not encode session state")]
    Serialize(#[from] serde_json::Error),
}
