//! Catalog errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading catalog feeds.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A feed file could not be read.
    #[error("could not read catalog feed {}", path.display())]
    Read {
        /// Path of the unreadable feed.
        path: PathBuf,

        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A feed file could not be parsed.
    #[error("could not parse catalog feed {}", path.display())]
    Parse {
        /// Path of the malformed feed.
        path: PathBuf,

        /// Underlying parse error.
        source: serde_json::Error,
    },
}

/// Raised when a string does not name a known global volume bucket.
#[derive(Debug, Error)]
#[error("unknown volume bucket: {0}")]
pub struct UnknownBucket(pub String);
