//! Durable per-device session store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::errors::SessionStoreError;
use super::models::SessionState;

/// File-backed store for the established session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Conventional per-user session path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("roamery").join("session.json"))
    }

    /// Reads the stored session. Absent or unreadable files yield `None`.
    #[must_use]
    pub fn load(&self) -> Option<SessionState> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return None,
            Err(error) => {
                warn!("could not read session file: {error}");

                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(error) => {
                warn!("stored session is malformed: {error}");

                None
            }
        }
    }

    /// Persists the session.
    ///
    /// # Errors
    ///
    /// Returns an error when the session cannot be encoded or the file cannot
    /// be written.
    pub fn save(&self, state: &SessionState) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SessionStoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        let raw = serde_json::to_string_pretty(state)?;

        fs::write(&self.path, raw).map_err(|source| SessionStoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Removes the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when an existing file cannot be removed.
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionStoreError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
