//! Static catalog feed loading.
//!
//! The catalog ships as four JSON files exported ahead of time. Feeds are
//! loaded per request; a missing or malformed feed degrades to an empty
//! listing rather than failing the command.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::warn;

use super::errors::CatalogError;
use super::models::{Country, Package};

/// Country index feed.
pub const COUNTRIES_FEED: &str = "countries.json";

/// Single-country package feed.
pub const LOCAL_FEED: &str = "local.json";

/// Multi-country regional package feed.
pub const REGIONAL_FEED: &str = "regional.json";

/// Worldwide package feed.
pub const GLOBAL_FEED: &str = "global.json";

/// Directory of exported catalog feed files.
#[derive(Debug, Clone)]
pub struct CatalogDir {
    dir: PathBuf,
}

impl CatalogDir {
    /// Creates a feed loader rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Loads the country index, or an empty list when the feed is
    /// unavailable.
    #[must_use]
    pub fn countries(&self) -> Vec<Country> {
        or_empty(self.try_countries())
    }

    /// Loads the single-country package feed, or an empty list when the feed
    /// is unavailable.
    #[must_use]
    pub fn local_packages(&self) -> Vec<Package> {
        or_empty(self.try_local_packages())
    }

    /// Loads the regional package feed, or an empty list when the feed is
    /// unavailable.
    #[must_use]
    pub fn regional_packages(&self) -> Vec<Package> {
        or_empty(self.try_regional_packages())
    }

    /// Loads the global package feed, or an empty list when the feed is
    /// unavailable.
    #[must_use]
    pub fn global_packages(&self) -> Vec<Package> {
        or_empty(self.try_global_packages())
    }

    /// Loads the country index.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed cannot be read or parsed.
    pub fn try_countries(&self) -> Result<Vec<Country>, CatalogError> {
        self.load(COUNTRIES_FEED)
    }

    /// Loads the single-country package feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed cannot be read or parsed.
    pub fn try_local_packages(&self) -> Result<Vec<Package>, CatalogError> {
        self.load(LOCAL_FEED)
    }

    /// Loads the regional package feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed cannot be read or parsed.
    pub fn try_regional_packages(&self) -> Result<Vec<Package>, CatalogError> {
        self.load(REGIONAL_FEED)
    }

    /// Loads the global package feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed cannot be read or parsed.
    pub fn try_global_packages(&self) -> Result<Vec<Package>, CatalogError> {
        self.load(GLOBAL_FEED)
    }

    /// Path of a feed file inside the catalog directory.
    #[must_use]
    pub fn feed_path(&self, feed: &str) -> PathBuf {
        self.dir.join(feed)
    }

    fn load<T: DeserializeOwned>(&self, feed: &str) -> Result<Vec<T>, CatalogError> {
        let path = self.feed_path(feed);
        let raw = fs::read_to_string(&path).map_err(|source| CatalogError::Read {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| CatalogError::Parse { path, source })
    }
}

impl AsRef<Path> for CatalogDir {
    fn as_ref(&self) -> &Path {
        &self.dir
    }
}

fn or_empty<T>(loaded: Result<Vec<T>, CatalogError>) -> Vec<T> {
    loaded.unwrap_or_else(|error| {
        warn!("catalog feed unavailable: {error}");

        Vec::new()
    })
}
