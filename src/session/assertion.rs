//! Host-provided identity assertion.

use std::fmt;

use tracing::warn;
use zeroize::Zeroize;

use super::models::Identity;

/// Signed init payload handed over by the mini-app host.
///
/// The payload embeds the account details and the host's signature, so it is
/// kept out of debug output and zeroed on drop.
#[derive(Clone)]
pub struct InitData {
    raw: String,
}

impl InitData {
    /// Wraps the raw host payload.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The raw payload for the verification exchange.
    #[must_use]
    pub fn reveal(&self) -> &str {
        &self.raw
    }
}

impl fmt::Debug for InitData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InitData(**redacted**)")
    }
}

impl Drop for InitData {
    fn drop(&mut self) {
        self.raw.zeroize();
    }
}

/// Identity material offered by the host environment at startup.
#[derive(Debug, Default)]
pub struct HostAssertion {
    /// Signed payload for backend verification, when the host provided one.
    pub init_data: Option<InitData>,

    /// Unsigned user-claim object riding along with the payload. Display
    /// grade only, never trusted for verification.
    pub user_claim: Option<String>,
}

impl HostAssertion {
    /// Parses the unsigned claim into an identity, when present and well
    /// formed.
    #[must_use]
    pub fn claimed_identity(&self) -> Option<Identity> {
        let raw = self.user_claim.as_deref()?;

        match serde_json::from_str(raw) {
            Ok(identity) => Some(identity),
            Err(error) => {
                warn!("unsigned user claim is malformed: {error}");

                None
            }
        }
    }
}
