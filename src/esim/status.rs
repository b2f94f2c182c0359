//! Canonical `eSIM` status derivation and action gating.
//!
//! The backend reports two raw enumerations per record, a provisioning state
//! and a usage state. Neither alone describes what a user can do with the
//! profile, so both are folded into one six-way display status and every
//! lifecycle action is gated on that.

use std::fmt;

use super::models::EsimRecord;

const RELEASED: &str = "RELEASED";
const ENABLED: &str = "ENABLED";
const GOT_RESOURCE: &str = "GOT_RESOURCE";
const IN_USE: &str = "IN_USE";
const USED_UP: &str = "USED_UP";
const DELETED: &str = "DELETED";

/// Six-way display state derived from the two upstream status fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalStatus {
    /// Purchased and released, not yet installed.
    New,

    /// Installed and actively consuming data.
    InUse,

    /// Installed but not yet consuming data.
    Onboard,

    /// Allowance fully consumed.
    Depleted,

    /// Removed upstream.
    Deleted,

    /// Any unrecognized combination.
    Inactive,
}

impl CanonicalStatus {
    /// Listing rank, freshest first.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::New => 0,
            Self::InUse => 1,
            Self::Onboard => 2,
            Self::Depleted => 3,
            Self::Deleted => 4,
            Self::Inactive => 5,
        }
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::New => "New",
            Self::InUse => "In Use",
            Self::Onboard => "Onboard",
            Self::Depleted => "Depleted",
            Self::Deleted => "Deleted",
            Self::Inactive => "Inactive",
        };

        f.write_str(label)
    }
}

/// Maps the two upstream status fields onto one display status.
///
/// Arms are ordered and the first match wins; the inputs are not mutually
/// exclusive under malformed data.
#[must_use]
pub fn resolve_status(smdp_status: &str, esim_status: &str) -> CanonicalStatus {
    match (smdp_status, esim_status) {
        (RELEASED, GOT_RESOURCE) => CanonicalStatus::New,
        (ENABLED, IN_USE) => CanonicalStatus::InUse,
        (ENABLED, GOT_RESOURCE) => CanonicalStatus::Onboard,
        (_, USED_UP) => CanonicalStatus::Depleted,
        (_, DELETED) => CanonicalStatus::Deleted,
        _ => CanonicalStatus::Inactive,
    }
}

impl EsimRecord {
    /// Canonical display status of this record.
    #[must_use]
    pub fn status(&self) -> CanonicalStatus {
        resolve_status(&self.smdp_status, &self.esim_status)
    }
}

/// Lifecycle actions a user can request on one `eSIM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Revoke a not-yet-activated profile.
    Cancel,

    /// Apply additional allowance.
    TopUp,

    /// Re-read usage from the backend.
    Refresh,

    /// Remove a finished profile from the listing.
    Delete,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Cancel => "cancel",
            Self::TopUp => "top-up",
            Self::Refresh => "refresh",
            Self::Delete => "delete",
        };

        f.write_str(label)
    }
}

/// Whether the `eSIM` can still be cancelled.
#[must_use]
pub fn can_cancel(status: CanonicalStatus) -> bool {
    matches!(status, CanonicalStatus::New | CanonicalStatus::Onboard)
}

/// Whether additional allowance can be applied.
///
/// Beyond the display status, the current package must declare top-up support
/// and both raw fields must sit in a provisioning window the vendor accepts.
#[must_use]
pub fn can_top_up(record: &EsimRecord) -> bool {
    matches!(record.status(), CanonicalStatus::New | CanonicalStatus::InUse)
        && record
            .current_package()
            .is_some_and(super::models::PackageApplication::supports_top_up)
        && matches!(record.smdp_status.as_str(), RELEASED | ENABLED)
        && matches!(record.esim_status.as_str(), GOT_RESOURCE | IN_USE)
}

/// Whether a usage refresh makes sense.
#[must_use]
pub fn can_refresh(status: CanonicalStatus) -> bool {
    status == CanonicalStatus::InUse
}

/// Whether the record can be removed from the listing. Only terminal or
/// unknown states qualify.
#[must_use]
pub fn can_delete(status: CanonicalStatus) -> bool {
    !matches!(
        status,
        CanonicalStatus::New | CanonicalStatus::Onboard | CanonicalStatus::InUse
    )
}

/// Orders records freshest first. Records with equal status keep their
/// upstream order.
pub fn sort_by_status(records: &mut [EsimRecord]) {
    records.sort_by_key(|record| record.status().rank());
}
