//! Provisioned `eSIM` wire models.

use serde::{Deserialize, Serialize};

use crate::catalog::models::TOP_UP_SUPPORTED;

/// One provisioned `eSIM` owned by the current user.
///
/// The application only observes these records; all state transitions happen
/// server side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsimRecord {
    /// Unique profile identifier.
    pub iccid: String,

    /// Upstream lifecycle state, e.g. `"IN_USE"`.
    #[serde(default)]
    pub esim_status: String,

    /// Upstream provisioning-protocol state, e.g. `"ENABLED"`.
    #[serde(default)]
    pub smdp_status: String,

    /// Bytes consumed so far.
    #[serde(default)]
    pub order_usage: u64,

    /// Total allowance in bytes.
    #[serde(default)]
    pub total_volume: u64,

    /// Expiry timestamp as reported upstream.
    #[serde(default)]
    pub expired_time: Option<String>,

    /// Installation QR code link.
    #[serde(default)]
    pub qr_code_url: Option<String>,

    /// Provisioning transaction number used for cancel and top-up calls.
    #[serde(default)]
    pub esim_tran_no: Option<String>,

    /// Package application history, first entry treated as current.
    #[serde(default)]
    pub package_list: Vec<PackageApplication>,
}

impl EsimRecord {
    /// The currently applied package, when the history is non-empty.
    #[must_use]
    pub fn current_package(&self) -> Option<&PackageApplication> {
        self.package_list.first()
    }

    /// Transaction number for lifecycle calls, taken from the record itself
    /// or from the current package application.
    #[must_use]
    pub fn tran_no(&self) -> Option<&str> {
        self.esim_tran_no.as_deref().or_else(|| {
            self.current_package()
                .and_then(|package| package.esim_tran_no.as_deref())
        })
    }
}

/// One package application on an `eSIM`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageApplication {
    /// Applied package display name.
    #[serde(default)]
    pub package_name: String,

    /// When the package was applied.
    #[serde(default)]
    pub create_time: Option<String>,

    /// Top-up support marker of the applied package.
    #[serde(default)]
    pub support_top_up_type: i64,

    /// Transaction number of the application.
    #[serde(default)]
    pub esim_tran_no: Option<String>,
}

impl PackageApplication {
    /// Whether the applied package accepts top-ups.
    #[must_use]
    pub fn supports_top_up(&self) -> bool {
        self.support_top_up_type == TOP_UP_SUPPORTED
    }
}

/// Top-up submission for one provisioned `eSIM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopupOrder {
    /// Transaction number of the target `eSIM`.
    pub tran_no: String,

    /// Chosen top-up package.
    pub package_code: String,

    /// Wholesale price of the chosen package in minor currency units.
    pub amount: u64,
}
