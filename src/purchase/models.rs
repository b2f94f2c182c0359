//! Purchase models.

use serde::Serialize;

use crate::catalog::Package;

/// Purchase request submitted to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseOrder {
    /// Package being purchased.
    pub package_code: String,

    /// Wholesale price in minor currency units.
    pub order_price: u64,

    /// Retail price in minor currency units.
    pub retail_price: u64,

    /// Number of units.
    pub count: u32,

    /// Rental days for daily plans, the fixed plan length otherwise.
    pub period_num: u32,
}

/// A package plus the buyer-chosen quantities, consumed exactly once on
/// confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseSelection {
    /// The chosen package.
    pub package: Package,

    /// Rental days, meaningful for daily plans only.
    pub days: u32,

    /// Units to purchase.
    pub count: u32,
}

impl PurchaseSelection {
    /// Starts a selection with both quantities at their minimum.
    #[must_use]
    pub fn new(package: Package) -> Self {
        Self {
            package,
            days: 1,
            count: 1,
        }
    }

    /// Composes the request payload for this selection.
    #[must_use]
    pub fn to_order(&self) -> PurchaseOrder {
        let period_num = if self.package.is_daily() {
            self.days
        } else {
            self.package.duration
        };

        PurchaseOrder {
            package_code: self.package.package_code.clone(),
            order_price: self.package.price,
            retail_price: self.package.retail_price,
            count: self.count,
            period_num,
        }
    }
}
