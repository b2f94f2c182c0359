//! Catalog data models.

use serde::{Deserialize, Serialize};

/// Marker value of `supportTopUpType` for top-up-capable packages.
pub const TOP_UP_SUPPORTED: i64 = 2;

/// One entry of the country feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 country code.
    pub code: String,

    /// Display name.
    pub name: String,
}

/// A purchasable data-plan offer from the static catalog feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Opaque unique identifier used when purchasing.
    pub package_code: String,

    /// Catalog grouping key; the covered country or region is coded as a
    /// prefix.
    #[serde(default)]
    pub slug: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Wholesale price in minor currency units (1/10000 scale).
    #[serde(default)]
    pub price: u64,

    /// Retail price in minor currency units (1/10000 scale).
    #[serde(default)]
    pub retail_price: u64,

    /// Data allowance in bytes.
    #[serde(default)]
    pub volume: u64,

    /// Plan length; a length of one day marks a daily rental plan.
    #[serde(default)]
    pub duration: u32,

    /// Unit of `duration`, `"DAY"` in the observed feeds.
    #[serde(default)]
    pub duration_unit: String,

    /// Top-up support marker; [`TOP_UP_SUPPORTED`] means supported.
    #[serde(default)]
    pub support_top_up_type: i64,

    /// Exact location code for single-country packages.
    #[serde(default)]
    pub location: Option<String>,

    /// Ordered coverage entries.
    #[serde(default)]
    pub location_network_list: Vec<LocationNetwork>,
}

impl Package {
    /// Whether this is a daily rental plan, where the rental length is chosen
    /// at purchase time.
    #[must_use]
    pub fn is_daily(&self) -> bool {
        self.duration == 1
    }

    /// Whether the package can be applied as a top-up.
    #[must_use]
    pub fn supports_top_up(&self) -> bool {
        self.support_top_up_type == TOP_UP_SUPPORTED
    }
}

/// One coverage entry of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationNetwork {
    /// Covered location name.
    #[serde(default)]
    pub location_name: String,

    /// Covered location code.
    #[serde(default)]
    pub location_code: Option<String>,

    /// Operators serving the location.
    #[serde(default)]
    pub operator_list: Vec<Operator>,
}

/// One mobile operator entry of a coverage list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    /// Operator display name.
    #[serde(default)]
    pub operator_name: String,

    /// Network technology, e.g. `"4G"`.
    #[serde(default)]
    pub network_type: String,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_upstream_field_names() -> TestResult {
        let raw = r#"{
            "packageCode": "US-5GB-30D",
            "slug": "US-5gb",
            "name": "United States 5GB",
            "price": 40000,
            "retailPrice": 50000,
            "volume": 5368709120,
            "duration": 30,
            "durationUnit": "DAY",
            "supportTopUpType": 2,
            "location": "US",
            "locationNetworkList": [
                {"locationName": "United States", "operatorList": [{"operatorName": "AT&T", "networkType": "5G"}]}
            ]
        }"#;

        let package: Package = serde_json::from_str(raw)?;

        assert_eq!(package.package_code, "US-5GB-30D");
        assert_eq!(package.retail_price, 50_000);
        assert_eq!(package.volume, 5_368_709_120);
        assert!(package.supports_top_up());
        assert!(!package.is_daily());
        assert_eq!(package.location.as_deref(), Some("US"));
        assert_eq!(package.location_network_list.len(), 1);

        Ok(())
    }

    #[test]
    fn tolerates_sparse_records() -> TestResult {
        let package: Package = serde_json::from_str(r#"{"packageCode": "X"}"#)?;

        assert_eq!(package.package_code, "X");
        assert_eq!(package.retail_price, 0);
        assert!(!package.supports_top_up());
        assert!(package.location.is_none());

        Ok(())
    }

    #[test]
    fn one_day_plans_are_daily() -> TestResult {
        let package: Package =
            serde_json::from_str(r#"{"packageCode": "D", "duration": 1, "durationUnit": "DAY"}"#)?;

        assert!(package.is_daily());

        Ok(())
    }
}
