//! Catalog scoping, ordering, and volume labels.

use std::fmt;
use std::str::FromStr;

use super::errors::UnknownBucket;
use super::models::{Country, Package};

/// Bytes per gigabyte as counted by the catalog feeds.
pub const GIB: u64 = 1_073_741_824;

/// Named data-volume tiers of the worldwide catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeBucket {
    /// 1 GB worldwide plans.
    Gb1,

    /// 3 GB worldwide plans.
    Gb3,

    /// 5 GB worldwide plans.
    Gb5,

    /// 10 GB worldwide plans.
    Gb10,

    /// 20 GB worldwide plans.
    Gb20,
}

impl VolumeBucket {
    /// All buckets in menu order.
    pub const ALL: [Self; 5] = [Self::Gb1, Self::Gb3, Self::Gb5, Self::Gb10, Self::Gb20];

    /// Stable key used on the command line.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Gb1 => "1gb",
            Self::Gb3 => "3gb",
            Self::Gb5 => "5gb",
            Self::Gb10 => "10gb",
            Self::Gb20 => "20gb",
        }
    }

    /// Advertised allowance in gigabytes.
    #[must_use]
    pub fn target_gb(self) -> u64 {
        match self {
            Self::Gb1 => 1,
            Self::Gb3 => 3,
            Self::Gb5 => 5,
            Self::Gb10 => 10,
            Self::Gb20 => 20,
        }
    }
}

impl FromStr for VolumeBucket {
    type Err = UnknownBucket;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.key().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownBucket(value.to_owned()))
    }
}

impl fmt::Display for VolumeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} GB", self.target_gb())
    }
}

/// A catalog browsing scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Packages covering a single country.
    Local {
        /// ISO country code.
        country: String,
    },

    /// Packages of one regional group.
    Regional {
        /// Regional slug, e.g. `"Europe"`.
        slug: String,
    },

    /// Worldwide packages of one volume tier.
    Global {
        /// Advertised allowance tier.
        bucket: VolumeBucket,
    },
}

/// Whether a package covers the given country, either through its exact
/// location code or through its slug prefix.
#[must_use]
pub fn covers_country(package: &Package, code: &str) -> bool {
    if let Some(location) = &package.location
        && location.eq_ignore_ascii_case(code)
    {
        return true;
    }

    package
        .slug
        .get(..code.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(code))
}

/// Narrows a feed to one scope and orders it cheapest first.
#[must_use]
pub fn filter_scope(mut packages: Vec<Package>, scope: &Scope) -> Vec<Package> {
    match scope {
        Scope::Local { country } => packages.retain(|package| covers_country(package, country)),
        Scope::Regional { slug } => {
            packages.retain(|package| package.slug.eq_ignore_ascii_case(slug));
        }
        Scope::Global { bucket } => {
            packages.retain(|package| rounded_gb(package.volume) == bucket.target_gb());
        }
    }

    sort_by_retail_price(&mut packages);

    packages
}

/// Orders packages by retail price ascending, keeping feed order for ties.
pub fn sort_by_retail_price(packages: &mut [Package]) {
    packages.sort_by_key(|package| package.retail_price);
}

/// Allowance in whole gigabytes, rounding halves up, used to assign worldwide
/// packages to their advertised tier.
#[must_use]
pub fn rounded_gb(bytes: u64) -> u64 {
    (bytes + GIB / 2) / GIB
}

/// Allowance label with tenth-of-a-gigabyte precision, e.g. `"4.4 GB"`.
///
/// Partial tenths round up so a nonzero allowance never reads as zero.
#[must_use]
pub fn volume_label(bytes: u64) -> String {
    let tenths = (u128::from(bytes) * 10).div_ceil(u128::from(GIB));
    let whole = tenths / 10;
    let frac = tenths % 10;

    if frac == 0 {
        format!("{whole} GB")
    } else {
        format!("{whole}.{frac} GB")
    }
}

/// Keeps only countries covered by at least one package.
#[must_use]
pub fn countries_with_packages(mut countries: Vec<Country>, packages: &[Package]) -> Vec<Country> {
    countries.retain(|country| {
        packages
            .iter()
            .any(|package| covers_country(package, &country.code))
    });

    countries
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn package(code: &str, slug: &str, location: Option<&str>, retail: u64, volume: u64) -> Package {
        Package {
            package_code: code.to_owned(),
            slug: slug.to_owned(),
            name: code.to_owned(),
            price: retail,
            retail_price: retail,
            volume,
            duration: 7,
            duration_unit: "DAY".to_owned(),
            support_top_up_type: 0,
            location: location.map(str::to_owned),
            location_network_list: Vec::new(),
        }
    }

    #[test]
    fn bucket_keys_round_trip() -> TestResult {
        for bucket in VolumeBucket::ALL {
            assert_eq!(bucket.key().parse::<VolumeBucket>()?, bucket);
        }

        Ok(())
    }

    #[test]
    fn unknown_bucket_key_is_rejected() {
        let result = "2gb".parse::<VolumeBucket>();

        assert!(
            matches!(result, Err(UnknownBucket(_))),
            "expected UnknownBucket, got {result:?}"
        );
    }

    #[test]
    fn location_code_covers_country() {
        let package = package("US-5", "US-5gb", Some("US"), 1, GIB);

        assert!(covers_country(&package, "US"));
        assert!(!covers_country(&package, "JP"));
    }

    #[test]
    fn slug_prefix_covers_country() {
        let package = package("GB-1", "GB-1gb-7d", None, 1, GIB);

        assert!(covers_country(&package, "gb"));
        assert!(!covers_country(&package, "DE"));
    }

    #[test]
    fn local_scope_filters_and_sorts_cheapest_first() {
        let packages = vec![
            package("US-B", "US-3gb", Some("US"), 90_000, 3 * GIB),
            package("JP-A", "JP-1gb", Some("JP"), 10_000, GIB),
            package("US-A", "US-1gb", Some("US"), 25_000, GIB),
        ];

        let scoped = filter_scope(
            packages,
            &Scope::Local {
                country: "US".to_owned(),
            },
        );

        let codes: Vec<&str> = scoped.iter().map(|p| p.package_code.as_str()).collect();

        assert_eq!(codes, ["US-A", "US-B"]);
    }

    #[test]
    fn regional_scope_matches_slug() {
        let packages = vec![
            package("EU-A", "Europe", None, 40_000, 3 * GIB),
            package("AS-A", "Asia", None, 30_000, 3 * GIB),
        ];

        let scoped = filter_scope(
            packages,
            &Scope::Regional {
                slug: "europe".to_owned(),
            },
        );

        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped.first().map(|p| p.package_code.as_str()), Some("EU-A"));
    }

    #[test]
    fn global_scope_buckets_by_rounded_allowance() {
        let packages = vec![
            package("GL-1", "GL", None, 10_000, 1_000_000_000),
            package("GL-5", "GL", None, 60_000, 5 * GIB),
            package("GL-10", "GL", None, 99_000, 10 * GIB),
        ];

        let scoped = filter_scope(
            packages,
            &Scope::Global {
                bucket: VolumeBucket::Gb1,
            },
        );

        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped.first().map(|p| p.package_code.as_str()), Some("GL-1"));
    }

    #[test]
    fn ties_keep_feed_order() {
        let packages = vec![
            package("US-FIRST", "US-a", Some("US"), 25_000, GIB),
            package("US-SECOND", "US-b", Some("US"), 25_000, GIB),
        ];

        let scoped = filter_scope(
            packages,
            &Scope::Local {
                country: "US".to_owned(),
            },
        );

        let codes: Vec<&str> = scoped.iter().map(|p| p.package_code.as_str()).collect();

        assert_eq!(codes, ["US-FIRST", "US-SECOND"]);
    }

    #[test]
    fn halves_round_up_to_the_next_tier() {
        assert_eq!(rounded_gb(4 * GIB + GIB / 2), 5);
        assert_eq!(rounded_gb(4 * GIB + GIB / 2 - 1), 4);
        assert_eq!(rounded_gb(1_000_000_000), 1);
    }

    #[test]
    fn volume_labels_keep_tenths() {
        assert_eq!(volume_label(5 * GIB), "5 GB");
        assert_eq!(volume_label(GIB + GIB / 2), "1.5 GB");
        assert_eq!(volume_label(GIB / 2), "0.5 GB");
        assert_eq!(volume_label(0), "0 GB");
    }

    #[test]
    fn partial_tenths_never_read_as_zero() {
        assert_eq!(volume_label(1), "0.1 GB");
    }

    #[test]
    fn country_index_drops_uncovered_entries() {
        let countries = vec![
            Country {
                code: "US".to_owned(),
                name: "United States".to_owned(),
            },
            Country {
                code: "AQ".to_owned(),
                name: "Antarctica".to_owned(),
            },
        ];
        let packages = vec![package("US-A", "US-1gb", Some("US"), 25_000, GIB)];

        let covered = countries_with_packages(countries, &packages);

        assert_eq!(covered.len(), 1);
        assert_eq!(covered.first().map(|c| c.code.as_str()), Some("US"));
    }
}
