//! Turbopuffer region table.
//!
//! Source: <https://turbopuffer.com/docs/regions>

/// All available Turbopuffer regions.
pub const REGIONS: &[&str] = &[
    // GCP
    "gcp-us-central1",
    "gcp-us-west1",
    "gcp-us-east4",
    "gcp-northamerica-northeast2",
    "gcp-europe-west3",
    "gcp-asia-southeast1",
    "gcp-asia-northeast3",
    // AWS
    "aws-ap-southeast-2",
    "aws-eu-central-1",
    "aws-eu-west-1",
    "aws-us-east-1",
    "aws-us-east-2",
    "aws-us-west-2",
    "aws-ap-south-1",
];

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "aws-us-east-1";

/// Whether `region` is a known Turbopuffer region.
pub fn is_valid_region(region: &str) -> bool {
    REGIONS.contains(&region)
}

/// API base URL for a region.
pub fn api_base_url(region: &str) -> String {
    format!("https://{region}.turbopuffer.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_region_is_in_table() {
        assert!(is_valid_region(DEFAULT_REGION));
    }

    #[test]
    fn unknown_region_rejected() {
        assert!(!is_valid_region("mars-north-1"));
        assert!(!is_valid_region(""));
    }

    #[test]
    fn base_url_from_region() {
        assert_eq!(
            api_base_url("gcp-us-central1"),
            "https://gcp-us-central1.turbopuffer.com"
        );
    }

    #[test]
    fn table_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for region in REGIONS {
            assert!(seen.insert(region), "duplicate region {region}");
        }
    }
}
