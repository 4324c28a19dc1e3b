//! Configuration for the mock provider.
//!
//! Values can be built programmatically via [`MockStackConfig::builder`] or
//! loaded from environment variables via [`MockStackConfig::from_env`].

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::types::AwsRegion;

/// Global configuration for the mock.
///
/// # Examples
///
/// ```
/// use mockstack_core::MockStackConfig;
///
/// let config = MockStackConfig::default();
/// assert_eq!(config.default_region.as_str(), "us-east-1");
/// assert!(config.s3_virtual_hosting);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct MockStackConfig {
    /// Bind address for the standalone server.
    #[builder(default = String::from("0.0.0.0:4566"))]
    pub gateway_listen: String,

    /// Region used when a request does not identify one.
    #[builder(default)]
    pub default_region: AwsRegion,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Base domain of the object-storage endpoint.
    #[builder(default = String::from("s3.amazonaws.com"))]
    pub s3_domain: String,

    /// Whether `<bucket>.<s3_domain>` hosts address a bucket.
    #[builder(default = true)]
    pub s3_virtual_hosting: bool,

    /// Hosts the standalone server treats as its own address.
    #[builder(default = vec![String::from("localhost"), String::from("127.0.0.1")])]
    pub local_hosts: Vec<String>,
}

impl Default for MockStackConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MockStackConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GATEWAY_LISTEN` | `0.0.0.0:4566` |
    /// | `DEFAULT_REGION` | `us-east-1` |
    /// | `LOG_LEVEL` | `info` |
    /// | `S3_DOMAIN` | `s3.amazonaws.com` |
    /// | `S3_VIRTUAL_HOSTING` | `true` |
    /// | `LOCAL_HOSTS` | `localhost,127.0.0.1` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Ok(v) = std::env::var("DEFAULT_REGION") {
            config.default_region = AwsRegion::new(v);
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("S3_DOMAIN") {
            config.s3_domain = v;
        }
        if let Ok(v) = std::env::var("S3_VIRTUAL_HOSTING") {
            config.s3_virtual_hosting = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("LOCAL_HOSTS") {
            config.local_hosts = parse_list(&v);
        }

        config
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// Split a comma-separated list, dropping empty entries.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
