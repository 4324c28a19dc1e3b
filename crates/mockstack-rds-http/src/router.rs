//! RDS endpoint matching and action identification.
//!
//! | Host | Region |
//! |------|--------|
//! | `rds.amazonaws.com` | default |
//! | `rds.<region>.amazonaws.com` | `<region>` |

use mockstack_core::AwsRegion;
use mockstack_rds_model::RdsOperation;

use crate::params::QueryParams;

/// Suffix shared by every RDS endpoint.
const RDS_DOMAIN: &str = "amazonaws.com";

/// What a matched RDS host tells us.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RdsHost {
    /// Region named by the host, if any.
    pub region: Option<AwsRegion>,
}

/// Host matcher for the RDS endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct RdsRouter;

impl RdsRouter {
    /// Match a `Host` value (port allowed) against the RDS endpoint patterns.
    #[must_use]
    pub fn match_host(&self, host: &str) -> Option<RdsHost> {
        let host = strip_port(host).to_ascii_lowercase();
        let head = host.strip_suffix(RDS_DOMAIN)?.strip_suffix('.')?;
        if head == "rds" {
            return Some(RdsHost::default());
        }
        let region = head.strip_prefix("rds.")?;
        if region.is_empty() || region.contains('.') {
            return None;
        }
        Some(RdsHost {
            region: Some(AwsRegion::new(region)),
        })
    }

    /// The action named by the `Action` parameter, if it is one we serve.
    #[must_use]
    pub fn resolve(&self, params: &QueryParams) -> Option<RdsOperation> {
        params.get("Action").and_then(RdsOperation::from_name)
    }
}

fn strip_port(host: &str) -> &str {
    host.rsplit_once(':')
        .filter(|(_, port)| port.bytes().all(|b| b.is_ascii_digit()))
        .map_or(host, |(name, _)| name)
}
