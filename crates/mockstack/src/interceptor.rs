//! Endpoint matching and dispatch of outbound calls.
//!
//! The [`Interceptor`] decides whether a host names a simulated provider
//! endpoint and, if so, hands the request to that service's wire handler.
//! Both matchers are built once from [`MockStackConfig`].

use bytes::Bytes;
use mockstack_core::{AwsRegion, MockStackConfig, UnsupportedOperation};
use mockstack_rds_http::{RdsHost, RdsHttpService};
use mockstack_s3_http::{S3Host, S3HttpService};
use tracing::debug;

use crate::registry::BackendRegistry;

/// A matched endpoint: which service, and what the host said about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Object storage.
    S3(S3Host),
    /// Database provisioning.
    Rds(RdsHost),
}

impl Route {
    /// Route to object storage in `region` (or the default region).
    #[must_use]
    pub fn s3(region: Option<AwsRegion>) -> Self {
        Self::S3(S3Host {
            region,
            bucket: None,
        })
    }

    /// Route to database provisioning in `region` (or the default region).
    #[must_use]
    pub fn rds(region: Option<AwsRegion>) -> Self {
        Self::Rds(RdsHost { region })
    }
}

/// Matches provider endpoints and dispatches to the wire handlers.
#[derive(Debug, Clone)]
pub struct Interceptor {
    s3: S3HttpService,
    rds: RdsHttpService,
    default_region: AwsRegion,
}

impl Interceptor {
    /// Build the endpoint matchers from `config`.
    #[must_use]
    pub fn from_config(config: &MockStackConfig) -> Self {
        Self {
            s3: S3HttpService::from_config(config),
            rds: RdsHttpService::new(),
            default_region: config.default_region.clone(),
        }
    }

    /// Region used when neither host nor caller names one.
    #[must_use]
    pub fn default_region(&self) -> &AwsRegion {
        &self.default_region
    }

    /// Match `host` against every provider endpoint.
    #[must_use]
    pub fn route(&self, host: &str) -> Option<Route> {
        if let Some(rds) = self.rds.match_host(host) {
            return Some(Route::Rds(rds));
        }
        self.s3.match_host(host).map(Route::S3)
    }

    /// Dispatch a request along an already matched route.
    pub fn dispatch(
        &self,
        registry: &BackendRegistry,
        route: &Route,
        req: &http::Request<Bytes>,
    ) -> Result<http::Response<Bytes>, UnsupportedOperation> {
        debug!(route = ?route, method = %req.method(), uri = %req.uri(), "intercepted call");
        match route {
            Route::S3(host) => self
                .s3
                .handle(registry.s3(), &self.default_region, host, req),
            Route::Rds(host) => self.rds.handle(
                registry.rds(),
                registry.network().as_ref(),
                &self.default_region,
                host,
                req,
            ),
        }
    }
}
