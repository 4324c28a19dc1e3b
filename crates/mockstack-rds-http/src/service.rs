//! The RDS wire service.
//!
//! [`RdsHttpService`] handles one buffered query-protocol request: parameter
//! collection, action lookup, decoding, execution against the region's
//! [`RdsBackend`], and XML rendering. Every response carries
//! `x-amzn-RequestId`.

use bytes::Bytes;
use mockstack_core::{AwsRegion, RegionStore, ServiceName, UnsupportedOperation};
use mockstack_rds_core::{RdsBackend, SubnetLookup};
use mockstack_rds_model::RdsError;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::dispatch::execute;
use crate::params::QueryParams;
use crate::request::decode_request;
use crate::response::{add_request_id, error_to_response, output_to_response};
use crate::router::{RdsHost, RdsRouter};

/// Serves RDS calls addressed to `rds[.<region>].amazonaws.com`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RdsHttpService {
    router: RdsRouter,
}

impl RdsHttpService {
    /// Create a service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `host` names an RDS endpoint, and which region it names.
    #[must_use]
    pub fn match_host(&self, host: &str) -> Option<RdsHost> {
        self.router.match_host(host)
    }

    /// Handle one request addressed to a matched RDS host.
    ///
    /// A missing or unknown `Action` is returned as [`UnsupportedOperation`];
    /// everything else produces an XML response.
    pub fn handle(
        &self,
        store: &RegionStore<RdsBackend>,
        network: &dyn SubnetLookup,
        default_region: &AwsRegion,
        host: &RdsHost,
        req: &http::Request<Bytes>,
    ) -> Result<http::Response<Bytes>, UnsupportedOperation> {
        let params = QueryParams::from_request(req);
        let Some(operation) = self.router.resolve(&params) else {
            let action = params.get("Action").unwrap_or("<missing Action>");
            warn!(action, "unsupported RDS action");
            return Err(UnsupportedOperation::new(ServiceName::Rds, action));
        };

        let request_id = Uuid::new_v4().to_string();
        let region = host.region.as_ref().unwrap_or(default_region);
        debug!(operation = %operation, region = %region, request_id, "routed RDS request");

        let result = decode_request(operation, &params).and_then(|request| {
            let output =
                store.with_region(region, |backend| execute(backend, network, request))?;
            output_to_response(operation, &output, &request_id)
        });

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                log_error(&err, &request_id);
                error_to_response(&err, &request_id)
            }
        };
        Ok(add_request_id(response, &request_id))
    }
}

fn log_error(err: &RdsError, request_id: &str) {
    if err.status_code.is_server_error() {
        warn!(code = %err.code, message = %err.message, request_id, "RDS request failed");
    } else {
        debug!(code = %err.code, message = %err.message, request_id, "RDS request rejected");
    }
}
