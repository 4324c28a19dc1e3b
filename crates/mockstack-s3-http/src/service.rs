//! The S3 wire service.
//!
//! [`S3HttpService`] ties together routing, request decoding, dispatch, and
//! response rendering for one buffered request:
//!
//! 1. Operation identification via [`S3Router`]
//! 2. Request decoding into an [`S3Request`](mockstack_s3_model::S3Request)
//! 3. Execution against the region's [`S3Backend`]
//! 4. Response rendering, or an XML error document on failure
//! 5. The `x-amz-request-id` header on every response

use bytes::Bytes;
use http::Method;
use mockstack_core::{AwsRegion, MockStackConfig, RegionStore, ServiceName, UnsupportedOperation};
use mockstack_s3_core::S3Backend;
use mockstack_s3_model::S3Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::dispatch::execute;
use crate::request::decode_request;
use crate::response::{add_request_id, error_to_response, output_to_response};
use crate::router::{S3Host, S3Router};

/// Serves S3 calls addressed to the configured endpoint domain.
#[derive(Debug, Clone)]
pub struct S3HttpService {
    router: S3Router,
}

impl S3HttpService {
    /// Create a service with the given router.
    #[must_use]
    pub fn new(router: S3Router) -> Self {
        Self { router }
    }

    /// Create a service from the shared configuration.
    #[must_use]
    pub fn from_config(config: &MockStackConfig) -> Self {
        Self::new(S3Router::new(&config.s3_domain, config.s3_virtual_hosting))
    }

    /// Whether `host` names an S3 endpoint, and what it tells us.
    #[must_use]
    pub fn match_host(&self, host: &str) -> Option<S3Host> {
        self.router.match_host(host)
    }

    /// Handle one request addressed to a matched S3 host.
    ///
    /// Domain failures become XML error responses, or a bare status for
    /// `HEAD`. A method and path with no mapped operation is returned as
    /// [`UnsupportedOperation`].
    pub fn handle(
        &self,
        store: &RegionStore<S3Backend>,
        default_region: &AwsRegion,
        host: &S3Host,
        req: &http::Request<Bytes>,
    ) -> Result<http::Response<Bytes>, UnsupportedOperation> {
        let request_id = Uuid::new_v4().to_string();
        let head_only = req.method() == Method::HEAD;

        let ctx = match self.router.resolve(req, host) {
            Ok(Some(ctx)) => ctx,
            Ok(None) => {
                warn!(method = %req.method(), uri = %req.uri(), "unsupported S3 request");
                return Err(UnsupportedOperation::new(
                    ServiceName::S3,
                    format!("{} {}", req.method(), req.uri().path()),
                ));
            }
            Err(err) => {
                log_error(&err, &request_id);
                let response = error_to_response(&err, &request_id, head_only);
                return Ok(add_request_id(response, &request_id));
            }
        };

        let region = host.region.as_ref().unwrap_or(default_region);
        debug!(
            operation = %ctx.operation,
            bucket = ?ctx.bucket,
            key = ?ctx.key,
            region = %region,
            request_id,
            "routed S3 request"
        );

        let result = decode_request(&ctx, req).and_then(|request| {
            let output = store.with_region(region, |backend| execute(backend, request))?;
            output_to_response(output)
        });

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                log_error(&err, &request_id);
                error_to_response(&err, &request_id, head_only)
            }
        };
        Ok(add_request_id(response, &request_id))
    }
}

fn log_error(err: &S3Error, request_id: &str) {
    if err.status_code.is_server_error() {
        warn!(code = %err.code, message = %err.message, request_id, "S3 request failed");
    } else {
        debug!(code = %err.code, message = %err.message, request_id, "S3 request rejected");
    }
}
