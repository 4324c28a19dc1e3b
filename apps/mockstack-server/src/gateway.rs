//! Gateway service that hands socket traffic to the mock.
//!
//! Requests addressed to a provider endpoint (`s3.amazonaws.com`,
//! `rds.us-west-2.amazonaws.com`, ...) are routed by host. Requests addressed
//! to the server itself (one of `LOCAL_HOSTS`) go to RDS when they carry an
//! `Action` parameter and to S3 otherwise, with the region read from the
//! SigV4 credential scope.
//!
//! `GET /_mockstack/health` is answered at the gateway level.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::Service;
use mockstack::{ActivationGuard, InterceptError, Route};
use mockstack_core::AwsRegion;
use mockstack_rds_http::QueryParams;
use tracing::{debug, warn};

/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/_mockstack/health";

/// Response body type produced by the gateway.
pub type GatewayBody = Full<Bytes>;

/// Routes HTTP requests into a live activation.
#[derive(Debug, Clone)]
pub struct GatewayService {
    guard: Arc<ActivationGuard>,
    local_hosts: Arc<Vec<String>>,
}

impl GatewayService {
    /// Create a gateway over `guard`, treating `local_hosts` as our own names.
    pub fn new(guard: ActivationGuard, local_hosts: Vec<String>) -> Self {
        Self {
            guard: Arc::new(guard),
            local_hosts: Arc::new(
                local_hosts
                    .into_iter()
                    .map(|h| h.to_ascii_lowercase())
                    .collect(),
            ),
        }
    }

    /// Answer one fully buffered request.
    pub fn respond(&self, req: &http::Request<Bytes>) -> http::Response<Bytes> {
        if is_health_check(req.method(), req.uri().path()) {
            return health_check_response();
        }
        let result = self.route(req).and_then(|route| {
            self.guard
                .dispatch(&route, req)
                .map_err(InterceptError::from)
        });
        match result {
            Ok(resp) => resp,
            Err(err) => fault_response(&err),
        }
    }

    fn route(&self, req: &http::Request<Bytes>) -> Result<Route, InterceptError> {
        let host = request_host(req).ok_or(InterceptError::MissingHost)?;
        if let Some(route) = self.guard.interceptor().route(host) {
            return Ok(route);
        }
        if !self.is_local(host) {
            return Err(InterceptError::NotIntercepted {
                host: host.to_owned(),
            });
        }
        let region = credential_region(req);
        if QueryParams::from_request(req).get("Action").is_some() {
            Ok(Route::rds(region))
        } else {
            Ok(Route::s3(region))
        }
    }

    fn is_local(&self, host: &str) -> bool {
        let name = host
            .rsplit_once(':')
            .filter(|(_, port)| port.bytes().all(|b| b.is_ascii_digit()))
            .map_or(host, |(name, _)| name)
            .to_ascii_lowercase();
        self.local_hosts.iter().any(|h| *h == name)
    }
}

impl Service<http::Request<Incoming>> for GatewayService {
    type Response = http::Response<GatewayBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let gateway = self.clone();
        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let body = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(e) => {
                    warn!(error = %e, "failed to read request body");
                    return Ok(plain_response(
                        StatusCode::BAD_REQUEST,
                        format!("failed to read request body: {e}"),
                    )
                    .map(Full::new));
                }
            };
            let req = http::Request::from_parts(parts, body);
            Ok(gateway.respond(&req).map(Full::new))
        })
    }
}

fn request_host(req: &http::Request<Bytes>) -> Option<&str> {
    req.headers()
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().authority().map(http::uri::Authority::as_str))
}

/// Region from the SigV4 credential scope
/// (`<key>/<date>/<region>/<service>/aws4_request`), taken from the
/// `Authorization` header or a presigned `X-Amz-Credential` parameter.
fn credential_region<B>(req: &http::Request<B>) -> Option<AwsRegion> {
    let from_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| {
            let (_, rest) = auth.split_once("Credential=")?;
            Some(rest.split(',').next().unwrap_or(rest).trim().to_owned())
        });
    let credential = from_header.or_else(|| {
        form_urlencoded::parse(req.uri().query()?.as_bytes())
            .find(|(k, _)| k.eq_ignore_ascii_case("X-Amz-Credential"))
            .map(|(_, v)| v.into_owned())
    })?;
    let region = credential.split('/').nth(2)?;
    (!region.is_empty()).then(|| AwsRegion::new(region))
}

fn is_health_check(method: &http::Method, path: &str) -> bool {
    *method == http::Method::GET && path == HEALTH_PATH
}

fn health_check_response() -> http::Response<Bytes> {
    let body = serde_json::json!({
        "services": { "s3": "running", "rds": "running" },
        "version": crate::VERSION,
    });
    let mut resp = http::Response::new(Bytes::from(body.to_string()));
    resp.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    resp
}

fn fault_response(err: &InterceptError) -> http::Response<Bytes> {
    let status = match err {
        InterceptError::Unsupported(_) => StatusCode::NOT_IMPLEMENTED,
        InterceptError::NotIntercepted { .. } => StatusCode::BAD_GATEWAY,
        InterceptError::MissingHost => StatusCode::BAD_REQUEST,
    };
    debug!(status = %status, error = %err, "gateway fault");
    plain_response(status, err.to_string())
}

fn plain_response(status: StatusCode, message: String) -> http::Response<Bytes> {
    let mut resp = http::Response::new(Bytes::from(message));
    *resp.status_mut() = status;
    resp.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    resp
}
