//! S3 endpoint matching and operation identification.
//!
//! The [`S3Router`] answers two questions about an outbound call:
//!
//! - Does the host name an object-storage endpoint, and if so which region
//!   and (for virtual-hosted style) which bucket? See [`S3Router::match_host`].
//! - Which [`S3Operation`] do the method, path, and headers select? See
//!   [`S3Router::resolve`].
//!
//! Recognized hosts, with `<domain>` = `s3.amazonaws.com` by default:
//!
//! | Host | Region | Bucket |
//! |------|--------|--------|
//! | `s3.amazonaws.com` | default | from path |
//! | `s3.<region>.amazonaws.com` | `<region>` | from path |
//! | `s3-<region>.amazonaws.com` | `<region>` | from path |
//! | `<bucket>.` + any of the above | as above | `<bucket>` |

use std::borrow::Cow;

use http::Method;
use mockstack_core::AwsRegion;
use mockstack_s3_model::{S3Error, S3Operation};
use percent_encoding::percent_decode_str;

/// Host-based S3 endpoint matching and request routing.
#[derive(Debug, Clone)]
pub struct S3Router {
    /// The global endpoint domain (e.g. `s3.amazonaws.com`).
    pub domain: String,
    /// Whether to accept virtual-hosted-style bucket addressing.
    pub virtual_hosting: bool,
}

/// What a matched S3 host tells us.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3Host {
    /// Region named by the host, if any.
    pub region: Option<AwsRegion>,
    /// Bucket named by a virtual-hosted-style host.
    pub bucket: Option<String>,
}

/// The result of routing a request to an S3 operation.
#[derive(Debug, Clone)]
pub struct RoutingContext {
    /// The resolved bucket name, if any.
    pub bucket: Option<String>,
    /// The resolved object key, if any.
    pub key: Option<String>,
    /// The identified S3 operation.
    pub operation: S3Operation,
    /// Parsed query parameters from the request URI.
    pub query_params: Vec<(String, String)>,
}

impl RoutingContext {
    /// Get the value of a query parameter by name.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        query_value(&self.query_params, key)
    }
}

impl S3Router {
    /// Create a new router with the given domain and virtual hosting setting.
    #[must_use]
    pub fn new(domain: impl Into<String>, virtual_hosting: bool) -> Self {
        Self {
            domain: domain.into(),
            virtual_hosting,
        }
    }

    /// Match a `Host` value (port allowed) against the S3 endpoint patterns.
    #[must_use]
    pub fn match_host(&self, host: &str) -> Option<S3Host> {
        let host = strip_port(host).to_ascii_lowercase();
        let domain = self.domain.to_ascii_lowercase();

        if host == domain {
            return Some(S3Host::default());
        }

        // Regional forms hang off the domain with its leading `s3.` removed.
        let base = domain.strip_prefix("s3.");
        let (head, labels) = match base {
            Some(base) => {
                let head = host.strip_suffix(base)?.strip_suffix('.')?;
                (head, head.split('.').collect::<Vec<_>>())
            }
            None => {
                let head = host.strip_suffix(&domain)?.strip_suffix('.')?;
                return self.virtual_host(head, None);
            }
        };

        let n = labels.len();
        let last = labels[n - 1];
        if last == "s3" {
            let bucket = head.strip_suffix("s3").and_then(|b| b.strip_suffix('.'));
            return self.virtual_host_or_plain(bucket, None);
        }
        if let Some(region) = last.strip_prefix("s3-") {
            let bucket = head
                .strip_suffix(last)
                .and_then(|b| b.strip_suffix('.'));
            return self.virtual_host_or_plain(bucket, Some(AwsRegion::new(region)));
        }
        if n >= 2 && labels[n - 2] == "s3" {
            let suffix = format!("s3.{last}");
            let bucket = head
                .strip_suffix(suffix.as_str())
                .and_then(|b| b.strip_suffix('.'));
            return self.virtual_host_or_plain(bucket, Some(AwsRegion::new(last)));
        }
        None
    }

    fn virtual_host_or_plain(
        &self,
        bucket: Option<&str>,
        region: Option<AwsRegion>,
    ) -> Option<S3Host> {
        match bucket {
            Some(bucket) => self.virtual_host(bucket, region),
            None => Some(S3Host {
                region,
                bucket: None,
            }),
        }
    }

    fn virtual_host(&self, bucket: &str, region: Option<AwsRegion>) -> Option<S3Host> {
        if !self.virtual_hosting || bucket.is_empty() {
            return None;
        }
        Some(S3Host {
            region,
            bucket: Some(bucket.to_owned()),
        })
    }

    /// Resolve a request to a routing context, or `None` when no operation is
    /// mapped to its method and path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the bucket, key, or a query component
    /// does not percent-decode to valid UTF-8.
    pub fn resolve<B>(
        &self,
        req: &http::Request<B>,
        host: &S3Host,
    ) -> Result<Option<RoutingContext>, S3Error> {
        let uri = req.uri();
        let path = uri.path();

        let (raw_bucket, raw_key) = match &host.bucket {
            Some(_) => (None, non_empty(path.strip_prefix('/').unwrap_or(path))),
            None => split_path(path),
        };
        let has_bucket = host.bucket.is_some() || raw_bucket.is_some();

        let Some(operation) =
            identify_operation(req.method(), has_bucket, raw_key.is_some(), req.headers())
        else {
            return Ok(None);
        };

        let bucket = match (&host.bucket, raw_bucket) {
            (Some(vhost_bucket), _) => Some(vhost_bucket.clone()),
            (None, raw) => raw.map(decode_uri_component).transpose()?,
        };
        let key = raw_key.map(decode_uri_component).transpose()?;
        let query_params = parse_query_params(uri.query().unwrap_or(""))?;

        Ok(Some(RoutingContext {
            bucket,
            key,
            operation,
            query_params,
        }))
    }
}

/// Strip a `:port` suffix from a host value.
fn strip_port(host: &str) -> &str {
    host.rsplit_once(':')
        .filter(|(_, port)| port.chars().all(|c| c.is_ascii_digit()))
        .map_or(host, |(h, _)| h)
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

/// Split the URI path into an optional raw bucket and optional raw key.
///
/// Path format: `/{bucket}` or `/{bucket}/{key...}`
fn split_path(path: &str) -> (Option<&str>, Option<&str>) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    match trimmed.split_once('/') {
        Some((bucket, key)) => (non_empty(bucket), non_empty(key)),
        None => (non_empty(trimmed), None),
    }
}

/// Decode a percent-encoded URI component.
///
/// Names are kept byte-exact, so sequences that are not valid UTF-8 are
/// rejected rather than replaced.
pub(crate) fn decode_uri_component(s: &str) -> Result<String, S3Error> {
    percent_decode_str(s)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| S3Error::invalid_argument(format!("Invalid UTF-8 in encoded value: {s}")))
}

/// Parse a query string into key-value pairs.
fn parse_query_params(query: &str) -> Result<Vec<(String, String)>, S3Error> {
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => Ok((decode_query_component(k)?, decode_query_component(v)?)),
            None => Ok((decode_query_component(pair)?, String::new())),
        })
        .collect()
}

/// Decode a query component, where `+` stands for a space.
fn decode_query_component(s: &str) -> Result<String, S3Error> {
    decode_uri_component(&s.replace('+', " "))
}

/// Get the value of a query parameter by name.
fn query_value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Identify the S3 operation from the method and the path structure.
fn identify_operation(
    method: &Method,
    has_bucket: bool,
    has_key: bool,
    headers: &http::HeaderMap,
) -> Option<S3Operation> {
    match (method, has_bucket, has_key) {
        (&Method::GET, false, false) => Some(S3Operation::ListBuckets),
        (method, true, false) => match *method {
            Method::GET => Some(S3Operation::ListObjects),
            Method::PUT => Some(S3Operation::CreateBucket),
            Method::HEAD => Some(S3Operation::HeadBucket),
            Method::DELETE => Some(S3Operation::DeleteBucket),
            Method::POST => Some(S3Operation::PostObject),
            _ => None,
        },
        (method, true, true) => match *method {
            Method::PUT if headers.contains_key("x-amz-copy-source") => {
                Some(S3Operation::CopyObject)
            }
            Method::PUT => Some(S3Operation::PutObject),
            Method::GET => Some(S3Operation::GetObject),
            Method::HEAD => Some(S3Operation::HeadObject),
            Method::DELETE => Some(S3Operation::DeleteObject),
            _ => None,
        },
        _ => None,
    }
}
