//! Rendering [`S3Output`] values and [`S3Error`]s as HTTP responses.
//!
//! Response categories:
//! - **Header-only**: bucket creation, existence checks, uploads and deletes.
//! - **XML body**: bucket and object listings, copy results, errors.
//! - **Object body**: `GetObject` returns the stored bytes; `HeadObject` the
//!   same headers with an empty body.

use std::collections::BTreeMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::StatusCode;
use http::header::{HeaderName, HeaderValue};
use mockstack_s3_core::S3Object;
use mockstack_s3_model::{S3Error, S3ErrorCode};

use crate::dispatch::S3Output;
use crate::xml::{
    XmlError, copy_object_xml, error_to_xml, list_buckets_xml, list_objects_xml,
};

/// Content type reported for objects stored without one.
pub const DEFAULT_CONTENT_TYPE: &str = "binary/octet-stream";

/// Content type of XML bodies.
const XML_CONTENT_TYPE: &str = "application/xml";

/// Format an instant the way HTTP date headers carry it.
#[must_use]
pub fn format_http_date(dt: &DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Set a header on a response builder if the value is `Some` and valid.
fn set_optional_header(
    builder: http::response::Builder,
    name: &str,
    value: Option<&str>,
) -> http::response::Builder {
    if let Some(v) = value {
        if let Ok(hv) = HeaderValue::from_str(v) {
            return builder.header(name, hv);
        }
    }
    builder
}

/// Set `x-amz-meta-*` headers from an object's metadata.
fn set_metadata_headers(
    mut builder: http::response::Builder,
    metadata: &BTreeMap<String, String>,
) -> http::response::Builder {
    for (key, value) in metadata {
        let name = HeaderName::from_bytes(format!("x-amz-meta-{key}").as_bytes());
        if let (Ok(name), Ok(hv)) = (name, HeaderValue::from_str(value)) {
            builder = builder.header(name, hv);
        }
    }
    builder
}

/// Build a response from a builder, converting build errors to `S3Error`.
fn build_response(
    builder: http::response::Builder,
    body: Bytes,
) -> Result<http::Response<Bytes>, S3Error> {
    builder.body(body).map_err(|e| {
        S3Error::with_message(
            S3ErrorCode::InternalError,
            format!("failed to build HTTP response: {e}"),
        )
    })
}

fn xml_response(xml: Result<Vec<u8>, XmlError>) -> Result<http::Response<Bytes>, S3Error> {
    let xml = xml.map_err(|e| {
        S3Error::with_message(
            S3ErrorCode::InternalError,
            format!("failed to serialize XML: {e}"),
        )
    })?;
    let builder = http::Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", XML_CONTENT_TYPE);
    build_response(builder, Bytes::from(xml))
}

fn empty_response(status: StatusCode) -> Result<http::Response<Bytes>, S3Error> {
    build_response(http::Response::builder().status(status), Bytes::new())
}

fn object_response(object: S3Object, head_only: bool) -> Result<http::Response<Bytes>, S3Error> {
    let mut builder = http::Response::builder()
        .status(StatusCode::OK)
        .header("Content-Length", object.size())
        .header(
            "Content-Type",
            object
                .content_type
                .as_deref()
                .and_then(|ct| HeaderValue::from_str(ct).ok())
                .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE)),
        )
        .header("Last-Modified", format_http_date(&object.last_modified));
    builder = set_optional_header(builder, "ETag", Some(&object.etag));
    builder = set_metadata_headers(builder, &object.metadata);
    let body = if head_only { Bytes::new() } else { object.data };
    build_response(builder, body)
}

/// Convert a successful outcome into its HTTP response.
pub fn output_to_response(output: S3Output) -> Result<http::Response<Bytes>, S3Error> {
    match output {
        S3Output::Buckets { owner, buckets } => xml_response(list_buckets_xml(&owner, &buckets)),
        S3Output::BucketCreated { bucket } => {
            let location = format!("/{bucket}");
            let builder = set_optional_header(
                http::Response::builder().status(StatusCode::OK),
                "Location",
                Some(&location),
            );
            build_response(builder, Bytes::new())
        }
        S3Output::BucketExists => empty_response(StatusCode::OK),
        S3Output::Listing {
            bucket,
            prefix,
            delimiter,
            owner,
            result,
        } => xml_response(list_objects_xml(
            &bucket,
            prefix.as_deref(),
            delimiter.as_deref(),
            &owner,
            &result,
        )),
        S3Output::Stored { etag } => {
            let builder = set_optional_header(
                http::Response::builder().status(StatusCode::OK),
                "ETag",
                Some(&etag),
            );
            build_response(builder, Bytes::new())
        }
        S3Output::FormStored | S3Output::Deleted => empty_response(StatusCode::NO_CONTENT),
        S3Output::Copied {
            etag,
            last_modified,
        } => xml_response(copy_object_xml(&etag, &last_modified)),
        S3Output::Object { object, head_only } => object_response(object, head_only),
    }
}

/// Convert an `S3Error` into an HTTP response with an XML error body.
///
/// Answers to `HEAD` carry the status alone.
#[must_use]
pub fn error_to_response(
    err: &S3Error,
    request_id: &str,
    head_only: bool,
) -> http::Response<Bytes> {
    if head_only {
        let mut response = http::Response::new(Bytes::new());
        *response.status_mut() = err.status_code;
        return response;
    }

    let xml = error_to_xml(
        err.code.as_str(),
        &err.message,
        err.resource.as_deref(),
        request_id,
    );

    let mut response = http::Response::new(Bytes::from(xml));
    *response.status_mut() = err.status_code;
    response
        .headers_mut()
        .insert("Content-Type", HeaderValue::from_static(XML_CONTENT_TYPE));
    response
}

/// Stamp the request id every response carries.
pub fn add_request_id<B>(mut response: http::Response<B>, request_id: &str) -> http::Response<B> {
    if let Ok(hv) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert("x-amz-request-id", hv.clone());
        response.headers_mut().insert("x-amz-id-2", hv);
    }
    response
}
