//! Decoding routed HTTP requests into [`S3Request`] values.

use std::collections::BTreeMap;

use bytes::Bytes;
use http::HeaderMap;
use http::header::{HeaderName, HeaderValue};
use mockstack_s3_model::input::{CopyObjectInput, ListObjectsInput, PutObjectInput};
use mockstack_s3_model::{S3Error, S3ErrorCode, S3Operation, S3Request};

use crate::multipart::PostForm;
use crate::router::{RoutingContext, decode_uri_component};

/// Prefix shared by user metadata headers and form fields.
const META_PREFIX: &str = "x-amz-meta-";

/// Placeholder a POST form key may carry for the uploaded file's name.
const FILENAME_PLACEHOLDER: &str = "${filename}";

/// Decode a routed request into the typed call it makes.
pub fn decode_request(
    ctx: &RoutingContext,
    req: &http::Request<Bytes>,
) -> Result<S3Request, S3Error> {
    let request = match ctx.operation {
        S3Operation::ListBuckets => S3Request::ListBuckets,
        S3Operation::CreateBucket => S3Request::CreateBucket {
            bucket: require_bucket(ctx)?,
        },
        S3Operation::HeadBucket => S3Request::HeadBucket {
            bucket: require_bucket(ctx)?,
        },
        S3Operation::DeleteBucket => S3Request::DeleteBucket {
            bucket: require_bucket(ctx)?,
        },
        S3Operation::ListObjects => S3Request::ListObjects(ListObjectsInput {
            bucket: require_bucket(ctx)?,
            prefix: ctx.query_value("prefix").map(str::to_owned),
            delimiter: ctx.query_value("delimiter").map(str::to_owned),
        }),
        S3Operation::PostObject => S3Request::PostObject(decode_post_object(ctx, req)?),
        S3Operation::PutObject => S3Request::PutObject(PutObjectInput {
            bucket: require_bucket(ctx)?,
            key: require_key(ctx)?,
            body: req.body().clone(),
            content_type: header_str(req.headers(), "content-type").map(str::to_owned),
            metadata: metadata_from_headers(req.headers()),
        }),
        S3Operation::CopyObject => {
            let source = header_str(req.headers(), "x-amz-copy-source")
                .ok_or_else(|| S3Error::invalid_argument("Missing x-amz-copy-source header"))?;
            let (source_bucket, source_key) = parse_copy_source(source)?;
            S3Request::CopyObject(CopyObjectInput {
                source_bucket,
                source_key,
                bucket: require_bucket(ctx)?,
                key: require_key(ctx)?,
            })
        }
        S3Operation::GetObject => S3Request::GetObject {
            bucket: require_bucket(ctx)?,
            key: require_key(ctx)?,
        },
        S3Operation::HeadObject => S3Request::HeadObject {
            bucket: require_bucket(ctx)?,
            key: require_key(ctx)?,
        },
        S3Operation::DeleteObject => S3Request::DeleteObject {
            bucket: require_bucket(ctx)?,
            key: require_key(ctx)?,
        },
    };
    Ok(request)
}

fn require_bucket(ctx: &RoutingContext) -> Result<String, S3Error> {
    ctx.bucket
        .clone()
        .ok_or_else(|| S3Error::with_message(S3ErrorCode::InvalidRequest, "Missing bucket name"))
}

fn require_key(ctx: &RoutingContext) -> Result<String, S3Error> {
    ctx.key
        .clone()
        .ok_or_else(|| S3Error::with_message(S3ErrorCode::InvalidRequest, "Missing object key"))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Collect `x-amz-meta-*` headers into a metadata map keyed by the suffix.
fn metadata_from_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let key = name.as_str().strip_prefix(META_PREFIX)?;
            let value = value.to_str().ok()?;
            Some((key.to_owned(), value.to_owned()))
        })
        .collect()
}

/// Parse an `x-amz-copy-source` value: `bucket/key` or `/bucket/key`,
/// percent-encoded, optionally followed by `?versionId=...`.
fn parse_copy_source(source: &str) -> Result<(String, String), S3Error> {
    let source = source.split_once('?').map_or(source, |(path, _)| path);
    let source = source.strip_prefix('/').unwrap_or(source);
    match source.split_once('/') {
        Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => {
            Ok((decode_uri_component(bucket)?, decode_uri_component(key)?))
        }
        _ => Err(S3Error::invalid_argument(format!(
            "Invalid copy source: {source}"
        ))),
    }
}

/// Decode a browser form upload.
fn decode_post_object(
    ctx: &RoutingContext,
    req: &http::Request<Bytes>,
) -> Result<PutObjectInput, S3Error> {
    let bucket = require_bucket(ctx)?;
    let form = PostForm::parse(header_str(req.headers(), "content-type"), req.body())?;

    let mut key = form
        .fields
        .get("key")
        .cloned()
        .ok_or_else(|| S3Error::invalid_argument("Bucket POST must contain a field named 'key'"))?;
    if let Some(file_name) = &form.file_name {
        key = key.replace(FILENAME_PLACEHOLDER, file_name);
    }

    let metadata: BTreeMap<String, String> = form
        .fields
        .iter()
        .filter_map(|(name, value)| {
            name.strip_prefix(META_PREFIX)
                .map(|k| metadata_entry(name, k, value))
        })
        .collect::<Result<_, S3Error>>()?;
    let content_type = form
        .fields
        .get("content-type")
        .cloned()
        .or(form.file_content_type);
    if let Some(ct) = &content_type {
        HeaderValue::from_str(ct)
            .map_err(|_| S3Error::invalid_argument(format!("Invalid Content-Type: {ct}")))?;
    }

    Ok(PutObjectInput {
        bucket,
        key,
        body: form.file_data.unwrap_or_default(),
        content_type,
        metadata,
    })
}

/// Form fields become response headers later, so both halves must be valid
/// header text.
fn metadata_entry(field: &str, key: &str, value: &str) -> Result<(String, String), S3Error> {
    if key.is_empty() || HeaderName::from_bytes(field.as_bytes()).is_err() {
        return Err(S3Error::invalid_argument(format!(
            "Invalid metadata field name: {field}"
        )));
    }
    HeaderValue::from_str(value).map_err(|_| {
        S3Error::invalid_argument(format!("Invalid value for metadata field {field}"))
    })?;
    Ok((key.to_owned(), value.to_owned()))
}
