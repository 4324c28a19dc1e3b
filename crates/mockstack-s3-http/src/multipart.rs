//! Form parsing for browser-based POST uploads.
//!
//! A POST to a bucket carries the object key, content, and metadata as form
//! fields, either `multipart/form-data` (what browsers send) or
//! `application/x-www-form-urlencoded` (what simple HTTP clients send when
//! given a plain field map). Both are parsed here into a [`PostForm`].

use std::collections::HashMap;

use bytes::Bytes;
use mockstack_s3_model::S3Error;

/// A parsed POST upload form.
#[derive(Debug, Default)]
pub struct PostForm {
    /// Non-file form fields (name → value). Names are lower-cased.
    pub fields: HashMap<String, String>,
    /// The `file` field content.
    pub file_data: Option<Bytes>,
    /// The Content-Type of the file part, if specified.
    pub file_content_type: Option<String>,
    /// The client-side file name of the file part, if specified.
    pub file_name: Option<String>,
}

impl PostForm {
    /// Parse a form body according to its `Content-Type`.
    pub fn parse(content_type: Option<&str>, body: &[u8]) -> Result<Self, S3Error> {
        match content_type {
            Some(ct) if ct.to_ascii_lowercase().starts_with("multipart/form-data") => {
                let boundary = extract_boundary(ct)?;
                parse_multipart(body, &boundary)
            }
            _ => Ok(parse_urlencoded(body)),
        }
    }
}

/// Parse an `application/x-www-form-urlencoded` body.
///
/// The `file` field's value becomes the file data.
fn parse_urlencoded(body: &[u8]) -> PostForm {
    let mut form = PostForm::default();
    for (name, value) in form_urlencoded::parse(body) {
        if name == "file" {
            form.file_data = Some(Bytes::from(value.into_owned()));
        } else {
            form.fields
                .insert(name.to_ascii_lowercase(), value.into_owned());
        }
    }
    form
}

/// Extract the boundary string from a `multipart/form-data; boundary=...` value.
pub fn extract_boundary(content_type: &str) -> Result<String, S3Error> {
    let boundary = content_type
        .split(';')
        .find_map(|part| {
            let (name, value) = part.trim().split_once('=')?;
            name.eq_ignore_ascii_case("boundary")
                .then(|| value.trim_matches('"').to_owned())
        })
        .ok_or_else(|| S3Error::malformed_post_request("Missing boundary in Content-Type"))?;

    if boundary.is_empty() {
        return Err(S3Error::malformed_post_request(
            "Empty boundary in Content-Type",
        ));
    }
    Ok(boundary)
}

/// Parse a `multipart/form-data` body.
pub fn parse_multipart(body: &[u8], boundary: &str) -> Result<PostForm, S3Error> {
    let delimiter = format!("--{boundary}");
    let mut form = PostForm::default();

    let parts = split_multipart_parts(body, delimiter.as_bytes());
    if parts.is_empty() {
        return Err(S3Error::malformed_post_request(
            "No parts found in multipart body",
        ));
    }

    for part in parts {
        let Some((headers, part_body)) = split_headers_body(part) else {
            continue;
        };
        let headers = String::from_utf8_lossy(headers);
        let disposition = parse_content_disposition(&headers);
        let Some(name) = disposition.name else {
            continue;
        };

        if name.eq_ignore_ascii_case("file") || disposition.filename.is_some() {
            form.file_content_type = header_value(&headers, "content-type");
            form.file_name = disposition.filename;
            form.file_data = Some(Bytes::copy_from_slice(part_body));
        } else {
            let value = String::from_utf8_lossy(part_body).into_owned();
            form.fields.insert(name.to_ascii_lowercase(), value);
        }
    }

    Ok(form)
}

/// Split the body into parts, dropping the preamble and the closing delimiter.
fn split_multipart_parts<'a>(body: &'a [u8], delimiter: &[u8]) -> Vec<&'a [u8]> {
    let mut parts = Vec::new();
    let Some(start) = find_bytes(body, delimiter) else {
        return parts;
    };
    let mut remaining = &body[start + delimiter.len()..];

    loop {
        if remaining.starts_with(b"--") {
            break;
        }
        remaining = skip_crlf(remaining);
        match find_bytes(remaining, delimiter) {
            Some(pos) => {
                parts.push(strip_trailing_crlf(&remaining[..pos]));
                remaining = &remaining[pos + delimiter.len()..];
            }
            None => {
                let part = strip_trailing_crlf(remaining);
                if !part.is_empty() {
                    parts.push(part);
                }
                break;
            }
        }
    }

    parts
}

/// Split a part into headers and body at the first blank line.
fn split_headers_body(part: &[u8]) -> Option<(&[u8], &[u8])> {
    let separator = b"\r\n\r\n";
    find_bytes(part, separator).map(|pos| (&part[..pos], &part[pos + separator.len()..]))
}

#[derive(Debug, Default)]
struct ContentDisposition {
    name: Option<String>,
    filename: Option<String>,
}

fn parse_content_disposition(headers: &str) -> ContentDisposition {
    let mut disposition = ContentDisposition::default();
    let Some(value) = header_value(headers, "content-disposition") else {
        return disposition;
    };

    for param in value.split(';').skip(1) {
        let Some((name, raw)) = param.trim().split_once('=') else {
            continue;
        };
        let unquoted = raw.trim().trim_matches('"').to_owned();
        if name.eq_ignore_ascii_case("name") {
            disposition.name = Some(unquoted);
        } else if name.eq_ignore_ascii_case("filename") {
            disposition.filename = Some(unquoted);
        }
    }
    disposition
}

/// Find a header in a part's header block, case-insensitively.
fn header_value(headers: &str, name: &str) -> Option<String> {
    headers.split("\r\n").find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim().to_owned())
    })
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn skip_crlf(data: &[u8]) -> &[u8] {
    data.strip_prefix(b"\r\n").unwrap_or(data)
}

fn strip_trailing_crlf(data: &[u8]) -> &[u8] {
    data.strip_suffix(b"\r\n").unwrap_or(data)
}
