//! S3 XML documents.
//!
//! Rendering follows the RestXml conventions of the real service:
//!
//! - Namespace: `http://s3.amazonaws.com/doc/2006-03-01/`
//! - Booleans: lowercase `true`/`false`
//! - Timestamps: ISO 8601 with milliseconds (`2012-01-01T12:00:00.000Z`)
//! - XML declaration: `<?xml version="1.0" encoding="UTF-8"?>`

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use mockstack_s3_core::{ListResult, Owner};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use crate::dispatch::BucketSummary;

/// The S3 XML namespace.
pub const S3_NAMESPACE: &str = "http://s3.amazonaws.com/doc/2006-03-01/";

/// Page size reported in listings. Listings are never truncated.
const MAX_KEYS: &str = "1000";

/// Errors that can occur while writing XML.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),
}

/// Format an instant the way XML bodies carry it.
#[must_use]
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Write a simple `<tag>text</tag>` element.
fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

fn write_owner<W: Write>(writer: &mut Writer<W>, owner: &Owner) -> io::Result<()> {
    writer.create_element("Owner").write_inner_content(|w| {
        write_text_element(w, "ID", &owner.id)?;
        write_text_element(w, "DisplayName", &owner.display_name)?;
        Ok(())
    })?;
    Ok(())
}

/// Write a document whose root carries the S3 namespace.
fn document<F>(root: &str, content: F) -> Result<Vec<u8>, XmlError>
where
    F: FnOnce(&mut Writer<&mut Vec<u8>>) -> io::Result<()>,
{
    let mut buf = Vec::with_capacity(512);
    let mut writer = Writer::new(&mut buf);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer
        .create_element(root)
        .with_attribute(("xmlns", S3_NAMESPACE))
        .write_inner_content(content)?;
    Ok(buf)
}

/// Render `ListAllMyBucketsResult`.
pub fn list_buckets_xml(owner: &Owner, buckets: &[BucketSummary]) -> Result<Vec<u8>, XmlError> {
    document("ListAllMyBucketsResult", |w| {
        write_owner(w, owner)?;
        w.create_element("Buckets").write_inner_content(|w| {
            for bucket in buckets {
                w.create_element("Bucket").write_inner_content(|w| {
                    write_text_element(w, "Name", &bucket.name)?;
                    write_text_element(w, "CreationDate", &format_timestamp(&bucket.creation_date))?;
                    Ok(())
                })?;
            }
            Ok(())
        })?;
        Ok(())
    })
}

/// Render `ListBucketResult`: `Contents` entries followed by `CommonPrefixes`.
pub fn list_objects_xml(
    bucket: &str,
    prefix: Option<&str>,
    delimiter: Option<&str>,
    owner: &Owner,
    result: &ListResult,
) -> Result<Vec<u8>, XmlError> {
    document("ListBucketResult", |w| {
        write_text_element(w, "Name", bucket)?;
        write_text_element(w, "Prefix", prefix.unwrap_or(""))?;
        write_text_element(w, "Marker", "")?;
        write_text_element(w, "MaxKeys", MAX_KEYS)?;
        if let Some(delimiter) = delimiter {
            write_text_element(w, "Delimiter", delimiter)?;
        }
        write_text_element(w, "IsTruncated", "false")?;
        for obj in &result.objects {
            w.create_element("Contents").write_inner_content(|w| {
                write_text_element(w, "Key", &obj.key)?;
                write_text_element(w, "LastModified", &format_timestamp(&obj.last_modified))?;
                write_text_element(w, "ETag", &obj.etag)?;
                write_text_element(w, "Size", &obj.size().to_string())?;
                write_text_element(w, "StorageClass", "STANDARD")?;
                write_owner(w, owner)?;
                Ok(())
            })?;
        }
        for prefix in &result.common_prefixes {
            w.create_element("CommonPrefixes")
                .write_inner_content(|w| write_text_element(w, "Prefix", prefix))?;
        }
        Ok(())
    })
}

/// Render `CopyObjectResult`.
pub fn copy_object_xml(etag: &str, last_modified: &DateTime<Utc>) -> Result<Vec<u8>, XmlError> {
    document("CopyObjectResult", |w| {
        write_text_element(w, "LastModified", &format_timestamp(last_modified))?;
        write_text_element(w, "ETag", etag)?;
        Ok(())
    })
}

/// Format an S3 error as XML.
///
/// S3 errors are a flat `<Error>` element without a namespace or wrapper.
#[must_use]
pub fn error_to_xml(
    code: &str,
    message: &str,
    resource: Option<&str>,
    request_id: &str,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(256);
    if let Err(e) = write_error_xml(&mut buf, code, message, resource, request_id) {
        tracing::error!(error = %e, "failed to serialize S3 error XML");
        buf.clear();
    }
    buf
}

fn write_error_xml(
    buf: &mut Vec<u8>,
    code: &str,
    message: &str,
    resource: Option<&str>,
    request_id: &str,
) -> io::Result<()> {
    let mut writer = Writer::new(buf);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.create_element("Error").write_inner_content(|w| {
        write_text_element(w, "Code", code)?;
        write_text_element(w, "Message", message)?;
        if let Some(res) = resource {
            write_text_element(w, "Resource", res)?;
        }
        write_text_element(w, "RequestId", request_id)?;
        Ok(())
    })?;
    Ok(())
}
