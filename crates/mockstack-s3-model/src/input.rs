//! Typed operation inputs decoded from wire requests.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::operations::S3Operation;

/// Input for PutObject and PostObject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutObjectInput {
    /// Target bucket.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Object content.
    pub body: Bytes,
    /// `Content-Type` of the content, if given.
    pub content_type: Option<String>,
    /// User metadata from `x-amz-meta-*` headers or form fields.
    pub metadata: BTreeMap<String, String>,
}

/// Input for CopyObject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyObjectInput {
    /// Source bucket.
    pub source_bucket: String,
    /// Source key.
    pub source_key: String,
    /// Destination bucket.
    pub bucket: String,
    /// Destination key.
    pub key: String,
}

/// Input for ListObjects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectsInput {
    /// Bucket to list.
    pub bucket: String,
    /// Only keys starting with this prefix are listed.
    pub prefix: Option<String>,
    /// Keys containing this after the prefix are collapsed into common prefixes.
    pub delimiter: Option<String>,
}

/// A decoded S3 call: one variant per [`S3Operation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum S3Request {
    /// List every bucket.
    ListBuckets,
    /// Create a bucket.
    CreateBucket {
        /// Bucket name.
        bucket: String,
    },
    /// Check that a bucket exists.
    HeadBucket {
        /// Bucket name.
        bucket: String,
    },
    /// Delete an empty bucket.
    DeleteBucket {
        /// Bucket name.
        bucket: String,
    },
    /// List a bucket's objects.
    ListObjects(ListObjectsInput),
    /// Upload an object through a browser form.
    PostObject(PutObjectInput),
    /// Upload an object.
    PutObject(PutObjectInput),
    /// Copy an object.
    CopyObject(CopyObjectInput),
    /// Read an object.
    GetObject {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
    },
    /// Read an object's headers.
    HeadObject {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
    },
    /// Delete an object.
    DeleteObject {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
    },
}

impl S3Request {
    /// The operation this request invokes.
    #[must_use]
    pub fn operation(&self) -> S3Operation {
        match self {
            Self::ListBuckets => S3Operation::ListBuckets,
            Self::CreateBucket { .. } => S3Operation::CreateBucket,
            Self::HeadBucket { .. } => S3Operation::HeadBucket,
            Self::DeleteBucket { .. } => S3Operation::DeleteBucket,
            Self::ListObjects(_) => S3Operation::ListObjects,
            Self::PostObject(_) => S3Operation::PostObject,
            Self::PutObject(_) => S3Operation::PutObject,
            Self::CopyObject(_) => S3Operation::CopyObject,
            Self::GetObject { .. } => S3Operation::GetObject,
            Self::HeadObject { .. } => S3Operation::HeadObject,
            Self::DeleteObject { .. } => S3Operation::DeleteObject,
        }
    }

    /// The bucket the request addresses, if any.
    #[must_use]
    pub fn bucket(&self) -> Option<&str> {
        match self {
            Self::ListBuckets => None,
            Self::CreateBucket { bucket }
            | Self::HeadBucket { bucket }
            | Self::DeleteBucket { bucket }
            | Self::GetObject { bucket, .. }
            | Self::HeadObject { bucket, .. }
            | Self::DeleteObject { bucket, .. } => Some(bucket),
            Self::ListObjects(input) => Some(&input.bucket),
            Self::PostObject(input) | Self::PutObject(input) => Some(&input.bucket),
            Self::CopyObject(input) => Some(&input.bucket),
        }
    }
}
