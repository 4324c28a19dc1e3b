//! S3 object and owner types.

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::checksums::compute_etag;

/// The owner reported for every bucket and object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// The canonical user ID of the owner.
    pub id: String,
    /// The display name of the owner.
    pub display_name: String,
}

impl Default for Owner {
    fn default() -> Self {
        Self {
            id: "75aa57f09aa0c8caeab4f8c24e99d10f8e7faeebf76c078efc7c6caea54ba06a".to_owned(),
            display_name: "webfile".to_owned(),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.display_name, self.id)
    }
}

/// A stored object.
///
/// Content is held in immutable [`Bytes`]; an overwrite replaces the whole
/// value, and a copy is a separate `S3Object` that shares no mutable state
/// with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Object {
    /// Object key.
    pub key: String,
    /// Object content. May be empty.
    pub data: Bytes,
    /// User metadata, keyed by the lower-cased name after `x-amz-meta-`.
    pub metadata: BTreeMap<String, String>,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    /// Quoted hex MD5 of `data`.
    pub etag: String,
    /// Last write time.
    pub last_modified: DateTime<Utc>,
}

impl S3Object {
    /// Build an object, computing its checksum.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        data: Bytes,
        metadata: BTreeMap<String, String>,
        content_type: Option<String>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        let etag = compute_etag(&data);
        Self {
            key: key.into(),
            data,
            metadata,
            content_type,
            etag,
            last_modified,
        }
    }

    /// Content length in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// A copy of this object stored under `key` and written at `now`.
    #[must_use]
    pub fn copy_to(&self, key: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            data: self.data.clone(),
            metadata: self.metadata.clone(),
            content_type: self.content_type.clone(),
            etag: self.etag.clone(),
            last_modified: now,
        }
    }
}
