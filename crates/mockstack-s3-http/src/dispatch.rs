//! Executing decoded requests against a region's [`S3Backend`].

use chrono::{DateTime, Utc};
use mockstack_s3_core::{ListResult, Owner, S3Backend, S3Object};
use mockstack_s3_model::{S3Error, S3Request};

/// A bucket as it appears in a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSummary {
    /// Bucket name.
    pub name: String,
    /// When the bucket was created.
    pub creation_date: DateTime<Utc>,
}

/// The outcome of a successful S3 call, detached from backend state.
#[derive(Debug, Clone)]
pub enum S3Output {
    /// All buckets in the partition.
    Buckets {
        /// Owner reported for the account.
        owner: Owner,
        /// Buckets in name order.
        buckets: Vec<BucketSummary>,
    },
    /// A bucket was created.
    BucketCreated {
        /// Bucket name.
        bucket: String,
    },
    /// The bucket exists.
    BucketExists,
    /// A listing of one bucket.
    Listing {
        /// Bucket name.
        bucket: String,
        /// Prefix as given.
        prefix: Option<String>,
        /// Delimiter as given.
        delimiter: Option<String>,
        /// Owner reported on each entry.
        owner: Owner,
        /// Matching objects and common prefixes.
        result: ListResult,
    },
    /// An object was stored by a plain upload.
    Stored {
        /// Entity tag of the new content.
        etag: String,
    },
    /// An object was stored by a form upload.
    FormStored,
    /// An object was copied.
    Copied {
        /// Entity tag of the copy.
        etag: String,
        /// Modification time of the copy.
        last_modified: DateTime<Utc>,
    },
    /// An object's content and headers.
    Object {
        /// The object.
        object: S3Object,
        /// Whether only the headers are wanted.
        head_only: bool,
    },
    /// A bucket or object was deleted.
    Deleted,
}

/// Run one request against the backend.
pub fn execute(backend: &mut S3Backend, request: S3Request) -> Result<S3Output, S3Error> {
    let output = match request {
        S3Request::ListBuckets => S3Output::Buckets {
            owner: Owner::default(),
            buckets: backend
                .list_buckets()
                .into_iter()
                .map(|b| BucketSummary {
                    name: b.name.clone(),
                    creation_date: b.creation_date,
                })
                .collect(),
        },
        S3Request::CreateBucket { bucket } => {
            backend.create_bucket(&bucket)?;
            S3Output::BucketCreated { bucket }
        }
        S3Request::HeadBucket { bucket } => {
            backend.get_bucket(&bucket)?;
            S3Output::BucketExists
        }
        S3Request::DeleteBucket { bucket } => {
            backend.delete_bucket(&bucket)?;
            S3Output::Deleted
        }
        S3Request::ListObjects(input) => {
            let result = backend.list_objects(
                &input.bucket,
                input.prefix.as_deref(),
                input.delimiter.as_deref(),
            )?;
            let owner = backend
                .get_bucket(&input.bucket)
                .map(|b| b.owner.clone())
                .unwrap_or_default();
            S3Output::Listing {
                bucket: input.bucket,
                prefix: input.prefix,
                delimiter: input.delimiter,
                owner,
                result,
            }
        }
        S3Request::PutObject(input) => {
            let object = backend.put_object(
                &input.bucket,
                &input.key,
                input.body,
                input.metadata,
                input.content_type,
            )?;
            S3Output::Stored {
                etag: object.etag.clone(),
            }
        }
        S3Request::PostObject(input) => {
            backend.put_object(
                &input.bucket,
                &input.key,
                input.body,
                input.metadata,
                input.content_type,
            )?;
            S3Output::FormStored
        }
        S3Request::CopyObject(input) => {
            let copy = backend.copy_object(
                &input.source_bucket,
                &input.source_key,
                &input.bucket,
                &input.key,
            )?;
            S3Output::Copied {
                etag: copy.etag.clone(),
                last_modified: copy.last_modified,
            }
        }
        S3Request::GetObject { bucket, key } => S3Output::Object {
            object: backend.get_object(&bucket, &key)?.clone(),
            head_only: false,
        },
        S3Request::HeadObject { bucket, key } => S3Output::Object {
            object: backend.get_object(&bucket, &key)?.clone(),
            head_only: true,
        },
        S3Request::DeleteObject { bucket, key } => {
            backend.delete_object(&bucket, &key)?;
            S3Output::Deleted
        }
    };
    Ok(output)
}
