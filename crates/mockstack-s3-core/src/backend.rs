//! The object-storage backend for one region partition.

use std::collections::BTreeMap;
use std::sync::Arc;

use bytes::Bytes;
use mockstack_core::{
    AwsRegion, Backend, BackendError, BackendResult, Clock, ResourceKind, ResourceTable,
    ServiceName,
};
use tracing::{debug, info};

use crate::state::{ListResult, S3Bucket, S3Object, list_objects};

/// Bucket and object state for one region.
#[derive(Debug)]
pub struct S3Backend {
    region: AwsRegion,
    clock: Arc<dyn Clock>,
    buckets: ResourceTable<S3Bucket>,
}

impl Backend for S3Backend {
    const SERVICE: ServiceName = ServiceName::S3;

    fn for_region(region: &AwsRegion, clock: Arc<dyn Clock>) -> Self {
        Self {
            region: region.clone(),
            clock,
            buckets: ResourceTable::new(),
        }
    }
}

impl S3Backend {
    /// The region this partition serves.
    #[must_use]
    pub fn region(&self) -> &AwsRegion {
        &self.region
    }

    /// Create an empty bucket.
    pub fn create_bucket(&mut self, name: &str) -> BackendResult<&S3Bucket> {
        let bucket = S3Bucket::new(name, self.region.clone(), self.clock.now());
        let bucket = self.buckets.insert(bucket)?;
        info!(bucket = %name, region = %self.region, "bucket created");
        Ok(bucket)
    }

    /// Delete a bucket. Fails if it still owns any object.
    pub fn delete_bucket(&mut self, name: &str) -> BackendResult<()> {
        let bucket = self.buckets.get(name)?;
        if !bucket.is_empty() {
            return Err(BackendError::precondition_failed(ResourceKind::Bucket, name));
        }
        self.buckets.remove(name)?;
        info!(bucket = %name, "bucket deleted");
        Ok(())
    }

    /// Look up a bucket.
    pub fn get_bucket(&self, name: &str) -> BackendResult<&S3Bucket> {
        self.buckets.get(name)
    }

    /// All buckets, in name order.
    #[must_use]
    pub fn list_buckets(&self) -> Vec<&S3Bucket> {
        self.buckets.iter().collect()
    }

    /// Create or overwrite an object.
    pub fn put_object(
        &mut self,
        bucket: &str,
        key: &str,
        data: Bytes,
        metadata: BTreeMap<String, String>,
        content_type: Option<String>,
    ) -> BackendResult<&S3Object> {
        let now = self.clock.now();
        let bucket_ref = self.buckets.get_mut(bucket)?;
        let object = S3Object::new(key, data, metadata, content_type, now);
        debug!(bucket = %bucket, key = %key, size = object.size(), "object stored");
        Ok(bucket_ref.put_object(object))
    }

    /// Read an object.
    pub fn get_object(&self, bucket: &str, key: &str) -> BackendResult<&S3Object> {
        self.buckets.get(bucket)?.get_object(key)
    }

    /// Delete an object. The bucket is kept even when it becomes empty.
    pub fn delete_object(&mut self, bucket: &str, key: &str) -> BackendResult<S3Object> {
        let removed = self.buckets.get_mut(bucket)?.remove_object(key)?;
        debug!(bucket = %bucket, key = %key, "object deleted");
        Ok(removed)
    }

    /// Copy an object's content and metadata into an independent object.
    pub fn copy_object(
        &mut self,
        src_bucket: &str,
        src_key: &str,
        dst_bucket: &str,
        dst_key: &str,
    ) -> BackendResult<&S3Object> {
        let now = self.clock.now();
        let copy = self
            .buckets
            .get(src_bucket)?
            .get_object(src_key)?
            .copy_to(dst_key, now);
        let dst = self.buckets.get_mut(dst_bucket)?;
        debug!(
            src_bucket = %src_bucket,
            src_key = %src_key,
            dst_bucket = %dst_bucket,
            dst_key = %dst_key,
            "object copied"
        );
        Ok(dst.put_object(copy))
    }

    /// List a bucket's objects with optional prefix and delimiter.
    pub fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        delimiter: Option<&str>,
    ) -> BackendResult<ListResult> {
        let bucket_ref = self.buckets.get(bucket)?;
        let result = list_objects(bucket_ref.objects(), prefix, delimiter);
        debug!(
            bucket = %bucket,
            prefix = ?prefix,
            delimiter = ?delimiter,
            objects = result.objects.len(),
            common_prefixes = result.common_prefixes.len(),
            "objects listed"
        );
        Ok(result)
    }
}
