//! S3 bucket data structure.
//!
//! An [`S3Bucket`] owns its objects in a `BTreeMap`, so iteration is always in
//! ascending byte order of the key. Listing relies on that order.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mockstack_core::{AwsRegion, BackendError, BackendResult, Resource, ResourceKind};

use super::object::{Owner, S3Object};

/// A bucket and the objects it owns.
#[derive(Debug, Clone)]
pub struct S3Bucket {
    /// Bucket name.
    pub name: String,
    /// Region the bucket was created in.
    pub region: AwsRegion,
    /// Creation time.
    pub creation_date: DateTime<Utc>,
    /// Bucket owner.
    pub owner: Owner,
    objects: BTreeMap<String, S3Object>,
}

impl Resource for S3Bucket {
    const KIND: ResourceKind = ResourceKind::Bucket;

    fn name(&self) -> &str {
        &self.name
    }
}

impl S3Bucket {
    /// Create an empty bucket.
    #[must_use]
    pub fn new(name: impl Into<String>, region: AwsRegion, creation_date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            region,
            creation_date,
            owner: Owner::default(),
            objects: BTreeMap::new(),
        }
    }

    /// Whether the bucket owns no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of objects in the bucket.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Look up an object.
    pub fn get_object(&self, key: &str) -> BackendResult<&S3Object> {
        self.objects
            .get(key)
            .ok_or_else(|| BackendError::not_found(ResourceKind::Object, key))
    }

    /// Store an object, replacing any previous object under the same key.
    pub fn put_object(&mut self, object: S3Object) -> &S3Object {
        let key = object.key.clone();
        self.objects.insert(key.clone(), object);
        &self.objects[&key]
    }

    /// Remove an object.
    pub fn remove_object(&mut self, key: &str) -> BackendResult<S3Object> {
        self.objects
            .remove(key)
            .ok_or_else(|| BackendError::not_found(ResourceKind::Object, key))
    }

    /// Iterate over objects in ascending key order.
    pub fn objects(&self) -> impl Iterator<Item = &S3Object> {
        self.objects.values()
    }
}
