//! A named-resource table with the shared lookup contract.
//!
//! Every resource class in every backend (buckets, DB instances, security
//! groups, subnet groups) is stored in a [`ResourceTable`]. The table owns the
//! uniform rules: duplicate names fail with `AlreadyExists`, lookups and
//! deletes of unknown names fail with `NotFound` tagged with the resource's
//! [`ResourceKind`], and a filtered listing that matches nothing is also a
//! `NotFound`. Iteration is in ascending name order.

use std::collections::BTreeMap;

use crate::error::{BackendError, BackendResult};
use crate::types::ResourceKind;

/// A record that can live in a [`ResourceTable`].
pub trait Resource {
    /// The resource class, used to tag errors.
    const KIND: ResourceKind;

    /// The record's unique name within its partition.
    fn name(&self) -> &str;
}

/// Name-keyed storage for one resource class.
#[derive(Debug, Clone)]
pub struct ResourceTable<R> {
    items: BTreeMap<String, R>,
}

impl<R> Default for ResourceTable<R> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<R: Resource> ResourceTable<R> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record. Fails if the name is already taken.
    pub fn insert(&mut self, record: R) -> BackendResult<&R> {
        let name = record.name().to_owned();
        if self.items.contains_key(&name) {
            return Err(BackendError::already_exists(R::KIND, name));
        }
        Ok(self.items.entry(name).or_insert(record))
    }

    /// Whether a record with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Look up a record by name.
    pub fn get(&self, name: &str) -> BackendResult<&R> {
        self.items
            .get(name)
            .ok_or_else(|| BackendError::not_found(R::KIND, name))
    }

    /// Look up a record by name for mutation.
    pub fn get_mut(&mut self, name: &str) -> BackendResult<&mut R> {
        self.items
            .get_mut(name)
            .ok_or_else(|| BackendError::not_found(R::KIND, name))
    }

    /// Remove a record by name, returning it.
    pub fn remove(&mut self, name: &str) -> BackendResult<R> {
        self.items
            .remove(name)
            .ok_or_else(|| BackendError::not_found(R::KIND, name))
    }

    /// List records. With a filter, returns exactly that record or fails with
    /// `NotFound`; without one, returns every record (possibly none).
    pub fn list(&self, filter: Option<&str>) -> BackendResult<Vec<&R>> {
        match filter {
            Some(name) => self.get(name).map(|r| vec![r]),
            None => Ok(self.items.values().collect()),
        }
    }

    /// Iterate over records in name order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.items.values()
    }

    /// Iterate mutably over records in name order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut R> {
        self.items.values_mut()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
