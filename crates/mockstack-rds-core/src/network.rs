//! The networking collaborator consulted when subnet groups are created.

use std::collections::{BTreeSet, HashMap};

use mockstack_core::AwsRegion;
use parking_lot::RwLock;

/// Answers whether a subnet exists in a region.
pub trait SubnetLookup: std::fmt::Debug + Send + Sync {
    /// Whether `subnet_id` exists in `region`.
    fn subnet_exists(&self, region: &AwsRegion, subnet_id: &str) -> bool;
}

/// An in-memory subnet registry that fixtures populate directly.
#[derive(Debug, Default)]
pub struct StaticSubnets {
    subnets: RwLock<HashMap<AwsRegion, BTreeSet<String>>>,
}

impl StaticSubnets {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subnet id in `region`.
    pub fn register(&self, region: &AwsRegion, subnet_id: impl Into<String>) {
        self.subnets
            .write()
            .entry(region.clone())
            .or_default()
            .insert(subnet_id.into());
    }

    /// Forget every registered subnet.
    pub fn clear(&self) {
        self.subnets.write().clear();
    }
}

impl SubnetLookup for StaticSubnets {
    fn subnet_exists(&self, region: &AwsRegion, subnet_id: &str) -> bool {
        self.subnets
            .read()
            .get(region)
            .is_some_and(|ids| ids.contains(subnet_id))
    }
}
