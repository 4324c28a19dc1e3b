//! The process-wide set of backend partitions.

use std::sync::Arc;

use mockstack_core::{Clock, RegionStore};
use mockstack_rds_core::{RdsBackend, StaticSubnets};
use mockstack_s3_core::S3Backend;
use tracing::debug;

/// Every simulated service's state, partitioned per (service, region).
#[derive(Debug)]
pub struct BackendRegistry {
    s3: RegionStore<S3Backend>,
    rds: RegionStore<RdsBackend>,
    network: Arc<StaticSubnets>,
    clock: Arc<dyn Clock>,
}

impl BackendRegistry {
    /// Create an empty registry whose backends stamp times from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            s3: RegionStore::new(Arc::clone(&clock)),
            rds: RegionStore::new(Arc::clone(&clock)),
            network: Arc::new(StaticSubnets::new()),
            clock,
        }
    }

    /// Object-storage partitions.
    #[must_use]
    pub fn s3(&self) -> &RegionStore<S3Backend> {
        &self.s3
    }

    /// Database partitions.
    #[must_use]
    pub fn rds(&self) -> &RegionStore<RdsBackend> {
        &self.rds
    }

    /// The subnet registry standing in for the networking provider.
    #[must_use]
    pub fn network(&self) -> &Arc<StaticSubnets> {
        &self.network
    }

    /// The clock shared by every backend.
    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Drop all partitions and registered subnets.
    pub fn reset(&self) {
        self.s3.reset();
        self.rds.reset();
        self.network.clear();
        debug!("backend registry reset");
    }
}
