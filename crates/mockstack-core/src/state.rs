//! Per-region backend partitions.
//!
//! Provides [`RegionStore`], a thread-safe store that lazily creates one
//! backend instance per region for a single service. Each partition sits
//! behind its own mutex, so mutating operations on one partition are
//! serialized while different regions proceed independently.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::clock::Clock;
use crate::types::{AwsRegion, ServiceName};

/// A service backend that can be instantiated for one region.
pub trait Backend: Send + 'static {
    /// The service this backend simulates.
    const SERVICE: ServiceName;

    /// Create an empty backend for `region`, stamping times from `clock`.
    fn for_region(region: &AwsRegion, clock: Arc<dyn Clock>) -> Self;
}

/// Thread-safe, per-region store of backend partitions.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use mockstack_core::{AwsRegion, Backend, Clock, RegionStore, ServiceName, SystemClock};
///
/// #[derive(Debug, Default)]
/// struct Counter(u64);
///
/// impl Backend for Counter {
///     const SERVICE: ServiceName = ServiceName::S3;
///
///     fn for_region(_region: &AwsRegion, _clock: Arc<dyn Clock>) -> Self {
///         Self::default()
///     }
/// }
///
/// let store = RegionStore::<Counter>::new(Arc::new(SystemClock));
/// store.with_region(&AwsRegion::default(), |c| c.0 += 1);
/// assert_eq!(store.with_region(&AwsRegion::default(), |c| c.0), 1);
/// ```
#[derive(Debug)]
pub struct RegionStore<B> {
    inner: DashMap<AwsRegion, Arc<Mutex<B>>>,
    clock: Arc<dyn Clock>,
}

impl<B: Backend> RegionStore<B> {
    /// Create a new empty store whose partitions share `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: DashMap::new(),
            clock,
        }
    }

    /// Get or create the partition for `region`.
    #[must_use]
    pub fn for_region(&self, region: &AwsRegion) -> Arc<Mutex<B>> {
        self.inner
            .entry(region.clone())
            .or_insert_with(|| {
                debug!(service = %B::SERVICE, region = %region, "creating backend partition");
                Arc::new(Mutex::new(B::for_region(region, Arc::clone(&self.clock))))
            })
            .clone()
    }

    /// Run `f` with exclusive access to the partition for `region`.
    pub fn with_region<T>(&self, region: &AwsRegion, f: impl FnOnce(&mut B) -> T) -> T {
        let partition = self.for_region(region);
        let mut guard = partition.lock();
        f(&mut *guard)
    }

    /// Get the partition for `region`, if it has been created.
    #[must_use]
    pub fn get(&self, region: &AwsRegion) -> Option<Arc<Mutex<B>>> {
        self.inner.get(region).map(|v| Arc::clone(v.value()))
    }

    /// Drop every partition.
    pub fn reset(&self) {
        debug!(service = %B::SERVICE, partitions = self.inner.len(), "resetting backend partitions");
        self.inner.clear();
    }

    /// Regions that currently have a partition, sorted.
    #[must_use]
    pub fn regions(&self) -> Vec<AwsRegion> {
        let mut regions: Vec<_> = self.inner.iter().map(|e| e.key().clone()).collect();
        regions.sort();
        regions
    }

    /// Number of partitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
