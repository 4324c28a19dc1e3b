//! Core types, configuration, and state management for MockStack.
//!
//! This crate provides the building blocks shared by every simulated service:
//! per-region backend partitions, the named-resource table with its uniform
//! not-found and already-exists rules, the backend error taxonomy, a
//! replaceable clock, and configuration.

mod clock;
mod config;
mod error;
mod state;
mod table;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::MockStackConfig;
pub use error::{
    BackendError, BackendResult, MockStackError, MockStackResult, UnsupportedOperation,
};
pub use state::{Backend, RegionStore};
pub use table::{Resource, ResourceTable};
pub use types::{AwsRegion, ResourceKind, ServiceName};
