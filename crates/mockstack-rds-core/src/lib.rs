//! In-memory database-provisioning backend.
//!
//! ```text
//! RdsBackend (one per region partition)
//!   ├── ResourceTable<DbInstance>       (weak refs to groups by name)
//!   ├── ResourceTable<DbSecurityGroup>
//!   └── ResourceTable<DbSubnetGroup>    (subnets checked via SubnetLookup)
//! ```
//!
//! Resources reach their steady state immediately on creation. Security and
//! subnet groups are referenced by name only, so deleting a group that an
//! instance still names leaves a dangling reference.

pub mod backend;
pub mod network;
pub mod state;

pub use backend::RdsBackend;
pub use network::{StaticSubnets, SubnetLookup};
pub use state::{DbInstance, DbSecurityGroup, DbSubnetGroup, Endpoint, IpRange, StatusInfo};
