//! Database resource records.

mod instance;
mod security_group;
mod subnet_group;

pub use instance::{
    DEFAULT_ENGINE, DEFAULT_ENGINE_VERSION, DEFAULT_PORT, DbInstance, Endpoint, STATUS_AVAILABLE,
    StatusInfo,
};
pub use security_group::{DbSecurityGroup, IpRange};
pub use subnet_group::DbSubnetGroup;
