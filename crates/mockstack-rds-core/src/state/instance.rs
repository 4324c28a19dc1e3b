//! DB instance record.

use chrono::{DateTime, Utc};
use mockstack_core::{AwsRegion, Resource, ResourceKind};

/// Host label every derived endpoint carries between the id and the region.
const ENDPOINT_LABEL: &str = "aaaaaaaaaa";

/// Port every derived endpoint listens on.
pub const DEFAULT_PORT: u16 = 3306;

/// Status of an instance that is ready for use.
pub const STATUS_AVAILABLE: &str = "available";

/// Engine used when none is requested.
pub const DEFAULT_ENGINE: &str = "mysql";

/// Engine version used when none is requested.
pub const DEFAULT_ENGINE_VERSION: &str = "5.6.21";

/// Network address of an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Host name.
    pub address: String,
    /// TCP port.
    pub port: u16,
}

impl Endpoint {
    /// Derive the endpoint for instance `id` in `region`.
    ///
    /// ```
    /// use mockstack_core::AwsRegion;
    /// use mockstack_rds_core::Endpoint;
    ///
    /// let ep = Endpoint::derive("db-master-1", &AwsRegion::new("us-west-2"));
    /// assert_eq!(ep.address, "db-master-1.aaaaaaaaaa.us-west-2.rds.amazonaws.com");
    /// assert_eq!(ep.port, 3306);
    /// ```
    #[must_use]
    pub fn derive(id: &str, region: &AwsRegion) -> Self {
        Self {
            address: format!("{id}.{ENDPOINT_LABEL}.{region}.rds.amazonaws.com"),
            port: DEFAULT_PORT,
        }
    }
}

/// One status-info record, used to report replication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    /// What the status describes.
    pub status_type: String,
    /// Current status.
    pub status: String,
    /// Whether the status is healthy.
    pub normal: bool,
}

impl StatusInfo {
    /// The record every read replica carries.
    #[must_use]
    pub fn replicating() -> Self {
        Self {
            status_type: "read replication".to_owned(),
            status: "replicating".to_owned(),
            normal: true,
        }
    }
}

/// A simulated managed-database instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbInstance {
    /// Instance identifier.
    pub id: String,
    /// Lifecycle status. Always `available`.
    pub status: String,
    /// Allocated storage in GiB.
    pub allocated_storage: u32,
    /// Instance class.
    pub instance_class: String,
    /// Master user name.
    pub master_username: String,
    /// Master user password.
    pub master_user_password: String,
    /// Database engine.
    pub engine: String,
    /// Engine version.
    pub engine_version: String,
    /// Initial database name.
    pub db_name: Option<String>,
    /// Availability zone.
    pub availability_zone: String,
    /// Whether the instance is multi-AZ.
    pub multi_az: bool,
    /// Whether the instance is publicly accessible.
    pub publicly_accessible: bool,
    /// Derived network endpoint.
    pub endpoint: Endpoint,
    /// Attached security groups, by name, without duplicates.
    pub security_groups: Vec<String>,
    /// Subnet group, by name.
    pub subnet_group: Option<String>,
    /// Source instance id, present iff this is a read replica.
    pub source_instance_id: Option<String>,
    /// Ids of the replicas this instance is the source for.
    pub read_replica_ids: Vec<String>,
    /// Status-info records.
    pub status_infos: Vec<StatusInfo>,
    /// Creation time.
    pub create_time: DateTime<Utc>,
}

impl Resource for DbInstance {
    const KIND: ResourceKind = ResourceKind::DbInstance;

    fn name(&self) -> &str {
        &self.id
    }
}

impl DbInstance {
    /// Replace the attached security groups, dropping repeated names.
    pub fn set_security_groups(&mut self, names: Vec<String>) {
        self.security_groups.clear();
        for name in names {
            if !self.security_groups.contains(&name) {
                self.security_groups.push(name);
            }
        }
    }

    /// Whether this instance replicates another.
    #[must_use]
    pub fn is_read_replica(&self) -> bool {
        self.source_instance_id.is_some()
    }
}
