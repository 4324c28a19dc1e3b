//! Typed RDS inputs.

use crate::operations::RdsOperation;

/// Parameters of `CreateDBInstance`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDbInstanceInput {
    /// Instance identifier.
    pub db_instance_identifier: String,
    /// Allocated storage in GiB.
    pub allocated_storage: u32,
    /// Instance class, e.g. `db.m1.small`.
    pub db_instance_class: String,
    /// Master user name.
    pub master_username: String,
    /// Master user password.
    pub master_user_password: String,
    /// Security groups to attach, by name.
    pub db_security_groups: Vec<String>,
    /// Subnet group to place the instance in, by name.
    pub db_subnet_group_name: Option<String>,
    /// Database engine.
    pub engine: Option<String>,
    /// Engine version.
    pub engine_version: Option<String>,
    /// Initial database name.
    pub db_name: Option<String>,
    /// Availability zone.
    pub availability_zone: Option<String>,
    /// Whether the instance is multi-AZ.
    pub multi_az: Option<bool>,
    /// Whether the instance is reachable from outside its network.
    pub publicly_accessible: Option<bool>,
}

/// Parameters of `ModifyDBInstance`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifyDbInstanceInput {
    /// Instance identifier.
    pub db_instance_identifier: String,
    /// Replacement security-group set. `None` leaves the set untouched.
    pub db_security_groups: Option<Vec<String>>,
}

/// Parameters of `CreateDBInstanceReadReplica`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateReadReplicaInput {
    /// Replica identifier.
    pub db_instance_identifier: String,
    /// Identifier of the instance to replicate.
    pub source_db_instance_identifier: String,
    /// Replica instance class. Defaults to the source's class.
    pub db_instance_class: Option<String>,
}

/// Parameters of `CreateDBSubnetGroup`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDbSubnetGroupInput {
    /// Subnet group name.
    pub db_subnet_group_name: String,
    /// Free-form description.
    pub db_subnet_group_description: String,
    /// Subnet ids, in the order given.
    pub subnet_ids: Vec<String>,
}

/// A decoded RDS call: one variant per [`RdsOperation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RdsRequest {
    /// Create an instance.
    CreateDbInstance(CreateDbInstanceInput),
    /// Describe instances, optionally filtered to one identifier.
    DescribeDbInstances {
        /// Optional identifier filter.
        db_instance_identifier: Option<String>,
    },
    /// Delete an instance.
    DeleteDbInstance {
        /// Instance identifier.
        db_instance_identifier: String,
    },
    /// Replace an instance's security groups.
    ModifyDbInstance(ModifyDbInstanceInput),
    /// Create a read replica.
    CreateDbInstanceReadReplica(CreateReadReplicaInput),
    /// Create a security group.
    CreateDbSecurityGroup {
        /// Group name.
        db_security_group_name: String,
        /// Free-form description.
        db_security_group_description: String,
    },
    /// Describe security groups, optionally filtered to one name.
    DescribeDbSecurityGroups {
        /// Optional name filter.
        db_security_group_name: Option<String>,
    },
    /// Delete a security group.
    DeleteDbSecurityGroup {
        /// Group name.
        db_security_group_name: String,
    },
    /// Append an ingress CIDR range to a security group.
    AuthorizeDbSecurityGroupIngress {
        /// Group name.
        db_security_group_name: String,
        /// CIDR range, e.g. `10.3.2.45/32`.
        cidrip: String,
    },
    /// Create a subnet group.
    CreateDbSubnetGroup(CreateDbSubnetGroupInput),
    /// Describe subnet groups, optionally filtered to one name.
    DescribeDbSubnetGroups {
        /// Optional name filter.
        db_subnet_group_name: Option<String>,
    },
    /// Delete a subnet group.
    DeleteDbSubnetGroup {
        /// Group name.
        db_subnet_group_name: String,
    },
}

impl RdsRequest {
    /// The action this request invokes.
    #[must_use]
    pub fn operation(&self) -> RdsOperation {
        match self {
            Self::CreateDbInstance(_) => RdsOperation::CreateDBInstance,
            Self::DescribeDbInstances { .. } => RdsOperation::DescribeDBInstances,
            Self::DeleteDbInstance { .. } => RdsOperation::DeleteDBInstance,
            Self::ModifyDbInstance(_) => RdsOperation::ModifyDBInstance,
            Self::CreateDbInstanceReadReplica(_) => RdsOperation::CreateDBInstanceReadReplica,
            Self::CreateDbSecurityGroup { .. } => RdsOperation::CreateDBSecurityGroup,
            Self::DescribeDbSecurityGroups { .. } => RdsOperation::DescribeDBSecurityGroups,
            Self::DeleteDbSecurityGroup { .. } => RdsOperation::DeleteDBSecurityGroup,
            Self::AuthorizeDbSecurityGroupIngress { .. } => {
                RdsOperation::AuthorizeDBSecurityGroupIngress
            }
            Self::CreateDbSubnetGroup(_) => RdsOperation::CreateDBSubnetGroup,
            Self::DescribeDbSubnetGroups { .. } => RdsOperation::DescribeDBSubnetGroups,
            Self::DeleteDbSubnetGroup { .. } => RdsOperation::DeleteDBSubnetGroup,
        }
    }
}
