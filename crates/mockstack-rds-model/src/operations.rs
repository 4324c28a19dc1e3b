//! RDS operation enum.

use std::fmt;

/// All supported RDS actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdsOperation {
    // Instances
    /// Create a DB instance.
    CreateDBInstance,
    /// Describe one or all DB instances.
    DescribeDBInstances,
    /// Delete a DB instance.
    DeleteDBInstance,
    /// Replace a DB instance's security groups.
    ModifyDBInstance,
    /// Create a read replica of a DB instance.
    CreateDBInstanceReadReplica,

    // Security groups
    /// Create a DB security group.
    CreateDBSecurityGroup,
    /// Describe one or all DB security groups.
    DescribeDBSecurityGroups,
    /// Delete a DB security group.
    DeleteDBSecurityGroup,
    /// Add an ingress CIDR range to a DB security group.
    AuthorizeDBSecurityGroupIngress,

    // Subnet groups
    /// Create a DB subnet group.
    CreateDBSubnetGroup,
    /// Describe one or all DB subnet groups.
    DescribeDBSubnetGroups,
    /// Delete a DB subnet group.
    DeleteDBSubnetGroup,
}

impl RdsOperation {
    /// Every supported action.
    pub const ALL: [Self; 12] = [
        Self::CreateDBInstance,
        Self::DescribeDBInstances,
        Self::DeleteDBInstance,
        Self::ModifyDBInstance,
        Self::CreateDBInstanceReadReplica,
        Self::CreateDBSecurityGroup,
        Self::DescribeDBSecurityGroups,
        Self::DeleteDBSecurityGroup,
        Self::AuthorizeDBSecurityGroupIngress,
        Self::CreateDBSubnetGroup,
        Self::DescribeDBSubnetGroups,
        Self::DeleteDBSubnetGroup,
    ];

    /// Returns the `Action` parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateDBInstance => "CreateDBInstance",
            Self::DescribeDBInstances => "DescribeDBInstances",
            Self::DeleteDBInstance => "DeleteDBInstance",
            Self::ModifyDBInstance => "ModifyDBInstance",
            Self::CreateDBInstanceReadReplica => "CreateDBInstanceReadReplica",
            Self::CreateDBSecurityGroup => "CreateDBSecurityGroup",
            Self::DescribeDBSecurityGroups => "DescribeDBSecurityGroups",
            Self::DeleteDBSecurityGroup => "DeleteDBSecurityGroup",
            Self::AuthorizeDBSecurityGroupIngress => "AuthorizeDBSecurityGroupIngress",
            Self::CreateDBSubnetGroup => "CreateDBSubnetGroup",
            Self::DescribeDBSubnetGroups => "DescribeDBSubnetGroups",
            Self::DeleteDBSubnetGroup => "DeleteDBSubnetGroup",
        }
    }

    /// Parse an `Action` parameter value.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }
}

impl fmt::Display for RdsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
