//! DB subnet group record.

use mockstack_core::{Resource, ResourceKind};

/// A named set of subnets an instance may be placed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSubnetGroup {
    /// Group name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Subnet ids, in the order given at creation.
    pub subnet_ids: Vec<String>,
    /// Group status. Always `Complete`.
    pub status: String,
}

impl Resource for DbSubnetGroup {
    const KIND: ResourceKind = ResourceKind::DbSubnetGroup;

    fn name(&self) -> &str {
        &self.name
    }
}

impl DbSubnetGroup {
    /// Create a subnet group over already validated subnet ids.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        subnet_ids: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            subnet_ids,
            status: "Complete".to_owned(),
        }
    }
}
