//! DB security group record.

use mockstack_core::{Resource, ResourceKind};

/// Account id reported as every group's owner.
pub const OWNER_ID: &str = "123456789012";

/// An authorized ingress CIDR range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpRange {
    /// CIDR block, e.g. `10.3.2.45/32`.
    pub cidr_ip: String,
    /// Authorization status. Always `authorized`.
    pub status: String,
}

/// A named database access policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSecurityGroup {
    /// Group name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Owning account id.
    pub owner_id: String,
    /// Ingress ranges, in the order they were authorized.
    pub ip_ranges: Vec<IpRange>,
}

impl Resource for DbSecurityGroup {
    const KIND: ResourceKind = ResourceKind::DbSecurityGroup;

    fn name(&self) -> &str {
        &self.name
    }
}

impl DbSecurityGroup {
    /// Create a group with no ingress ranges.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            owner_id: OWNER_ID.to_owned(),
            ip_ranges: Vec::new(),
        }
    }

    /// Append an ingress range. Repeated ranges are kept.
    pub fn authorize(&mut self, cidr_ip: impl Into<String>) {
        self.ip_ranges.push(IpRange {
            cidr_ip: cidr_ip.into(),
            status: "authorized".to_owned(),
        });
    }
}
