//! Common AWS type definitions shared across the simulated services.

use std::fmt;

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Region used when a request does not carry one.
    pub const DEFAULT: &str = "us-east-1";

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A simulated provider service. Each service gets its own backend partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceName {
    /// Object storage.
    S3,
    /// Managed database provisioning.
    Rds,
}

impl ServiceName {
    /// The service's endpoint prefix (`s3`, `rds`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S3 => "s3",
            Self::Rds => "rds",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of resource a backend error refers to.
///
/// Wire serializers pick the provider error code from the pair
/// (error kind, resource kind), so every backend tags its failures with one
/// of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// An object-storage bucket.
    Bucket,
    /// An object inside a bucket.
    Object,
    /// A database instance.
    DbInstance,
    /// A database security group.
    DbSecurityGroup,
    /// A database subnet group.
    DbSubnetGroup,
    /// A subnet owned by the networking provider.
    Subnet,
}

impl ResourceKind {
    /// Human-readable name used in error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bucket => "bucket",
            Self::Object => "key",
            Self::DbInstance => "DB instance",
            Self::DbSecurityGroup => "DB security group",
            Self::DbSubnetGroup => "DB subnet group",
            Self::Subnet => "subnet",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
