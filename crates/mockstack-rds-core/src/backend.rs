//! The database-provisioning backend for one region partition.

use std::sync::Arc;

use mockstack_core::{
    AwsRegion, Backend, BackendError, BackendResult, Clock, ResourceKind, ResourceTable,
    ServiceName,
};
use mockstack_rds_model::input::{CreateDbInstanceInput, CreateDbSubnetGroupInput};
use tracing::{debug, info};

use crate::network::SubnetLookup;
use crate::state::{
    DEFAULT_ENGINE, DEFAULT_ENGINE_VERSION, DbInstance, DbSecurityGroup, DbSubnetGroup, Endpoint,
    STATUS_AVAILABLE, StatusInfo,
};

/// Instance, security-group, and subnet-group state for one region.
#[derive(Debug)]
pub struct RdsBackend {
    region: AwsRegion,
    clock: Arc<dyn Clock>,
    instances: ResourceTable<DbInstance>,
    security_groups: ResourceTable<DbSecurityGroup>,
    subnet_groups: ResourceTable<DbSubnetGroup>,
}

impl Backend for RdsBackend {
    const SERVICE: ServiceName = ServiceName::Rds;

    fn for_region(region: &AwsRegion, clock: Arc<dyn Clock>) -> Self {
        Self {
            region: region.clone(),
            clock,
            instances: ResourceTable::new(),
            security_groups: ResourceTable::new(),
            subnet_groups: ResourceTable::new(),
        }
    }
}

impl RdsBackend {
    /// The region this partition serves.
    #[must_use]
    pub fn region(&self) -> &AwsRegion {
        &self.region
    }

    // -- Instances --

    /// Create an instance. Every named security group and the subnet group
    /// must already exist.
    pub fn create_instance(&mut self, input: CreateDbInstanceInput) -> BackendResult<&DbInstance> {
        let id = input.db_instance_identifier;
        if self.instances.contains(&id) {
            return Err(BackendError::already_exists(ResourceKind::DbInstance, id));
        }
        if let Some(missing) = input
            .db_security_groups
            .iter()
            .find(|name| !self.security_groups.contains(name))
        {
            return Err(BackendError::invalid_reference(
                ResourceKind::DbSecurityGroup,
                missing.as_str(),
            ));
        }
        if let Some(group) = &input.db_subnet_group_name {
            if !self.subnet_groups.contains(group) {
                return Err(BackendError::invalid_reference(
                    ResourceKind::DbSubnetGroup,
                    group.as_str(),
                ));
            }
        }

        let mut instance = DbInstance {
            endpoint: Endpoint::derive(&id, &self.region),
            status: STATUS_AVAILABLE.to_owned(),
            allocated_storage: input.allocated_storage,
            instance_class: input.db_instance_class,
            master_username: input.master_username,
            master_user_password: input.master_user_password,
            engine: input.engine.unwrap_or_else(|| DEFAULT_ENGINE.to_owned()),
            engine_version: input
                .engine_version
                .unwrap_or_else(|| DEFAULT_ENGINE_VERSION.to_owned()),
            db_name: input.db_name,
            availability_zone: input
                .availability_zone
                .unwrap_or_else(|| format!("{}a", self.region)),
            multi_az: input.multi_az.unwrap_or(false),
            publicly_accessible: input.publicly_accessible.unwrap_or(true),
            security_groups: Vec::new(),
            subnet_group: input.db_subnet_group_name,
            source_instance_id: None,
            read_replica_ids: Vec::new(),
            status_infos: Vec::new(),
            create_time: self.clock.now(),
            id,
        };
        instance.set_security_groups(input.db_security_groups);

        let instance = self.instances.insert(instance)?;
        info!(instance = %instance.id, region = %self.region, "DB instance created");
        Ok(instance)
    }

    /// Look up an instance.
    pub fn get_instance(&self, id: &str) -> BackendResult<&DbInstance> {
        self.instances.get(id)
    }

    /// All instances, or only `filter` (which must exist).
    pub fn list_instances(&self, filter: Option<&str>) -> BackendResult<Vec<&DbInstance>> {
        self.instances.list(filter)
    }

    /// Delete an instance, unlinking it from its source if it is a replica.
    ///
    /// Replicas of a deleted source keep their now dangling source id.
    pub fn delete_instance(&mut self, id: &str) -> BackendResult<DbInstance> {
        let removed = self.instances.remove(id)?;
        if let Some(source_id) = &removed.source_instance_id {
            if let Ok(source) = self.instances.get_mut(source_id) {
                source.read_replica_ids.retain(|r| r != id);
            }
        }
        info!(instance = %id, "DB instance deleted");
        Ok(removed)
    }

    /// Replace an instance's security groups wholesale. `None` keeps them.
    pub fn modify_instance(
        &mut self,
        id: &str,
        security_groups: Option<Vec<String>>,
    ) -> BackendResult<&DbInstance> {
        let instance = self.instances.get_mut(id)?;
        if let Some(groups) = security_groups {
            instance.set_security_groups(groups);
        }
        debug!(instance = %id, security_groups = ?instance.security_groups, "DB instance modified");
        Ok(&*instance)
    }

    /// Create a read replica of `source_id`.
    ///
    /// The replica takes its configuration from the source, with its own id,
    /// endpoint, and optionally its own instance class.
    pub fn create_read_replica(
        &mut self,
        replica_id: &str,
        source_id: &str,
        instance_class: Option<String>,
    ) -> BackendResult<&DbInstance> {
        if self.instances.contains(replica_id) {
            return Err(BackendError::already_exists(
                ResourceKind::DbInstance,
                replica_id,
            ));
        }
        let source = self.instances.get_mut(source_id)?;
        source.read_replica_ids.push(replica_id.to_owned());

        let mut replica = source.clone();
        replica.id = replica_id.to_owned();
        replica.endpoint = Endpoint::derive(replica_id, &self.region);
        if let Some(class) = instance_class {
            replica.instance_class = class;
        }
        replica.source_instance_id = Some(source_id.to_owned());
        replica.read_replica_ids = Vec::new();
        replica.status_infos = vec![StatusInfo::replicating()];
        replica.create_time = self.clock.now();

        let replica = self.instances.insert(replica)?;
        info!(replica = %replica_id, source = %source_id, "DB read replica created");
        Ok(replica)
    }

    // -- Security groups --

    /// Create a security group with no ingress ranges.
    pub fn create_security_group(
        &mut self,
        name: &str,
        description: &str,
    ) -> BackendResult<&DbSecurityGroup> {
        let group = self
            .security_groups
            .insert(DbSecurityGroup::new(name, description))?;
        info!(security_group = %name, "DB security group created");
        Ok(group)
    }

    /// Delete a security group. Instances naming it are left untouched.
    pub fn delete_security_group(&mut self, name: &str) -> BackendResult<DbSecurityGroup> {
        let removed = self.security_groups.remove(name)?;
        info!(security_group = %name, "DB security group deleted");
        Ok(removed)
    }

    /// All security groups, or only `filter` (which must exist).
    pub fn list_security_groups(
        &self,
        filter: Option<&str>,
    ) -> BackendResult<Vec<&DbSecurityGroup>> {
        self.security_groups.list(filter)
    }

    /// Append an ingress CIDR range to a security group.
    pub fn authorize_ingress(&mut self, name: &str, cidr_ip: &str) -> BackendResult<&DbSecurityGroup> {
        let group = self.security_groups.get_mut(name)?;
        group.authorize(cidr_ip);
        debug!(security_group = %name, cidr_ip = %cidr_ip, "DB security group ingress authorized");
        Ok(&*group)
    }

    // -- Subnet groups --

    /// Create a subnet group. Each subnet id is checked with `network`; the
    /// first unknown one fails the call.
    pub fn create_subnet_group(
        &mut self,
        input: CreateDbSubnetGroupInput,
        network: &dyn SubnetLookup,
    ) -> BackendResult<&DbSubnetGroup> {
        let name = input.db_subnet_group_name;
        if self.subnet_groups.contains(&name) {
            return Err(BackendError::already_exists(ResourceKind::DbSubnetGroup, name));
        }
        if let Some(missing) = input
            .subnet_ids
            .iter()
            .find(|id| !network.subnet_exists(&self.region, id))
        {
            return Err(BackendError::invalid_reference(
                ResourceKind::Subnet,
                missing.as_str(),
            ));
        }

        let group = self.subnet_groups.insert(DbSubnetGroup::new(
            name,
            input.db_subnet_group_description,
            input.subnet_ids,
        ))?;
        info!(subnet_group = %group.name, subnets = group.subnet_ids.len(), "DB subnet group created");
        Ok(group)
    }

    /// Delete a subnet group. Instances naming it are left untouched.
    pub fn delete_subnet_group(&mut self, name: &str) -> BackendResult<DbSubnetGroup> {
        let removed = self.subnet_groups.remove(name)?;
        info!(subnet_group = %name, "DB subnet group deleted");
        Ok(removed)
    }

    /// All subnet groups, or only `filter` (which must exist).
    pub fn list_subnet_groups(&self, filter: Option<&str>) -> BackendResult<Vec<&DbSubnetGroup>> {
        self.subnet_groups.list(filter)
    }
}
