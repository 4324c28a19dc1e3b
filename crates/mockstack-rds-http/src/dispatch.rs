//! Executing decoded requests against a region's [`RdsBackend`].

use mockstack_rds_core::{DbInstance, DbSecurityGroup, DbSubnetGroup, RdsBackend, SubnetLookup};
use mockstack_rds_model::{RdsError, RdsRequest};

/// The outcome of a successful RDS call, detached from backend state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RdsOutput {
    /// One instance.
    Instance(DbInstance),
    /// Instances in identifier order.
    Instances(Vec<DbInstance>),
    /// One security group.
    SecurityGroup(DbSecurityGroup),
    /// Security groups in name order.
    SecurityGroups(Vec<DbSecurityGroup>),
    /// One subnet group.
    SubnetGroup(DbSubnetGroup),
    /// Subnet groups in name order.
    SubnetGroups(Vec<DbSubnetGroup>),
    /// No result payload.
    Empty,
}

fn owned<T: Clone>(items: Vec<&T>) -> Vec<T> {
    items.into_iter().cloned().collect()
}

/// Run one request against the backend.
pub fn execute(
    backend: &mut RdsBackend,
    network: &dyn SubnetLookup,
    request: RdsRequest,
) -> Result<RdsOutput, RdsError> {
    let output = match request {
        RdsRequest::CreateDbInstance(input) => {
            RdsOutput::Instance(backend.create_instance(input)?.clone())
        }
        RdsRequest::DescribeDbInstances {
            db_instance_identifier,
        } => RdsOutput::Instances(owned(
            backend.list_instances(db_instance_identifier.as_deref())?,
        )),
        RdsRequest::DeleteDbInstance {
            db_instance_identifier,
        } => RdsOutput::Instance(backend.delete_instance(&db_instance_identifier)?),
        RdsRequest::ModifyDbInstance(input) => RdsOutput::Instance(
            backend
                .modify_instance(&input.db_instance_identifier, input.db_security_groups)?
                .clone(),
        ),
        RdsRequest::CreateDbInstanceReadReplica(input) => RdsOutput::Instance(
            backend
                .create_read_replica(
                    &input.db_instance_identifier,
                    &input.source_db_instance_identifier,
                    input.db_instance_class,
                )?
                .clone(),
        ),
        RdsRequest::CreateDbSecurityGroup {
            db_security_group_name,
            db_security_group_description,
        } => RdsOutput::SecurityGroup(
            backend
                .create_security_group(&db_security_group_name, &db_security_group_description)?
                .clone(),
        ),
        RdsRequest::DescribeDbSecurityGroups {
            db_security_group_name,
        } => RdsOutput::SecurityGroups(owned(
            backend.list_security_groups(db_security_group_name.as_deref())?,
        )),
        RdsRequest::DeleteDbSecurityGroup {
            db_security_group_name,
        } => {
            backend.delete_security_group(&db_security_group_name)?;
            RdsOutput::Empty
        }
        RdsRequest::AuthorizeDbSecurityGroupIngress {
            db_security_group_name,
            cidrip,
        } => RdsOutput::SecurityGroup(
            backend
                .authorize_ingress(&db_security_group_name, &cidrip)?
                .clone(),
        ),
        RdsRequest::CreateDbSubnetGroup(input) => {
            RdsOutput::SubnetGroup(backend.create_subnet_group(input, network)?.clone())
        }
        RdsRequest::DescribeDbSubnetGroups {
            db_subnet_group_name,
        } => RdsOutput::SubnetGroups(owned(
            backend.list_subnet_groups(db_subnet_group_name.as_deref())?,
        )),
        RdsRequest::DeleteDbSubnetGroup {
            db_subnet_group_name,
        } => {
            backend.delete_subnet_group(&db_subnet_group_name)?;
            RdsOutput::Empty
        }
    };
    Ok(output)
}
