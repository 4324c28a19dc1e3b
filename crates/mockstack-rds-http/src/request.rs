//! Decoding query parameters into [`RdsRequest`] values.

use mockstack_rds_model::input::{
    CreateDbInstanceInput, CreateDbSubnetGroupInput, CreateReadReplicaInput,
    ModifyDbInstanceInput,
};
use mockstack_rds_model::{RdsError, RdsOperation, RdsRequest};

use crate::params::QueryParams;

const DB_INSTANCE_IDENTIFIER: &str = "DBInstanceIdentifier";
const DB_SECURITY_GROUP_NAME: &str = "DBSecurityGroupName";
const DB_SUBNET_GROUP_NAME: &str = "DBSubnetGroupName";
const DB_SECURITY_GROUPS: &str = "DBSecurityGroups";

/// Decode the parameters of `operation`.
pub fn decode_request(
    operation: RdsOperation,
    params: &QueryParams,
) -> Result<RdsRequest, RdsError> {
    let request = match operation {
        RdsOperation::CreateDBInstance => {
            RdsRequest::CreateDbInstance(CreateDbInstanceInput {
                db_instance_identifier: params.require(DB_INSTANCE_IDENTIFIER)?,
                allocated_storage: params.require_u32("AllocatedStorage")?,
                db_instance_class: params.require("DBInstanceClass")?,
                master_username: params.require("MasterUsername")?,
                master_user_password: params.require("MasterUserPassword")?,
                db_security_groups: params.list(DB_SECURITY_GROUPS).unwrap_or_default(),
                db_subnet_group_name: params.optional(DB_SUBNET_GROUP_NAME),
                engine: params.optional("Engine"),
                engine_version: params.optional("EngineVersion"),
                db_name: params.optional("DBName"),
                availability_zone: params.optional("AvailabilityZone"),
                multi_az: params.optional_bool("MultiAZ")?,
                publicly_accessible: params.optional_bool("PubliclyAccessible")?,
            })
        }
        RdsOperation::DescribeDBInstances => RdsRequest::DescribeDbInstances {
            db_instance_identifier: params.optional(DB_INSTANCE_IDENTIFIER),
        },
        RdsOperation::DeleteDBInstance => RdsRequest::DeleteDbInstance {
            db_instance_identifier: params.require(DB_INSTANCE_IDENTIFIER)?,
        },
        RdsOperation::ModifyDBInstance => RdsRequest::ModifyDbInstance(ModifyDbInstanceInput {
            db_instance_identifier: params.require(DB_INSTANCE_IDENTIFIER)?,
            db_security_groups: params.list(DB_SECURITY_GROUPS),
        }),
        RdsOperation::CreateDBInstanceReadReplica => {
            RdsRequest::CreateDbInstanceReadReplica(CreateReadReplicaInput {
                db_instance_identifier: params.require(DB_INSTANCE_IDENTIFIER)?,
                source_db_instance_identifier: params.require("SourceDBInstanceIdentifier")?,
                db_instance_class: params.optional("DBInstanceClass"),
            })
        }
        RdsOperation::CreateDBSecurityGroup => RdsRequest::CreateDbSecurityGroup {
            db_security_group_name: params.require(DB_SECURITY_GROUP_NAME)?,
            db_security_group_description: params.require("DBSecurityGroupDescription")?,
        },
        RdsOperation::DescribeDBSecurityGroups => RdsRequest::DescribeDbSecurityGroups {
            db_security_group_name: params.optional(DB_SECURITY_GROUP_NAME),
        },
        RdsOperation::DeleteDBSecurityGroup => RdsRequest::DeleteDbSecurityGroup {
            db_security_group_name: params.require(DB_SECURITY_GROUP_NAME)?,
        },
        RdsOperation::AuthorizeDBSecurityGroupIngress => {
            RdsRequest::AuthorizeDbSecurityGroupIngress {
                db_security_group_name: params.require(DB_SECURITY_GROUP_NAME)?,
                cidrip: params.require("CIDRIP")?,
            }
        }
        RdsOperation::CreateDBSubnetGroup => {
            RdsRequest::CreateDbSubnetGroup(CreateDbSubnetGroupInput {
                db_subnet_group_name: params.require(DB_SUBNET_GROUP_NAME)?,
                db_subnet_group_description: params.require("DBSubnetGroupDescription")?,
                subnet_ids: params.list("SubnetIds").unwrap_or_default(),
            })
        }
        RdsOperation::DescribeDBSubnetGroups => RdsRequest::DescribeDbSubnetGroups {
            db_subnet_group_name: params.optional(DB_SUBNET_GROUP_NAME),
        },
        RdsOperation::DeleteDBSubnetGroup => RdsRequest::DeleteDbSubnetGroup {
            db_subnet_group_name: params.require(DB_SUBNET_GROUP_NAME)?,
        },
    };
    Ok(request)
}
