//! RDS query-protocol XML documents.
//!
//! Every successful response is wrapped as
//! `<{Action}Response><{Action}Result>..</{Action}Result><ResponseMetadata>..`
//! under the `2014-09-01` namespace. Errors use the `ErrorResponse` envelope.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use mockstack_rds_core::{DbInstance, DbSecurityGroup, DbSubnetGroup};
use mockstack_rds_model::RdsOperation;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use crate::dispatch::RdsOutput;

/// The RDS XML namespace.
pub const RDS_NAMESPACE: &str = "http://rds.amazonaws.com/doc/2014-09-01/";

/// Errors that can occur while writing XML.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),
}

/// Format an instant the way XML bodies carry it.
#[must_use]
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

fn write_bool<W: Write>(writer: &mut Writer<W>, tag: &str, value: bool) -> io::Result<()> {
    write_text_element(writer, tag, if value { "true" } else { "false" })
}

fn write_instance<W: Write>(writer: &mut Writer<W>, instance: &DbInstance) -> io::Result<()> {
    writer.create_element("DBInstance").write_inner_content(|w| {
        write_text_element(w, "DBInstanceIdentifier", &instance.id)?;
        write_text_element(w, "DBInstanceStatus", &instance.status)?;
        write_text_element(w, "AllocatedStorage", &instance.allocated_storage.to_string())?;
        write_text_element(w, "DBInstanceClass", &instance.instance_class)?;
        write_text_element(w, "MasterUsername", &instance.master_username)?;
        write_text_element(w, "Engine", &instance.engine)?;
        write_text_element(w, "EngineVersion", &instance.engine_version)?;
        if let Some(db_name) = &instance.db_name {
            write_text_element(w, "DBName", db_name)?;
        }
        write_text_element(w, "AvailabilityZone", &instance.availability_zone)?;
        write_bool(w, "MultiAZ", instance.multi_az)?;
        write_bool(w, "PubliclyAccessible", instance.publicly_accessible)?;
        write_text_element(w, "InstanceCreateTime", &format_timestamp(&instance.create_time))?;
        w.create_element("Endpoint").write_inner_content(|w| {
            write_text_element(w, "Address", &instance.endpoint.address)?;
            write_text_element(w, "Port", &instance.endpoint.port.to_string())?;
            Ok(())
        })?;
        w.create_element("DBSecurityGroups").write_inner_content(|w| {
            for name in &instance.security_groups {
                w.create_element("DBSecurityGroup").write_inner_content(|w| {
                    write_text_element(w, "Status", "active")?;
                    write_text_element(w, "DBSecurityGroupName", name)?;
                    Ok(())
                })?;
            }
            Ok(())
        })?;
        if let Some(subnet_group) = &instance.subnet_group {
            w.create_element("DBSubnetGroup")
                .write_inner_content(|w| write_text_element(w, "DBSubnetGroupName", subnet_group))?;
        }
        if let Some(source) = &instance.source_instance_id {
            write_text_element(w, "ReadReplicaSourceDBInstanceIdentifier", source)?;
        }
        w.create_element("ReadReplicaDBInstanceIdentifiers")
            .write_inner_content(|w| {
                for id in &instance.read_replica_ids {
                    write_text_element(w, "ReadReplicaDBInstanceIdentifier", id)?;
                }
                Ok(())
            })?;
        w.create_element("StatusInfos").write_inner_content(|w| {
            for info in &instance.status_infos {
                w.create_element("DBInstanceStatusInfo")
                    .write_inner_content(|w| {
                        write_text_element(w, "StatusType", &info.status_type)?;
                        write_bool(w, "Normal", info.normal)?;
                        write_text_element(w, "Status", &info.status)?;
                        Ok(())
                    })?;
            }
            Ok(())
        })?;
        Ok(())
    })?;
    Ok(())
}

fn write_security_group<W: Write>(writer: &mut Writer<W>, group: &DbSecurityGroup) -> io::Result<()> {
    writer.create_element("DBSecurityGroup").write_inner_content(|w| {
        write_text_element(w, "DBSecurityGroupName", &group.name)?;
        write_text_element(w, "DBSecurityGroupDescription", &group.description)?;
        write_text_element(w, "OwnerId", &group.owner_id)?;
        w.create_element("IPRanges").write_inner_content(|w| {
            for range in &group.ip_ranges {
                w.create_element("IPRange").write_inner_content(|w| {
                    write_text_element(w, "CIDRIP", &range.cidr_ip)?;
                    write_text_element(w, "Status", &range.status)?;
                    Ok(())
                })?;
            }
            Ok(())
        })?;
        w.create_element("EC2SecurityGroups").write_empty()?;
        Ok(())
    })?;
    Ok(())
}

fn write_subnet_group<W: Write>(writer: &mut Writer<W>, group: &DbSubnetGroup) -> io::Result<()> {
    writer.create_element("DBSubnetGroup").write_inner_content(|w| {
        write_text_element(w, "DBSubnetGroupName", &group.name)?;
        write_text_element(w, "DBSubnetGroupDescription", &group.description)?;
        write_text_element(w, "SubnetGroupStatus", &group.status)?;
        w.create_element("Subnets").write_inner_content(|w| {
            for id in &group.subnet_ids {
                w.create_element("Subnet").write_inner_content(|w| {
                    write_text_element(w, "SubnetIdentifier", id)?;
                    write_text_element(w, "SubnetStatus", "Active")?;
                    Ok(())
                })?;
            }
            Ok(())
        })?;
        Ok(())
    })?;
    Ok(())
}

fn write_result_body<W: Write>(writer: &mut Writer<W>, output: &RdsOutput) -> io::Result<()> {
    match output {
        RdsOutput::Instance(instance) => write_instance(writer, instance),
        RdsOutput::Instances(instances) => {
            writer.create_element("DBInstances").write_inner_content(|w| {
                instances.iter().try_for_each(|i| write_instance(w, i))
            })?;
            Ok(())
        }
        RdsOutput::SecurityGroup(group) => write_security_group(writer, group),
        RdsOutput::SecurityGroups(groups) => {
            writer
                .create_element("DBSecurityGroups")
                .write_inner_content(|w| groups.iter().try_for_each(|g| write_security_group(w, g)))?;
            Ok(())
        }
        RdsOutput::SubnetGroup(group) => write_subnet_group(writer, group),
        RdsOutput::SubnetGroups(groups) => {
            writer
                .create_element("DBSubnetGroups")
                .write_inner_content(|w| groups.iter().try_for_each(|g| write_subnet_group(w, g)))?;
            Ok(())
        }
        RdsOutput::Empty => Ok(()),
    }
}

/// Render the `{Action}Response` envelope around `output`.
pub fn output_to_xml(
    operation: RdsOperation,
    output: &RdsOutput,
    request_id: &str,
) -> Result<Vec<u8>, XmlError> {
    let action = operation.as_str();
    let mut buf = Vec::with_capacity(1024);
    let mut writer = Writer::new(&mut buf);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer
        .create_element(format!("{action}Response"))
        .with_attribute(("xmlns", RDS_NAMESPACE))
        .write_inner_content(|w| {
            w.create_element(format!("{action}Result"))
                .write_inner_content(|w| write_result_body(w, output))?;
            w.create_element("ResponseMetadata")
                .write_inner_content(|w| write_text_element(w, "RequestId", request_id))?;
            Ok(())
        })?;
    Ok(buf)
}

/// Format an RDS error as an `ErrorResponse` document.
#[must_use]
pub fn error_to_xml(fault_type: &str, code: &str, message: &str, request_id: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(256);
    if let Err(e) = write_error_xml(&mut buf, fault_type, code, message, request_id) {
        tracing::error!(error = %e, "failed to serialize RDS error XML");
        buf.clear();
    }
    buf
}

fn write_error_xml(
    buf: &mut Vec<u8>,
    fault_type: &str,
    code: &str,
    message: &str,
    request_id: &str,
) -> io::Result<()> {
    let mut writer = Writer::new(buf);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer
        .create_element("ErrorResponse")
        .with_attribute(("xmlns", RDS_NAMESPACE))
        .write_inner_content(|w| {
            w.create_element("Error").write_inner_content(|w| {
                write_text_element(w, "Type", fault_type)?;
                write_text_element(w, "Code", code)?;
                write_text_element(w, "Message", message)?;
                Ok(())
            })?;
            write_text_element(w, "RequestId", request_id)?;
            Ok(())
        })?;
    Ok(())
}
