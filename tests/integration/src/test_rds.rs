//! Database provisioning integration tests.

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::{Response, StatusCode};
    use mockstack::{ActivationGuard, InterceptError};
    use mockstack_core::AwsRegion;

    use crate::{
        RDS_REGION, activate, header, mock, rds_call, send, with_body, xml_text, xml_texts,
    };

    fn call(guard: &ActivationGuard, params: &[(&str, &str)]) -> Response<Bytes> {
        send(guard, rds_call(params))
    }

    fn ok(guard: &ActivationGuard, params: &[(&str, &str)]) -> Response<Bytes> {
        let resp = call(guard, params);
        assert_eq!(
            resp.status(),
            StatusCode::OK,
            "{}",
            String::from_utf8_lossy(resp.body())
        );
        resp
    }

    fn create_instance(
        guard: &ActivationGuard,
        id: &str,
        extra: &[(&str, &str)],
    ) -> Response<Bytes> {
        let mut params = vec![
            ("Action", "CreateDBInstance"),
            ("DBInstanceIdentifier", id),
            ("AllocatedStorage", "10"),
            ("DBInstanceClass", "db.m1.small"),
            ("MasterUsername", "root"),
            ("MasterUserPassword", "hunter2"),
        ];
        params.extend_from_slice(extra);
        call(guard, &params)
    }

    fn create_security_group(guard: &ActivationGuard, name: &str) {
        ok(
            guard,
            &[
                ("Action", "CreateDBSecurityGroup"),
                ("DBSecurityGroupName", name),
                ("DBSecurityGroupDescription", "DB Security Group"),
            ],
        );
    }

    fn create_subnet_group(
        guard: &ActivationGuard,
        name: &str,
        subnets: &[&str],
    ) -> Response<Bytes> {
        let members: Vec<String> = (1..=subnets.len())
            .map(|i| format!("SubnetIds.member.{i}"))
            .collect();
        let mut params = vec![
            ("Action", "CreateDBSubnetGroup"),
            ("DBSubnetGroupName", name),
            ("DBSubnetGroupDescription", "my db subnet"),
        ];
        params.extend(members.iter().map(String::as_str).zip(subnets.iter().copied()));
        call(guard, &params)
    }

    fn register_subnets(guard: &ActivationGuard, ids: &[&str]) {
        let region = AwsRegion::new(RDS_REGION);
        for id in ids {
            guard.network().register(&region, *id);
        }
    }

    fn describe_instances(guard: &ActivationGuard) -> Vec<String> {
        let resp = ok(guard, &[("Action", "DescribeDBInstances")]);
        xml_texts(resp.body(), "DBInstanceIdentifier")
    }

    #[test]
    fn test_should_create_database() {
        let mock = mock();
        let guard = activate(&mock);
        create_security_group(&guard, "my_sg");

        let resp = create_instance(&guard, "db-master-1", &[("DBSecurityGroups.member.1", "my_sg")]);
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(header(&resp, "x-amzn-requestid").is_some());
        let body = resp.body();
        assert_eq!(xml_text(body, "DBInstanceStatus"), "available");
        assert_eq!(xml_text(body, "DBInstanceIdentifier"), "db-master-1");
        assert_eq!(xml_text(body, "AllocatedStorage"), "10");
        assert_eq!(xml_text(body, "DBInstanceClass"), "db.m1.small");
        assert_eq!(xml_text(body, "MasterUsername"), "root");
        assert_eq!(
            xml_text(body, "Address"),
            "db-master-1.aaaaaaaaaa.us-west-2.rds.amazonaws.com"
        );
        assert_eq!(xml_text(body, "Port"), "3306");
        assert_eq!(xml_texts(body, "DBSecurityGroupName"), vec!["my_sg"]);
        assert_eq!(xml_texts(body, "RequestId").len(), 1);
    }

    #[test]
    fn test_should_reject_unknown_security_group_at_creation() {
        let mock = mock();
        let guard = activate(&mock);

        let resp = create_instance(&guard, "db-master-1", &[("DBSecurityGroups.member.1", "my_sg")]);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(xml_text(resp.body(), "Code"), "DBSecurityGroupNotFound");
        assert!(describe_instances(&guard).is_empty());
    }

    #[test]
    fn test_should_describe_databases() {
        let mock = mock();
        let guard = activate(&mock);
        assert!(describe_instances(&guard).is_empty());

        create_instance(&guard, "db-master-1", &[]);
        create_instance(&guard, "db-master-2", &[]);
        assert_eq!(describe_instances(&guard), vec!["db-master-1", "db-master-2"]);

        let resp = ok(
            &guard,
            &[
                ("Action", "DescribeDBInstances"),
                ("DBInstanceIdentifier", "db-master-1"),
            ],
        );
        assert_eq!(xml_texts(resp.body(), "DBInstanceIdentifier"), vec!["db-master-1"]);
    }

    #[test]
    fn test_should_refuse_duplicate_database() {
        let mock = mock();
        let guard = activate(&mock);
        create_instance(&guard, "db-master-1", &[]);

        let resp = create_instance(&guard, "db-master-1", &[]);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(xml_text(resp.body(), "Code"), "DBInstanceAlreadyExists");
    }

    #[test]
    fn test_should_fail_on_missing_database() {
        let mock = mock();
        let guard = activate(&mock);

        let resp = call(
            &guard,
            &[("Action", "DescribeDBInstances"), ("DBInstanceIdentifier", "not-a-db")],
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(xml_text(resp.body(), "Code"), "DBInstanceNotFound");

        let resp = call(
            &guard,
            &[("Action", "DeleteDBInstance"), ("DBInstanceIdentifier", "not-a-db")],
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(xml_text(resp.body(), "Code"), "DBInstanceNotFound");
    }

    #[test]
    fn test_should_delete_database() {
        let mock = mock();
        let guard = activate(&mock);
        create_instance(&guard, "db-master-1", &[]);
        assert_eq!(describe_instances(&guard).len(), 1);

        let resp = ok(
            &guard,
            &[("Action", "DeleteDBInstance"), ("DBInstanceIdentifier", "db-master-1")],
        );
        assert_eq!(xml_text(resp.body(), "DBInstanceIdentifier"), "db-master-1");
        assert!(describe_instances(&guard).is_empty());
    }

    #[test]
    fn test_should_report_missing_and_malformed_parameters() {
        let mock = mock();
        let guard = activate(&mock);

        let resp = call(&guard, &[("Action", "DeleteDBInstance")]);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(xml_text(resp.body(), "Code"), "MissingParameter");

        let resp = call(
            &guard,
            &[
                ("Action", "CreateDBInstance"),
                ("DBInstanceIdentifier", "db-master-2"),
                ("AllocatedStorage", "ten"),
                ("DBInstanceClass", "db.m1.small"),
                ("MasterUsername", "root"),
                ("MasterUserPassword", "hunter2"),
            ],
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(xml_text(resp.body(), "Code"), "InvalidParameterValue");
    }

    #[test]
    fn test_should_create_security_group() {
        let mock = mock();
        let guard = activate(&mock);

        let resp = ok(
            &guard,
            &[
                ("Action", "CreateDBSecurityGroup"),
                ("DBSecurityGroupName", "db_sg"),
                ("DBSecurityGroupDescription", "DB Security Group"),
            ],
        );
        let body = resp.body();
        assert_eq!(xml_text(body, "DBSecurityGroupName"), "db_sg");
        assert_eq!(xml_text(body, "DBSecurityGroupDescription"), "DB Security Group");
        assert!(xml_texts(body, "CIDRIP").is_empty());
    }

    #[test]
    fn test_should_describe_security_groups() {
        let mock = mock();
        let guard = activate(&mock);
        let names = |guard: &ActivationGuard, filter: Option<&str>| {
            let mut params = vec![("Action", "DescribeDBSecurityGroups")];
            params.extend(filter.map(|f| ("DBSecurityGroupName", f)));
            xml_texts(ok(guard, &params).body(), "DBSecurityGroupName")
        };
        assert!(names(&guard, None).is_empty());

        create_security_group(&guard, "db_sg1");
        create_security_group(&guard, "db_sg2");
        assert_eq!(names(&guard, None), vec!["db_sg1", "db_sg2"]);
        assert_eq!(names(&guard, Some("db_sg1")), vec!["db_sg1"]);

        let resp = call(
            &guard,
            &[("Action", "DescribeDBSecurityGroups"), ("DBSecurityGroupName", "not-a-sg")],
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(xml_text(resp.body(), "Code"), "DBSecurityGroupNotFound");
    }

    #[test]
    fn test_should_delete_security_group() {
        let mock = mock();
        let guard = activate(&mock);
        create_security_group(&guard, "db_sg");

        ok(
            &guard,
            &[("Action", "DeleteDBSecurityGroup"), ("DBSecurityGroupName", "db_sg")],
        );
        let resp = ok(&guard, &[("Action", "DescribeDBSecurityGroups")]);
        assert!(xml_texts(resp.body(), "DBSecurityGroupName").is_empty());

        let resp = call(
            &guard,
            &[("Action", "DeleteDBSecurityGroup"), ("DBSecurityGroupName", "not-a-db")],
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(xml_text(resp.body(), "Code"), "DBSecurityGroupNotFound");
    }

    #[test]
    fn test_should_keep_instance_after_security_group_delete() {
        let mock = mock();
        let guard = activate(&mock);
        create_security_group(&guard, "db_sg");
        create_instance(&guard, "db-master-1", &[("DBSecurityGroups.member.1", "db_sg")]);

        ok(
            &guard,
            &[("Action", "DeleteDBSecurityGroup"), ("DBSecurityGroupName", "db_sg")],
        );
        let resp = ok(
            &guard,
            &[
                ("Action", "DescribeDBInstances"),
                ("DBInstanceIdentifier", "db-master-1"),
            ],
        );
        assert_eq!(xml_texts(resp.body(), "DBSecurityGroupName"), vec!["db_sg"]);

        let resp = call(
            &guard,
            &[("Action", "DescribeDBSecurityGroups"), ("DBSecurityGroupName", "db_sg")],
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_should_authorize_security_group_ingress() {
        let mock = mock();
        let guard = activate(&mock);
        create_security_group(&guard, "db_sg");

        let resp = ok(
            &guard,
            &[
                ("Action", "AuthorizeDBSecurityGroupIngress"),
                ("DBSecurityGroupName", "db_sg"),
                ("CIDRIP", "10.3.2.45/32"),
            ],
        );
        assert_eq!(xml_texts(resp.body(), "CIDRIP"), vec!["10.3.2.45/32"]);

        let resp = ok(&guard, &[("Action", "DescribeDBSecurityGroups")]);
        assert_eq!(xml_texts(resp.body(), "CIDRIP"), vec!["10.3.2.45/32"]);
    }

    #[test]
    fn test_should_replace_security_groups_on_modify() {
        let mock = mock();
        let guard = activate(&mock);
        create_security_group(&guard, "db_sg");
        create_security_group(&guard, "other_sg");
        create_instance(&guard, "db-master-1", &[("DBSecurityGroups.member.1", "other_sg")]);

        ok(
            &guard,
            &[
                ("Action", "ModifyDBInstance"),
                ("DBInstanceIdentifier", "db-master-1"),
                ("DBSecurityGroups.member.1", "db_sg"),
            ],
        );

        let resp = ok(&guard, &[("Action", "DescribeDBInstances")]);
        assert_eq!(xml_texts(resp.body(), "DBSecurityGroupName"), vec!["db_sg"]);
    }

    #[test]
    fn test_should_create_subnet_group() {
        let mock = mock();
        let guard = activate(&mock);
        register_subnets(&guard, &["subnet-1a2b3c4d", "subnet-5e6f7a8b"]);

        let resp = create_subnet_group(&guard, "db_subnet", &["subnet-1a2b3c4d", "subnet-5e6f7a8b"]);
        assert_eq!(resp.status(), StatusCode::OK);
        let body = resp.body();
        assert_eq!(xml_text(body, "DBSubnetGroupName"), "db_subnet");
        assert_eq!(xml_text(body, "DBSubnetGroupDescription"), "my db subnet");
        assert_eq!(
            xml_texts(body, "SubnetIdentifier"),
            vec!["subnet-1a2b3c4d", "subnet-5e6f7a8b"]
        );
    }

    #[test]
    fn test_should_reject_unknown_subnet() {
        let mock = mock();
        let guard = activate(&mock);

        let resp = create_subnet_group(&guard, "db_subnet", &["subnet-deadbeef"]);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(xml_text(resp.body(), "Code"), "InvalidSubnetID.NotFound");
    }

    #[test]
    fn test_should_describe_subnet_groups() {
        let mock = mock();
        let guard = activate(&mock);
        register_subnets(&guard, &["subnet-1a2b3c4d"]);
        create_subnet_group(&guard, "db_subnet1", &["subnet-1a2b3c4d"]);
        create_subnet_group(&guard, "db_subnet2", &["subnet-1a2b3c4d"]);

        let resp = ok(&guard, &[("Action", "DescribeDBSubnetGroups")]);
        assert_eq!(xml_texts(resp.body(), "DBSubnetGroupName").len(), 2);

        let resp = ok(
            &guard,
            &[("Action", "DescribeDBSubnetGroups"), ("DBSubnetGroupName", "db_subnet1")],
        );
        assert_eq!(xml_texts(resp.body(), "DBSubnetGroupName"), vec!["db_subnet1"]);

        let resp = call(
            &guard,
            &[("Action", "DescribeDBSubnetGroups"), ("DBSubnetGroupName", "not-a-subnet")],
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(xml_text(resp.body(), "Code"), "DBSubnetGroupNotFoundFault");
    }

    #[test]
    fn test_should_delete_subnet_group() {
        let mock = mock();
        let guard = activate(&mock);
        register_subnets(&guard, &["subnet-1a2b3c4d"]);
        create_subnet_group(&guard, "db_subnet1", &["subnet-1a2b3c4d"]);

        let delete = [("Action", "DeleteDBSubnetGroup"), ("DBSubnetGroupName", "db_subnet1")];
        ok(&guard, &delete);
        let resp = ok(&guard, &[("Action", "DescribeDBSubnetGroups")]);
        assert!(xml_texts(resp.body(), "DBSubnetGroupName").is_empty());

        let resp = call(&guard, &delete);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_should_create_database_in_subnet_group() {
        let mock = mock();
        let guard = activate(&mock);
        register_subnets(&guard, &["subnet-1a2b3c4d"]);
        create_subnet_group(&guard, "db_subnet1", &["subnet-1a2b3c4d"]);

        let resp = create_instance(&guard, "db-master-1", &[("DBSubnetGroupName", "db_subnet1")]);
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = ok(
            &guard,
            &[
                ("Action", "DescribeDBInstances"),
                ("DBInstanceIdentifier", "db-master-1"),
            ],
        );
        assert_eq!(xml_text(resp.body(), "DBSubnetGroupName"), "db_subnet1");

        let resp = create_instance(&guard, "db-master-2", &[("DBSubnetGroupName", "missing")]);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(xml_text(resp.body(), "Code"), "DBSubnetGroupNotFoundFault");
    }

    #[test]
    fn test_should_link_read_replica_to_source() {
        let mock = mock();
        let guard = activate(&mock);
        create_instance(&guard, "db-master-1", &[]);

        let resp = ok(
            &guard,
            &[
                ("Action", "CreateDBInstanceReadReplica"),
                ("DBInstanceIdentifier", "replica"),
                ("SourceDBInstanceIdentifier", "db-master-1"),
                ("DBInstanceClass", "db.m1.small"),
            ],
        );
        let body = resp.body();
        assert_eq!(xml_text(body, "DBInstanceIdentifier"), "replica");
        assert_eq!(xml_text(body, "DBInstanceClass"), "db.m1.small");
        assert_eq!(xml_text(body, "ReadReplicaSourceDBInstanceIdentifier"), "db-master-1");
        assert_eq!(xml_text(body, "Normal"), "true");
        assert_eq!(xml_text(body, "StatusType"), "read replication");
        assert_eq!(xml_texts(body, "Status"), vec!["replicating"]);

        let describe_primary = [
            ("Action", "DescribeDBInstances"),
            ("DBInstanceIdentifier", "db-master-1"),
        ];
        let resp = ok(&guard, &describe_primary);
        assert_eq!(
            xml_texts(resp.body(), "ReadReplicaDBInstanceIdentifier"),
            vec!["replica"]
        );

        ok(
            &guard,
            &[("Action", "DeleteDBInstance"), ("DBInstanceIdentifier", "replica")],
        );
        let resp = ok(&guard, &describe_primary);
        assert!(xml_texts(resp.body(), "ReadReplicaDBInstanceIdentifier").is_empty());
    }

    #[test]
    fn test_should_fail_replica_of_missing_source() {
        let mock = mock();
        let guard = activate(&mock);

        let resp = call(
            &guard,
            &[
                ("Action", "CreateDBInstanceReadReplica"),
                ("DBInstanceIdentifier", "replica"),
                ("SourceDBInstanceIdentifier", "db-master-1"),
            ],
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(xml_text(resp.body(), "Code"), "DBInstanceNotFound");
    }

    #[test]
    fn test_should_keep_regions_apart() {
        let mock = mock();
        let guard = activate(&mock);
        create_instance(&guard, "db-master-1", &[]);

        let east = with_body(
            http::Request::builder()
                .method("POST")
                .uri("https://rds.amazonaws.com/")
                .header("content-type", "application/x-www-form-urlencoded"),
            "Action=DescribeDBInstances",
        );
        let resp = send(&guard, east);
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(xml_texts(resp.body(), "DBInstanceIdentifier").is_empty());
    }

    #[test]
    fn test_should_reject_unknown_action_as_unsupported() {
        let mock = mock();
        let guard = activate(&mock);

        let err = guard
            .send(rds_call(&[("Action", "RebootDBInstance")]))
            .unwrap_err();
        assert!(matches!(err, InterceptError::Unsupported(_)), "got {err:?}");
    }
}
