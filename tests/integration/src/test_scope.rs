//! Activation scope integration tests.

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use bytes::Bytes;
    use http::{Request, StatusCode};
    use mockstack::InterceptError;
    use mockstack_core::{AwsRegion, MockStackError};

    use crate::{RDS_REGION, activate, mock, rds_call, s3, s3_call, send, with_body, xml_texts};

    #[test]
    fn test_should_start_every_activation_empty() {
        let mock = mock();
        {
            let guard = activate(&mock);
            send(&guard, s3_call("PUT", "/foobar"));
            send(
                &guard,
                rds_call(&[
                    ("Action", "CreateDBSecurityGroup"),
                    ("DBSecurityGroupName", "db_sg"),
                    ("DBSecurityGroupDescription", "DB Security Group"),
                ]),
            );
            guard.network().register(&AwsRegion::new(RDS_REGION), "subnet-1a2b3c4d");
        }

        let guard = activate(&mock);
        let resp = send(&guard, s3_call("GET", "/"));
        assert!(xml_texts(resp.body(), "Name").is_empty());
        let resp = send(&guard, rds_call(&[("Action", "DescribeDBSecurityGroups")]));
        assert!(xml_texts(resp.body(), "DBSecurityGroupName").is_empty());

        let resp = send(
            &guard,
            rds_call(&[
                ("Action", "CreateDBSubnetGroup"),
                ("DBSubnetGroupName", "db_subnet"),
                ("DBSubnetGroupDescription", "my db subnet"),
                ("SubnetIds.member.1", "subnet-1a2b3c4d"),
            ]),
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_should_allow_one_activation_at_a_time() {
        let mock = mock();
        let guard = activate(&mock);
        assert!(matches!(mock.activate(), Err(MockStackError::AlreadyActive)));
        drop(guard);
        assert!(!mock.is_active());
    }

    #[test]
    fn test_should_release_activation_when_body_panics() {
        let mock = mock();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            mock.scoped::<()>(|guard| {
                send(guard, s3_call("PUT", "/foobar"));
                panic!("test body failed");
            })
        }));
        assert!(outcome.is_err());
        assert!(!mock.is_active());

        let status = mock
            .scoped(|guard| send(guard, s3_call("HEAD", "/foobar")).status())
            .unwrap_or_else(|e| panic!("scope: {e}"));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_should_leave_foreign_hosts_alone() {
        let mock = mock();
        let guard = activate(&mock);

        let req = with_body(Request::builder().uri("https://example.com/foobar"), Bytes::new());
        let err = guard.send(req).unwrap_err();
        assert!(
            matches!(err, InterceptError::NotIntercepted { ref host } if host == "example.com"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_should_isolate_independent_mocks() {
        let first = mock();
        let second = mock();
        let a = activate(&first);
        let b = activate(&second);

        send(&a, s3_call("PUT", "/foobar"));
        let resp = send(&b, s3_call("HEAD", "/foobar"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_should_keep_every_concurrent_put_to_one_bucket() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 25;

        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));

        std::thread::scope(|scope| {
            for t in 0..THREADS {
                let guard = &guard;
                scope.spawn(move || {
                    for i in 0..PER_THREAD {
                        let path = format!("/foobar/t{t:02}/k{i:03}");
                        let resp = send(guard, with_body(s3("PUT", &path), path.clone()));
                        assert_eq!(resp.status(), StatusCode::OK, "put {path}");
                    }
                });
            }
        });

        let keys = xml_texts(send(&guard, s3_call("GET", "/foobar")).body(), "Key");
        assert_eq!(keys.len(), THREADS * PER_THREAD);
        let mut sorted = keys.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted, keys);
    }
}
