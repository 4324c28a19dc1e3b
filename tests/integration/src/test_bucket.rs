//! Bucket lifecycle integration tests.

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::{Request, StatusCode};

    use crate::{activate, header, mock, s3, s3_call, send, with_body, xml_text, xml_texts};

    #[test]
    fn test_should_create_and_head_bucket() {
        let mock = mock();
        let guard = activate(&mock);

        let resp = send(&guard, s3_call("PUT", "/foobar"));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(header(&resp, "location"), Some("/foobar"));
        assert!(header(&resp, "x-amz-request-id").is_some());

        let resp = send(&guard, s3_call("HEAD", "/foobar"));
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_should_list_all_buckets() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));
        send(&guard, s3_call("PUT", "/foobar2"));

        let resp = send(&guard, s3_call("GET", "/"));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(xml_texts(resp.body(), "Name"), vec!["foobar", "foobar2"]);
    }

    #[test]
    fn test_should_return_no_such_bucket_for_missing_bucket() {
        let mock = mock();
        let guard = activate(&mock);

        let resp = send(&guard, s3_call("GET", "/mybucket"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(xml_text(resp.body(), "Code"), "NoSuchBucket");

        let resp = send(&guard, s3_call("HEAD", "/mybucket-test"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_should_refuse_duplicate_bucket() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));

        let resp = send(&guard, s3_call("PUT", "/foobar"));
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(xml_text(resp.body(), "Code"), "BucketAlreadyOwnedByYou");
    }

    #[test]
    fn test_should_only_delete_empty_bucket() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));
        send(
            &guard,
            with_body(s3("PUT", "/foobar/the-key"), "some value"),
        );

        let resp = send(&guard, s3_call("DELETE", "/foobar"));
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(xml_text(resp.body(), "Code"), "BucketNotEmpty");
        let resp = send(&guard, s3_call("GET", "/foobar/the-key"));
        assert_eq!(resp.body().as_ref(), b"some value");

        let resp = send(&guard, s3_call("DELETE", "/foobar/the-key"));
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        let resp = send(&guard, s3_call("DELETE", "/foobar"));
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = send(&guard, s3_call("HEAD", "/foobar"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.body().is_empty());
        assert!(header(&resp, "x-amz-request-id").is_some());
        let resp = send(&guard, s3_call("DELETE", "/foobar"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(xml_text(resp.body(), "Code"), "NoSuchBucket");
    }

    #[test]
    fn test_should_accept_dotted_bucket_names() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/firstname.lastname"));

        let resp = send(
            &guard,
            with_body(s3("PUT", "/firstname.lastname/somekey"), "somedata"),
        );
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = send(&guard, s3_call("GET", "/firstname.lastname/somekey"));
        assert_eq!(resp.body().as_ref(), b"somedata");
    }

    #[test]
    fn test_should_partition_buckets_by_region() {
        let mock = mock();
        let guard = activate(&mock);
        let west = with_body(
            Request::builder()
                .method("PUT")
                .uri("http://s3.us-west-2.amazonaws.com/foobar"),
            Bytes::new(),
        );
        send(&guard, west);

        let resp = send(&guard, s3_call("HEAD", "/foobar"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let dashed = with_body(
            Request::builder()
                .method("HEAD")
                .uri("http://s3-us-west-2.amazonaws.com/foobar"),
            Bytes::new(),
        );
        assert_eq!(send(&guard, dashed).status(), StatusCode::OK);
    }

    #[test]
    fn test_should_address_virtual_hosted_buckets() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));

        let put = with_body(
            Request::builder()
                .method("PUT")
                .uri("http://foobar.s3.amazonaws.com/the-key"),
            "hosted",
        );
        assert_eq!(send(&guard, put).status(), StatusCode::OK);

        let resp = send(&guard, s3_call("GET", "/foobar/the-key"));
        assert_eq!(resp.body().as_ref(), b"hosted");
    }
}
