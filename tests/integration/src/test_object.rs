//! Object read/write integration tests.

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use http::StatusCode;
    use mockstack::{ActivationGuard, InterceptError};

    use crate::{
        activate, frozen_mock, header, mock, s3, s3_call, send, with_body, xml_text, xml_texts,
    };

    fn put(guard: &ActivationGuard, path: &str, body: &'static str) {
        let resp = send(guard, with_body(s3("PUT", path), body));
        assert_eq!(resp.status(), StatusCode::OK, "put {path}");
    }

    #[test]
    fn test_should_save_and_read_back_object() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/mybucket"));

        let resp = send(&guard, with_body(s3("PUT", "/mybucket/steve"), "is awesome"));
        let etag = header(&resp, "etag").unwrap_or_else(|| panic!("put should return an ETag"));
        assert!(etag.starts_with('"') && etag.ends_with('"') && etag.len() == 34);

        let resp = send(&guard, s3_call("GET", "/mybucket/steve"));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.body().as_ref(), b"is awesome");
        assert_eq!(header(&resp, "content-type"), Some("binary/octet-stream"));
        assert_eq!(header(&resp, "content-length"), Some("10"));
    }

    #[test]
    fn test_should_return_no_such_key_for_missing_object() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));

        let resp = send(&guard, s3_call("GET", "/foobar/the-key"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(xml_text(resp.body(), "Code"), "NoSuchKey");

        let resp = send(&guard, s3_call("HEAD", "/foobar/the-key"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.body().is_empty());
    }

    #[test]
    fn test_should_store_empty_content() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));
        put(&guard, "/foobar/the-key", "");

        let resp = send(&guard, s3_call("GET", "/foobar/the-key"));
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.body().is_empty());
        assert_eq!(
            header(&resp, "etag"),
            Some("\"d41d8cd98f00b204e9800998ecf8427e\"")
        );
    }

    #[test]
    fn test_should_overwrite_with_empty_content() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));
        put(&guard, "/foobar/the-key", "foobar");
        let resp = send(&guard, s3_call("GET", "/foobar/the-key"));
        assert_eq!(resp.body().as_ref(), b"foobar");

        put(&guard, "/foobar/the-key", "");
        let resp = send(&guard, s3_call("GET", "/foobar/the-key"));
        assert!(resp.body().is_empty());
    }

    #[test]
    fn test_should_round_trip_large_content() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));
        let content = "foobar".repeat(100_000);

        let resp = send(&guard, with_body(s3("PUT", "/foobar/the-key"), content.clone()));
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = send(&guard, s3_call("GET", "/foobar/the-key"));
        assert_eq!(resp.body().len(), 600_000);
        assert_eq!(resp.body().as_ref(), content.as_bytes());
    }

    #[test]
    fn test_should_copy_object_independently() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));
        put(&guard, "/foobar/the-key", "some value");

        let resp = send(
            &guard,
            with_body(
                s3("PUT", "/foobar/new-key").header("x-amz-copy-source", "/foobar/the-key"),
                "",
            ),
        );
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(xml_texts(resp.body(), "ETag").len(), 1);

        let resp = send(&guard, s3_call("GET", "/foobar/the-key"));
        assert_eq!(resp.body().as_ref(), b"some value");
        let resp = send(&guard, s3_call("GET", "/foobar/new-key"));
        assert_eq!(resp.body().as_ref(), b"some value");

        put(&guard, "/foobar/the-key", "changed");
        let resp = send(&guard, s3_call("GET", "/foobar/new-key"));
        assert_eq!(resp.body().as_ref(), b"some value");
    }

    #[test]
    fn test_should_fail_copy_from_missing_source() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));

        let resp = send(
            &guard,
            with_body(
                s3("PUT", "/foobar/new-key").header("x-amz-copy-source", "foobar/nothing"),
                "",
            ),
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(xml_text(resp.body(), "Code"), "NoSuchKey");
    }

    #[test]
    fn test_should_expose_metadata_as_headers() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));

        let resp = send(
            &guard,
            with_body(
                s3("PUT", "/foobar/the-key")
                    .header("x-amz-meta-md", "Metadatastring")
                    .header("content-type", "text/plain"),
                "Testval",
            ),
        );
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = send(&guard, s3_call("HEAD", "/foobar/the-key"));
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.body().is_empty());
        assert_eq!(header(&resp, "x-amz-meta-md"), Some("Metadatastring"));
        assert_eq!(header(&resp, "content-type"), Some("text/plain"));
    }

    #[test]
    fn test_should_render_last_modified_in_both_formats() {
        let frozen = Utc
            .with_ymd_and_hms(2012, 1, 1, 12, 0, 0)
            .single()
            .unwrap_or_else(|| panic!("valid instant"));
        let mock = frozen_mock(frozen);
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));
        put(&guard, "/foobar/the-key", "some value");

        let resp = send(&guard, s3_call("GET", "/foobar"));
        assert_eq!(
            xml_texts(resp.body(), "LastModified"),
            vec!["2012-01-01T12:00:00.000Z"]
        );

        let resp = send(&guard, s3_call("GET", "/foobar/the-key"));
        assert_eq!(
            header(&resp, "last-modified"),
            Some("Sun, 01 Jan 2012 12:00:00 GMT")
        );
    }

    #[test]
    fn test_should_store_form_upload() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));

        let resp = send(
            &guard,
            with_body(
                s3("POST", "/foobar")
                    .header("content-type", "application/x-www-form-urlencoded"),
                "key=the-key&file=nothing",
            ),
        );
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = send(&guard, s3_call("GET", "/foobar/the-key"));
        assert_eq!(resp.body().as_ref(), b"nothing");
    }

    #[test]
    fn test_should_store_form_upload_metadata() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));

        let resp = send(
            &guard,
            with_body(
                s3("POST", "/foobar")
                    .header("content-type", "application/x-www-form-urlencoded"),
                "key=the-key&file=nothing&x-amz-meta-test=metadata",
            ),
        );
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = send(&guard, s3_call("HEAD", "/foobar/the-key"));
        assert_eq!(header(&resp, "x-amz-meta-test"), Some("metadata"));
    }

    #[test]
    fn test_should_store_multipart_form_upload() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));

        let body = "--XyZ\r\n\
            Content-Disposition: form-data; name=\"key\"\r\n\r\n\
            uploads/${filename}\r\n\
            --XyZ\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\
            Content-Type: text/plain\r\n\r\n\
            hello form\r\n\
            --XyZ--\r\n";
        let resp = send(
            &guard,
            with_body(
                s3("POST", "/foobar").header("content-type", "multipart/form-data; boundary=XyZ"),
                body,
            ),
        );
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = send(&guard, s3_call("GET", "/foobar/uploads/notes.txt"));
        assert_eq!(resp.body().as_ref(), b"hello form");
        assert_eq!(header(&resp, "content-type"), Some("text/plain"));
    }

    #[test]
    fn test_should_keep_undecodable_keys_apart_from_replacement_char() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));

        let resp = send(&guard, with_body(s3("PUT", "/foobar/%FF"), "first"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(xml_text(resp.body(), "Code"), "InvalidArgument");
        put(&guard, "/foobar/%EF%BF%BD", "second");

        let resp = send(&guard, s3_call("GET", "/foobar/%FF"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = send(&guard, s3_call("GET", "/foobar/%EF%BF%BD"));
        assert_eq!(resp.body().as_ref(), b"second");

        let resp = send(&guard, s3_call("GET", "/foobar"));
        assert_eq!(xml_texts(resp.body(), "Key"), vec!["\u{FFFD}".to_owned()]);
    }

    #[test]
    fn test_should_reject_form_metadata_that_is_not_a_header_name() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/foobar"));

        let resp = send(
            &guard,
            with_body(
                s3("POST", "/foobar")
                    .header("content-type", "application/x-www-form-urlencoded"),
                "key=the-key&file=v&x-amz-meta-my+field=v",
            ),
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(xml_text(resp.body(), "Code"), "InvalidArgument");

        let resp = send(&guard, s3_call("GET", "/foobar/the-key"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_should_reject_unmapped_methods_as_unsupported() {
        let mock = mock();
        let guard = activate(&mock);

        let err = guard.send(s3_call("PATCH", "/foobar")).unwrap_err();
        assert!(matches!(err, InterceptError::Unsupported(_)), "got {err:?}");

        let err = guard.send(s3_call("POST", "/foobar/foo")).unwrap_err();
        assert!(matches!(err, InterceptError::Unsupported(_)), "got {err:?}");
    }
}
