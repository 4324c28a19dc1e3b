//! Hierarchical listing integration tests.

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use mockstack::ActivationGuard;

    use crate::{activate, mock, s3, s3_call, send, with_body, xml_text, xml_texts};

    const NAMES: [&str; 6] = ["x/key", "y.key1", "y.key2", "y.key3", "x/y/key", "x/y/z/key"];

    fn seed(guard: &ActivationGuard) {
        send(guard, s3_call("PUT", "/test_bucket"));
        for name in NAMES {
            let resp = send(
                guard,
                with_body(s3("PUT", &format!("/test_bucket/toplevel/{name}")), "somedata"),
            );
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }

    /// Returned names in document order: `Contents` keys, then common prefixes.
    fn list(guard: &ActivationGuard, query: &str) -> Vec<String> {
        let resp = send(guard, s3_call("GET", &format!("/test_bucket{query}")));
        assert_eq!(resp.status(), StatusCode::OK);
        let body = resp.body();
        let mut names = xml_texts(body, "Key");
        let prefixes = xml_texts(body, "Prefix");
        // The first `Prefix` is the request echo; the rest sit in `CommonPrefixes`.
        names.extend(prefixes.into_iter().skip(1));
        names
    }

    #[test]
    fn test_should_list_every_key_under_prefix_without_delimiter() {
        let mock = mock();
        let guard = activate(&mock);
        seed(&guard);

        assert_eq!(
            list(&guard, "?prefix=toplevel/"),
            vec![
                "toplevel/x/key",
                "toplevel/x/y/key",
                "toplevel/x/y/z/key",
                "toplevel/y.key1",
                "toplevel/y.key2",
                "toplevel/y.key3",
            ]
        );
    }

    #[test]
    fn test_should_collapse_common_prefixes_under_prefix() {
        let mock = mock();
        let guard = activate(&mock);
        seed(&guard);

        assert_eq!(
            list(&guard, "?prefix=toplevel/&delimiter=/"),
            vec![
                "toplevel/y.key1",
                "toplevel/y.key2",
                "toplevel/y.key3",
                "toplevel/x/",
            ]
        );
    }

    #[test]
    fn test_should_collapse_without_trailing_delimiter_when_prefix_absent() {
        let mock = mock();
        let guard = activate(&mock);
        seed(&guard);

        assert_eq!(list(&guard, "?delimiter=/"), vec!["toplevel"]);
        assert_eq!(list(&guard, "?prefix=&delimiter=/"), vec!["toplevel"]);
    }

    #[test]
    fn test_should_list_partial_segment_prefix() {
        let mock = mock();
        let guard = activate(&mock);
        seed(&guard);

        assert_eq!(
            list(&guard, "?prefix=toplevel/x"),
            vec!["toplevel/x/key", "toplevel/x/y/key", "toplevel/x/y/z/key"]
        );
        assert_eq!(list(&guard, "?prefix=toplevel/x&delimiter=/"), vec!["toplevel/x/"]);
    }

    #[test]
    fn test_should_echo_listing_parameters() {
        let mock = mock();
        let guard = activate(&mock);
        seed(&guard);

        let resp = send(&guard, s3_call("GET", "/test_bucket?prefix=toplevel/&delimiter=/"));
        let body = resp.body();
        assert_eq!(xml_text(body, "Name"), "test_bucket");
        assert_eq!(xml_text(body, "Delimiter"), "/");
        assert_eq!(xml_text(body, "IsTruncated"), "false");
        assert!(xml_texts(body, "StorageClass").iter().all(|c| c == "STANDARD"));
        assert_eq!(xml_texts(body, "Size"), vec!["8", "8", "8"]);
    }

    #[test]
    fn test_should_list_keys_with_special_characters() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/test_bucket_name"));
        let resp = send(
            &guard,
            with_body(
                s3("PUT", "/test_bucket_name/test_list_keys_2/%2Ax%2B%3F%5E%40~%21y"),
                "value1",
            ),
        );
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = send(
            &guard,
            s3_call("GET", "/test_bucket_name?prefix=test_list_keys_2%2F&delimiter=%2F"),
        );
        assert_eq!(
            xml_texts(resp.body(), "Key"),
            vec!["test_list_keys_2/*x+?^@~!y"]
        );
    }

    #[test]
    fn test_should_list_empty_bucket() {
        let mock = mock();
        let guard = activate(&mock);
        send(&guard, s3_call("PUT", "/empty"));

        let resp = send(&guard, s3_call("GET", "/empty"));
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(xml_texts(resp.body(), "Key").is_empty());
    }
}
