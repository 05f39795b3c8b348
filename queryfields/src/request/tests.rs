use super::*;

// =========================================================================
// PROPTEST PROPERTY TESTS - Fuzz parsers to ensure no panics
// =========================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Test that url_decode doesn't panic on arbitrary strings.
        #[test]
        fn url_decode_doesnt_panic(input in ".*") {
            let _ = url_decode(&input);
        }

        /// Test that url_decode doesn't panic on random percent sequences.
        #[test]
        fn url_decode_handles_random_percent_sequences(input in "[%0-9a-fA-F]{0,100}") {
            let _ = url_decode(&input);
        }

        /// Test query string parsing with arbitrary input.
        #[test]
        fn query_parsing_doesnt_panic(query in ".*") {
            let req = Request::new(Method::Get, format!("/test?{query}"));
            let _ = req.query("fields");
            let _ = req.query_all("fields");
        }

        /// Test multiple values for same query parameter.
        #[test]
        fn query_handles_duplicate_keys(
            key in "[a-z]{1,10}",
            count in 1usize..10
        ) {
            let params: Vec<String> = (0..count)
                .map(|i| format!("{key}=value{i}"))
                .collect();
            let req = Request::new(Method::Get, format!("/test?{}", params.join("&")));

            prop_assert_eq!(req.query(&key), Some("value0"));
            prop_assert_eq!(req.query_all(&key).len(), count);
        }
    }
}

// === URL DECODE ===

#[test]
fn test_url_decode_common_chars() {
    assert_eq!(url_decode("%26").unwrap(), "&");
    assert_eq!(url_decode("%3D").unwrap(), "=");
    assert_eq!(url_decode("%2C").unwrap(), ",");
    assert_eq!(url_decode("%21").unwrap(), "!");
    assert_eq!(url_decode("%25").unwrap(), "%");
    assert_eq!(url_decode("a+b").unwrap(), "a b");
}

#[test]
fn test_url_decode_unicode() {
    assert_eq!(url_decode("%E4%B8%AD%E6%96%87").unwrap(), "中文");
    assert_eq!(url_decode("caf%C3%A9").unwrap(), "café");
}

#[test]
fn test_url_decode_errors() {
    assert_eq!(url_decode("%"), Err(DecodeError::InvalidPercentEncoding));
    assert_eq!(url_decode("%4"), Err(DecodeError::InvalidPercentEncoding));
    assert_eq!(url_decode("%zz"), Err(DecodeError::InvalidPercentEncoding));
    assert_eq!(url_decode("%FF"), Err(DecodeError::InvalidUtf8));

    let huge = "a".repeat(MAX_URL_DECODED_LEN + 1);
    assert_eq!(url_decode(&huge), Err(DecodeError::TooLong));
}

// === QUERY PARSING ===

#[test]
fn test_query_array_params() {
    let req = Request::new(Method::Get, "/users?fields=id&fields=name&page=1");

    assert_eq!(req.query("fields"), Some("id"));
    assert_eq!(req.query_all("fields"), vec!["id", "name"]);
    assert_eq!(req.query_all("page"), vec!["1"]);
    assert!(req.query_all("missing").is_empty());
    assert_eq!(req.query("missing"), None);
}

#[test]
fn test_query_bang_key() {
    let req = Request::new(Method::Get, "/users?fields!=email&fields%21=name");

    // Both the literal and the encoded `!` land on the same key
    assert_eq!(req.query_all("fields!"), vec!["email", "name"]);
    assert!(req.query_params().contains_key("fields!"));
}

#[test]
fn test_query_encoded_delimiter() {
    let req = Request::new(Method::Get, "/users?fields=id%2Cname");
    assert_eq!(req.query("fields"), Some("id,name"));
}

#[test]
fn test_malformed_query_string() {
    let req = Request::new(Method::Get, "/path?key=value&broken&=nokey&key2=&bad=%zz");

    assert_eq!(req.query("key"), Some("value"));
    assert_eq!(req.query("broken"), Some(""));
    assert_eq!(req.query("key2"), Some(""));
    // Undecodable components are kept verbatim
    assert_eq!(req.query("bad"), Some("%zz"));
    // Empty keys are skipped
    assert_eq!(req.query_params().len(), 4);
}

#[test]
fn test_query_no_query_string() {
    let req = Request::new(Method::Get, "/path");

    assert_eq!(req.path(), "/path");
    assert_eq!(req.raw_query(), None);
    assert!(req.query_params().is_empty());
}

#[test]
fn test_query_empty_string() {
    let req = Request::new(Method::Get, "/path?");

    assert_eq!(req.raw_query(), Some(""));
    assert!(req.query_params().is_empty());
}

#[test]
fn test_query_many_pairs_all_parsed() {
    let mut query: Vec<String> = (0..1500).map(|i| format!("k{i}=v")).collect();
    query.push("fields=id".to_string());
    let params = QueryParams::parse(&query.join("&"));

    assert_eq!(params.len(), 1501);
    assert_eq!(params.get_list("fields"), vec!["id"]);
}

#[test]
fn test_query_params_from_iter_and_append() {
    let mut params: QueryParams = [("fields", "id")].into_iter().collect();
    params.append("fields", "name");

    assert_eq!(params.get_list("fields"), vec!["id", "name"]);
    assert_eq!(
        params.iter().collect::<Vec<_>>(),
        vec![("fields", "id"), ("fields", "name")]
    );
}

#[test]
fn test_method_as_str() {
    assert_eq!(Method::Get.as_str(), "GET");
    assert_eq!(Method::Post.to_string(), "POST");
    assert_eq!(Method::Delete.as_str(), "DELETE");
}
