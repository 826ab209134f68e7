//! Tests for the auth module

use super::*;

#[test]
fn test_api_key_query() {
    let key = ApiKey::new("secret-key");
    let client = reqwest::Client::new();
    let req = key.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    let pairs: Vec<(String, String)> = built
        .url()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![("apiKey".to_string(), "secret-key".to_string())]
    );
}

#[test]
fn test_api_key_keeps_existing_query() {
    let key = ApiKey::new("k");
    let client = reqwest::Client::new();
    let req = key.apply(client.get("https://example.com/api?count=100"));

    let built = req.build().unwrap();
    assert_eq!(built.url().query(), Some("count=100&apiKey=k"));
}

#[test]
fn test_api_key_debug_is_redacted() {
    let key = ApiKey::new("super-secret");
    let debug = format!("{key:?}");
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("redacted"));
}

#[test]
fn test_api_key_is_empty() {
    assert!(ApiKey::new("").is_empty());
    assert!(ApiKey::new("   ").is_empty());
    assert!(!ApiKey::new("abc").is_empty());
}
