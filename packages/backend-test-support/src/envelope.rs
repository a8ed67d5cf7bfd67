//! Assertions on the `{success, message?, data?, error?}` response envelope.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde_json::Value;

/// Parse a response body and check the fields every envelope shares.
pub fn parse_envelope(body: &[u8]) -> Value {
    let value: Value = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "response body is not JSON ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });
    assert!(
        value.get("success").and_then(Value::as_bool).is_some(),
        "envelope without boolean `success`: {value}"
    );
    value
}

/// Assert a failure envelope with `status` and `message`. Returns the
/// `error` field, if any.
pub fn assert_failure(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_message: &str,
) -> Option<String> {
    let value = parse_envelope(body);
    assert_eq!(status, expected_status, "unexpected status, body: {value}");
    assert_eq!(value["success"], Value::Bool(false), "body: {value}");
    assert_eq!(
        value["message"].as_str(),
        Some(expected_message),
        "body: {value}"
    );
    assert!(value.get("data").is_none(), "failure carried data: {value}");
    assert!(
        headers.contains_key("x-trace-id"),
        "failure without x-trace-id header"
    );
    value["error"].as_str().map(str::to_owned)
}

/// Assert a success envelope with `status`. Returns the `data` field
/// (`Value::Null` when absent).
pub fn assert_success(status: StatusCode, body: &[u8], expected_status: StatusCode) -> Value {
    let value = parse_envelope(body);
    assert_eq!(status, expected_status, "unexpected status, body: {value}");
    assert_eq!(value["success"], Value::Bool(true), "body: {value}");
    assert!(value.get("error").is_none(), "success carried error: {value}");
    value.get("data").cloned().unwrap_or(Value::Null)
}

/// Recursively check that no object key named `key` appears anywhere.
pub fn assert_no_key(value: &Value, key: &str) {
    match value {
        Value::Object(map) => {
            assert!(!map.contains_key(key), "found `{key}` in {value}");
            map.values().for_each(|v| assert_no_key(v, key));
        }
        Value::Array(items) => items.iter().for_each(|v| assert_no_key(v, key)),
        _ => {}
    }
}
