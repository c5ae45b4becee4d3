use serde_json::Value;
use std::collections::HashMap;

use crate::error::{CouchError, CouchResult};

/// Response as handed back by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Header names are lower-cased
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Decode a response: the body on 2xx, a `CouchError` otherwise.
pub fn map_response(response: &RawResponse) -> CouchResult<Value> {
    if response.is_success() {
        return Ok(decode_body(&response.body));
    }

    let mut err = CouchError::with_status(response.status);
    if let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(&response.body) {
        err.error = fields.get("error").and_then(text_field);
        err.reason = fields.get("reason").and_then(text_field);
    }
    tracing::debug!(status = response.status, error = ?err.error, "Server returned an error");
    Err(err)
}

/// Existence probe: only 200 counts as present.
///
/// 404 and 5xx both map to `false`.
pub fn map_exists(response: &RawResponse) -> bool {
    response.status == 200
}

/// Revision reported by a HEAD probe, taken from the `ETag` header.
pub fn map_etag(response: &RawResponse) -> CouchResult<String> {
    if !response.is_success() {
        return Err(map_response(response).err().unwrap_or_else(|| CouchError::with_status(response.status)));
    }
    Ok(response
        .header("etag")
        .map(|tag| tag.trim_matches('"').to_string())
        .unwrap_or_default())
}

// Empty bodies decode to null, malformed ones to their lossy text.
fn decode_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(body).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

fn text_field(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_decodes_json() {
        let response = RawResponse::new(200).with_body(r#"{"couchdb":"Welcome"}"#);
        assert_eq!(map_response(&response), Ok(json!({"couchdb": "Welcome"})));

        let response = RawResponse::new(201).with_body(r#"["_users"]"#);
        assert_eq!(map_response(&response), Ok(json!(["_users"])));
    }

    #[test]
    fn test_success_best_effort() {
        assert_eq!(map_response(&RawResponse::new(200)), Ok(Value::Null));
        assert_eq!(
            map_response(&RawResponse::new(200).with_body("\"debug\"\n")),
            Ok(json!("debug"))
        );
        assert_eq!(
            map_response(&RawResponse::new(200).with_body("not json")),
            Ok(json!("not json"))
        );
    }

    #[test]
    fn test_failure_carries_status_and_body_fields() {
        let response = RawResponse::new(404).with_body(r#"{"error":"not_found","reason":"missing"}"#);
        assert_eq!(
            map_response(&response),
            Err(CouchError {
                error: Some("not_found".to_string()),
                reason: Some("missing".to_string()),
                status_code: Some(404),
            })
        );
    }

    #[test]
    fn test_failure_without_body_fields() {
        let response = RawResponse::new(500).with_body("<html>boom</html>");
        assert_eq!(map_response(&response), Err(CouchError::with_status(500)));

        let response = RawResponse::new(401).with_body(r#"{"error":"unauthorized"}"#);
        let err = map_response(&response).unwrap_err();
        assert_eq!(err.error.as_deref(), Some("unauthorized"));
        assert!(err.reason.is_none());
        assert_eq!(err.status_code, Some(401));
    }

    #[test]
    fn test_exists_collapses_failures() {
        assert!(map_exists(&RawResponse::new(200)));
        assert!(!map_exists(&RawResponse::new(404)));
        assert!(!map_exists(&RawResponse::new(500)));
    }

    #[test]
    fn test_etag() {
        let response = RawResponse::new(200).with_header("ETag", "\"1-abc\"");
        assert_eq!(map_etag(&response), Ok("1-abc".to_string()));

        let response = RawResponse::new(200).with_header("etag", "revidhere");
        assert_eq!(map_etag(&response), Ok("revidhere".to_string()));

        assert_eq!(map_etag(&RawResponse::new(404)), Err(CouchError::with_status(404)));
    }
}
