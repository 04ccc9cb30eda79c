//! Maps CMDB API error responses onto [`CoreError`]

use serde_json::Value;

use crate::error::CoreError;
use crate::types::FieldErrors;

use super::log_sanitizer::truncate_for_log;

/// Location prefixes the server puts in front of field names
const LOCATION_PREFIXES: [&str; 3] = ["body", "query", "path"];

/// Decode a non-success response into a [`CoreError`]
///
/// Understands the CMDB envelope (`error_code` / `detail` /
/// `validation_errors`) and the plain `{"detail": [{"loc", "msg"}]}` shape.
/// Bodies that are not JSON are used verbatim as the message.
pub fn decode_error_response(status: u16, body: &str) -> CoreError {
    let json: Option<Value> = serde_json::from_str(body).ok();
    let message = json
        .as_ref()
        .and_then(extract_message)
        .unwrap_or_else(|| fallback_message(status, body));

    if status == 422 || status == 400 {
        if let Some(errors) = json.as_ref().map(extract_field_errors) {
            if !errors.is_empty() {
                return CoreError::Validation(errors);
            }
        }
    }

    match status {
        401 => CoreError::Unauthorized(message),
        403 => CoreError::Forbidden(message),
        404 => CoreError::NotFound(message),
        409 => CoreError::Conflict(message),
        500..=599 => CoreError::Server { status, message },
        _ => CoreError::Http { status, message },
    }
}

fn extract_message(json: &Value) -> Option<String> {
    match json.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            // FastAPI 默认格式：取第一条 msg
            if let Some(msg) = items.iter().find_map(|item| item.get("msg")?.as_str()) {
                return Some(msg.to_string());
            }
        }
        _ => {}
    }
    ["message", "error_code"]
        .iter()
        .find_map(|key| json.get(*key)?.as_str())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn fallback_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {status}")
    } else {
        truncate_for_log(body)
    }
}

fn extract_field_errors(json: &Value) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Some(Value::Array(items)) = json.get("validation_errors") {
        for item in items {
            let Some(field) = item.get("field").and_then(Value::as_str) else {
                continue;
            };
            let message = item
                .get("msg")
                .or_else(|| item.get("message"))
                .and_then(Value::as_str)
                .map(ToString::to_string)
                .or_else(|| {
                    item.get("error_code")
                        .and_then(Value::as_str)
                        .map(humanize_code)
                })
                .unwrap_or_else(|| "invalid value".to_string());
            errors
                .entry(normalize_field(&field.split(" -> ").collect::<Vec<_>>()))
                .or_insert(message);
        }
    }

    if let Some(Value::Array(items)) = json.get("detail") {
        for item in items {
            let Some(Value::Array(loc)) = item.get("loc") else {
                continue;
            };
            let segments: Vec<String> = loc.iter().map(segment_text).collect();
            let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
            let message = item
                .get("msg")
                .and_then(Value::as_str)
                .unwrap_or("invalid value")
                .to_string();
            errors.entry(normalize_field(&segments)).or_insert(message);
        }
    }

    errors
}

fn segment_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `["body", "interfaces", "0", "ip"]` -> `interfaces.0.ip`
fn normalize_field(segments: &[&str]) -> String {
    let segments = match segments.split_first() {
        Some((first, rest)) if LOCATION_PREFIXES.contains(&first.trim()) && !rest.is_empty() => {
            rest
        }
        _ => segments,
    };
    segments
        .iter()
        .map(|s| s.trim())
        .collect::<Vec<_>>()
        .join(".")
}

/// `INVALID_IP_ADDRESS` -> `invalid ip address`
fn humanize_code(code: &str) -> String {
    code.to_lowercase().replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmdb_validation_envelope_maps_to_field_errors() {
        let body = r#"{
            "error_code": "VALIDATION_ERROR",
            "detail": "Invalid input data",
            "validation_errors": [
                {"field": "body -> name", "error_code": "VALIDATION_ERROR", "type": "missing"},
                {"field": "body -> interfaces -> 0 -> ip_address", "error_code": "INVALID_IP_ADDRESS", "type": "value_error"}
            ]
        }"#;

        let err = decode_error_response(422, body);
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.get("name").map(String::as_str), Some("validation error"));
        assert_eq!(
            errors.get("interfaces.0.ip_address").map(String::as_str),
            Some("invalid ip address")
        );
    }

    #[test]
    fn default_detail_list_maps_to_field_errors() {
        let body = r#"{"detail": [{"loc": ["body", "site_id"], "msg": "field required", "type": "missing"}]}"#;
        let err = decode_error_response(422, body);
        assert_eq!(
            err.field_errors()
                .and_then(|e| e.get("site_id"))
                .map(String::as_str),
            Some("field required")
        );
    }

    #[test]
    fn unprocessable_without_fields_is_plain_http_error() {
        let err = decode_error_response(422, r#"{"detail": "Tag already used"}"#);
        assert!(matches!(
            err,
            CoreError::Http { status: 422, ref message } if message == "Tag already used"
        ));
    }

    #[test]
    fn status_codes_map_to_variants() {
        assert!(matches!(
            decode_error_response(401, r#"{"detail": "Not authenticated"}"#),
            CoreError::Unauthorized(ref m) if m == "Not authenticated"
        ));
        assert!(matches!(
            decode_error_response(403, ""),
            CoreError::Forbidden(ref m) if m == "HTTP 403"
        ));
        assert!(matches!(
            decode_error_response(404, r#"{"error_code": "ASSET_NOT_FOUND", "detail": "Asset not found"}"#),
            CoreError::NotFound(ref m) if m == "Asset not found"
        ));
        assert!(matches!(
            decode_error_response(409, r#"{"error_code": "DUPLICATE_TAG"}"#),
            CoreError::Conflict(ref m) if m == "DUPLICATE_TAG"
        ));
    }

    #[test]
    fn server_errors_keep_raw_body() {
        let err = decode_error_response(502, "Bad Gateway");
        assert!(matches!(
            err,
            CoreError::Server { status: 502, ref message } if message == "Bad Gateway"
        ));

        let err = decode_error_response(500, "");
        assert_eq!(err.to_string(), "Server error (500): HTTP 500");
    }
}
