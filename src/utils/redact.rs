use serde_json::Value;

/// Field names whose values are masked before a request body reaches a log
/// line. Matching is on the exact name at the top level only.
pub const SENSITIVE_FIELDS: &[&str] = &["password", "token", "secret", "apiKey"];

/// Replacement written over a sensitive field's value.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Returns a copy of `body` with every top-level sensitive field replaced by
/// the redaction marker. Nested objects are left untouched; callers must not
/// rely on this for anything below the top level.
pub fn redact_fields(body: &Value) -> Value {
    let mut redacted = body.clone();
    if let Value::Object(map) = &mut redacted {
        for field in SENSITIVE_FIELDS {
            if let Some(value) = map.get_mut(*field) {
                *value = Value::String(REDACTION_MARKER.to_string());
            }
        }
    }
    redacted
}
