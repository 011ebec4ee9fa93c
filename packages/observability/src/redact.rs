//! Credential redaction for structured log fields.

use serde_json::Value;
use std::collections::HashMap;

/// Replacement written in place of a redacted value.
pub const REDACTED: &str = "[REDACTED]";

const DENYLIST_KEYS: [&str; 7] = [
    "token",
    "authorization",
    "cookie",
    "password",
    "secret",
    "private_key",
    "credential",
];

/// Redact sensitive entries in place.
///
/// A field is redacted when its name contains a denylisted fragment, or when
/// its string value looks like a bearer header or a JWT.
pub fn redact_fields(fields: &mut HashMap<String, Value>) {
    for (key, value) in fields.iter_mut() {
        let redacted = redact_value(key, value);
        *value = redacted;
    }
}

fn redact_value(key: &str, value: &Value) -> Value {
    if is_sensitive_key(key) {
        return Value::String(REDACTED.to_string());
    }

    match value {
        Value::String(s) if looks_like_credential(s) => Value::String(REDACTED.to_string()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_value(k, v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(|v| redact_value(key, v)).collect()),
        _ => value.clone(),
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    DENYLIST_KEYS.iter().any(|entry| lower.contains(entry))
}

fn looks_like_credential(raw: &str) -> bool {
    let trimmed = raw.trim_matches('"');
    if trimmed.to_ascii_lowercase().starts_with("bearer ") {
        return true;
    }
    // header.payload.signature
    trimmed.matches('.').count() == 2 && trimmed.len() > 40 && !trimmed.contains(' ')
}
