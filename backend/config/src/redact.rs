//! Config redaction: produce safe-to-share config snapshots by masking sensitive fields.

use serde_json::Value;

/// Keys whose string values are secrets.
static SECRET_KEYS: &[&str] = &[
    "access_token",
    "accessToken",
    "api_key",
    "apiKey",
    "token",
    "secret",
    "password",
    "private_key",
];

/// Redact a config JSON value, replacing sensitive fields with a short hint.
///
/// The resulting value is safe to log or print from `check-config`.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn is_sensitive_key(key: &str) -> bool {
    SECRET_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_string(s: &str, key: &str) -> Value {
    if !is_sensitive_key(key) || s.is_empty() {
        return Value::String(s.to_string());
    }
    // First 4 chars as a hint, unless the secret is too short to spare them.
    let hint: String = if s.chars().count() > 8 {
        format!("{}***", s.chars().take(4).collect::<String>())
    } else {
        "***".to_string()
    };
    Value::String(hint)
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) => redact_string(s, key),
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                result.insert(k.clone(), redact_recursive(v, k));
            }
            Value::Object(result)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn redacts_access_token() {
        let v = json!({ "access_token": "ghp_abcdef1234567890" });
        let redacted = redact(&v);
        let token = redacted["access_token"].as_str().unwrap();
        assert_eq!(token, "ghp_***");
    }

    #[test]
    fn short_secrets_are_fully_masked() {
        let v = json!({ "apps": { "myapp": { "payload": { "password": "hunter2" } } } });
        let redacted = redact(&v);
        assert_eq!(redacted["apps"]["myapp"]["payload"]["password"], "***");
    }

    #[test]
    fn passthrough_non_sensitive() {
        let v = json!({ "apps": { "myapp": { "repo": "testuser/myapp" } } });
        let redacted = redact(&v);
        assert_eq!(redacted["apps"]["myapp"]["repo"], "testuser/myapp");
    }
}
