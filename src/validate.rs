//! Charset validation shared by the auth and student endpoints.

use serde_json::Value;

/// True iff `s` is one or more ASCII letters, digits, or spaces, and
/// nothing else.
pub fn clean_text(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ')
}

/// Checks every string member of a JSON object against [`clean_text`].
/// Non-string members are not validated.
pub fn clean_fields(fields: &Value) -> bool {
    match fields.as_object() {
        Some(map) => map.values().all(|v| match v.as_str() {
            Some(s) => clean_text(s),
            None => true,
        }),
        None => true,
    }
}
