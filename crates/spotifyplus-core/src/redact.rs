//! Masking of secrets before values are written to logs

use serde_json::{Map, Value};

/// Copy of `input` with every password-like entry masked
///
/// Keys containing `password` (any case) with a string value are replaced
/// by `*` repeated to the value's length; such keys holding any other
/// value are dropped from the copy.
pub fn mask_passwords(input: &Map<String, Value>) -> Map<String, Value> {
    input
        .iter()
        .filter_map(|(key, value)| {
            if !key.to_lowercase().contains("password") {
                return Some((key.clone(), value.clone()));
            }
            value
                .as_str()
                .map(|s| (key.clone(), Value::String(mask(s))))
        })
        .collect()
}

/// `*` repeated once per character of `secret`
pub fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}
