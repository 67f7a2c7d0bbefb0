//! Slot schemas
//!
//! Each intent declares the slots it understands, how their values are
//! coerced and which defaults apply. Slots not named by the schema are
//! passed through untouched.

use crate::error::{IntentError, IntentResult};
use serde_json::{Number, Value};
use spotifyplus_core::names::slot;
use spotifyplus_core::{SlotValue, Slots};

/// How a slot value is coerced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotKind {
    String,
    Bool,
    Float { min: f64, max: f64 },
    Int { min: i64, max: i64 },
}

/// One slot of an intent's schema
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSpec {
    pub name: &'static str,
    pub kind: SlotKind,
    /// Inserted when the slot is absent
    pub default: Option<Value>,
}

impl SlotSpec {
    /// Free text slot
    pub fn string(name: &'static str) -> Self {
        Self {
            name,
            kind: SlotKind::String,
            default: None,
        }
    }

    /// Boolean slot; accepts `on`/`off` and similar words
    pub fn bool(name: &'static str) -> Self {
        Self {
            name,
            kind: SlotKind::Bool,
            default: None,
        }
    }

    pub fn float(name: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            kind: SlotKind::Float { min, max },
            default: None,
        }
    }

    /// Integer slot limited to `min..=max`
    pub fn int(name: &'static str, min: i64, max: i64) -> Self {
        Self {
            name,
            kind: SlotKind::Int { min, max },
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// `delay` seconds before verifying a player command, 0..=10, default 0.5
    pub fn delay() -> Self {
        Self::float(slot::DELAY, 0.0, 10.0).with_default(0.5)
    }

    /// Coerce a slot value; `null` is always accepted
    pub fn coerce(&self, value: &Value) -> Result<Value, String> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        match self.kind {
            SlotKind::String => Ok(match value {
                Value::String(_) => value.clone(),
                Value::Bool(b) => Value::String(b.to_string()),
                Value::Number(n) => Value::String(n.to_string()),
                _ => return Err("expected a string".to_string()),
            }),
            SlotKind::Bool => coerce_bool(value).map(Value::Bool),
            SlotKind::Float { min, max } => {
                let f = coerce_f64(value)?;
                if f < min || f > max {
                    return Err(format!("value must be between {} and {}", min, max));
                }
                Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| "expected a finite number".to_string())
            }
            SlotKind::Int { min, max } => {
                let i = coerce_i64(value)?;
                if i < min || i > max {
                    return Err(format!("value must be between {} and {}", min, max));
                }
                Ok(Value::from(i))
            }
        }
    }
}

fn coerce_bool(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" | "enable" => Ok(true),
            "0" | "false" | "no" | "off" | "disable" => Ok(false),
            other => Err(format!("invalid boolean value '{}'", other)),
        },
        _ => Err("expected a boolean".to_string()),
    }
}

fn coerce_f64(value: &Value) -> Result<f64, String> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| "expected a number".to_string()),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("'{}' is not a number", s)),
        _ => Err("expected a number".to_string()),
    }
}

fn coerce_i64(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| "expected an integer".to_string()),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .or_else(|_| s.parse::<f64>().map(|f| f.trunc() as i64))
                .map_err(|_| format!("'{}' is not an integer", s))
        }
        _ => Err("expected an integer".to_string()),
    }
}

/// Slots every SpotifyPlus intent accepts for target matching
pub fn target_slots() -> Vec<SlotSpec> {
    vec![
        SlotSpec::string(slot::NAME),
        SlotSpec::string(slot::AREA),
        SlotSpec::string(slot::FLOOR),
        SlotSpec::string(slot::PREFERRED_AREA_ID),
        SlotSpec::string(slot::PREFERRED_FLOOR_ID),
    ]
}

/// Validate `slots` against `schema`, returning the coerced slots
///
/// Present slots keep their text and get a coerced value; absent slots
/// with a default are added with the default as both text and value.
pub fn validate_slots(schema: &[SlotSpec], slots: &Slots) -> IntentResult<Slots> {
    let mut validated = slots.clone();

    for spec in schema {
        match slots.get(spec.name) {
            Some(current) => {
                let value = spec.coerce(&current.value).map_err(|message| IntentError::InvalidSlot {
                    slot: spec.name.to_string(),
                    message,
                })?;
                validated.insert(spec.name, SlotValue::new(current.text.clone(), value));
            }
            None => {
                if let Some(default) = &spec.default {
                    let text = match default {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    validated.insert(spec.name, SlotValue::new(text, default.clone()));
                }
            }
        }
    }

    Ok(validated)
}
