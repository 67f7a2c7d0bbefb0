//! Typed slot records
//!
//! A slot pairs the text a user said (or that a handler produced for display)
//! with the value behind it, e.g. `artist_title` -> `{text: "Beyoncé", value:
//! "spotify:artist:6vWDO969PvNqNYHIOW5v0m"}`. Slots are both the input of an
//! intent and the rendering context of its response text.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display text plus underlying value for one named slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotValue {
    /// Human readable text
    #[serde(default)]
    pub text: String,

    /// Underlying value (string, number, bool or null)
    #[serde(default)]
    pub value: Value,
}

impl SlotValue {
    /// Create a slot value from text and value
    pub fn new(text: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }

    /// Slot whose text and value are the same string
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            value: Value::String(text.clone()),
            text,
        }
    }

    /// Empty text with a null value
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            value: Value::Null,
        }
    }

    /// Underlying value as a string slice, if it is a string
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// True when the display text is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Ordered mapping of slot name to [`SlotValue`]
///
/// Serializes as `{"<name>": {"text": ..., "value": ...}}` so templates can
/// read `{{ slots.artist_title.text }}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slots(IndexMap<String, SlotValue>);

impl Slots {
    /// Create an empty slot set
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a slot by name
    pub fn get(&self, name: &str) -> Option<&SlotValue> {
        self.0.get(name)
    }

    /// Insert or replace a slot
    pub fn insert(&mut self, name: impl Into<String>, slot: SlotValue) -> Option<SlotValue> {
        self.0.insert(name.into(), slot)
    }

    /// Insert or replace a slot from text and value
    pub fn set(&mut self, name: impl Into<String>, text: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), SlotValue::new(text, value));
    }

    /// Builder form of [`Slots::set`]
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, text, value);
        self
    }

    /// Remove a slot
    pub fn remove(&mut self, name: &str) -> Option<SlotValue> {
        self.0.shift_remove(name)
    }

    /// Check if a slot is present, blank or not
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Display text of a slot, if present
    pub fn text(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|s| s.text.as_str())
    }

    /// Display text of a slot when present and not blank
    pub fn non_blank_text(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .filter(|s| !s.is_blank())
            .map(|s| s.text.as_str())
    }

    /// Underlying value of a slot
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.0.get(name).map(|s| &s.value)
    }

    /// Underlying value as a string slice
    pub fn value_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|s| s.value_str())
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no slots are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate slots in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SlotValue)> {
        self.0.iter()
    }

    /// Slot names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, SlotValue)> for Slots {
    fn from_iter<I: IntoIterator<Item = (String, SlotValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Slots {
    type Item = (String, SlotValue);
    type IntoIter = indexmap::map::IntoIter<String, SlotValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Extend<(String, SlotValue)> for Slots {
    fn extend<I: IntoIterator<Item = (String, SlotValue)>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}
