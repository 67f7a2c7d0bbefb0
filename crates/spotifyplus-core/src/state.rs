//! Snapshot of a player entity's state as reported by the host

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::names::attr;
use crate::{Context, EntityId, PlayerFeatures};

/// State of an entity at a point in time
///
/// Only the parts the intent handlers read are modelled: the state value
/// (`playing`, `paused`, `idle`, ...), its attributes and when it last
/// changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub entity_id: EntityId,

    /// The state value (e.g. "playing", "paused", "off")
    pub state: String,

    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,

    pub last_changed: DateTime<Utc>,

    pub context: Context,
}

impl State {
    /// Snapshot changed now, with a fresh context
    pub fn new(
        entity_id: EntityId,
        state: impl Into<String>,
        attributes: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            entity_id,
            state: state.into(),
            attributes,
            last_changed: Utc::now(),
            context: Context::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Get an attribute value by key
    pub fn attribute<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.attributes
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Get a string attribute without cloning
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(|v| v.as_str())
    }

    /// Display name of the entity, if the host set one
    pub fn friendly_name(&self) -> Option<&str> {
        self.attribute_str(attr::FRIENDLY_NAME)
    }

    /// Feature flags from the `supported_features` attribute
    pub fn supported_features(&self) -> PlayerFeatures {
        self.attribute::<u32>(attr::SUPPORTED_FEATURES)
            .map(PlayerFeatures::from_bits_retain)
            .unwrap_or_default()
    }

    /// True when the account behind the player is a premium account
    pub fn is_premium(&self) -> bool {
        self.attribute_str(attr::SP_USER_PRODUCT)
            .is_some_and(|product| product.to_lowercase().contains("premium"))
    }

    /// True when the state value is one of `states`
    pub fn is_in(&self, states: &[impl AsRef<str>]) -> bool {
        states.iter().any(|s| s.as_ref() == self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player(state: &str) -> State {
        State::new(EntityId::media_player("spotifyplus_john").unwrap(), state, HashMap::new())
    }

    #[test]
    fn test_premium_detection() {
        assert!(!player("playing").is_premium());
        assert!(player("playing").with_attribute(attr::SP_USER_PRODUCT, "Premium").is_premium());
        assert!(!player("playing").with_attribute(attr::SP_USER_PRODUCT, "free").is_premium());
        assert!(!player("playing").with_attribute(attr::SP_USER_PRODUCT, json!(1)).is_premium());
    }

    #[test]
    fn test_supported_features() {
        let state = player("idle").with_attribute(attr::SUPPORTED_FEATURES, 512 | 1024);
        assert_eq!(state.supported_features(), PlayerFeatures::PLAY_MEDIA | PlayerFeatures::VOLUME_STEP);
        assert_eq!(player("idle").supported_features(), PlayerFeatures::empty());
    }

    #[test]
    fn test_friendly_name() {
        assert_eq!(player("idle").friendly_name(), None);
        let named = player("idle").with_attribute(attr::FRIENDLY_NAME, "SpotifyPlus John");
        assert_eq!(named.friendly_name(), Some("SpotifyPlus John"));
    }

    #[test]
    fn test_is_in() {
        let state = player("paused");
        assert!(state.is_in(&["playing", "paused"]));
        assert!(!state.is_in(&["playing"]));
    }
}
