//! Service call type for invoking host and integration services

use crate::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A call to a host service, e.g. `spotifyplus.player_media_play_context`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    pub domain: String,

    pub service: String,

    /// Service arguments; always an object
    pub service_data: Map<String, Value>,

    pub context: Context,
}

impl ServiceCall {
    /// Call without service data
    pub fn new(domain: impl Into<String>, service: impl Into<String>, context: Context) -> Self {
        Self {
            domain: domain.into(),
            service: service.into(),
            service_data: Map::new(),
            context,
        }
    }

    /// Builder-style argument setter
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.service_data.insert(key.into(), value.into());
        self
    }

    /// Full service identifier (`domain.service`)
    pub fn service_id(&self) -> String {
        format!("{}.{}", self.domain, self.service)
    }

    /// Get a service argument deserialized into `T`
    pub fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.service_data
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// The `entity_id` argument, if it is a single string
    pub fn entity_id(&self) -> Option<&str> {
        self.service_data.get("entity_id").and_then(Value::as_str)
    }
}
