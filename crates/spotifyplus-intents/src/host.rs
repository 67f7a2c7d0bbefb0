//! Seams to the host: target matching, the entity registry, state and services
//!
//! The intent handlers never talk to the host directly. Each concern sits
//! behind a trait so the host integration (or a test) can plug in its own
//! implementation, and [`Host`] bundles them for the dispatcher.

use crate::error::ServiceResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use spotifyplus_core::{EntityId, PlayerFeatures, ServiceCall, State};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Constraints for matching the target of an intent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchConstraints {
    pub name: Option<String>,
    pub area_name: Option<String>,
    pub floor_name: Option<String>,
    pub domains: HashSet<String>,
    pub assistant: Option<String>,
    pub single_target: bool,
}

/// Area and floor the request came from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchPreferences {
    pub area_id: Option<String>,
    pub floor_id: Option<String>,
}

/// Why target matching failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFailedReason {
    Name,
    Area,
    Floor,
    Domain,
    Assistant,
    MultipleTargets,
    Other,
}

impl fmt::Display for MatchFailedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Name => "name",
            Self::Area => "area",
            Self::Floor => "floor",
            Self::Domain => "domain",
            Self::Assistant => "assistant",
            Self::MultipleTargets => "multiple_targets",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}

/// Outcome of target matching
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub is_match: bool,
    pub no_match_reason: Option<MatchFailedReason>,
    /// Matched states; for `MultipleTargets`, every candidate
    pub states: Vec<State>,
}

impl MatchResult {
    /// Successful match of `states`
    pub fn matched(states: Vec<State>) -> Self {
        Self {
            is_match: true,
            no_match_reason: None,
            states,
        }
    }

    /// Failed match with nothing to offer
    pub fn failed(reason: MatchFailedReason) -> Self {
        Self {
            is_match: false,
            no_match_reason: Some(reason),
            states: Vec::new(),
        }
    }

    /// Several candidates where a single target was asked for
    pub fn multiple(states: Vec<State>) -> Self {
        Self {
            is_match: false,
            no_match_reason: Some(MatchFailedReason::MultipleTargets),
            states,
        }
    }
}

/// An entity registry entry
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    pub entity_id: EntityId,
    pub platform: String,
    pub disabled: bool,
    pub supported_features: PlayerFeatures,
}

impl RegistryEntry {
    /// True for an enabled media player of `platform`
    pub fn is_active_player(&self, platform: &str) -> bool {
        self.entity_id.is_media_player() && self.platform == platform && !self.disabled
    }
}

/// Matches intent constraints against the host's entities
pub trait TargetMatcher: Send + Sync {
    fn match_targets(&self, constraints: &MatchConstraints, preferences: &MatchPreferences) -> MatchResult;
}

/// Read access to the entity registry
pub trait PlayerRegistry: Send + Sync {
    fn entry(&self, entity_id: &EntityId) -> Option<RegistryEntry>;

    /// Every entry, in registration order
    fn entries(&self) -> Vec<RegistryEntry>;
}

/// Read access to current entity states
pub trait StateReader: Send + Sync {
    fn state(&self, entity_id: &EntityId) -> Option<State>;
}

/// Invokes host services
#[async_trait]
pub trait ServiceCaller: Send + Sync {
    /// Call a service, blocking until it completes
    ///
    /// Returns the service response when `return_response` is set.
    async fn call(&self, call: ServiceCall, return_response: bool) -> ServiceResult;
}

/// Everything the intent handlers need from the host
#[derive(Clone)]
pub struct Host {
    pub matcher: Arc<dyn TargetMatcher>,
    pub registry: Arc<dyn PlayerRegistry>,
    pub states: Arc<dyn StateReader>,
    pub services: Arc<dyn ServiceCaller>,
}

impl Host {
    pub fn new(
        matcher: Arc<dyn TargetMatcher>,
        registry: Arc<dyn PlayerRegistry>,
        states: Arc<dyn StateReader>,
        services: Arc<dyn ServiceCaller>,
    ) -> Self {
        Self {
            matcher,
            registry,
            states,
            services,
        }
    }

    /// Active player entry of `platform` for `entity_id`
    pub fn active_player(&self, entity_id: &EntityId, platform: &str) -> Option<RegistryEntry> {
        self.registry
            .entry(entity_id)
            .filter(|entry| entry.is_active_player(platform))
    }

    /// First active player entry of `platform`
    pub fn first_active_player(&self, platform: &str) -> Option<RegistryEntry> {
        self.registry
            .entries()
            .into_iter()
            .find(|entry| entry.is_active_player(platform))
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(entity_id: &str, platform: &str, disabled: bool) -> RegistryEntry {
        RegistryEntry {
            entity_id: entity_id.parse().unwrap(),
            platform: platform.to_string(),
            disabled,
            supported_features: PlayerFeatures::empty(),
        }
    }

    #[test]
    fn test_is_active_player() {
        assert!(entry("media_player.spotifyplus_john", "spotifyplus", false).is_active_player("spotifyplus"));
        assert!(!entry("media_player.spotifyplus_john", "spotifyplus", true).is_active_player("spotifyplus"));
        assert!(!entry("media_player.kitchen", "cast", false).is_active_player("spotifyplus"));
        assert!(!entry("sensor.spotifyplus_john", "spotifyplus", false).is_active_player("spotifyplus"));
    }

    #[test]
    fn test_match_failed_reason_display() {
        assert_eq!(MatchFailedReason::MultipleTargets.to_string(), "multiple_targets");
        assert_eq!(MatchFailedReason::Area.to_string(), "area");
    }
}
