//! In-memory host and response documents for intent tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use spotifyplus_core::names::attr;
use spotifyplus_core::{EntityId, PlayerFeatures, ServiceCall, Slots, State};
use spotifyplus_intents::{
    Host, Intent, IntentHandler, IntentRegistry, IntentResponse, MatchConstraints, MatchPreferences, MatchResult,
    PlayerRegistry, RegistryEntry, ServiceCaller, ServiceError, ServiceResult, StateReader, TargetMatcher,
};
use spotifyplus_resources::ResponseResolver;
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const PLAYER_ID: &str = "media_player.spotifyplus_john";
pub const CAST_ID: &str = "media_player.kitchen";

pub const RESPONSES: &str = r#"
responses:
  intents:
    SpotifyPlusPlayPlaylist:
      play_playlist: "Now playing {{ slots.playlist_title.text }}"
  spotifyplus:
    play_playlist: "Playing {{ slots.playlist_title.text }}"
    player_not_matched: "No player matched {{ slots.target_player.text }}"
    spotify_premium_required: "Premium required for {{ slots.target_player.value }}"
    player_features_not_supported: "Player does not support {{ slots.error_features.text }}"
    player_not_playing_media: "Player is not {{ slots.error_states.text }}"
    error_failed_to_handle: "Failed: {{ slots.error_info.text }}"
    spotify_search_no_items_playlist: "No playlist found for {{ slots.playlist_name.text }}"
    spotify_no_artist_info: "No information for {{ slots.artist_title.text }}"
    get_info_artist_bio: "{{ slots.artist_title.text }}: {{ slots.artist_bio.text }}"
    nowplaying_no_media_track: "Nothing but tracks"
    play_favorite_tracks: "Playing your favorites"
    play_favorite_tracks_for_artist: "Playing favorites by {{ slots.artist_title.text }}"
    play_podcast: "Playing {{ slots.podcast_title.text }}"
    play_podcast_episode: "Playing {{ slots.episode_title.text }} of {{ slots.podcast_title.text }}"
"#;

pub fn entity(id: &str) -> EntityId {
    id.parse().unwrap()
}

/// A premium SpotifyPlus player playing a track
pub fn player(state: &str) -> State {
    State::new(entity(PLAYER_ID), state, HashMap::new())
        .with_attribute(attr::FRIENDLY_NAME, "SpotifyPlus John")
        .with_attribute(attr::SP_USER_PRODUCT, "premium")
        .with_attribute(attr::SP_ITEM_TYPE, "track")
        .with_attribute(attr::MEDIA_TITLE, "Aqualung")
        .with_attribute(attr::MEDIA_ARTIST, "Jethro Tull")
        .with_attribute(attr::MEDIA_ALBUM_NAME, "Aqualung")
        .with_attribute(attr::SP_ARTIST_URI, "spotify:artist:6APm8EjxOHSYM5B4i3vozd")
        .with_attribute(attr::SP_TRACK_URI_ORIGIN, "spotify:track:1gGkWhwXjxIfXwERPzk7Yz")
}

pub fn entry(id: &str, platform: &str, features: PlayerFeatures) -> RegistryEntry {
    RegistryEntry {
        entity_id: entity(id),
        platform: platform.to_string(),
        disabled: false,
        supported_features: features,
    }
}

pub fn all_features() -> PlayerFeatures {
    PlayerFeatures::all()
}

// ==================== Fakes ====================

pub struct FakeMatcher {
    result: MatchResult,
    pub seen: Mutex<Vec<MatchConstraints>>,
}

impl TargetMatcher for FakeMatcher {
    fn match_targets(&self, constraints: &MatchConstraints, _preferences: &MatchPreferences) -> MatchResult {
        self.seen.lock().unwrap().push(constraints.clone());
        self.result.clone()
    }
}

pub struct FakeRegistry(Vec<RegistryEntry>);

impl PlayerRegistry for FakeRegistry {
    fn entry(&self, entity_id: &EntityId) -> Option<RegistryEntry> {
        self.0.iter().find(|e| &e.entity_id == entity_id).cloned()
    }

    fn entries(&self) -> Vec<RegistryEntry> {
        self.0.clone()
    }
}

pub struct FakeStates(HashMap<EntityId, State>);

impl StateReader for FakeStates {
    fn state(&self, entity_id: &EntityId) -> Option<State> {
        self.0.get(entity_id).cloned()
    }
}

/// Records every call; answers with canned responses or failures
#[derive(Default)]
pub struct RecordingServices {
    responses: HashMap<String, Value>,
    failures: HashMap<String, String>,
    calls: Mutex<Vec<ServiceCall>>,
}

impl RecordingServices {
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn services(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.service_id()).collect()
    }
}

#[async_trait]
impl ServiceCaller for RecordingServices {
    async fn call(&self, call: ServiceCall, return_response: bool) -> ServiceResult {
        let id = call.service_id();
        self.calls.lock().unwrap().push(call);

        if let Some(message) = self.failures.get(&id) {
            return Err(ServiceError::CallFailed(message.clone()));
        }
        if return_response {
            Ok(self.responses.get(&id).cloned())
        } else {
            Ok(None)
        }
    }
}

// ==================== Fixture ====================

/// Builds a registry wired to the fakes
pub struct Fixture {
    matched: MatchResult,
    entries: Vec<RegistryEntry>,
    states: Vec<State>,
    services: RecordingServices,
}

impl Fixture {
    /// `player` matched by name and registered with every feature
    pub fn new(player: State) -> Self {
        Self {
            matched: MatchResult::matched(vec![player.clone()]),
            entries: vec![entry(PLAYER_ID, "spotifyplus", all_features())],
            states: vec![player],
            services: RecordingServices::default(),
        }
    }

    pub fn with_match(mut self, result: MatchResult) -> Self {
        self.matched = result;
        self
    }

    pub fn with_entries(mut self, entries: Vec<RegistryEntry>) -> Self {
        self.entries = entries;
        self
    }

    /// Canned response for `domain.service`
    pub fn respond(mut self, service: &str, response: Value) -> Self {
        self.services.responses.insert(service.to_string(), response);
        self
    }

    pub fn fail(mut self, service: &str, message: &str) -> Self {
        self.services.failures.insert(service.to_string(), message.to_string());
        self
    }

    pub fn build(self) -> Harness {
        let dir = TempDir::new().unwrap();
        let en = dir.path().join("en");
        fs::create_dir_all(&en).unwrap();
        fs::write(en.join("spotifyplus_responses.yaml"), RESPONSES).unwrap();

        let matcher = Arc::new(FakeMatcher {
            result: self.matched,
            seen: Mutex::new(Vec::new()),
        });
        let services = Arc::new(self.services);
        let states = self
            .states
            .into_iter()
            .map(|s| (s.entity_id.clone(), s))
            .collect();

        let host = Host::new(
            matcher.clone(),
            Arc::new(FakeRegistry(self.entries)),
            Arc::new(FakeStates(states)),
            services.clone(),
        );
        let handler = IntentHandler::new(host, Arc::new(ResponseResolver::new(dir.path())));

        Harness {
            _dir: dir,
            matcher,
            services,
            registry: IntentRegistry::with_defaults(handler),
        }
    }
}

pub struct Harness {
    _dir: TempDir,
    pub matcher: Arc<FakeMatcher>,
    pub services: Arc<RecordingServices>,
    pub registry: IntentRegistry,
}

impl Harness {
    pub async fn handle(&self, intent_type: &str, slots: Slots) -> IntentResponse {
        self.registry
            .handle(&Intent::new(intent_type).with_slots(slots))
            .await
            .unwrap()
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.services.calls()
    }
}
