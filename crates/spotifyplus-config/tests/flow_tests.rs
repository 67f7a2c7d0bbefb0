//! Config flow and options flow transitions

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use spotifyplus_config::oauth::{abort, STEP_PICK_IMPLEMENTATION, STEP_REAUTH_CONFIRM};
use spotifyplus_config::options::{STEP_OPTIONS_BASIC, STEP_OPTIONS_PLAYER};
use spotifyplus_config::{
    ConfigEntry, ConfigFlow, FlowResultType, OptionsFlow, PlayerOptions, ProfileError, ProfileProvider, UserProfile,
};
use std::sync::Arc;

/// Answers every token with the same profile or error
struct FakeProfiles(Result<UserProfile, &'static str>, bool);

impl FakeProfiles {
    fn user(id: &str, name: &str, product: &str) -> Arc<Self> {
        Arc::new(Self(
            Ok(UserProfile {
                id: id.to_string(),
                display_name: name.to_string(),
                product: product.to_string(),
            }),
            false,
        ))
    }

    fn connection_error() -> Arc<Self> {
        Arc::new(Self(Err("dns lookup failed"), true))
    }

    fn token_error() -> Arc<Self> {
        Arc::new(Self(Err("invalid_grant"), false))
    }
}

#[async_trait]
impl ProfileProvider for FakeProfiles {
    async fn user_profile(&self, _token: &Value) -> Result<UserProfile, ProfileError> {
        match &self.0 {
            Ok(profile) => Ok(profile.clone()),
            Err(e) if self.1 => Err(ProfileError::Connection(e.to_string())),
            Err(e) => Err(ProfileError::Token(e.to_string())),
        }
    }
}

fn token_data() -> Map<String, Value> {
    json!({
        "auth_implementation": "spotifyplus_abc123",
        "token": {"access_token": "BQD...", "refresh_token": "AQB...", "expires_in": 3600}
    })
    .as_object()
    .unwrap()
    .clone()
}

fn entry(unique_id: &str) -> ConfigEntry {
    ConfigEntry {
        entry_id: "01HZX3".to_string(),
        unique_id: Some(unique_id.to_string()),
        title: "SpotifyPlus John".to_string(),
        data: token_data(),
        options: Map::new(),
    }
}

fn input(value: Value) -> Map<String, Value> {
    value.as_object().unwrap().clone()
}

// ==================== OAuth Flow Tests ====================

#[tokio::test]
async fn test_create_entry() {
    let mut flow = ConfigFlow::new(FakeProfiles::user("31l77", "John Smith", "premium"), Vec::new());
    let result = flow.oauth_create_entry(token_data()).await;

    assert_eq!(result.result_type, FlowResultType::CreateEntry);
    assert_eq!(result.title.as_deref(), Some("SpotifyPlus John Smith"));
    assert_eq!(result.version, Some(2));
    assert_eq!(flow.unique_id(), Some("31l77_spotifyplus"));

    let data = result.result.unwrap();
    assert_eq!(data["id"], "31l77");
    assert_eq!(data["name"], "John Smith");
    assert_eq!(data["description"], "(Premium account)");
    assert_eq!(data["auth_implementation"], "spotifyplus_abc123");
}

#[tokio::test]
async fn test_already_configured() {
    let existing = vec![entry("31l77_spotifyplus")];
    let mut flow = ConfigFlow::new(FakeProfiles::user("31l77", "John Smith", "premium"), existing);
    let result = flow.oauth_create_entry(token_data()).await;

    assert_eq!(result.result_type, FlowResultType::Abort);
    assert_eq!(result.reason.as_deref(), Some(abort::ALREADY_CONFIGURED));
    let placeholders = result.description_placeholders.unwrap();
    assert_eq!(placeholders["userinfo_name"], "John Smith");
    assert_eq!(placeholders["userinfo_id"], "31l77");
}

#[tokio::test]
async fn test_profile_errors_abort() {
    let mut flow = ConfigFlow::new(FakeProfiles::connection_error(), Vec::new());
    let result = flow.oauth_create_entry(token_data()).await;
    assert_eq!(result.reason.as_deref(), Some(abort::CONNECTION_ERROR));

    let mut flow = ConfigFlow::new(FakeProfiles::token_error(), Vec::new());
    let result = flow.oauth_create_entry(token_data()).await;
    assert_eq!(result.reason.as_deref(), Some(abort::SETAUTHTOKEN_ERROR));
    assert_eq!(flow.unique_id(), None);
}

#[tokio::test]
async fn test_missing_token_aborts() {
    let mut flow = ConfigFlow::new(FakeProfiles::user("31l77", "John Smith", "premium"), Vec::new());
    let result = flow.oauth_create_entry(Map::new()).await;
    assert_eq!(result.reason.as_deref(), Some(abort::SETAUTHTOKEN_ERROR));
}

#[tokio::test]
async fn test_reauth_same_account() {
    let reauth = entry("31l77_spotifyplus");
    let mut flow = ConfigFlow::reauth(
        FakeProfiles::user("31l77", "John Smith", "premium"),
        vec![reauth.clone()],
        reauth,
    );
    let result = flow.oauth_create_entry(token_data()).await;

    assert_eq!(result.result_type, FlowResultType::Abort);
    assert_eq!(result.reason.as_deref(), Some(abort::REAUTH_SUCCESSFUL));
    let updated = result.result.unwrap();
    assert_eq!(updated["entry_id"], "01HZX3");
    assert_eq!(updated["title"], "John Smith");
}

#[tokio::test]
async fn test_reauth_account_mismatch() {
    let reauth = entry("31l77_spotifyplus");
    let mut flow = ConfigFlow::reauth(FakeProfiles::user("other", "Jane", "free"), Vec::new(), reauth);
    let result = flow.oauth_create_entry(token_data()).await;

    assert_eq!(result.reason.as_deref(), Some(abort::REAUTH_ACCOUNT_MISMATCH));
}

#[test]
fn test_reauth_confirm_form_then_implementation() {
    let flow = ConfigFlow::reauth(
        FakeProfiles::user("31l77", "John Smith", "premium"),
        Vec::new(),
        entry("31l77_spotifyplus"),
    );

    let form = flow.step_reauth_confirm(None);
    assert!(form.is_form(STEP_REAUTH_CONFIRM));
    let placeholders = form.description_placeholders.unwrap();
    assert_eq!(placeholders["account_id"], "31l77");
    assert_eq!(placeholders["account_name"], "SpotifyPlus John");

    let next = flow.step_reauth_confirm(Some(&Map::new()));
    assert_eq!(next.result_type, FlowResultType::ExternalStep);
    assert_eq!(next.step_id.as_deref(), Some(STEP_PICK_IMPLEMENTATION));
    assert_eq!(next.result.unwrap()["implementation"], "spotifyplus_abc123");
}

#[test]
fn test_reauth_confirm_without_implementation() {
    let mut reauth = entry("31l77_spotifyplus");
    reauth.data.remove("auth_implementation");
    let flow = ConfigFlow::reauth(FakeProfiles::user("31l77", "John", "premium"), Vec::new(), reauth);

    let result = flow.step_reauth_confirm(Some(&Map::new()));
    assert_eq!(result.reason.as_deref(), Some(abort::MISSING_CONFIGURATION));
}

// ==================== Options Flow Tests ====================

#[test]
fn test_options_flow_credentials_required_together() {
    let mut flow = OptionsFlow::new("SpotifyPlus John", &PlayerOptions::default(), vec!["Kitchen".to_string()]);
    let result = flow.step_options_basic(Some(&input(json!({"spotify_scan_interval": 30}))));
    assert!(result.is_form(STEP_OPTIONS_PLAYER));

    let result = flow.step_options_player(Some(&input(json!({"device_username": "john@example.com"}))));
    assert!(result.is_form(STEP_OPTIONS_PLAYER));
    assert_eq!(result.base_error(), Some("device_password_required"));

    let result = flow.step_options_player(Some(&input(json!({"device_password": "hunter2"}))));
    assert_eq!(result.base_error(), Some("device_username_required"));

    let result = flow.step_options_player(Some(&input(json!({"device_loginid": "31l77"}))));
    assert_eq!(result.result_type, FlowResultType::CreateEntry);
    assert_eq!(result.result.unwrap()["device_loginid"], "31l77");
}

#[test]
fn test_options_flow_interval_bounds() {
    for (seconds, accepted) in [(3, false), (4, true), (60, true), (61, false)] {
        let mut flow = OptionsFlow::new("SpotifyPlus John", &PlayerOptions::default(), Vec::new());
        let result = flow.step_options_basic(Some(&input(json!({"spotify_scan_interval": seconds}))));
        assert_eq!(result.is_form(STEP_OPTIONS_PLAYER), accepted, "interval {seconds}");
        assert_eq!(result.is_form(STEP_OPTIONS_BASIC), !accepted, "interval {seconds}");
    }
}

#[test]
fn test_options_flow_blank_values_clear() {
    let current = PlayerOptions {
        script_turn_on: Some("script.amp_on".to_string()),
        ..Default::default()
    };
    let mut flow = OptionsFlow::new("SpotifyPlus John", &current, Vec::new());
    flow.step_options_basic(Some(&input(json!({"script_turn_on": ""}))));
    let result = flow.step_options_player(Some(&Map::new()));

    let options: PlayerOptions = serde_json::from_value(result.result.unwrap()).unwrap();
    assert_eq!(options.script_turn_on, None);
}
