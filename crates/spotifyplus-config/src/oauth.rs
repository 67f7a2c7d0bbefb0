//! OAuth config flow for Spotify accounts
//!
//! The host runs the authorize/token exchange against [`AUTHORIZE_URL`] and
//! [`TOKEN_URL`] and hands the token data to [`ConfigFlow::oauth_create_entry`],
//! which identifies the account through a [`ProfileProvider`] and decides
//! between a new entry, a reauth update and an abort.

use crate::flow::FlowResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use spotifyplus_core::names::DOMAIN;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

pub const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Config entry schema version written by this flow
pub const CONFIG_FLOW_VERSION: u32 = 2;

/// Scopes requested at authorization
pub const SPOTIFY_SCOPES: &[&str] = &[
    "playlist-modify-private",
    "playlist-modify-public",
    "playlist-read-collaborative",
    "playlist-read-private",
    "ugc-image-upload",
    "user-follow-modify",
    "user-follow-read",
    "user-library-modify",
    "user-library-read",
    "user-modify-playback-state",
    "user-read-currently-playing",
    "user-read-email",
    "user-read-playback-position",
    "user-read-playback-state",
    "user-read-private",
    "user-read-recently-played",
    "user-top-read",
];

pub const STEP_REAUTH_CONFIRM: &str = "reauth_confirm";
pub const STEP_PICK_IMPLEMENTATION: &str = "pick_implementation";

/// Abort reasons
pub mod abort {
    pub const ALREADY_CONFIGURED: &str = "already_configured";
    pub const CONNECTION_ERROR: &str = "connection_error";
    pub const MISSING_CONFIGURATION: &str = "missing_configuration";
    pub const REAUTH_ACCOUNT_MISMATCH: &str = "reauth_account_mismatch";
    pub const REAUTH_SUCCESSFUL: &str = "reauth_successful";
    pub const SETAUTHTOKEN_ERROR: &str = "setauthtoken_error";
}

/// Entry data keys
pub mod entry_key {
    pub const AUTH_IMPLEMENTATION: &str = "auth_implementation";
    pub const DESCRIPTION: &str = "description";
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const TOKEN: &str = "token";
}

/// Parameters added to the authorize url
pub fn extra_authorize_data() -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("scope".to_string(), Value::String(SPOTIFY_SCOPES.join(",")));
    data.insert("show_dialog".to_string(), Value::String("true".to_string()));
    data
}

/// Spotify account behind a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    /// Subscription level, e.g. `premium` or `free`
    pub product: String,
}

/// Failure looking up the Spotify account behind a token
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("could not reach Spotify: {0}")]
    Connection(String),

    #[error("token was not accepted: {0}")]
    Token(String),
}

/// Looks up the account that owns an OAuth token
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn user_profile(&self, token: &Value) -> Result<UserProfile, ProfileError>;
}

/// A stored integration entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub entry_id: String,
    pub unique_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub options: Map<String, Value>,
}

/// What started a config flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowSource {
    User,
    Reauth,
}

/// Account config flow
pub struct ConfigFlow {
    flow_id: String,
    source: FlowSource,
    profiles: Arc<dyn ProfileProvider>,
    entries: Vec<ConfigEntry>,
    reauth_entry: Option<ConfigEntry>,
    unique_id: Option<String>,
}

impl ConfigFlow {
    /// Flow started by the user; `entries` are the already configured entries
    pub fn new(profiles: Arc<dyn ProfileProvider>, entries: Vec<ConfigEntry>) -> Self {
        Self {
            flow_id: Uuid::new_v4().to_string(),
            source: FlowSource::User,
            profiles,
            entries,
            reauth_entry: None,
            unique_id: None,
        }
    }

    /// Flow started because `entry` failed to authenticate
    pub fn reauth(profiles: Arc<dyn ProfileProvider>, entries: Vec<ConfigEntry>, entry: ConfigEntry) -> Self {
        Self {
            source: FlowSource::Reauth,
            reauth_entry: Some(entry),
            ..Self::new(profiles, entries)
        }
    }

    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    pub fn source(&self) -> FlowSource {
        self.source
    }

    /// Unique id assigned once the account is known
    pub fn unique_id(&self) -> Option<&str> {
        self.unique_id.as_deref()
    }

    /// Create an entry from OAuth token data, or update the reauth entry
    #[instrument(skip(self, data), fields(flow_id = %self.flow_id, source = ?self.source))]
    pub async fn oauth_create_entry(&mut self, mut data: Map<String, Value>) -> FlowResult {
        let Some(token) = data.get(entry_key::TOKEN).cloned() else {
            warn!("OAuth data carries no token");
            return FlowResult::abort(&self.flow_id, abort::SETAUTHTOKEN_ERROR);
        };

        let profile = match self.profiles.user_profile(&token).await {
            Ok(profile) => profile,
            Err(ProfileError::Connection(e)) => {
                warn!(error = %e, "Could not connect to Spotify");
                return FlowResult::abort(&self.flow_id, abort::CONNECTION_ERROR);
            }
            Err(ProfileError::Token(e)) => {
                warn!(error = %e, "Could not authorize with the OAuth token");
                return FlowResult::abort(&self.flow_id, abort::SETAUTHTOKEN_ERROR);
            }
        };

        let unique_id = format!("{}_{}", profile.id, DOMAIN);
        debug!(unique_id = %unique_id, display_name = %profile.display_name, "Assigned unique id");
        self.unique_id = Some(unique_id.clone());

        if let Some(entry) = &self.reauth_entry {
            if entry.unique_id.as_deref() != Some(unique_id.as_str()) {
                warn!(expected = ?entry.unique_id, actual = %unique_id, "Reauth with a different account");
                return FlowResult::abort(&self.flow_id, abort::REAUTH_ACCOUNT_MISMATCH);
            }
            let updated = ConfigEntry {
                title: profile.display_name.clone(),
                data,
                ..entry.clone()
            };
            debug!(entry_id = %updated.entry_id, "Updated entry after reauth");
            let updated = serde_json::to_value(&updated).unwrap_or_default();
            return FlowResult::abort(&self.flow_id, abort::REAUTH_SUCCESSFUL).with_result(updated);
        }

        if self
            .entries
            .iter()
            .any(|e| e.unique_id.as_deref() == Some(unique_id.as_str()))
        {
            debug!(unique_id = %unique_id, "Account already configured");
            return FlowResult::abort(&self.flow_id, abort::ALREADY_CONFIGURED).with_placeholders([
                ("userinfo_name", profile.display_name.as_str()),
                ("userinfo_id", profile.id.as_str()),
            ]);
        }

        let description = format!("({} account)", capitalize(&profile.product));
        data.insert(entry_key::ID.to_string(), Value::String(profile.id.clone()));
        data.insert(entry_key::NAME.to_string(), Value::String(profile.display_name.clone()));
        data.insert(entry_key::DESCRIPTION.to_string(), Value::String(description));

        debug!(id = %profile.id, name = %profile.display_name, "Creating entry");
        FlowResult::create_entry(
            &self.flow_id,
            format!("SpotifyPlus {}", profile.display_name),
            Value::Object(data),
        )
        .with_version(CONFIG_FLOW_VERSION)
    }

    /// Ask the user to re-authenticate, then continue with the entry's OAuth implementation
    pub fn step_reauth_confirm(&self, input: Option<&Map<String, Value>>) -> FlowResult {
        let (account_id, account_name) = match &self.reauth_entry {
            Some(entry) => (reauth_account_id(entry), reauth_account_name(entry)),
            None => ("unknown".to_string(), "unknown".to_string()),
        };

        if input.is_none() {
            debug!(account_id = %account_id, account_name = %account_name, "Prompting for reauth");
            let mut form = FlowResult::form(&self.flow_id, STEP_REAUTH_CONFIRM, Vec::new())
                .with_placeholders([("account_id", account_id), ("account_name", account_name)]);
            form.errors = Some(Default::default());
            return form;
        }

        let implementation = self
            .reauth_entry
            .as_ref()
            .and_then(|e| e.data.get(entry_key::AUTH_IMPLEMENTATION))
            .and_then(Value::as_str);
        match implementation {
            Some(implementation) => FlowResult::external_step(
                &self.flow_id,
                STEP_PICK_IMPLEMENTATION,
                json!({ "implementation": implementation }),
            ),
            None => FlowResult::abort(&self.flow_id, abort::MISSING_CONFIGURATION),
        }
    }
}

fn non_empty_str<'a>(data: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn reauth_account_id(entry: &ConfigEntry) -> String {
    if let Some(id) = non_empty_str(&entry.data, entry_key::ID) {
        return id.to_string();
    }
    let suffix = format!("_{DOMAIN}");
    entry
        .unique_id
        .as_deref()
        .map(|id| id.replace(&suffix, ""))
        .unwrap_or_else(|| "unknown".to_string())
}

fn reauth_account_name(entry: &ConfigEntry) -> String {
    non_empty_str(&entry.data, entry_key::NAME)
        .unwrap_or(&entry.title)
        .to_string()
}

/// First letter upper case, the rest lower case
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

impl std::fmt::Debug for ConfigFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigFlow")
            .field("flow_id", &self.flow_id)
            .field("source", &self.source)
            .field("unique_id", &self.unique_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_authorize_data() {
        let data = extra_authorize_data();
        assert_eq!(data["show_dialog"], "true");
        let scope = data["scope"].as_str().unwrap();
        assert!(scope.starts_with("playlist-modify-private,playlist-modify-public,"));
        assert!(scope.ends_with(",user-top-read"));
        assert_eq!(scope.split(',').count(), SPOTIFY_SCOPES.len());
    }

    struct FreeAccount;

    #[async_trait]
    impl ProfileProvider for FreeAccount {
        async fn user_profile(&self, _token: &Value) -> Result<UserProfile, ProfileError> {
            Ok(UserProfile {
                id: "jane".to_string(),
                display_name: "Jane".to_string(),
                product: "free".to_string(),
            })
        }
    }

    #[test]
    fn test_free_account_description() {
        let mut flow = ConfigFlow::new(Arc::new(FreeAccount), Vec::new());
        let mut data = Map::new();
        data.insert("token".to_string(), json!({"access_token": "x"}));

        let result = tokio_test::block_on(flow.oauth_create_entry(data));
        assert_eq!(result.title.as_deref(), Some("SpotifyPlus Jane"));
        assert_eq!(result.result.unwrap()["description"], "(Free account)");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("premium"), "Premium");
        assert_eq!(capitalize("FREE"), "Free");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_reauth_account_fallbacks() {
        let entry = ConfigEntry {
            entry_id: "01J".to_string(),
            unique_id: Some("31l77fd87g_spotifyplus".to_string()),
            title: "SpotifyPlus John".to_string(),
            data: Map::new(),
            options: Map::new(),
        };
        assert_eq!(reauth_account_id(&entry), "31l77fd87g");
        assert_eq!(reauth_account_name(&entry), "SpotifyPlus John");

        let mut data = Map::new();
        data.insert("id".to_string(), json!("john"));
        data.insert("name".to_string(), json!("John Smith"));
        let entry = ConfigEntry { data, ..entry };
        assert_eq!(reauth_account_id(&entry), "john");
        assert_eq!(reauth_account_name(&entry), "John Smith");
    }
}
