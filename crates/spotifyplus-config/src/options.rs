//! Player options and the two-step options flow
//!
//! The flow walks `init` → `01_options_basic` → `02_options_player` and
//! finishes with an entry holding the merged options. A submission that
//! fails validation re-shows the same step with `errors.base` set.

use crate::error::{ConfigError, ConfigResult};
use crate::flow::{FlowResult, FormField};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use spotifyplus_core::mask_passwords;
use std::ops::RangeInclusive;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Option keys
pub mod option {
    pub const ALWAYS_ON: &str = "always_on";
    pub const DEVICE_DEFAULT: &str = "device_default";
    pub const DEVICE_LOGINID: &str = "device_loginid";
    pub const DEVICE_PASSWORD: &str = "device_password";
    pub const DEVICE_USERNAME: &str = "device_username";
    pub const SCRIPT_TURN_OFF: &str = "script_turn_off";
    pub const SCRIPT_TURN_ON: &str = "script_turn_on";
    pub const SOURCE_LIST_HIDE: &str = "source_list_hide";
    pub const SPOTIFY_SCAN_INTERVAL: &str = "spotify_scan_interval";
    pub const TURN_OFF_AUTO_PAUSE: &str = "turn_off_auto_pause";
    pub const TURN_ON_AUTO_RESUME: &str = "turn_on_auto_resume";
    pub const TURN_ON_AUTO_SOURCE_SELECT: &str = "turn_on_auto_source_select";
}

/// Error keys shown in `errors.base`
pub mod flow_error {
    pub const SCAN_INTERVAL_RANGE_INVALID: &str = "spotify_scan_interval_range_invalid";
    pub const DEVICE_PASSWORD_REQUIRED: &str = "device_password_required";
    pub const DEVICE_USERNAME_REQUIRED: &str = "device_username_required";
}

pub const STEP_INIT: &str = "init";
pub const STEP_OPTIONS_BASIC: &str = "01_options_basic";
pub const STEP_OPTIONS_PLAYER: &str = "02_options_player";

/// Seconds between Spotify player status polls
pub const SCAN_INTERVAL_RANGE: RangeInclusive<u64> = 4..=60;
pub const DEFAULT_SCAN_INTERVAL: u64 = 30;

/// Options of a SpotifyPlus player entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerOptions {
    /// Device to play on when none is active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_default: Option<String>,

    /// Devices hidden from the source list
    #[serde(default)]
    pub source_list_hide: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_turn_on: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_turn_off: Option<String>,

    #[serde(default = "default_scan_interval")]
    pub spotify_scan_interval: u64,

    #[serde(default)]
    pub always_on: bool,

    #[serde(default = "default_true")]
    pub turn_off_auto_pause: bool,

    #[serde(default = "default_true")]
    pub turn_on_auto_resume: bool,

    #[serde(default = "default_true")]
    pub turn_on_auto_source_select: bool,

    /// Spotify Connect credentials for devices that need a login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_loginid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_password: Option<String>,
}

fn default_scan_interval() -> u64 {
    DEFAULT_SCAN_INTERVAL
}

fn default_true() -> bool {
    true
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            device_default: None,
            source_list_hide: Vec::new(),
            script_turn_on: None,
            script_turn_off: None,
            spotify_scan_interval: DEFAULT_SCAN_INTERVAL,
            always_on: false,
            turn_off_auto_pause: true,
            turn_on_auto_resume: true,
            turn_on_auto_source_select: true,
            device_loginid: None,
            device_username: None,
            device_password: None,
        }
    }
}

impl PlayerOptions {
    /// Check the scan interval and the credential pair
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(error) = check_scan_interval(self.spotify_scan_interval) {
            return Err(ConfigError::InvalidValue {
                key: option::SPOTIFY_SCAN_INTERVAL.to_string(),
                reason: error.to_string(),
            });
        }
        if let Some(error) = check_credentials(self.device_username.as_deref(), self.device_password.as_deref()) {
            return Err(ConfigError::InvalidValue {
                key: option::DEVICE_USERNAME.to_string(),
                reason: error.to_string(),
            });
        }
        Ok(())
    }

    fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

fn check_scan_interval(seconds: u64) -> Option<&'static str> {
    (!SCAN_INTERVAL_RANGE.contains(&seconds)).then_some(flow_error::SCAN_INTERVAL_RANGE_INVALID)
}

fn check_credentials(username: Option<&str>, password: Option<&str>) -> Option<&'static str> {
    let present = |s: Option<&str>| s.is_some_and(|s| !s.trim().is_empty());
    match (present(username), present(password)) {
        (true, false) => Some(flow_error::DEVICE_PASSWORD_REQUIRED),
        (false, true) => Some(flow_error::DEVICE_USERNAME_REQUIRED),
        _ => None,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Options flow for one player entry
#[derive(Debug, Clone)]
pub struct OptionsFlow {
    flow_id: String,
    name: String,
    options: Map<String, Value>,
    devices: Vec<String>,
}

impl OptionsFlow {
    /// Start from the entry's current options; `devices` feeds the device choices
    pub fn new(name: impl Into<String>, current: &PlayerOptions, devices: Vec<String>) -> Self {
        Self {
            flow_id: Uuid::new_v4().to_string(),
            name: name.into(),
            options: current.to_map(),
            devices,
        }
    }

    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    /// Options merged so far
    pub fn options(&self) -> ConfigResult<PlayerOptions> {
        serde_json::from_value(Value::Object(self.options.clone())).map_err(|e| ConfigError::InvalidValue {
            key: "options".to_string(),
            reason: e.to_string(),
        })
    }

    /// Run `step_id` with the submitted input
    pub fn handle(&mut self, step_id: &str, input: Option<&Map<String, Value>>) -> ConfigResult<FlowResult> {
        match step_id {
            STEP_INIT => Ok(self.step_init()),
            STEP_OPTIONS_BASIC => Ok(self.step_options_basic(input)),
            STEP_OPTIONS_PLAYER => Ok(self.step_options_player(input)),
            other => Err(ConfigError::UnknownStep {
                flow_id: self.flow_id.clone(),
                step_id: other.to_string(),
            }),
        }
    }

    /// First step; shows the basic options form
    pub fn step_init(&mut self) -> FlowResult {
        self.step_options_basic(None)
    }

    /// Scan interval and default device
    /// 
    /// Shows the form without `input`. Valid input is merged and moves to the
    /// player step; an out-of-range interval redisplays the form with an error.
    #[instrument(skip(self, input), fields(flow_id = %self.flow_id))]
    pub fn step_options_basic(&mut self, input: Option<&Map<String, Value>>) -> FlowResult {
        let mut error = None;

        if let Some(input) = input {
            debug!(input = ?mask_passwords(input), "Basic options submitted");

            if let Some(interval) = input.get(option::SPOTIFY_SCAN_INTERVAL) {
                error = match interval.as_u64() {
                    Some(seconds) => check_scan_interval(seconds),
                    None => Some(flow_error::SCAN_INTERVAL_RANGE_INVALID),
                };
            }

            if error.is_none() {
                self.merge(input);
                if self.devices.is_empty() {
                    self.options.remove(option::DEVICE_DEFAULT);
                }
                return self.step_options_player(None);
            }
        }

        let form = FlowResult::form(&self.flow_id, STEP_OPTIONS_BASIC, self.basic_schema())
            .with_placeholders([("name", self.name.as_str())])
            .with_last_step(false);
        match error {
            Some(error) => form.with_base_error(error),
            None => form,
        }
    }

    /// Spotify Connect credentials and player behaviour
    /// 
    /// Finishes the flow with the merged options once a username and password
    /// are both given or both absent.
    #[instrument(skip(self, input), fields(flow_id = %self.flow_id))]
    pub fn step_options_player(&mut self, input: Option<&Map<String, Value>>) -> FlowResult {
        let mut error = None;

        if let Some(input) = input {
            debug!(input = ?mask_passwords(input), "Player options submitted");

            error = check_credentials(
                input.get(option::DEVICE_USERNAME).and_then(Value::as_str),
                input.get(option::DEVICE_PASSWORD).and_then(Value::as_str),
            );

            if error.is_none() {
                self.merge(input);
                debug!(options = ?mask_passwords(&self.options), "Options flow finished");
                return FlowResult::create_entry(&self.flow_id, "", Value::Object(self.options.clone()));
            }
        }

        let form = FlowResult::form(&self.flow_id, STEP_OPTIONS_PLAYER, self.player_schema())
            .with_placeholders([("name", self.name.as_str())])
            .with_last_step(true);
        match error {
            Some(error) => form.with_base_error(error),
            None => form,
        }
    }

    /// Submitted values replace current ones; blank values clear them
    fn merge(&mut self, input: &Map<String, Value>) {
        for (key, value) in input {
            if is_blank(value) {
                self.options.remove(key);
            } else {
                self.options.insert(key.clone(), value.clone());
            }
        }
    }

    fn current(&self, key: &str) -> Value {
        self.options.get(key).cloned().unwrap_or(Value::Null)
    }

    fn basic_schema(&self) -> Vec<FormField> {
        vec![
            FormField::select(option::DEVICE_DEFAULT, self.devices.clone()).with_default(self.current(option::DEVICE_DEFAULT)),
            FormField::multi_select(option::SOURCE_LIST_HIDE, self.devices.clone())
                .with_default(self.current(option::SOURCE_LIST_HIDE)),
            FormField::string(option::SCRIPT_TURN_ON).with_default(self.current(option::SCRIPT_TURN_ON)),
            FormField::string(option::SCRIPT_TURN_OFF).with_default(self.current(option::SCRIPT_TURN_OFF)),
            FormField::integer(option::SPOTIFY_SCAN_INTERVAL)
                .required()
                .with_default(self.current(option::SPOTIFY_SCAN_INTERVAL)),
            FormField::boolean(option::ALWAYS_ON).with_default(self.current(option::ALWAYS_ON)),
            FormField::boolean(option::TURN_OFF_AUTO_PAUSE).with_default(self.current(option::TURN_OFF_AUTO_PAUSE)),
            FormField::boolean(option::TURN_ON_AUTO_RESUME).with_default(self.current(option::TURN_ON_AUTO_RESUME)),
            FormField::boolean(option::TURN_ON_AUTO_SOURCE_SELECT)
                .with_default(self.current(option::TURN_ON_AUTO_SOURCE_SELECT)),
        ]
    }

    fn player_schema(&self) -> Vec<FormField> {
        vec![
            FormField::string(option::DEVICE_LOGINID).with_default(self.current(option::DEVICE_LOGINID)),
            FormField::string(option::DEVICE_USERNAME).with_default(self.current(option::DEVICE_USERNAME)),
            FormField::new(option::DEVICE_PASSWORD, "password").with_default(self.current(option::DEVICE_PASSWORD)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowResultType;
    use serde_json::json;

    fn input(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_defaults_from_empty_yaml() {
        let options: PlayerOptions = serde_yaml::from_str("{}").unwrap();
        assert_eq!(options, PlayerOptions::default());
        assert!(options.turn_on_auto_resume);
        assert!(!options.always_on);
    }

    #[test]
    fn test_validate() {
        assert!(PlayerOptions::default().validate().is_ok());

        let options = PlayerOptions {
            spotify_scan_interval: 3,
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(ConfigError::InvalidValue { reason, .. }) if reason == "spotify_scan_interval_range_invalid"));

        let options = PlayerOptions {
            device_username: Some("john@example.com".to_string()),
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_check_credentials() {
        assert_eq!(check_credentials(None, None), None);
        assert_eq!(check_credentials(Some("john"), Some("pw")), None);
        assert_eq!(check_credentials(Some("john"), Some(" ")), Some(flow_error::DEVICE_PASSWORD_REQUIRED));
        assert_eq!(check_credentials(None, Some("pw")), Some(flow_error::DEVICE_USERNAME_REQUIRED));
    }

    #[test]
    fn test_init_shows_basic_form() {
        let mut flow = OptionsFlow::new("SpotifyPlus John", &PlayerOptions::default(), vec!["Kitchen".to_string()]);
        let result = flow.step_init();

        assert!(result.is_form(STEP_OPTIONS_BASIC));
        assert_eq!(result.last_step, Some(false));
        assert_eq!(result.errors, None);
        let interval = result
            .data_schema
            .iter()
            .find(|f| f.name == option::SPOTIFY_SCAN_INTERVAL)
            .unwrap();
        assert_eq!(interval.default, Some(json!(30)));
    }

    #[test]
    fn test_basic_step_rejects_interval() {
        let mut flow = OptionsFlow::new("SpotifyPlus John", &PlayerOptions::default(), Vec::new());
        let result = flow.step_options_basic(Some(&input(json!({"spotify_scan_interval": 61}))));

        assert!(result.is_form(STEP_OPTIONS_BASIC));
        assert_eq!(result.base_error(), Some("spotify_scan_interval_range_invalid"));
        assert_eq!(flow.options().unwrap().spotify_scan_interval, 30);
    }

    #[test]
    fn test_unknown_step() {
        let mut flow = OptionsFlow::new("SpotifyPlus John", &PlayerOptions::default(), Vec::new());
        assert!(matches!(flow.handle("03_nope", None), Err(ConfigError::UnknownStep { .. })));
    }

    #[test]
    fn test_full_flow() {
        let devices = vec!["Kitchen".to_string(), "Office".to_string()];
        let mut flow = OptionsFlow::new("SpotifyPlus John", &PlayerOptions::default(), devices);

        let result = flow
            .handle(
                STEP_OPTIONS_BASIC,
                Some(&input(json!({
                    "device_default": "Kitchen",
                    "spotify_scan_interval": 10,
                    "always_on": true
                }))),
            )
            .unwrap();
        assert!(result.is_form(STEP_OPTIONS_PLAYER));
        assert_eq!(result.last_step, Some(true));

        let result = flow
            .handle(
                STEP_OPTIONS_PLAYER,
                Some(&input(json!({"device_username": "john@example.com", "device_password": "hunter2"}))),
            )
            .unwrap();
        assert_eq!(result.result_type, FlowResultType::CreateEntry);
        assert_eq!(result.title.as_deref(), Some(""));

        let options: PlayerOptions = serde_json::from_value(result.result.unwrap()).unwrap();
        assert_eq!(options.device_default.as_deref(), Some("Kitchen"));
        assert_eq!(options.spotify_scan_interval, 10);
        assert!(options.always_on);
        assert_eq!(options.device_password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn test_empty_device_list_clears_default() {
        let current = PlayerOptions {
            device_default: Some("Kitchen".to_string()),
            ..Default::default()
        };
        let mut flow = OptionsFlow::new("SpotifyPlus John", &current, Vec::new());
        flow.step_options_basic(Some(&input(json!({"always_on": false}))));

        assert_eq!(flow.options().unwrap().device_default, None);
    }
}
