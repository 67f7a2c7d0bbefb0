//! Integration configuration (`spotifyplus.yaml`)

use crate::error::{ConfigError, ConfigResult};
use crate::loader::YamlLoader;
use crate::options::PlayerOptions;
use serde::{Deserialize, Deserializer, Serialize};
use spotifyplus_core::names::PLATFORM_SPOTIFYPLUS;
use spotifyplus_core::DEFAULT_LANGUAGE;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the integration configuration
pub const CONFIG_FILE: &str = "spotifyplus.yaml";

/// Settings for response resolution and the player entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// Language used when a request names none
    #[serde(default = "default_language")]
    pub language: String,

    /// Directory holding `<language>/` response documents, relative to the config dir
    #[serde(default = "default_custom_sentences")]
    pub custom_sentences: String,

    /// Platform used for file filtering and the platform layout
    #[serde(default = "default_platform")]
    pub platform: String,

    /// Only consider documents whose file name starts with the platform
    #[serde(default = "default_true", deserialize_with = "lenient_bool")]
    pub platform_files_only: bool,

    /// Serve responses from the cached catalog instead of scanning per call
    #[serde(default)]
    pub cache_responses: bool,

    #[serde(default)]
    pub options: PlayerOptions,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_custom_sentences() -> String {
    "custom_sentences".to_string()
}

fn default_platform() -> String {
    PLATFORM_SPOTIFYPLUS.to_string()
}

fn default_true() -> bool {
    true
}

/// Booleans pass through; any other value reads as false
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(value.as_bool().unwrap_or(false))
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            custom_sentences: default_custom_sentences(),
            platform: default_platform(),
            platform_files_only: true,
            cache_responses: false,
            options: PlayerOptions::default(),
        }
    }
}

impl IntegrationConfig {
    /// Load `spotifyplus.yaml` from `config_dir`; defaults when the file is absent
    pub fn load(config_dir: &Path) -> ConfigResult<Self> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "No integration configuration, using defaults");
            return Ok(Self::default());
        }

        let value = YamlLoader::new(config_dir)?.load_file(&path)?;
        let config = Self::from_value(value, &path)?;
        config.options.validate()?;
        debug!(
            language = %config.language,
            platform = %config.platform,
            platform_files_only = config.platform_files_only,
            cache_responses = config.cache_responses,
            "Loaded integration configuration"
        );
        Ok(config)
    }

    /// Parse from a YAML string without tag processing
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        let path = PathBuf::from(CONFIG_FILE);
        let value: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseYaml { path: path.clone(), source: e })?;
        Self::from_value(value, &path)
    }

    fn from_value(value: serde_yaml::Value, path: &Path) -> ConfigResult<Self> {
        // An empty file parses as null
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_yaml::from_value(value).map_err(|e| ConfigError::ParseYaml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Base directory of the response documents
    pub fn custom_sentences_dir(&self, config_dir: &Path) -> PathBuf {
        let dir = Path::new(&self.custom_sentences);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            config_dir.join(dir)
        }
    }
}
