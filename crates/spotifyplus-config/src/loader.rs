//! YAML loading with `!secret` and `!env_var` substitution
//!
//! `spotifyplus.yaml` may pull device credentials out of the main file:
//!
//! ```yaml
//! options:
//!   device_username: !secret spotify_device_username
//!   device_password: !env_var SPOTIFY_DEVICE_PASSWORD
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::secrets::Secrets;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// YAML loader for files in the configuration directory
pub struct YamlLoader {
    config_dir: PathBuf,
    secrets: Secrets,
}

impl YamlLoader {
    /// Create a loader for `config_dir`, reading its secrets.yaml
    pub fn new(config_dir: impl Into<PathBuf>) -> ConfigResult<Self> {
        let config_dir = config_dir.into();
        let secrets = Secrets::load(&config_dir)?;
        Ok(Self { config_dir, secrets })
    }

    /// Create a loader with pre-loaded secrets
    pub fn with_secrets(config_dir: impl Into<PathBuf>, secrets: Secrets) -> Self {
        Self {
            config_dir: config_dir.into(),
            secrets,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load and process a YAML file; relative paths start at the config directory
    pub fn load_file(&self, path: impl AsRef<Path>) -> ConfigResult<Value> {
        let path = self.resolve_path(path.as_ref());
        debug!(path = %path.display(), "Loading YAML file");

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        self.load_string(&content, &path)
    }

    /// Load and process YAML from a string
    pub fn load_string(&self, content: &str, source_path: &Path) -> ConfigResult<Value> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
            path: source_path.to_path_buf(),
            source: e,
        })?;

        self.process_value(value)
    }

    fn process_value(&self, value: Value) -> ConfigResult<Value> {
        match value {
            Value::Tagged(tagged) => self.process_tagged(*tagged),
            Value::Mapping(map) => {
                let mut result = serde_yaml::Mapping::new();
                for (k, v) in map {
                    result.insert(self.process_value(k)?, self.process_value(v)?);
                }
                Ok(Value::Mapping(result))
            }
            Value::Sequence(seq) => seq
                .into_iter()
                .map(|v| self.process_value(v))
                .collect::<ConfigResult<Vec<_>>>()
                .map(Value::Sequence),
            _ => Ok(value),
        }
    }

    fn process_tagged(&self, tagged: serde_yaml::value::TaggedValue) -> ConfigResult<Value> {
        let tag = tagged.tag.to_string();
        trace!(tag = %tag, "Processing tagged value");

        match tag.as_str() {
            "!secret" => self.process_secret(tagged.value),
            "!env_var" => self.process_env_var(tagged.value),
            _ => {
                // Unknown tags are kept; only their content is processed
                let processed = self.process_value(tagged.value)?;
                Ok(Value::Tagged(Box::new(serde_yaml::value::TaggedValue {
                    tag: tagged.tag,
                    value: processed,
                })))
            }
        }
    }

    fn process_secret(&self, value: Value) -> ConfigResult<Value> {
        let Value::String(key) = value else {
            return Err(ConfigError::InvalidValue {
                key: "!secret".to_string(),
                reason: "secret key must be a string".to_string(),
            });
        };

        let secret = self.secrets.get(&key)?;
        debug!(key = %key, "Substituted secret");
        Ok(Value::String(secret.to_string()))
    }

    fn process_env_var(&self, value: Value) -> ConfigResult<Value> {
        let Value::String(var) = value else {
            return Err(ConfigError::InvalidValue {
                key: "!env_var".to_string(),
                reason: "environment variable name must be a string".to_string(),
            });
        };

        let env_value = std::env::var(&var).map_err(|_| ConfigError::EnvVarNotFound { var: var.clone() })?;
        debug!(var = %var, "Substituted env var");
        Ok(Value::String(env_value))
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config_dir.join(path)
        }
    }
}

/// Load `file` from `config_dir` with tag processing
pub fn load_yaml(config_dir: impl Into<PathBuf>, file: impl AsRef<Path>) -> ConfigResult<Value> {
    YamlLoader::new(config_dir)?.load_file(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_plain_yaml() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "spotifyplus.yaml", "language: de\nplatform: spotifyplus\n");

        let value = load_yaml(dir.path(), "spotifyplus.yaml").unwrap();
        assert_eq!(value["language"].as_str(), Some("de"));
        assert_eq!(value["platform"].as_str(), Some("spotifyplus"));
    }

    #[test]
    fn test_secret_substitution() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "secrets.yaml", "device_password: hunter2\n");
        write_file(
            dir.path(),
            "spotifyplus.yaml",
            "options:\n  device_password: !secret device_password\n",
        );

        let value = load_yaml(dir.path(), "spotifyplus.yaml").unwrap();
        assert_eq!(value["options"]["device_password"].as_str(), Some("hunter2"));
    }

    #[test]
    fn test_missing_secret_fails() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "spotifyplus.yaml", "password: !secret nope\n");

        let err = load_yaml(dir.path(), "spotifyplus.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::SecretNotFound { key } if key == "nope"));
    }

    #[test]
    fn test_env_var_substitution() {
        let dir = TempDir::new().unwrap();
        std::env::set_var("SPOTIFYPLUS_LOADER_TEST_USER", "john@example.com");
        write_file(
            dir.path(),
            "spotifyplus.yaml",
            "device_username: !env_var SPOTIFYPLUS_LOADER_TEST_USER\n",
        );

        let value = load_yaml(dir.path(), "spotifyplus.yaml").unwrap();
        assert_eq!(value["device_username"].as_str(), Some("john@example.com"));
    }

    #[test]
    fn test_missing_env_var_fails() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "spotifyplus.yaml",
            "device_username: !env_var SPOTIFYPLUS_LOADER_TEST_UNSET\n",
        );

        let err = load_yaml(dir.path(), "spotifyplus.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotFound { .. }));
    }

    #[test]
    fn test_unknown_tag_kept() {
        let dir = TempDir::new().unwrap();
        let loader = YamlLoader::new(dir.path()).unwrap();
        let value = loader
            .load_string("value: !custom thing\n", Path::new("inline.yaml"))
            .unwrap();
        assert!(matches!(value["value"], Value::Tagged(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_yaml(dir.path(), "missing.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
