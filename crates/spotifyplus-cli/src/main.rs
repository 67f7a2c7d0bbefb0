//! SpotifyPlus command line
//!
//! Resolves response keys the way intent handling does, using the
//! `spotifyplus.yaml` and response documents of a configuration directory.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueHint};
use serde_json::Value;
use spotifyplus_config::IntegrationConfig;
use spotifyplus_core::{SlotValue, Slots};
use spotifyplus_resources::{ResponseCatalog, ResponseDocument, ResponseRequest, ResponseResolver, ResponseSource};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration directory holding spotifyplus.yaml
    #[arg(short, long, value_name = "DIR", value_hint = ValueHint::DirPath, default_value = ".")]
    config: PathBuf,

    /// Enable verbose logging; repeat for more detail
    ///
    /// Ignored when RUST_LOG is set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a response key and print the text
    Resolve {
        /// Response key, e.g. play_playlist
        #[arg(short, long)]
        key: String,

        /// Intent whose intent layout block is searched
        #[arg(short, long)]
        intent: Option<String>,

        #[command(flatten)]
        scope: Scope,

        /// Slot for the template, repeatable
        #[arg(short, long = "slot", value_name = "NAME=TEXT[=VALUE]", value_parser = parse_slot)]
        slots: Vec<(String, SlotValue)>,
    },

    /// List the response documents a lookup would search, in search order,
    /// with the intents and flat keys each one defines
    Documents {
        #[command(flatten)]
        scope: Scope,
    },
}

#[derive(clap::Args, Debug)]
struct Scope {
    /// Platform name; defaults to the configured platform
    #[arg(short, long)]
    platform: Option<String>,

    /// Language directory; defaults to the configured language
    #[arg(short, long)]
    language: Option<String>,

    /// Search every document, not only those named after the platform
    #[arg(long, default_value_t = false)]
    all_files: bool,
}

impl Scope {
    fn request(&self, key: &str, config: &IntegrationConfig) -> ResponseRequest {
        let mut request = ResponseRequest::new(key)
            .platform(self.platform.as_deref().unwrap_or(&config.platform))
            .platform_files_only(config.platform_files_only && !self.all_files);
        if let Some(language) = &self.language {
            request = request.language(language);
        }
        request
    }
}

/// Parse `name=text` or `name=text=value`
///
/// The value is read as JSON when it parses, otherwise as a string; without
/// one the text doubles as the value.
fn parse_slot(input: &str) -> Result<(String, SlotValue), String> {
    let mut parts = input.splitn(3, '=');
    let name = parts.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(format!("slot '{input}' has no name"));
    }
    let Some(text) = parts.next() else {
        return Err(format!("slot '{input}' must be NAME=TEXT or NAME=TEXT=VALUE"));
    };
    let value = match parts.next() {
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
        None => Value::String(text.to_string()),
    };
    Ok((name.to_string(), SlotValue::new(text, value)))
}

fn init_logger(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load(config_dir: &Path) -> Result<(IntegrationConfig, ResponseResolver)> {
    if !config_dir.is_dir() {
        bail!("configuration directory {} does not exist", config_dir.display());
    }
    let config = IntegrationConfig::load(config_dir)
        .with_context(|| format!("loading configuration from {}", config_dir.display()))?;
    let resolver = ResponseResolver::new(config.custom_sentences_dir(config_dir))
        .with_default_language(config.language.clone());
    Ok((config, resolver))
}

/// Document path followed by its intent blocks and flat keys
fn describe_document(path: &Path) -> String {
    let mut out = path.display().to_string();
    match ResponseDocument::load(path) {
        Ok(document) => {
            let intents = document.intent_names();
            if !intents.is_empty() {
                out.push_str(&format!("\n  intents: {}", intents.join(", ")));
            }
            let keys = document.flat_keys();
            if !keys.is_empty() {
                out.push_str(&format!("\n  keys: {}", keys.join(", ")));
            }
        }
        Err(e) => out.push_str(&format!("\n  skipped: {e}")),
    }
    out
}

async fn resolve(config: &IntegrationConfig, resolver: ResponseResolver, request: ResponseRequest) -> String {
    let source: Box<dyn ResponseSource> = if config.cache_responses {
        Box::new(ResponseCatalog::new(resolver))
    } else {
        Box::new(resolver)
    };
    source.response_text(request).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let (config, resolver) = load(&args.config)?;
    debug!(base_dir = %resolver.base_dir().display(), "Using response documents");

    match args.command {
        Command::Resolve {
            key,
            intent,
            scope,
            slots,
        } => {
            let mut request = scope.request(&key, &config).slots(slots.into_iter().fold(
                Slots::new(),
                |mut slots, (name, value)| {
                    slots.insert(name, value);
                    slots
                },
            ));
            if let Some(intent) = intent {
                request = request.intent(intent);
            }
            println!("{}", resolve(&config, resolver, request).await);
        }
        Command::Documents { scope } => {
            let request = scope.request("", &config);
            let documents = resolver
                .documents(&request)
                .with_context(|| format!("listing documents under {}", resolver.base_dir().display()))?;
            for path in documents {
                println!("{}", describe_document(&path));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "spotifyplus",
            "--config",
            "/config",
            "-vv",
            "resolve",
            "--key",
            "play_playlist",
            "--slot",
            "playlist_title=Daily Mix 1",
            "--all-files",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("/config"));
        assert_eq!(args.verbose, 2);
        match args.command {
            Command::Resolve { key, slots, scope, .. } => {
                assert_eq!(key, "play_playlist");
                assert_eq!(slots.len(), 1);
                assert!(scope.all_files);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_slot() {
        let (name, slot) = parse_slot("playlist_title=Daily Mix 1").unwrap();
        assert_eq!(name, "playlist_title");
        assert_eq!(slot.text, "Daily Mix 1");
        assert_eq!(slot.value, json!("Daily Mix 1"));

        let (_, slot) = parse_slot("volume=ten=10").unwrap();
        assert_eq!(slot.text, "ten");
        assert_eq!(slot.value, json!(10));

        let (_, slot) = parse_slot("uri=Jazz=spotify:playlist:abc").unwrap();
        assert_eq!(slot.value, json!("spotify:playlist:abc"));

        assert!(parse_slot("=x").is_err());
        assert!(parse_slot("name").is_err());
    }

    #[test]
    fn test_scope_request() {
        let config = IntegrationConfig::default();
        let scope = Scope {
            platform: None,
            language: Some("de".to_string()),
            all_files: true,
        };
        let request = scope.request("k", &config);
        assert_eq!(request.platform.as_deref(), Some("spotifyplus"));
        assert_eq!(request.language.as_deref(), Some("de"));
        assert!(!request.platform_files_only);
    }

    #[tokio::test]
    async fn test_resolve_with_catalog() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("spotifyplus.yaml"), "cache_responses: true\n").unwrap();
        let en = dir.path().join("custom_sentences").join("en");
        fs::create_dir_all(&en).unwrap();
        fs::write(
            en.join("spotifyplus_responses.yaml"),
            "responses:\n  spotifyplus:\n    play_playlist: \"Playing {{ slots.playlist_title.text }}\"\n",
        )
        .unwrap();

        let (config, resolver) = load(dir.path()).unwrap();
        assert!(config.cache_responses);

        let request = ResponseRequest::new("play_playlist")
            .platform("spotifyplus")
            .slots(Slots::new().with("playlist_title", "Daily Mix 1", "spotify:playlist:abc"));
        assert_eq!(resolve(&config, resolver, request).await, "Playing Daily Mix 1");
    }

    #[test]
    fn test_describe_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("spotifyplus_responses.yaml");
        fs::write(
            &path,
            "responses:\n  intents:\n    SpotifyPlusVolumeUp:\n      default: \"Up\"\n  greet: \"hi\"\n  bye: \"later\"\n",
        )
        .unwrap();

        let text = describe_document(&path);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], path.display().to_string());
        assert_eq!(lines[1], "  intents: SpotifyPlusVolumeUp");
        assert_eq!(lines[2], "  keys: greet, bye");

        let broken = dir.path().join("spotifyplus_broken.yaml");
        fs::write(&broken, "responses: [unclosed").unwrap();
        assert!(describe_document(&broken).contains("\n  skipped: "));
    }

    #[test]
    fn test_load_missing_dir() {
        assert!(load(Path::new("/nonexistent/spotifyplus")).is_err());
    }
}
