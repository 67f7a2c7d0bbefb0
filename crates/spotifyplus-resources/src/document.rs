//! Response documents and the three-layout key search
//!
//! A response document is a YAML file with a top-level `responses` mapping.
//! Response text for a key can live in three layouts, searched in this
//! order:
//!
//! ```yaml
//! responses:
//!   intents:
//!     SpotifyPlusPlayPlaylist:          # intent layout
//!       play_playlist: "Playing {{ slots.playlist_title.text }}"
//!   spotifyplus:                        # platform layout
//!     play_playlist: "Playing playlist"
//!   play_playlist: "OK"                 # flat layout (strings only)
//! ```

use crate::error::{ResolveError, ResolveResult};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

const RESPONSES_KEY: &str = "responses";
const INTENTS_KEY: &str = "intents";

/// Layout a response text was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `responses.intents.<intent>.<key>`
    Intent,
    /// `responses.<platform>.<key>`
    Platform,
    /// `responses.<key>`
    Flat,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Intent => "intent",
            Self::Platform => "platform",
            Self::Flat => "flat",
        })
    }
}

/// Response text candidate found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub layout: Layout,
    pub text: String,
}

/// One parsed response document
#[derive(Debug, Clone)]
pub struct ResponseDocument {
    path: PathBuf,
    responses: Mapping,
}

impl ResponseDocument {
    /// Read and parse a document from disk
    pub fn load(path: impl Into<PathBuf>) -> ResolveResult<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path).map_err(|e| ResolveError::ReadFile {
            path: path.clone(),
            source: e,
        })?;
        Self::parse(path, &content)
    }

    /// Parse document text; `path` is kept for diagnostics only
    ///
    /// Documents without a `responses` mapping parse successfully and
    /// simply hold no candidates.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> ResolveResult<Self> {
        let path = path.into();
        let value = crate::yaml::from_str(content).map_err(|e| ResolveError::ParseYaml {
            path: path.clone(),
            source: e,
        })?;

        let responses = match value.get(RESPONSES_KEY) {
            Some(Value::Mapping(map)) => map.clone(),
            _ => {
                trace!(path = %path.display(), "document has no responses mapping");
                Mapping::new()
            }
        };

        Ok(Self { path, responses })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name of the document, for logging
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// All candidates for `key`, highest priority first
    pub fn candidates(&self, key: &str, intent: Option<&str>, platform: Option<&str>) -> Vec<Candidate> {
        let mut found = Vec::new();

        if let Some(intent) = intent {
            let text = self
                .responses
                .get(INTENTS_KEY)
                .and_then(|intents| intents.get(intent))
                .and_then(|block| block.get(key))
                .and_then(scalar_text);
            if let Some(text) = text {
                found.push(Candidate { layout: Layout::Intent, text });
            }
        }

        if let Some(platform) = platform {
            let text = self
                .responses
                .get(platform)
                .filter(|block| block.is_mapping())
                .and_then(|block| block.get(key))
                .and_then(scalar_text);
            if let Some(text) = text {
                found.push(Candidate { layout: Layout::Platform, text });
            }
        }

        if let Some(Value::String(text)) = self.responses.get(key) {
            found.push(Candidate {
                layout: Layout::Flat,
                text: text.clone(),
            });
        }

        if !found.is_empty() {
            debug!(
                document = %self.file_name(),
                key = %key,
                layouts = ?found.iter().map(|c| c.layout).collect::<Vec<_>>(),
                "response key candidates found"
            );
        }

        found
    }

    /// Highest-priority candidate for `key`
    pub fn first_candidate(&self, key: &str, intent: Option<&str>, platform: Option<&str>) -> Option<Candidate> {
        self.candidates(key, intent, platform).into_iter().next()
    }

    /// Response keys defined in the flat layout
    pub fn flat_keys(&self) -> Vec<String> {
        self.responses
            .iter()
            .filter(|(_, v)| v.is_string())
            .filter_map(|(k, _)| k.as_str().map(String::from))
            .collect()
    }

    /// Intent names with an intent layout block
    pub fn intent_names(&self) -> Vec<String> {
        match self.responses.get(INTENTS_KEY) {
            Some(Value::Mapping(intents)) => intents
                .keys()
                .filter_map(|k| k.as_str().map(String::from))
                .collect(),
            _ => Vec::new(),
        }
    }
}

// Intent and platform layouts accept any scalar; flat only strings.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
