//! Spotify media kinds and URI helpers

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Prefix of Spotify web player links
pub const SPOTIFY_WEB_URL_PFX: &str = "https://open.spotify.com";

/// Kinds of Spotify catalog items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Album,
    Artist,
    Audiobook,
    Chapter,
    Episode,
    Playlist,
    Show,
    Track,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Album => "album",
            Self::Artist => "artist",
            Self::Audiobook => "audiobook",
            Self::Chapter => "chapter",
            Self::Episode => "episode",
            Self::Playlist => "playlist",
            Self::Show => "show",
            Self::Track => "track",
        }
    }

    /// True when `uri` is a `spotify:<kind>:...` uri of this kind
    pub fn matches_uri(self, uri: &str) -> bool {
        uri.strip_prefix("spotify:")
            .and_then(|rest| rest.strip_prefix(self.as_str()))
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(':'))
    }

    /// Web player link for an item id of this kind
    pub fn web_url(self, id: &str) -> String {
        format!("{}/{}/{}", SPOTIFY_WEB_URL_PFX, self.as_str(), id)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a media kind or uri cannot be parsed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MediaError {
    #[error("unknown media kind '{0}'")]
    UnknownKind(String),

    #[error("'{0}' is not a spotify uri")]
    InvalidUri(String),
}

impl FromStr for MediaKind {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "album" => Ok(Self::Album),
            "artist" => Ok(Self::Artist),
            "audiobook" => Ok(Self::Audiobook),
            "chapter" => Ok(Self::Chapter),
            "episode" => Ok(Self::Episode),
            "playlist" => Ok(Self::Playlist),
            "show" | "podcast" => Ok(Self::Show),
            "track" => Ok(Self::Track),
            other => Err(MediaError::UnknownKind(other.to_string())),
        }
    }
}

/// Parsed `spotify:<kind>:<id>` uri
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyUri {
    pub kind: MediaKind,
    pub id: String,
}

fn uri_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^spotify:([a-z]+):([0-9A-Za-z]+)$").ok())
        .as_ref()
}

impl SpotifyUri {
    /// Web player link for this item
    pub fn web_url(&self) -> String {
        self.kind.web_url(&self.id)
    }
}

impl FromStr for SpotifyUri {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = uri_pattern()
            .and_then(|pattern| pattern.captures(s.trim()))
            .ok_or_else(|| MediaError::InvalidUri(s.to_string()))?;
        let kind = captures[1].parse()?;
        Ok(Self {
            kind,
            id: captures[2].to_string(),
        })
    }
}

impl fmt::Display for SpotifyUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spotify:{}:{}", self.kind, self.id)
    }
}

/// Id portion of a spotify uri
///
/// Only uris with exactly two `:` separators yield an id; anything else
/// (blank, a web link, a user-scoped playlist uri) returns `None`.
pub fn id_from_uri(uri: &str) -> Option<&str> {
    if uri.trim().is_empty() || uri.matches(':').count() != 2 {
        return None;
    }
    uri.rfind(':').map(|idx| &uri[idx + 1..])
}

/// Web player link for a uri, falling back to the bare web prefix
pub fn web_url_for_uri(kind: MediaKind, uri: &str) -> String {
    match id_from_uri(uri) {
        Some(id) => kind.web_url(id),
        None => SPOTIFY_WEB_URL_PFX.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_uri() {
        assert_eq!(id_from_uri("spotify:track:5v5ETK9WFXAnGQ3MRubKuE"), Some("5v5ETK9WFXAnGQ3MRubKuE"));
        assert_eq!(id_from_uri(""), None);
        assert_eq!(id_from_uri("   "), None);
        assert_eq!(id_from_uri("spotify:user:abc:playlist:def"), None);
        assert_eq!(id_from_uri("5v5ETK9WFXAnGQ3MRubKuE"), None);
    }

    #[test]
    fn test_matches_uri() {
        assert!(MediaKind::Playlist.matches_uri("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M"));
        assert!(!MediaKind::Playlist.matches_uri("Daily Mix"));
        assert!(!MediaKind::Show.matches_uri("spotify:showcase:abc"));
        assert!(!MediaKind::Track.matches_uri("spotify:album:abc"));
    }

    #[test]
    fn test_web_url() {
        assert_eq!(
            web_url_for_uri(MediaKind::Artist, "spotify:artist:6vWDO969PvNqNYHIOW5v0m"),
            "https://open.spotify.com/artist/6vWDO969PvNqNYHIOW5v0m"
        );
        assert_eq!(web_url_for_uri(MediaKind::Artist, "unknown"), SPOTIFY_WEB_URL_PFX);
    }

    #[test]
    fn test_parse_uri() {
        let uri: SpotifyUri = "spotify:episode:26c0zVyOv1lzfYpBXdh1zC".parse().unwrap();
        assert_eq!(uri.kind, MediaKind::Episode);
        assert_eq!(uri.id, "26c0zVyOv1lzfYpBXdh1zC");
        assert_eq!(uri.to_string(), "spotify:episode:26c0zVyOv1lzfYpBXdh1zC");
        assert_eq!(uri.web_url(), "https://open.spotify.com/episode/26c0zVyOv1lzfYpBXdh1zC");

        assert!(matches!(
            "spotify:widget:abc".parse::<SpotifyUri>(),
            Err(MediaError::UnknownKind(_))
        ));
        assert!(matches!(
            "https://open.spotify.com/track/abc".parse::<SpotifyUri>(),
            Err(MediaError::InvalidUri(_))
        ));
    }
}
