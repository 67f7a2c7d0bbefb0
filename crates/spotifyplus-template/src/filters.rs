//! Filters available to response templates

use minijinja::{Error, ErrorKind};
use spotifyplus_core::{id_from_uri, mask, web_url_for_uri, MediaKind, SpotifyUri, SPOTIFY_WEB_URL_PFX};

/// `{{ slots.track_title.value | spotify_id }}` -> id portion of a uri
pub fn spotify_id(uri: String) -> String {
    id_from_uri(&uri).unwrap_or_default().to_string()
}

/// `{{ uri | spotify_url }}` or `{{ uri | spotify_url('artist') }}`
///
/// Without a kind the kind is taken from the uri itself. Uris that cannot
/// be interpreted yield the bare web player prefix.
pub fn spotify_url(uri: String, kind: Option<String>) -> Result<String, Error> {
    match kind {
        Some(kind) => {
            let kind: MediaKind = kind
                .parse()
                .map_err(|e| Error::new(ErrorKind::InvalidOperation, format!("spotify_url: {}", e)))?;
            Ok(web_url_for_uri(kind, &uri))
        }
        None => Ok(uri
            .parse::<SpotifyUri>()
            .map(|parsed| parsed.web_url())
            .unwrap_or_else(|_| SPOTIFY_WEB_URL_PFX.to_string())),
    }
}

/// `{{ secret | masked }}` -> `*` per character
pub fn masked(value: String) -> String {
    mask(&value)
}

/// `{{ slots.artist_bio.text | clip(400) }}` -> at most `len` characters
pub fn clip(value: String, len: usize) -> String {
    match value.char_indices().nth(len) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value,
    }
}
