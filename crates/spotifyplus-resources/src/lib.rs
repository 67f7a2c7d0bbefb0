//! Response resource resolution for SpotifyPlus intents
//!
//! Response text lives in YAML documents under
//! `<custom_sentences>/<language>/`. A lookup names a response key plus
//! the intent and platform it came from; the resolver searches the
//! documents in file name order and, inside each document, three layouts:
//!
//! 1. `responses.intents.<intent>.<key>`
//! 2. `responses.<platform>.<key>`
//! 3. `responses.<key>` (string values only)
//!
//! The first document holding any candidate wins, and its highest-priority
//! candidate is rendered with the request's slots. Lookups never return an
//! error: a missing directory or key yields diagnostic text, and a template
//! that fails to render is returned unrendered.
//!
//! # Example
//!
//! ```ignore
//! use spotifyplus_core::Slots;
//! use spotifyplus_resources::{ResponseRequest, ResponseResolver};
//!
//! let resolver = ResponseResolver::new("/config/custom_sentences");
//! let request = ResponseRequest::new("play_playlist")
//!     .intent("SpotifyPlusPlayPlaylist")
//!     .platform("spotifyplus")
//!     .slots(Slots::new().with("playlist_title", "Daily Mix 1", "spotify:playlist:abc"));
//! let text = resolver.resolve_async(request).await;
//! ```

mod catalog;
mod document;
mod error;
mod resolver;
mod scan;
mod source;
mod yaml;

pub use catalog::ResponseCatalog;
pub use document::{Candidate, Layout, ResponseDocument};
pub use error::{ResolveError, ResolveResult};
pub use resolver::{
    directory_message, failure_message, not_found_message, FoundTemplate, ResponseRequest,
    ResponseResolver,
};
pub use scan::{list_documents, DocumentFilter};
pub use source::ResponseSource;
