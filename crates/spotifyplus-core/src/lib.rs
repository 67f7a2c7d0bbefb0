//! Core types for SpotifyPlus
//!
//! This crate provides the value types shared by the response resolver,
//! the intent handlers and the configuration flows: [`Slots`], player
//! [`State`] snapshots, [`PlayerFeatures`], [`ServiceCall`] and the
//! Spotify uri helpers.

mod context;
mod entity_id;
mod features;
mod media;
pub mod names;
mod redact;
mod service_call;
mod slots;
mod state;

pub use context::Context;
pub use entity_id::{EntityId, EntityIdError};
pub use features::PlayerFeatures;
pub use media::{id_from_uri, web_url_for_uri, MediaError, MediaKind, SpotifyUri, SPOTIFY_WEB_URL_PFX};
pub use redact::{mask, mask_passwords};
pub use service_call::ServiceCall;
pub use slots::{SlotValue, Slots};
pub use state::State;

/// Language used when neither the request nor the host names one
pub const DEFAULT_LANGUAGE: &str = "en";
