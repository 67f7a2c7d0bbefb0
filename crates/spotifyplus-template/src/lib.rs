//! Jinja2-compatible rendering of SpotifyPlus response text
//!
//! Response documents hold template text such as
//! `"Playing {{ slots.track_title.text }} by {{ slots.artist_title.text }}"`.
//! The [`ResponseRenderer`] renders it with the intent's slots available as
//! `slots`.
//!
//! # Filters
//!
//! - `| spotify_id` - Id portion of a `spotify:<kind>:<id>` uri
//! - `| spotify_url` / `| spotify_url('artist')` - Web player link for a uri
//! - `| clip(400)` - Truncate to a number of characters
//! - `| masked` - Replace every character with `*`
//!
//! # Example
//!
//! ```ignore
//! use spotifyplus_core::Slots;
//! use spotifyplus_template::ResponseRenderer;
//!
//! let renderer = ResponseRenderer::new();
//! let slots = Slots::new().with("name", "Ana", "");
//! let text = renderer.render("Hi {{ slots.name.text }}", &slots)?;
//! ```

mod error;
mod filters;
mod renderer;

pub use error::{TemplateError, TemplateResult};
pub use renderer::ResponseRenderer;

// Re-export minijinja Value for convenience
pub use minijinja::Value;
