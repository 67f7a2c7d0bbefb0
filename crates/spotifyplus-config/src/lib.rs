//! Configuration for SpotifyPlus
//!
//! - [`IntegrationConfig`]: `spotifyplus.yaml`, loaded through [`YamlLoader`]
//!   with `!secret` and `!env_var` substitution
//! - [`PlayerOptions`] and the two-step [`OptionsFlow`]
//! - the OAuth [`ConfigFlow`] that turns a Spotify token into an entry

mod error;
pub mod flow;
pub mod integration;
pub mod loader;
pub mod oauth;
pub mod options;
pub mod secrets;

pub use error::{ConfigError, ConfigResult};
pub use flow::{FlowResult, FlowResultType, FormField};
pub use integration::{IntegrationConfig, CONFIG_FILE};
pub use loader::{load_yaml, YamlLoader};
pub use oauth::{
    extra_authorize_data, ConfigEntry, ConfigFlow, FlowSource, ProfileError, ProfileProvider, UserProfile,
    AUTHORIZE_URL, SPOTIFY_SCOPES, TOKEN_URL,
};
pub use options::{OptionsFlow, PlayerOptions};
pub use secrets::Secrets;
