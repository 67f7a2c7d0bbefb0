//! Voice intent handling for SpotifyPlus media players
//!
//! Every SpotifyPlus intent is described declaratively by an
//! [`IntentDescriptor`] and run by one [`IntentHandler`]:
//!
//! 1. slots are validated and defaults applied
//! 2. the target player is resolved through the host's [`TargetMatcher`]
//! 3. premium, feature and state requirements are checked
//! 4. the descriptor's steps assign slots and call services
//! 5. the response key is resolved to text through a [`ResponseSource`]
//!
//! The host is reached only through the traits in [`host`], so the whole
//! pipeline runs against in-memory fakes in tests.
//!
//! # Example
//!
//! ```ignore
//! use spotifyplus_intents::{Intent, IntentHandler, IntentRegistry};
//!
//! let handler = IntentHandler::new(host, responses);
//! let registry = IntentRegistry::with_defaults(handler);
//!
//! let intent = Intent::new("SpotifyPlusVolumeUp");
//! let response = registry.handle(&intent).await?;
//! ```
//!
//! [`ResponseSource`]: spotifyplus_resources::ResponseSource

pub mod builtin;
pub mod descriptor;
mod error;
mod handler;
pub mod host;
mod intent;
mod player;
mod registry;
pub mod schema;

pub use builtin::intent_type;
pub use descriptor::{
    CallStep, Condition, IntentDescriptor, ResponseSelector, Scope, Source, Step, TargetRequirements,
};
pub use error::{IntentError, IntentResult, ServiceError, ServiceResult};
pub use handler::{IntentHandler, ResponseSettings};
pub use host::{
    Host, MatchConstraints, MatchFailedReason, MatchPreferences, MatchResult, PlayerRegistry, RegistryEntry,
    ServiceCaller, StateReader, TargetMatcher,
};
pub use intent::{ErrorCode, Intent, IntentResponse, ResponseType};
pub use player::{resolve_player, ResolvedPlayer};
pub use registry::IntentRegistry;
pub use schema::{SlotKind, SlotSpec};
