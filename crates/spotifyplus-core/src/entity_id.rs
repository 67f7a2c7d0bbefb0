//! Entity ID type for players and other host entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::names::DOMAIN_MEDIA_PLAYER;

/// Error type for invalid entity IDs
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntityIdError {
    #[error("entity_id must contain exactly one '.' separator")]
    InvalidFormat,

    #[error("domain cannot be empty")]
    EmptyDomain,

    #[error("object_id cannot be empty")]
    EmptyObjectId,

    #[error("'{0}' must be lowercase alphanumeric with underscores, not starting or ending with '_'")]
    InvalidChars(String),
}

/// A host entity ID such as `media_player.spotifyplus_john`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
    domain: String,
    object_id: String,
}

impl EntityId {
    /// Validated id from a domain and object id
    pub fn new(
        domain: impl Into<String>,
        object_id: impl Into<String>,
    ) -> Result<Self, EntityIdError> {
        let domain = domain.into();
        let object_id = object_id.into();

        if domain.is_empty() {
            return Err(EntityIdError::EmptyDomain);
        }
        if object_id.is_empty() {
            return Err(EntityIdError::EmptyObjectId);
        }
        if !is_slug(&domain) || domain.contains("__") {
            return Err(EntityIdError::InvalidChars(domain));
        }
        if !is_slug(&object_id) {
            return Err(EntityIdError::InvalidChars(object_id));
        }

        Ok(Self { domain, object_id })
    }

    /// Media player entity with the given object id
    pub fn media_player(object_id: impl Into<String>) -> Result<Self, EntityIdError> {
        Self::new(DOMAIN_MEDIA_PLAYER, object_id)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    /// True for ids in the `media_player` domain
    pub fn is_media_player(&self) -> bool {
        self.domain == DOMAIN_MEDIA_PLAYER
    }
}

// lowercase alphanumeric + underscore, no leading/trailing underscore
fn is_slug(s: &str) -> bool {
    !s.starts_with('_')
        && !s.ends_with('_')
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

impl FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((domain, object_id)) if !object_id.contains('.') => Self::new(domain, object_id),
            _ => Err(EntityIdError::InvalidFormat),
        }
    }
}

impl TryFrom<String> for EntityId {
    type Error = EntityIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> String {
        id.to_string()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.domain, self.object_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_media_player() {
        let id: EntityId = "media_player.spotifyplus_john".parse().unwrap();
        assert_eq!(id.domain(), "media_player");
        assert_eq!(id.object_id(), "spotifyplus_john");
        assert!(id.is_media_player());
        assert_eq!(id, EntityId::media_player("spotifyplus_john").unwrap());
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!("no_separator".parse::<EntityId>().unwrap_err(), EntityIdError::InvalidFormat);
        assert_eq!("too.many.parts".parse::<EntityId>().unwrap_err(), EntityIdError::InvalidFormat);
        assert_eq!(".player".parse::<EntityId>().unwrap_err(), EntityIdError::EmptyDomain);
        assert_eq!("media_player.".parse::<EntityId>().unwrap_err(), EntityIdError::EmptyObjectId);
    }

    #[test]
    fn test_invalid_chars() {
        assert!(matches!(
            "Media_Player.x".parse::<EntityId>(),
            Err(EntityIdError::InvalidChars(_))
        ));
        assert!(matches!(
            "media__player.x".parse::<EntityId>(),
            Err(EntityIdError::InvalidChars(_))
        ));
        assert!(matches!(
            "media_player._x".parse::<EntityId>(),
            Err(EntityIdError::InvalidChars(_))
        ));
        assert!("media_player.my__room".parse::<EntityId>().is_ok());
    }

    #[test]
    fn test_serde_as_string() {
        let id = EntityId::media_player("kitchen").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"media_player.kitchen\"");
        let parsed: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
        assert!(serde_json::from_str::<EntityId>("\"bad\"").is_err());
    }
}
