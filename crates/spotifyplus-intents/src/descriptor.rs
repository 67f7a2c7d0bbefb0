//! Declarative intent descriptors
//!
//! An [`IntentDescriptor`] is data: which slots the intent takes, what the
//! target player must offer, an ordered list of [`Step`]s and how the
//! response key is chosen. One dispatcher (see [`crate::handler`]) runs
//! every descriptor.
//!
//! Steps read from and write to a [`Scope`]: the intent's slots, the
//! resolved player state and the response of the most recent service call.

use crate::schema::SlotSpec;
use serde_json::Value;
use spotifyplus_core::names::DOMAIN;
use spotifyplus_core::{id_from_uri, MediaKind, PlayerFeatures, SlotValue, Slots, State, SPOTIFY_WEB_URL_PFX};

/// Requirements the target player must meet before any step runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetRequirements {
    pub features: Option<PlayerFeatures>,
    /// Accepted player states and the response key used otherwise
    pub states: Option<(Vec<&'static str>, &'static str)>,
    pub premium: bool,
}

impl TargetRequirements {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn features(mut self, features: PlayerFeatures) -> Self {
        self.features = Some(features);
        self
    }

    pub fn states(mut self, states: &[&'static str], otherwise: &'static str) -> Self {
        self.states = Some((states.to_vec(), otherwise));
        self
    }

    pub fn premium(mut self) -> Self {
        self.premium = true;
        self
    }
}

/// A value computed from the scope
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Null,
    Str(&'static str),
    Bool(bool),
    Int(i64),
    /// Entity id of the resolved player
    EntityId,
    SlotText(&'static str),
    SlotValue(&'static str),
    /// Player state attribute
    Attribute(&'static str),
    /// JSON pointer into the last service response
    Response(&'static str),
    /// First of the two that is not empty
    Or(Box<Source>, Box<Source>),
    /// Id part of a spotify uri
    UriId(Box<Source>),
    /// Web player link for a uri; bare web prefix when the uri has no id
    WebUrl(MediaKind, Box<Source>),
    /// String concatenation; empty parts contribute nothing
    Concat(Vec<Source>),
    /// `prefix` + value when the value is not empty, otherwise empty
    Prefixed(&'static str, Box<Source>),
    /// True when the value is the string `"on"`
    IsOn(Box<Source>),
    /// Replaces the value when it equals `matches` (ignoring case)
    Replace {
        source: Box<Source>,
        matches: &'static str,
        with: &'static str,
    },
}

impl Source {
    /// Display text of a slot
    pub fn text(slot: &'static str) -> Self {
        Self::SlotText(slot)
    }

    /// Underlying value of a slot
    pub fn value(slot: &'static str) -> Self {
        Self::SlotValue(slot)
    }

    /// Attribute of the target player
    pub fn attr(name: &'static str) -> Self {
        Self::Attribute(name)
    }

    /// JSON pointer into the last service response
    pub fn response(pointer: &'static str) -> Self {
        Self::Response(pointer)
    }

    /// `fallback` when this source evaluates empty
    pub fn or(self, fallback: Source) -> Self {
        Self::Or(Box::new(self), Box::new(fallback))
    }

    pub fn or_str(self, fallback: &'static str) -> Self {
        self.or(Self::Str(fallback))
    }

    /// Bare id of a Spotify uri, e.g. `abc` for `spotify:playlist:abc`
    pub fn uri_id(self) -> Self {
        Self::UriId(Box::new(self))
    }

    /// Web link for a uri of `kind`
    pub fn web_url(self, kind: MediaKind) -> Self {
        Self::WebUrl(kind, Box::new(self))
    }

    /// `prefix` followed by `source`, or empty when the source is
    pub fn prefixed(prefix: &'static str, source: Source) -> Self {
        Self::Prefixed(prefix, Box::new(source))
    }

    /// True when the source reads `on`
    pub fn is_on(self) -> Self {
        Self::IsOn(Box::new(self))
    }

    /// Replace the whole text when it equals `matches`, ignoring case
    pub fn replace(self, matches: &'static str, with: &'static str) -> Self {
        Self::Replace {
            source: Box::new(self),
            matches,
            with,
        }
    }

    /// `<response pointer>` or the bare web prefix
    pub fn response_url(pointer: &'static str) -> Self {
        Self::Response(pointer).or_str(SPOTIFY_WEB_URL_PFX)
    }
}

/// A test on the scope
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Always,
    /// Slot value is a `spotify:<kind>` uri
    SlotIsUri(&'static str, MediaKind),
    SlotHasText(&'static str),
    SlotValueIs(&'static str, &'static str),
    AttributeIs(&'static str, &'static str),
    AttributeContains(&'static str, &'static str),
    Not(Box<Condition>),
}

impl Condition {
    pub fn not(condition: Condition) -> Self {
        Self::Not(Box::new(condition))
    }
}

/// A service call made by a step
#[derive(Debug, Clone, PartialEq)]
pub struct CallStep {
    pub domain: &'static str,
    pub service: &'static str,
    pub args: Vec<(&'static str, Source)>,
    /// Arguments left out of the call when their value is empty
    pub optional_args: Vec<(&'static str, Source)>,
    pub return_response: bool,
    /// Stop with this response key when the pointer is empty in the result
    pub empty: Option<(&'static str, &'static str)>,
}

impl CallStep {
    /// Call of an integration service on the resolved player
    pub fn spotifyplus(service: &'static str) -> Self {
        Self::new(DOMAIN, service)
    }

    pub fn new(domain: &'static str, service: &'static str) -> Self {
        Self {
            domain,
            service,
            args: vec![("entity_id", Source::EntityId)],
            optional_args: Vec::new(),
            return_response: false,
            empty: None,
        }
    }

    /// Service data entry, sent even when empty
    pub fn arg(mut self, name: &'static str, source: Source) -> Self {
        self.args.push((name, source));
        self
    }

    /// Service data entry, left out when the source is empty
    pub fn optional_arg(mut self, name: &'static str, source: Source) -> Self {
        self.optional_args.push((name, source));
        self
    }

    /// Ask the service for its response data
    pub fn returning(mut self) -> Self {
        self.return_response = true;
        self
    }

    /// Stop with `response` when `pointer` is empty in the result
    pub fn unless_empty(mut self, pointer: &'static str, response: &'static str) -> Self {
        self.return_response = true;
        self.empty = Some((pointer, response));
        self
    }
}

/// One step of an intent
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Write a slot
    Assign {
        slot: &'static str,
        text: Source,
        value: Source,
        when: Condition,
    },
    /// Call a service
    Call { call: CallStep, when: Condition },
    /// Stop with `otherwise` unless the condition holds
    Require {
        condition: Condition,
        otherwise: &'static str,
    },
}

impl Step {
    pub fn assign(slot: &'static str, text: Source, value: Source) -> Self {
        Self::Assign {
            slot,
            text,
            value,
            when: Condition::Always,
        }
    }

    /// Slot holding a web link, displayed as "Spotify"
    pub fn link(slot: &'static str, url: Source) -> Self {
        Self::assign(slot, Source::Str("Spotify"), url)
    }

    pub fn call(call: CallStep) -> Self {
        Self::Call {
            call,
            when: Condition::Always,
        }
    }

    pub fn require(condition: Condition, otherwise: &'static str) -> Self {
        Self::Require { condition, otherwise }
    }

    /// Run this step only when `condition` holds
    pub fn when(self, condition: Condition) -> Self {
        match self {
            Self::Assign { slot, text, value, .. } => Self::Assign {
                slot,
                text,
                value,
                when: condition,
            },
            Self::Call { call, .. } => Self::Call { call, when: condition },
            require @ Self::Require { .. } => require,
        }
    }
}

/// How the success response key is chosen
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseSelector {
    Fixed(&'static str),
    /// No speech; the sentence's own response is used with the slots
    Silent,
    Choose {
        when: Condition,
        then: &'static str,
        otherwise: &'static str,
    },
}

impl ResponseSelector {
    /// `then` when the slot has text, else `otherwise`
    pub fn if_slot_text(slot: &'static str, then: &'static str, otherwise: &'static str) -> Self {
        Self::Choose {
            when: Condition::SlotHasText(slot),
            then,
            otherwise,
        }
    }

    /// Response key for a finished run; `None` when the intent is silent
    pub fn key(&self, scope: &Scope<'_>) -> Option<&'static str> {
        match self {
            Self::Fixed(key) => Some(*key),
            Self::Silent => None,
            Self::Choose { when, then, otherwise } => {
                Some(if scope.holds(when) { *then } else { *otherwise })
            }
        }
    }
}

/// Declarative definition of one intent
#[derive(Debug, Clone, PartialEq)]
pub struct IntentDescriptor {
    pub intent_type: &'static str,
    pub description: &'static str,
    /// Slots beyond the target slots
    pub slots: Vec<SlotSpec>,
    pub target: TargetRequirements,
    pub steps: Vec<Step>,
    pub response: ResponseSelector,
}

impl IntentDescriptor {
    /// Descriptor with no slots, requirements or steps that answers silently
    pub fn new(intent_type: &'static str, description: &'static str) -> Self {
        Self {
            intent_type,
            description,
            slots: Vec::new(),
            target: TargetRequirements::none(),
            steps: Vec::new(),
            response: ResponseSelector::Silent,
        }
    }

    pub fn slots(mut self, slots: Vec<SlotSpec>) -> Self {
        self.slots = slots;
        self
    }

    pub fn target(mut self, target: TargetRequirements) -> Self {
        self.target = target;
        self
    }

    pub fn steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }

    pub fn respond(mut self, response: ResponseSelector) -> Self {
        self.response = response;
        self
    }

    /// Full slot schema: target slots followed by the intent's own
    pub fn schema(&self) -> Vec<SlotSpec> {
        let mut schema = crate::schema::target_slots();
        schema.extend(self.slots.iter().cloned());
        schema
    }
}

/// State the steps of one intent run against
#[derive(Debug)]
pub struct Scope<'a> {
    pub slots: Slots,
    pub player: &'a State,
    pub last_response: Option<Value>,
}

impl<'a> Scope<'a> {
    /// Scope over validated slots and the resolved player
    pub fn new(slots: Slots, player: &'a State) -> Self {
        Self {
            slots,
            player,
            last_response: None,
        }
    }

    /// Evaluate a source
    pub fn eval(&self, source: &Source) -> Value {
        match source {
            Source::Null => Value::Null,
            Source::Str(s) => Value::String(s.to_string()),
            Source::Bool(b) => Value::Bool(*b),
            Source::Int(i) => Value::from(*i),
            Source::EntityId => Value::String(self.player.entity_id.to_string()),
            Source::SlotText(name) => self
                .slots
                .get(name)
                .map(|s| Value::String(s.text.clone()))
                .unwrap_or(Value::Null),
            Source::SlotValue(name) => self.slots.value(name).cloned().unwrap_or(Value::Null),
            Source::Attribute(name) => self.player.attributes.get(*name).cloned().unwrap_or(Value::Null),
            Source::Response(pointer) => self
                .last_response
                .as_ref()
                .and_then(|response| response.pointer(pointer))
                .cloned()
                .unwrap_or(Value::Null),
            Source::Or(first, fallback) => {
                let value = self.eval(first);
                if is_empty(&value) {
                    self.eval(fallback)
                } else {
                    value
                }
            }
            Source::UriId(uri) => {
                let uri = as_text(&self.eval(uri));
                id_from_uri(&uri)
                    .map(|id| Value::String(id.to_string()))
                    .unwrap_or(Value::Null)
            }
            Source::WebUrl(kind, uri) => {
                let uri = as_text(&self.eval(uri));
                Value::String(spotifyplus_core::web_url_for_uri(*kind, &uri))
            }
            Source::Concat(parts) => {
                Value::String(parts.iter().map(|part| as_text(&self.eval(part))).collect())
            }
            Source::Prefixed(prefix, source) => {
                let text = as_text(&self.eval(source));
                if text.is_empty() {
                    Value::String(String::new())
                } else {
                    Value::String(format!("{}{}", prefix, text))
                }
            }
            Source::IsOn(source) => Value::Bool(self.eval(source).as_str() == Some("on")),
            Source::Replace { source, matches, with } => {
                let value = self.eval(source);
                match value.as_str() {
                    Some(s) if s.eq_ignore_ascii_case(matches) => Value::String(with.to_string()),
                    _ => value,
                }
            }
        }
    }

    /// Evaluate a condition
    pub fn holds(&self, condition: &Condition) -> bool {
        match condition {
            Condition::Always => true,
            Condition::SlotIsUri(name, kind) => self
                .slots
                .value_str(name)
                .is_some_and(|uri| kind.matches_uri(uri)),
            Condition::SlotHasText(name) => self.slots.non_blank_text(name).is_some(),
            Condition::SlotValueIs(name, expected) => self.slots.value_str(name) == Some(*expected),
            Condition::AttributeIs(name, expected) => self.player.attribute_str(name) == Some(*expected),
            Condition::AttributeContains(name, needle) => self
                .player
                .attribute_str(name)
                .is_some_and(|value| value.contains(needle)),
            Condition::Not(inner) => !self.holds(inner),
        }
    }

    /// Write a slot from evaluated text and value
    pub fn assign(&mut self, slot: &str, text: &Source, value: &Source) {
        let text = as_text(&self.eval(text));
        let value = self.eval(value);
        self.slots.insert(slot, SlotValue::new(text, value));
    }
}

/// Display text of a value; `null` is empty
pub fn as_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// True for missing results: null, 0, "", [] and {}
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(_) => false,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use spotifyplus_core::names::{attr, slot};
    use spotifyplus_core::EntityId;
    use std::collections::HashMap;

    fn player() -> State {
        State::new(EntityId::media_player("spotifyplus_john").unwrap(), "playing", HashMap::new())
            .with_attribute(attr::SP_ITEM_TYPE, "track")
            .with_attribute(attr::SP_ARTIST_URI, "spotify:artist:6APm8EjxOHSYM5B4i3vozd")
            .with_attribute(attr::SP_CONTEXT_URI, "spotify:playlist:37i9dQZF1DXcBWIGoYBM5M")
    }

    // ==================== Source Tests ====================

    #[test]
    fn test_eval_basic_sources() {
        let player = player();
        let slots = Slots::new().with(slot::ARTIST_NAME, "Jethro Tull", "");
        let scope = Scope::new(slots, &player);

        assert_eq!(scope.eval(&Source::EntityId), json!("media_player.spotifyplus_john"));
        assert_eq!(scope.eval(&Source::text(slot::ARTIST_NAME)), json!("Jethro Tull"));
        assert_eq!(scope.eval(&Source::text(slot::TRACK_NAME)), Value::Null);
        assert_eq!(scope.eval(&Source::attr(attr::SP_ITEM_TYPE)), json!("track"));
        assert_eq!(
            scope.eval(&Source::Concat(vec![
                Source::Str("Aqualung"),
                Source::prefixed(" artist:", Source::text(slot::ARTIST_NAME)),
            ])),
            json!("Aqualung artist:Jethro Tull")
        );
        assert_eq!(
            scope.eval(&Source::prefixed(" artist:", Source::text(slot::TRACK_NAME))),
            json!("")
        );
    }

    #[test]
    fn test_eval_uri_sources() {
        let player = player();
        let scope = Scope::new(Slots::new(), &player);

        assert_eq!(
            scope.eval(&Source::attr(attr::SP_ARTIST_URI).uri_id()),
            json!("6APm8EjxOHSYM5B4i3vozd")
        );
        assert_eq!(
            scope.eval(&Source::attr(attr::SP_ARTIST_URI).web_url(MediaKind::Artist)),
            json!("https://open.spotify.com/artist/6APm8EjxOHSYM5B4i3vozd")
        );
        assert_eq!(
            scope.eval(&Source::attr(attr::MEDIA_TITLE).web_url(MediaKind::Track)),
            json!(SPOTIFY_WEB_URL_PFX)
        );
    }

    #[test]
    fn test_eval_response_sources() {
        let player = player();
        let mut scope = Scope::new(Slots::new(), &player);
        scope.last_response = Some(json!({"result": {"items": [{"name": "Daily Mix 1"}], "items_count": 1}}));

        assert_eq!(scope.eval(&Source::response("/result/items/0/name")), json!("Daily Mix 1"));
        assert_eq!(scope.eval(&Source::response("/result/items/0/uri").or_str("unknown")), json!("unknown"));
        assert_eq!(
            scope.eval(&Source::response_url("/result/items/0/external_urls/spotify")),
            json!(SPOTIFY_WEB_URL_PFX)
        );
    }

    #[test]
    fn test_eval_transforms() {
        let player = player();
        let slots = Slots::new()
            .with(slot::PLAYER_SHUFFLE_MODE, "on", "on")
            .with(slot::PLAYLIST_TITLE, "Unknown", "");
        let scope = Scope::new(slots, &player);

        assert_eq!(scope.eval(&Source::value(slot::PLAYER_SHUFFLE_MODE).is_on()), json!(true));
        assert_eq!(scope.eval(&Source::value(slot::PLAYER_REPEAT_MODE).is_on()), json!(false));
        assert_eq!(
            scope.eval(&Source::text(slot::PLAYLIST_TITLE).replace("unknown", "Spotify Algorithmic Playlist")),
            json!("Spotify Algorithmic Playlist")
        );
    }

    // ==================== Condition Tests ====================

    #[test]
    fn test_conditions() {
        let player = player();
        let slots = Slots::new()
            .with(slot::PLAYLIST_NAME, "Daily Mix", "spotify:playlist:abc")
            .with(slot::LATEST_EPISODE, "latest", "on");
        let scope = Scope::new(slots, &player);

        assert!(scope.holds(&Condition::SlotIsUri(slot::PLAYLIST_NAME, MediaKind::Playlist)));
        assert!(!scope.holds(&Condition::SlotIsUri(slot::PLAYLIST_NAME, MediaKind::Album)));
        assert!(!scope.holds(&Condition::SlotIsUri(slot::TRACK_NAME, MediaKind::Track)));
        assert!(scope.holds(&Condition::SlotHasText(slot::PLAYLIST_NAME)));
        assert!(scope.holds(&Condition::SlotValueIs(slot::LATEST_EPISODE, "on")));
        assert!(scope.holds(&Condition::AttributeIs(attr::SP_ITEM_TYPE, "track")));
        assert!(scope.holds(&Condition::AttributeContains(attr::SP_CONTEXT_URI, "playlist")));
        assert!(scope.holds(&Condition::not(Condition::AttributeIs(attr::SP_ITEM_TYPE, "podcast"))));
    }

    #[test]
    fn test_response_selector() {
        let player = player();
        let scope = Scope::new(Slots::new().with(slot::ARTIST_NAME, "Jethro Tull", ""), &player);

        let selector = ResponseSelector::if_slot_text(slot::ARTIST_NAME, "with_artist", "plain");
        assert_eq!(selector.key(&scope), Some("with_artist"));
        assert_eq!(ResponseSelector::Silent.key(&scope), None);

        let scope = Scope::new(Slots::new(), &player);
        assert_eq!(selector.key(&scope), Some("plain"));
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&Value::Null));
        assert!(is_empty(&json!(0)));
        assert!(is_empty(&json!("")));
        assert!(is_empty(&json!([])));
        assert!(!is_empty(&json!(1)));
        assert!(!is_empty(&json!("bio")));
        assert!(!is_empty(&json!(false)));
    }
}
