//! Intent requests and responses

use serde::{Deserialize, Serialize};
use spotifyplus_core::{Context, Slots, DEFAULT_LANGUAGE};

/// A recognized voice intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Intent type, e.g. `SpotifyPlusPlayPlaylist`
    pub intent_type: String,

    /// Language the sentence was recognized in
    #[serde(default = "default_language")]
    pub language: String,

    /// Slots filled by the sentence, in the order they were matched
    #[serde(default)]
    pub slots: Slots,

    /// Request origin; service calls carry a child of it
    #[serde(default)]
    pub context: Context,

    /// Assistant the request came through (e.g. `conversation`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant: Option<String>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Intent {
    /// Intent of `intent_type` with no slots, in the default language
    pub fn new(intent_type: impl Into<String>) -> Self {
        Self {
            intent_type: intent_type.into(),
            language: default_language(),
            slots: Slots::new(),
            context: Context::new(),
            assistant: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_slots(mut self, slots: Slots) -> Self {
        self.slots = slots;
        self
    }

    /// Assistant used to scope target matching
    pub fn with_assistant(mut self, assistant: impl Into<String>) -> Self {
        self.assistant = Some(assistant.into());
        self
    }

    /// Empty response in this intent's language
    pub fn create_response(&self) -> IntentResponse {
        IntentResponse::new(&self.language)
    }
}

/// Kind of reply the host renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    ActionDone,
    QueryAnswer,
    Error,
}

/// Error category of an error response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No player could take the request (not matched, premium, features)
    NoValidTargets,
    /// The player was found but the request could not be carried out
    FailedToHandle,
    Unknown,
}

/// Reply to an intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResponse {
    /// Language of the speech text
    pub language: String,

    /// `action_done` unless marked as an error
    pub response_type: ResponseType,

    /// Set together with the `error` response type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,

    /// Spoken text; `None` leaves speech to the sentence's own response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech: Option<String>,

    /// Slots available to the sentence response template
    #[serde(default)]
    pub speech_slots: Slots,
}

impl IntentResponse {
    /// Successful response without speech
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            response_type: ResponseType::ActionDone,
            error_code: None,
            speech: None,
            speech_slots: Slots::new(),
        }
    }

    /// Replace the spoken text
    pub fn set_speech(&mut self, speech: impl Into<String>) {
        self.speech = Some(speech.into());
    }

    /// Mark the response as an error
    pub fn set_error(&mut self, code: ErrorCode) {
        self.response_type = ResponseType::Error;
        self.error_code = Some(code);
    }

    /// True once [`IntentResponse::set_error`] was called
    pub fn is_error(&self) -> bool {
        self.response_type == ResponseType::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_response() {
        let intent = Intent::new("SpotifyPlusVolumeUp").with_language("de");
        let response = intent.create_response();
        assert_eq!(response.language, "de");
        assert_eq!(response.response_type, ResponseType::ActionDone);
        assert!(response.speech.is_none());
    }

    #[test]
    fn test_set_error() {
        let mut response = IntentResponse::new("en");
        response.set_error(ErrorCode::NoValidTargets);
        assert!(response.is_error());
        assert_eq!(response.error_code, Some(ErrorCode::NoValidTargets));
    }

    #[test]
    fn test_intent_deserialize_defaults() {
        let intent: Intent = serde_json::from_str(r#"{"intent_type": "SpotifyPlusVolumeUp"}"#).unwrap();
        assert_eq!(intent.language, "en");
        assert!(intent.slots.is_empty());
        assert!(intent.assistant.is_none());
    }
}
