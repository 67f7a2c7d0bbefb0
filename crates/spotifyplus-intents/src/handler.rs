//! The generic intent handler
//!
//! Runs an [`IntentDescriptor`] for an [`Intent`]: validate slots, resolve
//! the player, check the player's requirements, run the steps and pick the
//! response text. Service failures do not escape; they become an error
//! response carrying the failure text in the `error_info` slot.

use crate::descriptor::{is_empty, CallStep, IntentDescriptor, Scope, Step};
use crate::error::IntentResult;
use crate::host::Host;
use crate::intent::{ErrorCode, Intent, IntentResponse};
use crate::player::resolve_player;
use crate::schema::validate_slots;
use serde_json::Map;
use spotifyplus_core::names::{response, slot, PLATFORM_SPOTIFYPLUS};
use spotifyplus_core::{ServiceCall, SlotValue, Slots};
use spotifyplus_resources::{ResponseRequest, ResponseSource};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Where response text comes from and how documents are filtered
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSettings {
    pub platform: String,
    pub platform_files_only: bool,
}

impl Default for ResponseSettings {
    fn default() -> Self {
        Self {
            platform: PLATFORM_SPOTIFYPLUS.to_string(),
            platform_files_only: true,
        }
    }
}

/// Why a run stopped before its success response
enum Halt {
    Respond {
        key: &'static str,
        code: Option<ErrorCode>,
    },
    Failed(String),
}

/// Dispatches intents described by [`IntentDescriptor`]s
#[derive(Clone)]
pub struct IntentHandler {
    host: Host,
    responses: Arc<dyn ResponseSource>,
    settings: ResponseSettings,
}

impl IntentHandler {
    /// Handler over the host seams and a response text source
    pub fn new(host: Host, responses: Arc<dyn ResponseSource>) -> Self {
        Self {
            host,
            responses,
            settings: ResponseSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ResponseSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ResponseSettings {
        &self.settings
    }

    /// Handle one intent
    #[instrument(skip(self, descriptor, intent), fields(intent_type = %intent.intent_type))]
    pub async fn handle(&self, descriptor: &IntentDescriptor, intent: &Intent) -> IntentResult<IntentResponse> {
        let mut slots = validate_slots(&descriptor.schema(), &intent.slots)?;
        let mut response = intent.create_response();

        let Some(player) = resolve_player(&self.host, intent, &mut slots, &self.settings.platform)? else {
            return Ok(self
                .reply(intent, response, slots, response::PLAYER_NOT_MATCHED, Some(ErrorCode::NoValidTargets))
                .await);
        };

        let target = &descriptor.target;
        if target.premium && !player.state.is_premium() {
            return Ok(self
                .reply(intent, response, slots, response::SPOTIFY_PREMIUM_REQUIRED, Some(ErrorCode::NoValidTargets))
                .await);
        }

        if let Some(features) = target.features {
            if !player.entry.supported_features.contains(features) {
                slots.insert(
                    slot::ERROR_FEATURES,
                    SlotValue::new(features.to_string(), response::PLAYER_FEATURES_NOT_SUPPORTED),
                );
                return Ok(self
                    .reply(
                        intent,
                        response,
                        slots,
                        response::PLAYER_FEATURES_NOT_SUPPORTED,
                        Some(ErrorCode::NoValidTargets),
                    )
                    .await);
            }
        }

        if let Some((accepted, otherwise)) = &target.states {
            if !player.state.is_in(accepted.as_slice()) {
                slots.insert(
                    slot::ERROR_STATES,
                    SlotValue::new(accepted.join(", ").to_lowercase(), *otherwise),
                );
                return Ok(self
                    .reply(intent, response, slots, otherwise, Some(ErrorCode::FailedToHandle))
                    .await);
            }
        }

        let mut scope = Scope::new(slots, &player.state);
        let halt = self.run_steps(descriptor, intent, &mut scope).await;
        let success_key = descriptor.response.key(&scope);
        let slots = scope.slots;

        match halt {
            None => match success_key {
                Some(key) => Ok(self.reply(intent, response, slots, key, None).await),
                None => {
                    debug!("intent handled without speech");
                    response.speech_slots = slots;
                    Ok(response)
                }
            },
            Some(Halt::Respond { key, code }) => Ok(self.reply(intent, response, slots, key, code).await),
            Some(Halt::Failed(message)) => {
                let mut slots = slots;
                slots.insert(
                    slot::ERROR_INFO,
                    SlotValue::new(message, response::ERROR_FAILED_TO_HANDLE),
                );
                Ok(self
                    .reply(
                        intent,
                        response,
                        slots,
                        response::ERROR_FAILED_TO_HANDLE,
                        Some(ErrorCode::FailedToHandle),
                    )
                    .await)
            }
        }
    }

    async fn run_steps(&self, descriptor: &IntentDescriptor, intent: &Intent, scope: &mut Scope<'_>) -> Option<Halt> {
        for step in &descriptor.steps {
            match step {
                Step::Assign { slot, text, value, when } => {
                    if scope.holds(when) {
                        scope.assign(slot, text, value);
                    }
                }
                Step::Require { condition, otherwise } => {
                    if !scope.holds(condition) {
                        return Some(Halt::Respond {
                            key: *otherwise,
                            code: None,
                        });
                    }
                }
                Step::Call { call, when } => {
                    if !scope.holds(when) {
                        continue;
                    }
                    if let Some(halt) = self.run_call(call, intent, scope).await {
                        return Some(halt);
                    }
                }
            }
        }
        None
    }

    async fn run_call(&self, step: &CallStep, intent: &Intent, scope: &mut Scope<'_>) -> Option<Halt> {
        let mut data = Map::new();
        for (name, source) in &step.args {
            data.insert(name.to_string(), scope.eval(source));
        }
        for (name, source) in &step.optional_args {
            let value = scope.eval(source);
            if !is_empty(&value) {
                data.insert(name.to_string(), value);
            }
        }

        let mut call = ServiceCall::new(step.domain, step.service, intent.context.child());
        call.service_data = data;
        debug!(service = %call.service_id(), "calling service");

        match self.host.services.call(call, step.return_response).await {
            Ok(result) => {
                scope.last_response = result;
                if let Some((pointer, key)) = step.empty {
                    let found = scope
                        .last_response
                        .as_ref()
                        .and_then(|r| r.pointer(pointer))
                        .cloned()
                        .unwrap_or_default();
                    if is_empty(&found) {
                        debug!(service = step.service, pointer, "service returned no items");
                        return Some(Halt::Respond { key, code: None });
                    }
                }
                None
            }
            Err(e) => {
                warn!(service = step.service, error = %e, "service call failed");
                Some(Halt::Failed(e.to_string()))
            }
        }
    }

    /// Finish a response with the text of `key`
    async fn reply(
        &self,
        intent: &Intent,
        mut response: IntentResponse,
        slots: Slots,
        key: &str,
        code: Option<ErrorCode>,
    ) -> IntentResponse {
        if let Some(code) = code {
            response.set_error(code);
        }

        let request = ResponseRequest::new(key)
            .intent(intent.intent_type.clone())
            .platform(self.settings.platform.clone())
            .language(intent.language.clone())
            .platform_files_only(self.settings.platform_files_only)
            .slots(slots.clone());

        let text = self.responses.response_text(request).await;
        debug!(key, "response text resolved");
        response.set_speech(text);
        response.speech_slots = slots;
        response
    }
}
