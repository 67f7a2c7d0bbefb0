//! Resolving the SpotifyPlus player an intent targets

use crate::error::{IntentError, IntentResult};
use crate::host::{Host, MatchConstraints, MatchFailedReason, MatchPreferences, RegistryEntry};
use crate::intent::Intent;
use spotifyplus_core::names::{slot, states, DOMAIN_MEDIA_PLAYER};
use spotifyplus_core::{SlotValue, Slots, State};
use tracing::debug;

/// A player chosen for an intent
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlayer {
    pub state: State,
    pub entry: RegistryEntry,
    /// How the player was found, for logging
    pub resolved_by: &'static str,
}

fn slot_value(slots: &Slots, name: &str) -> String {
    slots
        .value_str(name)
        .or_else(|| slots.text(name))
        .unwrap_or_default()
        .to_string()
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Find the player an intent targets
///
/// Sets the `target_player` slot: its text is whatever name, area or floor
/// the user said, its value the resolved entity id (`unknown` until then).
///
/// Returns `Ok(None)` when no SpotifyPlus player can take the request.
/// Area and assistant mismatches are the host's to report and come back as
/// [`IntentError::MatchFailed`].
pub fn resolve_player(
    host: &Host,
    intent: &Intent,
    slots: &mut Slots,
    platform: &str,
) -> IntentResult<Option<ResolvedPlayer>> {
    let name = slot_value(slots, slot::NAME);
    let area = slot_value(slots, slot::AREA);
    let floor = slot_value(slots, slot::FLOOR);
    let target_text = format!("{}{}{}", name, area, floor);

    slots.insert(slot::TARGET_PLAYER, SlotValue::new(target_text.clone(), states::UNKNOWN));

    let constraints = MatchConstraints {
        name: non_empty(&name),
        area_name: non_empty(&area),
        floor_name: non_empty(&floor),
        domains: [DOMAIN_MEDIA_PLAYER.to_string()].into_iter().collect(),
        assistant: intent.assistant.clone(),
        single_target: true,
    };
    let preferences = MatchPreferences {
        area_id: slots.value_str(slot::PREFERRED_AREA_ID).map(str::to_string),
        floor_id: slots.value_str(slot::PREFERRED_FLOOR_ID).map(str::to_string),
    };

    let result = host.matcher.match_targets(&constraints, &preferences);
    debug!(
        intent_type = %intent.intent_type,
        is_match = result.is_match,
        reason = ?result.no_match_reason,
        "target match result"
    );

    let resolved = if result.is_match {
        result.states.into_iter().next().and_then(|state| {
            host.active_player(&state.entity_id, platform).map(|entry| ResolvedPlayer {
                state,
                entry,
                resolved_by: "match",
            })
        })
    } else {
        match result.no_match_reason {
            Some(reason @ (MatchFailedReason::Area | MatchFailedReason::Assistant)) => {
                return Err(IntentError::MatchFailed { reason });
            }
            Some(MatchFailedReason::MultipleTargets) => result.states.into_iter().find_map(|state| {
                host.active_player(&state.entity_id, platform).map(|entry| ResolvedPlayer {
                    state,
                    entry,
                    resolved_by: "first of multiple matches",
                })
            }),
            _ => host.first_active_player(platform).and_then(|entry| {
                host.states.state(&entry.entity_id).map(|state| ResolvedPlayer {
                    state,
                    entry,
                    resolved_by: "registry",
                })
            }),
        }
    };

    if let Some(player) = &resolved {
        debug!(
            entity_id = %player.state.entity_id,
            friendly_name = player.state.friendly_name().unwrap_or_default(),
            resolved_by = player.resolved_by,
            "resolved player"
        );
        slots.insert(
            slot::TARGET_PLAYER,
            SlotValue::new(target_text, player.state.entity_id.to_string()),
        );
    }

    Ok(resolved)
}
