//! Open-state condition evaluation and the default-unlocked set.
//!
//! Open states reuse the quest framework's "conjunction of typed
//! conditions" algorithm over their own closed condition family. Two
//! kinds are deliberate placeholders: city reputation gates (never
//! grant) and offering levels (treated as met, and default-open).

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::content::{ContentStore, OpenStateCondKind, OpenStateData};
use crate::core::{EventTrigger, Packet, Player, QueuedEvent, RulesConfig};
use crate::quest::{ParentQuestState, QuestState};

/// Are all of a state's unlock conditions met for this player?
///
/// Short-circuits on the first violated condition. A referenced quest
/// that does not exist counts as a violation, never an error.
pub(crate) fn conditions_met(player: &Player, data: &OpenStateData) -> bool {
    for condition in &data.conditions {
        match condition.kind {
            OpenStateCondKind::PlayerLevel => {
                if i64::from(player.level()) < i64::from(condition.param) {
                    return false;
                }
            }
            OpenStateCondKind::Quest => {
                let log = player.quest_log();
                match log.quest(condition.param as u32) {
                    Some(quest) if quest.state == QuestState::Finished => {}
                    _ => return false,
                }
            }
            OpenStateCondKind::ParentQuest => {
                let log = player.quest_log();
                match log.main_quest(condition.param as u32) {
                    Some(main) if main.state == ParentQuestState::Finished => {}
                    _ => return false,
                }
            }
            // Not implemented yet; opening these early triggers content
            // that is not ready, so the gate stays shut.
            OpenStateCondKind::CityReputationLevel => return false,
            // Not implemented; treated as met. States carrying this
            // condition are also part of the default-open set.
            OpenStateCondKind::OfferingLevel => {}
        }
    }
    true
}

/// Compute the set of open states every account starts with.
///
/// A state is default-open when any of these hold:
/// - it is flagged default and is not client-settable,
/// - its only condition is "player level >= 1",
/// - any of its conditions is a not-yet-implemented kind
///   (offering level, city reputation),
/// - it is the mandatory communication-channel state.
///
/// The blacklist is subtracted last: a vetoed state is never default.
pub(crate) fn compute_default_open_states(
    content: &ContentStore,
    config: &RulesConfig,
) -> FxHashSet<u32> {
    content
        .open_states()
        .filter(|state| {
            (state.default_state && !state.allow_client_open)
                || (state.conditions.len() == 1
                    && state.conditions[0].kind == OpenStateCondKind::PlayerLevel
                    && state.conditions[0].param == 1)
                || state.conditions.iter().any(|condition| {
                    matches!(
                        condition.kind,
                        OpenStateCondKind::OfferingLevel | OpenStateCondKind::CityReputationLevel
                    )
                })
                || state.id == config.mandatory_open_state
        })
        .filter(|state| !config.open_state_blacklist.contains(&state.id))
        .map(|state| state.id)
        .collect()
}

/// Write an open state value, firing the quest event and (optionally)
/// the client notify only when the value actually changes.
pub(crate) fn set_open_state(player: &Player, state: u32, value: i32, send_notify: bool) {
    let changed = {
        let mut states = player.open_states.lock();
        let previous = states.get(&state).copied().unwrap_or(0);
        if previous == value {
            false
        } else {
            states.insert(state, value);
            true
        }
    };
    if !changed {
        return;
    }

    debug!(state, value, player = %player.id(), "open state changed");
    player.queue_event(QueuedEvent::new(
        EventTrigger::OpenStateEqual,
        [i64::from(state), i64::from(value)],
    ));
    if send_notify {
        player.send_packet(Packet::OpenStateChange { state, value });
    }
}
