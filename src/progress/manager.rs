//! The per-request progress manager.
//!
//! A cheap view tying the shared runtime to one player and one scene for
//! the duration of a request. Construct it through
//! [`RulesRuntime::progress`](crate::runtime::RulesRuntime::progress).

use crate::core::{Packet, Player, Retcode, SceneFacade, SceneId};
use crate::runtime::RulesRuntime;

use super::{counters, map_unlocks, open_states};

/// Open-state, map-unlock and counter operations for one player.
pub struct ProgressManager<'a> {
    runtime: &'a RulesRuntime,
    player: &'a Player,
    scene: &'a dyn SceneFacade,
}

impl<'a> ProgressManager<'a> {
    pub(crate) fn new(
        runtime: &'a RulesRuntime,
        player: &'a Player,
        scene: &'a dyn SceneFacade,
    ) -> Self {
        Self {
            runtime,
            player,
            scene,
        }
    }

    /// Login hook: seed the default-unlocked set, sweep conditions for
    /// states whose unlocks were met while the feature was still
    /// unimplemented, then send the full open-state map.
    pub fn on_login(&self) {
        {
            let mut states = self.player.open_states.lock();
            for &id in self.runtime.default_open_states() {
                states.entry(id).or_insert(1);
            }
        }

        self.try_unlock_open_states(false);

        self.player.send_packet(Packet::OpenStateUpdate {
            states: self.player.open_states_snapshot(),
        });
    }

    /// Force-unlock every state whose conditions now hold.
    ///
    /// A state unlocks when it is not client-settable, all its
    /// conditions are met, and it is not blacklisted. Idempotent:
    /// already-unlocked states are skipped, so a second call emits
    /// nothing new.
    pub fn try_unlock_open_states(&self, send_notify: bool) {
        let config = self.runtime.config();
        for state in self.runtime.content().open_states() {
            if self.player.open_state(state.id) != 0 {
                continue;
            }
            if state.allow_client_open {
                continue;
            }
            if config.open_state_blacklist.contains(&state.id) {
                continue;
            }
            if !open_states::conditions_met(self.player, state) {
                continue;
            }
            open_states::set_open_state(self.player, state.id, 1, send_notify);
        }
    }

    /// Handle a client request to set an open state.
    ///
    /// Only client-settable states with their conditions met may be
    /// written; everything else gets a failure response.
    pub fn set_open_state_from_client(&self, state: u32, value: i32) -> bool {
        let Some(data) = self.runtime.content().open_state(state) else {
            self.player.send_packet(Packet::SetOpenStateRsp {
                retcode: Retcode::Fail,
                state,
                value,
            });
            return false;
        };

        if !data.allow_client_open || !open_states::conditions_met(self.player, data) {
            self.player.send_packet(Packet::SetOpenStateRsp {
                retcode: Retcode::Fail,
                state,
                value,
            });
            return false;
        }

        open_states::set_open_state(self.player, state, value, true);
        self.player.send_packet(Packet::SetOpenStateRsp {
            retcode: Retcode::Success,
            state,
            value,
        });
        true
    }

    /// Administrative set, ignoring conditions and permissions.
    ///
    /// This is the only sanctioned way an unlocked state goes back down.
    pub fn force_set_open_state(&self, state: u32, value: i32) {
        open_states::set_open_state(self.player, state, value, true);
    }

    /// Unlock a map transport point. See
    /// [`map_unlocks::unlock_trans_point`].
    pub fn unlock_trans_point(&self, scene_id: SceneId, point: u32, is_statue: bool) -> bool {
        map_unlocks::unlock_trans_point(
            self.player,
            self.runtime.content(),
            self.runtime.config(),
            self.scene,
            scene_id,
            point,
            is_statue,
        )
    }

    /// Re-lock a map transport point.
    pub fn lock_trans_point(&self, scene_id: SceneId, point: u32) -> bool {
        map_unlocks::lock_trans_point(self.player, self.runtime.content(), scene_id, point)
    }

    /// Unlock a map area.
    pub fn unlock_scene_area(&self, scene_id: SceneId, area: u32) {
        map_unlocks::unlock_scene_area(self.player, scene_id, area);
    }

    /// Advance a quest progress counter; returns the new total.
    pub fn add_quest_progress(&self, id: u32, count: i64) -> i64 {
        counters::add_quest_progress(self.player, id, count)
    }

    /// Record obtained items; returns the new history total.
    pub fn add_item_history(&self, id: u32, count: i64) -> i64 {
        counters::add_item_history(self.player, id, count)
    }
}
