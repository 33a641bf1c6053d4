//! The per-request production manager.
//!
//! Queueing and collection are read-then-write on player-owned state, so
//! each operation runs inside the player's production lock; two racing
//! packets for the same player serialize here, different players never
//! contend. Lock order where both are needed: production state first,
//! then the item ledger. Packets are queued after locks are released.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::content::ItemStack;
use crate::core::{Packet, Player, QueueEntrySnapshot, Retcode};
use crate::runtime::RulesRuntime;

use super::entry::ActiveProductionEntry;

/// Production queue operations for one player.
pub struct ProductionManager<'a> {
    runtime: &'a RulesRuntime,
    player: &'a Player,
}

impl<'a> ProductionManager<'a> {
    pub(crate) fn new(runtime: &'a RulesRuntime, player: &'a Player) -> Self {
        Self { runtime, player }
    }

    /// Login hook: seed the default recipe unlocks and send the full
    /// production picture.
    pub fn on_login(&self, now: u64) {
        {
            let mut state = self.player.production.lock();
            state
                .unlocked
                .extend(self.runtime.catalog().default_unlocked().iter().copied());
        }
        self.send_data_notify(now);
    }

    /// Send unlocks plus queue contents (also answers data requests).
    pub fn send_data_notify(&self, now: u64) {
        let (unlocked, queue) = {
            let state = self.player.production.lock();
            (state.unlocked_sorted(), Self::snapshot_locked(&state.active, now))
        };
        self.player.send_packet(Packet::ProductionData { unlocked, queue });
    }

    /// Unlock a recipe for this player. False for unknown recipes.
    pub fn unlock_recipe(&self, recipe: u32) -> bool {
        if self.runtime.content().recipe(recipe).is_none() {
            debug!(recipe, "cannot unlock unknown recipe");
            return false;
        }
        self.player.production.lock().unlocked.insert(recipe)
    }

    /// Queue `count` inputs into a recipe's production entry.
    ///
    /// Fails (with a typed response packet, no state change) when the
    /// recipe is unknown or locked, the queue is at capacity, or the
    /// inputs cannot be paid.
    pub fn queue_input(&self, recipe_id: u32, count: u32, now: u64) -> bool {
        let Some(recipe) = self.runtime.content().recipe(recipe_id).cloned() else {
            self.respond_queue(Retcode::Fail, None);
            return false;
        };

        let snapshot = {
            let mut state = self.player.production.lock();

            if !state.unlocked.contains(&recipe_id) {
                drop(state);
                self.respond_queue(Retcode::Fail, None);
                return false;
            }

            let queued = state
                .active
                .get(&recipe_id)
                .map_or(0, ActiveProductionEntry::total_count);
            if queued + count > recipe.queue_size {
                drop(state);
                self.respond_queue(Retcode::ProductionQueueFull, None);
                return false;
            }

            if !self.player.ledger.lock().pay_stacks(&recipe.inputs, count) {
                drop(state);
                self.respond_queue(Retcode::ItemCountNotEnough, None);
                return false;
            }

            let entry = state.active.entry(recipe_id).or_insert_with(|| {
                ActiveProductionEntry::new(recipe_id, recipe.cost_time, recipe.rate)
            });
            entry.enqueue(count, now);
            entry.snapshot(now)
        };

        self.respond_queue(Retcode::Success, Some(snapshot));
        true
    }

    /// Collect finished output across every recipe in a group.
    ///
    /// Exhausted entries are removed; rewards aggregate across recipes.
    /// Collection is idempotent: with no new elapsed time a second call
    /// finds nothing and answers "not finished".
    pub fn collect_group(&self, group: u32, now: u64) -> bool {
        let Some(recipes) = self.runtime.catalog().group(group) else {
            self.player.send_packet(Packet::CollectOutputRsp {
                retcode: Retcode::Fail,
                items: Vec::new(),
            });
            return false;
        };

        let mut rewards: FxHashMap<u32, u64> = FxHashMap::default();
        let mut collected_any = false;

        {
            let mut state = self.player.production.lock();
            for &recipe_id in recipes {
                let Some(entry) = state.active.get_mut(&recipe_id) else {
                    continue;
                };
                let quantity = entry.collect(now);
                if entry.is_empty() {
                    state.active.remove(&recipe_id);
                }
                if quantity == 0 {
                    continue;
                }
                let Some(recipe) = self.runtime.content().recipe(recipe_id) else {
                    debug!(recipe_id, "collected outputs for a recipe no longer in content");
                    continue;
                };
                for stack in &recipe.outputs {
                    if stack.item == 0 {
                        continue;
                    }
                    *rewards.entry(stack.item).or_insert(0) +=
                        u64::from(stack.count) * u64::from(quantity);
                }
                collected_any = true;
            }
        }

        if !collected_any {
            self.player.send_packet(Packet::CollectOutputRsp {
                retcode: Retcode::ProductionNotFinished,
                items: Vec::new(),
            });
            return false;
        }

        let mut items: Vec<ItemStack> = rewards
            .into_iter()
            .map(|(item, count)| ItemStack::new(item, count.min(u64::from(u32::MAX)) as u32))
            .collect();
        items.sort_unstable_by_key(|stack| stack.item);

        {
            let mut ledger = self.player.ledger.lock();
            for stack in &items {
                ledger.add(stack.item, u64::from(stack.count));
            }
        }

        self.player.send_packet(Packet::CollectOutputRsp {
            retcode: Retcode::Success,
            items,
        });
        true
    }

    /// Snapshot of every active entry, sorted by recipe id.
    #[must_use]
    pub fn queue_snapshot(&self, now: u64) -> Vec<QueueEntrySnapshot> {
        let state = self.player.production.lock();
        Self::snapshot_locked(&state.active, now)
    }

    fn snapshot_locked(
        active: &FxHashMap<u32, ActiveProductionEntry>,
        now: u64,
    ) -> Vec<QueueEntrySnapshot> {
        let mut queue: Vec<_> = active.values().map(|entry| entry.snapshot(now)).collect();
        queue.sort_unstable_by_key(|entry| entry.recipe);
        queue
    }

    fn respond_queue(&self, retcode: Retcode, entry: Option<QueueEntrySnapshot>) {
        self.player.send_packet(Packet::QueueInputRsp { retcode, entry });
    }
}
