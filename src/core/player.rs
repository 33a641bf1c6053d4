//! Per-player mutable state.
//!
//! Multiple worker threads may carry requests for the same player, so
//! every read-then-write collection lives behind its own mutex: one
//! exclusive section per player-owned subsystem, never a global lock.
//! Cross-player requests share nothing mutable and run fully in parallel.
//!
//! ## Lock discipline
//!
//! Locks are leaf-level and short. When two subsystem locks must be held
//! in one operation, the order is subsystem state first, then the item
//! ledger; the outbound and event queues are only ever pushed to after
//! other locks are released (or from unlocked code).

use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::{Mutex, MutexGuard};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::avatar::AvatarStorage;
use crate::production::ProductionState;
use crate::progress::{MapUnlocks, ProgressCounters};
use crate::quest::QuestLog;

use super::event::QueuedEvent;
use super::id::PlayerId;
use super::ledger::ItemLedger;
use super::packet::Packet;

/// A connected player's runtime state.
pub struct Player {
    id: PlayerId,
    level: AtomicU32,

    pub(crate) open_states: Mutex<FxHashMap<u32, i32>>,
    pub(crate) map_unlocks: Mutex<MapUnlocks>,
    pub(crate) ledger: Mutex<ItemLedger>,
    pub(crate) production: Mutex<ProductionState>,
    pub(crate) avatars: Mutex<AvatarStorage>,
    pub(crate) counters: Mutex<ProgressCounters>,
    pub(crate) activities: Mutex<FxHashSet<u32>>,
    pub(crate) quests: Mutex<QuestLog>,

    outbound: Mutex<Vec<Packet>>,
    events: Mutex<Vec<QueuedEvent>>,
}

impl Player {
    /// Create a fresh player with empty subsystem state.
    #[must_use]
    pub fn new(id: PlayerId, level: u32) -> Self {
        Self {
            id,
            level: AtomicU32::new(level),
            open_states: Mutex::new(FxHashMap::default()),
            map_unlocks: Mutex::new(MapUnlocks::default()),
            ledger: Mutex::new(ItemLedger::new()),
            production: Mutex::new(ProductionState::default()),
            avatars: Mutex::new(AvatarStorage::new()),
            counters: Mutex::new(ProgressCounters::default()),
            activities: Mutex::new(FxHashSet::default()),
            quests: Mutex::new(QuestLog::new()),
            outbound: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
        }
    }

    /// This player's session id.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Current player level.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level.load(Ordering::Relaxed)
    }

    /// Set the player level (driven by the progression collaborator).
    pub fn set_level(&self, level: u32) {
        self.level.store(level, Ordering::Relaxed);
    }

    // === Outbound hand-off ===

    /// Queue a packet for the session layer. Fire-and-forget.
    pub fn send_packet(&self, packet: Packet) {
        self.outbound.lock().push(packet);
    }

    /// Queue an event for the quest manager. Fire-and-forget.
    pub fn queue_event(&self, event: QueuedEvent) {
        self.events.lock().push(event);
    }

    /// Take all pending outbound packets (session layer).
    #[must_use]
    pub fn drain_packets(&self) -> Vec<Packet> {
        std::mem::take(&mut *self.outbound.lock())
    }

    /// Take all pending quest events (quest manager).
    #[must_use]
    pub fn drain_events(&self) -> Vec<QueuedEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    // === Open states ===

    /// Current value of an open state (0 = locked).
    #[must_use]
    pub fn open_state(&self, state: u32) -> i32 {
        self.open_states.lock().get(&state).copied().unwrap_or(0)
    }

    /// Sorted snapshot of all open states with a value.
    #[must_use]
    pub fn open_states_snapshot(&self) -> Vec<(u32, i32)> {
        let mut states: Vec<_> = self
            .open_states
            .lock()
            .iter()
            .map(|(&state, &value)| (state, value))
            .collect();
        states.sort_unstable_by_key(|&(state, _)| state);
        states
    }

    // === Activities ===

    /// Is an activity currently running for this player?
    #[must_use]
    pub fn is_activity_active(&self, activity: u32) -> bool {
        self.activities.lock().contains(&activity)
    }

    /// Mark an activity as running or stopped.
    pub fn set_activity_active(&self, activity: u32, active: bool) {
        let mut activities = self.activities.lock();
        if active {
            activities.insert(activity);
        } else {
            activities.remove(&activity);
        }
    }

    // === Subsystem access ===

    /// Exclusive access to the quest log.
    pub fn quest_log(&self) -> MutexGuard<'_, QuestLog> {
        self.quests.lock()
    }

    /// Exclusive access to the avatar storage.
    pub fn avatar_storage(&self) -> MutexGuard<'_, AvatarStorage> {
        self.avatars.lock()
    }

    /// Exclusive access to the item ledger.
    pub fn item_ledger(&self) -> MutexGuard<'_, ItemLedger> {
        self.ledger.lock()
    }

    // === Progress reads ===

    /// Whether a map point is unlocked.
    #[must_use]
    pub fn has_scene_point(&self, scene: u32, point: u32) -> bool {
        self.map_unlocks.lock().has_point(scene, point)
    }

    /// Whether a map area is unlocked.
    #[must_use]
    pub fn has_scene_area(&self, scene: u32, area: u32) -> bool {
        self.map_unlocks.lock().has_area(scene, area)
    }

    /// Current value of a quest progress counter.
    #[must_use]
    pub fn quest_progress(&self, id: u32) -> i64 {
        self.counters.lock().progress(id)
    }

    /// Total of an item's obtained history.
    #[must_use]
    pub fn item_history(&self, id: u32) -> i64 {
        self.counters.lock().item_history(id)
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}
