//! Quest progress and item-history counters.

use rustc_hash::FxHashMap;

use crate::core::{EventTrigger, Player, QueuedEvent};

/// Per-player accumulating counters the quest framework conditions on.
#[derive(Clone, Debug, Default)]
pub struct ProgressCounters {
    progress: FxHashMap<u32, i64>,
    item_history: FxHashMap<u32, i64>,
}

impl ProgressCounters {
    /// Current value of a quest progress counter.
    #[must_use]
    pub fn progress(&self, id: u32) -> i64 {
        self.progress.get(&id).copied().unwrap_or(0)
    }

    /// Total times an item has been obtained.
    #[must_use]
    pub fn item_history(&self, id: u32) -> i64 {
        self.item_history.get(&id).copied().unwrap_or(0)
    }

    pub(crate) fn add_progress(&mut self, id: u32, count: i64) -> i64 {
        let total = self.progress.entry(id).or_insert(0);
        *total += count;
        *total
    }

    pub(crate) fn add_item_history(&mut self, id: u32, count: i64) -> i64 {
        let total = self.item_history.entry(id).or_insert(0);
        *total += count;
        *total
    }
}

/// Advance a quest progress counter and queue the quest event carrying
/// the new total.
pub(crate) fn add_quest_progress(player: &Player, id: u32, count: i64) -> i64 {
    let total = player.counters.lock().add_progress(id, count);
    player.queue_event(QueuedEvent::new(
        EventTrigger::AddQuestProgress,
        [i64::from(id), total],
    ));
    total
}

/// Record obtained items and queue the history quest event.
pub(crate) fn add_item_history(player: &Player, id: u32, count: i64) -> i64 {
    let total = player.counters.lock().add_item_history(id, count);
    player.queue_event(QueuedEvent::new(
        EventTrigger::HistoryGotAnyItem,
        [i64::from(id), total],
    ));
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_counters_accumulate() {
        let player = Player::new(PlayerId::new(1), 1);

        assert_eq!(add_quest_progress(&player, 5, 2), 2);
        assert_eq!(add_quest_progress(&player, 5, 3), 5);
        assert_eq!(player.quest_progress(5), 5);

        assert_eq!(add_item_history(&player, 101, 1), 1);
        assert_eq!(player.item_history(101), 1);

        let events = player.drain_events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2].trigger, EventTrigger::HistoryGotAnyItem);
        assert_eq!(events[2].args.as_slice(), &[101, 1]);
    }
}
