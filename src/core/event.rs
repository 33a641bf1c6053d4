//! Quest event hand-off.
//!
//! State changes in the core (an open state flipping, a map point
//! unlocking, a progress counter advancing) are interesting to the quest
//! state machine, which lives outside this crate. Rather than calling
//! into it, the core queues [`QueuedEvent`] values on the player; the
//! quest manager drains the queue at its own transition points.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// What happened, from the quest machinery's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTrigger {
    /// An open state now equals a value. Args: state id, value.
    OpenStateEqual,
    /// A map transport point was unlocked. Args: scene id, point id.
    UnlockTransPoint,
    /// A map area was unlocked. Args: scene id, area id.
    UnlockArea,
    /// A quest progress counter advanced. Args: counter id, new total.
    AddQuestProgress,
    /// The item-obtained history advanced. Args: item id, new total.
    HistoryGotAnyItem,
}

/// An event queued for the quest manager.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueuedEvent {
    /// What kind of event this is.
    pub trigger: EventTrigger,
    /// Trigger-specific arguments, in declared order.
    pub args: SmallVec<[i64; 4]>,
}

impl QueuedEvent {
    /// Create a new event.
    pub fn new(trigger: EventTrigger, args: impl IntoIterator<Item = i64>) -> Self {
        Self {
            trigger,
            args: args.into_iter().collect(),
        }
    }

    /// Get an argument by index, with a default for missing slots.
    #[must_use]
    pub fn arg(&self, index: usize, default: i64) -> i64 {
        self.args.get(index).copied().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_args() {
        let event = QueuedEvent::new(EventTrigger::OpenStateEqual, [5, 1]);
        assert_eq!(event.arg(0, 0), 5);
        assert_eq!(event.arg(1, 0), 1);
        assert_eq!(event.arg(2, -1), -1);
    }
}
