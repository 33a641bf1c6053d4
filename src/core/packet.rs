//! Outbound packet values.
//!
//! The core owns no wire format: a [`Packet`] is a plain value pushed to
//! the player's outbound queue, and the session layer serializes it into
//! whatever the protocol needs. Pushing is fire-and-forget, so nothing in
//! a locked section ever waits on the network.

use serde::{Deserialize, Serialize};

use crate::content::ItemStack;

/// Result code attached to request/response style packets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Retcode {
    /// Operation succeeded.
    Success,
    /// Generic failure (unknown id, not permitted).
    Fail,
    /// Production queue for the recipe is at capacity.
    ProductionQueueFull,
    /// The player cannot pay the required input items.
    ItemCountNotEnough,
    /// No finished output is available to collect.
    ProductionNotFinished,
}

/// Snapshot of one active production queue entry, as sent to the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueueEntrySnapshot {
    /// Recipe this entry produces.
    pub recipe: u32,
    /// Outputs finished and waiting to be collected.
    pub ready_count: u32,
    /// Inputs still in the queue.
    pub wait_count: u32,
    /// Seconds until the next batch finishes, if any is pending.
    pub next_ready_in: Option<u64>,
}

/// An outbound message for the owning player's client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Packet {
    /// One open state changed value.
    OpenStateChange { state: u32, value: i32 },

    /// Full open-state map, sent on login.
    OpenStateUpdate { states: Vec<(u32, i32)> },

    /// Response to a client request to set an open state.
    SetOpenStateRsp {
        retcode: Retcode,
        state: u32,
        value: i32,
    },

    /// A map point was unlocked (or re-locked).
    ScenePointUnlock { scene: u32, point: u32, locked: bool },

    /// A map area was unlocked.
    SceneAreaUnlock { scene: u32, area: u32 },

    /// Production unlocks and queue contents (login / data request).
    ProductionData {
        unlocked: Vec<u32>,
        queue: Vec<QueueEntrySnapshot>,
    },

    /// Response to queueing inputs into a production entry.
    QueueInputRsp {
        retcode: Retcode,
        entry: Option<QueueEntrySnapshot>,
    },

    /// Response to collecting finished production output.
    CollectOutputRsp {
        retcode: Retcode,
        items: Vec<ItemStack>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_serialization() {
        let packet = Packet::OpenStateChange { state: 5, value: 1 };
        let json = serde_json::to_string(&packet).unwrap();
        let deserialized: Packet = serde_json::from_str(&json).unwrap();
        assert_eq!(packet, deserialized);
    }
}
