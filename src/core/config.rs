//! Runtime configuration.
//!
//! Everything here used to be a scattering of hardcoded constants in the
//! call sites; it is collected into one value that the host constructs
//! and hands to [`RulesRuntime::new`](crate::runtime::RulesRuntime::new).
//! The library never reads configuration from the environment.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Open state id reserved for the mandatory communication channel.
///
/// This state must always be unlocked or the player has no working chat.
pub const CHAT_OPEN_STATE: u32 = 1;

/// Configuration for the rules runtime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Open states that are never auto-unlocked, whether or not their
    /// conditions hold. Hard veto, checked after conditions.
    pub open_state_blacklist: FxHashSet<u32>,

    /// Open state that is always unlocked by default (the chat channel).
    pub mandatory_open_state: u32,

    /// Item granted when a map point is unlocked.
    pub point_reward_item: u32,
    /// How many of `point_reward_item` a point unlock grants.
    pub point_reward_count: u32,

    /// Experience item granted when a map point is unlocked.
    pub point_exp_item: u32,
    /// Experience granted for a regular point.
    pub point_exp_count: u32,
    /// Experience granted for a statue point.
    pub statue_exp_count: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            open_state_blacklist: FxHashSet::default(),
            mandatory_open_state: CHAT_OPEN_STATE,
            point_reward_item: 201,
            point_reward_count: 5,
            point_exp_item: 102,
            point_exp_count: 10,
            statue_exp_count: 50,
        }
    }
}

impl RulesConfig {
    /// Add an open state to the blacklist (builder pattern).
    #[must_use]
    pub fn with_blacklisted_state(mut self, state: u32) -> Self {
        self.open_state_blacklist.insert(state);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RulesConfig::default();
        assert_eq!(config.mandatory_open_state, CHAT_OPEN_STATE);
        assert!(config.open_state_blacklist.is_empty());
    }

    #[test]
    fn test_blacklist_builder() {
        let config = RulesConfig::default().with_blacklisted_state(48);
        assert!(config.open_state_blacklist.contains(&48));
    }
}
