//! Static quest descriptors consumed by the condition framework.
//!
//! Only the slice the rules core evaluates against lives here; the full
//! quest tables belong to the quest manager.

use serde::{Deserialize, Serialize};

use crate::quest::AcceptCondition;

/// Content definition of one sub-quest.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubQuestData {
    /// Sub-quest id.
    pub sub_id: u32,
    /// Owning main quest id.
    pub main_id: u32,
    /// Conditions gating acceptance; all must hold.
    pub accept_conditions: Vec<AcceptCondition>,
}

impl SubQuestData {
    /// Create a sub-quest descriptor with no conditions.
    #[must_use]
    pub fn new(sub_id: u32, main_id: u32) -> Self {
        Self {
            sub_id,
            main_id,
            accept_conditions: Vec::new(),
        }
    }

    /// Add an accept condition (builder pattern).
    #[must_use]
    pub fn with_accept_condition(mut self, condition: AcceptCondition) -> Self {
        self.accept_conditions.push(condition);
        self
    }
}
