//! Static production recipe descriptors.

use serde::{Deserialize, Serialize};

/// An item id with a count. Used for recipe inputs/outputs and reward
/// payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item id.
    pub item: u32,
    /// How many.
    pub count: u32,
}

impl ItemStack {
    /// Create a stack.
    #[must_use]
    pub const fn new(item: u32, count: u32) -> Self {
        Self { item, count }
    }
}

/// Content definition of one production recipe.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecipeData {
    /// Recipe id.
    pub id: u32,

    /// Collection group: output is collected per group, not per recipe.
    pub group: u32,

    /// Available to every player without an explicit unlock.
    pub default_unlocked: bool,

    /// Seconds from enqueue until a batch of inputs is finished.
    pub cost_time: u32,

    /// Maximum inputs queued across all pending batches.
    pub queue_size: u32,

    /// Outputs produced per input. Fractional rates round down at
    /// collection.
    pub rate: f32,

    /// Items consumed per queued input.
    pub inputs: Vec<ItemStack>,

    /// Items produced per finished output.
    pub outputs: Vec<ItemStack>,
}

impl RecipeData {
    /// Create a recipe with a 1:1 throughput and empty item lists.
    #[must_use]
    pub fn new(id: u32, group: u32, cost_time: u32, queue_size: u32) -> Self {
        Self {
            id,
            group,
            default_unlocked: false,
            cost_time,
            queue_size,
            rate: 1.0,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Mark as unlocked by default (builder pattern).
    #[must_use]
    pub fn default_unlocked(mut self) -> Self {
        self.default_unlocked = true;
        self
    }

    /// Set the throughput rate (builder pattern).
    #[must_use]
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    /// Add an input stack (builder pattern).
    #[must_use]
    pub fn with_input(mut self, item: u32, count: u32) -> Self {
        self.inputs.push(ItemStack::new(item, count));
        self
    }

    /// Add an output stack (builder pattern).
    #[must_use]
    pub fn with_output(mut self, item: u32, count: u32) -> Self {
        self.outputs.push(ItemStack::new(item, count));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let recipe = RecipeData::new(1201, 2, 60, 20)
            .default_unlocked()
            .with_rate(1.0)
            .with_input(101, 2)
            .with_output(201, 1);

        assert_eq!(recipe.id, 1201);
        assert_eq!(recipe.group, 2);
        assert!(recipe.default_unlocked);
        assert_eq!(recipe.inputs, vec![ItemStack::new(101, 2)]);
        assert_eq!(recipe.outputs, vec![ItemStack::new(201, 1)]);
    }
}
