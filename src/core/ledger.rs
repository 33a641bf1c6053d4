//! Minimal item ledger.
//!
//! Full inventory management is an external collaborator; the production
//! queue and map-unlock rewards only need "can the player pay these
//! stacks" and "credit these stacks". Payment is check-then-deduct inside
//! one call, so it is atomic under the ledger's lock.

use rustc_hash::FxHashMap;

use crate::content::ItemStack;

/// Per-player item counts.
#[derive(Clone, Debug, Default)]
pub struct ItemLedger {
    counts: FxHashMap<u32, u64>,
}

impl ItemLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the count held for an item.
    #[must_use]
    pub fn count(&self, item: u32) -> u64 {
        self.counts.get(&item).copied().unwrap_or(0)
    }

    /// Credit a single item.
    pub fn add(&mut self, item: u32, count: u64) {
        if count == 0 {
            return;
        }
        *self.counts.entry(item).or_insert(0) += count;
    }

    /// Credit a list of stacks, each multiplied by `multiplier`.
    pub fn add_stacks(&mut self, stacks: &[ItemStack], multiplier: u32) {
        for stack in stacks {
            self.add(stack.item, u64::from(stack.count) * u64::from(multiplier));
        }
    }

    /// Pay a list of stacks, each multiplied by `multiplier`.
    ///
    /// Either every stack is deducted or nothing is: the whole cost is
    /// checked before the first deduction.
    pub fn pay_stacks(&mut self, stacks: &[ItemStack], multiplier: u32) -> bool {
        let affordable = stacks.iter().all(|stack| {
            self.count(stack.item) >= u64::from(stack.count) * u64::from(multiplier)
        });
        if !affordable {
            return false;
        }
        for stack in stacks {
            let cost = u64::from(stack.count) * u64::from(multiplier);
            if let Some(held) = self.counts.get_mut(&stack.item) {
                *held -= cost;
            }
        }
        true
    }
}
