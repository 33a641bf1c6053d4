//! Active production entries.
//!
//! The production queue is a time-accrual model: inputs queued together
//! form a batch that finishes `cost_time` seconds after enqueue, and a
//! finished batch converts to `floor(count × rate)` outputs when
//! collected. Batches queued at different times complete independently.
//!
//! All time arrives as an explicit `now` parameter; the entry never
//! reads a clock, which keeps collection idempotent and testable.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::QueueEntrySnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Batch {
    count: u32,
    ready_at: u64,
}

/// Per-recipe accumulation of queued inputs.
#[derive(Clone, Debug)]
pub struct ActiveProductionEntry {
    recipe_id: u32,
    cost_time: u32,
    rate: f32,
    batches: Vec<Batch>,
}

impl ActiveProductionEntry {
    /// Create an empty entry for a recipe.
    #[must_use]
    pub fn new(recipe_id: u32, cost_time: u32, rate: f32) -> Self {
        Self {
            recipe_id,
            cost_time,
            rate,
            batches: Vec::new(),
        }
    }

    /// The recipe this entry produces.
    #[must_use]
    pub fn recipe_id(&self) -> u32 {
        self.recipe_id
    }

    /// Queue `count` inputs at `now`; they finish together at
    /// `now + cost_time`.
    pub fn enqueue(&mut self, count: u32, now: u64) {
        if count == 0 {
            return;
        }
        self.batches.push(Batch {
            count,
            ready_at: now + u64::from(self.cost_time),
        });
    }

    /// All inputs still held by this entry, due or not.
    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.batches.iter().map(|batch| batch.count).sum()
    }

    /// Inputs whose batch has not finished yet.
    #[must_use]
    pub fn wait_count(&self, now: u64) -> u32 {
        self.batches
            .iter()
            .filter(|batch| batch.ready_at > now)
            .map(|batch| batch.count)
            .sum()
    }

    /// Outputs that would be collected right now.
    #[must_use]
    pub fn ready_count(&self, now: u64) -> u32 {
        self.batches
            .iter()
            .filter(|batch| batch.ready_at <= now)
            .map(|batch| self.outputs_of(batch.count))
            .sum()
    }

    /// Seconds until the next pending batch finishes.
    #[must_use]
    pub fn next_ready_in(&self, now: u64) -> Option<u64> {
        self.batches
            .iter()
            .filter(|batch| batch.ready_at > now)
            .map(|batch| batch.ready_at - now)
            .min()
    }

    /// Collect every finished batch, returning the output count.
    ///
    /// Idempotent with respect to time: a second collect without new
    /// elapsed time finds no due batches and yields zero.
    pub fn collect(&mut self, now: u64) -> u32 {
        let rate = self.rate;
        let mut collected = 0;
        self.batches.retain(|batch| {
            if batch.ready_at <= now {
                collected += (batch.count as f32 * rate).floor() as u32;
                false
            } else {
                true
            }
        });
        collected
    }

    /// No batches left, due or pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Client-facing snapshot of this entry.
    #[must_use]
    pub fn snapshot(&self, now: u64) -> QueueEntrySnapshot {
        QueueEntrySnapshot {
            recipe: self.recipe_id,
            ready_count: self.ready_count(now),
            wait_count: self.wait_count(now),
            next_ready_in: self.next_ready_in(now),
        }
    }

    fn outputs_of(&self, count: u32) -> u32 {
        (count as f32 * self.rate).floor() as u32
    }
}

/// Per-player production state: unlocked recipes plus active entries.
#[derive(Clone, Debug, Default)]
pub struct ProductionState {
    pub(crate) unlocked: FxHashSet<u32>,
    pub(crate) active: FxHashMap<u32, ActiveProductionEntry>,
}

impl ProductionState {
    /// Is a recipe unlocked for this player?
    #[must_use]
    pub fn is_unlocked(&self, recipe: u32) -> bool {
        self.unlocked.contains(&recipe)
    }

    /// Sorted list of unlocked recipe ids.
    #[must_use]
    pub fn unlocked_sorted(&self) -> Vec<u32> {
        let mut ids: Vec<_> = self.unlocked.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}
