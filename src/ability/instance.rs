//! Runtime ability instances.
//!
//! An `Ability` is owned by exactly one entity (and optionally by the
//! player controlling it). Construction binds the shared content data,
//! copies the declared specials into an instance-local table, computes
//! the wire hash from the name, and runs the data's one-shot init hook.
//! Instance-local writes never touch the shared `AbilityData`.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::content::AbilityData;
use crate::core::{EntityId, PlayerId};
use crate::namehash::name_hash;

use super::modifier::ModifierController;

/// A per-entity ability instance.
#[derive(Debug)]
pub struct Ability {
    data: Arc<AbilityData>,
    owner: EntityId,
    player_owner: Option<PlayerId>,
    specials: FxHashMap<String, f32>,
    modifiers: FxHashMap<String, ModifierController>,
    hash: u32,
}

impl Ability {
    /// Construct an ability bound to its content data and owner.
    #[must_use]
    pub fn new(data: Arc<AbilityData>, owner: EntityId, player_owner: Option<PlayerId>) -> Self {
        let specials = data.specials.clone();
        let hash = name_hash(&data.name);
        data.ensure_initialized();

        Self {
            data,
            owner,
            player_owner,
            specials,
            modifiers: FxHashMap::default(),
            hash,
        }
    }

    /// The shared content data this instance is bound to.
    #[must_use]
    pub fn data(&self) -> &Arc<AbilityData> {
        &self.data
    }

    /// Ability name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Owning entity.
    #[must_use]
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// Player-level owner, if any.
    #[must_use]
    pub fn player_owner(&self) -> Option<PlayerId> {
        self.player_owner
    }

    /// Wire hash of the ability name. Derived at construction, never
    /// set independently.
    #[must_use]
    pub fn hash(&self) -> u32 {
        self.hash
    }

    // === Specials ===

    /// Read a special parameter.
    #[must_use]
    pub fn special(&self, name: &str) -> Option<f32> {
        self.specials.get(name).copied()
    }

    /// Write a special parameter on this instance only.
    pub fn set_special(&mut self, name: impl Into<String>, value: f32) {
        self.specials.insert(name.into(), value);
    }

    /// Number of specials on this instance.
    #[must_use]
    pub fn special_count(&self) -> usize {
        self.specials.len()
    }

    // === Modifiers ===

    /// Apply a modifier, replacing any active instance with the same
    /// name. The local id comes from the declared modifier list.
    pub fn apply_modifier(
        &mut self,
        name: impl Into<String>,
        duration: Option<f32>,
        now: u64,
    ) -> &ModifierController {
        let name = name.into();
        let local_id = self.data.modifier_local_id(&name).unwrap_or(0);
        let controller = ModifierController::new(name.clone(), local_id, now, duration);
        self.modifiers.insert(name.clone(), controller);
        // Entry is present: it was inserted on the line above.
        &self.modifiers[&name]
    }

    /// Remove an active modifier by name.
    pub fn remove_modifier(&mut self, name: &str) -> Option<ModifierController> {
        self.modifiers.remove(name)
    }

    /// Is a modifier currently active?
    #[must_use]
    pub fn has_modifier(&self, name: &str) -> bool {
        self.modifiers.contains_key(name)
    }

    /// Iterate active modifiers.
    pub fn modifiers(&self) -> impl Iterator<Item = &ModifierController> {
        self.modifiers.values()
    }

    /// Drop expired modifiers, returning how many were removed.
    pub fn prune_expired_modifiers(&mut self, now: u64) -> usize {
        let before = self.modifiers.len();
        self.modifiers.retain(|_, modifier| !modifier.is_expired(now));
        before - self.modifiers.len()
    }
}
