//! The loaded content store.
//!
//! Populated by the host's content loader before the runtime is built,
//! then shared read-only via `Arc`. Lookups return `Option`; a missing
//! id is the caller's `ContentMissing` situation, never a panic here.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use super::ability::AbilityData;
use super::avatar::AvatarData;
use super::open_state::OpenStateData;
use super::quest::SubQuestData;
use super::recipe::RecipeData;

/// Immutable game content, keyed by id (abilities by name).
#[derive(Debug, Default)]
pub struct ContentStore {
    abilities: FxHashMap<String, Arc<AbilityData>>,
    open_states: FxHashMap<u32, Arc<OpenStateData>>,
    open_state_ids: Vec<u32>,
    recipes: FxHashMap<u32, Arc<RecipeData>>,
    sub_quests: FxHashMap<u32, Arc<SubQuestData>>,
    scene_points: FxHashSet<(u32, u32)>,
    avatars: FxHashMap<u32, Arc<AvatarData>>,
}

impl ContentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Registration (content load phase) ===

    /// Register an ability descriptor under its name.
    pub fn register_ability(&mut self, data: AbilityData) {
        self.abilities.insert(data.name.clone(), Arc::new(data));
    }

    /// Register an open state descriptor.
    pub fn register_open_state(&mut self, data: OpenStateData) {
        let id = data.id;
        if self.open_states.insert(id, Arc::new(data)).is_none() {
            let position = self.open_state_ids.partition_point(|&existing| existing < id);
            self.open_state_ids.insert(position, id);
        }
    }

    /// Register a production recipe.
    pub fn register_recipe(&mut self, data: RecipeData) {
        self.recipes.insert(data.id, Arc::new(data));
    }

    /// Register a sub-quest descriptor.
    pub fn register_sub_quest(&mut self, data: SubQuestData) {
        self.sub_quests.insert(data.sub_id, Arc::new(data));
    }

    /// Register the existence of a map transport point.
    pub fn register_scene_point(&mut self, scene: u32, point: u32) {
        self.scene_points.insert((scene, point));
    }

    /// Register an avatar descriptor.
    pub fn register_avatar(&mut self, data: AvatarData) {
        self.avatars.insert(data.id, Arc::new(data));
    }

    // === Lookups ===

    /// Ability descriptor by name.
    #[must_use]
    pub fn ability(&self, name: &str) -> Option<&Arc<AbilityData>> {
        self.abilities.get(name)
    }

    /// Iterate all ability names (name table population).
    pub fn ability_names(&self) -> impl Iterator<Item = &str> {
        self.abilities.keys().map(String::as_str)
    }

    /// Open state descriptor by id.
    #[must_use]
    pub fn open_state(&self, id: u32) -> Option<&Arc<OpenStateData>> {
        self.open_states.get(&id)
    }

    /// Iterate all open states, ordered by id.
    pub fn open_states(&self) -> impl Iterator<Item = &Arc<OpenStateData>> {
        self.open_state_ids
            .iter()
            .filter_map(|id| self.open_states.get(id))
    }

    /// Recipe descriptor by id.
    #[must_use]
    pub fn recipe(&self, id: u32) -> Option<&Arc<RecipeData>> {
        self.recipes.get(&id)
    }

    /// Iterate all recipes.
    pub fn recipes(&self) -> impl Iterator<Item = &Arc<RecipeData>> {
        self.recipes.values()
    }

    /// Sub-quest descriptor by id.
    #[must_use]
    pub fn sub_quest(&self, id: u32) -> Option<&Arc<SubQuestData>> {
        self.sub_quests.get(&id)
    }

    /// Does a map transport point exist?
    #[must_use]
    pub fn has_scene_point(&self, scene: u32, point: u32) -> bool {
        self.scene_points.contains(&(scene, point))
    }

    /// Avatar descriptor by id.
    #[must_use]
    pub fn avatar(&self, id: u32) -> Option<&Arc<AvatarData>> {
        self.avatars.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::open_state::OpenStateData;

    #[test]
    fn test_ability_lookup() {
        let mut store = ContentStore::new();
        store.register_ability(AbilityData::new("Skill_A"));

        assert!(store.ability("Skill_A").is_some());
        assert!(store.ability("Skill_B").is_none());
        assert_eq!(store.ability_names().count(), 1);
    }

    #[test]
    fn test_open_states_ordered_by_id() {
        let mut store = ContentStore::new();
        store.register_open_state(OpenStateData::new(30));
        store.register_open_state(OpenStateData::new(1));
        store.register_open_state(OpenStateData::new(14));

        let ids: Vec<_> = store.open_states().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 14, 30]);
    }

    #[test]
    fn test_scene_points() {
        let mut store = ContentStore::new();
        store.register_scene_point(3, 7);

        assert!(store.has_scene_point(3, 7));
        assert!(!store.has_scene_point(3, 8));
    }
}
