//! Runtime assembly.
//!
//! `RulesRuntime` is built exactly once at process start, after content
//! is fully loaded: every handler family registers into its registry
//! (fail-fast — a duplicate key aborts the build and no partial registry
//! ever serves a request), the name table fills from known content
//! names, and the derived startup sets are computed. From then on the
//! runtime is immutable and shared across worker threads in an `Arc`.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::ability::{
    standard_action_registry, AbilityActionRegistry, AbilityDispatcher,
};
use crate::content::ContentStore;
use crate::core::error::Result;
use crate::core::{Player, RulesConfig, SceneFacade};
use crate::namehash::NameTable;
use crate::production::{ProductionCatalog, ProductionManager};
use crate::progress::{open_states, ProgressManager};
use crate::quest::{
    standard_condition_registry, standard_exec_registry, QuestConditionRegistry, QuestExecRegistry,
};

/// The shared, immutable heart of the rules layer.
pub struct RulesRuntime {
    content: Arc<ContentStore>,
    config: RulesConfig,

    ability_actions: AbilityActionRegistry,
    quest_conditions: QuestConditionRegistry,
    quest_execs: QuestExecRegistry,

    names: NameTable,
    catalog: ProductionCatalog,
    default_open_states: FxHashSet<u32>,
}

impl RulesRuntime {
    /// Build the runtime over loaded content.
    ///
    /// Fails on any handler-registry configuration error; a failed
    /// build leaves nothing usable behind.
    pub fn new(content: Arc<ContentStore>, config: RulesConfig) -> Result<Self> {
        let ability_actions = standard_action_registry()?;
        let quest_conditions = standard_condition_registry()?;
        let quest_execs = standard_exec_registry()?;

        let mut names = NameTable::new();
        for name in content.ability_names() {
            names.register(name);
        }

        let catalog = ProductionCatalog::from_content(&content);
        let default_open_states = open_states::compute_default_open_states(&content, &config);

        Ok(Self {
            content,
            config,
            ability_actions,
            quest_conditions,
            quest_execs,
            names,
            catalog,
            default_open_states,
        })
    }

    // === Shared pieces ===

    /// Loaded content.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    /// Runtime configuration.
    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Name hash reverse-lookup table.
    #[must_use]
    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// The ability-action handler registry.
    #[must_use]
    pub fn ability_actions(&self) -> &AbilityActionRegistry {
        &self.ability_actions
    }

    /// The quest-condition handler registry.
    #[must_use]
    pub fn quest_conditions(&self) -> &QuestConditionRegistry {
        &self.quest_conditions
    }

    /// The quest-executor handler registry.
    #[must_use]
    pub fn quest_execs(&self) -> &QuestExecRegistry {
        &self.quest_execs
    }

    /// The production catalog.
    #[must_use]
    pub fn catalog(&self) -> &ProductionCatalog {
        &self.catalog
    }

    /// Open states every account starts with.
    #[must_use]
    pub fn default_open_states(&self) -> &FxHashSet<u32> {
        &self.default_open_states
    }

    // === Per-request managers ===

    /// Ability action dispatch over the standard registry.
    #[must_use]
    pub fn dispatcher(&self) -> AbilityDispatcher<'_> {
        AbilityDispatcher::new(&self.ability_actions)
    }

    /// Progress operations for one player.
    #[must_use]
    pub fn progress<'a>(
        &'a self,
        player: &'a Player,
        scene: &'a dyn SceneFacade,
    ) -> ProgressManager<'a> {
        ProgressManager::new(self, player, scene)
    }

    /// Production operations for one player.
    #[must_use]
    pub fn production<'a>(&'a self, player: &'a Player) -> ProductionManager<'a> {
        ProductionManager::new(self, player)
    }
}

impl std::fmt::Debug for RulesRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RulesRuntime")
            .field("ability_actions", &self.ability_actions.len())
            .field("quest_conditions", &self.quest_conditions.len())
            .field("quest_execs", &self.quest_execs.len())
            .field("known_names", &self.names.len())
            .field("default_open_states", &self.default_open_states.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::AbilityData;
    use crate::namehash::name_hash;

    #[test]
    fn test_build_populates_name_table() {
        let mut content = ContentStore::new();
        content.register_ability(AbilityData::new("Avatar_Boy_Skill_TestA"));

        let runtime = RulesRuntime::new(Arc::new(content), RulesConfig::default()).unwrap();

        let hash = name_hash("Avatar_Boy_Skill_TestA");
        assert_eq!(runtime.names().resolve(hash), Some("Avatar_Boy_Skill_TestA"));
    }

    #[test]
    fn test_runtime_is_shareable() {
        fn assert_send_sync<T: Send + Sync>(_: &T) {}
        let runtime =
            RulesRuntime::new(Arc::new(ContentStore::new()), RulesConfig::default()).unwrap();
        assert_send_sync(&runtime);
    }
}
