//! Production catalog: startup-derived recipe indexes.
//!
//! Built once from content when the runtime initializes; owned by the
//! runtime, never a process-wide static.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::content::ContentStore;

/// Default-unlocked recipes and the group → recipes index.
#[derive(Clone, Debug, Default)]
pub struct ProductionCatalog {
    default_unlocked: FxHashSet<u32>,
    groups: FxHashMap<u32, Vec<u32>>,
}

impl ProductionCatalog {
    /// Derive the catalog from loaded content.
    #[must_use]
    pub fn from_content(content: &ContentStore) -> Self {
        let mut default_unlocked = FxHashSet::default();
        let mut groups: FxHashMap<u32, Vec<u32>> = FxHashMap::default();

        for recipe in content.recipes() {
            if recipe.default_unlocked {
                default_unlocked.insert(recipe.id);
            }
            groups.entry(recipe.group).or_default().push(recipe.id);
        }
        for recipes in groups.values_mut() {
            recipes.sort_unstable();
        }

        Self {
            default_unlocked,
            groups,
        }
    }

    /// Recipes every player starts with.
    #[must_use]
    pub fn default_unlocked(&self) -> &FxHashSet<u32> {
        &self.default_unlocked
    }

    /// Recipe ids in a collection group, sorted.
    #[must_use]
    pub fn group(&self, group: u32) -> Option<&[u32]> {
        self.groups.get(&group).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RecipeData;

    #[test]
    fn test_catalog_from_content() {
        let mut content = ContentStore::new();
        content.register_recipe(RecipeData::new(1202, 2, 60, 20));
        content.register_recipe(RecipeData::new(1201, 2, 60, 20).default_unlocked());
        content.register_recipe(RecipeData::new(1301, 3, 30, 10).default_unlocked());

        let catalog = ProductionCatalog::from_content(&content);

        assert!(catalog.default_unlocked().contains(&1201));
        assert!(catalog.default_unlocked().contains(&1301));
        assert!(!catalog.default_unlocked().contains(&1202));

        assert_eq!(catalog.group(2), Some(&[1201, 1202][..]));
        assert_eq!(catalog.group(3), Some(&[1301][..]));
        assert_eq!(catalog.group(9), None);
    }
}
