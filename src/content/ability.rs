//! Static ability descriptors.
//!
//! `AbilityData` is shared, content-defined, and immutable once loaded:
//! runtime [`Ability`](crate::ability::Ability) instances copy what they
//! need and never write back. The one exception is the lazily derived
//! modifier index, which is computed at most once per data instance no
//! matter how many abilities bind to it.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

/// Content definition of one ability.
#[derive(Debug, Default)]
pub struct AbilityData {
    /// Canonical ability name; also the source of the wire hash.
    pub name: String,

    /// Default values for the ability's tunable numeric parameters.
    pub specials: FxHashMap<String, f32>,

    /// Names of the modifiers this ability may apply, in declared order.
    pub modifiers: Vec<String>,

    /// Derived name -> local id index over `modifiers`. Built on first
    /// use, exactly once per data instance.
    modifier_index: OnceLock<FxHashMap<String, u32>>,
}

impl AbilityData {
    /// Create a descriptor with no specials or modifiers.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a default special value (builder pattern).
    #[must_use]
    pub fn with_special(mut self, name: impl Into<String>, value: f32) -> Self {
        self.specials.insert(name.into(), value);
        self
    }

    /// Declare a modifier (builder pattern).
    #[must_use]
    pub fn with_modifier(mut self, name: impl Into<String>) -> Self {
        self.modifiers.push(name.into());
        self
    }

    /// Run the one-shot initialization for this data instance.
    ///
    /// Idempotent; concurrent callers race at most once and every later
    /// call is a no-op.
    pub fn ensure_initialized(&self) {
        self.modifier_index();
    }

    /// Has the one-shot initialization run yet?
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.modifier_index.get().is_some()
    }

    /// Whether this ability declares a modifier by name.
    #[must_use]
    pub fn declares_modifier(&self, name: &str) -> bool {
        self.modifier_index().contains_key(name)
    }

    /// Local id of a declared modifier (its declared position).
    #[must_use]
    pub fn modifier_local_id(&self, name: &str) -> Option<u32> {
        self.modifier_index().get(name).copied()
    }

    fn modifier_index(&self) -> &FxHashMap<String, u32> {
        self.modifier_index.get_or_init(|| {
            self.modifiers
                .iter()
                .enumerate()
                .map(|(index, name)| (name.clone(), index as u32))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let data = AbilityData::new("Avatar_Boy_Skill_TestA")
            .with_special("CD", 8.0)
            .with_special("Cost", 40.0)
            .with_modifier("TestA_Burn");

        assert_eq!(data.name, "Avatar_Boy_Skill_TestA");
        assert_eq!(data.specials.get("CD"), Some(&8.0));
        assert_eq!(data.modifiers.len(), 1);
    }

    #[test]
    fn test_initialization_is_one_shot() {
        let data = AbilityData::new("Skill").with_modifier("Burn").with_modifier("Chill");
        assert!(!data.is_initialized());

        data.ensure_initialized();
        assert!(data.is_initialized());
        let first = data.modifier_index() as *const _;

        // A second call must not rebuild the index.
        data.ensure_initialized();
        assert_eq!(first, data.modifier_index() as *const _);
    }

    #[test]
    fn test_modifier_lookup() {
        let data = AbilityData::new("Skill").with_modifier("Burn").with_modifier("Chill");

        assert!(data.declares_modifier("Burn"));
        assert_eq!(data.modifier_local_id("Burn"), Some(0));
        assert_eq!(data.modifier_local_id("Chill"), Some(1));
        assert_eq!(data.modifier_local_id("Freeze"), None);
    }
}
