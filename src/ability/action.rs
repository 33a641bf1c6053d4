//! Ability modifier actions and their handlers.
//!
//! Each [`AbilityActionKind`] has exactly one handler type; the standard
//! set is registered centrally in [`standard_action_registry`], so a new
//! action kind means one new type plus one builder call, and no dispatch
//! call site changes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{CoreError, Result};
use crate::core::{EntityId, SceneFacade};
use crate::registry::{HandlerRegistry, RegistryBuilder};

use super::instance::Ability;

/// Discriminant for ability modifier actions. Content-defined, closed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityActionKind {
    /// Attach a declared modifier to the ability.
    #[default]
    ApplyModifier,
    /// Detach an active modifier.
    RemoveModifier,
    /// Kill the entity the action is applied to.
    KillSelf,
    /// Deal flat damage to the target (or the owner, if untargeted).
    LoseHp,
}

/// Payload of one ability action, as described by content data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    /// Which action to perform.
    pub kind: AbilityActionKind,
    /// Modifier name, for the modifier actions.
    pub modifier_name: Option<String>,
    /// Flat amount, for damage-style actions.
    pub amount: Option<f32>,
    /// Modifier lifetime in seconds; `None` lasts until removed.
    pub duration: Option<f32>,
}

impl ActionSpec {
    /// An apply-modifier action.
    #[must_use]
    pub fn apply_modifier(name: impl Into<String>, duration: Option<f32>) -> Self {
        Self {
            kind: AbilityActionKind::ApplyModifier,
            modifier_name: Some(name.into()),
            duration,
            ..Self::default()
        }
    }

    /// A remove-modifier action.
    #[must_use]
    pub fn remove_modifier(name: impl Into<String>) -> Self {
        Self {
            kind: AbilityActionKind::RemoveModifier,
            modifier_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// A kill-self action.
    #[must_use]
    pub fn kill_self() -> Self {
        Self {
            kind: AbilityActionKind::KillSelf,
            ..Self::default()
        }
    }

    /// A lose-hp action.
    #[must_use]
    pub fn lose_hp(amount: f32) -> Self {
        Self {
            kind: AbilityActionKind::LoseHp,
            amount: Some(amount),
            ..Self::default()
        }
    }
}

/// Everything a handler may touch while executing.
pub struct ActionContext<'a> {
    /// The ability the action belongs to.
    pub ability: &'a mut Ability,
    /// The world simulation boundary.
    pub scene: &'a dyn SceneFacade,
    /// Current time in seconds.
    pub now: u64,
}

/// A pluggable interpreter for one action kind.
pub trait AbilityActionHandler: Send + Sync {
    /// Execute the action against the context and optional target.
    ///
    /// Failures are ordinary values; the dispatcher converts them into
    /// a `false` result and a log line, never a worker-thread fault.
    fn execute(
        &self,
        ctx: &mut ActionContext<'_>,
        spec: &ActionSpec,
        target: Option<EntityId>,
    ) -> Result<()>;
}

fn required_modifier_name(spec: &ActionSpec) -> Result<&str> {
    spec.modifier_name
        .as_deref()
        .ok_or(CoreError::ContentMissing {
            what: "action modifier name",
            id: "<unset>".to_string(),
        })
}

/// Handler for [`AbilityActionKind::ApplyModifier`].
pub struct ApplyModifierAction;

impl AbilityActionHandler for ApplyModifierAction {
    fn execute(
        &self,
        ctx: &mut ActionContext<'_>,
        spec: &ActionSpec,
        _target: Option<EntityId>,
    ) -> Result<()> {
        let name = required_modifier_name(spec)?;
        if !ctx.ability.data().declares_modifier(name) {
            return Err(CoreError::ContentMissing {
                what: "modifier",
                id: name.to_string(),
            });
        }
        ctx.ability.apply_modifier(name, spec.duration, ctx.now);
        Ok(())
    }
}

/// Handler for [`AbilityActionKind::RemoveModifier`].
pub struct RemoveModifierAction;

impl AbilityActionHandler for RemoveModifierAction {
    fn execute(
        &self,
        ctx: &mut ActionContext<'_>,
        spec: &ActionSpec,
        _target: Option<EntityId>,
    ) -> Result<()> {
        let name = required_modifier_name(spec)?;
        if ctx.ability.remove_modifier(name).is_none() {
            debug!(modifier = name, "removing a modifier that is not active");
        }
        Ok(())
    }
}

/// Handler for [`AbilityActionKind::KillSelf`].
///
/// The action carries no target of its own; the entity it is applied to
/// arrives as the dispatch target, and a missing target fails the action
/// instead of killing something arbitrary.
pub struct KillSelfAction;

impl AbilityActionHandler for KillSelfAction {
    fn execute(
        &self,
        ctx: &mut ActionContext<'_>,
        _spec: &ActionSpec,
        target: Option<EntityId>,
    ) -> Result<()> {
        let target = target.ok_or(CoreError::InvalidTarget)?;
        if !ctx.scene.kill_entity(target) {
            debug!(%target, "kill target no longer exists");
        }
        Ok(())
    }
}

/// Handler for [`AbilityActionKind::LoseHp`].
pub struct LoseHpAction;

impl AbilityActionHandler for LoseHpAction {
    fn execute(
        &self,
        ctx: &mut ActionContext<'_>,
        spec: &ActionSpec,
        target: Option<EntityId>,
    ) -> Result<()> {
        let entity = target.unwrap_or_else(|| ctx.ability.owner());
        let amount = spec.amount.unwrap_or(0.0);
        if !ctx.scene.damage_entity(entity, amount) {
            debug!(%entity, "damage target no longer exists");
        }
        Ok(())
    }
}

/// Registry type for the ability-action family.
pub type AbilityActionRegistry = HandlerRegistry<AbilityActionKind, dyn AbilityActionHandler>;

/// Build the standard ability-action registry.
///
/// This is the family's complete registration table; it runs once at
/// startup and any duplicate is a fatal configuration error.
pub fn standard_action_registry() -> Result<AbilityActionRegistry> {
    let builder: RegistryBuilder<AbilityActionKind, dyn AbilityActionHandler> =
        RegistryBuilder::new("ability-action");
    Ok(builder
        .register(AbilityActionKind::ApplyModifier, Box::new(ApplyModifierAction))?
        .register(AbilityActionKind::RemoveModifier, Box::new(RemoveModifierAction))?
        .register(AbilityActionKind::KillSelf, Box::new(KillSelfAction))?
        .register(AbilityActionKind::LoseHp, Box::new(LoseHpAction))?
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_covers_all_kinds() {
        let registry = standard_action_registry().unwrap();
        for kind in [
            AbilityActionKind::ApplyModifier,
            AbilityActionKind::RemoveModifier,
            AbilityActionKind::KillSelf,
            AbilityActionKind::LoseHp,
        ] {
            assert!(registry.contains(kind), "missing handler for {kind:?}");
        }
    }

    #[test]
    fn test_spec_builders() {
        let spec = ActionSpec::apply_modifier("Burn", Some(3.0));
        assert_eq!(spec.kind, AbilityActionKind::ApplyModifier);
        assert_eq!(spec.modifier_name.as_deref(), Some("Burn"));
        assert_eq!(spec.duration, Some(3.0));

        let spec = ActionSpec::lose_hp(120.0);
        assert_eq!(spec.kind, AbilityActionKind::LoseHp);
        assert_eq!(spec.amount, Some(120.0));
    }
}
