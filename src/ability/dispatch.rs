//! Ability action dispatch.
//!
//! The dispatch boundary is where per-request failures stop: whatever a
//! handler returns, the caller sees a plain success/failure bool and the
//! worker thread keeps running.

use tracing::warn;

use crate::core::EntityId;
use crate::core::SceneFacade;

use super::instance::Ability;
use super::action::{AbilityActionRegistry, ActionContext, ActionSpec};

/// Dispatches ability actions through the action registry.
#[derive(Clone, Copy)]
pub struct AbilityDispatcher<'a> {
    registry: &'a AbilityActionRegistry,
}

impl<'a> AbilityDispatcher<'a> {
    /// Create a dispatcher over a frozen registry.
    #[must_use]
    pub fn new(registry: &'a AbilityActionRegistry) -> Self {
        Self { registry }
    }

    /// Execute one action against an ability.
    ///
    /// Returns `true` on success. A missing handler or a failing handler
    /// is logged and reported as `false`; ability and entity state stay
    /// untouched in both cases.
    pub fn dispatch(
        &self,
        ability: &mut Ability,
        spec: &ActionSpec,
        target: Option<EntityId>,
        scene: &dyn SceneFacade,
        now: u64,
    ) -> bool {
        let handler = match self.registry.resolve(spec.kind) {
            Ok(handler) => handler,
            Err(error) => {
                warn!(%error, ability = ability.name(), "ability action not dispatched");
                return false;
            }
        };

        let mut ctx = ActionContext { ability, scene, now };
        match handler.execute(&mut ctx, spec, target) {
            Ok(()) => true,
            Err(error) => {
                warn!(
                    %error,
                    kind = ?spec.kind,
                    ability = ctx.ability.name(),
                    "ability action failed"
                );
                false
            }
        }
    }
}
