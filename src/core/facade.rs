//! Scene/entity collaborator boundary.
//!
//! The world simulation owns entities; the rules core only asks it to do
//! things. Handlers that need to touch an entity (kill it, damage it) or
//! poke the scripting layer go through this trait, which the host
//! implements on its scene object.

use super::id::EntityId;

/// World-side script events the core can fire.
///
/// The scripting bridge itself is an external collaborator; these are
/// just the well-defined calls the core emits towards it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScriptEventKind {
    /// A map transport point was unlocked.
    UnlockTransPoint,
}

/// Facade over the scene/world simulation.
///
/// All methods are synchronous and expected to complete quickly; the
/// implementations hand work off to the simulation loop rather than
/// blocking.
pub trait SceneFacade: Send + Sync {
    /// Kill an entity. Returns false if the entity does not exist.
    fn kill_entity(&self, entity: EntityId) -> bool;

    /// Apply damage to an entity. Returns false if the entity does not
    /// exist.
    fn damage_entity(&self, entity: EntityId, amount: f32) -> bool;

    /// Fire an event into the scene's script manager.
    fn call_script_event(&self, kind: ScriptEventKind, args: &[i64]);
}
