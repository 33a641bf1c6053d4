//! Ability runtime: per-entity ability instances, their modifiers and
//! specials, and the action dispatch that drives them.

pub mod action;
pub mod dispatch;
pub mod instance;
pub mod modifier;

pub use action::{
    standard_action_registry, AbilityActionHandler, AbilityActionKind, AbilityActionRegistry,
    ActionContext, ActionSpec, ApplyModifierAction, KillSelfAction, LoseHpAction,
    RemoveModifierAction,
};
pub use dispatch::AbilityDispatcher;
pub use instance::Ability;
pub use modifier::ModifierController;
