//! # runecore
//!
//! Runtime rules core for a live-world game server: the layer that
//! evaluates game rules — abilities, quest conditions and executors,
//! feature unlocks — against mutable per-player and per-entity state,
//! driven by client packets and in-world events.
//!
//! ## Design Principles
//!
//! 1. **Registry Dispatch**: Every extensible rule family (ability
//!    actions, quest conditions, quest executors) resolves through an
//!    init-then-frozen [`registry::HandlerRegistry`]. New discriminants
//!    mean new handler types and one registration line, never a change
//!    at a dispatch call site.
//!
//! 2. **No Ambient State**: Content, configuration and derived startup
//!    sets live in an explicitly constructed [`runtime::RulesRuntime`]
//!    that is passed where it is needed. No process-wide statics.
//!
//! 3. **Per-Player Exclusive Sections**: Mutable player state is split
//!    into subsystems, each behind its own lock, so requests for
//!    different players never contend and racing requests for one
//!    player cannot lose updates.
//!
//! 4. **Failures Stay Local**: Per-request errors convert to boolean
//!    results (and response packets) at the dispatch boundary. Only a
//!    registry build failure at startup is fatal.
//!
//! ## Modules
//!
//! - `core`: ids, errors, configuration, the player, collaborator
//!   boundaries (scene facade, outbound packets, quest events)
//! - `registry`: generic frozen handler registry
//! - `namehash`: deterministic wire hashing of content names
//! - `content`: immutable content records and the content store
//! - `ability`: per-entity ability instances and action dispatch
//! - `quest`: quest condition/executor framework and quest state
//! - `progress`: open states, map unlocks, progress counters
//! - `production`: time-accrual production queues
//! - `avatar`: the character roster and trial variants
//! - `runtime`: startup assembly of all of the above

pub mod ability;
pub mod avatar;
pub mod content;
pub mod core;
pub mod namehash;
pub mod production;
pub mod progress;
pub mod quest;
pub mod registry;
pub mod runtime;

// Re-export commonly used types
pub use crate::core::{
    AvatarGuid, CoreError, EntityId, EventTrigger, ItemLedger, Packet, Player, PlayerId,
    QueueEntrySnapshot, QueuedEvent, Result, Retcode, RulesConfig, SceneFacade, SceneId,
    ScriptEventKind,
};

pub use crate::registry::{HandlerRegistry, RegistryBuilder};

pub use crate::namehash::{name_hash, AbilityRef, NameTable};

pub use crate::content::{
    AbilityData, AvatarData, ContentStore, ItemStack, OpenStateCond, OpenStateCondKind,
    OpenStateData, RecipeData, SubQuestData,
};

pub use crate::ability::{
    Ability, AbilityActionHandler, AbilityActionKind, AbilityDispatcher, ActionContext,
    ActionSpec, ModifierController,
};

pub use crate::quest::{
    AcceptCondition, ConditionContext, ExecContext, MainQuest, ParentQuestState, QuestCondKind,
    QuestConditionHandler, QuestExec, QuestExecHandler, QuestExecKind, QuestLog, QuestState,
    SubQuest,
};

pub use crate::progress::ProgressManager;

pub use crate::production::{ActiveProductionEntry, ProductionCatalog, ProductionManager};

pub use crate::avatar::{Avatar, AvatarKind, AvatarStorage};

pub use crate::runtime::RulesRuntime;
