//! Immutable game content.
//!
//! Descriptor records the content loader fills in before the runtime is
//! built. The store is init-then-frozen: registration during load, only
//! reads afterwards.

pub mod ability;
pub mod avatar;
pub mod open_state;
pub mod quest;
pub mod recipe;
pub mod store;

pub use ability::AbilityData;
pub use avatar::AvatarData;
pub use open_state::{OpenStateCond, OpenStateCondKind, OpenStateData};
pub use quest::SubQuestData;
pub use recipe::{ItemStack, RecipeData};
pub use store::ContentStore;
