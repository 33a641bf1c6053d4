//! Static avatar descriptors.

use serde::{Deserialize, Serialize};

/// Content definition of one avatar.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AvatarData {
    /// Avatar identity id.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Item id of the weapon granted on first acquisition.
    pub initial_weapon: u32,
}

impl AvatarData {
    /// Create an avatar descriptor.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, initial_weapon: u32) -> Self {
        Self {
            id,
            name: name.into(),
            initial_weapon,
        }
    }
}
