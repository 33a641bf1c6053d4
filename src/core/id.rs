//! Identifier newtypes.
//!
//! Every id that crosses a module boundary gets its own type so that a
//! scene id can never be passed where a player id is expected. The raw
//! values come from content tables and the session layer; the core never
//! allocates them.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// Unique identifier for an in-world entity (avatar, monster, gadget).
///
/// Entities are owned by the scene; the core only refers to them when
/// dispatching ability actions through the scene facade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Identifier for a scene (a loaded world map).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneId(pub u32);

impl SceneId {
    /// Create a new scene ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Scene({})", self.0)
    }
}

/// Globally unique avatar instance key.
///
/// Distinct from the avatar's identity id: trial variants share the
/// identity id with the real avatar but always get a fresh guid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvatarGuid(pub u64);

impl AvatarGuid {
    /// Create a new avatar guid.
    #[must_use]
    pub const fn new(guid: u64) -> Self {
        Self(guid)
    }

    /// Get the raw guid value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AvatarGuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Guid({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PlayerId::new(7)), "Player(7)");
        assert_eq!(format!("{}", EntityId::new(42)), "Entity(42)");
        assert_eq!(format!("{}", SceneId::new(3)), "Scene(3)");
        assert_eq!(format!("{}", AvatarGuid::new(9)), "Guid(9)");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId::new(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
