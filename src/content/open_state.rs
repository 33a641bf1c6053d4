//! Static open-state descriptors.

use serde::{Deserialize, Serialize};

/// Condition families an open state can be gated on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpenStateCondKind {
    /// Player level must be at least `param`.
    PlayerLevel,
    /// Sub-quest `param` must be finished.
    Quest,
    /// Main quest `param` must be finished.
    ParentQuest,
    /// City `param` reputation at least `param2`. Not implemented:
    /// always evaluates false, pending clarified game rules.
    CityReputationLevel,
    /// Offering `param` at level `param2`. Not implemented: treated as
    /// met, and such states are default-open.
    OfferingLevel,
}

/// One unlock condition on an open state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenStateCond {
    /// Which condition family.
    pub kind: OpenStateCondKind,
    /// Primary parameter (level, quest id, city id, offering id).
    pub param: i32,
    /// Secondary parameter (reputation level, offering level).
    pub param2: i32,
}

impl OpenStateCond {
    /// Create a condition with only a primary parameter.
    #[must_use]
    pub const fn new(kind: OpenStateCondKind, param: i32) -> Self {
        Self {
            kind,
            param,
            param2: 0,
        }
    }
}

/// Content definition of one open state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OpenStateData {
    /// Open state id.
    pub id: u32,

    /// Unlocked by default for new accounts.
    pub default_state: bool,

    /// The client may set this state itself (settings-style toggles).
    /// Client-settable states are never force-unlocked by the server.
    pub allow_client_open: bool,

    /// Unlock conditions; all must hold.
    pub conditions: Vec<OpenStateCond>,
}

impl OpenStateData {
    /// Create a state with no conditions.
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self {
            id,
            default_state: false,
            allow_client_open: false,
            conditions: Vec::new(),
        }
    }

    /// Mark as unlocked by default (builder pattern).
    #[must_use]
    pub fn default_open(mut self) -> Self {
        self.default_state = true;
        self
    }

    /// Mark as client-settable (builder pattern).
    #[must_use]
    pub fn client_settable(mut self) -> Self {
        self.allow_client_open = true;
        self
    }

    /// Add an unlock condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: OpenStateCond) -> Self {
        self.conditions.push(condition);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let state = OpenStateData::new(30)
            .default_open()
            .with_condition(OpenStateCond::new(OpenStateCondKind::PlayerLevel, 5));

        assert_eq!(state.id, 30);
        assert!(state.default_state);
        assert!(!state.allow_client_open);
        assert_eq!(state.conditions.len(), 1);
    }
}
