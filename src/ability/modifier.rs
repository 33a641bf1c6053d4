//! Active modifier state.

/// A live effect instance attached to an ability (a timed buff, an
/// aura). Owned by exactly one [`Ability`](super::Ability); dropped when
/// the modifier expires or is cleared.
#[derive(Clone, Debug, PartialEq)]
pub struct ModifierController {
    /// Modifier name, as declared by the ability's content data.
    pub name: String,
    /// Declared position within the owning ability's modifier list.
    pub local_id: u32,
    /// When the modifier was applied (seconds).
    pub applied_at: u64,
    /// Lifetime in seconds; `None` lasts until removed.
    pub duration: Option<f32>,
}

impl ModifierController {
    /// Create a controller applied at `now`.
    #[must_use]
    pub fn new(name: impl Into<String>, local_id: u32, applied_at: u64, duration: Option<f32>) -> Self {
        Self {
            name: name.into(),
            local_id,
            applied_at,
            duration,
        }
    }

    /// Has this modifier outlived its duration?
    #[must_use]
    pub fn is_expired(&self, now: u64) -> bool {
        match self.duration {
            Some(duration) => (now.saturating_sub(self.applied_at)) as f32 >= duration,
            None => false,
        }
    }
}
