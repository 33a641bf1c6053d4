//! Error types for the rules core.
//!
//! Registry build failures (`DuplicateKey`) are fatal at process start:
//! a partial registry is never used. Everything else is a per-request
//! failure that gets caught at the dispatch boundary and converted into
//! a boolean result (and usually a response packet), so a bad request
//! can never take down a worker thread or affect other players.

use thiserror::Error;

/// Top-level error type for all rules-core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Two handlers were registered for the same key in one family.
    /// This is a startup configuration error; the registry build aborts.
    #[error("duplicate handler for {key} in the {family} registry")]
    DuplicateKey {
        /// Which handler family the registry belongs to.
        family: &'static str,
        /// The offending discriminant key.
        key: String,
    },

    /// No handler is registered for the requested key.
    /// Recoverable: logged, operation treated as a failed no-op.
    #[error("no handler registered for {key} in the {family} registry")]
    HandlerNotFound {
        /// Which handler family was queried.
        family: &'static str,
        /// The unresolved discriminant key.
        key: String,
    },

    /// An action required a target entity but none was provided.
    /// Recoverable: the action fails, no state is mutated.
    #[error("action requires a target entity but none was provided")]
    InvalidTarget,

    /// A referenced quest/ability/state id is absent from loaded content.
    /// Recoverable: treated as condition-false or operation-skip.
    #[error("{what} {id} is not present in loaded content")]
    ContentMissing {
        /// What kind of record was looked up.
        what: &'static str,
        /// The missing identifier.
        id: String,
    },
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, CoreError>;
