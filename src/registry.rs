//! Handler registry: the dispatch backbone.
//!
//! Each handler family (ability actions, quest conditions, quest
//! executors) gets one registry mapping its discriminant key to the
//! handler that interprets it. Registration happens exactly once, while
//! content initializes; [`RegistryBuilder::build`] then freezes the
//! registry, and from that point only `&self` access exists, so any
//! number of worker threads can resolve handlers without locking.
//!
//! Two handlers for one key is a startup configuration error, not a
//! last-registered-wins situation: [`RegistryBuilder::register`] fails
//! and the whole runtime build aborts before any dispatch can happen.
//!
//! ## Example
//!
//! ```
//! use runecore::registry::RegistryBuilder;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> &'static str;
//! }
//! struct Hello;
//! impl Greeter for Hello {
//!     fn greet(&self) -> &'static str { "hello" }
//! }
//!
//! let builder: RegistryBuilder<u8, dyn Greeter> = RegistryBuilder::new("greeter");
//! let registry = builder.register(1, Box::new(Hello)).unwrap().build();
//!
//! assert_eq!(registry.resolve(1).unwrap().greet(), "hello");
//! assert!(registry.resolve(2).is_err());
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::core::error::{CoreError, Result};

/// Builder for a [`HandlerRegistry`].
///
/// Collects `(key, handler)` pairs during startup and rejects
/// duplicates. Consumed by [`build`](Self::build).
pub struct RegistryBuilder<K, H: ?Sized> {
    family: &'static str,
    handlers: FxHashMap<K, Box<H>>,
}

impl<K, H> RegistryBuilder<K, H>
where
    K: Copy + Eq + Hash + fmt::Debug,
    H: ?Sized,
{
    /// Start building a registry for the named handler family.
    ///
    /// The family name only shows up in errors and logs.
    #[must_use]
    pub fn new(family: &'static str) -> Self {
        Self {
            family,
            handlers: FxHashMap::default(),
        }
    }

    /// Register a handler for a key.
    ///
    /// Fails with [`CoreError::DuplicateKey`] if the key already has a
    /// handler; the earlier registration is left untouched.
    pub fn register(mut self, key: K, handler: Box<H>) -> Result<Self> {
        if self.handlers.contains_key(&key) {
            return Err(CoreError::DuplicateKey {
                family: self.family,
                key: format!("{key:?}"),
            });
        }
        self.handlers.insert(key, handler);
        Ok(self)
    }

    /// Freeze the registry. No further registration is possible.
    #[must_use]
    pub fn build(self) -> HandlerRegistry<K, H> {
        HandlerRegistry {
            family: self.family,
            handlers: self.handlers,
        }
    }
}

/// Immutable post-init mapping from discriminant key to handler.
///
/// Safe for unsynchronized concurrent reads: there is no way to mutate
/// it after [`RegistryBuilder::build`].
pub struct HandlerRegistry<K, H: ?Sized> {
    family: &'static str,
    handlers: FxHashMap<K, Box<H>>,
}

impl<K, H> HandlerRegistry<K, H>
where
    K: Copy + Eq + Hash + fmt::Debug,
    H: ?Sized,
{
    /// The handler family this registry serves.
    #[must_use]
    pub fn family(&self) -> &'static str {
        self.family
    }

    /// Resolve the handler for a key.
    ///
    /// "No handler" is a distinct, loggable condition
    /// ([`CoreError::HandlerNotFound`]), never a silent fallback.
    pub fn resolve(&self, key: K) -> Result<&H> {
        self.handlers
            .get(&key)
            .map(Box::as_ref)
            .ok_or_else(|| CoreError::HandlerNotFound {
                family: self.family,
                key: format!("{key:?}"),
            })
    }

    /// Look up a handler without the error path.
    #[must_use]
    pub fn get(&self, key: K) -> Option<&H> {
        self.handlers.get(&key).map(Box::as_ref)
    }

    /// Check if a key has a handler.
    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.handlers.contains_key(&key)
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterate over the registered keys.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.handlers.keys().copied()
    }
}

impl<K, H: ?Sized> fmt::Debug for HandlerRegistry<K, H>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("family", &self.family)
            .field("len", &self.handlers.len())
            .finish()
    }
}
