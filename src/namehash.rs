//! Deterministic name hashing for the wire protocol.
//!
//! Ability and skill names travel as 32-bit hashes in the compact wire
//! form. The hash is a plain base-131 polynomial over the name's UTF-16
//! code units; it is part of the protocol and must stay bit-exact, which
//! also means collisions are accepted silently rather than "fixed".
//!
//! Decoding goes through a [`NameTable`] populated from every known
//! content name at load time. An unknown hash resolves to `None` — bad
//! client data is non-fatal by design.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Hash a name to its 32-bit wire form.
///
/// Accumulator starts at 0; each UTF-16 code unit `c` (in string order)
/// folds in as `acc = c + 131 * acc`, truncated to 32 bits.
///
/// ```
/// use runecore::namehash::name_hash;
///
/// // Deterministic: same input, same output, always.
/// assert_eq!(name_hash("Avatar_Boy_Skill_TestA"), name_hash("Avatar_Boy_Skill_TestA"));
/// assert_eq!(name_hash(""), 0);
/// ```
#[must_use]
pub fn name_hash(name: &str) -> u32 {
    let mut acc: u32 = 0;
    for unit in name.encode_utf16() {
        acc = u32::from(unit).wrapping_add(acc.wrapping_mul(131));
    }
    acc
}

/// Reverse lookup table from hash to canonical name.
///
/// Built once at content load from every known ability/skill name; read
/// concurrently afterwards. On a hash collision the first registered
/// name wins — any name stored under a hash necessarily hashes back to
/// that same value, which is all the round-trip guarantees.
#[derive(Clone, Debug, Default)]
pub struct NameTable {
    by_hash: FxHashMap<u32, String>,
}

impl NameTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a known name, returning its hash.
    pub fn register(&mut self, name: impl Into<String>) -> u32 {
        let name = name.into();
        let hash = name_hash(&name);
        self.by_hash.entry(hash).or_insert(name);
        hash
    }

    /// Resolve a hash back to a known name.
    ///
    /// Returns `None` for hashes no loaded content produces.
    #[must_use]
    pub fn resolve(&self, hash: u32) -> Option<&str> {
        self.by_hash.get(&hash).map(String::as_str)
    }

    /// Number of distinct hashes known.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }
}

/// A wire reference to an ability, carrying an inline name, a hash, or
/// both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityRef {
    /// Inline name, if the sender spent the bytes on it.
    pub name: Option<String>,
    /// Compact hash form.
    pub hash: Option<u32>,
}

impl AbilityRef {
    /// Reference by inline name.
    #[must_use]
    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            hash: None,
        }
    }

    /// Reference by compact hash.
    #[must_use]
    pub const fn from_hash(hash: u32) -> Self {
        Self {
            name: None,
            hash: Some(hash),
        }
    }

    /// Resolve to a canonical name.
    ///
    /// Prefers the inline name when present, falls back to reverse hash
    /// lookup. `None` means "unknown" and callers must treat that as
    /// non-fatal.
    #[must_use]
    pub fn canonical_name<'a>(&'a self, table: &'a NameTable) -> Option<&'a str> {
        if let Some(name) = &self.name {
            return Some(name);
        }
        self.hash.and_then(|hash| table.resolve(hash))
    }
}
