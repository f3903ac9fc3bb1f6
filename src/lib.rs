//! Persistent hash-array-mapped trie and hierarchical name resolution.
//!
//! Two layers live in this crate:
//!
//! - [`PersistentHashMap`]: an immutable-node HAMT with copy-on-write path
//!   copying, collision buckets and cheap version [`Snapshot`]s. Storage is
//!   arena-backed; [`PersistentHashMapSync`] is the `Send + Sync` flavour.
//! - [`resolve`]: resolution of dotted, possibly hygienic identifiers
//!   against a current namespace, `open` declarations, aliases, private-name
//!   mangling and local variables, plus the inverse shortening used when
//!   printing names.
//!
//! Every table of [`env::Environment`] (declarations, namespaces, protected
//! names, aliases) is itself a [`PersistentHashMap`].
//!
//! # Key properties
//!
//! - **Persistence**: a mutation never touches a published node
//! - **Structural sharing**: untouched subtrees and entries are shared by index
//! - **Deterministic resolution**: same environment and scope → same
//!   candidate list, in the same order
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # References
//!
//! - Bagwell, 2001, "Ideal Hash Trees"
//! - Ullrich & de Moura, 2020, "Beyond Notations: Hygienic Macro Expansion
//!   for Theorem Proving Languages"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

use std::fmt;

use safe_bump::Idx;

pub mod env;
pub mod error;
pub mod hash;
pub mod iter;
pub mod name;
pub mod node;
pub mod resolve;
pub mod store;

mod arena;
mod arena_sync;
mod map;
mod ops;

#[cfg(test)]
mod tests;

pub use arena::TrieArena;
pub use arena_sync::TrieArenaSync;
pub use error::{ResolveError, Result};
pub use map::{Checkpoint, PersistentHashMap, PersistentHashMapSync};
pub use name::Name;

/// Result of [`PersistentHashMap::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// The key was not present before.
    Inserted,
    /// The key was present; its value was replaced.
    Updated,
}

/// Handle naming one version of a [`PersistentHashMap`].
///
/// Created by [`PersistentHashMap::snapshot`]. Stays valid across later
/// inserts and erases on the same map (but not across a rollback to an
/// earlier checkpoint).
pub struct Snapshot<K, V> {
    /// Root node of this version.
    pub root: Idx<node::Node<K, V>>,
    /// Entry count of this version.
    pub len: usize,
}

// Snapshot contains only an index and a count, no actual K/V data.

impl<K, V> Clone for Snapshot<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Snapshot<K, V> {}

impl<K, V> Snapshot<K, V> {
    /// Number of entries in this version.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if this version holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<K, V> fmt::Debug for Snapshot<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("root", &self.root.into_raw())
            .field("len", &self.len)
            .finish()
    }
}
