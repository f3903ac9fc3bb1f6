//! Persistent hash map façade over a trie store.

use std::fmt;
use std::hash::Hash;
use std::ops;

use safe_bump::Idx;

use crate::arena::TrieArena;
use crate::arena_sync::TrieArenaSync;
use crate::hash;
use crate::iter::Iter;
use crate::node::{Entry, Node};
use crate::ops::erase::{EraseOutcome, erase_recursive};
use crate::ops::find::find_recursive;
use crate::ops::fold::fold_recursive;
use crate::ops::insert::insert_recursive;
use crate::ops::alloc_empty_entries;
use crate::store::{StoreCheckpoint, TrieStore};
use crate::{InsertResult, Snapshot};

/// Persistent hash map based on a hash-array-mapped trie.
///
/// Every mutation path-copies from the root to the modified slot; nodes are
/// never updated in place. A [`Snapshot`] taken at any point keeps naming
/// that exact version and can still be queried after later inserts and
/// erases.
///
/// `S` selects the storage backend; see [`PersistentHashMapSync`] for the
/// thread-safe one.
pub struct PersistentHashMap<K, V, S = TrieArena<K, V>> {
    store: S,
    root: Idx<Node<K, V>>,
    size: usize,
}

/// Thread-safe persistent hash map (`Send + Sync` for `Send + Sync` keys and
/// values), backed by [`SharedArena`](safe_bump::SharedArena).
pub type PersistentHashMapSync<K, V> = PersistentHashMap<K, V, TrieArenaSync<K, V>>;

/// Saved map state for rollback.
///
/// Created by [`PersistentHashMap::checkpoint`]. Restoring it with
/// [`PersistentHashMap::rollback`] discards every node allocated after it.
pub struct Checkpoint<K, V> {
    /// Arena checkpoint.
    pub store: StoreCheckpoint<K, V>,
    /// Version at checkpoint time.
    pub snapshot: Snapshot<K, V>,
}

impl<K, V> Clone for Checkpoint<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Checkpoint<K, V> {}

// ---------------------------------------------------------------------------
// Construction & accessors (no key bounds)
// ---------------------------------------------------------------------------

impl<K, V> PersistentHashMap<K, V> {
    /// Creates an empty single-threaded map.
    ///
    /// The thread-safe variant is built with
    /// `PersistentHashMapSync::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(TrieArena::new())
    }
}

impl<K, V, S: TrieStore<K, V>> PersistentHashMap<K, V, S> {
    /// Creates an empty map (a single all-`Empty` entries node) in `store`.
    #[must_use]
    pub fn with_store(mut store: S) -> Self {
        let root = alloc_empty_entries(&mut store);
        Self {
            store,
            root,
            size: 0,
        }
    }
}

impl<K, V, S: TrieStore<K, V>> PersistentHashMap<K, V, S> {
    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns a handle to the current version.
    #[must_use]
    pub const fn snapshot(&self) -> Snapshot<K, V> {
        Snapshot {
            root: self.root,
            len: self.size,
        }
    }

    /// Makes `snapshot` the current version again.
    ///
    /// Unlike [`rollback`](Self::rollback), storage is kept: snapshots taken
    /// after `snapshot` stay valid and can be restored in turn.
    pub const fn restore(&mut self, snapshot: Snapshot<K, V>) {
        self.root = snapshot.root;
        self.size = snapshot.len;
    }

    /// Saves the current map state for later rollback.
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint<K, V> {
        Checkpoint {
            store: self.store.checkpoint(),
            snapshot: self.snapshot(),
        }
    }

    /// Restores the map to a previously saved checkpoint, truncating storage.
    ///
    /// Snapshots taken after `cp` must not be used afterwards.
    pub fn rollback(&mut self, cp: Checkpoint<K, V>) {
        self.store.rollback(cp.store);
        self.restore(cp.snapshot);
    }

    /// Returns the total number of allocated items in each arena:
    /// `(nodes, slots, entries, members)`.
    ///
    /// Includes dead path copies; reflects true memory footprint.
    #[must_use]
    pub fn arena_len(&self) -> (usize, usize, usize, usize) {
        self.store.arena_len()
    }

    /// Returns an iterator over `(&K, &V)` pairs of the current version.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.store, self.root)
    }

    /// Returns an iterator over `(&K, &V)` pairs of `snapshot`.
    #[must_use]
    pub fn iter_in(&self, snapshot: &Snapshot<K, V>) -> Iter<'_, K, V> {
        Iter::new(&self.store, snapshot.root)
    }

    /// Folds `f` over every entry of the current version.
    ///
    /// Each entry is visited exactly once, in trie order (not insertion
    /// order).
    pub fn fold<A, F>(&self, init: A, f: F) -> A
    where
        F: FnMut(A, &K, &V) -> A,
    {
        self.fold_in(&self.snapshot(), init, f)
    }

    /// Folds `f` over every entry of `snapshot`.
    pub fn fold_in<A, F>(&self, snapshot: &Snapshot<K, V>, init: A, mut f: F) -> A
    where
        F: FnMut(A, &K, &V) -> A,
    {
        fold_recursive(&self.store, snapshot.root, init, &mut f)
    }
}

// ---------------------------------------------------------------------------
// Read operations (K: Hash + Eq)
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V, S: TrieStore<K, V>> PersistentHashMap<K, V, S> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn find(&self, key: &K) -> Option<&V> {
        self.find_hashed(self.root, hash::trie_hash(key), key)
    }

    /// Looks `key` up in an earlier (or later) version of this map.
    #[must_use]
    pub fn find_in(&self, snapshot: &Snapshot<K, V>, key: &K) -> Option<&V> {
        self.find_hashed(snapshot.root, hash::trie_hash(key), key)
    }

    /// Returns the value for `key`, or `default` if absent.
    #[must_use]
    pub fn find_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.find(key).unwrap_or(default)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns `true` if `snapshot` contains the given key.
    #[must_use]
    pub fn contains_in(&self, snapshot: &Snapshot<K, V>, key: &K) -> bool {
        self.find_in(snapshot, key).is_some()
    }

    pub(crate) fn find_hashed(&self, root: Idx<Node<K, V>>, hash: u64, key: &K) -> Option<&V> {
        find_recursive(&self.store, root, hash, key, 0)
    }
}

// ---------------------------------------------------------------------------
// Write operations (K: Hash + Eq)
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V, S: TrieStore<K, V>> PersistentHashMap<K, V, S> {
    /// Inserts a key-value pair, producing a new current version.
    ///
    /// Returns [`Inserted`](InsertResult::Inserted) if the key was new, or
    /// [`Updated`](InsertResult::Updated) if an existing value was replaced.
    pub fn insert(&mut self, key: K, value: V) -> InsertResult {
        let hash = hash::trie_hash(&key);
        self.insert_hashed(hash, key, value)
    }

    /// Removes a key, producing a new current version. Returns `true` if the
    /// key was present.
    pub fn erase(&mut self, key: &K) -> bool {
        let hash = hash::trie_hash(key);
        self.erase_hashed(hash, key)
    }

    pub(crate) fn insert_hashed(&mut self, hash: u64, key: K, value: V) -> InsertResult {
        let new = self.store.alloc_entry(Entry { hash, key, value });
        let outcome = insert_recursive(&mut self.store, self.root, new, 0);
        self.root = outcome.node;
        if outcome.inserted {
            self.size += 1;
            InsertResult::Inserted
        } else {
            InsertResult::Updated
        }
    }

    pub(crate) fn erase_hashed(&mut self, hash: u64, key: &K) -> bool {
        match erase_recursive(&mut self.store, self.root, hash, key, 0) {
            EraseOutcome::NotFound => false,
            EraseOutcome::Erased { node } => {
                self.root = node;
                self.size -= 1;
                true
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V, S: TrieStore<K, V> + Default> Default for PersistentHashMap<K, V, S> {
    fn default() -> Self {
        Self::with_store(S::default())
    }
}

impl<K, V, S> fmt::Debug for PersistentHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentHashMap")
            .field("len", &self.size)
            .field("root", &self.root.into_raw())
            .finish_non_exhaustive()
    }
}

impl<K: Hash + Eq, V, S: TrieStore<K, V>> Extend<(K, V)> for PersistentHashMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Hash + Eq, V, S: TrieStore<K, V> + Default> FromIterator<(K, V)>
    for PersistentHashMap<K, V, S>
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq, V, S: TrieStore<K, V>> ops::Index<&K> for PersistentHashMap<K, V, S> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.find(key).expect("key not found")
    }
}

impl<'a, K, V, S: TrieStore<K, V>> IntoIterator for &'a PersistentHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
