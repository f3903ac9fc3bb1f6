//! Storage abstraction for trie operations.

use safe_bump::{Checkpoint, Idx};

use crate::node::{Entry, Node, Slot};

/// Saved state of the four storage arenas.
pub struct StoreCheckpoint<K, V> {
    /// Nodes arena checkpoint.
    pub nodes: Checkpoint<Node<K, V>>,
    /// Slots arena checkpoint.
    pub slots: Checkpoint<Slot<K, V>>,
    /// Entries arena checkpoint.
    pub entries: Checkpoint<Entry<K, V>>,
    /// Collision members arena checkpoint.
    pub members: Checkpoint<Idx<Entry<K, V>>>,
}

// StoreCheckpoint contains only Checkpoint<T> values (Copy), no K/V data.

impl<K, V> Clone for StoreCheckpoint<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for StoreCheckpoint<K, V> {}

/// Storage backend for trie operations.
///
/// Abstracts over [`Arena`](safe_bump::Arena) (single-thread) and
/// [`SharedArena`](safe_bump::SharedArena) (multi-thread) backends.
/// Every arena is append-only: published nodes are never overwritten, which
/// is what keeps older versions of a map readable.
pub trait TrieStore<K, V> {
    /// Allocates a single node, returning its index.
    fn alloc_node(&mut self, node: Node<K, V>) -> Idx<Node<K, V>>;

    /// Returns a reference to the node at `idx`.
    fn get_node(&self, idx: Idx<Node<K, V>>) -> &Node<K, V>;

    /// Allocates a contiguous block of slots, returning the index of the
    /// first one. Returns `None` if the iterator is empty.
    fn alloc_slots(&mut self, iter: impl IntoIterator<Item = Slot<K, V>>)
    -> Option<Idx<Slot<K, V>>>;

    /// Returns a reference to the slot at `idx`.
    fn get_slot(&self, idx: Idx<Slot<K, V>>) -> &Slot<K, V>;

    /// Allocates a single entry, returning its index.
    fn alloc_entry(&mut self, entry: Entry<K, V>) -> Idx<Entry<K, V>>;

    /// Returns a reference to the entry at `idx`.
    fn get_entry(&self, idx: Idx<Entry<K, V>>) -> &Entry<K, V>;

    /// Allocates a contiguous block of collision members, returning the
    /// index of the first one. Returns `None` if the iterator is empty.
    fn alloc_members(
        &mut self,
        iter: impl IntoIterator<Item = Idx<Entry<K, V>>>,
    ) -> Option<Idx<Idx<Entry<K, V>>>>;

    /// Returns the entry index stored at member position `idx`.
    fn get_member(&self, idx: Idx<Idx<Entry<K, V>>>) -> &Idx<Entry<K, V>>;

    /// Saves the current state of all four arenas.
    fn checkpoint(&self) -> StoreCheckpoint<K, V>;

    /// Rolls back all four arenas to a previous checkpoint.
    fn rollback(&mut self, cp: StoreCheckpoint<K, V>);

    /// Returns the total number of allocated items in each arena:
    /// `(nodes, slots, entries, members)`.
    ///
    /// Includes dead path copies; reflects true memory footprint.
    fn arena_len(&self) -> (usize, usize, usize, usize);
}
