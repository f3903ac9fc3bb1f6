//! Arena-backed storage (single-threaded).

use safe_bump::{Arena, Idx};

use crate::node::{Entry, Node, Slot};
use crate::store::{StoreCheckpoint, TrieStore};

/// Storage backend using four [`Arena`]s.
pub struct TrieArena<K, V> {
    nodes: Arena<Node<K, V>>,
    slots: Arena<Slot<K, V>>,
    entries: Arena<Entry<K, V>>,
    members: Arena<Idx<Entry<K, V>>>,
}

impl<K, V> TrieArena<K, V> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            slots: Arena::new(),
            entries: Arena::new(),
            members: Arena::new(),
        }
    }
}

impl<K, V> Default for TrieArena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> TrieStore<K, V> for TrieArena<K, V> {
    fn alloc_node(&mut self, node: Node<K, V>) -> Idx<Node<K, V>> {
        self.nodes.alloc(node)
    }

    fn get_node(&self, idx: Idx<Node<K, V>>) -> &Node<K, V> {
        self.nodes.get(idx)
    }

    fn alloc_slots(
        &mut self,
        iter: impl IntoIterator<Item = Slot<K, V>>,
    ) -> Option<Idx<Slot<K, V>>> {
        self.slots.alloc_extend(iter)
    }

    fn get_slot(&self, idx: Idx<Slot<K, V>>) -> &Slot<K, V> {
        self.slots.get(idx)
    }

    fn alloc_entry(&mut self, entry: Entry<K, V>) -> Idx<Entry<K, V>> {
        self.entries.alloc(entry)
    }

    fn get_entry(&self, idx: Idx<Entry<K, V>>) -> &Entry<K, V> {
        self.entries.get(idx)
    }

    fn alloc_members(
        &mut self,
        iter: impl IntoIterator<Item = Idx<Entry<K, V>>>,
    ) -> Option<Idx<Idx<Entry<K, V>>>> {
        self.members.alloc_extend(iter)
    }

    fn get_member(&self, idx: Idx<Idx<Entry<K, V>>>) -> &Idx<Entry<K, V>> {
        self.members.get(idx)
    }

    fn checkpoint(&self) -> StoreCheckpoint<K, V> {
        StoreCheckpoint {
            nodes: self.nodes.checkpoint(),
            slots: self.slots.checkpoint(),
            entries: self.entries.checkpoint(),
            members: self.members.checkpoint(),
        }
    }

    fn rollback(&mut self, cp: StoreCheckpoint<K, V>) {
        self.nodes.rollback(cp.nodes);
        self.slots.rollback(cp.slots);
        self.entries.rollback(cp.entries);
        self.members.rollback(cp.members);
    }

    fn arena_len(&self) -> (usize, usize, usize, usize) {
        (
            self.nodes.len(),
            self.slots.len(),
            self.entries.len(),
            self.members.len(),
        )
    }
}
