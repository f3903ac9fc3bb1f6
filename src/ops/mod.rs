//! Recursive trie operations shared by every storage backend.

pub mod erase;
pub mod find;
pub mod fold;
pub mod insert;

use safe_bump::Idx;

use crate::node::{self, BRANCHING, Node, Slot};
use crate::store::TrieStore;

/// Allocates a fresh all-`Empty` entries node.
pub fn alloc_empty_entries<K, V, S: TrieStore<K, V>>(store: &mut S) -> Idx<Node<K, V>> {
    let slots = store
        .alloc_slots(std::iter::repeat_n(Slot::Empty, BRANCHING))
        .expect("entries block is never empty");
    store.alloc_node(Node::Entries { slots })
}

/// Copies the slot block at `start`, replacing position `at` with `slot`.
pub fn copy_slots_replacing<K, V, S: TrieStore<K, V>>(
    store: &mut S,
    start: Idx<Slot<K, V>>,
    at: usize,
    slot: Slot<K, V>,
) -> Idx<Slot<K, V>> {
    let mut out = Vec::with_capacity(BRANCHING);
    for i in 0..BRANCHING {
        if i == at {
            out.push(slot);
        } else {
            out.push(*store.get_slot(node::offset(start, i)));
        }
    }
    store.alloc_slots(out).expect("entries block is never empty")
}
