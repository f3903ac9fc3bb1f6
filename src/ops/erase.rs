//! Erase: path-copy delete with single-entry inlining.

use safe_bump::Idx;

use crate::node::{self, BRANCHING, Entry, Node, Slot};
use crate::ops::copy_slots_replacing;
use crate::store::TrieStore;

/// Outcome of a recursive erase.
pub enum EraseOutcome<K, V> {
    /// Key was not found; tree unchanged.
    NotFound,
    /// Key was erased.
    Erased {
        /// New root of the modified subtree.
        node: Idx<Node<K, V>>,
    },
}

/// What a child subtree collapses to after an erase.
enum Collapse<K, V> {
    /// No entries left.
    Empty,
    /// Exactly one entry and no subtrees: inline it into the parent slot.
    Single(Idx<Entry<K, V>>),
    /// Keep the child as a subtree.
    Keep,
}

/// Erases `key` from the subtree rooted at `node_idx` via path copy.
pub fn erase_recursive<K, V, S>(
    store: &mut S,
    node_idx: Idx<Node<K, V>>,
    hash: u64,
    key: &K,
    depth: u32,
) -> EraseOutcome<K, V>
where
    K: Eq,
    S: TrieStore<K, V>,
{
    let node = *store.get_node(node_idx);
    match node {
        Node::Entries { slots } => erase_from_entries(store, slots, hash, key, depth),
        Node::Collision { members, len } => erase_from_collision(store, members, len, hash, key),
    }
}

// ---------------------------------------------------------------------------
// Entries node erase
// ---------------------------------------------------------------------------

fn erase_from_entries<K, V, S>(
    store: &mut S,
    slots: Idx<Slot<K, V>>,
    hash: u64,
    key: &K,
    depth: u32,
) -> EraseOutcome<K, V>
where
    K: Eq,
    S: TrieStore<K, V>,
{
    let pos = node::fragment(hash, depth);
    let current = *store.get_slot(node::offset(slots, pos));

    let replacement = match current {
        Slot::Empty => return EraseOutcome::NotFound,
        Slot::Entry(entry_idx) => {
            let entry = store.get_entry(entry_idx);
            if entry.hash != hash || entry.key != *key {
                return EraseOutcome::NotFound;
            }
            Slot::Empty
        }
        Slot::Node(child) => match erase_recursive(store, child, hash, key, depth + 1) {
            EraseOutcome::NotFound => return EraseOutcome::NotFound,
            EraseOutcome::Erased { node: new_child } => match collapse(store, new_child) {
                Collapse::Empty => Slot::Empty,
                Collapse::Single(entry_idx) => Slot::Entry(entry_idx),
                Collapse::Keep => Slot::Node(new_child),
            },
        },
    };

    let new_slots = copy_slots_replacing(store, slots, pos, replacement);
    EraseOutcome::Erased {
        node: store.alloc_node(Node::Entries { slots: new_slots }),
    }
}

/// Decides whether a child left behind by an erase should be inlined.
fn collapse<K, V, S: TrieStore<K, V>>(store: &S, node_idx: Idx<Node<K, V>>) -> Collapse<K, V> {
    match *store.get_node(node_idx) {
        Node::Entries { slots } => {
            let mut single = None;
            for i in 0..BRANCHING {
                match *store.get_slot(node::offset(slots, i)) {
                    Slot::Empty => {}
                    Slot::Node(_) => return Collapse::Keep,
                    Slot::Entry(entry_idx) => {
                        if single.is_some() {
                            return Collapse::Keep;
                        }
                        single = Some(entry_idx);
                    }
                }
            }
            single.map_or(Collapse::Empty, Collapse::Single)
        }
        Node::Collision { members, len: 1 } => Collapse::Single(*store.get_member(members)),
        Node::Collision { .. } => Collapse::Keep,
    }
}

// ---------------------------------------------------------------------------
// Collision node erase
// ---------------------------------------------------------------------------

fn erase_from_collision<K, V, S>(
    store: &mut S,
    members: Idx<Idx<Entry<K, V>>>,
    len: usize,
    hash: u64,
    key: &K,
) -> EraseOutcome<K, V>
where
    K: Eq,
    S: TrieStore<K, V>,
{
    let bucket: Vec<Idx<Entry<K, V>>> = (0..len)
        .map(|i| *store.get_member(node::offset(members, i)))
        .collect();

    let found = bucket.iter().position(|&idx| {
        let entry = store.get_entry(idx);
        entry.hash == hash && entry.key == *key
    });
    let Some(pos) = found else {
        return EraseOutcome::NotFound;
    };

    // A single remaining member is left for the parent to inline.
    let remaining: Vec<_> = bucket
        .into_iter()
        .enumerate()
        .filter_map(|(i, idx)| (i != pos).then_some(idx))
        .collect();
    let len = remaining.len();
    let members = store.alloc_members(remaining).expect("at least one remaining");
    EraseOutcome::Erased {
        node: store.alloc_node(Node::Collision { members, len }),
    }
}
