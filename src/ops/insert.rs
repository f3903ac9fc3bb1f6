//! Insertion: path-copy insert with collision bucket splitting.

use safe_bump::Idx;
use tracing::trace;

use crate::node::{self, Entry, MAX_COLLISIONS, MAX_DEPTH, Node, Slot};
use crate::ops::{alloc_empty_entries, copy_slots_replacing};
use crate::store::TrieStore;

/// Outcome of a recursive insert.
pub struct InsertOutcome<K, V> {
    /// Index of the new (path-copied) root of the modified subtree.
    pub node: Idx<Node<K, V>>,
    /// `true` if a new key was inserted, `false` if an existing value was replaced.
    pub inserted: bool,
}

/// Inserts the already allocated entry `new` into the subtree rooted at
/// `node_idx`, which sits at trie level `depth`.
///
/// No node reachable from `node_idx` is modified; the returned subtree shares
/// every untouched node and entry with the input.
pub fn insert_recursive<K, V, S>(
    store: &mut S,
    node_idx: Idx<Node<K, V>>,
    new: Idx<Entry<K, V>>,
    depth: u32,
) -> InsertOutcome<K, V>
where
    K: Eq,
    S: TrieStore<K, V>,
{
    let node = *store.get_node(node_idx);
    match node {
        Node::Entries { slots } => insert_into_entries(store, slots, new, depth),
        Node::Collision { members, len } => insert_into_collision(store, members, len, new, depth),
    }
}

// ---------------------------------------------------------------------------
// Entries node insert
// ---------------------------------------------------------------------------

fn insert_into_entries<K, V, S>(
    store: &mut S,
    slots: Idx<Slot<K, V>>,
    new: Idx<Entry<K, V>>,
    depth: u32,
) -> InsertOutcome<K, V>
where
    K: Eq,
    S: TrieStore<K, V>,
{
    let hash = store.get_entry(new).hash;
    let pos = node::fragment(hash, depth);

    let current = *store.get_slot(node::offset(slots, pos));
    let (slot, inserted) = match current {
        Slot::Empty => (Slot::Entry(new), true),
        Slot::Entry(existing) if same_key(store, existing, new) => (Slot::Entry(new), false),
        Slot::Entry(existing) => {
            // Different key at the same position → two-entry bucket.
            let members = store
                .alloc_members([existing, new])
                .expect("two members");
            let bucket = store.alloc_node(Node::Collision { members, len: 2 });
            (Slot::Node(bucket), true)
        }
        Slot::Node(child) => {
            let outcome = insert_recursive(store, child, new, depth + 1);
            (Slot::Node(outcome.node), outcome.inserted)
        }
    };

    let new_slots = copy_slots_replacing(store, slots, pos, slot);
    InsertOutcome {
        node: store.alloc_node(Node::Entries { slots: new_slots }),
        inserted,
    }
}

// ---------------------------------------------------------------------------
// Collision node insert
// ---------------------------------------------------------------------------

fn insert_into_collision<K, V, S>(
    store: &mut S,
    members: Idx<Idx<Entry<K, V>>>,
    len: usize,
    new: Idx<Entry<K, V>>,
    depth: u32,
) -> InsertOutcome<K, V>
where
    K: Eq,
    S: TrieStore<K, V>,
{
    let mut bucket: Vec<Idx<Entry<K, V>>> = (0..len)
        .map(|i| *store.get_member(node::offset(members, i)))
        .collect();

    let found = {
        let view: &S = store;
        bucket.iter().position(|&e| same_key(view, e, new))
    };
    let inserted = match found {
        Some(pos) => {
            bucket[pos] = new;
            false
        }
        None => {
            bucket.push(new);
            true
        }
    };

    if depth >= MAX_DEPTH || bucket.len() < MAX_COLLISIONS {
        let len = bucket.len();
        let members = store.alloc_members(bucket).expect("non-empty");
        return InsertOutcome {
            node: store.alloc_node(Node::Collision { members, len }),
            inserted,
        };
    }

    // Bucket is full and hash bits remain → spread it over a fresh entries
    // node at this level. Entries are reused by index, never copied.
    trace!(depth, len = bucket.len(), "splitting collision node");
    let mut node_idx = alloc_empty_entries(store);
    for entry in bucket {
        node_idx = insert_recursive(store, node_idx, entry, depth).node;
    }
    InsertOutcome {
        node: node_idx,
        inserted,
    }
}

fn same_key<K: Eq, V, S: TrieStore<K, V>>(
    store: &S,
    a: Idx<Entry<K, V>>,
    b: Idx<Entry<K, V>>,
) -> bool {
    let a = store.get_entry(a);
    let b = store.get_entry(b);
    a.hash == b.hash && a.key == b.key
}
