//! Lookup: traverses the trie to find a key.

use safe_bump::Idx;

use crate::node::{self, Node, Slot};
use crate::store::TrieStore;

/// Searches for `key` in the subtree rooted at `node_idx`.
///
/// Returns a reference to the value if found.
pub fn find_recursive<'a, K, V, S>(
    store: &'a S,
    node_idx: Idx<Node<K, V>>,
    hash: u64,
    key: &K,
    depth: u32,
) -> Option<&'a V>
where
    K: Eq + 'a,
    V: 'a,
    S: TrieStore<K, V>,
{
    match *store.get_node(node_idx) {
        Node::Entries { slots } => {
            let pos = node::fragment(hash, depth);
            match *store.get_slot(node::offset(slots, pos)) {
                Slot::Empty => None,
                Slot::Entry(entry_idx) => {
                    let entry = store.get_entry(entry_idx);
                    if entry.hash == hash && entry.key == *key {
                        Some(&entry.value)
                    } else {
                        None
                    }
                }
                Slot::Node(child) => find_recursive(store, child, hash, key, depth + 1),
            }
        }
        Node::Collision { members, len } => {
            // Linear search through the bucket.
            for i in 0..len {
                let entry = store.get_entry(*store.get_member(node::offset(members, i)));
                if entry.hash == hash && entry.key == *key {
                    return Some(&entry.value);
                }
            }
            None
        }
    }
}
