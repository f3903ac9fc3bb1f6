//! Fold: depth-first visit of every entry exactly once.

use safe_bump::Idx;

use crate::node::{self, BRANCHING, Node, Slot};
use crate::store::TrieStore;

/// Folds `f` over every `(key, value)` in the subtree rooted at `node_idx`.
///
/// Slots are visited in position order and a subtree is visited completely
/// at its slot; collision members are visited in bucket order.
pub fn fold_recursive<'a, K, V, S, A, F>(
    store: &'a S,
    node_idx: Idx<Node<K, V>>,
    init: A,
    f: &mut F,
) -> A
where
    K: 'a,
    V: 'a,
    S: TrieStore<K, V>,
    F: FnMut(A, &'a K, &'a V) -> A,
{
    match *store.get_node(node_idx) {
        Node::Entries { slots } => {
            let mut acc = init;
            for i in 0..BRANCHING {
                acc = match *store.get_slot(node::offset(slots, i)) {
                    Slot::Empty => acc,
                    Slot::Entry(entry_idx) => {
                        let entry = store.get_entry(entry_idx);
                        f(acc, &entry.key, &entry.value)
                    }
                    Slot::Node(child) => fold_recursive(store, child, acc, f),
                };
            }
            acc
        }
        Node::Collision { members, len } => (0..len).fold(init, |acc, i| {
            let entry = store.get_entry(*store.get_member(node::offset(members, i)));
            f(acc, &entry.key, &entry.value)
        }),
    }
}
