//! Iterator types for persistent hash maps.

use safe_bump::Idx;

use crate::node::Node;
use crate::ops::fold::fold_recursive;
use crate::store::TrieStore;

/// Iterator over references to key-value pairs in a
/// [`PersistentHashMap`](crate::PersistentHashMap).
///
/// Yields entries in fold order (slot order, then bucket order), which is
/// unrelated to insertion order.
pub struct Iter<'a, K, V> {
    entries: Vec<(&'a K, &'a V)>,
    pos: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Creates an iterator by collecting all live entries of one version.
    pub fn new<S: TrieStore<K, V>>(store: &'a S, root: Idx<Node<K, V>>) -> Self {
        let entries = fold_recursive(store, root, Vec::new(), &mut |mut out, k, v| {
            out.push((k, v));
            out
        });
        Self { entries, pos: 0 }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.entries.get(self.pos).copied()?;
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
