//! HAMT node types and hash-chunk helpers.

use std::fmt;

use safe_bump::Idx;

/// Bits per trie level (5 → 32-way branching).
pub const BITS_PER_LEVEL: u32 = 5;

/// Number of slots in an entries node.
pub const BRANCHING: usize = 1 << BITS_PER_LEVEL;

/// Number of entries-node levels before collision nodes stop splitting
/// (7 levels × 5 bits = 35 hash bits).
pub const MAX_DEPTH: u32 = 7;

/// Collision node size at which a node above [`MAX_DEPTH`] is re-split
/// into an entries subtree.
pub const MAX_COLLISIONS: usize = 4;

/// Key-value pair with its precomputed (scrambled) hash.
pub struct Entry<K, V> {
    /// Scrambled 64-bit hash of the key.
    pub hash: u64,
    /// The key.
    pub key: K,
    /// The value.
    pub value: V,
}

/// One cell of an entries node.
pub enum Slot<K, V> {
    /// Nothing stored at this position.
    Empty,
    /// A single inline entry.
    Entry(Idx<Entry<K, V>>),
    /// A child subtree one level deeper.
    Node(Idx<Node<K, V>>),
}

/// HAMT node.
///
/// - [`Entries`](Self::Entries): a full block of [`BRANCHING`] slots
/// - [`Collision`](Self::Collision): linear bucket of entries whose hash
///   chunks coincided at the depth where they met
pub enum Node<K, V> {
    /// Fixed-size slot array.
    Entries {
        /// Index of the first of [`BRANCHING`] contiguous slots.
        slots: Idx<Slot<K, V>>,
    },
    /// Collision bucket.
    ///
    /// Invariant: `len >= 2`.
    Collision {
        /// Index of the first member in the members arena.
        members: Idx<Idx<Entry<K, V>>>,
        /// Number of members.
        len: usize,
    },
}

// ---------------------------------------------------------------------------
// Hash chunk helpers
// ---------------------------------------------------------------------------

/// Extracts the 5-bit hash chunk used at trie level `depth`.
#[inline]
#[must_use]
pub const fn fragment(hash: u64, depth: u32) -> usize {
    ((hash >> (depth * BITS_PER_LEVEL)) & 0x1F) as usize
}

/// Offsets a base index by `n` positions.
#[inline]
#[must_use]
pub const fn offset<T>(base: Idx<T>, n: usize) -> Idx<T> {
    Idx::from_raw(base.into_raw() + n)
}

// ---------------------------------------------------------------------------
// Manual trait impls to avoid false `K: Trait, V: Trait` bounds.
// Nodes and slots hold only indices, never K/V data.
// ---------------------------------------------------------------------------

impl<K, V> Clone for Slot<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Slot<K, V> {}

impl<K, V> Clone for Node<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Node<K, V> {}

impl<K, V> fmt::Debug for Slot<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Entry(idx) => write!(f, "Entry(#{})", idx.into_raw()),
            Self::Node(idx) => write!(f, "Node(#{})", idx.into_raw()),
        }
    }
}

impl<K, V> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entries { slots } => f
                .debug_struct("Entries")
                .field("slots", &slots.into_raw())
                .finish(),
            Self::Collision { members, len } => f
                .debug_struct("Collision")
                .field("members", &members.into_raw())
                .field("len", len)
                .finish(),
        }
    }
}
