//! Key hashing and hash scrambling.
//!
//! Keys are hashed once with the standard hasher, then scrambled so that
//! low-entropy hash functions (sequential integers, short strings) still
//! spread across the low 35 bits consumed by the trie levels.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Computes the 64-bit hash of a value using the standard hasher.
#[must_use]
pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Folds the high half of `hash` into the bits used for trie indexing.
///
/// Each step is `h ^ (h >> k)`, which is a bijection on `u64`: distinct
/// inputs stay distinct, equal inputs stay equal.
#[inline]
#[must_use]
pub const fn scramble(hash: u64) -> u64 {
    let h = hash ^ (hash >> 32);
    let h = h ^ (h >> 17);
    h ^ (h >> 7)
}

/// Hashes and scrambles a key, producing the hash the trie is indexed by.
#[inline]
#[must_use]
pub fn trie_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    scramble(hash_one(value))
}
