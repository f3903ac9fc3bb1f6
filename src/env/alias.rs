//! Alias table: `export`-style alternate names for declarations.
//!
//! One short alias may denote several fully-qualified declarations, so the
//! table maps `Name → Vec<Name>`. It is stored in a
//! [`PersistentHashMapSync`] so environments can be shared across threads;
//! the reverse direction is rebuilt on demand by folding over the map.

use std::fmt;

use tracing::trace;

use crate::env::DeclOracle;
use crate::map::PersistentHashMapSync;
use crate::name::Name;
use crate::Snapshot;

/// Persistent alias table.
pub struct AliasTable {
    map: PersistentHashMapSync<Name, Vec<Name>>,
}

impl AliasTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: PersistentHashMapSync::default(),
        }
    }

    /// Number of distinct aliases.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no alias is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Registers `alias → target`. The newest target comes first; repeating
    /// an existing pair changes nothing. Returns `true` if the table changed.
    pub fn add(&mut self, alias: Name, target: Name) -> bool {
        let targets = match self.map.find(&alias) {
            None => vec![target],
            Some(existing) if existing.contains(&target) => return false,
            Some(existing) => {
                let mut targets = Vec::with_capacity(existing.len() + 1);
                targets.push(target);
                targets.extend(existing.iter().cloned());
                targets
            }
        };
        trace!(%alias, targets = targets.len(), "alias added");
        self.map.insert(alias, targets);
        true
    }

    /// Targets of `alias`, newest first. Empty if unknown.
    #[must_use]
    pub fn get(&self, alias: &Name) -> &[Name] {
        self.map.find(alias).map_or(&[], Vec::as_slice)
    }

    /// Every alias that has `target` among its targets, shortest first.
    #[must_use]
    pub fn reverse(&self, target: &Name) -> Vec<Name> {
        let mut aliases = self.map.fold(Vec::new(), |mut acc, alias, targets| {
            if targets.contains(target) {
                acc.push(alias.clone());
            }
            acc
        });
        aliases.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        aliases
    }

    /// Handle to the current version of the table.
    #[must_use]
    pub const fn snapshot(&self) -> Snapshot<Name, Vec<Name>> {
        self.map.snapshot()
    }

    /// Returns to an earlier version (for example when a section that
    /// exported names is closed).
    pub const fn restore(&mut self, snapshot: Snapshot<Name, Vec<Name>>) {
        self.map.restore(snapshot);
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AliasTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliasTable")
            .field("len", &self.map.len())
            .finish_non_exhaustive()
    }
}

/// Targets of `alias`; with `skip_protected`, protected targets are dropped.
#[must_use]
pub fn get_aliases<E: DeclOracle + ?Sized>(env: &E, alias: &Name, skip_protected: bool) -> Vec<Name> {
    env.aliases()
        .get(alias)
        .iter()
        .filter(|target| !skip_protected || !env.is_protected(target))
        .cloned()
        .collect()
}

/// Aliases pointing at `target`.
#[must_use]
pub fn get_rev_aliases<E: DeclOracle + ?Sized>(env: &E, target: &Name) -> Vec<Name> {
    env.aliases().reverse(target)
}
