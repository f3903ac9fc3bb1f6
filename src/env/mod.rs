//! Declaration environment consulted by name resolution.
//!
//! Resolution only needs a handful of yes/no questions about an immutable
//! environment snapshot; [`DeclOracle`] captures them. [`Environment`] is a
//! concrete in-memory implementation whose tables all live in persistent
//! hash maps, so one [`EnvSnapshot`] names a consistent past state.

pub mod alias;
pub mod registry;

use std::sync::Arc;

use tracing::debug;

use crate::error::{ResolveError, Result};
use crate::map::PersistentHashMapSync;
use crate::name::Name;
use crate::{InsertResult, Snapshot};

pub use alias::{AliasTable, get_aliases, get_rev_aliases};
pub use registry::ReservedNames;

/// Declaration/namespace existence test.
///
/// Implementations must be pure: the same query against the same snapshot
/// always gives the same answer.
pub trait DeclOracle {
    /// Is `name` a declaration?
    fn contains_decl(&self, name: &Name) -> bool;

    /// Is `name` reserved (known, but not declared yet)?
    fn is_reserved(&self, _name: &Name) -> bool {
        false
    }

    /// Is `name` declared or reserved?
    fn contains_decl_or_reserved(&self, name: &Name) -> bool {
        self.contains_decl(name) || self.is_reserved(name)
    }

    /// Is `name` a known namespace?
    fn is_namespace(&self, name: &Name) -> bool;

    /// Is `name` a protected declaration (never reachable through a single
    /// unqualified component)?
    fn is_protected(&self, name: &Name) -> bool;

    /// Module being elaborated; private names are mangled with it.
    fn main_module(&self) -> &Name;

    /// Registered aliases.
    fn aliases(&self) -> &AliasTable;
}

type NameSet = PersistentHashMapSync<Name, ()>;

/// In-memory environment.
#[derive(Debug)]
pub struct Environment {
    main_module: Name,
    decls: NameSet,
    namespaces: NameSet,
    protected: NameSet,
    aliases: AliasTable,
    reserved: Arc<ReservedNames>,
}

/// One version of every table of an [`Environment`].
///
/// Taken with [`Environment::snapshot`]; the main module and the reserved
/// registry are not versioned.
#[derive(Debug, Clone, Copy)]
pub struct EnvSnapshot {
    decls: Snapshot<Name, ()>,
    namespaces: Snapshot<Name, ()>,
    protected: Snapshot<Name, ()>,
    aliases: Snapshot<Name, Vec<Name>>,
}

impl Environment {
    /// Creates an empty environment for `main_module` with no reserved names.
    #[must_use]
    pub fn new(main_module: Name) -> Self {
        Self::with_reserved(main_module, ReservedNames::new().into_shared())
    }

    /// Creates an empty environment sharing a sealed reserved-name registry.
    #[must_use]
    pub fn with_reserved(main_module: Name, reserved: Arc<ReservedNames>) -> Self {
        Self {
            main_module,
            decls: NameSet::default(),
            namespaces: NameSet::default(),
            protected: NameSet::default(),
            aliases: AliasTable::new(),
            reserved,
        }
    }

    /// Switches the module being elaborated.
    pub fn set_main_module(&mut self, main_module: Name) {
        self.main_module = main_module;
    }

    /// Adds a declaration and registers its enclosing namespaces.
    ///
    /// For private names the namespaces of the user-facing name are
    /// registered (`_private.M.0.Foo.bar` registers `Foo`).
    pub fn add_decl(&mut self, name: Name) {
        self.register_namespace(&name.user_name().prefix());
        debug!(%name, "declaration added");
        self.decls.insert(name, ());
    }

    /// Adds a protected declaration.
    pub fn add_protected_decl(&mut self, name: Name) {
        self.protected.insert(name.clone(), ());
        self.add_decl(name);
    }

    /// Registers `ns` and every prefix of it as namespaces.
    pub fn register_namespace(&mut self, ns: &Name) {
        let mut ns = ns.clone();
        while !ns.is_anonymous()
            && self.namespaces.insert(ns.clone(), ()) == InsertResult::Inserted
        {
            ns = ns.prefix();
        }
    }

    /// Registers `alias` as an alternate name of `target` (`export`).
    pub fn add_alias(&mut self, alias: Name, target: Name) {
        self.aliases.add(alias, target);
    }

    /// Checks that `name` can still be declared.
    ///
    /// # Errors
    ///
    /// [`ResolveError::ReservedNameNotAvailable`] if `name` is already
    /// declared or reserved.
    pub fn ensure_reserved_name_available(&self, name: &Name) -> Result<()> {
        if self.contains_decl_or_reserved(name) {
            return Err(ResolveError::ReservedNameNotAvailable(name.clone()));
        }
        Ok(())
    }

    /// Number of declarations.
    #[must_use]
    pub const fn decl_count(&self) -> usize {
        self.decls.len()
    }

    /// Current version of declarations, namespaces, protected names and
    /// aliases.
    #[must_use]
    pub const fn snapshot(&self) -> EnvSnapshot {
        EnvSnapshot {
            decls: self.decls.snapshot(),
            namespaces: self.namespaces.snapshot(),
            protected: self.protected.snapshot(),
            aliases: self.aliases.snapshot(),
        }
    }

    /// Returns every table to the version `snapshot` names.
    ///
    /// `snapshot` must come from this environment.
    pub const fn restore(&mut self, snapshot: EnvSnapshot) {
        self.decls.restore(snapshot.decls);
        self.namespaces.restore(snapshot.namespaces);
        self.protected.restore(snapshot.protected);
        self.aliases.restore(snapshot.aliases);
    }
}

impl DeclOracle for Environment {
    fn contains_decl(&self, name: &Name) -> bool {
        self.decls.contains(name)
    }

    fn is_reserved(&self, name: &Name) -> bool {
        self.reserved.is_reserved(name)
    }

    fn is_namespace(&self, name: &Name) -> bool {
        self.namespaces.contains(name)
    }

    fn is_protected(&self, name: &Name) -> bool {
        self.protected.contains(name)
    }

    fn main_module(&self) -> &Name {
        &self.main_module
    }

    fn aliases(&self) -> &AliasTable {
        &self.aliases
    }
}
