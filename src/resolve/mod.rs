//! Hierarchical name resolution.
//!
//! A [`Resolver`] answers "which fully-qualified declarations could this
//! identifier denote?" against an environment ([`DeclOracle`]), a [`Scope`]
//! (current namespace plus `open` declarations) and, optionally, a
//! [`LocalContext`].
//!
//! The searches never fail: an empty list means "not found". The wrappers in
//! [`ensure`] turn empty or ambiguous results into [`ResolveError`]s.

pub mod ensure;
mod global;
pub mod local;
mod unresolve;

use rustc_hash::FxHashSet;
use serde::Deserialize;
use tracing::debug;

use crate::env::DeclOracle;
use crate::error::{ResolveError, Result};
use crate::name::Name;

pub use ensure::{ensure_no_overload, ensure_non_ambiguous};
pub use local::{FVarId, LocalContext, LocalDecl, LocalMatch, Resolution};

/// Resolution of one identifier: the declaration plus trailing components
/// that did not belong to it (field projections, outermost first).
pub type Resolved = (Name, Vec<String>);

/// An `open` directive in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenDecl {
    /// `open ns` or `open ns hiding a b`.
    Simple {
        /// Opened namespace.
        namespace: Name,
        /// Identifiers excluded from the open, as written.
        except: Vec<Name>,
    },
    /// `open ns renaming old → new` or `open ns (x)`.
    Renaming {
        /// Identifier introduced in scope.
        alias: Name,
        /// Declaration it stands for.
        target: Name,
    },
}

impl OpenDecl {
    /// `open ns` without exceptions.
    #[must_use]
    pub const fn simple(namespace: Name) -> Self {
        Self::Simple {
            namespace,
            except: Vec::new(),
        }
    }

    /// Renaming of `namespace ++ old_name` to `new_name`.
    #[must_use]
    pub fn renaming(namespace: &Name, new_name: Name, old_name: &Name) -> Self {
        Self::Renaming {
            alias: new_name,
            target: namespace.append(old_name),
        }
    }
}

#[derive(Debug, Clone)]
struct Section {
    header: Name,
    enclosing: Name,
    open_decls: usize,
}

/// Namespace context of the code being elaborated.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    /// Namespace the code lives in (`Foo.Bar` inside `namespace Foo.Bar`).
    pub current_namespace: Name,
    /// `open` directives, oldest first.
    pub open_decls: Vec<OpenDecl>,
    sections: Vec<Section>,
}

impl Scope {
    /// Root scope with nothing open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope inside `namespace`.
    #[must_use]
    pub fn in_namespace(namespace: Name) -> Self {
        Self {
            current_namespace: namespace,
            ..Self::default()
        }
    }

    /// Adds an `open` directive as is, without checking it.
    #[must_use]
    pub fn with_open(mut self, decl: OpenDecl) -> Self {
        self.open_decls.push(decl);
        self
    }

    /// `namespace header`: extends the current namespace.
    pub fn enter_namespace(&mut self, header: &Name) {
        self.sections.push(Section {
            header: header.clone(),
            enclosing: self.current_namespace.clone(),
            open_decls: self.open_decls.len(),
        });
        self.current_namespace = self.current_namespace.append_core(header);
    }

    /// `end`: leaves the innermost namespace, restoring the namespace it was
    /// entered from and dropping the `open`s made inside it. Returns its
    /// header, or `None` at the root.
    pub fn exit_namespace(&mut self) -> Option<Name> {
        let section = self.sections.pop()?;
        self.current_namespace = section.enclosing;
        self.open_decls.truncate(section.open_decls);
        Some(section.header)
    }

    /// `open ns`: opens every namespace `ns` resolves to.
    ///
    /// # Errors
    ///
    /// [`ResolveError::UnknownNamespace`] if `ns` resolves to nothing.
    pub fn open<E: DeclOracle + ?Sized>(&mut self, env: &E, ns: &Name) -> Result<()> {
        let namespaces = Resolver::new(env, self).resolve_namespace(ns);
        if namespaces.is_empty() {
            return Err(ResolveError::UnknownNamespace(ns.clone()));
        }
        debug!(%ns, opened = namespaces.len(), "open");
        self.open_decls.extend(namespaces.into_iter().map(OpenDecl::simple));
        Ok(())
    }

    /// `open ns hiding ids`.
    ///
    /// # Errors
    ///
    /// `ns` must resolve to a single namespace and every hidden identifier
    /// must exist in it.
    pub fn open_hiding<E: DeclOracle + ?Sized>(
        &mut self,
        env: &E,
        ns: &Name,
        hidden: &[Name],
    ) -> Result<()> {
        let namespace = Resolver::new(env, self).resolve_unique_namespace(ns)?;
        for id in hidden {
            require_decl(env, namespace.append(id))?;
        }
        self.open_decls.push(OpenDecl::Simple {
            namespace,
            except: hidden.to_vec(),
        });
        Ok(())
    }

    /// `open ns renaming old → new, …`.
    ///
    /// # Errors
    ///
    /// `ns` must resolve to a single namespace declaring every `old`.
    pub fn open_renaming<E: DeclOracle + ?Sized>(
        &mut self,
        env: &E,
        ns: &Name,
        renamings: &[(Name, Name)],
    ) -> Result<()> {
        let namespace = Resolver::new(env, self).resolve_unique_namespace(ns)?;
        for (old_name, new_name) in renamings {
            let target = require_decl(env, namespace.append(old_name))?;
            self.open_decls.push(OpenDecl::Renaming {
                alias: new_name.clone(),
                target,
            });
        }
        Ok(())
    }

    /// `open ns (ids)`: brings only `ids` into scope.
    ///
    /// # Errors
    ///
    /// `ns` must resolve to a single namespace declaring every id.
    pub fn open_only<E: DeclOracle + ?Sized>(
        &mut self,
        env: &E,
        ns: &Name,
        ids: &[Name],
    ) -> Result<()> {
        let namespace = Resolver::new(env, self).resolve_unique_namespace(ns)?;
        for id in ids {
            let target = require_decl(env, namespace.append(id))?;
            self.open_decls.push(OpenDecl::Renaming {
                alias: id.clone(),
                target,
            });
        }
        Ok(())
    }
}

fn require_decl<E: DeclOracle + ?Sized>(env: &E, name: Name) -> Result<Name> {
    if env.contains_decl_or_reserved(&name) {
        Ok(name)
    } else {
        Err(ResolveError::UnknownConstant(name))
    }
}

/// Options of [`Resolver::unresolve_name_global`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UnresolveOptions {
    /// Print fully-qualified names (prefixing `_root_` where needed).
    pub full_names: bool,
    /// Reject short forms whose first component is a local variable.
    pub avoid_locals: bool,
}

/// Options of [`Resolver::resolve_local_name`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocalResolveOptions {
    /// Let auxiliary locals (recursive-call stand-ins) match.
    pub allow_aux: bool,
}

/// Read-only view bundling everything resolution consults.
pub struct Resolver<'a, E: ?Sized> {
    env: &'a E,
    scope: &'a Scope,
    locals: Option<&'a LocalContext>,
}

impl<E: ?Sized> Clone for Resolver<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: ?Sized> Copy for Resolver<'_, E> {}

impl<'a, E: DeclOracle + ?Sized> Resolver<'a, E> {
    /// Resolver without local variables.
    #[must_use]
    pub const fn new(env: &'a E, scope: &'a Scope) -> Self {
        Self {
            env,
            scope,
            locals: None,
        }
    }

    /// Adds a local context.
    #[must_use]
    pub const fn with_locals(mut self, locals: &'a LocalContext) -> Self {
        self.locals = Some(locals);
        self
    }

    /// The environment consulted.
    #[must_use]
    pub const fn env(&self) -> &'a E {
        self.env
    }

    /// The scope consulted.
    #[must_use]
    pub const fn scope(&self) -> &'a Scope {
        self.scope
    }
}

/// Drops repeated names, keeping the first occurrence.
fn erase_dups(names: Vec<Name>) -> Vec<Name> {
    let mut seen = FxHashSet::default();
    names.into_iter().filter(|name| seen.insert(name.clone())).collect()
}
