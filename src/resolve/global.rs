//! Global (declaration) resolution and namespace resolution.

use tracing::{debug, trace};

use crate::env::{DeclOracle, get_aliases};
use crate::error::{ResolveError, Result};
use crate::name::private::mk_private_name;
use crate::name::{MacroScopesView, Name, NamePart};
use crate::resolve::{OpenDecl, Resolved, Resolver, erase_dups};

impl<E: DeclOracle + ?Sized> Resolver<'_, E> {
    /// Every declaration `id` may denote, each paired with the trailing
    /// components left over as field projections.
    ///
    /// Trailing string components are stripped one by one until some level
    /// resolves; macro scopes of `id` stay attached to the remaining name.
    /// A numeric component or the anonymous name ends the search with
    /// nothing.
    #[must_use]
    pub fn resolve_global_name(&self, id: &Name) -> Vec<Resolved> {
        let view = id.extract_macro_scopes();
        let mut base = view.name.clone();
        let mut projections: Vec<String> = Vec::new();

        while let Some(field) = base.last_string().map(str::to_owned) {
            let candidate = MacroScopesView {
                name: base.clone(),
                ..view.clone()
            }
            .review();
            let resolved = self.resolve_level(&candidate);
            if !resolved.is_empty() {
                debug!(
                    %id,
                    results = resolved.len(),
                    projections = projections.len(),
                    "resolved global name"
                );
                return resolved
                    .into_iter()
                    .map(|name| (name, projections.clone()))
                    .collect();
            }
            trace!(%candidate, %field, "no declaration, trying as projection");
            projections.insert(0, field);
            base = base.prefix();
        }
        Vec::new()
    }

    /// Namespaces `id` may refer to: the first hit walking up the current
    /// namespace, then every plain `open` that has `id` as a sub-namespace.
    ///
    /// # Panics
    ///
    /// If the current namespace has a numeric component.
    #[must_use]
    pub fn resolve_namespace(&self, id: &Name) -> Vec<Name> {
        let stripped = id.strip_root_namespace();
        if stripped != *id {
            return if self.env.is_namespace(&stripped) {
                vec![stripped]
            } else {
                Vec::new()
            };
        }

        let mut found: Vec<Name> = self.namespace_using_scope(id).into_iter().collect();
        for decl in &self.scope.open_decls {
            if let OpenDecl::Simple { namespace, except } = decl {
                let candidate = namespace.append(id);
                if except.is_empty() && self.env.is_namespace(&candidate) {
                    found.push(candidate);
                }
            }
        }
        erase_dups(found)
    }

    /// Like [`resolve_namespace`](Self::resolve_namespace), but exactly one
    /// namespace must match.
    ///
    /// # Errors
    ///
    /// [`ResolveError::UnknownNamespace`] or
    /// [`ResolveError::AmbiguousNamespace`].
    pub fn resolve_unique_namespace(&self, id: &Name) -> Result<Name> {
        let mut found = self.resolve_namespace(id);
        match found.len() {
            0 => Err(ResolveError::UnknownNamespace(id.clone())),
            1 => Ok(found.remove(0)),
            _ => Err(ResolveError::AmbiguousNamespace {
                id: id.clone(),
                candidates: found,
            }),
        }
    }

    fn namespace_using_scope(&self, id: &Name) -> Option<Name> {
        let mut ns = self.scope.current_namespace.clone();
        loop {
            match ns.last() {
                None => return self.env.is_namespace(id).then(|| id.clone()),
                Some(NamePart::Num(_)) => {
                    unreachable!("numeric component in current namespace `{ns}`")
                }
                Some(NamePart::Str(_)) => {}
            }
            let candidate = ns.append(id);
            if self.env.is_namespace(&candidate) {
                return Some(candidate);
            }
            ns = ns.prefix();
        }
    }

    /// Candidates for one stripping level of `id`.
    fn resolve_level(&self, id: &Name) -> Vec<Name> {
        let using = self.resolve_using_namespace(id);
        if !using.is_empty() {
            return erase_dups(using);
        }
        if let Some(exact) = self.resolve_exact(id) {
            return vec![exact];
        }

        let mut resolved = get_aliases(self.env, id, id.is_atomic());
        let private = mk_private_name(self.env.main_module(), id);
        if self.env.contains_decl_or_reserved(&private) {
            resolved.push(private);
        }
        if self.env.contains_decl_or_reserved(id) {
            resolved.push(id.clone());
        }
        self.resolve_open_decls(id, &mut resolved);
        erase_dups(resolved)
    }

    /// First ancestor of the current namespace under which `id` resolves.
    fn resolve_using_namespace(&self, id: &Name) -> Vec<Name> {
        let mut ns = self.scope.current_namespace.clone();
        while ns.last_string().is_some() {
            let resolved = self.resolve_qualified_name(&ns, id);
            if !resolved.is_empty() {
                return resolved;
            }
            ns = ns.prefix();
        }
        Vec::new()
    }

    /// `ns ++ id` (or its private form) plus aliases named `ns ++ id`.
    ///
    /// Protected declarations and protected alias targets are not reachable
    /// through an atomic `id`.
    fn resolve_qualified_name(&self, ns: &Name, id: &Name) -> Vec<Name> {
        let resolved_id = ns.append(id);
        let aliases = get_aliases(self.env, &resolved_id, id.is_atomic());
        let head = if self.env.contains_decl_or_reserved(&resolved_id)
            && (!id.is_atomic() || !self.env.is_protected(&resolved_id))
        {
            Some(resolved_id)
        } else {
            let private = mk_private_name(self.env.main_module(), &resolved_id);
            self.env.contains_decl_or_reserved(&private).then_some(private)
        };
        head.into_iter().chain(aliases).collect()
    }

    /// `_root_.A.b` or `A.b` named directly, skipping namespaces and aliases.
    fn resolve_exact(&self, id: &Name) -> Option<Name> {
        if id.is_atomic() {
            return None;
        }
        let resolved_id = id.strip_root_namespace();
        if self.env.contains_decl_or_reserved(&resolved_id) {
            return Some(resolved_id);
        }
        let private = mk_private_name(self.env.main_module(), &resolved_id);
        self.env.contains_decl_or_reserved(&private).then_some(private)
    }

    fn resolve_open_decls(&self, id: &Name, resolved: &mut Vec<Name>) {
        for decl in &self.scope.open_decls {
            match decl {
                OpenDecl::Simple { namespace, except } => {
                    if !except.contains(id) {
                        resolved.extend(self.resolve_qualified_name(namespace, id));
                    }
                }
                OpenDecl::Renaming { alias, target } => {
                    if alias == id {
                        resolved.push(target.clone());
                    } else if alias.is_prefix_of(id) {
                        let candidate = id.replace_prefix(alias, target);
                        if self.env.contains_decl_or_reserved(&candidate) {
                            resolved.push(candidate);
                        }
                    }
                }
            }
        }
    }
}
