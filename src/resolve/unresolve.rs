//! Shortest unambiguous spelling of a declaration name.

use tracing::debug;

use crate::env::{DeclOracle, get_rev_aliases};
use crate::name::Name;
use crate::resolve::{Resolver, UnresolveOptions};

impl<E: DeclOracle + ?Sized> Resolver<'_, E> {
    /// Shortest identifier that resolves back to exactly `name` in this
    /// scope, or `name` itself if none does.
    ///
    /// Hygienic names are returned unchanged. Private names are shortened
    /// through their user-facing form. Candidates are suffixes of the
    /// reverse aliases of `name` and of `_root_ ++ name`, shortest first.
    #[must_use]
    pub fn unresolve_name_global(&self, name: &Name, options: UnresolveOptions) -> Name {
        if name.has_macro_scopes() {
            return name.clone();
        }
        let display = name.user_name();
        let rooted = Name::root_namespace().append_core(&display);

        if options.full_names {
            return if self.resolves_uniquely_to(&display, name) {
                display
            } else {
                rooted
            };
        }

        let mut initial = get_rev_aliases(self.env, name);
        initial.push(rooted);

        let mut best: Option<Name> = None;
        for start in &initial {
            if let Some(candidate) = self.shortest_round_trip(start, name, options) {
                if best.as_ref().is_none_or(|b| candidate.len() < b.len()) {
                    best = Some(candidate);
                }
            }
        }
        let short = best.unwrap_or_else(|| name.clone());
        debug!(%name, %short, "unresolved global name");
        short
    }

    fn shortest_round_trip(
        &self,
        start: &Name,
        target: &Name,
        options: UnresolveOptions,
    ) -> Option<Name> {
        let mut candidate = Name::anonymous();
        for component in start.components().rev() {
            candidate = component.append_core(&candidate);
            if options.avoid_locals && self.shadowed_by_local(&candidate) {
                continue;
            }
            if self.resolves_uniquely_to(&candidate, target) {
                return Some(candidate);
            }
        }
        None
    }

    fn shadowed_by_local(&self, candidate: &Name) -> bool {
        self.locals
            .is_some_and(|locals| locals.uses_user_name(&candidate.root()))
    }

    /// `candidate` resolves to `target` alone, without projections.
    fn resolves_uniquely_to(&self, candidate: &Name, target: &Name) -> bool {
        matches!(
            self.resolve_global_name(candidate).as_slice(),
            [(found, fields)] if found == target && fields.is_empty()
        )
    }
}
