//! Local variables and local-first resolution.

use tracing::{debug, trace};

use crate::env::DeclOracle;
use crate::name::{MacroScopesView, Name};
use crate::resolve::{LocalResolveOptions, Resolved, Resolver};

/// Identifier of a local variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FVarId(pub u64);

/// A local variable as seen by resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDecl {
    /// Identity of the variable.
    pub id: FVarId,
    /// Name the user wrote, possibly hygienic.
    pub user_name: Name,
    /// Auxiliary declaration (stand-in for a recursive call); only visible
    /// when explicitly allowed.
    pub aux: bool,
}

impl LocalDecl {
    /// Ordinary local variable.
    #[must_use]
    pub const fn new(id: FVarId, user_name: Name) -> Self {
        Self {
            id,
            user_name,
            aux: false,
        }
    }

    /// Auxiliary local.
    #[must_use]
    pub const fn aux(id: FVarId, user_name: Name) -> Self {
        Self {
            id,
            user_name,
            aux: true,
        }
    }
}

/// Nested binding frames, innermost last.
#[derive(Debug, Clone, Default)]
pub struct LocalContext {
    frames: Vec<Vec<LocalDecl>>,
}

impl LocalContext {
    /// Context without any frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new innermost frame.
    pub fn push_frame(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Closes the innermost frame, returning its declarations.
    pub fn pop_frame(&mut self) -> Option<Vec<LocalDecl>> {
        self.frames.pop()
    }

    /// Adds `decl` to the innermost frame, opening one if there is none.
    pub fn push_decl(&mut self, decl: LocalDecl) {
        match self.frames.last_mut() {
            Some(frame) => frame.push(decl),
            None => self.frames.push(vec![decl]),
        }
    }

    /// Returns `true` if some local is named exactly `name`.
    #[must_use]
    pub fn uses_user_name(&self, name: &Name) -> bool {
        self.decls().any(|decl| decl.user_name == *name)
    }

    /// All declarations, outermost frame first.
    pub fn decls(&self) -> impl Iterator<Item = &LocalDecl> {
        self.frames.iter().flatten()
    }

    /// Matches of `given` in the innermost frame having any.
    ///
    /// Exact hygienic matches are preferred; failing those, a local whose
    /// macro scopes are visible from `given` matches.
    fn find(&self, given: &MacroScopesView, skip_aux: bool) -> Vec<&LocalDecl> {
        let given_name = given.review();
        for frame in self.frames.iter().rev() {
            let exact: Vec<_> = eligible(frame, skip_aux)
                .filter(|decl| decl.user_name == given_name)
                .collect();
            if !exact.is_empty() {
                return exact;
            }
            let visible: Vec<_> = eligible(frame, skip_aux)
                .filter(|decl| {
                    decl.user_name.has_macro_scopes()
                        && decl.user_name.extract_macro_scopes().is_visible_from(given)
                })
                .collect();
            if !visible.is_empty() {
                return visible;
            }
        }
        Vec::new()
    }
}

/// Innermost declaration first.
fn eligible(frame: &[LocalDecl], skip_aux: bool) -> impl Iterator<Item = &LocalDecl> {
    frame.iter().rev().filter(move |decl| !(skip_aux && decl.aux))
}

/// Locals matched by one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalMatch<'a> {
    /// Every matching declaration of the frame, innermost first.
    pub decls: Vec<&'a LocalDecl>,
    /// Trailing components used as field projections.
    pub projections: Vec<String>,
}

/// Outcome of [`Resolver::resolve_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// A local variable shadows any global.
    Local(LocalMatch<'a>),
    /// Global candidates (possibly none).
    Global(Vec<Resolved>),
}

impl Resolution<'_> {
    /// Returns `true` if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Local(found) => found.decls.is_empty(),
            Self::Global(found) => found.is_empty(),
        }
    }
}

impl<'a, E: DeclOracle + ?Sized> Resolver<'a, E> {
    /// Local variables `id` may denote.
    ///
    /// Frames are searched innermost first and the first frame with a match
    /// wins. As with global names, trailing components are stripped into
    /// projections while nothing matches. Once a longer form of `id` names a
    /// global declaration, auxiliary locals no longer match shorter forms.
    #[must_use]
    pub fn resolve_local_name(
        &self,
        id: &Name,
        options: LocalResolveOptions,
    ) -> Option<LocalMatch<'a>> {
        let locals = self.locals?;
        let view = id.extract_macro_scopes();
        let mut base = view.name.clone();
        let mut projections: Vec<String> = Vec::new();
        let mut global_found = false;

        while !base.is_anonymous() {
            let given = MacroScopesView {
                name: base.clone(),
                ..view.clone()
            };
            let skip_aux = !options.allow_aux || global_found;
            if !global_found {
                global_found = self
                    .resolve_global_name(&given.review())
                    .iter()
                    .any(|(_, fields)| fields.is_empty());
            }

            let decls = locals.find(&given, skip_aux);
            if !decls.is_empty() {
                debug!(
                    %id,
                    matches = decls.len(),
                    projections = projections.len(),
                    "resolved local name"
                );
                return Some(LocalMatch { decls, projections });
            }

            let Some(field) = base.last_string().map(str::to_owned) else {
                break;
            };
            trace!(%base, %field, "no local, trying as projection");
            projections.insert(0, field);
            base = base.prefix();
        }
        None
    }

    /// Locals first; globals only when no local matches.
    #[must_use]
    pub fn resolve_name(&self, id: &Name, options: LocalResolveOptions) -> Resolution<'a> {
        match self.resolve_local_name(id, options) {
            Some(found) => Resolution::Local(found),
            None => Resolution::Global(self.resolve_global_name(id)),
        }
    }
}
