//! Macro scopes encoded in names.
//!
//! A hygienic identifier `x` introduced by macro expansion steps `3` and `7`
//! of module `Main` is spelled
//!
//! ```text
//! x._@.Main._hyg.3.7
//! ```
//!
//! Two identifiers denote the same binding only if their base names, main
//! modules and scope lists agree. [`MacroScopesView`] is the decoded form.

use std::sync::Arc;

use crate::name::{Name, NamePart};

/// Component separating the base name from the main module.
pub const SCOPES_MARKER: &str = "_@";

/// Component separating the main module from the scope list.
pub const HYGIENE_MARKER: &str = "_hyg";

/// A single macro expansion step.
pub type MacroScope = u64;

/// Decoded hygienic name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MacroScopesView {
    /// Base name without hygiene information.
    pub name: Name,
    /// Module whose elaboration produced the scopes.
    pub main_module: Name,
    /// Expansion steps, oldest first.
    pub scopes: Vec<MacroScope>,
}

impl MacroScopesView {
    /// Re-encodes the view as a name. A view without scopes is just its base
    /// name.
    #[must_use]
    pub fn review(&self) -> Name {
        if self.scopes.is_empty() {
            return self.name.clone();
        }
        let mut parts = self.name.parts().to_vec();
        parts.push(NamePart::Str(Arc::from(SCOPES_MARKER)));
        parts.extend(self.main_module.parts().iter().cloned());
        parts.push(NamePart::Str(Arc::from(HYGIENE_MARKER)));
        parts.extend(self.scopes.iter().map(|&s| NamePart::Num(s)));
        Name::from_parts(parts)
    }

    /// Returns `true` if `self` and `other` refer to the same base name in
    /// the same module and every scope of `self` also leads the scopes of
    /// `other` (an identifier produced deeper in the same expansion can see
    /// `self`).
    #[must_use]
    pub fn is_visible_from(&self, other: &Self) -> bool {
        self.name == other.name
            && self.main_module == other.main_module
            && other.scopes.starts_with(&self.scopes)
    }
}

impl Name {
    /// Returns `true` if the name carries macro scopes.
    #[must_use]
    pub fn has_macro_scopes(&self) -> bool {
        self.parts()
            .iter()
            .rev()
            .find(|part| !matches!(part, NamePart::Num(_)))
            .is_some_and(|part| part.is_str(HYGIENE_MARKER))
    }

    /// Decodes the hygiene information of the name.
    ///
    /// Names without scopes (or malformed ones lacking the `_@` marker) come
    /// back as a view with no scopes.
    #[must_use]
    pub fn extract_macro_scopes(&self) -> MacroScopesView {
        let plain = || MacroScopesView {
            name: self.clone(),
            main_module: Name::anonymous(),
            scopes: Vec::new(),
        };
        if !self.has_macro_scopes() {
            return plain();
        }

        let parts = self.parts();
        let scopes_start = parts
            .iter()
            .rposition(|part| !matches!(part, NamePart::Num(_)))
            .map_or(0, |i| i + 1);
        let hyg = scopes_start - 1;
        let Some(at) = parts[..hyg].iter().rposition(|part| part.is_str(SCOPES_MARKER)) else {
            return plain();
        };

        let scopes = parts[scopes_start..]
            .iter()
            .filter_map(|part| match part {
                NamePart::Num(n) => Some(*n),
                NamePart::Str(_) => None,
            })
            .collect();
        MacroScopesView {
            name: Name::from_parts(parts[..at].to_vec()),
            main_module: Name::from_parts(parts[at + 1..hyg].to_vec()),
            scopes,
        }
    }

    /// Drops hygiene information, leaving the base name.
    #[must_use]
    pub fn erase_macro_scopes(&self) -> Self {
        if self.has_macro_scopes() {
            self.extract_macro_scopes().name
        } else {
            self.clone()
        }
    }

    /// Adds the expansion step `scope` of `main_module` to the name.
    ///
    /// Scopes from another main module are kept in order and the name is
    /// re-attributed to `main_module`.
    #[must_use]
    pub fn add_macro_scope(&self, main_module: &Self, scope: MacroScope) -> Self {
        let mut view = self.extract_macro_scopes();
        view.main_module = main_module.clone();
        view.scopes.push(scope);
        view.review()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_has_no_scopes() {
        let name = Name::from("Foo.x");
        assert!(!name.has_macro_scopes());
        let view = name.extract_macro_scopes();
        assert_eq!(view.name, name);
        assert!(view.scopes.is_empty());
        assert_eq!(view.review(), name);
    }

    #[test]
    fn add_and_extract() {
        let main = Name::from("Main");
        let name = Name::mk_str("x").add_macro_scope(&main, 3).add_macro_scope(&main, 7);
        assert_eq!(name.to_string(), "x._@.Main._hyg.3.7");
        assert!(name.has_macro_scopes());

        let view = name.extract_macro_scopes();
        assert_eq!(view.name, Name::from("x"));
        assert_eq!(view.main_module, main);
        assert_eq!(view.scopes, vec![3, 7]);
        assert_eq!(view.review(), name);
        assert_eq!(name.erase_macro_scopes(), Name::from("x"));
    }

    #[test]
    fn append_keeps_scopes_last() {
        let main = Name::from("Main");
        let x = Name::mk_str("x").add_macro_scope(&main, 1);
        let full = Name::from("Foo").append(&x);
        assert_eq!(full.to_string(), "Foo.x._@.Main._hyg.1");

        let y = x.append(&Name::from("y"));
        assert_eq!(y.to_string(), "x.y._@.Main._hyg.1");
    }

    #[test]
    fn visibility_by_scope_prefix() {
        let main = Name::from("Main");
        let outer = Name::mk_str("x").add_macro_scope(&main, 1).extract_macro_scopes();
        let inner = Name::mk_str("x")
            .add_macro_scope(&main, 1)
            .add_macro_scope(&main, 2)
            .extract_macro_scopes();
        assert!(outer.is_visible_from(&inner));
        assert!(!inner.is_visible_from(&outer));
    }
}
