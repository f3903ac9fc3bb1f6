//! Private-name mangling.
//!
//! A private declaration `helper` of module `Main` is stored as
//! `_private.Main.0.helper`. The mangled form cannot be written by users,
//! and only code elaborated inside `Main` reconstructs it when resolving
//! `helper`.

use crate::name::{Name, NamePart};

/// Leading component of every private name.
pub const PRIVATE_HEADER: &str = "_private";

/// Mangles `name` as a private name of `module`.
#[must_use]
pub fn mk_private_name(module: &Name, name: &Name) -> Name {
    Name::mk_str(PRIVATE_HEADER)
        .append_core(module)
        .num(0)
        .append(name)
}

impl Name {
    /// Returns `true` if the name was produced by [`mk_private_name`].
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.private_split().is_some()
    }

    /// The user-facing name of a private name (`_private.M.0.foo` → `foo`).
    #[must_use]
    pub fn private_to_user_name(&self) -> Option<Self> {
        self.private_split()
            .map(|at| Self::from_parts(self.parts()[at + 1..].to_vec()))
    }

    /// The module that declared a private name.
    #[must_use]
    pub fn private_module(&self) -> Option<Self> {
        self.private_split()
            .map(|at| Self::from_parts(self.parts()[1..at].to_vec()))
    }

    /// Returns the user-facing form for private names, the name itself
    /// otherwise.
    #[must_use]
    pub fn user_name(&self) -> Self {
        self.private_to_user_name().unwrap_or_else(|| self.clone())
    }

    /// Position of the `0` marker ending the private prefix.
    fn private_split(&self) -> Option<usize> {
        let parts = self.parts();
        if !parts.first()?.is_str(PRIVATE_HEADER) {
            return None;
        }
        let at = parts
            .iter()
            .skip(1)
            .position(|part| *part == NamePart::Num(0))?
            + 1;
        (at + 1 < parts.len()).then_some(at)
    }
}
