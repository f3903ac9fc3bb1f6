//! Error types for name resolution

use std::fmt;

use thiserror::Error;

use crate::name::Name;

/// Result type for resolution operations
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors raised by the consuming layer of name resolution.
///
/// The search itself never fails; these are produced by wrappers that decide
/// an empty or multi-element result is an error in their context. Variants
/// carry the offending name and candidate lists rather than a preformatted
/// message, so callers can render them their own way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No interpretation at all
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(Name),

    /// No interpretation without field projections
    #[error("unknown constant '{0}'")]
    UnknownConstant(Name),

    /// No namespace matches
    #[error("unknown namespace '{0}'")]
    UnknownNamespace(Name),

    /// Several declarations match
    #[error("ambiguous identifier '{id}', possible interpretations: {}", NameList(.candidates))]
    AmbiguousIdentifier {
        /// Identifier as written
        id: Name,
        /// Every fully-qualified interpretation, in resolution order
        candidates: Vec<Name>,
    },

    /// Several namespaces match
    #[error("ambiguous namespace '{id}', possible interpretations: {}", NameList(.candidates))]
    AmbiguousNamespace {
        /// Namespace as written
        id: Name,
        /// Every fully-qualified interpretation, in resolution order
        candidates: Vec<Name>,
    },

    /// Name already declared or reserved
    #[error("failed to declare '{0}' because it is a reserved name")]
    ReservedNameNotAvailable(Name),

    /// Registry mutated after initialization
    #[error("cannot register {0}: registry is sealed after initialization")]
    RegistrySealed(&'static str),
}

/// Renders `[A.foo, B.foo]`.
struct NameList<'a>(&'a [Name]);

impl fmt::Display for NameList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_message_lists_candidates() {
        let err = ResolveError::AmbiguousIdentifier {
            id: Name::from("foo"),
            candidates: vec![Name::from("A.foo"), Name::from("B.foo")],
        };
        assert_eq!(
            err.to_string(),
            "ambiguous identifier 'foo', possible interpretations: [A.foo, B.foo]"
        );
    }

    #[test]
    fn unknown_messages() {
        assert_eq!(
            ResolveError::UnknownConstant(Name::from("Foo.bar")).to_string(),
            "unknown constant 'Foo.bar'"
        );
        assert_eq!(
            ResolveError::UnknownNamespace(Name::from("Foo")).to_string(),
            "unknown namespace 'Foo'"
        );
    }
}
