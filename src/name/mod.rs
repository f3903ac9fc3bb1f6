//! Hierarchical names.
//!
//! Names like `Nat.add`, `List.map` or `_private.Main.0.helper` are sequences
//! of string and numeric components. The anonymous name has no components.
//!
//! Hygiene information ([`hygiene`]) and private-name mangling ([`private`])
//! are both encoded inside ordinary names, so every name operation here is
//! purely structural unless stated otherwise.

pub mod hygiene;
pub mod private;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use hygiene::{MacroScope, MacroScopesView};

/// Prefix marking an explicitly root-qualified identifier (`_root_.Foo.bar`).
pub const ROOT_NAMESPACE: &str = "_root_";

/// One component of a [`Name`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NamePart {
    /// String component.
    Str(Arc<str>),
    /// Numeric component (macro scopes, private-name markers, generated names).
    Num(u64),
}

impl NamePart {
    /// Returns the string if this is a string component.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Num(_) => None,
        }
    }

    /// Returns `true` if this is the string component `s`.
    #[must_use]
    pub fn is_str(&self, s: &str) -> bool {
        self.as_str() == Some(s)
    }
}

/// String components that would not read back as themselves are written
/// as `«text»`, with `»` and `\` inside preceded by `\`.
fn needs_escape(s: &str) -> bool {
    s.is_empty() || s.contains(['.', '«']) || s.parse::<u64>().is_ok()
}

impl fmt::Display for NamePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) if needs_escape(s) => {
                f.write_str("«")?;
                for c in s.chars() {
                    if matches!(c, '»' | '\\') {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("»")
            }
            Self::Str(s) => f.write_str(s),
            Self::Num(n) => write!(f, "{n}"),
        }
    }
}

/// Hierarchical name.
///
/// Cloning is cheap: components are shared behind an `Arc`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    parts: Arc<[NamePart]>,
}

impl Name {
    /// The anonymous name (no components).
    #[must_use]
    pub fn anonymous() -> Self {
        Self::from_parts(Vec::new())
    }

    /// Builds a name from its components, outermost first.
    #[must_use]
    pub fn from_parts(parts: impl Into<Arc<[NamePart]>>) -> Self {
        Self {
            parts: parts.into(),
        }
    }

    /// Atomic name with a single string component.
    #[must_use]
    pub fn mk_str(s: impl AsRef<str>) -> Self {
        Self::from_parts(vec![NamePart::Str(Arc::from(s.as_ref()))])
    }

    /// The `_root_` marker as a name.
    #[must_use]
    pub fn root_namespace() -> Self {
        Self::mk_str(ROOT_NAMESPACE)
    }

    /// Components, outermost first.
    #[must_use]
    pub fn parts(&self) -> &[NamePart] {
        &self.parts
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` for the anonymous name.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns `true` for a single-component name.
    #[must_use]
    pub fn is_atomic(&self) -> bool {
        self.parts.len() == 1
    }

    /// Appends a string component.
    #[must_use]
    pub fn str(&self, s: impl AsRef<str>) -> Self {
        self.push(NamePart::Str(Arc::from(s.as_ref())))
    }

    /// Appends a numeric component.
    #[must_use]
    pub fn num(&self, n: u64) -> Self {
        self.push(NamePart::Num(n))
    }

    fn push(&self, part: NamePart) -> Self {
        let mut parts = self.parts.to_vec();
        parts.push(part);
        Self::from_parts(parts)
    }

    /// All components but the last (`A.b.c` → `A.b`). Anonymous stays anonymous.
    #[must_use]
    pub fn prefix(&self) -> Self {
        match self.parts.split_last() {
            Some((_, init)) => Self::from_parts(init.to_vec()),
            None => self.clone(),
        }
    }

    /// The first component as an atomic name (`A.b.c` → `A`).
    #[must_use]
    pub fn root(&self) -> Self {
        Self::from_parts(self.parts.iter().take(1).cloned().collect::<Vec<_>>())
    }

    /// The last component, if any.
    #[must_use]
    pub fn last(&self) -> Option<&NamePart> {
        self.parts.last()
    }

    /// The last component if it is a string.
    #[must_use]
    pub fn last_string(&self) -> Option<&str> {
        self.last().and_then(NamePart::as_str)
    }

    /// Each component as an atomic name, outermost first.
    pub fn components(&self) -> impl DoubleEndedIterator<Item = Self> + '_ {
        self.parts
            .iter()
            .map(|part| Self::from_parts(vec![part.clone()]))
    }

    /// Concatenates components, ignoring hygiene.
    #[must_use]
    pub fn append_core(&self, other: &Self) -> Self {
        if other.is_anonymous() {
            return self.clone();
        }
        if self.is_anonymous() {
            return other.clone();
        }
        let mut parts = self.parts.to_vec();
        parts.extend(other.parts.iter().cloned());
        Self::from_parts(parts)
    }

    /// Concatenates two names, keeping macro scopes at the end.
    ///
    /// If one operand is hygienic, its scopes are moved past the combined
    /// components (`ns ++ x._@.M._hyg.1` = `ns.x._@.M._hyg.1`). When both are
    /// hygienic, the scopes of `other` are dropped.
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        match (self.has_macro_scopes(), other.has_macro_scopes()) {
            (false, false) => self.append_core(other),
            (true, rhs) => {
                let mut view = self.extract_macro_scopes();
                let tail = if rhs { other.erase_macro_scopes() } else { other.clone() };
                view.name = view.name.append_core(&tail);
                view.review()
            }
            (false, true) => {
                let mut view = other.extract_macro_scopes();
                view.name = self.append_core(&view.name);
                view.review()
            }
        }
    }

    /// Returns `true` if every component of `self` starts `other`.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.parts.starts_with(&self.parts)
    }

    /// Replaces a leading `prefix` by `new_prefix`; other names are returned
    /// unchanged.
    #[must_use]
    pub fn replace_prefix(&self, prefix: &Self, new_prefix: &Self) -> Self {
        if prefix.is_anonymous() || !prefix.is_prefix_of(self) {
            return self.clone();
        }
        let rest = Self::from_parts(self.parts[prefix.len()..].to_vec());
        new_prefix.append_core(&rest)
    }

    /// Removes a leading `_root_` component, if present.
    #[must_use]
    pub fn strip_root_namespace(&self) -> Self {
        self.replace_prefix(&Self::root_namespace(), &Self::anonymous())
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl FromStr for Name {
    type Err = std::convert::Infallible;

    /// Parses dotted text as written by `Display`. Components made only of
    /// digits become numeric components, `«…»` quotes a string component
    /// verbatim, and the empty string is the anonymous name. An unterminated
    /// quote runs to the end of the input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::anonymous());
        }
        let mut parts = Vec::new();
        let mut text = String::new();
        let mut quoted = false;
        let mut in_quote = false;
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' if in_quote => text.extend(chars.next()),
                '»' if in_quote => in_quote = false,
                '«' if !in_quote => {
                    in_quote = true;
                    quoted = true;
                }
                '.' if !in_quote => {
                    parts.push(component(std::mem::take(&mut text), quoted));
                    quoted = false;
                }
                c => text.push(c),
            }
        }
        parts.push(component(text, quoted));
        Ok(Self::from_parts(parts))
    }
}

fn component(text: String, quoted: bool) -> NamePart {
    match text.parse::<u64>() {
        Ok(n) if !quoted => NamePart::Num(n),
        _ => NamePart::Str(Arc::from(text)),
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(name) => name,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_anonymous() {
            return f.write_str("[anonymous]");
        }
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{self}")
    }
}

// Names travel as dotted text, quoting components as `Display` does.

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_anonymous() {
            serializer.serialize_str("")
        } else {
            serializer.collect_str(self)
        }
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::from(text.as_str()))
    }
}
