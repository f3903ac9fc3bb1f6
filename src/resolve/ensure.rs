//! Turning candidate lists into errors.
//!
//! The searches report every interpretation; callers that need exactly one
//! go through these helpers.

use crate::env::DeclOracle;
use crate::error::{ResolveError, Result};
use crate::name::Name;
use crate::resolve::{Resolved, Resolver};

/// Exactly one candidate, or an error listing all of them.
///
/// # Errors
///
/// [`ResolveError::UnknownIdentifier`] for no candidate,
/// [`ResolveError::AmbiguousIdentifier`] for several.
pub fn ensure_no_overload(id: &Name, mut candidates: Vec<Name>) -> Result<Name> {
    match candidates.len() {
        0 => Err(ResolveError::UnknownIdentifier(id.clone())),
        1 => Ok(candidates.remove(0)),
        _ => Err(ResolveError::AmbiguousIdentifier {
            id: id.clone(),
            candidates,
        }),
    }
}

/// Exactly one resolution (projections included), or an error.
///
/// # Errors
///
/// As [`ensure_no_overload`].
pub fn ensure_non_ambiguous(id: &Name, mut resolutions: Vec<Resolved>) -> Result<Resolved> {
    match resolutions.len() {
        0 => Err(ResolveError::UnknownIdentifier(id.clone())),
        1 => Ok(resolutions.remove(0)),
        _ => Err(ResolveError::AmbiguousIdentifier {
            id: id.clone(),
            candidates: resolutions.into_iter().map(|(name, _)| name).collect(),
        }),
    }
}

impl<E: DeclOracle + ?Sized> Resolver<'_, E> {
    /// Declarations `id` names without any field projection.
    ///
    /// # Errors
    ///
    /// [`ResolveError::UnknownConstant`] if there is none.
    pub fn resolve_global_const(&self, id: &Name) -> Result<Vec<Name>> {
        let consts: Vec<Name> = self
            .resolve_global_name(id)
            .into_iter()
            .filter_map(|(name, fields)| fields.is_empty().then_some(name))
            .collect();
        if consts.is_empty() {
            return Err(ResolveError::UnknownConstant(id.clone()));
        }
        Ok(consts)
    }

    /// The single declaration `id` names.
    ///
    /// # Errors
    ///
    /// Unknown constant, or ambiguous identifier listing every candidate.
    pub fn resolve_global_const_no_overload(&self, id: &Name) -> Result<Name> {
        ensure_no_overload(id, self.resolve_global_const(id)?)
    }
}
