//! Reserved-name registry.
//!
//! Predicates are registered while the process initializes; afterwards the
//! registry is sealed and shared read-only (`Arc<ReservedNames>`).

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{ResolveError, Result};
use crate::name::Name;

/// Predicate deciding whether a name is reserved.
pub type ReservedNamePredicate = Box<dyn Fn(&Name) -> bool + Send + Sync>;

/// Write-once registry of reserved-name predicates.
#[derive(Default)]
pub struct ReservedNames {
    predicates: Vec<ReservedNamePredicate>,
    sealed: bool,
}

impl ReservedNames {
    /// Creates an empty, unsealed registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate.
    ///
    /// # Errors
    ///
    /// [`ResolveError::RegistrySealed`] once the registry is sealed.
    pub fn register<F>(&mut self, predicate: F) -> Result<()>
    where
        F: Fn(&Name) -> bool + Send + Sync + 'static,
    {
        if self.sealed {
            return Err(ResolveError::RegistrySealed("reserved-name predicate"));
        }
        self.predicates.push(Box::new(predicate));
        Ok(())
    }

    /// Forbids further registration.
    pub fn seal(&mut self) {
        if !self.sealed {
            debug!(predicates = self.predicates.len(), "reserved-name registry sealed");
        }
        self.sealed = true;
    }

    /// Returns `true` once [`seal`](Self::seal) was called.
    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Seals the registry and wraps it for sharing.
    #[must_use]
    pub fn into_shared(mut self) -> Arc<Self> {
        self.seal();
        Arc::new(self)
    }

    /// Returns `true` if any predicate reserves `name`.
    #[must_use]
    pub fn is_reserved(&self, name: &Name) -> bool {
        self.predicates.iter().any(|p| p(name))
    }
}

impl fmt::Debug for ReservedNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReservedNames")
            .field("predicates", &self.predicates.len())
            .field("sealed", &self.sealed)
            .finish()
    }
}
