//! Late-bound dependency slots.
//!
//! A `Dependency<T>` is declared empty and resolved from a store exactly once,
//! for objects that cannot take their dependencies through a constructor.

use std::any::type_name;
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{NavigationFailure, ResolutionError};
use crate::failure::FailureHandler;
use crate::store::{Store, StoreExt};

/// A slot holding one resolved dependency.
///
/// Misuse (resolving twice, resolving something unregistered, reading before
/// resolving) goes to the slot's [`FailureHandler`].
///
/// # Example
///
/// ```rust
/// use router_service::{Dependency, DependencyStore, StoreExt};
/// use std::rc::Rc;
///
/// struct Analytics;
///
/// let store = DependencyStore::new();
/// store.register::<Analytics, _>(|| Rc::new(Analytics));
///
/// let analytics: Dependency<Analytics> = Dependency::new();
/// analytics.resolve(&store);
/// assert!(analytics.value().is_some());
/// ```
pub struct Dependency<T: ?Sized + 'static> {
    resolved: OnceCell<Rc<T>>,
    failure: FailureHandler,
}

impl<T: ?Sized + 'static> Dependency<T> {
    /// An unresolved slot reporting to the default failure handler.
    pub fn new() -> Self {
        Self::with_failure_handler(FailureHandler::default())
    }

    /// An unresolved slot reporting to `failure`.
    pub fn with_failure_handler(failure: FailureHandler) -> Self {
        Self {
            resolved: OnceCell::new(),
            failure,
        }
    }

    /// Resolve the slot from `store`.
    pub fn resolve(&self, store: &dyn Store) {
        if self.resolved.get().is_some() {
            self.failure.fail(NavigationFailure::DoubleResolution {
                dependency: type_name::<T>(),
            });
            return;
        }
        match store.get::<T>() {
            Some(value) => {
                let _ = self.resolved.set(value);
            }
            None => self.failure.fail(NavigationFailure::Resolution(
                ResolutionError::MissingDependency {
                    dependency: type_name::<T>(),
                    requested_by: type_name::<Self>(),
                },
            )),
        }
    }

    /// Whether the slot has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    /// The resolved value, reporting a failure when the slot is still empty.
    pub fn value(&self) -> Option<Rc<T>> {
        let value = self.resolved.get().cloned();
        if value.is_none() {
            self.failure.fail(NavigationFailure::Unresolved {
                dependency: type_name::<T>(),
            });
        }
        value
    }
}

impl<T: ?Sized + 'static> Default for Dependency<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> fmt::Debug for Dependency<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependency")
            .field("type", &type_name::<T>())
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
