//! Features: units of destination logic.
//!
//! A feature declares its dependency bundle, is constructed from it, decides whether
//! it is enabled, and builds the screen to present. Features are created once per
//! navigation and never reused.

use std::any::{type_name, TypeId};
use std::fmt;

use crate::error::{ResolutionError, ResolutionResult};
use crate::initializer::DependenciesInitializer;
use crate::presentation::Screen;
use crate::route::DynRoute;
use crate::store::Store;

/// A navigation destination.
///
/// # Example
///
/// ```rust
/// use router_service::{DependenciesInitializer, DynRoute, Feature, Screen};
/// use std::any::Any;
/// use std::rc::Rc;
///
/// struct Api;
///
/// #[derive(Debug)]
/// struct InboxScreen;
///
/// impl Screen for InboxScreen {
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// struct Inbox {
///     api: Rc<Api>,
/// }
///
/// impl Feature for Inbox {
///     type Dependencies = Rc<Api>;
///
///     fn dependencies_initializer() -> DependenciesInitializer {
///         DependenciesInitializer::single(|api: Rc<Api>| api)
///     }
///
///     fn new(api: Rc<Api>) -> Self {
///         Self { api }
///     }
///
///     fn build(&self, _route: Option<&dyn DynRoute>) -> Box<dyn Screen> {
///         Box::new(InboxScreen)
///     }
/// }
/// ```
pub trait Feature: 'static {
    /// The resolved dependency bundle this feature is constructed from.
    type Dependencies: 'static;

    /// Builder resolving [`Self::Dependencies`] from a store.
    fn dependencies_initializer() -> DependenciesInitializer;

    /// Construct the feature from its resolved dependencies.
    fn new(dependencies: Self::Dependencies) -> Self;

    /// Whether the feature may be presented. Enabled unless overridden.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Alternate feature presented when this one is disabled.
    fn fallback(&self, _route: &dyn DynRoute) -> Option<FeatureType> {
        None
    }

    /// Build the screen to present. `route` is `None` for a root screen.
    fn build(&self, route: Option<&dyn DynRoute>) -> Box<dyn Screen>;
}

/// Object-safe view of an instantiated feature.
pub(crate) trait FeatureInstance {
    fn is_enabled(&self) -> bool;
    fn fallback(&self, route: &dyn DynRoute) -> Option<FeatureType>;
    fn build(&self, route: Option<&dyn DynRoute>) -> Box<dyn Screen>;
}

impl<F: Feature> FeatureInstance for F {
    fn is_enabled(&self) -> bool {
        Feature::is_enabled(self)
    }

    fn fallback(&self, route: &dyn DynRoute) -> Option<FeatureType> {
        Feature::fallback(self, route)
    }

    fn build(&self, route: Option<&dyn DynRoute>) -> Box<dyn Screen> {
        Feature::build(self, route)
    }
}

type InstantiateFn = fn(&dyn Store) -> ResolutionResult<Box<dyn FeatureInstance>>;

/// A feature type, erased so handlers can return any feature.
#[derive(Clone, Copy)]
pub struct FeatureType {
    name: &'static str,
    type_id: TypeId,
    instantiate: InstantiateFn,
}

fn instantiate<F: Feature>(store: &dyn Store) -> ResolutionResult<Box<dyn FeatureInstance>> {
    let dependencies = F::dependencies_initializer()
        .build_as::<F::Dependencies>(store)
        .map_err(|error| match error {
            ResolutionError::DependenciesMismatch { expected, .. } => {
                ResolutionError::DependenciesMismatch {
                    feature: type_name::<F>(),
                    expected,
                }
            }
            other => other,
        })?;
    Ok(Box::new(F::new(dependencies)))
}

impl FeatureType {
    /// Erase feature type `F`.
    pub fn of<F: Feature>() -> Self {
        Self {
            name: type_name::<F>(),
            type_id: TypeId::of::<F>(),
            instantiate: instantiate::<F>,
        }
    }

    /// Full Rust type name of the feature.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check if this is feature type `F`.
    pub fn is<F: Feature>(&self) -> bool {
        self.type_id == TypeId::of::<F>()
    }

    /// Resolve the feature's dependencies and construct it.
    pub(crate) fn instantiate(&self, store: &dyn Store) -> ResolutionResult<Box<dyn FeatureInstance>> {
        (self.instantiate)(store)
    }
}

impl PartialEq for FeatureType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for FeatureType {}

impl fmt::Debug for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FeatureType").field(&self.name).finish()
    }
}
