//! Route handlers map route values to destination features.

use std::any::{type_name, Any};
use std::fmt::Debug;

use crate::feature::FeatureType;
use crate::presentation::Screen;
use crate::route::{AnyRouteType, DynRoute};

/// Owner of a set of route types.
///
/// # Example
///
/// ```rust
/// use router_service::{AnyRouteType, DynRoute, FeatureType, Route, RouteHandler, Screen};
/// # use router_service::{DependenciesInitializer, Feature};
/// use serde::Deserialize;
/// use std::any::Any;
///
/// #[derive(Debug, Deserialize)]
/// struct Settings {}
///
/// impl Route for Settings {}
///
/// # struct SettingsFeature;
/// # impl Feature for SettingsFeature {
/// #     type Dependencies = ();
/// #     fn dependencies_initializer() -> DependenciesInitializer { DependenciesInitializer::new(|| ()) }
/// #     fn new(_: ()) -> Self { Self }
/// #     fn build(&self, _: Option<&dyn DynRoute>) -> Box<dyn Screen> { unimplemented!() }
/// # }
/// #[derive(Debug)]
/// struct SettingsHandler;
///
/// impl RouteHandler for SettingsHandler {
///     fn routes(&self) -> Vec<AnyRouteType> {
///         vec![AnyRouteType::of::<Settings>()]
///     }
///
///     fn destination(&self, _route: &dyn DynRoute, _from: &dyn Screen) -> FeatureType {
///         FeatureType::of::<SettingsFeature>()
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
/// ```
pub trait RouteHandler: Debug {
    /// Route types this handler owns.
    fn routes(&self) -> Vec<AnyRouteType>;

    /// Choose the feature for `route`, requested from `from`.
    ///
    /// Expected to be a pure mapping; it may branch on the route's payload.
    fn destination(&self, route: &dyn DynRoute, from: &dyn Screen) -> FeatureType;

    /// Name used in logs.
    fn name(&self) -> &str {
        type_name::<Self>()
    }

    /// Downcast to concrete type for advanced usage.
    fn as_any(&self) -> &dyn Any;
}

/// Extension trait for handler type checking.
pub trait RouteHandlerExt: RouteHandler {
    /// Check if this handler is of type T.
    fn is<T: RouteHandler + 'static>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcast to type T.
    fn downcast_ref<T: RouteHandler + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl<H: RouteHandler + ?Sized> RouteHandlerExt for H {}
