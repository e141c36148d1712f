//! Registry of route identifiers.
//!
//! The `RouteRegistry` maps every route identifier a handler owns to the erased
//! route type (used for decoding) and the handler (used for navigation).

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{RegistryError, RegistryResult};
use crate::handler::RouteHandler;
use crate::route::{AnyRouteType, DynRoute};

#[derive(Clone)]
struct RouteEntry {
    route_type: AnyRouteType,
    handler: Rc<dyn RouteHandler>,
}

/// Identifier table from route identifiers to their type and handler.
///
/// Registration is last-write-wins: a handler declaring an identifier that is
/// already registered silently takes it over.
///
/// # Example
///
/// ```rust
/// # use router_service::{AnyRouteType, DependenciesInitializer, DynRoute, Feature, FeatureType, Route, RouteHandler, Screen};
/// # use serde::Deserialize;
/// # use std::any::Any;
/// # #[derive(Debug, Deserialize)]
/// # struct Home {}
/// # impl Route for Home {}
/// # struct HomeFeature;
/// # impl Feature for HomeFeature {
/// #     type Dependencies = ();
/// #     fn dependencies_initializer() -> DependenciesInitializer { DependenciesInitializer::new(|| ()) }
/// #     fn new(_: ()) -> Self { Self }
/// #     fn build(&self, _: Option<&dyn DynRoute>) -> Box<dyn Screen> { unimplemented!() }
/// # }
/// # #[derive(Debug)]
/// # struct HomeHandler;
/// # impl RouteHandler for HomeHandler {
/// #     fn routes(&self) -> Vec<AnyRouteType> { vec![AnyRouteType::of::<Home>()] }
/// #     fn destination(&self, _: &dyn DynRoute, _: &dyn Screen) -> FeatureType { FeatureType::of::<HomeFeature>() }
/// #     fn as_any(&self) -> &dyn Any { self }
/// # }
/// use router_service::RouteRegistry;
/// use std::rc::Rc;
///
/// let mut registry = RouteRegistry::new();
/// registry.register(Rc::new(HomeHandler));
///
/// assert!(registry.contains("Home"));
/// assert!(registry.lookup(&Home {}).is_some());
/// ```
#[derive(Default)]
pub struct RouteRegistry {
    routes: HashMap<String, RouteEntry>,
    ordered: Vec<String>,
}

impl RouteRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every route identifier `handler` owns.
    pub fn register(&mut self, handler: Rc<dyn RouteHandler>) {
        for route_type in handler.routes() {
            self.insert(route_type, handler.clone());
        }
    }

    /// Register a handler, returning an error if any of its identifiers is taken.
    ///
    /// Nothing is registered when an error is returned.
    pub fn register_unique(&mut self, handler: Rc<dyn RouteHandler>) -> RegistryResult<()> {
        let route_types = handler.routes();
        if let Some(taken) = route_types
            .iter()
            .find(|route_type| self.contains(route_type.identifier()))
        {
            return Err(RegistryError::AlreadyRegistered(
                taken.identifier().to_string(),
            ));
        }
        for route_type in route_types {
            self.insert(route_type, handler.clone());
        }
        Ok(())
    }

    fn insert(&mut self, route_type: AnyRouteType, handler: Rc<dyn RouteHandler>) {
        let identifier = route_type.identifier().to_string();
        tracing::debug!(route = %identifier, handler = handler.name(), "registered route");
        if !self.routes.contains_key(&identifier) {
            self.ordered.push(identifier.clone());
        }
        self.routes.insert(
            identifier,
            RouteEntry {
                route_type,
                handler,
            },
        );
    }

    /// The handler owning `identifier`.
    pub fn handler(&self, identifier: &str) -> Option<Rc<dyn RouteHandler>> {
        self.routes.get(identifier).map(|entry| entry.handler.clone())
    }

    /// The handler owning the runtime identifier of `route`.
    pub fn lookup(&self, route: &dyn DynRoute) -> Option<Rc<dyn RouteHandler>> {
        self.handler(route.route_identifier())
    }

    /// The erased route type registered for `identifier`.
    pub fn route_type(&self, identifier: &str) -> Option<AnyRouteType> {
        self.routes.get(identifier).map(|entry| entry.route_type)
    }

    /// Check if `identifier` is registered.
    pub fn contains(&self, identifier: &str) -> bool {
        self.routes.contains_key(identifier)
    }

    /// Remove an identifier.
    pub fn remove(&mut self, identifier: &str) -> Option<Rc<dyn RouteHandler>> {
        self.ordered.retain(|registered| registered != identifier);
        self.routes.remove(identifier).map(|entry| entry.handler)
    }

    /// Registered identifiers in first-registration order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.ordered.iter().map(|s| s.as_str()).collect()
    }

    /// Get the number of registered identifiers.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Clear all identifiers from the registry.
    pub fn clear(&mut self) {
        self.routes.clear();
        self.ordered.clear();
    }
}

impl fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.ordered.iter().filter_map(|identifier| {
                self.routes
                    .get(identifier)
                    .map(|entry| (identifier, entry.handler.name()))
            }))
            .finish()
    }
}
