//! The navigation orchestrator.
//!
//! `RouterService` ties the pieces together: it owns the dependency store and the
//! route registry, and turns `navigate(route, from, style)` into
//! route → handler → feature → enabled/fallback → presenter.
//!
//! ```text
//! Resolving ──► HandlerMissing ──────────────────────────────► Failed
//!     │
//!     └──► HandlerFound ──► FeatureBuilt ──► Enabled ───────────► Presented
//!                                  │
//!                                  └──► Disabled ──► FallbackFound ──► Presented
//!                                           │
//!                                           └──► FallbackMissing ──► Failed
//! ```
//!
//! Configuration mistakes (missing handler, missing fallback, unresolvable
//! dependencies) never return an error: they go to the [`FailureHandler`].

use std::any::type_name;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::{Config, RouterConfig};
use crate::decoding::{self, AnyRoute, RouteDecodingContext};
use crate::dependency::Dependency;
use crate::error::{
    DecodingResult, NavigationFailure, ResolutionError, RouterError, RouterResult,
};
use crate::failure::FailureHandler;
use crate::feature::{FeatureInstance, FeatureType};
use crate::handler::RouteHandler;
use crate::presentation::{Completion, PresentationStyle, Presenter, Screen};
use crate::registry::RouteRegistry;
use crate::route::DynRoute;
use crate::store::{DependencyEntry, DependencyStore, Store, StoreExt};
use crate::stream::{EventSender, EventStream, NavigationEvent, StreamBuilder};

/// The router contract features depend on.
///
/// Every router registers itself in its own store under `dyn Navigator`, so a
/// feature can list `Rc<dyn Navigator>` among its dependencies.
pub trait Navigator: RouteDecodingContext {
    /// Navigate to `route` from `from`.
    fn navigate(
        &self,
        route: &dyn DynRoute,
        from: &dyn Screen,
        style: PresentationStyle,
        animated: bool,
        completion: Option<Completion>,
    );
}

/// Progress of a single navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    /// No navigation has run yet
    Idle,
    /// Looking up the handler for the route
    Resolving,
    /// A handler owns the route
    HandlerFound,
    /// No handler owns the route
    HandlerMissing,
    /// The destination feature was instantiated
    FeatureBuilt,
    /// The feature reported itself enabled
    Enabled,
    /// The feature reported itself disabled
    Disabled,
    /// The disabled feature named a fallback
    FallbackFound,
    /// The disabled feature has no fallback
    FallbackMissing,
    /// A screen was handed to the presenter
    Presented,
    /// The navigation stopped at the failure handler
    Failed,
}

/// Route-driven navigation façade.
///
/// # Example
///
/// ```rust
/// use router_service::prelude::*;
/// use std::any::Any;
/// use std::rc::Rc;
///
/// #[derive(Debug)]
/// struct Window;
///
/// impl Screen for Window {
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// struct Host;
///
/// impl Presenter for Host {
///     fn present(
///         &self,
///         _screen: Box<dyn Screen>,
///         _from: &dyn Screen,
///         _style: &PresentationStyle,
///         _animated: bool,
///         completion: Option<Completion>,
///     ) {
///         if let Some(completion) = completion {
///             completion();
///         }
///     }
/// }
///
/// struct Home;
///
/// impl Feature for Home {
///     type Dependencies = Rc<dyn Navigator>;
///
///     fn dependencies_initializer() -> DependenciesInitializer {
///         DependenciesInitializer::single(|navigator: Rc<dyn Navigator>| navigator)
///     }
///
///     fn new(_navigator: Rc<dyn Navigator>) -> Self {
///         Self
///     }
///
///     fn build(&self, _route: Option<&dyn DynRoute>) -> Box<dyn Screen> {
///         Box::new(Window)
///     }
/// }
///
/// let router = RouterService::new(Rc::new(Host));
/// let root = router.navigation_root(FeatureType::of::<Home>());
/// assert!(root.is_some());
/// ```
pub struct RouterService {
    store: Rc<dyn Store>,
    routes: RefCell<RouteRegistry>,
    presenter: Rc<dyn Presenter>,
    failure: FailureHandler,
    events: Option<EventSender<NavigationEvent>>,
    config: RouterConfig,
    state: Cell<NavigationState>,
}

impl RouterService {
    /// Create a router with a fresh store, the default failure handler and default config.
    pub fn new(presenter: Rc<dyn Presenter>) -> Rc<Self> {
        Self::assemble(RouterBuilder::new(presenter), None)
    }

    fn assemble(builder: RouterBuilder, events: Option<EventSender<NavigationEvent>>) -> Rc<Self> {
        let RouterBuilder {
            presenter,
            store,
            failure,
            config,
            handlers,
        } = builder;
        let store: Rc<dyn Store> = match store {
            Some(store) => store,
            None => Rc::new(DependencyStore::new()),
        };

        let mut routes = RouteRegistry::new();
        for handler in handlers {
            routes.register(handler);
        }

        Rc::new_cyclic(|router: &Weak<RouterService>| {
            let navigator: Weak<dyn Navigator> = router.clone();
            store.insert(DependencyEntry::weak_ref(navigator));

            RouterService {
                store,
                routes: RefCell::new(routes),
                presenter,
                failure,
                events,
                config,
                state: Cell::new(NavigationState::Idle),
            }
        })
    }

    /// Register a weakly cached dependency factory for `T`.
    pub fn register<T, F>(&self, factory: F)
    where
        T: ?Sized + 'static,
        F: Fn() -> Rc<T> + 'static,
    {
        self.store.register(factory);
    }

    /// Register a prepared dependency entry.
    pub fn register_entry(&self, entry: DependencyEntry) {
        self.store.insert(entry);
    }

    /// Register a route handler for every identifier it owns.
    pub fn register_handler(&self, handler: impl RouteHandler + 'static) {
        self.register_shared_handler(Rc::new(handler));
    }

    /// Register a shared route handler for every identifier it owns.
    pub fn register_shared_handler(&self, handler: Rc<dyn RouteHandler>) {
        self.routes.borrow_mut().register(handler);
    }

    /// Register a route handler, refusing identifiers another handler already owns.
    ///
    /// Nothing is registered when an error is returned.
    pub fn register_unique_handler(&self, handler: impl RouteHandler + 'static) -> RouterResult<()> {
        self.routes.borrow_mut().register_unique(Rc::new(handler))?;
        Ok(())
    }

    /// Look up `T` in the store, treating absence as an error.
    pub fn resolve<T: ?Sized + 'static>(&self) -> RouterResult<Rc<T>> {
        let dependency = self.store.get::<T>().ok_or(ResolutionError::MissingDependency {
            dependency: type_name::<T>(),
            requested_by: type_name::<Self>(),
        })?;
        Ok(dependency)
    }

    /// Decode `route_string` and navigate to the route it describes.
    ///
    /// Malformed or unregistered strings are returned as errors and nothing is
    /// presented; failures after decoding go to the failure handler as usual.
    pub fn open(
        &self,
        route_string: &str,
        from: &dyn Screen,
        style: PresentationStyle,
        animated: bool,
        completion: Option<Completion>,
    ) -> RouterResult<()> {
        let route = self.decode_any_route(route_string)?;
        self.navigate(route.value(), from, style, animated, completion);
        Ok(())
    }

    /// The handler responsible for `route`, if any.
    pub fn handler(&self, route: &dyn DynRoute) -> Option<Rc<dyn RouteHandler>> {
        self.routes.borrow().lookup(route)
    }

    /// Registered route identifiers in registration order.
    pub fn identifiers(&self) -> Vec<String> {
        self.routes
            .borrow()
            .identifiers()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// The dependency store.
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// The router's configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The handler receiving this router's configuration failures.
    pub fn failure_handler(&self) -> &FailureHandler {
        &self.failure
    }

    /// An unresolved slot for `T` reporting to this router's failure handler.
    pub fn dependency<T: ?Sized + 'static>(&self) -> Dependency<T> {
        Dependency::with_failure_handler(self.failure.clone())
    }

    /// State reached by the most recent navigation.
    pub fn last_state(&self) -> NavigationState {
        self.state.get()
    }

    /// Build the root screen of a navigation stack from `feature`.
    ///
    /// Runs the feature pipeline without a route: no handler lookup and no
    /// enabled check. Returns `None` after reporting a failure when the feature's
    /// dependencies cannot be resolved.
    pub fn navigation_root(&self, feature: FeatureType) -> Option<Box<dyn Screen>> {
        let _span = tracing::debug_span!("navigation_root", router = self.config.name()).entered();

        let instance = self.instantiate(feature, None)?;
        let screen = instance.build(None);
        tracing::debug!(feature = feature.name(), "built root screen");
        self.emit(NavigationEvent::RootBuilt {
            feature: feature.name(),
        });
        Some(screen)
    }

    /// Run `f` with this router installed as the `AnyRoute` decoding context.
    pub fn decoding_scope<R>(self: &Rc<Self>, f: impl FnOnce() -> R) -> R {
        decoding::with_decoding_context(self.clone(), f)
    }

    fn enter(&self, state: NavigationState) {
        if self.config.is_debug() {
            tracing::debug!(?state, "navigation state");
        } else {
            tracing::trace!(?state, "navigation state");
        }
        self.state.set(state);
    }

    fn fail(&self, identifier: Option<&str>, failure: NavigationFailure) {
        self.enter(NavigationState::Failed);
        self.emit(NavigationEvent::Failed {
            identifier: identifier.map(str::to_string),
            reason: failure.to_string(),
        });
        self.failure.fail(failure);
    }

    fn emit(&self, event: NavigationEvent) {
        let Some(events) = &self.events else {
            return;
        };
        // Nobody is listening any more.
        if events.is_closed() {
            return;
        }
        if let Err(event) = events.try_send(event) {
            tracing::warn!(?event, "navigation event dropped");
        }
    }

    fn instantiate(
        &self,
        feature: FeatureType,
        identifier: Option<&str>,
    ) -> Option<Box<dyn FeatureInstance>> {
        match feature.instantiate(self.store.as_ref()) {
            Ok(instance) => Some(instance),
            Err(error) => {
                self.fail(identifier, NavigationFailure::Resolution(error));
                None
            }
        }
    }
}

impl Navigator for RouterService {
    fn navigate(
        &self,
        route: &dyn DynRoute,
        from: &dyn Screen,
        style: PresentationStyle,
        animated: bool,
        completion: Option<Completion>,
    ) {
        let identifier = route.route_identifier();
        let _span =
            tracing::debug_span!("navigate", router = self.config.name(), route = identifier)
                .entered();
        self.enter(NavigationState::Resolving);

        let handler = self.routes.borrow().lookup(route);
        let Some(handler) = handler else {
            self.enter(NavigationState::HandlerMissing);
            self.fail(
                Some(identifier),
                NavigationFailure::HandlerMissing {
                    identifier: identifier.to_string(),
                },
            );
            return;
        };
        self.enter(NavigationState::HandlerFound);

        let destination = handler.destination(route, from);
        tracing::debug!(handler = handler.name(), feature = destination.name(), "resolved destination");

        let Some(feature) = self.instantiate(destination, Some(identifier)) else {
            return;
        };
        self.enter(NavigationState::FeatureBuilt);

        let (screen, presented, fallback) = if feature.is_enabled() {
            self.enter(NavigationState::Enabled);
            (feature.build(Some(route)), destination, false)
        } else {
            self.enter(NavigationState::Disabled);
            let Some(fallback_type) = feature.fallback(route) else {
                self.enter(NavigationState::FallbackMissing);
                self.fail(
                    Some(identifier),
                    NavigationFailure::FallbackMissing {
                        feature: destination.name(),
                        identifier: identifier.to_string(),
                    },
                );
                return;
            };
            self.enter(NavigationState::FallbackFound);
            tracing::debug!(fallback = fallback_type.name(), "feature disabled, using fallback");

            let Some(fallback_feature) = self.instantiate(fallback_type, Some(identifier)) else {
                return;
            };
            (fallback_feature.build(Some(route)), fallback_type, true)
        };

        if self.config.is_verbose() {
            tracing::info!(feature = presented.name(), style = style.label(), animated, fallback, "presenting");
        } else {
            tracing::debug!(feature = presented.name(), style = style.label(), animated, fallback, "presenting");
        }
        self.enter(NavigationState::Presented);
        self.emit(NavigationEvent::Presented {
            identifier: identifier.to_string(),
            feature: presented.name(),
            style: style.label(),
            fallback,
        });

        self.presenter
            .present(screen, from, &style, animated, completion);
    }
}

impl RouteDecodingContext for RouterService {
    fn decode_any_route(&self, route_string: &str) -> DecodingResult<AnyRoute> {
        self.routes.borrow().decode_any_route(route_string)
    }
}

impl fmt::Debug for RouterService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterService")
            .field("config", &self.config)
            .field("routes", &self.routes.borrow())
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}

/// Builder for wiring a [`RouterService`].
///
/// # Example
///
/// ```rust
/// use router_service::{Completion, PresentationStyle, Presenter, RouterBuilder, RouterConfig, Screen};
/// use std::rc::Rc;
///
/// struct Host;
///
/// impl Presenter for Host {
///     fn present(&self, _: Box<dyn Screen>, _: &dyn Screen, _: &PresentationStyle, _: bool, _: Option<Completion>) {}
/// }
///
/// let (router, _events) = RouterBuilder::new(Rc::new(Host))
///     .with_config(RouterConfig::new().with_name("main").with_event_buffer(16))
///     .build_with_events()
///     .unwrap();
///
/// assert_eq!(router.config().event_buffer, 16);
/// ```
pub struct RouterBuilder {
    presenter: Rc<dyn Presenter>,
    store: Option<Rc<dyn Store>>,
    failure: FailureHandler,
    config: RouterConfig,
    handlers: Vec<Rc<dyn RouteHandler>>,
}

impl RouterBuilder {
    /// Start wiring a router presenting through `presenter`.
    pub fn new(presenter: Rc<dyn Presenter>) -> Self {
        Self {
            presenter,
            store: None,
            failure: FailureHandler::default(),
            config: RouterConfig::default(),
            handlers: Vec::new(),
        }
    }

    /// Use `store` instead of a fresh [`DependencyStore`].
    pub fn with_store(mut self, store: Rc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the default (panicking) failure handler.
    pub fn with_failure_handler(mut self, failure: FailureHandler) -> Self {
        self.failure = failure;
        self
    }

    /// Set the router configuration.
    pub fn with_config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a route handler.
    pub fn with_handler(mut self, handler: impl RouteHandler + 'static) -> Self {
        self.handlers.push(Rc::new(handler));
        self
    }

    /// Build the router.
    pub fn build(self) -> RouterResult<Rc<RouterService>> {
        self.config.validate().map_err(RouterError::Config)?;
        Ok(RouterService::assemble(self, None))
    }

    /// Build the router together with a stream of its navigation events.
    pub fn build_with_events(self) -> RouterResult<(Rc<RouterService>, EventStream<NavigationEvent>)> {
        self.config.validate().map_err(RouterError::Config)?;
        let (sender, stream) = StreamBuilder::new()
            .buffer_size(self.config.event_buffer)
            .build();
        Ok((RouterService::assemble(self, Some(sender)), stream))
    }
}
