//! # Router Service
//!
//! Route-driven navigation with type-keyed dependency injection.
//!
//! ## Overview
//!
//! Screens never construct each other. A caller asks the router to navigate to a
//! route value; the router finds the handler that owns the route, asks it for a
//! destination feature, resolves that feature's dependencies from the store, checks
//! whether the feature is enabled (falling back once if not) and hands the built
//! screen to the host's presenter.
//!
//! ## Pipeline
//!
//! ```text
//! route ──► RouteRegistry ──► RouteHandler ──► FeatureType
//!                                                  │
//!           DependencyStore ──► DependenciesInitializer
//!                                                  │
//!                               Feature::new ──► enabled? ──► build ──► Presenter
//!                                                  │
//!                                                  └─ fallback (one hop)
//! ```
//!
//! Routes also travel as text, `"<scheme>|<json-object>"`, and decode back into
//! typed values through the same registry (see [`decoding`]).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use router_service::prelude::*;
//!
//! let router = RouterBuilder::new(Rc::new(host_presenter))
//!     .with_handler(ProfileHandler)
//!     .build()?;
//!
//! router.register::<dyn Api, _>(|| Rc::new(HttpApi::new()));
//!
//! let root = router.navigation_root(FeatureType::of::<Home>());
//! router.navigate(&Profile { user_id: 7 }, root_screen, PresentationStyle::Push, true, None);
//! ```
//!
//! ## Threading
//!
//! Everything here is single-threaded (`Rc`, `RefCell`), matching UI-thread
//! navigation. Only the event stream is `Send`.

mod config;
mod dependency;
mod error;
mod failure;
mod feature;
mod handler;
mod initializer;
mod presentation;
mod registry;
mod route;
mod route_string;
mod router;
mod store;

pub mod decoding;
pub mod stream;

pub mod prelude;

// Re-export core types
pub use config::{Config, RouterConfig, DEFAULT_EVENT_BUFFER, MAX_EVENT_BUFFER};
pub use decoding::{with_decoding_context, AnyRoute, AnyRouteSeed, RouteDecodingContext};
pub use dependency::Dependency;
pub use error::{
    DecodingResult, NavigationFailure, RegistryError, RegistryResult, ResolutionError,
    ResolutionResult, RouteDecodingError, RouteStringError, RouterError, RouterResult,
};
pub use failure::FailureHandler;
pub use feature::{Feature, FeatureType};
pub use handler::{RouteHandler, RouteHandlerExt};
pub use initializer::{DependenciesInitializer, IntoInitializer};
pub use presentation::{
    completion_channel, Completion, ModalConfig, ModalPresentation, ModalTransition,
    PresentationStyle, Presenter, Screen,
};
pub use registry::RouteRegistry;
pub use route::{AnyRouteType, DynRoute, Route};
pub use route_string::{RouteString, SEPARATOR};
pub use router::{NavigationState, Navigator, RouterBuilder, RouterService};
pub use store::{CachePolicy, DependencyEntry, DependencyKey, DependencyStore, Store, StoreExt};
pub use stream::{create_stream, EventSender, EventStream, NavigationEvent, StreamBuilder};
