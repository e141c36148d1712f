//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits
//! for convenient glob imports.
//!
//! # Example
//!
//! ```rust
//! use router_service::prelude::*;
//! ```

// Configuration
pub use crate::config::{Config, RouterConfig};

// Routing
pub use crate::decoding::{AnyRoute, RouteDecodingContext};
pub use crate::handler::{RouteHandler, RouteHandlerExt};
pub use crate::route::{AnyRouteType, DynRoute, Route};
pub use crate::router::{Navigator, RouterBuilder, RouterService};

// Features and dependencies
pub use crate::dependency::Dependency;
pub use crate::feature::{Feature, FeatureType};
pub use crate::initializer::DependenciesInitializer;
pub use crate::store::{DependencyStore, Store, StoreExt};

// Presentation
pub use crate::presentation::{Completion, PresentationStyle, Presenter, Screen};

// Streams
pub use crate::stream::{EventStream, NavigationEvent};

// Errors
pub use crate::error::{NavigationFailure, RouterError, RouterResult};
pub use crate::failure::FailureHandler;
