//! Error types for the router service.
//!
//! Two families live here. Decoding errors describe untrusted input (deep links,
//! persisted route strings) and are returned to the caller. Navigation failures
//! describe misconfigured wiring and are handed to the [`FailureHandler`](crate::FailureHandler).

use thiserror::Error;

/// Root error type for router service operations.
#[derive(Error, Debug)]
pub enum RouterError {
    /// Route decoding errors
    #[error("Route decoding error: {0}")]
    Decoding(#[from] RouteDecodingError),

    /// Registry errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Dependency resolution errors
    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// Invalid router configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Reasons a `"<scheme>|<json-object>"` wire string is rejected.
#[derive(Error, Debug)]
pub enum RouteStringError {
    /// The input was empty
    #[error("route string is empty")]
    Empty,

    /// No `|` separator was found
    #[error("route string has no '|' separator")]
    MissingSeparator,

    /// The separator was the first character
    #[error("route string has an empty scheme")]
    EmptyScheme,

    /// Nothing follows the separator
    #[error("route string has no parameter payload")]
    MissingPayload,

    /// The payload is valid JSON but not an object
    #[error("route parameters must be a JSON object")]
    NotAnObject,

    /// The payload is not valid JSON
    #[error("route parameters are not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),
}

/// Errors surfaced while turning a wire string into a typed route.
#[derive(Error, Debug)]
pub enum RouteDecodingError {
    /// The wire string itself is malformed
    #[error("failed to parse route string: {0}")]
    FailedToParseRouteString(#[from] RouteStringError),

    /// No route type is registered for the scheme
    #[error("unregistered route: {0}")]
    UnregisteredRoute(String),

    /// The parameters do not match the registered route type
    #[error("failed to decode parameters for route {identifier}: {source}")]
    Decode {
        identifier: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while resolving a dependency bundle from a store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// Nothing is registered for a requested dependency type
    #[error("missing dependency {dependency} required by {requested_by}")]
    MissingDependency {
        dependency: &'static str,
        requested_by: &'static str,
    },

    /// The initializer produced a bundle of a different type than the feature expects
    #[error("feature {feature} expected dependencies of type {expected}")]
    DependenciesMismatch {
        feature: &'static str,
        expected: &'static str,
    },
}

/// Errors that can occur in route registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A route identifier is already owned by a handler
    #[error("Route already registered: {0}")]
    AlreadyRegistered(String),
}

/// Configuration-class failures reported to the failure handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationFailure {
    /// No handler owns the route identifier
    #[error("no handler registered for route {identifier}")]
    HandlerMissing { identifier: String },

    /// A disabled feature offered no fallback
    #[error("feature {feature} is disabled and has no fallback for route {identifier}")]
    FallbackMissing {
        feature: &'static str,
        identifier: String,
    },

    /// A dependency could not be resolved
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A dependency slot was resolved twice
    #[error("attempted to resolve Dependency<{dependency}> twice")]
    DoubleResolution { dependency: &'static str },

    /// A dependency slot was read before being resolved
    #[error("attempted to use Dependency<{dependency}> without resolving it first")]
    Unresolved { dependency: &'static str },
}

/// Result type alias for route decoding.
pub type DecodingResult<T> = Result<T, RouteDecodingError>;

/// Result type alias for dependency resolution.
pub type ResolutionResult<T> = Result<T, ResolutionError>;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type alias for general router operations.
pub type RouterResult<T> = Result<T, RouterError>;
