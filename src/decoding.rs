//! Decoding of route strings into typed routes.
//!
//! A serialized payload can embed an opaque route reference as a plain string
//! (`"profile|{\"user_id\":7}"`). Deserializing it as [`AnyRoute`] resolves the string
//! polymorphically through a [`RouteDecodingContext`], usually the router itself.
//!
//! Two entry points exist:
//! - [`AnyRouteSeed`], a `DeserializeSeed` carrying the context explicitly;
//! - the `Deserialize` impl of `AnyRoute`, which consults the context installed for
//!   the current thread by [`with_decoding_context`]. This lets `AnyRoute` appear as a
//!   field of any `#[derive(Deserialize)]` type.

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use serde::de::{self, DeserializeSeed, Deserializer, Error as _, Visitor};
use serde::Deserialize;

use crate::error::{DecodingResult, RouteDecodingError};
use crate::registry::RouteRegistry;
use crate::route::DynRoute;
use crate::route_string::RouteString;

/// A decoded route paired with the wire string it came from.
///
/// The wire string is the value's identity: equality and hashing follow it.
#[derive(Debug)]
pub struct AnyRoute {
    value: Box<dyn DynRoute>,
    route_string: String,
}

impl AnyRoute {
    /// Pair a decoded value with its wire string.
    pub fn new(value: Box<dyn DynRoute>, route_string: impl Into<String>) -> Self {
        Self {
            value,
            route_string: route_string.into(),
        }
    }

    /// The decoded route.
    pub fn value(&self) -> &dyn DynRoute {
        self.value.as_ref()
    }

    /// Take the decoded route.
    pub fn into_value(self) -> Box<dyn DynRoute> {
        self.value
    }

    /// The original wire string.
    pub fn route_string(&self) -> &str {
        &self.route_string
    }

    /// Identity of this route: its wire string.
    pub fn id(&self) -> &str {
        &self.route_string
    }
}

impl PartialEq for AnyRoute {
    fn eq(&self, other: &Self) -> bool {
        self.route_string == other.route_string
    }
}

impl Eq for AnyRoute {}

impl Hash for AnyRoute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.route_string.hash(state);
    }
}

/// Something that can resolve a wire string into a typed route.
pub trait RouteDecodingContext {
    /// Parse `route_string`, find its registered route type and decode its parameters.
    fn decode_any_route(&self, route_string: &str) -> DecodingResult<AnyRoute>;
}

impl RouteDecodingContext for RouteRegistry {
    fn decode_any_route(&self, route_string: &str) -> DecodingResult<AnyRoute> {
        let parsed = RouteString::parse(route_string)?;

        let route_type = self
            .route_type(parsed.scheme())
            .ok_or_else(|| RouteDecodingError::UnregisteredRoute(parsed.scheme().to_string()))?;

        let value = route_type.decode(parsed.parameter_data())?;
        tracing::debug!(route = route_type.identifier(), "decoded route string");
        Ok(AnyRoute::new(value, parsed.original()))
    }
}

thread_local! {
    static CONTEXTS: RefCell<Vec<Rc<dyn RouteDecodingContext>>> = const { RefCell::new(Vec::new()) };
}

struct ContextGuard;

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CONTEXTS.with(|contexts| {
            contexts.borrow_mut().pop();
        });
    }
}

/// Run `f` with `context` installed for `AnyRoute` deserialization on this thread.
///
/// Scopes nest; the innermost context wins. The context is removed when `f`
/// returns or unwinds.
///
/// # Example
///
/// ```rust
/// use router_service::{decoding, AnyRoute, RouteRegistry};
/// use serde::Deserialize;
/// use std::rc::Rc;
///
/// #[derive(Deserialize)]
/// struct Notification {
///     destination: AnyRoute,
/// }
///
/// let registry = Rc::new(RouteRegistry::new());
/// let result = decoding::with_decoding_context(registry, || {
///     serde_json::from_str::<Notification>(r#"{"destination": "inbox|{}"}"#)
/// });
///
/// // Nothing is registered for "inbox".
/// assert!(result.is_err());
/// ```
pub fn with_decoding_context<R>(context: Rc<dyn RouteDecodingContext>, f: impl FnOnce() -> R) -> R {
    CONTEXTS.with(|contexts| contexts.borrow_mut().push(context));
    let _guard = ContextGuard;
    f()
}

fn current_context() -> Option<Rc<dyn RouteDecodingContext>> {
    CONTEXTS.with(|contexts| contexts.borrow().last().cloned())
}

struct RouteStringVisitor;

impl<'de> Visitor<'de> for RouteStringVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a route string of the form \"<scheme>|<json-object>\"")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
        Ok(value)
    }
}

/// Explicit-context decoding of a single route string value.
///
/// # Example
///
/// ```rust
/// use router_service::{AnyRouteSeed, RouteRegistry};
/// use serde::de::DeserializeSeed;
///
/// let registry = RouteRegistry::new();
/// let mut deserializer = serde_json::Deserializer::from_str(r#""home|{}""#);
///
/// let error = AnyRouteSeed::new(&registry).deserialize(&mut deserializer).unwrap_err();
/// assert!(error.to_string().contains("unregistered route: home"));
/// ```
pub struct AnyRouteSeed<'a> {
    context: &'a dyn RouteDecodingContext,
}

impl<'a> AnyRouteSeed<'a> {
    /// Decode against `context`.
    pub fn new(context: &'a dyn RouteDecodingContext) -> Self {
        Self { context }
    }
}

impl<'de, 'a> DeserializeSeed<'de> for AnyRouteSeed<'a> {
    type Value = AnyRoute;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<AnyRoute, D::Error> {
        let route_string = deserializer.deserialize_string(RouteStringVisitor)?;
        self.context
            .decode_any_route(&route_string)
            .map_err(D::Error::custom)
    }
}

impl<'de> Deserialize<'de> for AnyRoute {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let context = current_context().ok_or_else(|| {
            D::Error::custom("AnyRoute decoded without a route decoding context")
        })?;
        AnyRouteSeed::new(context.as_ref()).deserialize(deserializer)
    }
}
