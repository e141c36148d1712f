//! Route identity.
//!
//! A route is a decodable value describing a navigation destination. Every route
//! type carries a stable string identifier, by default its short type name, used as
//! the routing key and as the scheme of its wire form.

use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Debug};

use serde::de::DeserializeOwned;

use crate::error::{DecodingResult, RouteDecodingError};

/// A navigation destination plus its parameters.
///
/// Route types are decoded from the JSON payload of a route string, so a route
/// without parameters should be a braced struct (`struct Home {}`) to accept `{}`.
/// Add `#[serde(deny_unknown_fields)]` to reject payloads carrying extra fields.
///
/// # Example
///
/// ```rust
/// use router_service::Route;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct Profile {
///     user_id: u64,
/// }
///
/// impl Route for Profile {}
///
/// #[derive(Debug, Deserialize)]
/// struct Checkout {}
///
/// impl Route for Checkout {
///     fn identifier() -> &'static str {
///         "checkout_v2"
///     }
/// }
///
/// assert_eq!(Profile::identifier(), "Profile");
/// assert_eq!(Checkout::identifier(), "checkout_v2");
/// ```
pub trait Route: DeserializeOwned + Debug + 'static {
    /// Globally unique identifier of this route type.
    ///
    /// Collisions are not detected; the last handler registered for an identifier wins.
    fn identifier() -> &'static str {
        short_type_name::<Self>()
    }
}

/// Object-safe view of a [`Route`] value.
pub trait DynRoute: Debug {
    /// Identifier of the value's route type.
    fn route_identifier(&self) -> &'static str;

    /// Full Rust type name of the value.
    fn route_type_name(&self) -> &'static str;

    /// Downcast support.
    fn as_any(&self) -> &dyn Any;
}

impl<R: Route> DynRoute for R {
    fn route_identifier(&self) -> &'static str {
        R::identifier()
    }

    fn route_type_name(&self) -> &'static str {
        type_name::<R>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn DynRoute + '_ {
    /// Check if this route is of type `R`.
    pub fn is<R: Route>(&self) -> bool {
        self.as_any().is::<R>()
    }

    /// Downcast to route type `R`.
    pub fn downcast_ref<R: Route>(&self) -> Option<&R> {
        self.as_any().downcast_ref::<R>()
    }
}

/// The type name with every path cut to its last segment, generic arguments included.
///
/// `app::routes::Wrapped<app::routes::Home>` becomes `Wrapped<Home>`. Names of generic
/// types are built once per type and kept for the life of the thread.
pub(crate) fn short_type_name<T: ?Sized + 'static>() -> &'static str {
    thread_local! {
        static GENERIC_NAMES: RefCell<HashMap<TypeId, &'static str>> = RefCell::new(HashMap::new());
    }

    let full = type_name::<T>();
    if !full.contains('<') {
        return full.rsplit("::").next().unwrap_or(full);
    }
    GENERIC_NAMES.with(|names| {
        *names
            .borrow_mut()
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::leak(shorten_paths(full).into_boxed_str()))
    })
}

fn shorten_paths(full: &str) -> String {
    let mut short = String::with_capacity(full.len());
    let mut path_start = 0;
    for c in full.chars() {
        short.push(c);
        if c.is_alphanumeric() || c == '_' || c == ':' {
            if short.ends_with("::") {
                short.truncate(path_start);
            }
        } else {
            path_start = short.len();
        }
    }
    short
}

/// A route type paired with the decoder for its parameters.
#[derive(Clone, Copy)]
pub struct AnyRouteType {
    identifier: &'static str,
    type_name: &'static str,
    decode: fn(&[u8]) -> serde_json::Result<Box<dyn DynRoute>>,
}

fn decode_route<R: Route>(parameters: &[u8]) -> serde_json::Result<Box<dyn DynRoute>> {
    let route: R = serde_json::from_slice(parameters)?;
    Ok(Box::new(route))
}

impl AnyRouteType {
    /// Erase route type `R`.
    pub fn of<R: Route>() -> Self {
        Self {
            identifier: R::identifier(),
            type_name: type_name::<R>(),
            decode: decode_route::<R>,
        }
    }

    /// Identifier of the erased route type.
    pub fn identifier(&self) -> &'static str {
        self.identifier
    }

    /// Full Rust type name of the erased route type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Decode JSON parameter bytes into the concrete route type.
    pub fn decode(&self, parameters: &[u8]) -> DecodingResult<Box<dyn DynRoute>> {
        (self.decode)(parameters).map_err(|source| RouteDecodingError::Decode {
            identifier: self.identifier.to_string(),
            source,
        })
    }
}

impl Debug for AnyRouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyRouteType")
            .field("identifier", &self.identifier)
            .field("type_name", &self.type_name)
            .finish()
    }
}
