//! Wire form of a route: `"<scheme>|<json-object>"`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::RouteStringError;

/// Separator between the scheme and the JSON parameters.
pub const SEPARATOR: char = '|';

/// A parsed route string.
///
/// The scheme is everything before the first `|`; everything after it must be a
/// JSON object. Identity, equality and hashing follow the original string.
///
/// # Example
///
/// ```rust
/// use router_service::RouteString;
///
/// let route = RouteString::parse(r#"profile|{"user_id": 7}"#).unwrap();
/// assert_eq!(route.scheme(), "profile");
/// assert_eq!(route.parameters()["user_id"], 7);
///
/// assert!(RouteString::parse("profile|[1, 2]").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RouteString {
    scheme: String,
    parameters: Map<String, Value>,
    parameter_data: Vec<u8>,
    original: String,
}

impl RouteString {
    /// Parse a wire string. No partial results are produced on failure.
    pub fn parse(route_string: &str) -> Result<Self, RouteStringError> {
        if route_string.is_empty() {
            return Err(RouteStringError::Empty);
        }

        let (scheme, payload) = route_string
            .split_once(SEPARATOR)
            .ok_or(RouteStringError::MissingSeparator)?;

        if scheme.is_empty() {
            return Err(RouteStringError::EmptyScheme);
        }
        if payload.is_empty() {
            return Err(RouteStringError::MissingPayload);
        }

        let parameters = match serde_json::from_str::<Value>(payload) {
            Ok(Value::Object(parameters)) => parameters,
            Ok(_) => return Err(RouteStringError::NotAnObject),
            Err(source) => return Err(RouteStringError::MalformedJson(source)),
        };

        Ok(Self {
            scheme: scheme.to_string(),
            parameters,
            parameter_data: payload.as_bytes().to_vec(),
            original: route_string.to_string(),
        })
    }

    /// Build the wire form of `scheme` with `parameters`.
    ///
    /// The scheme must not contain the separator; a scheme that does yields a
    /// string that parses back to a different scheme.
    pub fn format(scheme: &str, parameters: &Map<String, Value>) -> String {
        format!("{scheme}{SEPARATOR}{}", Value::Object(parameters.clone()))
    }

    /// The route identifier.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The parsed parameters.
    pub fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    /// The raw parameter bytes, as they appeared after the separator.
    pub fn parameter_data(&self) -> &[u8] {
        &self.parameter_data
    }

    /// The full string this value was parsed from.
    pub fn original(&self) -> &str {
        &self.original
    }
}

impl FromStr for RouteString {
    type Err = RouteStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for RouteString {
    fn eq(&self, other: &Self) -> bool {
        self.original == other.original
    }
}

impl Eq for RouteString {}

impl Hash for RouteString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.original.hash(state);
    }
}

impl fmt::Display for RouteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
