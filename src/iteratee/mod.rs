//! Callback normalization.
//!
//! Every higher-order operation in the crate accepts a loosely typed
//! *shorthand* for its per-element callback and routes it through this
//! module. Normalization happens once per call; the resulting value is then
//! reused for every element.
//!
//! Two levels exist:
//!
//! - [`Callback`]: a concrete [`Function`] plus an optional receiver. It is
//!   invoked with one of the fixed argument shapes the primitives use:
//!   `(value)`, `(value, key, collection)` or
//!   `(accumulator, value, key, collection)`.
//! - [`Iteratee`]: the full shorthand resolution, a closed set of variants
//!   chosen once by [`Iteratee::from_shorthand`]:
//!
//! | Shorthand                         | Variant                  |
//! |-----------------------------------|--------------------------|
//! | `null` / `undefined`              | [`Iteratee::Identity`]   |
//! | a function                        | [`Iteratee::Callable`]   |
//! | a record (any non-array object)   | [`Iteratee::Matcher`]    |
//! | a string, number or key path      | [`Iteratee::Property`]   |
//!
//! Construction never fails: every shorthand maps to some variant.
//!
//! # Examples
//!
//! ```rust
//! use lowbar::iteratee::Iteratee;
//! use lowbar::{Value, record, seq};
//!
//! let stooge = record! { "name" => "moe", "address" => record! { "city" => "Springfield" } };
//!
//! let by_name = Iteratee::from("name");
//! assert_eq!(by_name.call(&stooge, &Value::Undefined, &Value::Undefined).unwrap(), Value::from("moe"));
//!
//! let by_city = Iteratee::from(seq!["address", "city"]);
//! assert_eq!(by_city.call(&stooge, &Value::Undefined, &Value::Undefined).unwrap(), Value::from("Springfield"));
//!
//! let named_moe = Iteratee::from(record! { "name" => "moe" });
//! assert!(named_moe.test(&stooge, &Value::Undefined, &Value::Undefined).unwrap());
//! ```

mod matcher;
mod property;

pub use matcher::{Matcher, is_match, matcher, matcher as matches};
pub use property::{PropertyPath, property, property_of};

use crate::error::{Error, Result};
use crate::value::{Function, Value};

/// A function bound to an optional receiver, invoked with a fixed argument
/// shape.
#[derive(Clone, Debug)]
pub struct Callback {
    function: Function,
    context: Option<Value>,
}

impl Callback {
    /// Wraps a function; it will be invoked with an `undefined` receiver.
    pub const fn new(function: Function) -> Self {
        Self {
            function,
            context: None,
        }
    }

    /// Wraps a function that is invoked with `context` as receiver.
    pub const fn with_context(function: Function, context: Value) -> Self {
        Self {
            function,
            context: Some(context),
        }
    }

    /// The wrapped function.
    pub const fn function(&self) -> &Function {
        &self.function
    }

    fn receiver(&self) -> &Value {
        self.context.as_ref().unwrap_or(&Value::Undefined)
    }

    /// `(value)` shape.
    pub fn call1(&self, value: &Value) -> Result<Value> {
        self.function.call(self.receiver(), std::slice::from_ref(value))
    }

    /// `(value, key, collection)` shape.
    pub fn call3(&self, value: &Value, key: &Value, collection: &Value) -> Result<Value> {
        self.function
            .call(self.receiver(), &[value.clone(), key.clone(), collection.clone()])
    }

    /// `(accumulator, value, key, collection)` shape.
    pub fn call4(
        &self,
        accumulator: &Value,
        value: &Value,
        key: &Value,
        collection: &Value,
    ) -> Result<Value> {
        self.function.call(
            self.receiver(),
            &[accumulator.clone(), value.clone(), key.clone(), collection.clone()],
        )
    }
}

impl From<Function> for Callback {
    fn from(function: Function) -> Self {
        Self::new(function)
    }
}

impl From<&Function> for Callback {
    fn from(function: &Function) -> Self {
        Self::new(function.clone())
    }
}

impl TryFrom<Value> for Callback {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Function(function) => Ok(Self::new(function)),
            _ => Err(Error::not_callable("callback")),
        }
    }
}

/// A normalized per-element callback.
#[derive(Clone, Debug, Default)]
pub enum Iteratee {
    /// Returns the element unchanged.
    #[default]
    Identity,
    /// Invokes a caller-supplied function as `(value, key, collection)`.
    Callable(Callback),
    /// Reads a property, or a path of properties, off the element.
    Property(PropertyPath),
    /// Tests the element against a set of key/value pairs.
    Matcher(Matcher),
}

impl Iteratee {
    /// Resolves a shorthand into an iteratee. `context` is only used when
    /// the shorthand is a function.
    pub fn from_shorthand(shorthand: &Value, context: Option<&Value>) -> Self {
        match shorthand {
            Value::Undefined | Value::Null => Self::Identity,
            Value::Function(function) => Self::Callable(match context {
                Some(context) => Callback::with_context(function.clone(), context.clone()),
                None => Callback::new(function.clone()),
            }),
            Value::Array(_) => Self::Property(PropertyPath::from(shorthand)),
            other if other.is_object() => Self::Matcher(Matcher::new(other)),
            other => Self::Property(PropertyPath::from(other)),
        }
    }

    /// Returns `true` for [`Iteratee::Identity`].
    pub const fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// Applies the iteratee to one element.
    pub fn call(&self, value: &Value, key: &Value, collection: &Value) -> Result<Value> {
        match self {
            Self::Identity => Ok(value.clone()),
            Self::Callable(callback) => callback.call3(value, key, collection),
            Self::Property(path) => Ok(path.read(value)),
            Self::Matcher(matcher) => Ok(Value::Bool(matcher.matches(value))),
        }
    }

    /// Applies the iteratee and reports the truthiness of its result.
    pub fn test(&self, value: &Value, key: &Value, collection: &Value) -> Result<bool> {
        self.call(value, key, collection).map(|result| result.is_truthy())
    }

    /// Applies the iteratee to a lone value, the `(value)` shape.
    pub fn apply(&self, value: &Value) -> Result<Value> {
        match self {
            Self::Callable(callback) => callback.call1(value),
            other => other.call(value, &Value::Undefined, &Value::Undefined),
        }
    }
}

/// Resolves a shorthand into an [`Iteratee`]; see [`Iteratee::from_shorthand`].
pub fn iteratee(shorthand: &Value, context: Option<&Value>) -> Iteratee {
    Iteratee::from_shorthand(shorthand, context)
}

impl From<Value> for Iteratee {
    fn from(shorthand: Value) -> Self {
        Self::from_shorthand(&shorthand, None)
    }
}

impl From<&Value> for Iteratee {
    fn from(shorthand: &Value) -> Self {
        Self::from_shorthand(shorthand, None)
    }
}

impl From<&str> for Iteratee {
    fn from(key: &str) -> Self {
        Self::Property(PropertyPath::from(key))
    }
}

impl From<Function> for Iteratee {
    fn from(function: Function) -> Self {
        Self::Callable(Callback::new(function))
    }
}

impl From<&Function> for Iteratee {
    fn from(function: &Function) -> Self {
        Self::Callable(Callback::new(function.clone()))
    }
}

impl From<Callback> for Iteratee {
    fn from(callback: Callback) -> Self {
        Self::Callable(callback)
    }
}

impl From<Matcher> for Iteratee {
    fn from(matcher: Matcher) -> Self {
        Self::Matcher(matcher)
    }
}

impl From<PropertyPath> for Iteratee {
    fn from(path: PropertyPath) -> Self {
        Self::Property(path)
    }
}

impl From<()> for Iteratee {
    fn from((): ()) -> Self {
        Self::Identity
    }
}
