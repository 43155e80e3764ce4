//! Dynamic values the toolkit operates on.
//!
//! Every operation in the crate works over caller-owned [`Value`]s. The
//! model follows the shapes a loosely typed collection library has to
//! handle:
//!
//! - primitives: [`Value::Undefined`], [`Value::Null`], [`Value::Bool`],
//!   [`Value::Number`], [`Value::String`]
//! - reference types with identity: [`Symbol`], [`Date`], [`RegExp`],
//!   [`Array`], [`Object`], [`Function`]
//!
//! [`Array`] and [`Object`] are shared, interior-mutable handles, so the
//! same container can appear at several places of a structure (including
//! inside itself). Cloning a [`Value`] never copies a container; it copies
//! the handle.
//!
//! # Examples
//!
//! ```rust
//! use lowbar::{Value, record, seq};
//!
//! let stooge = record! { "name" => "moe", "age" => 40 };
//! assert_eq!(stooge.get("name"), Value::from("moe"));
//! assert_eq!(stooge.get("missing"), Value::Undefined);
//!
//! let list = seq![1, 2, 3];
//! assert_eq!(list.get("length"), Value::from(3));
//! ```

mod array;
mod coerce;
mod function;
mod macros;
mod object;
mod primitive;
#[cfg(feature = "serde")]
mod serde;

use std::fmt;
use std::rc::Rc;

pub use array::Array;
pub use function::{Function, NativeFn};
pub use object::Object;
pub use primitive::{Date, RegExp, Symbol};

pub(crate) use function::WeakFunction;

/// The largest length a value may report and still be treated as a sequence.
pub const MAX_ARRAY_INDEX: f64 = 9_007_199_254_740_991.0;

/// A dynamically typed value.
#[derive(Clone, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Undefined,
    /// The explicit empty value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double precision number.
    Number(f64),
    /// An immutable string.
    String(Rc<str>),
    /// A unique symbol, compared by identity.
    Symbol(Symbol),
    /// A point in time, stored as milliseconds since the epoch.
    Date(Date),
    /// A regular expression literal (source and flags).
    RegExp(RegExp),
    /// An ordered, integer indexed sequence.
    Array(Array),
    /// A string keyed record.
    Object(Object),
    /// A callable.
    Function(Function),
}

/// Type tag of a [`Value`], used to dispatch structural comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// [`Value::Undefined`]
    Undefined,
    /// [`Value::Null`]
    Null,
    /// [`Value::Bool`]
    Boolean,
    /// [`Value::Number`]
    Number,
    /// [`Value::String`]
    String,
    /// [`Value::Symbol`]
    Symbol,
    /// [`Value::Date`]
    Date,
    /// [`Value::RegExp`]
    RegExp,
    /// [`Value::Array`]
    Array,
    /// [`Value::Object`]
    Object,
    /// [`Value::Function`]
    Function,
}

impl Value {
    /// Returns the type tag of this value.
    pub const fn tag(&self) -> Tag {
        match self {
            Self::Undefined => Tag::Undefined,
            Self::Null => Tag::Null,
            Self::Bool(_) => Tag::Boolean,
            Self::Number(_) => Tag::Number,
            Self::String(_) => Tag::String,
            Self::Symbol(_) => Tag::Symbol,
            Self::Date(_) => Tag::Date,
            Self::RegExp(_) => Tag::RegExp,
            Self::Array(_) => Tag::Array,
            Self::Object(_) => Tag::Object,
            Self::Function(_) => Tag::Function,
        }
    }

    /// Returns `true` for [`Value::Undefined`].
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns `true` for [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for either [`Value::Null`] or [`Value::Undefined`].
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    /// Returns `true` for booleans.
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Returns `true` for numbers, including `NaN`.
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns `true` for strings.
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Returns `true` for symbols.
    pub const fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    /// Returns `true` for dates.
    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Returns `true` for regular expressions.
    pub const fn is_regexp(&self) -> bool {
        matches!(self, Self::RegExp(_))
    }

    /// Returns `true` for arrays.
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Returns `true` for functions.
    pub const fn is_function(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    /// Returns `true` for every reference type that can carry properties:
    /// objects, arrays, functions, dates and regular expressions.
    pub const fn is_object(&self) -> bool {
        matches!(
            self,
            Self::Object(_) | Self::Array(_) | Self::Function(_) | Self::Date(_) | Self::RegExp(_)
        )
    }

    /// Returns `true` for `NaN`.
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::Number(number) if number.is_nan())
    }

    /// Returns `true` for finite numbers and for strings that parse as one.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Number(number) => number.is_finite(),
            Self::String(text) => coerce::parse_number(text).is_some_and(f64::is_finite),
            _ => false,
        }
    }

    /// Returns the array handle, if this is an array.
    pub const fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Returns the object handle, if this is an object.
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the function handle, if this is a function.
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the number, if this is a number.
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Reads a property with null safety.
    ///
    /// Reading off `null`/`undefined`, or reading a key that does not exist,
    /// yields [`Value::Undefined`]. Objects consult their prototype chain;
    /// arrays and strings answer `length` and integer indices.
    pub fn get(&self, key: &str) -> Self {
        match self {
            Self::Object(object) => object.get(key),
            Self::Array(array) => {
                if key == "length" {
                    Self::from(array.len())
                } else {
                    parse_index(key).map_or(Self::Undefined, |index| array.get(index))
                }
            }
            Self::String(text) => {
                if key == "length" {
                    Self::from(text.chars().count())
                } else {
                    parse_index(key)
                        .and_then(|index| text.chars().nth(index))
                        .map_or(Self::Undefined, |character| Self::from(character.to_string()))
                }
            }
            Self::Function(function) => match key {
                "name" => Self::from(function.name()),
                "prototype" => Self::Object(function.prototype()),
                _ => Self::Undefined,
            },
            _ => Self::Undefined,
        }
    }

    /// Returns whether `key` can be read from this value, either as an own
    /// property or through the prototype chain (the `in` operator).
    ///
    /// Primitive strings behave as their wrapper object would.
    pub fn has_property(&self, key: &str) -> bool {
        match self {
            Self::Object(object) => object.has(key),
            _ => self.has_own(key),
        }
    }

    /// Returns whether `key` is an own property of this value.
    pub fn has_own(&self, key: &str) -> bool {
        match self {
            Self::Object(object) => object.has_own(key),
            Self::Array(array) => {
                key == "length" || parse_index(key).is_some_and(|index| index < array.len())
            }
            Self::String(text) => {
                key == "length" || parse_index(key).is_some_and(|index| index < text.chars().count())
            }
            Self::Function(_) => matches!(key, "name" | "prototype"),
            _ => false,
        }
    }

    /// Returns the length of a sequence-like value.
    ///
    /// A value is sequence-like when its `length` property is a number in
    /// `[0, 2^53 - 1]`. A fractional length rounds up, covering every index
    /// below it.
    pub fn sequence_length(&self) -> Option<usize> {
        match self {
            Self::Array(array) => Some(array.len()),
            Self::String(text) => Some(text.chars().count()),
            Self::Object(object) => match object.get("length") {
                Self::Number(length) if (0.0..=MAX_ARRAY_INDEX).contains(&length) => {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    Some(length.ceil() as usize)
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// Returns `true` when [`Value::sequence_length`] is defined.
    pub fn is_sequence_like(&self) -> bool {
        self.sequence_length().is_some()
    }

    /// Own enumerable keys: record keys in insertion order, indices for
    /// arrays and strings, nothing for other values.
    pub fn own_keys(&self) -> Vec<Rc<str>> {
        match self {
            Self::Object(object) => object.keys(),
            Self::Array(array) => index_keys(array.len()),
            Self::String(text) => index_keys(text.chars().count()),
            _ => Vec::new(),
        }
    }

    /// Own and inherited enumerable keys.
    pub fn all_keys(&self) -> Vec<Rc<str>> {
        match self {
            Self::Object(object) => object.all_keys(),
            other => other.own_keys(),
        }
    }
}

fn index_keys(length: usize) -> Vec<Rc<str>> {
    (0..length).map(|index| Rc::from(index.to_string())).collect()
}

/// Parses a canonical array index (`"0"`, `"17"`, never `"01"` or `"-1"`).
pub(crate) fn parse_index(key: &str) -> Option<usize> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

macro_rules! impl_from_integer {
    ($($integer:ty),+) => {
        $(
            impl From<$integer> for Value {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn from(number: $integer) -> Self {
                    Self::Number(number as f64)
                }
            }
        )+
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32);

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(Rc::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(Rc::from(text))
    }
}

impl From<Rc<str>> for Value {
    fn from(text: Rc<str>) -> Self {
        Self::String(text)
    }
}

impl From<&Rc<str>> for Value {
    fn from(text: &Rc<str>) -> Self {
        Self::String(Rc::clone(text))
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Undefined
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Self::Array(array)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<Date> for Value {
    fn from(date: Date) -> Self {
        Self::Date(date)
    }
}

impl From<RegExp> for Value {
    fn from(regexp: RegExp) -> Self {
        Self::RegExp(regexp)
    }
}

impl From<Vec<Self>> for Value {
    fn from(elements: Vec<Self>) -> Self {
        Self::Array(Array::from_vec(elements))
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Undefined, Into::into)
    }
}

impl From<&Self> for Value {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

/// Deep structural equality; see [`crate::equality::is_equal`].
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::equality::is_equal(self, other)
    }
}

// =============================================================================
// Debug
// =============================================================================

const DEBUG_DEPTH: usize = 8;

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_value(self, formatter, DEBUG_DEPTH)
    }
}

fn debug_value(value: &Value, formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    match value {
        Value::Undefined => formatter.write_str("undefined"),
        Value::Null => formatter.write_str("null"),
        Value::Bool(flag) => write!(formatter, "{flag}"),
        Value::Number(_) => write!(formatter, "{value}"),
        Value::String(text) => write!(formatter, "{text:?}"),
        Value::Symbol(symbol) => write!(formatter, "{symbol:?}"),
        Value::Date(date) => write!(formatter, "{date:?}"),
        Value::RegExp(regexp) => write!(formatter, "{regexp}"),
        Value::Function(function) => write!(formatter, "{function:?}"),
        Value::Array(_) | Value::Object(_) if depth == 0 => formatter.write_str("…"),
        Value::Array(array) => {
            formatter.write_str("[")?;
            for (index, element) in array.to_vec().iter().enumerate() {
                if index > 0 {
                    formatter.write_str(", ")?;
                }
                debug_value(element, formatter, depth - 1)?;
            }
            formatter.write_str("]")
        }
        Value::Object(object) => {
            formatter.write_str("{")?;
            for (index, (key, element)) in object.entries().iter().enumerate() {
                if index > 0 {
                    formatter.write_str(", ")?;
                }
                write!(formatter, "{key}: ")?;
                debug_value(element, formatter, depth - 1)?;
            }
            formatter.write_str("}")
        }
    }
}

static_assertions::assert_not_impl_any!(Value: Send, Sync);
