//! Coercions between value kinds.
//!
//! These are the loose conversions the collection operations rely on:
//! truthiness, numeric and string coercion, property key coercion, and the
//! two flavours of primitive equality (`strict_equals` and
//! `same_value_zero`).

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use super::Value;

/// Nested containers deeper than this coerce to the empty string, which is
/// also what a self-containing array renders as.
const STRING_DEPTH: usize = 32;

impl Value {
    /// Returns the truthiness of this value.
    ///
    /// `undefined`, `null`, `false`, `0`, `-0`, `NaN` and the empty string
    /// are falsy; everything else (including empty arrays and objects) is
    /// truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(flag) => *flag,
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::String(text) => !text.is_empty(),
            _ => true,
        }
    }

    /// Numeric coercion.
    ///
    /// Strings are trimmed and parsed (the empty string is `0`), dates give
    /// their millisecond timestamp, arrays go through their string form and
    /// everything unconvertible is `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Undefined => f64::NAN,
            Self::Null => 0.0,
            Self::Bool(flag) => f64::from(u8::from(*flag)),
            Self::Number(number) => *number,
            Self::String(text) => parse_number(text).unwrap_or(f64::NAN),
            Self::Date(date) => date.millis(),
            Self::Array(_) => parse_number(&self.to_string()).unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }

    /// Coerces this value to a property key.
    pub fn to_property_key(&self) -> Rc<str> {
        match self {
            Self::String(text) => Rc::clone(text),
            other => Rc::from(other.to_string()),
        }
    }

    /// Strict equality (`===`).
    ///
    /// Numbers compare by IEEE equality (`NaN` is unequal to itself and
    /// `0 === -0`), strings by content, reference types by identity.
    pub fn strict_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            #[allow(clippy::float_cmp)]
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::String(left), Self::String(right)) => left == right,
            (Self::Symbol(left), Self::Symbol(right)) => left.ptr_eq(right),
            (Self::Date(left), Self::Date(right)) => left.ptr_eq(right),
            (Self::RegExp(left), Self::RegExp(right)) => left.ptr_eq(right),
            (Self::Array(left), Self::Array(right)) => left.ptr_eq(right),
            (Self::Object(left), Self::Object(right)) => left.ptr_eq(right),
            (Self::Function(left), Self::Function(right)) => left.ptr_eq(right),
            _ => false,
        }
    }

    /// `SameValueZero`: strict equality, except that `NaN` equals `NaN`.
    pub fn same_value_zero(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) if left.is_nan() && right.is_nan() => true,
            _ => self.strict_equals(other),
        }
    }

    /// Loose equality (`==`) between primitives; reference types still
    /// compare by identity.
    pub fn loose_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (left, right) if left.is_nil() && right.is_nil() => true,
            (left, right) if left.is_nil() || right.is_nil() => false,
            (Self::Number(_), Self::String(_)) | (Self::String(_), Self::Number(_)) => {
                #[allow(clippy::float_cmp)]
                let equal = self.to_number() == other.to_number();
                equal
            }
            (Self::Bool(_), _) => Self::Number(self.to_number()).loose_equals(other),
            (_, Self::Bool(_)) => self.loose_equals(&Self::Number(other.to_number())),
            _ => self.strict_equals(other),
        }
    }

    /// Relational comparison (`<`, `>`).
    ///
    /// Two strings compare lexicographically; any other pair compares
    /// numerically after coercion. Containers compare through their string
    /// form. Returns `None` when either side coerces to `NaN`.
    pub fn loose_compare(&self, other: &Self) -> Option<Ordering> {
        let left = self.to_primitive();
        let right = other.to_primitive();
        match (&left, &right) {
            (Self::String(left), Self::String(right)) => Some(left.cmp(right)),
            _ => left.to_number().partial_cmp(&right.to_number()),
        }
    }

    fn to_primitive(&self) -> Self {
        match self {
            Self::Array(_) | Self::Object(_) | Self::Function(_) | Self::RegExp(_) => {
                Self::from(self.to_string())
            }
            Self::Date(date) => Self::Number(date.millis()),
            other => other.clone(),
        }
    }
}

/// Parses a string the way numeric coercion does: surrounding whitespace is
/// ignored, the empty string is zero and `Infinity` is accepted.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    match trimmed {
        "" => Some(0.0),
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ if trimmed.chars().any(char::is_alphabetic)
            && !trimmed.contains(['e', 'E'])
            && !trimmed.starts_with("0x") =>
        {
            None
        }
        _ => {
            if let Some(hex) = trimmed.strip_prefix("0x") {
                #[allow(clippy::cast_precision_loss)]
                return u64::from_str_radix(hex, 16).ok().map(|number| number as f64);
            }
            trimmed.parse::<f64>().ok()
        }
    }
}

pub(crate) fn format_number(number: f64, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    if number.is_nan() {
        formatter.write_str("NaN")
    } else if number.is_infinite() {
        formatter.write_str(if number > 0.0 { "Infinity" } else { "-Infinity" })
    } else if number == 0.0 {
        formatter.write_str("0")
    } else {
        write!(formatter, "{number}")
    }
}

/// String coercion.
impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_value(self, formatter, STRING_DEPTH)
    }
}

fn display_value(value: &Value, formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    match value {
        Value::Undefined => formatter.write_str("undefined"),
        Value::Null => formatter.write_str("null"),
        Value::Bool(flag) => write!(formatter, "{flag}"),
        Value::Number(number) => format_number(*number, formatter),
        Value::String(text) => formatter.write_str(text),
        Value::Symbol(symbol) => write!(formatter, "{symbol}"),
        Value::Date(date) => format_number(date.millis(), formatter),
        Value::RegExp(regexp) => write!(formatter, "{regexp}"),
        Value::Object(_) => formatter.write_str("[object Object]"),
        Value::Function(function) => write!(formatter, "function {}() {{ [native code] }}", function.name()),
        Value::Array(_) if depth == 0 => Ok(()),
        Value::Array(array) => {
            for (index, element) in array.to_vec().iter().enumerate() {
                if index > 0 {
                    formatter.write_str(",")?;
                }
                if !element.is_nil() {
                    display_value(element, formatter, depth - 1)?;
                }
            }
            Ok(())
        }
    }
}
