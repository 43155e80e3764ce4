use std::cmp::Ordering;

use super::iteration::{filter, find};
use super::traversal::{Traversal, keys_of, values_of};
use crate::array::index_of;
use crate::error::{Error, Result};
use crate::iteratee::{Iteratee, Matcher, PropertyPath};
use crate::value::Value;

/// Returns whether the collection holds `target`, compared strictly with
/// `NaN` matching `NaN`. Records are searched by value.
///
/// A negative `from_index` counts from the end.
pub fn contains(collection: &Value, target: &Value, from_index: Option<isize>) -> bool {
    let sequence = if collection.is_sequence_like() {
        collection.clone()
    } else {
        Value::from(values_of(collection))
    };
    index_of(&sequence, target, Some(from_index.unwrap_or(0))).is_some()
}

/// Calls a method on every element and collects the results.
///
/// `method` is either a function, called with each element as receiver,
/// a method name looked up on each element, or a key path whose last key
/// names the method and whose prefix locates the receiver. Elements
/// without the method yield the missing value itself.
///
/// # Errors
///
/// Returns [`Error::NotCallable`] when the looked-up member is not a
/// function, or the first error raised by a method.
///
/// # Examples
///
/// ```rust
/// use lowbar::collection::invoke;
/// use lowbar::value::Function;
/// use lowbar::{Value, record, seq};
///
/// let greet = Function::new(|receiver, arguments| {
///     Ok(Value::from(format!("{} {}", arguments[0], receiver.get("name"))))
/// });
/// let people = seq![record! { "name" => "moe", "greet" => greet.clone() }];
/// assert_eq!(invoke(&people, &Value::from("greet"), &[Value::from("hi")]).unwrap(), seq!["hi moe"]);
/// ```
pub fn invoke(collection: &Value, method: &Value, arguments: &[Value]) -> Result<Value> {
    let (context_path, name) = match method {
        Value::Function(_) => (None, None),
        Value::Array(path) => {
            let mut keys = path.to_vec();
            let name = keys.pop().unwrap_or_default().to_property_key();
            let prefix = (!keys.is_empty()).then(|| PropertyPath::from(&Value::from(keys)));
            (prefix, Some(name))
        }
        other => (None, Some(other.to_property_key())),
    };
    let traversal = Traversal::of(collection);
    traversal
        .entries(collection)
        .map(|(element, _)| {
            let Some(name) = &name else {
                return match method {
                    Value::Function(function) => function.call(&element, arguments),
                    _ => Ok(Value::Undefined),
                };
            };
            let receiver = context_path
                .as_ref()
                .map_or_else(|| element.clone(), |path| path.read(&element));
            if receiver.is_nil() {
                return Ok(Value::Undefined);
            }
            match receiver.get(name) {
                Value::Function(function) => function.call(&receiver, arguments),
                missing if missing.is_nil() => Ok(missing),
                _ => Err(Error::not_callable("invoke")),
            }
        })
        .collect::<Result<Vec<_>>>()
        .map(Value::from)
}

/// Reads one property, or key path, off every element.
pub fn pluck(collection: &Value, key: &Value) -> Value {
    let path = PropertyPath::from(key);
    Value::from(
        Traversal::of(collection)
            .entries(collection)
            .map(|(element, _)| path.read(&element))
            .collect::<Vec<_>>(),
    )
}

/// Returns the elements that carry every key/value pair of `attributes`.
///
/// # Errors
///
/// Never fails; the signature matches the other filters.
pub fn filter_where(collection: &Value, attributes: &Value) -> Result<Value> {
    filter(collection, Matcher::new(attributes))
}

/// Returns the first element carrying every key/value pair of
/// `attributes`, or `undefined`.
///
/// # Errors
///
/// Never fails; the signature matches the other finders.
pub fn find_where(collection: &Value, attributes: &Value) -> Result<Value> {
    find(collection, Matcher::new(attributes))
}

/// Returns the element with the greatest iteratee result, or `-Infinity`
/// for an empty collection.
///
/// # Errors
///
/// Returns the first error raised by the iteratee.
///
/// # Examples
///
/// ```rust
/// use lowbar::collection::max;
/// use lowbar::{Value, record, seq};
///
/// let stooges = seq![record! { "name" => "moe", "age" => 40 }, record! { "name" => "curly", "age" => 60 }];
/// assert_eq!(max(&stooges, "age").unwrap().get("name"), Value::from("curly"));
/// assert_eq!(max(&seq![], ()).unwrap(), Value::from(f64::NEG_INFINITY));
/// ```
pub fn max(collection: &Value, iteratee: impl Into<Iteratee>) -> Result<Value> {
    extreme(collection, &iteratee.into(), Ordering::Greater, f64::NEG_INFINITY)
}

/// Returns the element with the least iteratee result, or `Infinity` for
/// an empty collection.
///
/// # Errors
///
/// Returns the first error raised by the iteratee.
pub fn min(collection: &Value, iteratee: impl Into<Iteratee>) -> Result<Value> {
    extreme(collection, &iteratee.into(), Ordering::Less, f64::INFINITY)
}

fn extreme(collection: &Value, iteratee: &Iteratee, wanted: Ordering, bound: f64) -> Result<Value> {
    let bound = Value::Number(bound);
    let mut result = bound.clone();
    let mut last_computed = bound.clone();
    let traversal = Traversal::of(collection);
    for (value, key) in traversal.entries(collection) {
        let computed = iteratee.call(&value, &key, collection)?;
        let improves = computed.loose_compare(&last_computed) == Some(wanted);
        if improves || (computed.strict_equals(&bound) && result.strict_equals(&bound)) {
            result = value;
            last_computed = computed;
        }
    }
    Ok(result)
}

/// Returns the elements ordered by the iteratee's result.
///
/// The sort is stable. `undefined` results sort after everything else.
/// Results that do not order consistently, such as `NaN` or a mix of
/// numbers and non-numeric strings, land in an unspecified position.
///
/// # Errors
///
/// Returns the first error raised by the iteratee.
///
/// # Examples
///
/// ```rust
/// use lowbar::collection::sort_by;
/// use lowbar::{record, seq};
///
/// let sorted = sort_by(&seq![record! { "n" => 2 }, record! {}, record! { "n" => 1 }], "n").unwrap();
/// assert_eq!(sorted, seq![record! { "n" => 1 }, record! { "n" => 2 }, record! {}]);
/// ```
pub fn sort_by(collection: &Value, iteratee: impl Into<Iteratee>) -> Result<Value> {
    let iteratee = iteratee.into();
    let traversal = Traversal::of(collection);
    let mut criteria = traversal
        .entries(collection)
        .enumerate()
        .map(|(index, (value, key))| {
            iteratee
                .call(&value, &key, collection)
                .map(|criterion| (index, criterion, value))
        })
        .collect::<Result<Vec<_>>>()?;
    let sorted = merge_sort(criteria, &|(left_index, left, _), (right_index, right, _)| {
        compare_criteria(left, right).then(left_index.cmp(right_index))
    });
    Ok(sorted.into_iter().map(|(_, _, value)| value).collect())
}

/// Top-down merge sort. Unlike `slice::sort_by` it accepts comparators
/// that are not a total order.
fn merge_sort<T, F>(mut items: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let mut left = merge_sort(items, compare).into_iter().peekable();
    let mut right = merge_sort(right, compare).into_iter().peekable();
    let mut merged = Vec::with_capacity(left.len() + right.len());
    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(first), Some(second)) => compare(first, second) != Ordering::Greater,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return merged,
        };
        merged.extend(if take_left { left.next() } else { right.next() });
    }
}

fn compare_criteria(left: &Value, right: &Value) -> Ordering {
    if left.strict_equals(right) {
        return Ordering::Equal;
    }
    let ordering = left.loose_compare(right);
    if ordering == Some(Ordering::Greater) || left.is_undefined() {
        Ordering::Greater
    } else if ordering == Some(Ordering::Less) || right.is_undefined() {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

/// Copies a collection into a new array: elements of a sequence, the
/// characters of a string, or the values of a record.
pub fn to_array(collection: &Value) -> Value {
    if !collection.is_truthy() {
        return Value::from(Vec::new());
    }
    Value::from(values_of(collection))
}

/// Number of elements of a sequence, or of own keys of a record.
pub fn size(collection: &Value) -> usize {
    collection
        .sequence_length()
        .unwrap_or_else(|| keys_of(collection).len())
}
