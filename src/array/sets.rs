use super::slicing::flatten_into;
use crate::collection::contains;
use crate::collection::traversal::{elements_of, values_of};
use crate::error::Result;
use crate::iteratee::Iteratee;
use crate::value::Value;

fn holds(values: &[Value], item: &Value) -> bool {
    values.iter().any(|value| value.same_value_zero(item))
}

/// The elements of `array` with every occurrence of `values` removed.
pub fn without(array: &Value, values: &[Value]) -> Value {
    difference(array, &[Value::from(values.to_vec())])
}

/// A duplicate-free copy of `array`, keeping first occurrences.
///
/// When `is_sorted` is set and no iteratee is given, only neighbors are
/// compared. With an iteratee, uniqueness is decided on its results.
///
/// # Errors
///
/// Returns the first error raised by the iteratee.
///
/// # Examples
///
/// ```rust
/// use lowbar::array::uniq;
/// use lowbar::value::Function;
/// use lowbar::{Value, seq};
///
/// assert_eq!(uniq(&seq![1, 2, 1, 4, 1, 3], false, ()).unwrap(), seq![1, 2, 4, 3]);
///
/// let parity = Function::unary(|value| Value::from(value.to_number() % 2.0));
/// assert_eq!(uniq(&seq![1, 2, 3, 4], false, parity).unwrap(), seq![1, 2]);
/// ```
pub fn uniq(array: &Value, is_sorted: bool, iteratee: impl Into<Iteratee>) -> Result<Value> {
    let iteratee = iteratee.into();
    let elements = elements_of(array);
    if iteratee.is_identity() {
        return Ok(Value::from(if is_sorted {
            sorted_unique(elements)
        } else {
            unique(elements)
        }));
    }
    let mut seen = Vec::new();
    let mut result = Vec::new();
    for (index, value) in elements.into_iter().enumerate() {
        let computed = iteratee.call(&value, &Value::from(index), array)?;
        if !holds(&seen, &computed) {
            seen.push(computed);
            result.push(value);
        }
    }
    Ok(Value::from(result))
}

fn unique(elements: Vec<Value>) -> Vec<Value> {
    let mut result: Vec<Value> = Vec::with_capacity(elements.len());
    for value in elements {
        if !holds(&result, &value) {
            result.push(value);
        }
    }
    result
}

fn sorted_unique(elements: Vec<Value>) -> Vec<Value> {
    let mut result: Vec<Value> = Vec::with_capacity(elements.len());
    for value in elements {
        if result.last().is_none_or(|previous| !previous.strict_equals(&value)) {
            result.push(value);
        }
    }
    result
}

/// The unique elements of all arrays, in order of first appearance.
/// Arguments that are not arrays are ignored.
///
/// # Examples
///
/// ```rust
/// use lowbar::array::union;
/// use lowbar::seq;
///
/// assert_eq!(union(&[seq![1, 2, 3], seq![101, 2, 1, 10], seq![2, 1]]), seq![1, 2, 3, 101, 10]);
/// ```
pub fn union(arrays: &[Value]) -> Value {
    let mut merged = Vec::new();
    flatten_into(arrays, true, true, &mut merged);
    Value::from(unique(merged))
}

/// The unique elements of the first array present in every other array.
///
/// # Examples
///
/// ```rust
/// use lowbar::array::intersection;
/// use lowbar::seq;
///
/// assert_eq!(intersection(&[seq![1, 2, 3], seq![101, 2, 1, 10], seq![2, 1]]), seq![1, 2]);
/// ```
pub fn intersection(arrays: &[Value]) -> Value {
    let Some((head, others)) = arrays.split_first() else {
        return Value::from(Vec::new());
    };
    let mut result: Vec<Value> = Vec::new();
    for item in elements_of(head) {
        if holds(&result, &item) {
            continue;
        }
        if others.iter().all(|other| contains(other, &item, None)) {
            result.push(item);
        }
    }
    Value::from(result)
}

/// The elements of `array` not present in any of `others`.
///
/// # Examples
///
/// ```rust
/// use lowbar::array::difference;
/// use lowbar::seq;
///
/// assert_eq!(difference(&seq![1, 2, 3, 4, 5], &[seq![5, 2, 10]]), seq![1, 3, 4]);
/// ```
pub fn difference(array: &Value, others: &[Value]) -> Value {
    let mut excluded = Vec::new();
    flatten_into(others, true, true, &mut excluded);
    values_of(array)
        .into_iter()
        .filter(|value| !holds(&excluded, value))
        .collect()
}
