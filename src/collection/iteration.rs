use super::traversal::Traversal;
use crate::error::{Error, Result};
use crate::iteratee::{Callback, Iteratee};
use crate::value::Value;

/// Invokes `callback` as `(value, key, collection)` for every element and
/// returns the collection unchanged.
///
/// # Errors
///
/// Returns the first error raised by `callback`; later elements are not
/// visited.
///
/// # Examples
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use lowbar::collection::each;
/// use lowbar::value::Function;
/// use lowbar::{Value, seq};
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// let record = Function::new(move |_, arguments| {
///     sink.borrow_mut().push(arguments[1].clone());
///     Ok(Value::Undefined)
/// });
///
/// let list = seq!["a", "b"];
/// let returned = each(&list, record).unwrap();
/// assert_eq!(*seen.borrow(), vec![Value::from(0), Value::from(1)]);
/// assert_eq!(returned, list);
/// ```
pub fn each(collection: &Value, callback: impl Into<Callback>) -> Result<Value> {
    let callback = callback.into();
    let traversal = Traversal::of(collection);
    for (value, key) in traversal.entries(collection) {
        callback.call3(&value, &key, collection)?;
    }
    Ok(collection.clone())
}

/// Maps every element through `iteratee` into a new sequence.
///
/// Records are walked by key, but the result is always positional.
///
/// # Errors
///
/// Returns the first error raised by the iteratee.
pub fn map(collection: &Value, iteratee: impl Into<Iteratee>) -> Result<Value> {
    let iteratee = iteratee.into();
    let traversal = Traversal::of(collection);
    traversal
        .entries(collection)
        .map(|(value, key)| iteratee.call(&value, &key, collection))
        .collect::<Result<Vec<_>>>()
        .map(Value::from)
}

/// Folds the collection from the left with
/// `callback(accumulator, value, key, collection)`.
///
/// Without a seed the first element becomes the accumulator and the fold
/// starts at the second.
///
/// # Errors
///
/// Returns [`Error::EmptyReduce`] for an empty collection without a seed,
/// or the first error raised by `callback`.
///
/// # Examples
///
/// ```rust
/// use lowbar::collection::reduce;
/// use lowbar::value::Function;
/// use lowbar::{Error, Value, seq};
///
/// let sum = Function::binary(|total, value| Value::from(total.to_number() + value.to_number()));
/// assert_eq!(reduce(&seq![1, 2, 3], &sum, None).unwrap(), Value::from(6));
/// assert_eq!(reduce(&seq![], &sum, Some(Value::from(0))).unwrap(), Value::from(0));
/// assert_eq!(reduce(&seq![], &sum, None).unwrap_err(), Error::EmptyReduce);
/// ```
pub fn reduce(collection: &Value, callback: impl Into<Callback>, memo: Option<Value>) -> Result<Value> {
    fold(collection, &callback.into(), memo, Direction::Left)
}

/// Folds the collection from the right; see [`reduce`].
///
/// # Errors
///
/// Same as [`reduce`].
pub fn reduce_right(
    collection: &Value,
    callback: impl Into<Callback>,
    memo: Option<Value>,
) -> Result<Value> {
    fold(collection, &callback.into(), memo, Direction::Right)
}

#[derive(Clone, Copy)]
enum Direction {
    Left,
    Right,
}

fn fold(collection: &Value, callback: &Callback, memo: Option<Value>, direction: Direction) -> Result<Value> {
    let traversal = Traversal::of(collection);
    let mut positions: Box<dyn Iterator<Item = usize>> = match direction {
        Direction::Left => Box::new(0..traversal.len()),
        Direction::Right => Box::new((0..traversal.len()).rev()),
    };
    let mut accumulator = match memo {
        Some(seed) => seed,
        None => match positions.next() {
            Some(position) => traversal.value_at(collection, position),
            None => {
                tracing::trace!("reduce of an empty collection without a seed");
                return Err(Error::EmptyReduce);
            }
        },
    };
    for position in positions {
        let value = traversal.value_at(collection, position);
        accumulator = callback.call4(&accumulator, &value, &traversal.key_at(position), collection)?;
    }
    Ok(accumulator)
}

/// Returns the first element passing `predicate`, or `undefined`.
///
/// Stops at the first match.
///
/// # Errors
///
/// Returns the first error raised by the predicate.
pub fn find(collection: &Value, predicate: impl Into<Iteratee>) -> Result<Value> {
    let predicate = predicate.into();
    let traversal = Traversal::of(collection);
    for (value, key) in traversal.entries(collection) {
        if predicate.test(&value, &key, collection)? {
            return Ok(value);
        }
    }
    Ok(Value::Undefined)
}

/// Returns every element passing `predicate`, in order.
///
/// # Errors
///
/// Returns the first error raised by the predicate.
pub fn filter(collection: &Value, predicate: impl Into<Iteratee>) -> Result<Value> {
    retain(collection, &predicate.into(), true)
}

/// Returns every element failing `predicate`, in order.
///
/// # Errors
///
/// Returns the first error raised by the predicate.
pub fn reject(collection: &Value, predicate: impl Into<Iteratee>) -> Result<Value> {
    retain(collection, &predicate.into(), false)
}

fn retain(collection: &Value, predicate: &Iteratee, keep: bool) -> Result<Value> {
    let traversal = Traversal::of(collection);
    let mut kept = Vec::new();
    for (value, key) in traversal.entries(collection) {
        if predicate.test(&value, &key, collection)? == keep {
            kept.push(value);
        }
    }
    Ok(Value::from(kept))
}

/// Returns whether every element passes `predicate`; `true` when empty.
///
/// # Errors
///
/// Returns the first error raised by the predicate.
pub fn every(collection: &Value, predicate: impl Into<Iteratee>) -> Result<bool> {
    let predicate = predicate.into();
    let traversal = Traversal::of(collection);
    for (value, key) in traversal.entries(collection) {
        if !predicate.test(&value, &key, collection)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Returns whether any element passes `predicate`; `false` when empty.
///
/// # Errors
///
/// Returns the first error raised by the predicate.
pub fn some(collection: &Value, predicate: impl Into<Iteratee>) -> Result<bool> {
    let predicate = predicate.into();
    let traversal = Traversal::of(collection);
    for (value, key) in traversal.entries(collection) {
        if predicate.test(&value, &key, collection)? {
            return Ok(true);
        }
    }
    Ok(false)
}
