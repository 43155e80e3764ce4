use super::traversal::Traversal;
use crate::error::Result;
use crate::iteratee::Iteratee;
use crate::value::{Array, Object, Value};

/// Shape of the container a grouping operation accumulates into.
#[derive(Clone, Copy)]
enum Container {
    /// A record keyed by the computed group key.
    Record,
    /// Two slots: elements with a truthy key, then the rest.
    Partition,
}

/// Builds a grouping operation from an aggregation behavior.
///
/// The returned operation normalizes its iteratee once, computes a key for
/// every element and lets `behavior` fold the element into the container.
fn group<B>(behavior: B, container: Container) -> impl Fn(&Value, Iteratee) -> Result<Value>
where
    B: Fn(&Value, Value, &Value),
{
    move |collection, iteratee| {
        let result = match container {
            Container::Record => Value::Object(Object::new()),
            Container::Partition => Value::from(vec![
                Value::Array(Array::new()),
                Value::Array(Array::new()),
            ]),
        };
        let traversal = Traversal::of(collection);
        for (value, index) in traversal.entries(collection) {
            let key = iteratee.call(&value, &index, collection)?;
            behavior(&result, value, &key);
        }
        Ok(result)
    }
}

fn append_to_group(result: &Value, value: Value, key: &Value) {
    let Some(groups) = result.as_object() else { return };
    let key = key.to_property_key();
    match groups.get_own(&key) {
        Some(Value::Array(members)) => members.push(value),
        _ => groups.set(key, Value::from(vec![value])),
    }
}

fn overwrite_slot(result: &Value, value: Value, key: &Value) {
    if let Some(index) = result.as_object() {
        index.set(key.to_property_key(), value);
    }
}

fn increment_count(result: &Value, _: Value, key: &Value) {
    let Some(counts) = result.as_object() else { return };
    let key = key.to_property_key();
    let count = counts.get_own(&key).map_or(0.0, |count| count.to_number());
    counts.set(key, count + 1.0);
}

fn split_by_truthiness(result: &Value, value: Value, pass: &Value) {
    let slot = if pass.is_truthy() { 0 } else { 1 };
    if let Value::Array(members) = result.get(&slot.to_string()) {
        members.push(value);
    }
}

/// Groups elements into lists keyed by the iteratee's result.
///
/// # Errors
///
/// Returns the first error raised by the iteratee.
///
/// # Examples
///
/// ```rust
/// use lowbar::collection::group_by;
/// use lowbar::{record, seq};
///
/// let grouped = group_by(&seq!["one", "two", "three"], "length").unwrap();
/// assert_eq!(grouped, record! { "3" => seq!["one", "two"], "5" => seq!["three"] });
/// ```
pub fn group_by(collection: &Value, iteratee: impl Into<Iteratee>) -> Result<Value> {
    group(append_to_group, Container::Record)(collection, iteratee.into())
}

/// Indexes elements by the iteratee's result; later elements replace
/// earlier ones with the same key.
///
/// # Errors
///
/// Returns the first error raised by the iteratee.
pub fn index_by(collection: &Value, iteratee: impl Into<Iteratee>) -> Result<Value> {
    group(overwrite_slot, Container::Record)(collection, iteratee.into())
}

/// Counts elements per iteratee result.
///
/// # Errors
///
/// Returns the first error raised by the iteratee.
pub fn count_by(collection: &Value, iteratee: impl Into<Iteratee>) -> Result<Value> {
    group(increment_count, Container::Record)(collection, iteratee.into())
}

/// Splits elements into `[passing, failing]`.
///
/// # Errors
///
/// Returns the first error raised by the predicate.
///
/// # Examples
///
/// ```rust
/// use lowbar::collection::partition;
/// use lowbar::value::Function;
/// use lowbar::{Value, seq};
///
/// let odd = Function::unary(|value| Value::from(value.to_number() % 2.0 == 1.0));
/// assert_eq!(partition(&seq![0, 1, 2, 3], odd).unwrap(), seq![seq![1, 3], seq![0, 2]]);
/// ```
pub fn partition(collection: &Value, predicate: impl Into<Iteratee>) -> Result<Value> {
    group(split_by_truthiness, Container::Partition)(collection, predicate.into())
}
