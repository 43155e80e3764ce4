use std::rc::Rc;

use crate::collection::traversal::keys_of;
use crate::error::Result;
use crate::iteratee::Iteratee;
use crate::value::{Object, Value};

/// Own and inherited enumerable keys of a value that can carry properties.
pub(crate) fn inherited_keys_of(value: &Value) -> Vec<Rc<str>> {
    if value.is_object() {
        value.all_keys()
    } else {
        Vec::new()
    }
}

fn key_list(keys: Vec<Rc<str>>) -> Value {
    keys.into_iter().map(Value::from).collect()
}

/// Own enumerable keys, in insertion order. Primitives have none.
///
/// # Examples
///
/// ```rust
/// use lowbar::object::keys;
/// use lowbar::{Value, record, seq};
///
/// assert_eq!(keys(&record! { "one" => 1, "two" => 2 }), seq!["one", "two"]);
/// assert_eq!(keys(&Value::from("text")), seq![]);
/// ```
pub fn keys(object: &Value) -> Value {
    key_list(keys_of(object))
}

/// Own and inherited enumerable keys.
pub fn all_keys(object: &Value) -> Value {
    key_list(inherited_keys_of(object))
}

/// Values of the own enumerable keys.
pub fn values(object: &Value) -> Value {
    keys_of(object).iter().map(|key| object.get(key)).collect()
}

/// `[key, value]` pairs of the own enumerable keys.
pub fn pairs(object: &Value) -> Value {
    keys_of(object)
        .into_iter()
        .map(|key| {
            let value = object.get(&key);
            Value::from(vec![Value::from(key), value])
        })
        .collect()
}

/// A record mapping each value (as a key) to its key. Later keys win on
/// duplicate values.
pub fn invert(object: &Value) -> Value {
    let inverted = Object::new();
    for key in keys_of(object) {
        inverted.set(object.get(&key).to_property_key(), key);
    }
    Value::Object(inverted)
}

/// Sorted names of every own or inherited key holding a function.
pub fn functions(object: &Value) -> Value {
    let mut names: Vec<Rc<str>> = inherited_keys_of(object)
        .into_iter()
        .filter(|key| object.get(key).is_function())
        .collect();
    names.sort();
    key_list(names)
}

/// Maps the values of the own enumerable keys, keeping the keys.
///
/// # Errors
///
/// Returns the first error raised by the iteratee.
///
/// # Examples
///
/// ```rust
/// use lowbar::object::map_object;
/// use lowbar::value::Function;
/// use lowbar::{Value, record};
///
/// let add_five = Function::unary(|value| Value::from(value.to_number() + 5.0));
/// assert_eq!(
///     map_object(&record! { "start" => 5, "end" => 12 }, add_five).unwrap(),
///     record! { "start" => 10, "end" => 17 }
/// );
/// ```
pub fn map_object(object: &Value, iteratee: impl Into<Iteratee>) -> Result<Value> {
    let iteratee = iteratee.into();
    let mapped = Object::new();
    for key in keys_of(object) {
        let value = iteratee.call(&object.get(&key), &Value::from(&key), object)?;
        mapped.set(key, value);
    }
    Ok(Value::Object(mapped))
}

/// The first own key whose value passes `predicate`.
///
/// # Errors
///
/// Returns the first error raised by the predicate.
pub fn find_key(object: &Value, predicate: impl Into<Iteratee>) -> Result<Option<Rc<str>>> {
    let predicate = predicate.into();
    for key in keys_of(object) {
        if predicate.test(&object.get(&key), &Value::from(&key), object)? {
            return Ok(Some(key));
        }
    }
    Ok(None)
}
