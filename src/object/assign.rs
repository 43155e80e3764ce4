use std::rc::Rc;

use super::keys::inherited_keys_of;
use crate::array::flatten;
use crate::collection::traversal::keys_of;
use crate::error::Result;
use crate::iteratee::Callback;
use crate::value::{Object, Value, parse_index};

/// Which keys of a source an assignment copies.
#[derive(Clone, Copy)]
enum Source {
    Own,
    OwnAndInherited,
}

fn source_keys(source: &Value, selection: Source) -> Vec<Rc<str>> {
    match selection {
        Source::Own => keys_of(source),
        Source::OwnAndInherited => inherited_keys_of(source),
    }
}

/// Writes a property onto a record or an array; other values are left
/// untouched.
fn write(target: &Value, key: Rc<str>, value: Value) {
    match target {
        Value::Object(object) => object.set(key, value),
        Value::Array(array) => {
            if let Some(index) = parse_index(&key) {
                array.set(index, value);
            }
        }
        _ => {}
    }
}

fn assign(target: &Value, sources: &[Value], selection: Source, only_missing: bool) -> Value {
    if target.is_nil() {
        return target.clone();
    }
    for source in sources {
        for key in source_keys(source, selection) {
            if !only_missing || target.get(&key).is_undefined() {
                let value = source.get(&key);
                write(target, key, value);
            }
        }
    }
    target.clone()
}

/// Copies every own and inherited property of `sources` onto `target`,
/// later sources winning, and returns `target`.
///
/// # Examples
///
/// ```rust
/// use lowbar::object::extend;
/// use lowbar::record;
///
/// let target = record! { "name" => "moe" };
/// extend(&target, &[record! { "age" => 50 }]);
/// assert_eq!(target, record! { "name" => "moe", "age" => 50 });
/// ```
pub fn extend(target: &Value, sources: &[Value]) -> Value {
    assign(target, sources, Source::OwnAndInherited, false)
}

/// Like [`extend`], but copies own properties only.
pub fn extend_own(target: &Value, sources: &[Value]) -> Value {
    assign(target, sources, Source::Own, false)
}

/// Fills properties of `target` that read as `undefined` from `sources`,
/// earlier sources winning.
///
/// # Examples
///
/// ```rust
/// use lowbar::object::defaults;
/// use lowbar::record;
///
/// let ice_cream = record! { "flavor" => "chocolate" };
/// defaults(&ice_cream, &[record! { "flavor" => "vanilla", "sprinkles" => "lots" }]);
/// assert_eq!(ice_cream, record! { "flavor" => "chocolate", "sprinkles" => "lots" });
/// ```
pub fn defaults(target: &Value, sources: &[Value]) -> Value {
    assign(target, sources, Source::OwnAndInherited, true)
}

/// Creates a record inheriting from `prototype` with the own properties of
/// `properties` copied onto it.
///
/// A `prototype` that is not a record yields a plain record.
pub fn create(prototype: &Value, properties: Option<&Value>) -> Value {
    let created = Value::Object(Object::with_prototype(prototype.as_object().cloned()));
    match properties {
        Some(properties) => extend_own(&created, std::slice::from_ref(properties)),
        None => created,
    }
}

/// Shallow copy: arrays are copied element by element, other objects into
/// a plain record of their own and inherited properties. Primitives are
/// returned as they are.
pub fn clone(value: &Value) -> Value {
    match value {
        Value::Array(array) => Value::from(array.to_vec()),
        other if other.is_object() => extend(&Value::Object(Object::new()), std::slice::from_ref(other)),
        other => other.clone(),
    }
}

fn select<F>(object: &Value, keys: Vec<Rc<str>>, mut keep: F) -> Result<Value>
where
    F: FnMut(&Value, &Rc<str>) -> Result<bool>,
{
    let result = Object::new();
    for key in keys {
        let value = object.get(&key);
        if keep(&value, &key)? {
            result.set(key, value);
        }
    }
    Ok(Value::Object(result))
}

fn flattened_keys(keys: &[Value]) -> Vec<Rc<str>> {
    let list = flatten(&Value::from(keys.to_vec()), false);
    list.as_array()
        .map(|list| list.to_vec().iter().map(Value::to_property_key).collect())
        .unwrap_or_default()
}

/// A record holding only the listed keys. Keys may be nested in arrays;
/// inherited properties are picked too.
///
/// # Examples
///
/// ```rust
/// use lowbar::object::pick;
/// use lowbar::{Value, record, seq};
///
/// let stooge = record! { "name" => "moe", "age" => 50, "userid" => "moe1" };
/// assert_eq!(pick(&stooge, &[Value::from("name"), seq!["age"]]), record! { "name" => "moe", "age" => 50 });
/// ```
pub fn pick(object: &Value, keys: &[Value]) -> Value {
    if object.is_nil() {
        return Value::Object(Object::new());
    }
    let picked = flattened_keys(keys)
        .into_iter()
        .filter(|key| object.has_property(key))
        .map(|key| {
            let value = object.get(&key);
            (key, value)
        });
    Value::Object(Object::from_entries(picked))
}

/// A record holding the own and inherited properties passing `predicate`,
/// called as `(value, key, object)`.
///
/// # Errors
///
/// Returns the first error raised by the predicate.
pub fn pick_by(object: &Value, predicate: impl Into<Callback>) -> Result<Value> {
    let predicate = predicate.into();
    select(object, inherited_keys_of(object), |value, key| {
        Ok(predicate.call3(value, &Value::from(key), object)?.is_truthy())
    })
}

/// A record without the listed keys. Keys may be nested in arrays.
///
/// # Examples
///
/// ```rust
/// use lowbar::object::omit;
/// use lowbar::{Value, record};
///
/// let stooge = record! { "name" => "moe", "age" => 50, "userid" => "moe1" };
/// assert_eq!(omit(&stooge, &[Value::from("userid")]), record! { "name" => "moe", "age" => 50 });
/// ```
pub fn omit(object: &Value, keys: &[Value]) -> Value {
    let unwanted = flattened_keys(keys);
    let kept = inherited_keys_of(object)
        .into_iter()
        .filter(|key| !unwanted.contains(key))
        .map(|key| {
            let value = object.get(&key);
            (key, value)
        });
    Value::Object(Object::from_entries(kept))
}

/// A record holding the own and inherited properties failing `predicate`.
///
/// # Errors
///
/// Returns the first error raised by the predicate.
pub fn omit_by(object: &Value, predicate: impl Into<Callback>) -> Result<Value> {
    let predicate = predicate.into();
    select(object, inherited_keys_of(object), |value, key| {
        Ok(!predicate.call3(value, &Value::from(key), object)?.is_truthy())
    })
}
