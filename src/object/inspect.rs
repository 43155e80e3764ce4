use crate::collection::traversal::keys_of;
use crate::error::Result;
use crate::iteratee::{Callback, PropertyPath};
use crate::value::Value;

/// Returns whether `path` names an own property. A key path must be
/// non-empty and own at every step.
///
/// # Examples
///
/// ```rust
/// use lowbar::object::has;
/// use lowbar::{Value, record, seq};
///
/// let object = record! { "a" => record! { "b" => 1 } };
/// assert!(has(&object, &Value::from("a")));
/// assert!(has(&object, &seq!["a", "b"]));
/// assert!(!has(&object, &seq!["a", "c"]));
/// assert!(!has(&object, &seq![]));
/// ```
pub fn has(object: &Value, path: &Value) -> bool {
    match path {
        Value::Array(keys) if keys.is_empty() => false,
        Value::Array(_) => PropertyPath::from(path).is_own_path(object),
        key => object.has_own(&key.to_property_key()),
    }
}

/// Returns whether a value holds nothing: `null`/`undefined`, an empty
/// array or string, or a value without own keys.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => true,
        Value::Array(array) => array.is_empty(),
        Value::String(text) => text.is_empty(),
        other => keys_of(other).is_empty(),
    }
}

/// Resolves `path` against `object`, calling any function met on the way
/// with its parent as receiver.
///
/// When a step reads `undefined`, `fallback` stands in for it (and is
/// called too, if it is a function) and resolution stops there.
///
/// # Errors
///
/// Returns the first error raised by a called function.
///
/// # Examples
///
/// ```rust
/// use lowbar::object::result;
/// use lowbar::value::Function;
/// use lowbar::{Value, record};
///
/// let stuff = Function::new(|receiver, _| Ok(Value::from(format!("{} stuff", receiver.get("cheese")))));
/// let object = record! { "cheese" => "crumpets", "stuff" => stuff };
/// assert_eq!(result(&object, &Value::from("cheese"), &Value::Undefined).unwrap(), Value::from("crumpets"));
/// assert_eq!(result(&object, &Value::from("stuff"), &Value::Undefined).unwrap(), Value::from("crumpets stuff"));
/// assert_eq!(result(&object, &Value::from("meat"), &Value::from("ham")).unwrap(), Value::from("ham"));
/// ```
pub fn result(object: &Value, path: &Value, fallback: &Value) -> Result<Value> {
    let path = PropertyPath::from(path);
    if path.keys().is_empty() {
        return resolve(object, fallback.clone());
    }
    let mut current = object.clone();
    for key in path.keys() {
        let property = current.get(key);
        if property.is_undefined() {
            return resolve(&current, fallback.clone());
        }
        current = resolve(&current, property)?;
    }
    Ok(current)
}

fn resolve(parent: &Value, property: Value) -> Result<Value> {
    match property {
        Value::Function(function) => function.call(parent, &[]),
        other => Ok(other),
    }
}

/// Calls `interceptor` with `value`, then returns `value`.
///
/// # Errors
///
/// Returns the error raised by `interceptor`.
pub fn tap(value: &Value, interceptor: impl Into<Callback>) -> Result<Value> {
    interceptor.into().call1(value)?;
    Ok(value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Function, Object};
    use crate::{Error, record, seq};
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    #[rstest]
    fn test_has_ignores_inherited() {
        let parent = Object::from_entries([("inherited", 1)]);
        let child = Value::Object(Object::with_prototype(Some(parent)));
        assert!(!has(&child, &Value::from("inherited")));
        assert!(!has(&Value::Null, &Value::from("a")));
    }

    #[rstest]
    #[case(Value::Null, true)]
    #[case(seq![], true)]
    #[case(seq![1], false)]
    #[case(Value::from(""), true)]
    #[case(record! {}, true)]
    #[case(record! { "a" => 1 }, false)]
    #[case(Value::from(5), true)]
    fn test_is_empty(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_empty(&value), expected);
    }

    #[rstest]
    fn test_result_along_a_path() {
        let object = record! { "a" => record! { "b" => 2 } };
        assert_eq!(result(&object, &seq!["a", "b"], &Value::Undefined).unwrap(), Value::from(2));
        assert_eq!(result(&object, &seq!["a", "x"], &Value::from(0)).unwrap(), Value::from(0));
        assert_eq!(result(&Value::Null, &seq!["a"], &Value::from(0)).unwrap(), Value::from(0));
    }

    #[rstest]
    fn test_result_empty_path_calls_fallback_on_object() {
        let fallback = Function::new(|receiver, _| Ok(receiver.get("v")));
        let object = record! { "v" => 9 };
        assert_eq!(result(&object, &seq![], &Value::Function(fallback)).unwrap(), Value::from(9));
    }

    #[rstest]
    fn test_tap_returns_input() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let interceptor = Function::new(move |_, _| {
            counter.set(counter.get() + 1);
            Ok(Value::Undefined)
        });
        assert_eq!(tap(&seq![1], interceptor).unwrap(), seq![1]);
        assert_eq!(calls.get(), 1);
    }

    #[rstest]
    fn test_tap_propagates_errors() {
        let failing = Function::new(|_, _| Err(Error::callback("nope")));
        assert_eq!(tap(&Value::Null, failing).unwrap_err(), Error::callback("nope"));
    }
}
