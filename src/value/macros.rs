//! Construction macros for sequences and records.

/// Builds an array [`Value`](crate::Value) from a list of expressions.
///
/// Every element goes through `Value::from`, so numbers, strings, booleans
/// and nested values can be mixed freely.
///
/// # Examples
///
/// ```rust
/// use lowbar::{Value, seq};
///
/// let list = seq![1, "two", true, seq![3]];
/// assert_eq!(list.get("length"), Value::from(4));
/// assert_eq!(seq![], Value::from(Vec::<Value>::new()));
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::Value::Array($crate::value::Array::new())
    };
    ($($element:expr),+ $(,)?) => {
        $crate::Value::Array($crate::value::Array::from_vec(vec![
            $($crate::Value::from($element)),+
        ]))
    };
}

/// Builds a record [`Value`](crate::Value) from `key => value` pairs.
///
/// Keys keep the order in which they are written.
///
/// # Examples
///
/// ```rust
/// use lowbar::{Value, record};
///
/// let stooge = record! { "name" => "curly", "age" => 60 };
/// assert_eq!(stooge.get("age"), Value::from(60));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Value::Object($crate::value::Object::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let object = $crate::value::Object::new();
        $(object.set($key, $crate::Value::from($value));)+
        $crate::Value::Object(object)
    }};
}
