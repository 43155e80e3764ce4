use std::rc::Rc;

use smallvec::SmallVec;

use crate::value::{Function, Value};

/// A property key or a path of keys.
///
/// Reading stops at the first `null`/`undefined` intermediate and yields
/// `undefined`; an empty path reads `undefined`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyPath(SmallVec<[Rc<str>; 4]>);

impl PropertyPath {
    /// The keys of the path, outermost first.
    pub fn keys(&self) -> &[Rc<str>] {
        &self.0
    }

    /// Reads the path off `object`.
    pub fn read(&self, object: &Value) -> Value {
        if self.0.is_empty() {
            return Value::Undefined;
        }
        let mut current = object.clone();
        for key in &self.0 {
            if current.is_nil() {
                return Value::Undefined;
            }
            current = current.get(key);
        }
        current
    }

    /// Returns whether every key on the path is an own property.
    pub fn is_own_path(&self, object: &Value) -> bool {
        let mut current = object.clone();
        for key in &self.0 {
            if !current.has_own(key) {
                return false;
            }
            current = current.get(key);
        }
        true
    }
}

impl From<&str> for PropertyPath {
    fn from(key: &str) -> Self {
        Self(SmallVec::from_elem(Rc::from(key), 1))
    }
}

impl From<&[&str]> for PropertyPath {
    fn from(keys: &[&str]) -> Self {
        Self(keys.iter().map(|key| Rc::from(*key)).collect())
    }
}

/// A sequence is a path of keys; anything else is a single key.
impl From<&Value> for PropertyPath {
    fn from(path: &Value) -> Self {
        match path {
            Value::Array(keys) => Self(keys.to_vec().iter().map(Value::to_property_key).collect()),
            key => Self(SmallVec::from_elem(key.to_property_key(), 1)),
        }
    }
}

/// Returns a function reading `path` off its argument.
///
/// # Examples
///
/// ```rust
/// use lowbar::iteratee::property;
/// use lowbar::{Value, record};
///
/// let name = property("name");
/// let stooge = record! { "name" => "moe" };
/// assert_eq!(name.invoke(&[stooge]).unwrap(), Value::from("moe"));
/// assert_eq!(name.invoke(&[Value::Null]).unwrap(), Value::Undefined);
/// ```
pub fn property(path: impl Into<PropertyPath>) -> Function {
    let path = path.into();
    Function::unary(move |object| path.read(&object))
}

/// Returns a function reading its argument, a key or key path, off `object`.
///
/// For a `null`/`undefined` object the function always returns `undefined`.
pub fn property_of(object: Value) -> Function {
    Function::unary(move |path| {
        if object.is_nil() {
            return Value::Undefined;
        }
        PropertyPath::from(&path).read(&object)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record, seq};
    use rstest::rstest;

    #[rstest]
    fn test_deep_read() {
        let object = record! { "a" => record! { "b" => seq![10, 20] } };
        let path = PropertyPath::from(&seq!["a", "b", 1]);
        assert_eq!(path.read(&object), Value::from(20));
    }

    #[rstest]
    fn test_read_short_circuits_on_nil() {
        let object = record! { "a" => Value::Null };
        let path = PropertyPath::from(&seq!["a", "b", "c"]);
        assert_eq!(path.read(&object), Value::Undefined);
    }

    #[rstest]
    fn test_empty_path_reads_undefined() {
        let path = PropertyPath::from(&seq![]);
        assert_eq!(path.read(&record! { "a" => 1 }), Value::Undefined);
    }

    #[rstest]
    fn test_property_of() {
        let lookup = property_of(record! { "x" => record! { "y" => 2 } });
        assert_eq!(lookup.invoke(&[Value::from("x")]).unwrap(), record! { "y" => 2 });
        assert_eq!(lookup.invoke(&[seq!["x", "y"]]).unwrap(), Value::from(2));

        let nothing = property_of(Value::Null);
        assert_eq!(nothing.invoke(&[Value::from("x")]).unwrap(), Value::Undefined);
    }

    #[rstest]
    fn test_is_own_path() {
        let object = record! { "a" => record! { "b" => 1 } };
        assert!(PropertyPath::from(&seq!["a", "b"]).is_own_path(&object));
        assert!(!PropertyPath::from(&seq!["a", "c"]).is_own_path(&object));
    }
}
