use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::Value;

/// A shared, growable sequence of values.
///
/// Cloning an `Array` clones the handle: both handles observe the same
/// elements. Element access is by copy (`get` returns an owned [`Value`]),
/// so no borrow of the interior is ever held across a callback.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
    /// Creates an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an array with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    /// Wraps an existing vector.
    pub fn from_vec(elements: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(elements)))
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` when the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns the element at `index`, or [`Value::Undefined`] past the end.
    pub fn get(&self, index: usize) -> Value {
        self.0.borrow().get(index).cloned().unwrap_or_default()
    }

    /// Stores `value` at `index`, padding with [`Value::Undefined`] if the
    /// index lies past the end.
    pub fn set(&self, index: usize, value: impl Into<Value>) {
        let mut elements = self.0.borrow_mut();
        if index >= elements.len() {
            elements.resize(index + 1, Value::Undefined);
        }
        elements[index] = value.into();
    }

    /// Appends a value.
    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    /// Removes and returns the last value.
    pub fn pop(&self) -> Option<Value> {
        self.0.borrow_mut().pop()
    }

    /// Returns a snapshot of the elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Returns `true` if both handles refer to the same array.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Identity of the underlying allocation, used by cycle detection.
    pub(crate) fn id(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }
}

impl From<Vec<Value>> for Array {
    fn from(elements: Vec<Value>) -> Self {
        Self::from_vec(elements)
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Array(self.clone()), formatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_set_pads_with_undefined() {
        let array = Array::new();
        array.set(2, 7);
        assert_eq!(array.len(), 3);
        assert_eq!(array.get(0), Value::Undefined);
        assert_eq!(array.get(2), Value::from(7));
    }

    #[rstest]
    fn test_clones_share_storage() {
        let array = Array::new();
        let alias = array.clone();
        alias.push(1);
        assert_eq!(array.len(), 1);
        assert!(array.ptr_eq(&alias));
    }

    #[rstest]
    fn test_get_past_end_is_undefined() {
        assert_eq!(Array::new().get(5), Value::Undefined);
    }
}
