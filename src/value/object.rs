use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::{Function, Value, WeakFunction};

#[derive(Default)]
struct ObjectData {
    properties: IndexMap<Rc<str>, Value>,
    prototype: Option<Object>,
    /// Set on a function's `prototype` object; answers `constructor` without
    /// keeping the function alive.
    constructor: Option<WeakFunction>,
}

/// A shared, string keyed record.
///
/// Own properties keep insertion order. Reads fall back to the prototype
/// chain when a key is not an own property; writes always land on the
/// object itself.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<ObjectData>>);

impl Object {
    /// Creates an empty object without a prototype.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty object that inherits from `prototype`.
    pub fn with_prototype(prototype: Option<Self>) -> Self {
        Self(Rc::new(RefCell::new(ObjectData {
            prototype,
            ..ObjectData::default()
        })))
    }

    /// Creates an object from key/value pairs, in order.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Rc<str>>,
        V: Into<Value>,
    {
        let object = Self::new();
        for (key, value) in entries {
            object.set(key, value);
        }
        object
    }

    /// The object this one inherits from.
    pub fn prototype(&self) -> Option<Self> {
        self.0.borrow().prototype.clone()
    }

    /// Reads a property, consulting the prototype chain.
    pub fn get(&self, key: &str) -> Value {
        let mut current = Some(self.clone());
        while let Some(object) = current {
            if let Some(value) = object.get_own(key) {
                return value;
            }
            if key == "constructor" {
                if let Some(function) = object.own_constructor() {
                    return Value::Function(function);
                }
            }
            current = object.prototype();
        }
        Value::Undefined
    }

    /// Reads an own property.
    pub fn get_own(&self, key: &str) -> Option<Value> {
        self.0.borrow().properties.get(key).cloned()
    }

    /// Returns whether `key` is an own property.
    pub fn has_own(&self, key: &str) -> bool {
        self.0.borrow().properties.contains_key(key)
    }

    /// Returns whether `key` is readable, either as an own property or
    /// through the prototype chain.
    pub fn has(&self, key: &str) -> bool {
        let mut current = Some(self.clone());
        while let Some(object) = current {
            if object.has_own(key) || (key == "constructor" && object.own_constructor().is_some()) {
                return true;
            }
            current = object.prototype();
        }
        false
    }

    /// Writes an own property, keeping the original position of an existing
    /// key.
    pub fn set(&self, key: impl Into<Rc<str>>, value: impl Into<Value>) {
        self.0.borrow_mut().properties.insert(key.into(), value.into());
    }

    /// Removes an own property, preserving the order of the remaining keys.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().properties.shift_remove(key)
    }

    /// Own keys in insertion order.
    pub fn keys(&self) -> Vec<Rc<str>> {
        self.0.borrow().properties.keys().cloned().collect()
    }

    /// Own keys followed by inherited keys, without duplicates.
    pub fn all_keys(&self) -> Vec<Rc<str>> {
        let mut keys: Vec<Rc<str>> = Vec::new();
        let mut current = Some(self.clone());
        while let Some(object) = current {
            for key in object.keys() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
            current = object.prototype();
        }
        keys
    }

    /// Own key/value pairs in insertion order.
    pub fn entries(&self) -> Vec<(Rc<str>, Value)> {
        self.0
            .borrow()
            .properties
            .iter()
            .map(|(key, value)| (Rc::clone(key), value.clone()))
            .collect()
    }

    /// Number of own properties.
    pub fn len(&self) -> usize {
        self.0.borrow().properties.len()
    }

    /// Returns `true` when there are no own properties.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().properties.is_empty()
    }

    /// Returns `true` if both handles refer to the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }

    pub(crate) fn set_constructor(&self, function: &Function) {
        self.0.borrow_mut().constructor = Some(function.downgrade());
    }

    fn own_constructor(&self) -> Option<Function> {
        self.0.borrow().constructor.as_ref().and_then(WeakFunction::upgrade)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Object(self.clone()), formatter)
    }
}
