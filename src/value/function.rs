use std::cell::OnceCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::{Object, Value};
use crate::error::Result;

/// Signature of a native function body: `(receiver, arguments) -> result`.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> Result<Value>;

type ConstructFn = dyn Fn(&[Value]) -> Result<Value>;

struct FunctionInner {
    name: Rc<str>,
    body: Box<NativeFn>,
    construct: Option<Box<ConstructFn>>,
    prototype: OnceCell<Object>,
}

/// A shared callable value.
///
/// Functions are compared by identity only. A function can be invoked with
/// an explicit receiver ([`Function::call`]) or used as a constructor
/// ([`Function::construct`]), in which case the body runs against a fresh
/// instance inheriting from the function's `prototype` object.
///
/// # Examples
///
/// ```rust
/// use lowbar::Value;
/// use lowbar::value::Function;
///
/// let double = Function::unary(|value| Value::from(value.to_number() * 2.0));
/// assert_eq!(double.invoke(&[Value::from(21)]).unwrap(), Value::from(42));
/// ```
#[derive(Clone)]
pub struct Function(Rc<FunctionInner>);

/// Non-owning reference to a [`Function`].
#[derive(Clone)]
pub(crate) struct WeakFunction(Weak<FunctionInner>);

impl WeakFunction {
    pub(crate) fn upgrade(&self) -> Option<Function> {
        self.0.upgrade().map(Function)
    }
}

/// Reads the positional argument at `index`, or `undefined` when missing.
pub(crate) fn argument(arguments: &[Value], index: usize) -> Value {
    arguments.get(index).cloned().unwrap_or_default()
}

impl Function {
    /// Creates an anonymous function from a body taking the receiver and the
    /// arguments.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        Self::named("", body)
    }

    /// Creates a named function.
    pub fn named<F>(name: &str, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        Self(Rc::new(FunctionInner {
            name: Rc::from(name),
            body: Box::new(body),
            construct: None,
            prototype: OnceCell::new(),
        }))
    }

    /// Creates a function whose construction is delegated to `construct`
    /// instead of instantiating its own prototype.
    pub(crate) fn with_construct<F, C>(name: &str, body: F, construct: C) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
        C: Fn(&[Value]) -> Result<Value> + 'static,
    {
        Self(Rc::new(FunctionInner {
            name: Rc::from(name),
            body: Box::new(body),
            construct: Some(Box::new(construct)),
            prototype: OnceCell::new(),
        }))
    }

    /// Wraps an infallible single argument closure.
    pub fn unary<F>(function: F) -> Self
    where
        F: Fn(Value) -> Value + 'static,
    {
        Self::new(move |_, arguments| Ok(function(argument(arguments, 0))))
    }

    /// Wraps an infallible two argument closure.
    pub fn binary<F>(function: F) -> Self
    where
        F: Fn(Value, Value) -> Value + 'static,
    {
        Self::new(move |_, arguments| Ok(function(argument(arguments, 0), argument(arguments, 1))))
    }

    /// Wraps a fallible single argument closure.
    pub fn try_unary<F>(function: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + 'static,
    {
        Self::new(move |_, arguments| function(argument(arguments, 0)))
    }

    /// The declared name (empty for anonymous functions).
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Invokes the function with an explicit receiver.
    pub fn call(&self, receiver: &Value, arguments: &[Value]) -> Result<Value> {
        (self.0.body)(receiver, arguments)
    }

    /// Invokes the function with an `undefined` receiver.
    pub fn invoke(&self, arguments: &[Value]) -> Result<Value> {
        self.call(&Value::Undefined, arguments)
    }

    /// Uses the function as a constructor.
    ///
    /// The body runs with a fresh instance as receiver; the instance inherits
    /// from [`Function::prototype`]. If the body returns an object-like value
    /// that value is the result, otherwise the instance is.
    pub fn construct(&self, arguments: &[Value]) -> Result<Value> {
        if let Some(construct) = &self.0.construct {
            return construct(arguments);
        }
        let instance = Value::Object(Object::with_prototype(Some(self.prototype())));
        let result = self.call(&instance, arguments)?;
        Ok(if result.is_object() { result } else { instance })
    }

    /// The object instances created by [`Function::construct`] inherit from.
    ///
    /// Created on first access; its `constructor` property resolves back to
    /// this function.
    pub fn prototype(&self) -> Object {
        self.0
            .prototype
            .get_or_init(|| {
                let prototype = Object::new();
                prototype.set_constructor(self);
                prototype
            })
            .clone()
    }

    /// Returns `true` if both handles refer to the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn downgrade(&self) -> WeakFunction {
        WeakFunction(Rc::downgrade(&self.0))
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.name.is_empty() {
            formatter.write_str("[Function (anonymous)]")
        } else {
            write!(formatter, "[Function: {}]", self.0.name)
        }
    }
}
