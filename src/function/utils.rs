//! Small combinators over [`Function`] values.

use super::bind::{Slot, partial};
use crate::error::Result;
use crate::iteratee::Callback;
use crate::value::{Function, Value};

/// Returns its argument unchanged.
///
/// `Function::unary(identity)` is the default iteratee.
#[inline]
pub fn identity(value: Value) -> Value {
    value
}

/// A function that always returns `value`.
///
/// # Examples
///
/// ```rust
/// use lowbar::function::constant;
/// use lowbar::{Value, record};
///
/// let stooge = record! { "name" => "moe" };
/// let always = constant(stooge.clone());
/// assert!(always.invoke(&[Value::from(1)]).unwrap().strict_equals(&stooge));
/// ```
pub fn constant(value: Value) -> Function {
    Function::named("constant", move |_, _| Ok(value.clone()))
}

/// A function that ignores its arguments and returns `undefined`.
pub fn noop() -> Function {
    Function::named("noop", |_, _| Ok(Value::Undefined))
}

/// Composes `functions` right to left.
///
/// The last function receives the call's receiver and arguments; each
/// earlier one receives the previous result as its only argument. An empty
/// list composes to the identity on the first argument.
///
/// # Examples
///
/// ```rust
/// use lowbar::function::compose;
/// use lowbar::value::Function;
/// use lowbar::Value;
///
/// let greet = Function::unary(|name| Value::from(format!("hi: {name}")));
/// let exclaim = Function::unary(|statement| Value::from(format!("{}!", statement.to_string().to_uppercase())));
/// let welcome = compose(&[greet, exclaim]);
/// assert_eq!(welcome.invoke(&[Value::from("moe")]).unwrap(), Value::from("hi: MOE!"));
/// ```
pub fn compose(functions: &[Function]) -> Function {
    let functions = functions.to_vec();
    Function::named("composed", move |receiver, arguments| {
        let Some((innermost, outer)) = functions.split_last() else {
            return Ok(arguments.first().cloned().unwrap_or_default());
        };
        outer
            .iter()
            .rev()
            .try_fold(innermost.call(receiver, arguments)?, |result, function| {
                function.call(receiver, std::slice::from_ref(&result))
            })
    })
}

/// Passes `function` to `wrapper` as its first argument, followed by the
/// call-time arguments.
///
/// # Examples
///
/// ```rust
/// use lowbar::function::wrap;
/// use lowbar::value::Function;
/// use lowbar::Value;
///
/// let hello = Function::unary(|name| Value::from(format!("hello: {name}")));
/// let wrapped = wrap(
///     Value::from(hello),
///     &Function::new(|_, arguments| {
///         let inner = arguments[0].as_function().cloned().unwrap_or_else(lowbar::function::noop);
///         Ok(Value::from(format!("before, {}, after", inner.invoke(&[Value::from("moe")])?)))
///     }),
/// );
/// assert_eq!(wrapped.invoke(&[]).unwrap(), Value::from("before, hello: moe, after"));
/// ```
pub fn wrap(function: Value, wrapper: &Function) -> Function {
    partial(wrapper, [Slot::Bound(function)])
}

/// A function returning the logical negation of `predicate`.
pub fn negate(predicate: &Function) -> Function {
    let predicate = predicate.clone();
    Function::named("negated", move |receiver, arguments| {
        Ok(Value::from(!predicate.call(receiver, arguments)?.is_truthy()))
    })
}

/// Calls `iteratee` with each index in `0..count` and collects the results.
///
/// # Errors
///
/// Returns the first error raised by `iteratee`.
///
/// # Examples
///
/// ```rust
/// use lowbar::function::times;
/// use lowbar::value::Function;
/// use lowbar::{Value, seq};
///
/// let double = Function::unary(|index| Value::from(index.to_number() * 2.0));
/// assert_eq!(times(3, double).unwrap(), seq![0, 2, 4]);
/// ```
pub fn times(count: usize, iteratee: impl Into<Callback>) -> Result<Value> {
    let iteratee = iteratee.into();
    (0..count)
        .map(|index| iteratee.call1(&Value::from(index)))
        .collect::<Result<Vec<_>>>()
        .map(Value::from)
}
