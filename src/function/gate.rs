use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::value::{Function, Value};

struct Before {
    remaining: Cell<usize>,
    function: RefCell<Option<Function>>,
    memo: RefCell<Value>,
}

/// Runs `function` for the first `times - 1` calls; later calls return the
/// last result without running it.
///
/// # Examples
///
/// ```rust
/// use lowbar::function::before;
/// use lowbar::value::Function;
/// use lowbar::Value;
///
/// let echo = Function::unary(|value| value);
/// let limited = before(3, &echo);
/// assert_eq!(limited.invoke(&[Value::from(1)]).unwrap(), Value::from(1));
/// assert_eq!(limited.invoke(&[Value::from(2)]).unwrap(), Value::from(2));
/// assert_eq!(limited.invoke(&[Value::from(3)]).unwrap(), Value::from(2));
/// ```
pub fn before(times: usize, function: &Function) -> Function {
    let state = Rc::new(Before {
        remaining: Cell::new(times),
        function: RefCell::new(Some(function.clone())),
        memo: RefCell::new(Value::Undefined),
    });
    Function::named("before", move |receiver, arguments| {
        let remaining = state.remaining.get().saturating_sub(1);
        state.remaining.set(remaining);
        if remaining > 0 {
            let function = state.function.borrow().clone();
            if let Some(function) = function {
                let result = function.call(receiver, arguments)?;
                *state.memo.borrow_mut() = result;
            }
        }
        if remaining <= 1 && state.function.borrow_mut().take().is_some() {
            tracing::trace!("before gate closed");
        }
        Ok(state.memo.borrow().clone())
    })
}

/// Runs `function` at most once; later calls return the first result.
pub fn once(function: &Function) -> Function {
    before(2, function)
}

/// Skips the first `times - 1` calls (returning `undefined`), then runs
/// `function` on every call.
///
/// # Examples
///
/// ```rust
/// use lowbar::function::after;
/// use lowbar::value::Function;
/// use lowbar::Value;
///
/// let done = Function::new(|_, _| Ok(Value::from("done")));
/// let on_last = after(2, &done);
/// assert_eq!(on_last.invoke(&[]).unwrap(), Value::Undefined);
/// assert_eq!(on_last.invoke(&[]).unwrap(), Value::from("done"));
/// ```
pub fn after(times: usize, function: &Function) -> Function {
    let remaining = Cell::new(times);
    let function = function.clone();
    Function::named("after", move |receiver, arguments| {
        let previous = remaining.get();
        remaining.set(previous.saturating_sub(1));
        if previous > 1 {
            return Ok(Value::Undefined);
        }
        if previous == 1 {
            tracing::trace!("after gate opened");
        }
        function.call(receiver, arguments)
    })
}
