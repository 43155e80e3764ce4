//! Integration tests for the function adapters.
//!
//! Exercises binding, partial application, memoization, call gating and
//! composition through the public API and the `partial!`/`compose!` macros.

use lowbar::function::{
    Slot, after, before, bind, bind_all, compose, constant, identity, memoize, negate, noop, once,
    partial, times, wrap,
};
use lowbar::prelude::*;
use rstest::rstest;
use std::cell::Cell;
use std::rc::Rc;

fn counting(calls: &Rc<Cell<usize>>) -> Function {
    let counter = Rc::clone(calls);
    Function::new(move |_, _| {
        counter.set(counter.get() + 1);
        Ok(Value::from(counter.get()))
    })
}

// =============================================================================
// Binding
// =============================================================================

#[rstest]
fn test_bind_fixes_receiver_and_arguments() {
    let greet = Function::new(|receiver, arguments| {
        Ok(Value::from(format!("{}: {}", arguments[0], receiver.get("name"))))
    });
    let bound = bind(&Value::from(greet), &record! { "name" => "moe" }, &[Value::from("hi")]).unwrap();
    assert_eq!(bound.invoke(&[]).unwrap(), Value::from("hi: moe"));
    assert_eq!(bound.call(&record! { "name" => "other" }, &[]).unwrap(), Value::from("hi: moe"));
}

#[rstest]
fn test_bind_rejects_non_functions() {
    assert_eq!(
        bind(&Value::from(1), &Value::Null, &[]).unwrap_err(),
        Error::NotCallable { operation: "bind" }
    );
}

#[rstest]
fn test_bound_constructor_ignores_bound_receiver() {
    let point = Function::new(|receiver, arguments| {
        if let Value::Object(object) = receiver {
            object.set("x", arguments[0].clone());
            object.set("y", arguments[1].clone());
        }
        Ok(Value::Undefined)
    });
    let bound = bind(&Value::from(point), &record! { "ignored" => true }, &[Value::from(1)]).unwrap();
    let instance = bound.construct(&[Value::from(2)]).unwrap();
    assert_eq!(instance.get("x"), Value::from(1));
    assert_eq!(instance.get("y"), Value::from(2));
    assert_eq!(instance.get("ignored"), Value::Undefined);
}

#[rstest]
fn test_partial_with_placeholder() {
    let subtract = Function::binary(|a, b| Value::from(b.to_number() - a.to_number()));
    let sub = partial(&subtract, [Slot::Placeholder, Slot::from(Value::from(20))]);
    assert_eq!(sub.invoke(&[Value::from(5)]).unwrap(), Value::from(15));
    let by_macro = partial!(subtract, __, 20);
    assert_eq!(by_macro.invoke(&[Value::from(5)]).unwrap(), Value::from(15));
}

#[rstest]
fn test_partial_appends_leftover_arguments() {
    let join = Function::new(|_, arguments| {
        let parts: Vec<String> = arguments.iter().map(ToString::to_string).collect();
        Ok(Value::from(parts.join(" ")))
    });
    let applied = partial!(join, "a", __, "c");
    assert_eq!(
        applied.invoke(&[Value::from("b"), Value::from("d")]).unwrap(),
        Value::from("a b c d")
    );
}

#[rstest]
fn test_bind_all_binds_named_methods() {
    let report = Function::new(|receiver, _| Ok(receiver.get("label")));
    let view = record! { "label" => "docs", "report" => report };
    bind_all(&view, &[Value::from("report")]).unwrap();
    let detached = view.get("report");
    let function = detached.as_function().unwrap();
    assert_eq!(function.invoke(&[]).unwrap(), Value::from("docs"));
}

#[rstest]
fn test_bind_all_errors() {
    assert_eq!(bind_all(&record! {}, &[]).unwrap_err(), Error::MissingMethodNames);
    assert!(matches!(
        bind_all(&record! { "x" => 1 }, &[Value::from("x")]),
        Err(Error::NotCallable { .. })
    ));
}

// =============================================================================
// Memoize
// =============================================================================

#[rstest]
fn test_memoize_reuses_results() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let square = Function::unary(move |value| {
        counter.set(counter.get() + 1);
        Value::from(value.to_number() * value.to_number())
    });
    let cached = memoize(&square, None);
    for _ in 0..3 {
        assert_eq!(cached.invoke(&[Value::from(9)]).unwrap(), Value::from(81));
    }
    assert_eq!(cached.invoke(&[Value::from(3)]).unwrap(), Value::from(9));
    assert_eq!(calls.get(), 2);
}

#[rstest]
fn test_memoize_with_hasher() {
    let calls = Rc::new(Cell::new(0));
    let sum = {
        let counter = Rc::clone(&calls);
        Function::binary(move |a, b| {
            counter.set(counter.get() + 1);
            Value::from(a.to_number() + b.to_number())
        })
    };
    let hasher = Function::new(|_, arguments| Ok(Value::from(format!("{}|{}", arguments[0], arguments[1]))));
    let cached = memoize(&sum, Some(hasher));
    assert_eq!(cached.invoke(&[Value::from(1), Value::from(2)]).unwrap(), Value::from(3));
    assert_eq!(cached.invoke(&[Value::from(1), Value::from(5)]).unwrap(), Value::from(6));
    assert_eq!(cached.invoke(&[Value::from(1), Value::from(2)]).unwrap(), Value::from(3));
    assert_eq!(calls.get(), 2);
}

// =============================================================================
// Call Gating
// =============================================================================

#[rstest]
fn test_once_returns_first_result() {
    let calls = Rc::new(Cell::new(0));
    let initialize = once(&counting(&calls));
    assert_eq!(initialize.invoke(&[]).unwrap(), Value::from(1));
    assert_eq!(initialize.invoke(&[]).unwrap(), Value::from(1));
    assert_eq!(calls.get(), 1);
}

#[rstest]
#[case(0, 0)]
#[case(1, 0)]
#[case(3, 2)]
#[case(10, 5)]
fn test_before_limits_calls(#[case] limit: usize, #[case] expected: usize) {
    let calls = Rc::new(Cell::new(0));
    let gated = before(limit, &counting(&calls));
    for _ in 0..5 {
        gated.invoke(&[]).unwrap();
    }
    assert_eq!(calls.get(), expected);
}

#[rstest]
#[case(0, 5)]
#[case(1, 5)]
#[case(3, 3)]
#[case(6, 0)]
fn test_after_waits_for_calls(#[case] threshold: usize, #[case] expected: usize) {
    let calls = Rc::new(Cell::new(0));
    let gated = after(threshold, &counting(&calls));
    for _ in 0..5 {
        gated.invoke(&[]).unwrap();
    }
    assert_eq!(calls.get(), expected);
}

// =============================================================================
// Composition and Helpers
// =============================================================================

#[rstest]
fn test_compose_runs_right_to_left() {
    let greet = Function::unary(|name| Value::from(format!("hi: {name}")));
    let exclaim = Function::unary(|text| Value::from(format!("{}!", text.to_string().to_uppercase())));
    let welcome = compose(&[greet.clone(), exclaim.clone()]);
    assert_eq!(welcome.invoke(&[Value::from("moe")]).unwrap(), Value::from("hi: MOE!"));
    let by_macro = compose!(greet, exclaim);
    assert_eq!(by_macro.invoke(&[Value::from("moe")]).unwrap(), Value::from("hi: MOE!"));
}

#[rstest]
fn test_compose_empty_is_identity() {
    assert_eq!(compose(&[]).invoke(&[Value::from(4)]).unwrap(), Value::from(4));
}

#[rstest]
fn test_wrap_passes_original_first() {
    let hello = Function::unary(|name| Value::from(format!("hello: {name}")));
    let wrapper = Function::new(|_, arguments| {
        let inner = arguments[0].as_function().map_or(Ok(Value::Undefined), |f| f.invoke(&[Value::from("moe")]))?;
        Ok(Value::from(format!("before, {inner}, after")))
    });
    let wrapped = wrap(Value::from(hello), &wrapper);
    assert_eq!(wrapped.invoke(&[]).unwrap(), Value::from("before, hello: moe, after"));
}

#[rstest]
fn test_negate_and_helpers() {
    let is_odd = Function::unary(|value| Value::from(value.to_number() % 2.0 == 1.0));
    let is_even = negate(&is_odd);
    assert_eq!(lowbar::collection::find(&seq![1, 3, 5, 6], &is_even).unwrap(), Value::from(6));
    assert_eq!(identity(Value::from("same")), Value::from("same"));
    assert_eq!(constant(Value::from(7)).invoke(&[Value::from(1)]).unwrap(), Value::from(7));
    assert_eq!(noop().invoke(&[Value::from(1)]).unwrap(), Value::Undefined);
}

#[rstest]
fn test_times_collects_results() {
    let square = Function::unary(|index| Value::from(index.to_number() * index.to_number()));
    assert_eq!(times(4, square).unwrap(), seq![0, 1, 4, 9]);
    assert_eq!(times(0, noop()).unwrap(), seq![]);
}
