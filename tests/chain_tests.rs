//! Integration tests for the chaining pipeline.

use lowbar::chain::chain;
use lowbar::prelude::*;
use rstest::rstest;
use std::cell::RefCell;
use std::rc::Rc;

fn lyrics() -> Value {
    seq![
        record! { "line" => 1, "words" => "I'm a lumberjack and I'm okay" },
        record! { "line" => 2, "words" => "I sleep all night and I work all day" },
        record! { "line" => 3, "words" => "He's a lumberjack and he's okay" },
    ]
}

fn split_words() -> Function {
    Function::unary(|line| {
        line.get("words")
            .to_string()
            .split(' ')
            .map(Value::from)
            .collect()
    })
}

#[rstest]
fn test_word_count_pipeline() {
    let counts = chain(lyrics())
        .map(split_words())
        .unwrap()
        .flatten(false)
        .unwrap()
        .count_by(())
        .unwrap()
        .value();
    assert_eq!(counts.get("lumberjack"), Value::from(2));
    assert_eq!(counts.get("all"), Value::from(2));
    assert_eq!(counts.get("okay"), Value::from(2));
    assert_eq!(counts.get("day"), Value::from(1));
}

#[rstest]
fn test_chain_is_immutable() {
    let start = chain(seq![3, 1, 2]);
    let sorted = start.clone().sort_by(()).unwrap();
    assert_eq!(start.value(), seq![3, 1, 2]);
    assert_eq!(sorted.value(), seq![1, 2, 3]);
}

#[rstest]
fn test_set_operations_prepend_held_value() {
    let held = chain(seq![1, 2, 3]);
    assert_eq!(held.clone().union(&[seq![3, 4]]).unwrap().value(), seq![1, 2, 3, 4]);
    assert_eq!(held.clone().intersection(&[seq![2, 3, 4]]).unwrap().value(), seq![2, 3]);
    assert_eq!(
        held.zip(&[seq!["a", "b", "c"]]).unwrap().value(),
        seq![seq![1, "a"], seq![2, "b"], seq![3, "c"]]
    );
}

#[rstest]
fn test_non_value_results_are_converted() {
    assert_eq!(chain(seq![1, 2]).size().unwrap().value(), Value::from(2));
    assert_eq!(chain(seq![1, 2]).contains(&Value::from(2), None).unwrap().value(), Value::from(true));
    assert_eq!(chain(seq![1, 2]).index_of(&Value::from(9), None).unwrap().value(), Value::from(-1));
    assert_eq!(chain(seq![1, 2]).index_of(&Value::from(2), None).unwrap().value(), Value::from(1));
    assert_eq!(chain(record! { "a" => 1 }).find_key(record! { "x" => 1 }).unwrap().value(), Value::Undefined);
}

#[rstest]
fn test_errors_short_circuit() {
    let failing = Function::new(|_, _| Err(Error::callback("stop")));
    let outcome = chain(seq![1, 2]).map(failing).and_then(|next| next.first());
    assert_eq!(outcome.unwrap_err(), Error::callback("stop"));
}

#[rstest]
fn test_tap_observes_intermediate_values() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let record_value = Function::new(move |_, arguments| {
        sink.borrow_mut().push(arguments[0].clone());
        Ok(Value::Undefined)
    });
    let result = chain(seq![1, 2, 3, 200])
        .filter(Function::unary(|value| Value::from(value.to_number() % 2.0 == 0.0)))
        .unwrap()
        .tap(&record_value)
        .unwrap()
        .map(Function::unary(|value| Value::from(value.to_number() * value.to_number())))
        .unwrap()
        .value();
    assert_eq!(result, seq![4, 40_000]);
    assert_eq!(*seen.borrow(), vec![seq![2, 200]]);
}

#[rstest]
fn test_object_operations_chain() {
    let picked = chain(record! { "name" => "moe", "age" => 50, "userid" => "moe1" })
        .omit(&[Value::from("userid")])
        .unwrap()
        .invert()
        .unwrap()
        .keys()
        .unwrap()
        .value();
    assert_eq!(picked, seq!["moe", "50"]);
}

#[rstest]
fn test_apply_lifts_any_function() {
    let joined = chain(seq!["a", "b"])
        .apply(|list| Value::from(list.to_string()))
        .unwrap()
        .value();
    assert_eq!(joined, Value::from("a,b"));
    let value: Value = chain(1).into();
    assert_eq!(value, Value::from(1));
}
