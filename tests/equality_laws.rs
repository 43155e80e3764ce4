//! Property-based tests for structural equality.
//!
//! ## Equivalence Laws
//! - **Reflexivity**: `is_equal(a, a)`
//! - **Symmetry**: `is_equal(a, b) == is_equal(b, a)`
//! - **Transitivity** over independently built copies
//!
//! ## Consistency
//! - Two values built from the same data are equal but never identical
//! - `clone` of a record is equal to it
//! - Serialization-free round trip through `pairs`/`object`

use lowbar::prelude::*;
use proptest::prelude::*;

/// A `Send` description of a value; converted into a [`Value`] inside each
/// case, since values are single-threaded.
#[derive(Clone, Debug)]
enum Data {
    Null,
    Bool(bool),
    Number(i32),
    Text(String),
    List(Vec<Data>),
    Record(Vec<(String, Data)>),
}

impl Data {
    fn build(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(flag) => Value::from(*flag),
            Self::Number(number) => Value::from(*number),
            Self::Text(text) => Value::from(text.as_str()),
            Self::List(elements) => elements.iter().map(Self::build).collect(),
            Self::Record(entries) => {
                let object = Object::new();
                for (key, value) in entries {
                    object.set(key.as_str(), value.build());
                }
                Value::Object(object)
            }
        }
    }
}

fn data() -> impl Strategy<Value = Data> {
    let leaf = prop_oneof![
        Just(Data::Null),
        any::<bool>().prop_map(Data::Bool),
        (-50..50i32).prop_map(Data::Number),
        "[a-c]{0,3}".prop_map(Data::Text),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Data::List),
            prop::collection::vec(("[a-d]", inner), 0..4).prop_map(Data::Record),
        ]
    })
}

// =============================================================================
// Equivalence Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_is_equal_reflexive(shape in data()) {
        let value = shape.build();
        prop_assert!(lowbar::is_equal(&value, &value));
    }

    #[test]
    fn prop_equal_copies_are_not_identical(shape in data()) {
        let left = shape.build();
        let right = shape.build();
        prop_assert!(lowbar::is_equal(&left, &right));
        if left.is_object() {
            prop_assert!(!left.strict_equals(&right));
        }
    }

    #[test]
    fn prop_is_equal_symmetric(left in data(), right in data()) {
        let (left, right) = (left.build(), right.build());
        prop_assert_eq!(lowbar::is_equal(&left, &right), lowbar::is_equal(&right, &left));
    }

    #[test]
    fn prop_is_equal_transitive(shape in data(), other in data()) {
        let (a, b, c) = (shape.build(), shape.build(), other.build());
        if lowbar::is_equal(&a, &c) {
            prop_assert!(lowbar::is_equal(&b, &c));
        }
    }
}

// =============================================================================
// Consistency
// =============================================================================

proptest! {
    #[test]
    fn prop_clone_of_record_is_equal(entries in prop::collection::vec(("[a-z]{1,3}", data()), 0..5)) {
        let record = Data::Record(entries).build();
        prop_assert_eq!(object::clone(&record), record);
    }

    #[test]
    fn prop_pairs_then_object_round_trips(entries in prop::collection::vec(("[a-z]{1,3}", data()), 0..5)) {
        let record = Data::Record(entries).build();
        prop_assert_eq!(array::object(&object::pairs(&record), None), record);
    }

    #[test]
    fn prop_array_equality_is_order_sensitive(numbers in prop::collection::vec(-9..9i32, 2..6)) {
        let forward: Value = numbers.iter().copied().map(Value::from).collect();
        let backward: Value = numbers.iter().rev().copied().map(Value::from).collect();
        let palindrome = numbers.iter().eq(numbers.iter().rev());
        prop_assert_eq!(lowbar::is_equal(&forward, &backward), palindrome);
    }
}
