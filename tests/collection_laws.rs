//! Property-based tests for the collection operations.
//!
//! ## Iteration Laws
//! - **Map Shape**: `map` preserves length and order
//! - **Map Identity**: `map(xs, identity) == xs`
//! - **Filter/Reject Complement**: together they hold every element once
//!
//! ## Grouping Laws
//! - **Coverage**: the groups of `group_by` hold every element exactly once
//! - **Counting**: `count_by` totals the input size
//! - **Sorting**: `sort_by` is stable and keeps every element, even with `NaN` keys
//!
//! ## Array Laws
//! - **Uniq Idempotence**: `uniq(uniq(xs)) == uniq(xs)`
//! - **Flatten Idempotence**: `flatten(flatten(xs)) == flatten(xs)`
//! - **Chunk Concatenation**: flattening chunks restores the input

use lowbar::prelude::*;
use proptest::prelude::*;

fn numbers(values: &[i32]) -> Value {
    values.iter().copied().map(Value::from).collect()
}

fn elements(value: &Value) -> Vec<Value> {
    value.as_array().map(Array::to_vec).unwrap_or_default()
}

fn modulo(divisor: f64) -> Function {
    Function::unary(move |value| Value::from(value.to_number().rem_euclid(divisor)))
}

// =============================================================================
// Iteration Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_map_preserves_length_and_order(values in prop::collection::vec(-100..100i32, 0..20)) {
        let doubled = collection::map(&numbers(&values), Function::unary(|v| Value::from(v.to_number() * 2.0))).unwrap();
        let expected: Vec<i32> = values.iter().map(|v| v * 2).collect();
        prop_assert_eq!(doubled, numbers(&expected));
    }

    #[test]
    fn prop_map_identity(values in prop::collection::vec(-100..100i32, 0..20)) {
        let list = numbers(&values);
        prop_assert_eq!(collection::map(&list, ()).unwrap(), list);
    }

    #[test]
    fn prop_filter_and_reject_are_complementary(values in prop::collection::vec(-100..100i32, 0..20)) {
        let list = numbers(&values);
        let positive = Function::unary(|v| Value::from(v.to_number() > 0.0));
        let kept = collection::filter(&list, &positive).unwrap();
        let dropped = collection::reject(&list, &positive).unwrap();
        prop_assert_eq!(collection::size(&kept) + collection::size(&dropped), values.len());
        prop_assert!(collection::every(&kept, &positive).unwrap());
        prop_assert!(!collection::some(&dropped, &positive).unwrap());
    }

    #[test]
    fn prop_reduce_matches_sum(values in prop::collection::vec(-100..100i32, 1..20)) {
        let add = Function::binary(|a, b| Value::from(a.to_number() + b.to_number()));
        let total = collection::reduce(&numbers(&values), &add, None).unwrap();
        let right_total = collection::reduce_right(&numbers(&values), &add, None).unwrap();
        let expected: i32 = values.iter().sum();
        prop_assert_eq!(total, Value::from(expected));
        prop_assert_eq!(right_total, Value::from(expected));
    }
}

// =============================================================================
// Grouping Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_group_by_covers_every_element_once(values in prop::collection::vec(0..50i32, 0..30)) {
        let list = numbers(&values);
        let groups = collection::group_by(&list, modulo(3.0)).unwrap();
        let mut regrouped: Vec<i32> = object::values(&groups)
            .as_array()
            .map(Array::to_vec)
            .unwrap_or_default()
            .iter()
            .flat_map(elements)
            .map(|value| value.to_number() as i32)
            .collect();
        let mut expected = values.clone();
        regrouped.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(regrouped, expected);
    }

    #[test]
    fn prop_group_keys_agree_with_iteratee(values in prop::collection::vec(0..50i32, 0..30)) {
        let groups = collection::group_by(&numbers(&values), modulo(4.0)).unwrap();
        for key in elements(&object::keys(&groups)) {
            for member in elements(&groups.get(&key.to_property_key())) {
                prop_assert_eq!(Value::from(member.to_number().rem_euclid(4.0)).to_property_key(), key.to_property_key());
            }
        }
    }

    #[test]
    fn prop_count_by_totals_size(values in prop::collection::vec(0..50i32, 0..30)) {
        let counts = collection::count_by(&numbers(&values), modulo(5.0)).unwrap();
        let total: f64 = elements(&object::values(&counts)).iter().map(Value::to_number).sum();
        prop_assert_eq!(total as usize, values.len());
    }

    #[test]
    fn prop_sort_by_is_sorted_and_stable(values in prop::collection::vec(0..10i32, 0..20)) {
        let tagged: Value = values
            .iter()
            .enumerate()
            .map(|(index, value)| record! { "key" => *value, "order" => index })
            .collect();
        let sorted = elements(&collection::sort_by(&tagged, "key").unwrap());
        for window in sorted.windows(2) {
            let (left, right) = (window[0].get("key").to_number(), window[1].get("key").to_number());
            prop_assert!(left <= right);
            if (left - right).abs() < f64::EPSILON {
                prop_assert!(window[0].get("order").to_number() < window[1].get("order").to_number());
            }
        }
    }

    #[test]
    fn prop_sort_by_keeps_every_element_with_nan_criteria(values in prop::collection::vec(prop::option::weighted(0.7, -50..50i32), 0..80)) {
        let list: Value = values
            .iter()
            .map(|value| value.map_or(Value::from(f64::NAN), Value::from))
            .collect();
        let sorted = collection::sort_by(&list, ()).unwrap();
        let mut before: Vec<String> = elements(&list).iter().map(ToString::to_string).collect();
        let mut after: Vec<String> = elements(&sorted).iter().map(ToString::to_string).collect();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }
}

// =============================================================================
// Array Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_uniq_idempotent(values in prop::collection::vec(0..10i32, 0..20)) {
        let once = array::uniq(&numbers(&values), false, ()).unwrap();
        prop_assert_eq!(array::uniq(&once, false, ()).unwrap(), once);
    }

    #[test]
    fn prop_flatten_idempotent(values in prop::collection::vec(prop::collection::vec(0..10i32, 0..4), 0..6)) {
        let nested: Value = values.iter().map(|inner| numbers(inner)).collect();
        let flat = array::flatten(&nested, false);
        prop_assert_eq!(array::flatten(&flat, false), flat.clone());
        prop_assert_eq!(collection::size(&flat), values.iter().map(Vec::len).sum::<usize>());
    }

    #[test]
    fn prop_chunks_concatenate_to_input(values in prop::collection::vec(0..100i32, 0..20), size in 1..6usize) {
        let list = numbers(&values);
        let chunks = array::chunk(&list, size);
        prop_assert_eq!(array::flatten(&chunks, true), list);
    }

    #[test]
    fn prop_zip_unzip_inverse(values in prop::collection::vec((0..10i32, 0..10i32), 0..10)) {
        let (left, right): (Vec<i32>, Vec<i32>) = values.into_iter().unzip();
        let zipped = array::zip(&[numbers(&left), numbers(&right)]);
        let restored = array::unzip(&zipped);
        if left.is_empty() {
            prop_assert_eq!(restored, seq![]);
        } else {
            prop_assert_eq!(restored, seq![numbers(&left), numbers(&right)]);
        }
    }
}
