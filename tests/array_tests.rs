//! Integration tests for the sequence operations.
//!
//! Includes the set operations, the positional searches and the slicing
//! helpers over arrays, strings and array-like records.

use lowbar::array::{
    chunk, compact, difference, drop, find_index, find_last_index, first, first_n, flatten, head,
    index_of, index_of_sorted, initial, intersection, last, last_index_of, last_n, object, range,
    rest, sorted_index, take, union, uniq, unzip, without, zip,
};
use lowbar::prelude::*;
use rstest::rstest;

// =============================================================================
// Slicing
// =============================================================================

#[rstest]
fn test_first_and_aliases() {
    let list = seq![5, 4, 3, 2, 1];
    assert_eq!(first(&list), Value::from(5));
    assert_eq!(head(&list), Value::from(5));
    assert_eq!(take(&list, 3), seq![5, 4, 3]);
    assert_eq!(first_n(&list, 0), seq![]);
    assert_eq!(first(&seq![]), Value::Undefined);
    assert_eq!(first(&Value::Null), Value::Undefined);
}

#[rstest]
#[case(None, seq![1, 2, 3, 4])]
#[case(Some(3), seq![1, 2])]
#[case(Some(10), seq![])]
fn test_initial(#[case] n: Option<usize>, #[case] expected: Value) {
    assert_eq!(initial(&seq![1, 2, 3, 4, 5], n), expected);
}

#[rstest]
#[case(None, seq![2, 3, 4, 5])]
#[case(Some(2), seq![3, 4, 5])]
#[case(Some(0), seq![1, 2, 3, 4, 5])]
fn test_rest_and_drop(#[case] n: Option<usize>, #[case] expected: Value) {
    assert_eq!(rest(&seq![1, 2, 3, 4, 5], n), expected);
    assert_eq!(drop(&seq![1, 2, 3, 4, 5], n), expected);
}

#[rstest]
fn test_last() {
    assert_eq!(last(&seq![5, 4, 3]), Value::from(3));
    assert_eq!(last_n(&seq![5, 4, 3], 2), seq![4, 3]);
    assert_eq!(last_n(&seq![5, 4, 3], 9), seq![5, 4, 3]);
    assert_eq!(last(&seq![]), Value::Undefined);
}

#[rstest]
fn test_slicing_works_on_strings_and_array_likes() {
    assert_eq!(first(&Value::from("abc")), Value::from("a"));
    assert_eq!(last(&record! { "length" => 2, "0" => "x", "1" => "y" }), Value::from("y"));
}

#[rstest]
fn test_compact_removes_falsy() {
    assert_eq!(
        compact(&seq![0, 1, false, 2, "", 3, Value::Null, Value::Undefined, f64::NAN]),
        seq![1, 2, 3]
    );
}

#[rstest]
fn test_flatten_deep_and_shallow() {
    let nested = seq![1, seq![2], seq![3, seq![seq![4]]]];
    assert_eq!(flatten(&nested, false), seq![1, 2, 3, 4]);
    assert_eq!(flatten(&nested, true), seq![1, 2, 3, seq![seq![4]]]);
}

#[rstest]
fn test_chunk() {
    assert_eq!(chunk(&seq![1, 2, 3, 4, 5], 2), seq![seq![1, 2], seq![3, 4], seq![5]]);
    assert_eq!(chunk(&seq![1, 2], 0), seq![]);
}

#[rstest]
fn test_zip_and_unzip_are_inverse() {
    let zipped = zip(&[seq!["moe", "larry"], seq![30, 40], seq![true, false]]);
    assert_eq!(zipped, seq![seq!["moe", 30, true], seq!["larry", 40, false]]);
    assert_eq!(unzip(&zipped), seq![seq!["moe", "larry"], seq![30, 40], seq![true, false]]);
}

#[rstest]
fn test_zip_pads_with_undefined() {
    assert_eq!(zip(&[seq![1, 2], seq!["a"]]), seq![seq![1, "a"], seq![2, Value::Undefined]]);
    assert_eq!(zip(&[]), seq![]);
}

#[rstest]
fn test_object_from_pairs_and_parallel_lists() {
    assert_eq!(object(&seq!["a", "b"], Some(&seq![1, 2])), record! { "a" => 1, "b" => 2 });
    assert_eq!(object(&seq![seq!["a", 1], seq!["a", 2]], None), record! { "a" => 2 });
}

#[rstest]
#[case(0.0, None, None, seq![])]
#[case(10.0, None, None, seq![0, 1, 2, 3, 4, 5, 6, 7, 8, 9])]
#[case(1.0, Some(11.0), None, seq![1, 2, 3, 4, 5, 6, 7, 8, 9, 10])]
#[case(0.0, Some(30.0), Some(5.0), seq![0, 5, 10, 15, 20, 25])]
#[case(0.0, Some(-10.0), Some(-1.0), seq![0, -1, -2, -3, -4, -5, -6, -7, -8, -9])]
#[case(3.0, Some(1.0), Some(1.0), seq![])]
fn test_range(#[case] start: f64, #[case] stop: Option<f64>, #[case] step: Option<f64>, #[case] expected: Value) {
    assert_eq!(range(start, stop, step), expected);
}

// =============================================================================
// Set Operations
// =============================================================================

#[rstest]
fn test_without() {
    assert_eq!(without(&seq![1, 2, 1, 0, 3, 1, 4], &[Value::from(0), Value::from(1)]), seq![2, 3, 4]);
}

#[rstest]
fn test_uniq_sorted_compares_neighbors() {
    assert_eq!(uniq(&seq![1, 1, 2, 2, 3], true, ()).unwrap(), seq![1, 2, 3]);
    assert_eq!(uniq(&seq![1, 1, 2, 1], true, ()).unwrap(), seq![1, 2, 1]);
}

#[rstest]
fn test_uniq_with_property_iteratee() {
    let list = seq![record! { "n" => 1, "tag" => "a" }, record! { "n" => 1, "tag" => "b" }];
    let unique = uniq(&list, false, "n").unwrap();
    assert_eq!(unique, seq![record! { "n" => 1, "tag" => "a" }]);
}

#[rstest]
fn test_uniq_keeps_distinct_references() {
    let list = seq![record! { "a" => 1 }, record! { "a" => 1 }];
    assert_eq!(uniq(&list, false, ()).unwrap().get("length"), Value::from(2));
}

#[rstest]
fn test_union_intersection_difference() {
    let a = seq![1, 2, 3];
    let b = seq![101, 2, 1, 10];
    let c = seq![2, 1];
    assert_eq!(union(&[a.clone(), b.clone(), c.clone()]), seq![1, 2, 3, 101, 10]);
    assert_eq!(intersection(&[a.clone(), b.clone(), c]), seq![1, 2]);
    assert_eq!(difference(&seq![1, 2, 3, 4, 5], &[seq![5, 2, 10]]), seq![1, 3, 4]);
    assert_eq!(intersection(&[]), seq![]);
}

// =============================================================================
// Searches
// =============================================================================

#[rstest]
fn test_find_index_and_find_last_index() {
    let list = seq![record! { "a" => 1 }, record! { "a" => 2 }, record! { "a" => 1 }];
    assert_eq!(find_index(&list, record! { "a" => 1 }).unwrap(), Some(0));
    assert_eq!(find_last_index(&list, record! { "a" => 1 }).unwrap(), Some(2));
    assert_eq!(find_index(&list, record! { "a" => 9 }).unwrap(), None);
}

#[rstest]
fn test_sorted_index_with_iteratee() {
    let people = seq![record! { "age" => 30 }, record! { "age" => 50 }];
    assert_eq!(sorted_index(&people, &record! { "age" => 40 }, "age").unwrap(), 1);
    assert_eq!(sorted_index(&seq![10, 20, 30], &Value::from(20), ()).unwrap(), 1);
}

#[rstest]
fn test_index_of_variants() {
    let list = seq![1, 2, 3, 1, 2, 3];
    assert_eq!(index_of(&list, &Value::from(2), Some(-3)), Some(4));
    assert_eq!(last_index_of(&list, &Value::from(2), None), Some(4));
    assert_eq!(last_index_of(&list, &Value::from(2), Some(3)), Some(1));
    assert_eq!(index_of(&list, &Value::from("2"), None), None);
    assert_eq!(index_of(&seq![f64::NAN], &Value::from(f64::NAN), None), Some(0));
    assert_eq!(index_of(&Value::Null, &Value::from(1), None), None);
}

#[rstest]
fn test_index_of_sorted_uses_binary_search() {
    let sorted = seq![10, 20, 30, 40];
    assert_eq!(index_of_sorted(&sorted, &Value::from(30)), Some(2));
    assert_eq!(index_of_sorted(&sorted, &Value::from(35)), None);
}
