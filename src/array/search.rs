use std::cmp::Ordering;

use crate::collection::traversal::elements_of;
use crate::error::Result;
use crate::iteratee::Iteratee;
use crate::value::Value;

/// Index of the first element passing `predicate`.
///
/// # Errors
///
/// Returns the first error raised by the predicate.
pub fn find_index(array: &Value, predicate: impl Into<Iteratee>) -> Result<Option<usize>> {
    let predicate = predicate.into();
    for (index, element) in elements_of(array).iter().enumerate() {
        if predicate.test(element, &Value::from(index), array)? {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// Index of the last element passing `predicate`.
///
/// # Errors
///
/// Returns the first error raised by the predicate.
pub fn find_last_index(array: &Value, predicate: impl Into<Iteratee>) -> Result<Option<usize>> {
    let predicate = predicate.into();
    for (index, element) in elements_of(array).iter().enumerate().rev() {
        if predicate.test(element, &Value::from(index), array)? {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// The lowest index at which `value` can be inserted into the sorted
/// `array` while keeping it sorted by the iteratee's result.
///
/// # Errors
///
/// Returns the first error raised by the iteratee.
///
/// # Examples
///
/// ```rust
/// use lowbar::array::sorted_index;
/// use lowbar::{Value, seq};
///
/// assert_eq!(sorted_index(&seq![10, 20, 30, 40, 50], &Value::from(35), ()).unwrap(), 3);
/// ```
pub fn sorted_index(array: &Value, value: &Value, iteratee: impl Into<Iteratee>) -> Result<usize> {
    let iteratee = iteratee.into();
    let elements = elements_of(array);
    let target = iteratee.apply(value)?;
    let (mut low, mut high) = (0, elements.len());
    while low < high {
        let middle = low + (high - low) / 2;
        if iteratee.apply(&elements[middle])?.loose_compare(&target) == Some(Ordering::Less) {
            low = middle + 1;
        } else {
            high = middle;
        }
    }
    Ok(low)
}

/// Index of the first element strictly equal to `item` (`NaN` finds `NaN`),
/// searching from `from_index`. A negative `from_index` counts from the end.
///
/// # Examples
///
/// ```rust
/// use lowbar::array::index_of;
/// use lowbar::{Value, seq};
///
/// let list = seq![1, 2, 3, 1];
/// assert_eq!(index_of(&list, &Value::from(1), None), Some(0));
/// assert_eq!(index_of(&list, &Value::from(1), Some(1)), Some(3));
/// assert_eq!(index_of(&list, &Value::from(4), None), None);
/// ```
pub fn index_of(array: &Value, item: &Value, from_index: Option<isize>) -> Option<usize> {
    let elements = elements_of(array);
    let start = match from_index {
        Some(index) if index < 0 => elements.len().saturating_sub(index.unsigned_abs()),
        Some(index) => index.unsigned_abs(),
        None => 0,
    };
    elements
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, element)| element.same_value_zero(item))
        .map(|(index, _)| index)
}

/// [`index_of`] for a sorted array, located by binary search.
pub fn index_of_sorted(array: &Value, item: &Value) -> Option<usize> {
    let index = sorted_index(array, item, Iteratee::Identity).ok()?;
    elements_of(array)
        .get(index)
        .filter(|element| element.strict_equals(item))
        .map(|_| index)
}

/// Index of the last element strictly equal to `item` (`NaN` finds `NaN`),
/// searching backwards from `from_index`. A negative `from_index` counts
/// from the end.
pub fn last_index_of(array: &Value, item: &Value, from_index: Option<isize>) -> Option<usize> {
    let elements = elements_of(array);
    let end = match from_index {
        Some(index) if index < 0 => elements.len().checked_sub(index.unsigned_abs() - 1),
        Some(index) => Some(elements.len().min(index.unsigned_abs() + 1)),
        None => Some(elements.len()),
    }?;
    elements[..end.min(elements.len())]
        .iter()
        .rposition(|element| element.same_value_zero(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Function;
    use crate::{record, seq};
    use rstest::rstest;

    #[rstest]
    fn test_find_index_and_last_index() {
        let even = Function::unary(|value| Value::from(value.to_number() % 2.0 == 0.0));
        let list = seq![1, 4, 5, 8];
        assert_eq!(find_index(&list, &even).unwrap(), Some(1));
        assert_eq!(find_last_index(&list, &even).unwrap(), Some(3));
        assert_eq!(find_index(&seq![1, 3], &even).unwrap(), None);
    }

    #[rstest]
    fn test_find_index_with_matcher() {
        let list = seq![record! { "id" => 1 }, record! { "id" => 2 }];
        assert_eq!(find_index(&list, record! { "id" => 2 }).unwrap(), Some(1));
    }

    #[rstest]
    fn test_sorted_index_by_property() {
        let list = seq![record! { "age" => 30 }, record! { "age" => 50 }];
        assert_eq!(sorted_index(&list, &record! { "age" => 40 }, "age").unwrap(), 1);
    }

    #[rstest]
    #[case(None, Some(3))]
    #[case(Some(-2), Some(3))]
    #[case(Some(-10), Some(3))]
    #[case(Some(4), None)]
    fn test_index_of_from(#[case] from_index: Option<isize>, #[case] expected: Option<usize>) {
        assert_eq!(index_of(&seq![0, 1, 2, 3, 4], &Value::from(3), from_index), expected);
    }

    #[rstest]
    fn test_index_of_nan() {
        assert_eq!(index_of(&seq![1, f64::NAN], &Value::from(f64::NAN), None), Some(1));
        assert_eq!(last_index_of(&seq![f64::NAN, 1], &Value::from(f64::NAN), None), Some(0));
    }

    #[rstest]
    fn test_index_of_sorted() {
        let list = seq![10, 20, 30];
        assert_eq!(index_of_sorted(&list, &Value::from(20)), Some(1));
        assert_eq!(index_of_sorted(&list, &Value::from(25)), None);
    }

    #[rstest]
    #[case(None, Some(3))]
    #[case(Some(2), Some(0))]
    #[case(Some(-2), Some(0))]
    #[case(Some(-1), Some(3))]
    #[case(Some(-5), None)]
    fn test_last_index_of_from(#[case] from_index: Option<isize>, #[case] expected: Option<usize>) {
        assert_eq!(last_index_of(&seq![1, 2, 3, 1], &Value::from(1), from_index), expected);
    }
}
