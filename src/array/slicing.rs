use crate::collection::traversal::{elements_of, values_of};
use crate::value::{Object, Value};

fn slice(array: &Value, start: usize, end: usize) -> Value {
    let elements = elements_of(array);
    let end = end.min(elements.len());
    let start = start.min(end);
    Value::from(elements[start..end].to_vec())
}

fn length_of(array: &Value) -> usize {
    array.sequence_length().unwrap_or(0)
}

/// The first element, or `undefined` for an empty or non-sequence input.
pub fn first(array: &Value) -> Value {
    match length_of(array) {
        0 => Value::Undefined,
        _ => array.get("0"),
    }
}

/// The first `n` elements.
///
/// # Examples
///
/// ```rust
/// use lowbar::array::first_n;
/// use lowbar::seq;
///
/// assert_eq!(first_n(&seq![5, 4, 3, 2, 1], 2), seq![5, 4]);
/// ```
pub fn first_n(array: &Value, n: usize) -> Value {
    slice(array, 0, n)
}

/// Everything but the last `n` elements (one by default).
pub fn initial(array: &Value, n: Option<usize>) -> Value {
    let length = length_of(array);
    slice(array, 0, length.saturating_sub(n.unwrap_or(1)))
}

/// The last element, or `undefined` for an empty or non-sequence input.
pub fn last(array: &Value) -> Value {
    match length_of(array) {
        0 => Value::Undefined,
        length => array.get(&(length - 1).to_string()),
    }
}

/// The last `n` elements.
pub fn last_n(array: &Value, n: usize) -> Value {
    let length = length_of(array);
    slice(array, length.saturating_sub(n), length)
}

/// Everything but the first `n` elements (one by default).
pub fn rest(array: &Value, n: Option<usize>) -> Value {
    slice(array, n.unwrap_or(1), length_of(array))
}

/// The truthy elements.
pub fn compact(array: &Value) -> Value {
    values_of(array).into_iter().filter(Value::is_truthy).collect()
}

/// Flattens nested arrays, one level when `shallow`, fully otherwise.
///
/// Only arrays are unpacked; other sequence-like values are kept as
/// elements.
///
/// # Examples
///
/// ```rust
/// use lowbar::array::flatten;
/// use lowbar::seq;
///
/// let nested = seq![1, seq![2], seq![3, seq![seq![4]]]];
/// assert_eq!(flatten(&nested, false), seq![1, 2, 3, 4]);
/// assert_eq!(flatten(&nested, true), seq![1, 2, 3, seq![seq![4]]]);
/// ```
pub fn flatten(array: &Value, shallow: bool) -> Value {
    let mut output = Vec::new();
    flatten_into(&elements_of(array), shallow, false, &mut output);
    Value::from(output)
}

/// Flattens into `output`. With `strict`, top-level non-array elements
/// are dropped instead of kept.
pub(crate) fn flatten_into(elements: &[Value], shallow: bool, strict: bool, output: &mut Vec<Value>) {
    for element in elements {
        match element {
            Value::Array(nested) if shallow => output.extend(nested.to_vec()),
            Value::Array(nested) => flatten_into(&nested.to_vec(), false, strict, output),
            other if !strict => output.push(other.clone()),
            _ => {}
        }
    }
}

/// Builds a record from `[key, value]` pairs, or from a list of keys and a
/// parallel list of values.
///
/// # Examples
///
/// ```rust
/// use lowbar::array::object;
/// use lowbar::{record, seq};
///
/// assert_eq!(object(&seq!["moe", "larry"], Some(&seq![30, 40])), record! { "moe" => 30, "larry" => 40 });
/// assert_eq!(object(&seq![seq!["moe", 30]], None), record! { "moe" => 30 });
/// ```
pub fn object(list: &Value, values: Option<&Value>) -> Value {
    let result = Object::new();
    for (index, entry) in elements_of(list).iter().enumerate() {
        match values {
            Some(values) => result.set(entry.to_property_key(), values.get(&index.to_string())),
            None => result.set(entry.get("0").to_property_key(), entry.get("1")),
        }
    }
    Value::Object(result)
}

/// Merges parallel arrays: element `i` of the result holds element `i` of
/// every input.
pub fn zip(arrays: &[Value]) -> Value {
    unzip(&Value::from(arrays.to_vec()))
}

/// The inverse of [`zip`]: splits an array of groups into one array per
/// position. Shorter groups contribute `undefined`.
pub fn unzip(array: &Value) -> Value {
    let groups = elements_of(array);
    let width = groups
        .iter()
        .filter_map(Value::sequence_length)
        .max()
        .unwrap_or(0);
    (0..width)
        .map(|position| {
            let key = position.to_string();
            groups.iter().map(|group| group.get(&key)).collect::<Value>()
        })
        .collect()
}

/// Longest array a range may produce, `2^32 - 1`.
const MAX_ARRAY_LENGTH: f64 = 4_294_967_295.0;

/// A list of numbers from `start` (inclusive) to `stop` (exclusive),
/// advancing by `step`.
///
/// With `stop` omitted the range runs from `0` to `start`. A zero or
/// missing `step` counts by one towards `stop`. Bounds that would need
/// an infinite or longer-than-array-limit result yield an empty array.
///
/// # Examples
///
/// ```rust
/// use lowbar::array::range;
/// use lowbar::seq;
///
/// assert_eq!(range(5.0, None, None), seq![0, 1, 2, 3, 4]);
/// assert_eq!(range(0.0, Some(-3.0), None), seq![0, -1, -2]);
/// assert_eq!(range(0.0, Some(10.0), Some(5.0)), seq![0, 5]);
/// ```
pub fn range(start: f64, stop: Option<f64>, step: Option<f64>) -> Value {
    let (start, stop) = stop.map_or((0.0, start), |stop| (start, stop));
    let step = match step {
        Some(step) if step != 0.0 && !step.is_nan() => step,
        _ if stop < start => -1.0,
        _ => 1.0,
    };
    let length = ((stop - start) / step).ceil().max(0.0);
    if !length.is_finite() || length > MAX_ARRAY_LENGTH {
        return Value::from(Vec::new());
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let length = length as usize;
    (0..length)
        .map(|index| {
            #[allow(clippy::cast_precision_loss)]
            let offset = index as f64 * step;
            Value::from(offset + start)
        })
        .collect()
}

/// Splits an array into groups of `count`; the last group may be shorter.
/// A zero `count` yields an empty array.
pub fn chunk(array: &Value, count: usize) -> Value {
    if count == 0 {
        return Value::from(Vec::new());
    }
    elements_of(array)
        .chunks(count)
        .map(|group| Value::from(group.to_vec()))
        .collect()
}
