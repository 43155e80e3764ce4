use std::rc::Rc;

use crate::value::{Function, Value};

/// A predicate testing whether a candidate carries a fixed set of
/// key/value pairs.
///
/// The pairs are copied from the attribute record when the matcher is built,
/// so later changes to the attribute record do not affect it.
/// Comparison is single level and strict: a nested record in the
/// attribute record matches only that very record.
#[derive(Clone, Debug)]
pub struct Matcher {
    attributes: Vec<(Rc<str>, Value)>,
}

impl Matcher {
    /// Snapshots the own key/value pairs of `attributes`.
    pub fn new(attributes: &Value) -> Self {
        Self {
            attributes: attributes
                .own_keys()
                .into_iter()
                .map(|key| {
                    let value = attributes.get(&key);
                    (key, value)
                })
                .collect(),
        }
    }

    /// Returns whether `candidate` has every pair.
    ///
    /// A key counts as present when it is readable from the candidate,
    /// either as an own property or through the prototype chain. A
    /// `null`/`undefined` candidate only matches an empty attribute record.
    pub fn matches(&self, candidate: &Value) -> bool {
        if candidate.is_nil() {
            return self.attributes.is_empty();
        }
        self.attributes.iter().all(|(key, expected)| {
            expected.strict_equals(&candidate.get(key)) && candidate.has_property(key)
        })
    }
}

/// Returns whether `object` carries every own key/value pair of
/// `attributes`; see [`Matcher::matches`].
pub fn is_match(object: &Value, attributes: &Value) -> bool {
    Matcher::new(attributes).matches(object)
}

/// Returns a predicate function built from `attributes`.
///
/// # Examples
///
/// ```rust
/// use lowbar::iteratee::matcher;
/// use lowbar::{Value, record};
///
/// let ready = matcher(&record! { "selected" => true, "visible" => true });
/// let item = record! { "selected" => true, "visible" => true, "id" => 1 };
/// assert_eq!(ready.invoke(&[item]).unwrap(), Value::from(true));
/// ```
pub fn matcher(attributes: &Value) -> Function {
    let matcher = Matcher::new(attributes);
    Function::unary(move |candidate| Value::Bool(matcher.matches(&candidate)))
}
