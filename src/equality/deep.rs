use smallvec::SmallVec;

use crate::value::{Array, Object, Value};

/// Ancestors currently being compared, one stack per side.
///
/// Allocated per top-level call, so concurrent comparisons never share
/// scratch state.
#[derive(Default)]
struct Ancestors {
    left: SmallVec<[*const (); 16]>,
    right: SmallVec<[*const (); 16]>,
}

impl Ancestors {
    fn push(&mut self, left: *const (), right: *const ()) {
        self.left.push(left);
        self.right.push(right);
    }

    fn pop(&mut self) {
        self.left.pop();
        self.right.pop();
    }

    /// For a container already on the left stack, whether `right` sits at
    /// the same depth on the right stack.
    fn revisit(&self, left: *const (), right: *const ()) -> Option<bool> {
        self.left
            .iter()
            .rposition(|ancestor| *ancestor == left)
            .map(|depth| self.right[depth] == right)
    }
}

/// Outcome of comparing one pair without looking inside containers.
enum Step {
    Equal,
    Unequal,
    Descend {
        left: *const (),
        right: *const (),
        pairs: Vec<(Value, Value)>,
    },
}

/// Children of one container pair still waiting to be compared.
struct Frame {
    pairs: Vec<(Value, Value)>,
}

/// Returns whether `left` and `right` are structurally equivalent.
///
/// Nesting depth is bounded by memory only: containers are walked with an
/// explicit work list rather than recursion.
pub fn is_equal(left: &Value, right: &Value) -> bool {
    let mut ancestors = Ancestors::default();
    let mut frames = vec![Frame {
        pairs: vec![(left.clone(), right.clone())],
    }];
    while let Some(frame) = frames.last_mut() {
        let Some((left, right)) = frame.pairs.pop() else {
            frames.pop();
            ancestors.pop();
            continue;
        };
        match step(&left, &right, &ancestors) {
            Step::Equal => {}
            Step::Unequal => return false,
            Step::Descend { left, right, pairs } => {
                ancestors.push(left, right);
                frames.push(Frame { pairs });
            }
        }
    }
    true
}

fn step(left: &Value, right: &Value, ancestors: &Ancestors) -> Step {
    if left.strict_equals(right) {
        return match (left, right) {
            (Value::Number(a), Value::Number(b)) => {
                verdict(a.is_sign_negative() == b.is_sign_negative() || *a != 0.0)
            }
            _ => Step::Equal,
        };
    }
    if left.is_nil() || right.is_nil() {
        return Step::Unequal;
    }
    if left.is_nan() {
        return verdict(right.is_nan());
    }
    deep_step(left, right, ancestors)
}

const fn verdict(equal: bool) -> Step {
    if equal { Step::Equal } else { Step::Unequal }
}

#[allow(clippy::float_cmp)]
fn deep_step(left: &Value, right: &Value, ancestors: &Ancestors) -> Step {
    if left.tag() != right.tag() {
        return Step::Unequal;
    }
    match (left, right) {
        (Value::String(a), Value::String(b)) => verdict(a == b),
        (Value::RegExp(a), Value::RegExp(b)) => verdict(a.to_string() == b.to_string()),
        (Value::Number(a), Value::Number(b)) => verdict(if a.is_nan() {
            b.is_nan()
        } else if *a == 0.0 {
            *b == 0.0 && a.is_sign_negative() == b.is_sign_negative()
        } else {
            a == b
        }),
        (Value::Date(a), Value::Date(b)) => verdict(a.millis() == b.millis()),
        (Value::Bool(a), Value::Bool(b)) => verdict(a == b),
        (Value::Symbol(a), Value::Symbol(b)) => verdict(a.ptr_eq(b)),
        (Value::Array(a), Value::Array(b)) => guarded(ancestors, a.id(), b.id(), || array_pairs(a, b)),
        (Value::Object(a), Value::Object(b)) => {
            if !constructors_compatible(a, b) {
                return Step::Unequal;
            }
            guarded(ancestors, a.id(), b.id(), || object_pairs(a, b))
        }
        // Functions reach this point only when they are distinct.
        _ => Step::Unequal,
    }
}

/// Objects built by different constructors are never equal. A record that
/// exposes no `constructor` at all stands for the plain record constructor.
fn constructors_compatible(left: &Object, right: &Object) -> bool {
    left.get("constructor").strict_equals(&right.get("constructor"))
}

fn guarded<F>(ancestors: &Ancestors, left: *const (), right: *const (), pairs: F) -> Step
where
    F: FnOnce() -> Option<Vec<(Value, Value)>>,
{
    if let Some(consistent) = ancestors.revisit(left, right) {
        return verdict(consistent);
    }
    match pairs() {
        Some(pairs) => Step::Descend { left, right, pairs },
        None => Step::Unequal,
    }
}

/// Element pairs in index order, popped last first. `None` when the
/// lengths differ.
fn array_pairs(left: &Array, right: &Array) -> Option<Vec<(Value, Value)>> {
    let left = left.to_vec();
    let right = right.to_vec();
    (left.len() == right.len()).then(|| left.into_iter().zip(right).collect())
}

/// Value pairs by own key. `None` when the key sets differ.
fn object_pairs(left: &Object, right: &Object) -> Option<Vec<(Value, Value)>> {
    let entries = left.entries();
    if right.len() != entries.len() {
        return None;
    }
    entries
        .into_iter()
        .map(|(key, value)| right.get_own(&key).map(|other| (value, other)))
        .collect()
}
