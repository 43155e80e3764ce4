use crate::array::flatten;
use crate::error::{Error, Result};
use crate::value::{Function, Value};

/// Marker for an argument left open by [`partial`].
///
/// Inside the [`partial!`](crate::partial) macro, write `__` as a literal
/// token instead of importing this constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placeholder;

/// The placeholder constant for programmatic partial application.
#[allow(non_upper_case_globals)]
pub const __: Placeholder = Placeholder;

/// One pre-supplied argument of a partially applied function.
#[derive(Clone, Debug)]
pub enum Slot {
    /// Filled, in order, by the call-time arguments.
    Placeholder,
    /// A fixed argument.
    Bound(Value),
}

impl From<Placeholder> for Slot {
    fn from(_: Placeholder) -> Self {
        Self::Placeholder
    }
}

impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        Self::Bound(value)
    }
}

impl From<&Value> for Slot {
    fn from(value: &Value) -> Self {
        Self::Bound(value.clone())
    }
}

fn merge(slots: &[Slot], arguments: &[Value]) -> Vec<Value> {
    let mut remaining = arguments.iter();
    let mut merged: Vec<Value> = slots
        .iter()
        .map(|slot| match slot {
            Slot::Bound(value) => value.clone(),
            Slot::Placeholder => remaining.next().cloned().unwrap_or_default(),
        })
        .collect();
    merged.extend(remaining.cloned());
    merged
}

/// Binds `function` to `context`, fixing `arguments` in front of the
/// call-time ones.
///
/// Constructing the bound function constructs `function` with the merged
/// arguments; `context` is ignored in that case.
///
/// # Errors
///
/// Returns [`Error::NotCallable`] when `function` is not a function.
///
/// # Examples
///
/// ```rust
/// use lowbar::function::bind;
/// use lowbar::value::Function;
/// use lowbar::{Value, record};
///
/// let greet = Function::new(|receiver, arguments| {
///     Ok(Value::from(format!("{}: {}", arguments[0], receiver.get("name"))))
/// });
/// let bound = bind(&Value::from(greet), &record! { "name" => "moe" }, &[Value::from("hi")]).unwrap();
/// assert_eq!(bound.invoke(&[]).unwrap(), Value::from("hi: moe"));
/// ```
pub fn bind(function: &Value, context: &Value, arguments: &[Value]) -> Result<Function> {
    let Value::Function(target) = function else {
        return Err(Error::not_callable("bind"));
    };
    let slots: Vec<Slot> = arguments.iter().map(Slot::from).collect();
    Ok(bound(target, Some(context.clone()), slots))
}

/// Fixes some arguments of `function` without touching its receiver.
///
/// [`Slot::Placeholder`] entries are filled positionally by call-time
/// arguments; call-time arguments left over are appended.
///
/// # Examples
///
/// ```rust
/// use lowbar::function::{Slot, partial};
/// use lowbar::value::Function;
/// use lowbar::Value;
///
/// let subtract = Function::binary(|a, b| Value::from(a.to_number() - b.to_number()));
/// let sub5 = partial(&subtract, [Value::from(5).into()]);
/// assert_eq!(sub5.invoke(&[Value::from(20)]).unwrap(), Value::from(-15));
///
/// let sub_from20 = partial(&subtract, [Slot::Placeholder, Value::from(20).into()]);
/// assert_eq!(sub_from20.invoke(&[Value::from(5)]).unwrap(), Value::from(-15));
/// ```
pub fn partial(function: &Function, slots: impl IntoIterator<Item = Slot>) -> Function {
    bound(function, None, slots.into_iter().collect())
}

fn bound(target: &Function, context: Option<Value>, slots: Vec<Slot>) -> Function {
    let name = format!("bound {}", target.name());
    let constructed = target.clone();
    let constructed_slots = slots.clone();
    let target = target.clone();
    Function::with_construct(
        &name,
        move |receiver, arguments| {
            let receiver = context.as_ref().unwrap_or(receiver);
            target.call(receiver, &merge(&slots, arguments))
        },
        move |arguments| constructed.construct(&merge(&constructed_slots, arguments)),
    )
}

/// Replaces the named methods of `object` by copies bound to `object`.
/// Names may be nested in arrays.
///
/// # Errors
///
/// Returns [`Error::MissingMethodNames`] without names, and
/// [`Error::NotCallable`] when a named property is not a function.
pub fn bind_all(object: &Value, names: &[Value]) -> Result<Value> {
    let names = flatten(&Value::from(names.to_vec()), false);
    let names = names.as_array().map(crate::value::Array::to_vec).unwrap_or_default();
    if names.is_empty() {
        return Err(Error::MissingMethodNames);
    }
    for name in names {
        let key = name.to_property_key();
        let method = object.get(&key);
        if !method.is_function() {
            return Err(Error::not_callable("bind_all"));
        }
        let bound = bind(&method, object, &[])?;
        if let Some(target) = object.as_object() {
            target.set(key, bound);
        }
    }
    Ok(object.clone())
}
