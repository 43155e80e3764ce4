use std::cell::RefCell;
use std::rc::Rc;

use crate::value::{Function, Value};

#[cfg(feature = "fxhash")]
type Cache = rustc_hash::FxHashMap<String, Value>;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
type Cache = ahash::AHashMap<String, Value>;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
type Cache = std::collections::HashMap<String, Value>;

/// Caches the results of `function` by key.
///
/// The key is the string coercion of the first argument, or of what
/// `hasher` returns for the full argument list. Distinct records therefore
/// share the key `"[object Object]"` unless a hasher tells them apart.
///
/// The cache lives as long as the returned function and is never evicted.
/// Errors are not cached.
///
/// # Examples
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use lowbar::function::memoize;
/// use lowbar::value::Function;
/// use lowbar::Value;
///
/// let calls = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&calls);
/// let square = Function::unary(move |value| {
///     counter.set(counter.get() + 1);
///     Value::from(value.to_number() * value.to_number())
/// });
///
/// let fast_square = memoize(&square, None);
/// assert_eq!(fast_square.invoke(&[Value::from(4)]).unwrap(), Value::from(16));
/// assert_eq!(fast_square.invoke(&[Value::from(4)]).unwrap(), Value::from(16));
/// assert_eq!(calls.get(), 1);
/// ```
pub fn memoize(function: &Function, hasher: Option<Function>) -> Function {
    let cache: Rc<RefCell<Cache>> = Rc::default();
    let function = function.clone();
    Function::named("memoize", move |receiver, arguments| {
        let key = match &hasher {
            Some(hasher) => hasher.call(receiver, arguments)?.to_string(),
            None => arguments.first().cloned().unwrap_or_default().to_string(),
        };
        if let Some(cached) = cache.borrow().get(&key) {
            return Ok(cached.clone());
        }
        tracing::trace!(key = %key, "memoize cache miss");
        let computed = function.call(receiver, arguments)?;
        Ok(cache.borrow_mut().entry(key).or_insert(computed).clone())
    })
}
