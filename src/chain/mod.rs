//! Method-chaining pipeline over the free functions.
//!
//! [`chain`] wraps a value into an immutable [`Chain`]. Every collection,
//! array and object operation is available as a method that consumes the
//! chain and returns a new one holding the result; [`Chain::value`]
//! unwraps it. Any other function can be lifted with [`Chain::apply`].
//!
//! Results that are not values become values: booleans and sizes as they
//! are, a missing position as `-1` and a missing key as `undefined`.
//!
//! # Examples
//!
//! ```rust
//! use lowbar::chain::chain;
//! use lowbar::value::Function;
//! use lowbar::{Value, record, seq};
//!
//! let stooges = seq![
//!     record! { "name" => "curly", "age" => 25 },
//!     record! { "name" => "moe", "age" => 21 },
//!     record! { "name" => "larry", "age" => 23 },
//! ];
//! let describe = Function::unary(|stooge| Value::from(format!("{} is {}", stooge.get("name"), stooge.get("age"))));
//!
//! let youngest = chain(stooges)
//!     .sort_by("age").unwrap()
//!     .map(describe).unwrap()
//!     .first().unwrap()
//!     .value();
//! assert_eq!(youngest, Value::from("moe is 21"));
//! ```

use std::rc::Rc;

use crate::error::Result;
use crate::iteratee::{Callback, Iteratee};
use crate::value::Value;
use crate::{array, collection, object};

/// Conversion of an operation's result into the next chained value.
pub trait IntoChainValue {
    /// Converts `self`, propagating failures.
    ///
    /// # Errors
    ///
    /// Returns the error carried by a failed result.
    fn into_chain_value(self) -> Result<Value>;
}

impl IntoChainValue for Value {
    fn into_chain_value(self) -> Result<Value> {
        Ok(self)
    }
}

impl IntoChainValue for bool {
    fn into_chain_value(self) -> Result<Value> {
        Ok(Value::from(self))
    }
}

impl IntoChainValue for usize {
    fn into_chain_value(self) -> Result<Value> {
        Ok(Value::from(self))
    }
}

impl IntoChainValue for Option<usize> {
    fn into_chain_value(self) -> Result<Value> {
        Ok(self.map_or(Value::from(-1), Value::from))
    }
}

impl IntoChainValue for Option<Rc<str>> {
    fn into_chain_value(self) -> Result<Value> {
        Ok(Value::from(self))
    }
}

impl<T: IntoChainValue> IntoChainValue for Result<T> {
    fn into_chain_value(self) -> Result<Value> {
        self.and_then(IntoChainValue::into_chain_value)
    }
}

/// An immutable pipeline holding the current value.
#[derive(Clone, Debug, PartialEq)]
pub struct Chain {
    value: Value,
}

/// Starts a pipeline on `value`.
pub fn chain(value: impl Into<Value>) -> Chain {
    Chain {
        value: value.into(),
    }
}

/// Generates methods forwarding the held value as first argument.
macro_rules! lift {
    ($($(#[$meta:meta])* $name:ident => $function:path $(, $argument:ident: $type:ty)*;)+) => {
        $(
            $(#[$meta])*
            ///
            /// # Errors
            ///
            /// Returns the error of the underlying operation.
            pub fn $name(self $(, $argument: $type)*) -> Result<Self> {
                self.apply(|value| $function(value $(, $argument)*))
            }
        )+
    };
}

impl Chain {
    /// Ends the pipeline, returning the held value.
    pub fn value(self) -> Value {
        self.value
    }

    /// The held value.
    pub const fn as_value(&self) -> &Value {
        &self.value
    }

    /// Replaces the held value by `function(value)`.
    ///
    /// # Errors
    ///
    /// Returns the error raised by `function`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lowbar::chain::chain;
    /// use lowbar::{Value, seq};
    ///
    /// let length = chain(seq![1, 2, 3]).apply(|list| list.get("length")).unwrap();
    /// assert_eq!(length.value(), Value::from(3));
    /// ```
    pub fn apply<F, R>(self, function: F) -> Result<Self>
    where
        F: FnOnce(&Value) -> R,
        R: IntoChainValue,
    {
        Ok(chain(function(&self.value).into_chain_value()?))
    }

    // ========================================================================
    // Collections
    // ========================================================================

    lift! {
        /// See [`collection::each`].
        each => collection::each, callback: impl Into<Callback>;
        /// See [`collection::map`].
        map => collection::map, iteratee: impl Into<Iteratee>;
        /// See [`collection::reduce`].
        reduce => collection::reduce, callback: impl Into<Callback>, memo: Option<Value>;
        /// See [`collection::reduce_right`].
        reduce_right => collection::reduce_right, callback: impl Into<Callback>, memo: Option<Value>;
        /// See [`collection::find`].
        find => collection::find, predicate: impl Into<Iteratee>;
        /// See [`collection::filter`].
        filter => collection::filter, predicate: impl Into<Iteratee>;
        /// See [`collection::reject`].
        reject => collection::reject, predicate: impl Into<Iteratee>;
        /// See [`collection::every`].
        every => collection::every, predicate: impl Into<Iteratee>;
        /// See [`collection::some`].
        some => collection::some, predicate: impl Into<Iteratee>;
        /// See [`collection::contains`].
        contains => collection::contains, target: &Value, from_index: Option<isize>;
        /// See [`collection::invoke`].
        invoke => collection::invoke, method: &Value, arguments: &[Value];
        /// See [`collection::pluck`].
        pluck => collection::pluck, key: &Value;
        /// See [`collection::filter_where`].
        filter_where => collection::filter_where, attributes: &Value;
        /// See [`collection::find_where`].
        find_where => collection::find_where, attributes: &Value;
        /// See [`collection::max`].
        max => collection::max, iteratee: impl Into<Iteratee>;
        /// See [`collection::min`].
        min => collection::min, iteratee: impl Into<Iteratee>;
        /// See [`collection::sort_by`].
        sort_by => collection::sort_by, iteratee: impl Into<Iteratee>;
        /// See [`collection::group_by`].
        group_by => collection::group_by, iteratee: impl Into<Iteratee>;
        /// See [`collection::index_by`].
        index_by => collection::index_by, iteratee: impl Into<Iteratee>;
        /// See [`collection::count_by`].
        count_by => collection::count_by, iteratee: impl Into<Iteratee>;
        /// See [`collection::partition`].
        partition => collection::partition, predicate: impl Into<Iteratee>;
        /// See [`collection::to_array`].
        to_array => collection::to_array;
        /// See [`collection::size`].
        size => collection::size;
    }

    // ========================================================================
    // Arrays
    // ========================================================================

    lift! {
        /// See [`array::first`].
        first => array::first;
        /// See [`array::first_n`].
        first_n => array::first_n, n: usize;
        /// See [`array::initial`].
        initial => array::initial, n: Option<usize>;
        /// See [`array::last`].
        last => array::last;
        /// See [`array::last_n`].
        last_n => array::last_n, n: usize;
        /// See [`array::rest`].
        rest => array::rest, n: Option<usize>;
        /// See [`array::compact`].
        compact => array::compact;
        /// See [`array::flatten`].
        flatten => array::flatten, shallow: bool;
        /// See [`array::without`].
        without => array::without, values: &[Value];
        /// See [`array::uniq`].
        uniq => array::uniq, is_sorted: bool, iteratee: impl Into<Iteratee>;
        /// See [`array::difference`].
        difference => array::difference, others: &[Value];
        /// See [`array::object`].
        object => array::object, values: Option<&Value>;
        /// See [`array::unzip`].
        unzip => array::unzip;
        /// See [`array::chunk`].
        chunk => array::chunk, count: usize;
        /// See [`array::find_index`].
        find_index => array::find_index, predicate: impl Into<Iteratee>;
        /// See [`array::find_last_index`].
        find_last_index => array::find_last_index, predicate: impl Into<Iteratee>;
        /// See [`array::sorted_index`].
        sorted_index => array::sorted_index, value: &Value, iteratee: impl Into<Iteratee>;
        /// See [`array::index_of`].
        index_of => array::index_of, item: &Value, from_index: Option<isize>;
        /// See [`array::last_index_of`].
        last_index_of => array::last_index_of, item: &Value, from_index: Option<isize>;
    }

    /// See [`array::union`]; the held value comes first.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the other methods.
    pub fn union(self, others: &[Value]) -> Result<Self> {
        self.apply(|value| array::union(&prepend(value, others)))
    }

    /// See [`array::intersection`]; the held value comes first.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the other methods.
    pub fn intersection(self, others: &[Value]) -> Result<Self> {
        self.apply(|value| array::intersection(&prepend(value, others)))
    }

    /// See [`array::zip`]; the held value comes first.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the other methods.
    pub fn zip(self, others: &[Value]) -> Result<Self> {
        self.apply(|value| array::zip(&prepend(value, others)))
    }

    // ========================================================================
    // Objects
    // ========================================================================

    lift! {
        /// See [`object::keys`].
        keys => object::keys;
        /// See [`object::all_keys`].
        all_keys => object::all_keys;
        /// See [`object::values`].
        values => object::values;
        /// See [`object::pairs`].
        pairs => object::pairs;
        /// See [`object::invert`].
        invert => object::invert;
        /// See [`object::functions`].
        functions => object::functions;
        /// See [`object::map_object`].
        map_object => object::map_object, iteratee: impl Into<Iteratee>;
        /// See [`object::find_key`].
        find_key => object::find_key, predicate: impl Into<Iteratee>;
        /// See [`object::extend`].
        extend => object::extend, sources: &[Value];
        /// See [`object::extend_own`].
        extend_own => object::extend_own, sources: &[Value];
        /// See [`object::defaults`].
        defaults => object::defaults, sources: &[Value];
        /// See [`object::create`].
        create => object::create, properties: Option<&Value>;
        /// See [`object::clone`].
        shallow_clone => object::clone;
        /// See [`object::pick`].
        pick => object::pick, keys: &[Value];
        /// See [`object::pick_by`].
        pick_by => object::pick_by, predicate: impl Into<Callback>;
        /// See [`object::omit`].
        omit => object::omit, keys: &[Value];
        /// See [`object::omit_by`].
        omit_by => object::omit_by, predicate: impl Into<Callback>;
        /// See [`object::has`].
        has => object::has, path: &Value;
        /// See [`object::is_empty`].
        is_empty => object::is_empty;
        /// See [`object::result`].
        result => object::result, path: &Value, fallback: &Value;
        /// See [`object::tap`].
        tap => object::tap, interceptor: impl Into<Callback>;
    }
}

fn prepend(value: &Value, others: &[Value]) -> Vec<Value> {
    std::iter::once(value.clone()).chain(others.iter().cloned()).collect()
}

impl From<Chain> for Value {
    fn from(chain: Chain) -> Self {
        chain.value
    }
}
