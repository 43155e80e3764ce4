//! Operations over sequences and records alike.
//!
//! Every operation classifies its input once: values with a numeric
//! `length` in `[0, 2^53 - 1]` are walked by index, everything else by its
//! own enumerable keys in insertion order. Callbacks receive
//! `(value, index_or_key, collection)`.
//!
//! Operations taking an `impl Into<Iteratee>` accept any callback
//! shorthand (see [`crate::iteratee`]): a [`Function`](crate::value::Function),
//! a property name, a key path, a record to match against, or `()` for the
//! identity.
//!
//! # Examples
//!
//! ```rust
//! use lowbar::collection::{filter, map, partition};
//! use lowbar::{Value, record, seq};
//!
//! let stooges = seq![
//!     record! { "name" => "moe", "active" => true },
//!     record! { "name" => "larry", "active" => false },
//! ];
//!
//! assert_eq!(map(&stooges, "name").unwrap(), seq!["moe", "larry"]);
//! assert_eq!(map(&filter(&stooges, "active").unwrap(), "name").unwrap(), seq!["moe"]);
//!
//! let split = partition(&stooges, record! { "active" => true }).unwrap();
//! assert_eq!(split.get("1").get("length"), Value::from(1));
//! ```

mod grouping;
mod iteration;
mod query;
pub(crate) mod traversal;

pub use grouping::{count_by, group_by, index_by, partition};
pub use iteration::{each, every, filter, find, map, reduce, reduce_right, reject, some};
pub use query::{
    contains, filter_where, find_where, invoke, max, min, pluck, size, sort_by, to_array,
};

pub use iteration::{
    each as for_each, every as all, filter as select, find as detect, map as collect,
    reduce as foldl, reduce as inject, reduce_right as foldr, some as any,
};
pub use query::contains as includes;
