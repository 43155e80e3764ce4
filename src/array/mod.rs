//! Operations on sequences.
//!
//! These helpers take any sequence-like [`Value`](crate::Value): arrays,
//! strings, and records with a numeric `length`. Non-sequence inputs act as
//! empty sequences. Results are always fresh arrays; inputs are never
//! modified.
//!
//! Searches report positions as `Option<usize>` rather than a `-1`
//! sentinel.
//!
//! # Examples
//!
//! ```rust
//! use lowbar::array::{chunk, first, flatten, uniq};
//! use lowbar::{Value, seq};
//!
//! let nested = seq![1, seq![2, seq![3]], 1];
//! let flat = flatten(&nested, false);
//! assert_eq!(flat, seq![1, 2, 3, 1]);
//! assert_eq!(uniq(&flat, false, ()).unwrap(), seq![1, 2, 3]);
//! assert_eq!(chunk(&flat, 3), seq![seq![1, 2, 3], seq![1]]);
//! assert_eq!(first(&flat), Value::from(1));
//! ```

mod search;
mod sets;
mod slicing;

pub use search::{
    find_index, find_last_index, index_of, index_of_sorted, last_index_of, sorted_index,
};
pub use sets::{difference, intersection, union, uniq, without};
pub use slicing::{
    chunk, compact, first, first_n, flatten, initial, last, last_n, object, range, rest, unzip,
    zip,
};

pub use sets::uniq as unique;
pub use slicing::{first as head, first_n as take, rest as drop, rest as tail};
