//! Operations on records.
//!
//! Keys are always enumerated in insertion order. "Own" keys live on the
//! record itself; "inherited" keys are reached through its prototype
//! chain. Primitives have no keys.
//!
//! The assigning operations ([`extend`], [`extend_own`], [`defaults`])
//! write into their target and return it; everything else builds a fresh
//! record.
//!
//! # Examples
//!
//! ```rust
//! use lowbar::object::{defaults, invert, keys, pick};
//! use lowbar::{Value, record, seq};
//!
//! let options = record! { "color" => "red" };
//! defaults(&options, &[record! { "color" => "blue", "size" => "large" }]);
//!
//! assert_eq!(keys(&options), seq!["color", "size"]);
//! assert_eq!(pick(&options, &[Value::from("size")]), record! { "size" => "large" });
//! assert_eq!(invert(&options), record! { "red" => "color", "large" => "size" });
//! ```

mod assign;
mod inspect;
mod keys;

pub use assign::{clone, create, defaults, extend, extend_own, omit, omit_by, pick, pick_by};
pub use inspect::{has, is_empty, result, tap};
pub use keys::{all_keys, find_key, functions, invert, keys, map_object, pairs, values};

pub use assign::extend_own as assign;
pub use keys::functions as methods;
