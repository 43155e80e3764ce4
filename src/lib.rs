//! # lowbar
//!
//! A functional collection toolkit over dynamic values.
//!
//! ## Overview
//!
//! Every operation works over caller-owned [`Value`]s: arrays, array-like
//! sequences, records and functions. It includes:
//!
//! - **Iteratees**: function, property-path and partial-match shorthands
//!   normalized into one callback shape ([`iteratee`])
//! - **Collections**: iteration, filtering, grouping and sorting ([`collection`])
//! - **Arrays**: slicing, set operations and searches ([`array`])
//! - **Objects**: key enumeration, assignment and selection ([`object`])
//! - **Deep Equality**: structural comparison with cycle detection ([`equality`])
//! - **Function Adapters**: bind, partial, memoize, compose, once ([`function`])
//! - **Templates**: ERB style micro-templates (`template`)
//! - **Chaining**: method pipelines over the free functions (`chain`)
//!
//! ## Feature Flags
//!
//! - `template`: the template compiler (default)
//! - `chain`: the chaining pipeline (default)
//! - `serde`: `Serialize`/`Deserialize` for [`Value`]
//! - `fxhash` / `ahash`: alternative hashers for memoize caches
//! - `full`: `template`, `chain` and `serde`
//!
//! ## Example
//!
//! ```rust
//! use lowbar::prelude::*;
//!
//! let stooges = seq![
//!     record! { "name" => "moe", "age" => 40 },
//!     record! { "name" => "larry", "age" => 50 },
//!     record! { "name" => "curly", "age" => 60 },
//! ];
//!
//! assert_eq!(collection::pluck(&stooges, &Value::from("name")), seq!["moe", "larry", "curly"]);
//! assert_eq!(collection::max(&stooges, "age").unwrap().get("name"), Value::from("curly"));
//! assert_eq!(
//!     collection::count_by(&stooges, Function::unary(|s| Value::from(s.get("age").to_number() > 45.0))).unwrap(),
//!     record! { "false" => 1, "true" => 2 }
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the value types, the construction macros and the operation
/// modules. Operations stay behind their module name so that names such
/// as `drop` or `clone` never shadow the standard prelude.
///
/// # Usage
///
/// ```rust
/// use lowbar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::iteratee::{Callback, Iteratee};
    pub use crate::value::{Array, Function, Object, Value};
    pub use crate::{array, collection, equality, function, iteratee, object, utility};
    pub use crate::{compose, partial, record, seq};

    #[cfg(feature = "chain")]
    pub use crate::chain::{Chain, chain};

    #[cfg(feature = "template")]
    pub use crate::template::{Template, TemplateSettings};
}

pub mod array;
pub mod collection;
pub mod equality;
pub mod error;
pub mod function;
pub mod iteratee;
pub mod object;
pub mod utility;
pub mod value;

#[cfg(feature = "template")]
pub mod template;

#[cfg(feature = "chain")]
pub mod chain;

pub use equality::is_equal;
pub use error::{Error, Result};
pub use value::Value;
