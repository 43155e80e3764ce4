//! Leaf helpers: HTML escaping and identifier generation.
//!
//! Type predicates live on [`Value`](crate::Value) itself
//! (`is_array`, `is_function`, `is_nan`, ...).

mod escape;
mod id;

pub use escape::{escape, unescape};
pub use id::{IdCounter, unique_id};
