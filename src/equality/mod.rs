//! Structural equality.
//!
//! [`is_equal`] compares two values by structure rather than identity:
//! arrays element by element, records by their own keys, dates by
//! timestamp, regular expressions by literal form. Functions and symbols
//! only ever equal themselves.
//!
//! # Numbers
//!
//! Unlike strict equality, `NaN` equals `NaN` and `0` does not equal `-0`.
//!
//! # Cycles
//!
//! Cyclic structures are compared with a pair of ancestor stacks scoped to
//! one top-level call. When a container is met again while it is still being
//! compared, the pair is taken to be equal if the other side sits at the
//! same depth of its own stack. The cyclic part is assumed consistent rather
//! than re-verified.
//!
//! Containers are walked with an explicit work list, so deeply nested
//! input does not exhaust the call stack.
//!
//! # Examples
//!
//! ```rust
//! use lowbar::equality::is_equal;
//! use lowbar::{Value, record, seq};
//!
//! assert!(is_equal(
//!     &record! { "a" => 1, "b" => seq![1, 2] },
//!     &record! { "a" => 1, "b" => seq![1, 2] },
//! ));
//! assert!(!is_equal(&seq![1, 2], &seq![1, 2, 3]));
//! assert!(is_equal(&Value::from(f64::NAN), &Value::from(f64::NAN)));
//! assert!(!is_equal(&Value::from(0), &Value::from(-0.0)));
//! ```

mod deep;

pub use deep::is_equal;
