//! Adapters that change how a [`Function`](crate::value::Function) is called.
//!
//! # Overview
//!
//! - [`bind`], [`partial`], [`bind_all`]: fix the receiver and/or leading
//!   arguments. Bound functions can still be used as constructors.
//! - [`memoize`]: cache results by a string key.
//! - [`once`], [`before`], [`after`]: gate how many calls reach the
//!   wrapped function.
//! - [`compose`], [`wrap`], [`negate`]: build new functions from old ones.
//! - [`identity`], [`constant`], [`noop`], [`times`]: small helpers.
//!
//! The [`partial!`](crate::partial) and [`compose!`](crate::compose) macros
//! are shorthands for [`partial`] and [`compose`].
//!
//! Every adapter forwards the receiver it is called with, unless it binds
//! one itself.
//!
//! # Examples
//!
//! ```rust
//! use lowbar::function::{memoize, once};
//! use lowbar::value::Function;
//! use lowbar::{Value, compose, partial};
//!
//! let add = Function::binary(|a, b| Value::from(a.to_number() + b.to_number()));
//! let double = Function::unary(|x| Value::from(x.to_number() * 2.0));
//!
//! let add_ten = partial!(add, __, 10);
//! let pipeline = compose!(double, add_ten);
//! assert_eq!(pipeline.invoke(&[Value::from(1)]).unwrap(), Value::from(22));
//!
//! let cached = memoize(&once(&pipeline), None);
//! assert_eq!(cached.invoke(&[Value::from(2)]).unwrap(), Value::from(24));
//! ```

mod bind;
mod compose_macro;
mod gate;
mod memoize;
mod partial_macro;
mod utils;

pub use bind::{Placeholder, Slot, __, bind, bind_all, partial};
pub use gate::{after, before, once};
pub use memoize::memoize;
pub use utils::{compose, constant, identity, negate, noop, times, wrap};
