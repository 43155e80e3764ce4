//! Error types for the toolkit.
//!
//! Operations distinguish between hard failures, which are programming
//! errors at the call site and are returned as [`Error`], and soft
//! fallbacks (missing properties, empty inputs), which resolve to a
//! well-defined empty or identity result and are never reported here.
//!
//! Failures raised by caller-supplied functions travel through every
//! primitive unchanged: a traversal stops at the first failure and no
//! partial result is returned.

#[cfg(feature = "template")]
use crate::template::TemplateError;

/// Represents every failure the toolkit can report.
///
/// # Examples
///
/// ```rust
/// use lowbar::Error;
///
/// let error = Error::callback("boom");
/// assert_eq!(format!("{error}"), "callback failed: boom");
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A collection with no elements was reduced without an initial value.
    #[error("reduce of empty collection with no initial value")]
    EmptyReduce,

    /// An operation required a function but received another kind of value.
    #[error("{operation}: expected a function")]
    NotCallable {
        /// The operation that rejected the value.
        operation: &'static str,
    },

    /// `bind_all` was called without any method names.
    #[error("bind_all must be passed function names")]
    MissingMethodNames,

    /// A template expression referenced a name that is not in scope.
    #[error("{name} is not defined")]
    Reference {
        /// The unresolved name.
        name: String,
    },

    /// A template expression applied an operation to the wrong kind of value.
    #[error("type error: {message}")]
    Type {
        /// Description of the mismatch.
        message: String,
    },

    /// A template failed to compile.
    #[cfg(feature = "template")]
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A caller-supplied function failed.
    #[error("callback failed: {0}")]
    Callback(String),
}

impl Error {
    /// Creates the error a caller-supplied function returns to abort a traversal.
    pub fn callback(message: impl Into<String>) -> Self {
        Self::Callback(message.into())
    }

    pub(crate) const fn not_callable(operation: &'static str) -> Self {
        Self::NotCallable { operation }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
