use std::fmt;
use std::rc::Rc;

/// A unique symbol. Two symbols are equal only if they are the same symbol.
#[derive(Clone)]
pub struct Symbol(Rc<Option<Rc<str>>>);

impl Symbol {
    /// Creates a fresh symbol with an optional description.
    pub fn new(description: Option<&str>) -> Self {
        Self(Rc::new(description.map(Rc::from)))
    }

    /// The description given at creation.
    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns `true` if both handles are the same symbol.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Symbol({})", self.description().unwrap_or_default())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, formatter)
    }
}

/// A point in time as milliseconds since the Unix epoch.
///
/// `NaN` milliseconds represent an invalid date.
#[derive(Clone)]
pub struct Date(Rc<f64>);

impl Date {
    /// Creates a date from a millisecond timestamp.
    pub fn from_millis(millis: f64) -> Self {
        Self(Rc::new(millis))
    }

    /// The millisecond timestamp.
    pub fn millis(&self) -> f64 {
        *self.0
    }

    /// Returns `true` if both handles are the same date object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Date({})", self.millis())
    }
}

/// A regular expression literal: pattern source plus flags.
///
/// The value is descriptive only; it is compared by its literal form.
#[derive(Clone)]
pub struct RegExp(Rc<(Rc<str>, Rc<str>)>);

impl RegExp {
    /// Creates a regular expression value.
    pub fn new(source: &str, flags: &str) -> Self {
        Self(Rc::new((Rc::from(source), Rc::from(flags))))
    }

    /// The pattern source.
    pub fn source(&self) -> &str {
        &self.0.0
    }

    /// The flags.
    pub fn flags(&self) -> &str {
        &self.0.1
    }

    /// Returns `true` if both handles are the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for RegExp {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "/{}/{}", self.source(), self.flags())
    }
}

impl fmt::Debug for RegExp {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, formatter)
    }
}
