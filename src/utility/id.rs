use std::sync::atomic::{AtomicU64, Ordering};

/// A source of process-unique identifiers.
///
/// Each counter starts at zero and hands out `1, 2, 3, ...`. The counter is
/// the only state involved, so independent counters never interfere.
///
/// # Examples
///
/// ```rust
/// use lowbar::utility::IdCounter;
///
/// let counter = IdCounter::new();
/// assert_eq!(counter.unique_id("contact_"), "contact_1");
/// assert_eq!(counter.unique_id(""), "2");
/// ```
#[derive(Debug, Default)]
pub struct IdCounter {
    last: AtomicU64,
}

impl IdCounter {
    /// Creates a counter that has handed out nothing yet.
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// The next identifier.
    pub fn next_id(&self) -> u64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// The next identifier, prefixed.
    pub fn unique_id(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.next_id())
    }
}

static GLOBAL: IdCounter = IdCounter::new();

/// Takes the next identifier from the process-wide counter.
pub fn unique_id(prefix: &str) -> String {
    GLOBAL.unique_id(prefix)
}

static_assertions::assert_impl_all!(IdCounter: Send, Sync);
