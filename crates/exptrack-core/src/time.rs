use chrono::{NaiveDate, NaiveDateTime};

/// Clock abstracts access to the current local time so services remain deterministic in tests.
pub trait Clock: Send {
    /// Returns the current wall-clock time in the user's timezone.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current calendar date. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
