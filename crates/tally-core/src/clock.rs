//! The tracker's notion of "today".
//!
//! Daily buckets are keyed by the local calendar date at the moment of an
//! operation. The [`Clock`] trait isolates that lookup so tests and
//! simulations can pin or advance the date.

use chrono::Local;

use tally_types::DateKey;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// The date cannot be advanced past the end of the calendar.
    #[error("date overflow: cannot advance beyond {0}")]
    DateOverflow(DateKey),
}

/// Source of the current local date.
pub trait Clock {
    /// Today's date key.
    fn today(&self) -> DateKey;
}

/// The system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DateKey {
        DateKey::new(Local::now().date_naive())
    }
}

/// A clock pinned to a date until explicitly moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    date: DateKey,
}

impl FixedClock {
    /// Create a clock fixed at `date`.
    pub const fn new(date: DateKey) -> Self {
        Self { date }
    }

    /// Move to the next calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::DateOverflow`] at the last representable date.
    pub fn advance_day(&mut self) -> Result<DateKey, ClockError> {
        self.date = self.date.succ().ok_or(ClockError::DateOverflow(self.date))?;
        Ok(self.date)
    }

    /// Jump to `date`.
    pub const fn set(&mut self, date: DateKey) {
        self.date = date;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> DateKey {
        self.date
    }
}
