//! Calendar-day values and the day source abstraction.
//!
//! Every day-gap decision in the reward ledger goes through
//! [`Day::delta_days`], so "new day" detection and "streak continuity"
//! detection cannot drift apart.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An opaque, totally ordered calendar day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Day(NaiveDate);

impl Day {
    /// Build a day from calendar components, rejecting impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Day)
            .ok_or(ValidationError::InvalidDate { year, month, day })
    }

    /// Parse a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        s.parse::<NaiveDate>()
            .map(Day)
            .map_err(|_| ValidationError::UnparsableDay(s.to_string()))
    }

    /// Today in the local timezone.
    pub fn today() -> Self {
        Day(Local::now().date_naive())
    }

    /// Signed whole-day difference `self - reference`.
    pub fn delta_days(self, reference: Day) -> i64 {
        self.0.signed_duration_since(reference.0).num_days()
    }

    /// The day `n` calendar days after this one.
    ///
    /// Saturates at the end of the representable range.
    pub fn plus_days(self, n: u64) -> Self {
        Day(self.0.checked_add_days(Days::new(n)).unwrap_or(self.0))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Supplier of the current calendar day.
///
/// Production code uses [`SystemDaySource`]; tests and the simulator inject
/// a [`FixedDaySource`] so multi-day scenarios run without waiting.
pub trait DaySource {
    fn today(&self) -> Day;
}

/// Real local-clock day source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDaySource;

impl DaySource for SystemDaySource {
    fn today(&self) -> Day {
        Day::today()
    }
}

/// Settable day source with shared interior state.
///
/// Clones share the same underlying day, so a test can keep a handle and
/// advance the calendar while a `Session` owns the other clone.
#[derive(Debug, Clone)]
pub struct FixedDaySource(Rc<Cell<Day>>);

impl FixedDaySource {
    pub fn new(day: Day) -> Self {
        FixedDaySource(Rc::new(Cell::new(day)))
    }

    pub fn set(&self, day: Day) {
        self.0.set(day);
    }

    pub fn advance(&self, days: u64) {
        self.0.set(self.0.get().plus_days(days));
    }
}

impl DaySource for FixedDaySource {
    fn today(&self) -> Day {
        self.0.get()
    }
}
