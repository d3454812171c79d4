//! # Date Ordering Preference
//!
//! The only persisted piece of state on the watch face: which order the
//! day, month and year tiles appear in along the bottom row.
//!
//! The preference travels as a bare integer in two places, the settings
//! store and the companion-app message, so conversion from an integer is
//! fallible and rejects anything outside the three known values.

use std::fmt;

/// Ordering of the day, month and year components in the date row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DateOrder {
    /// `5 3 2024`
    #[default]
    DayMonthYear,
    /// `3 5 2024`
    MonthDayYear,
    /// `2024 3 5`
    YearMonthDay,
}

impl DateOrder {
    /// Every ordering, indexed by its persisted value.
    pub const ALL: [DateOrder; 3] = [
        DateOrder::DayMonthYear,
        DateOrder::MonthDayYear,
        DateOrder::YearMonthDay,
    ];

    /// Decode a persisted or transmitted value.
    ///
    /// Returns `None` for anything outside `0..3`, including negatives.
    pub fn from_persisted(value: i64) -> Option<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// The integer written to the settings store.
    pub fn as_persisted(self) -> i32 {
        match self {
            DateOrder::DayMonthYear => 0,
            DateOrder::MonthDayYear => 1,
            DateOrder::YearMonthDay => 2,
        }
    }
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateOrder::DayMonthYear => "day-month-year",
            DateOrder::MonthDayYear => "month-day-year",
            DateOrder::YearMonthDay => "year-month-day",
        };
        f.write_str(name)
    }
}
