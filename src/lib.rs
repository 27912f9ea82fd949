//! Conversion between the Bikram Sambat (Nepali) and Gregorian (English)
//! calendars, plus a Nepali-calendar-aware time type.
//!
//! ```
//! use nepali_date::{english_to_nepali, nepali_to_english, DateTriple};
//!
//! let bs = english_to_nepali(2023, 1, 28).unwrap();
//! assert_eq!(bs, DateTriple::new(2079, 10, 14));
//!
//! let ad = nepali_to_english(2079, 10, 14).unwrap();
//! assert_eq!(ad.to_string(), "2023-01-28");
//! ```

mod calendar;
mod consts;
mod converter;
mod format;
mod parse;
mod prelude;
mod time;
mod types;

pub use calendar::{
    CalendarYear, english_days_in_month, english_month_lengths, is_leap_year, max_english_year,
    max_nepali_year, min_english_year, min_nepali_year, nepali_days_in_month,
    nepali_month_lengths, nepali_year,
};
pub use consts::*;
pub use converter::{english_to_nepali, nepali_to_english, validate_english_date, validate_nepali_date};
pub use format::NepaliFormatter;
pub use parse::{ParseError, parse, pattern};
pub use time::{NepaliTime, TimeError, current_english_time, nepali_timezone};
pub use types::{Calendar, CalendarDate, DateTriple, weekday_abbreviation, weekday_name};

use crate::prelude::*;

/// Reasons a date cannot be validated or converted.
///
/// Each variant is decided purely from the input values; nothing is
/// computed before the check fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ConversionError {
    /// Year outside the supported span of `calendar`
    #[display(fmt = "date is out of range: {calendar} year {year} (must be {min}-{max})")]
    DateOutOfRange {
        calendar: Calendar,
        year: i32,
        min: i32,
        max: i32,
    },
    /// Month outside `1..=12`
    #[display(fmt = "invalid month: {month} (must be {}-{})", MIN_MONTH, MAX_MONTH)]
    InvalidMonth { calendar: Calendar, month: u32 },
    /// Day outside `1..=max_day` for the given month
    #[display(fmt = "invalid day {day} for {calendar} month {year}-{month:02} (must be 1-{max_day})")]
    InvalidDay {
        calendar: Calendar,
        year: i32,
        month: u32,
        day: u32,
        max_day: u32,
    },
}

impl std::error::Error for ConversionError {}

impl ConversionError {
    /// Calendar the rejected input belonged to
    pub const fn calendar(&self) -> Calendar {
        match *self {
            Self::DateOutOfRange { calendar, .. }
            | Self::InvalidMonth { calendar, .. }
            | Self::InvalidDay { calendar, .. } => calendar,
        }
    }
}
