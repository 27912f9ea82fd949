//! Month-length tables for both calendars.
//!
//! Bikram Sambat month lengths follow no arithmetic rule, so every supported
//! year is tabulated. Gregorian lengths come from the standard leap rule.

use crate::consts::{
    CENTURY_CYCLE, ENGLISH_LEAP_MONTH_DAYS, ENGLISH_MONTH_DAYS, FEBRUARY, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH, MIN_MONTH, NEPALI_CALENDAR_YEARS, REFERENCE_ENGLISH_DATE,
    REFERENCE_NEPALI_YEAR,
};
use crate::{Calendar, ConversionError};

/// Month lengths and total day count of one Bikram Sambat year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarYear {
    month_lengths: [u8; 12],
    total_days: u16,
}

impl CalendarYear {
    const fn new(month_lengths: [u8; 12], total_days: u16) -> Self {
        Self {
            month_lengths,
            total_days,
        }
    }

    /// Days in each month, Baisakh first
    #[inline]
    pub const fn month_lengths(&self) -> &[u8; 12] {
        &self.month_lengths
    }

    /// Days in the whole year
    #[inline]
    pub const fn total_days(&self) -> u16 {
        self.total_days
    }

    /// Days in `month` (1-indexed), or `None` if the month is out of range
    pub fn month_length(&self, month: u32) -> Option<u8> {
        let index = usize::try_from(month.checked_sub(MIN_MONTH)?).ok()?;
        self.month_lengths.get(index).copied()
    }

    /// Days in the months strictly before `month`
    pub(crate) fn days_before_month(&self, month: u32) -> u32 {
        self.month_lengths
            .iter()
            .take(month.saturating_sub(MIN_MONTH) as usize)
            .map(|&days| u32::from(days))
            .sum()
    }
}

/// Bikram Sambat month lengths, indexed by `bs_year - REFERENCE_NEPALI_YEAR`.
///
/// Values are copied from the published calendar and must not be derived.
pub(crate) static NEPALI_CALENDAR: [CalendarYear; NEPALI_CALENDAR_YEARS] = [
    CalendarYear::new([30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], 365), // 2000
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2001
    CalendarYear::new([31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2002
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2003
    CalendarYear::new([30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], 365), // 2004
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2005
    CalendarYear::new([31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2006
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2007
    CalendarYear::new([31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], 365), // 2008
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2009
    CalendarYear::new([31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2010
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2011
    CalendarYear::new([31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], 365), // 2012
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2013
    CalendarYear::new([31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2014
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2015
    CalendarYear::new([31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], 365), // 2016
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2017
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2018
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], 366), // 2019
    CalendarYear::new([31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2020
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2021
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], 365), // 2022
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], 366), // 2023
    CalendarYear::new([31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2024
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2025
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2026
    CalendarYear::new([30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], 365), // 2027
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2028
    CalendarYear::new([31, 31, 32, 31, 32, 30, 30, 29, 30, 29, 30, 30], 365), // 2029
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2030
    CalendarYear::new([30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], 365), // 2031
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2032
    CalendarYear::new([31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2033
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2034
    CalendarYear::new([30, 32, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], 365), // 2035
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2036
    CalendarYear::new([31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2037
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2038
    CalendarYear::new([31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], 365), // 2039
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2040
    CalendarYear::new([31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2041
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2042
    CalendarYear::new([31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], 365), // 2043
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2044
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2045
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2046
    CalendarYear::new([31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2047
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2048
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], 365), // 2049
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], 366), // 2050
    CalendarYear::new([31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2051
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2052
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], 365), // 2053
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], 366), // 2054
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2055
    CalendarYear::new([31, 31, 32, 31, 32, 30, 30, 29, 30, 29, 30, 30], 365), // 2056
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2057
    CalendarYear::new([30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], 365), // 2058
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2059
    CalendarYear::new([31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2060
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2061
    CalendarYear::new([30, 32, 31, 32, 31, 31, 29, 30, 29, 30, 29, 31], 365), // 2062
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2063
    CalendarYear::new([31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2064
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2065
    CalendarYear::new([31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], 365), // 2066
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2067
    CalendarYear::new([31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2068
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2069
    CalendarYear::new([31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], 365), // 2070
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2071
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2072
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2073
    CalendarYear::new([31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2074
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2075
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], 365), // 2076
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], 366), // 2077
    CalendarYear::new([31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2078
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2079
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], 365), // 2080
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], 366), // 2081
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2082
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2083
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2084
    CalendarYear::new([30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], 365), // 2085
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2086
    CalendarYear::new([31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2087
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2088
    CalendarYear::new([30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], 365), // 2089
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2090
    CalendarYear::new([31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2091
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2092
    CalendarYear::new([31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], 365), // 2093
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2094
    CalendarYear::new([31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2095
    CalendarYear::new([31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], 366), // 2096
    CalendarYear::new([31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], 365), // 2097
    CalendarYear::new([31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], 365), // 2098
    CalendarYear::new([31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], 365), // 2099
];

/// First supported Bikram Sambat year
pub const fn min_nepali_year() -> i32 {
    REFERENCE_NEPALI_YEAR
}

/// Last supported Bikram Sambat year
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn max_nepali_year() -> i32 {
    REFERENCE_NEPALI_YEAR + NEPALI_CALENDAR_YEARS as i32 - 1
}

/// First Gregorian year accepted by `english_to_nepali`
pub const fn min_english_year() -> i32 {
    REFERENCE_ENGLISH_DATE.0 + 1
}

/// Last Gregorian year accepted by `english_to_nepali`
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn max_english_year() -> i32 {
    REFERENCE_ENGLISH_DATE.0 + NEPALI_CALENDAR_YEARS as i32 - 1
}

/// Looks up the table entry for a Bikram Sambat year.
///
/// # Errors
/// Returns `ConversionError::DateOutOfRange` if the year is not in the table.
pub fn nepali_year(year: i32) -> Result<&'static CalendarYear, ConversionError> {
    let out_of_range = ConversionError::DateOutOfRange {
        calendar: Calendar::Nepali,
        year,
        min: min_nepali_year(),
        max: max_nepali_year(),
    };
    let index = year
        .checked_sub(REFERENCE_NEPALI_YEAR)
        .and_then(|offset| usize::try_from(offset).ok())
        .ok_or(out_of_range)?;
    NEPALI_CALENDAR.get(index).ok_or(out_of_range)
}

/// Returns the twelve month lengths of a Bikram Sambat year.
///
/// # Errors
/// Returns `ConversionError::DateOutOfRange` if the year is not in the table.
pub fn nepali_month_lengths(year: i32) -> Result<[u8; 12], ConversionError> {
    nepali_year(year).map(|entry| *entry.month_lengths())
}

/// Returns the number of days in a Bikram Sambat month.
///
/// # Errors
/// Returns `ConversionError::DateOutOfRange` for an unsupported year and
/// `ConversionError::InvalidMonth` for a month outside `1..=12`.
pub fn nepali_days_in_month(year: i32, month: u32) -> Result<u32, ConversionError> {
    let entry = nepali_year(year)?;
    entry
        .month_length(month)
        .map(u32::from)
        .ok_or(ConversionError::InvalidMonth {
            calendar: Calendar::Nepali,
            month,
        })
}

/// Gregorian leap year rule
pub const fn is_leap_year(year: i32) -> bool {
    year % LEAP_YEAR_CYCLE == 0 && (year % CENTURY_CYCLE != 0 || year % GREGORIAN_CYCLE == 0)
}

/// Gregorian month lengths for `year`, February adjusted for leap years
pub const fn english_month_lengths(year: i32) -> &'static [u8; 12] {
    if is_leap_year(year) {
        &ENGLISH_LEAP_MONTH_DAYS
    } else {
        &ENGLISH_MONTH_DAYS
    }
}

/// Days in a Gregorian month, or `None` for a month outside `1..=12`
pub fn english_days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(MIN_MONTH..=MAX_MONTH).contains(&month) {
        return None;
    }
    if month == FEBRUARY && is_leap_year(year) {
        Some(u32::from(ENGLISH_LEAP_MONTH_DAYS[1]))
    } else {
        Some(u32::from(ENGLISH_MONTH_DAYS[(month - MIN_MONTH) as usize]))
    }
}
