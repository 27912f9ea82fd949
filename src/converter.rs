//! Bikram Sambat <-> Gregorian conversion.
//!
//! Both directions count days from the reference pair 2000-01-01 BS /
//! 1943-04-14 AD and then walk the target calendar forward year by year and
//! month by month.

use tracing::{debug, trace};

use crate::calendar::{
    NEPALI_CALENDAR, english_month_lengths, is_leap_year, max_english_year, max_nepali_year,
    min_english_year, min_nepali_year, nepali_year,
};
use crate::consts::{
    DAYS_IN_LEAP_YEAR, DAYS_IN_YEAR, ENGLISH_MONTH_DAYS, MAX_ENGLISH_DAY, MAX_MONTH, MIN_DAY,
    MIN_MONTH, REFERENCE_ENGLISH_DATE, REFERENCE_NEPALI_YEAR,
};
use crate::{Calendar, ConversionError, DateTriple};

/// Checks that a Gregorian date can be converted.
///
/// The day is only checked against 31, not against the real month length;
/// a day past the end of a short month rolls into the following month.
///
/// # Errors
/// Returns `DateOutOfRange`, `InvalidMonth` or `InvalidDay`.
pub fn validate_english_date(year: i32, month: u32, day: u32) -> Result<(), ConversionError> {
    let result = if !(min_english_year()..=max_english_year()).contains(&year) {
        Err(ConversionError::DateOutOfRange {
            calendar: Calendar::English,
            year,
            min: min_english_year(),
            max: max_english_year(),
        })
    } else if !(MIN_MONTH..=MAX_MONTH).contains(&month) {
        Err(ConversionError::InvalidMonth {
            calendar: Calendar::English,
            month,
        })
    } else if !(MIN_DAY..=MAX_ENGLISH_DAY).contains(&day) {
        Err(ConversionError::InvalidDay {
            calendar: Calendar::English,
            year,
            month,
            day,
            max_day: MAX_ENGLISH_DAY,
        })
    } else {
        Ok(())
    };

    if let Err(err) = &result {
        debug!(year, month, day, %err, "rejected english date");
    }
    result
}

/// Checks that a Bikram Sambat date exists in the calendar table.
///
/// # Errors
/// Returns `DateOutOfRange`, `InvalidMonth` or `InvalidDay`.
pub fn validate_nepali_date(year: i32, month: u32, day: u32) -> Result<(), ConversionError> {
    let result = nepali_year(year).and_then(|entry| {
        let max_day = entry
            .month_length(month)
            .map(u32::from)
            .ok_or(ConversionError::InvalidMonth {
                calendar: Calendar::Nepali,
                month,
            })?;
        if (MIN_DAY..=max_day).contains(&day) {
            Ok(())
        } else {
            Err(ConversionError::InvalidDay {
                calendar: Calendar::Nepali,
                year,
                month,
                day,
                max_day,
            })
        }
    });

    if let Err(err) = &result {
        debug!(year, month, day, %err, "rejected nepali date");
    }
    result
}

/// Days since a fixed day zero, using proleptic Gregorian leap counting.
///
/// January and February count leap days up to the previous year, so the
/// current year's leap day is only included once it has happened.
#[allow(clippy::cast_possible_wrap)]
fn english_day_count(year: i32, month: u32, day: u32) -> i32 {
    let days_before_month: i32 = ENGLISH_MONTH_DAYS
        .iter()
        .take(month.saturating_sub(MIN_MONTH) as usize)
        .map(|&days| i32::from(days))
        .sum();

    let leap_year = if month <= 2 { year - 1 } else { year };
    let leap_days = leap_year / 4 - leap_year / 100 + leap_year / 400;

    year * DAYS_IN_YEAR as i32 + day as i32 + days_before_month + leap_days
}

/// Days between 2000-01-01 BS and the given Bikram Sambat date.
fn nepali_day_offset(year: i32, month: u32, day: u32) -> Result<u32, ConversionError> {
    let entry = nepali_year(year)?;
    let years_before = usize::try_from(year - REFERENCE_NEPALI_YEAR).unwrap_or_default();
    let days_before_year: u32 = NEPALI_CALENDAR
        .iter()
        .take(years_before)
        .map(|entry| u32::from(entry.total_days()))
        .sum();

    Ok(days_before_year + entry.days_before_month(month) + (day - MIN_DAY))
}

/// Days from January 1 of the reference Gregorian year to the reference date.
fn reference_year_offset() -> u32 {
    let (year, month, day) = REFERENCE_ENGLISH_DATE;
    let days_before_month: u32 = english_month_lengths(year)
        .iter()
        .take((month - MIN_MONTH) as usize)
        .map(|&days| u32::from(days))
        .sum();
    days_before_month + day - MIN_DAY
}

/// Converts a Gregorian date to Bikram Sambat.
///
/// # Errors
/// Returns a `ConversionError` if the Gregorian date fails validation.
pub fn english_to_nepali(year: i32, month: u32, day: u32) -> Result<DateTriple, ConversionError> {
    validate_english_date(year, month, day)?;

    let (ref_year, ref_month, ref_day) = REFERENCE_ENGLISH_DATE;
    let mut difference = (english_day_count(year, month, day)
        - english_day_count(ref_year, ref_month, ref_day))
    .unsigned_abs();

    let mut np_year = REFERENCE_NEPALI_YEAR;
    let mut landed = None;
    for entry in &NEPALI_CALENDAR {
        let year_days = u32::from(entry.total_days());
        if difference < year_days {
            landed = Some(entry);
            break;
        }
        difference -= year_days;
        np_year += 1;
    }
    let entry = landed.ok_or(ConversionError::DateOutOfRange {
        calendar: Calendar::Nepali,
        year: np_year,
        min: min_nepali_year(),
        max: max_nepali_year(),
    })?;

    let mut np_month = MIN_MONTH;
    for &month_days in entry.month_lengths() {
        let month_days = u32::from(month_days);
        if difference < month_days {
            break;
        }
        difference -= month_days;
        np_month += 1;
    }

    let nepali = DateTriple::new(np_year, np_month, difference + MIN_DAY);
    trace!(year, month, day, %nepali, "converted english date");
    Ok(nepali)
}

/// Converts a Bikram Sambat date to Gregorian.
///
/// # Errors
/// Returns a `ConversionError` if the Nepali date fails validation.
pub fn nepali_to_english(year: i32, month: u32, day: u32) -> Result<DateTriple, ConversionError> {
    validate_nepali_date(year, month, day)?;

    // Walk from January 1 of the reference year rather than the reference day.
    let mut difference = nepali_day_offset(year, month, day)? + reference_year_offset();

    let mut en_year = REFERENCE_ENGLISH_DATE.0;
    loop {
        let year_days = if is_leap_year(en_year) {
            DAYS_IN_LEAP_YEAR
        } else {
            DAYS_IN_YEAR
        };
        if difference < year_days {
            break;
        }
        difference -= year_days;
        en_year += 1;
    }

    let mut en_month = MIN_MONTH;
    for &month_days in english_month_lengths(en_year) {
        let month_days = u32::from(month_days);
        if difference < month_days {
            break;
        }
        difference -= month_days;
        en_month += 1;
    }

    let english = DateTriple::new(en_year, en_month, difference + MIN_DAY);
    trace!(year, month, day, %english, "converted nepali date");
    Ok(english)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCase {
        english: (i32, u32, u32),
        nepali: (i32, u32, u32),
        description: &'static str,
    }

    const KNOWN_DATES: [TestCase; 8] = [
        TestCase {
            english: (1994, 8, 13),
            nepali: (2051, 4, 29),
            description: "past date",
        },
        TestCase {
            english: (2023, 1, 28),
            nepali: (2079, 10, 14),
            description: "recent date",
        },
        TestCase {
            english: (2030, 11, 26),
            nepali: (2087, 8, 10),
            description: "future date",
        },
        TestCase {
            english: (2024, 3, 28),
            nepali: (2080, 12, 15),
            description: "gregorian leap year",
        },
        TestCase {
            english: (1944, 1, 1),
            nepali: (2000, 9, 17),
            description: "min english edge",
        },
        TestCase {
            english: (2042, 12, 31),
            nepali: (2099, 9, 16),
            description: "max english edge",
        },
        TestCase {
            english: (2022, 4, 14),
            nepali: (2079, 1, 1),
            description: "new year 2079",
        },
        TestCase {
            english: (2024, 4, 13),
            nepali: (2081, 1, 1),
            description: "new year 2081",
        },
    ];

    #[test]
    fn test_english_to_nepali_known_dates() {
        for case in &KNOWN_DATES {
            let (y, m, d) = case.english;
            assert_eq!(
                english_to_nepali(y, m, d).unwrap().as_tuple(),
                case.nepali,
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_nepali_to_english_known_dates() {
        for case in &KNOWN_DATES {
            let (y, m, d) = case.nepali;
            assert_eq!(
                nepali_to_english(y, m, d).unwrap().as_tuple(),
                case.english,
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_nepali_to_english_edges() {
        assert_eq!(
            nepali_to_english(2000, 1, 1).unwrap(),
            DateTriple::new(1943, 4, 14)
        );
        assert_eq!(
            nepali_to_english(2099, 12, 30).unwrap(),
            DateTriple::new(2043, 4, 13)
        );
    }

    #[test]
    fn test_english_to_nepali_year_range() {
        assert!(matches!(
            english_to_nepali(2060, 1, 4),
            Err(ConversionError::DateOutOfRange { year: 2060, .. })
        ));
        assert!(matches!(
            english_to_nepali(1920, 1, 4),
            Err(ConversionError::DateOutOfRange { year: 1920, .. })
        ));
        assert!(english_to_nepali(1943, 12, 31).is_err());
        assert!(english_to_nepali(2043, 1, 1).is_err());
        assert!(english_to_nepali(1944, 1, 1).is_ok());
        assert!(english_to_nepali(2042, 12, 31).is_ok());
    }

    #[test]
    fn test_english_to_nepali_month_and_day_range() {
        assert!(matches!(
            english_to_nepali(2023, 0, 4),
            Err(ConversionError::InvalidMonth { month: 0, .. })
        ));
        assert!(matches!(
            english_to_nepali(2023, 13, 4),
            Err(ConversionError::InvalidMonth { month: 13, .. })
        ));
        assert!(matches!(
            english_to_nepali(2023, 1, 0),
            Err(ConversionError::InvalidDay { day: 0, .. })
        ));
        assert!(matches!(
            english_to_nepali(2023, 1, 40),
            Err(ConversionError::InvalidDay {
                day: 40,
                max_day: 31,
                ..
            })
        ));
    }

    #[test]
    fn test_english_day_bound_is_lenient() {
        // April has 30 days; the 31st lands on May 1.
        assert_eq!(
            english_to_nepali(2023, 4, 31).unwrap(),
            english_to_nepali(2023, 5, 1).unwrap()
        );
        assert_eq!(
            english_to_nepali(2023, 2, 31).unwrap(),
            english_to_nepali(2023, 3, 3).unwrap()
        );
    }

    #[test]
    fn test_nepali_to_english_range() {
        assert!(matches!(
            nepali_to_english(3000, 1, 4),
            Err(ConversionError::DateOutOfRange { year: 3000, .. })
        ));
        assert!(nepali_to_english(1920, 1, 4).is_err());
        assert!(nepali_to_english(1999, 12, 30).is_err());
        assert!(nepali_to_english(2100, 1, 1).is_err());
        assert!(matches!(
            nepali_to_english(2079, 0, 4),
            Err(ConversionError::InvalidMonth { month: 0, .. })
        ));
        assert!(matches!(
            nepali_to_english(2079, 13, 4),
            Err(ConversionError::InvalidMonth { month: 13, .. })
        ));
        assert!(matches!(
            nepali_to_english(2079, 1, 0),
            Err(ConversionError::InvalidDay { day: 0, .. })
        ));
        assert!(matches!(
            nepali_to_english(2079, 1, 40),
            Err(ConversionError::InvalidDay { day: 40, .. })
        ));
    }

    #[test]
    fn test_nepali_day_bound_is_exact() {
        // Magh 2079 has 29 days
        assert!(nepali_to_english(2079, 10, 29).is_ok());
        assert!(matches!(
            nepali_to_english(2079, 10, 30),
            Err(ConversionError::InvalidDay {
                day: 30,
                max_day: 29,
                ..
            })
        ));
    }

    #[test]
    fn test_consecutive_nepali_days_are_consecutive_english_days() {
        let last = nepali_to_english(2079, 12, 30).unwrap();
        let first = nepali_to_english(2080, 1, 1).unwrap();
        assert_eq!(last, DateTriple::new(2023, 4, 13));
        assert_eq!(first, DateTriple::new(2023, 4, 14));
    }

    #[test]
    fn test_reference_year_offset() {
        // 31 + 28 + 31 + 13
        assert_eq!(reference_year_offset(), 103);
    }

    #[test]
    fn test_english_day_count_leap_handling() {
        assert_eq!(
            english_day_count(2024, 3, 1) - english_day_count(2024, 2, 28),
            2
        );
        assert_eq!(
            english_day_count(2023, 3, 1) - english_day_count(2023, 2, 28),
            1
        );
        assert_eq!(
            english_day_count(2024, 1, 1) - english_day_count(2023, 1, 1),
            365
        );
        assert_eq!(
            english_day_count(2025, 1, 1) - english_day_count(2024, 1, 1),
            366
        );
    }
}
