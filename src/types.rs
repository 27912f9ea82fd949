use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ENGLISH_DAY, MIN_DAY, WEEKDAYS};
use crate::converter::{
    english_to_nepali, nepali_to_english, validate_english_date, validate_nepali_date,
};
use crate::prelude::*;
use crate::ConversionError;

/// Which calendar a date triple is expressed in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
pub enum Calendar {
    /// Bikram Sambat
    Nepali,
    /// Gregorian
    English,
}

impl Calendar {
    /// The other calendar
    pub const fn other(self) -> Self {
        match self {
            Self::Nepali => Self::English,
            Self::English => Self::Nepali,
        }
    }
}

/// A plain `(year, month, day)` value with no calendar attached.
///
/// Month and day are 1-indexed. Which calendar the triple belongs to is
/// decided by whoever produced it; see [`CalendarDate`] for the tagged form.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[display(fmt = "{year:04}-{month:02}-{day:02}")]
pub struct DateTriple {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateTriple {
    /// Builds a triple without validating it
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Returns the triple as `(year, month, day)`
    #[inline]
    pub const fn as_tuple(self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }
}

/// A validated date tagged with the calendar it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{date} ({calendar})")]
#[serde(try_from = "CalendarDateRepr")]
pub struct CalendarDate {
    calendar: Calendar,
    date: DateTriple,
}

#[derive(Deserialize)]
struct CalendarDateRepr {
    calendar: Calendar,
    date: DateTriple,
}

impl TryFrom<CalendarDateRepr> for CalendarDate {
    type Error = ConversionError;

    fn try_from(value: CalendarDateRepr) -> Result<Self, Self::Error> {
        Self::new(value.calendar, value.date)
    }
}

impl CalendarDate {
    /// Validates `date` against the rules of `calendar` and tags it.
    ///
    /// # Errors
    /// Returns the `ConversionError` produced by validation.
    pub fn new(calendar: Calendar, date: DateTriple) -> Result<Self, ConversionError> {
        let (year, month, day) = date.as_tuple();
        match calendar {
            Calendar::Nepali => validate_nepali_date(year, month, day)?,
            Calendar::English => validate_english_date(year, month, day)?,
        }
        Ok(Self { calendar, date })
    }

    /// Creates a Bikram Sambat date, checking the day against the table.
    ///
    /// # Errors
    /// Returns the `ConversionError` produced by validation.
    pub fn nepali(year: i32, month: u32, day: u32) -> Result<Self, ConversionError> {
        Self::new(Calendar::Nepali, DateTriple::new(year, month, day))
    }

    /// Creates a Gregorian date within the convertible range.
    ///
    /// # Errors
    /// Returns the `ConversionError` produced by validation.
    pub fn english(year: i32, month: u32, day: u32) -> Result<Self, ConversionError> {
        Self::new(Calendar::English, DateTriple::new(year, month, day))
    }

    /// Tags a triple already known to be a valid Nepali date.
    pub(crate) const fn nepali_unchecked(date: DateTriple) -> Self {
        Self {
            calendar: Calendar::Nepali,
            date,
        }
    }

    /// Calendar the date is expressed in
    pub const fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// The untagged triple
    pub const fn date(&self) -> DateTriple {
        self.date
    }

    /// Year in this date's calendar
    pub const fn year(&self) -> i32 {
        self.date.year
    }

    /// Month, 1-indexed
    pub const fn month(&self) -> u32 {
        self.date.month
    }

    /// Day of the month, 1-indexed
    pub const fn day(&self) -> u32 {
        self.date.day
    }

    /// The Gregorian triple for this date.
    ///
    /// # Errors
    /// Propagates conversion failures; an English date is returned as is.
    pub fn to_english(&self) -> Result<DateTriple, ConversionError> {
        match self.calendar {
            Calendar::English => Ok(self.date),
            Calendar::Nepali => {
                let (year, month, day) = self.date.as_tuple();
                nepali_to_english(year, month, day)
            }
        }
    }

    /// The Bikram Sambat triple for this date.
    ///
    /// # Errors
    /// Propagates conversion failures; a Nepali date is returned as is.
    pub fn to_nepali(&self) -> Result<DateTriple, ConversionError> {
        match self.calendar {
            Calendar::Nepali => Ok(self.date),
            Calendar::English => {
                let (year, month, day) = self.date.as_tuple();
                english_to_nepali(year, month, day)
            }
        }
    }

    /// The same day expressed in the other calendar.
    ///
    /// # Errors
    /// Propagates conversion failures.
    pub fn convert(&self) -> Result<Self, ConversionError> {
        let date = match self.calendar {
            Calendar::Nepali => self.to_english()?,
            Calendar::English => self.to_nepali()?,
        };
        Ok(Self {
            calendar: self.calendar.other(),
            date,
        })
    }

    /// Day of the week, derived from the Gregorian equivalent.
    ///
    /// # Errors
    /// Propagates conversion failures for Nepali dates.
    pub fn weekday(&self) -> Result<Weekday, ConversionError> {
        let english = self.to_english()?;
        english_weekday(english).ok_or(ConversionError::InvalidDay {
            calendar: Calendar::English,
            year: english.year,
            month: english.month,
            day: english.day,
            max_day: MAX_ENGLISH_DAY,
        })
    }
}

// Counts forward from the first of the month so a lenient day such as
// April 31 lands where the converter puts it.
fn english_weekday(date: DateTriple) -> Option<Weekday> {
    let first = NaiveDate::from_ymd_opt(date.year, date.month, MIN_DAY)?;
    let offset = Days::new(u64::from(date.day.checked_sub(MIN_DAY)?));
    first.checked_add_days(offset).map(|d| d.weekday())
}

/// Full English name of a weekday, e.g. `"Saturday"`
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAYS[weekday.num_days_from_sunday() as usize]
}

/// Three-letter English name of a weekday, e.g. `"Sat"`
pub fn weekday_abbreviation(weekday: Weekday) -> &'static str {
    let name = weekday_name(weekday);
    name.get(..3).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_display() {
        assert_eq!(Calendar::Nepali.to_string(), "Nepali");
        assert_eq!(Calendar::English.to_string(), "English");
        assert_eq!(Calendar::Nepali.other(), Calendar::English);
    }

    #[test]
    fn test_triple_display_and_tuple() {
        let date = DateTriple::new(2079, 1, 4);
        assert_eq!(date.to_string(), "2079-01-04");
        let tuple: (i32, u32, u32) = date.into();
        assert_eq!(tuple, (2079, 1, 4));
        assert_eq!(DateTriple::from((2079, 1, 4)), date);
    }

    #[test]
    fn test_triple_ordering() {
        assert!(DateTriple::new(2079, 1, 30) < DateTriple::new(2079, 2, 1));
        assert!(DateTriple::new(2078, 12, 30) < DateTriple::new(2079, 1, 1));
    }

    #[test]
    fn test_triple_serde() {
        let date = DateTriple::new(2079, 10, 14);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#"{"year":2079,"month":10,"day":14}"#);
        let parsed: DateTriple = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);
    }

    #[test]
    fn test_calendar_date_validates() {
        assert!(CalendarDate::nepali(2079, 10, 29).is_ok());
        assert!(matches!(
            CalendarDate::nepali(2079, 10, 30),
            Err(ConversionError::InvalidDay { max_day: 29, .. })
        ));
        assert!(CalendarDate::english(2023, 4, 31).is_ok());
        assert!(CalendarDate::english(1943, 4, 14).is_err());
    }

    #[test]
    fn test_calendar_date_convert() {
        let nepali = CalendarDate::nepali(2079, 10, 14).unwrap();
        let english = nepali.convert().unwrap();
        assert_eq!(english.calendar(), Calendar::English);
        assert_eq!(english.date(), DateTriple::new(2023, 1, 28));
        assert_eq!(english.convert().unwrap(), nepali);
        assert_eq!(english.to_string(), "2023-01-28 (English)");
    }

    #[test]
    fn test_weekday_cases() {
        struct TestCase {
            date: CalendarDate,
            weekday: Weekday,
            description: &'static str,
        }

        let cases = [
            TestCase {
                date: CalendarDate::nepali(2079, 10, 14).unwrap(),
                weekday: Weekday::Sat,
                description: "BS 2079-10-14",
            },
            TestCase {
                date: CalendarDate::english(2023, 1, 28).unwrap(),
                weekday: Weekday::Sat,
                description: "AD 2023-01-28",
            },
            TestCase {
                date: CalendarDate::nepali(2000, 1, 1).unwrap(),
                weekday: Weekday::Wed,
                description: "reference date",
            },
            TestCase {
                date: CalendarDate::english(2023, 4, 31).unwrap(),
                weekday: Weekday::Mon,
                description: "lenient April 31 rolls to May 1",
            },
        ];

        for case in &cases {
            assert_eq!(case.date.weekday().unwrap(), case.weekday, "{}", case.description);
        }
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
        assert_eq!(weekday_name(Weekday::Sat), "Saturday");
        assert_eq!(weekday_abbreviation(Weekday::Wed), "Wed");
    }

    #[test]
    fn test_calendar_date_serde() {
        let date = CalendarDate::nepali(2079, 10, 14).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);

        let invalid = r#"{"calendar":"Nepali","date":{"year":2079,"month":10,"day":30}}"#;
        assert!(serde_json::from_str::<CalendarDate>(invalid).is_err());
    }
}
