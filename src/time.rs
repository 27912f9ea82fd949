use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use crate::calendar::nepali_year;
use crate::consts::{DEFAULT_FORMAT, NEPALI_TZ, PRECISE_FORMAT, TIMEZONE};
use crate::converter::{english_to_nepali, nepali_to_english};
use crate::format::NepaliFormatter;
use crate::parse::{self, ParseError};
use crate::{CalendarDate, ConversionError, DateTriple};

/// Error type for building a [`NepaliTime`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    /// The date part could not be converted.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Clock fields outside their ranges.
    #[error("invalid time of day: {hour:02}:{minute:02}:{second:02}.{nanosecond:09}")]
    InvalidTime {
        hour: u32,
        minute: u32,
        second: u32,
        nanosecond: u32,
    },

    /// The wall-clock time was skipped by a zone offset change.
    #[error("local time {0} does not exist in {tz}", tz = TIMEZONE)]
    NonexistentLocalTime(NaiveDateTime),
}

/// A point in time carrying its Bikram Sambat date.
///
/// The date fields are Nepali; the clock fields and weekday come from the
/// underlying Gregorian instant, which is always held in Asia/Kathmandu.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NepaliTime {
    date: DateTriple,
    english: DateTime<Tz>,
}

impl NepaliTime {
    /// Creates the time `year-month-day hour:minute:second` plus
    /// `nanosecond` nanoseconds, with the date read as Bikram Sambat.
    ///
    /// # Errors
    /// Returns `TimeError::Conversion` for an unsupported date,
    /// `TimeError::InvalidTime` for bad clock fields and
    /// `TimeError::NonexistentLocalTime` if the zone skips that time.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nanosecond: u32,
    ) -> Result<Self, TimeError> {
        let english = nepali_to_english(year, month, day)?;
        let naive = NaiveDate::from_ymd_opt(english.year, english.month, english.day)
            .and_then(|date| date.and_hms_nano_opt(hour, minute, second, nanosecond))
            .ok_or(TimeError::InvalidTime {
                hour,
                minute,
                second,
                nanosecond,
            })?;
        let english = NEPALI_TZ
            .from_local_datetime(&naive)
            .earliest()
            .ok_or(TimeError::NonexistentLocalTime(naive))?;

        Ok(Self {
            date: DateTriple::new(year, month, day),
            english,
        })
    }

    /// Converts a Gregorian instant in any zone.
    ///
    /// The instant is first moved into Asia/Kathmandu, so the Nepali date is
    /// the one observed in Nepal at that moment.
    ///
    /// # Errors
    /// Returns a `ConversionError` if the Kathmandu date is out of range.
    pub fn from_english_time<T: TimeZone>(time: &DateTime<T>) -> Result<Self, ConversionError> {
        let english = time.with_timezone(&NEPALI_TZ);
        let date = english_to_nepali(english.year(), english.month(), english.day())?;
        Ok(Self { date, english })
    }

    /// The current time in Nepal.
    ///
    /// # Errors
    /// Returns a `ConversionError` once the clock passes the supported range.
    pub fn now() -> Result<Self, ConversionError> {
        Self::from_english_time(&current_english_time())
    }

    /// Parses `input` according to a strftime-style `format`.
    ///
    /// # Errors
    /// See [`parse::parse`].
    pub fn parse(input: &str, format: &str) -> Result<Self, ParseError> {
        parse::parse(input, format)
    }

    /// Formats with strftime-style directives.
    pub fn format(&self, format: &str) -> String {
        NepaliFormatter::new(self).format(format)
    }

    /// The Gregorian instant, in Asia/Kathmandu
    pub const fn english_time(&self) -> &DateTime<Tz> {
        &self.english
    }

    /// Returns the Nepali `(year, month, day)`
    pub const fn date(&self) -> (i32, u32, u32) {
        self.date.as_tuple()
    }

    /// Bikram Sambat year
    pub const fn year(&self) -> i32 {
        self.date.year
    }

    /// Bikram Sambat month, Baisakh is 1
    pub const fn month(&self) -> u32 {
        self.date.month
    }

    /// Day of the Bikram Sambat month
    pub const fn day(&self) -> u32 {
        self.date.day
    }

    /// Day of the Nepali year, starting at 1 on Baisakh 1
    pub fn day_of_year(&self) -> u32 {
        nepali_year(self.date.year).map_or(self.date.day, |entry| {
            entry.days_before_month(self.date.month) + self.date.day
        })
    }

    /// Day of the week of the underlying instant
    pub fn weekday(&self) -> Weekday {
        self.english.weekday()
    }

    /// Returns `(hour, minute, second)`
    pub fn clock(&self) -> (u32, u32, u32) {
        (self.hour(), self.minute(), self.second())
    }

    /// Hour on the 24-hour clock
    pub fn hour(&self) -> u32 {
        self.english.hour()
    }

    /// Minute of the hour
    pub fn minute(&self) -> u32 {
        self.english.minute()
    }

    /// Second of the minute
    pub fn second(&self) -> u32 {
        self.english.second()
    }

    /// Nanoseconds past the second
    pub fn nanosecond(&self) -> u32 {
        self.english.nanosecond()
    }

    /// The date part tagged as Nepali
    pub const fn calendar_date(&self) -> CalendarDate {
        CalendarDate::nepali_unchecked(self.date)
    }
}

/// Current Gregorian time in Asia/Kathmandu.
pub fn current_english_time() -> DateTime<Tz> {
    Utc::now().with_timezone(&NEPALI_TZ)
}

/// The Asia/Kathmandu zone.
pub const fn nepali_timezone() -> Tz {
    NEPALI_TZ
}

impl fmt::Display for NepaliTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DEFAULT_FORMAT))
    }
}

/// Accepts both `DEFAULT_FORMAT` and `PRECISE_FORMAT`.
impl FromStr for NepaliTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match parse::parse(s, PRECISE_FORMAT) {
            Err(ParseError::NoMatch) => parse::parse(s, DEFAULT_FORMAT),
            result => result,
        }
    }
}

impl PartialOrd for NepaliTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NepaliTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.english.cmp(&other.english)
    }
}

impl serde::Serialize for NepaliTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.format(PRECISE_FORMAT))
    }
}

impl<'de> serde::Deserialize<'de> for NepaliTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NepaliTime {
        NepaliTime::new(2079, 10, 14, 16, 23, 17, 0).unwrap()
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "2079-10-14 16:23:17");
        let padded = NepaliTime::new(2079, 1, 4, 6, 3, 0, 0).unwrap();
        assert_eq!(padded.to_string(), "2079-01-04 06:03:00");
    }

    #[test]
    fn test_english_time() {
        let time = sample();
        let english = time.english_time();
        assert_eq!(english.year(), 2023);
        assert_eq!(english.month(), 1);
        assert_eq!(english.day(), 28);
        assert_eq!(english.hour(), 16);
        assert_eq!(english.minute(), 23);
        assert_eq!(english.second(), 17);
        assert_eq!(english.timezone().name(), TIMEZONE);
    }

    #[test]
    fn test_accessors() {
        let time = sample();
        assert_eq!(time.date(), (2079, 10, 14));
        assert_eq!(time.year(), 2079);
        assert_eq!(time.month(), 10);
        assert_eq!(time.day(), 14);
        assert_eq!(time.weekday(), Weekday::Sat);
        assert_eq!(time.clock(), (16, 23, 17));
        assert_eq!(time.nanosecond(), 0);
        assert_eq!(time.calendar_date().weekday().unwrap(), Weekday::Sat);
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(NepaliTime::new(2079, 1, 1, 0, 0, 0, 0).unwrap().day_of_year(), 1);
        // 31 + 31 + 32 + 31 + 31 + 31 + 30 + 29 + 30 + 14
        assert_eq!(sample().day_of_year(), 290);
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert!(matches!(
            NepaliTime::new(2100, 1, 1, 0, 0, 0, 0),
            Err(TimeError::Conversion(ConversionError::DateOutOfRange { .. }))
        ));
        assert!(matches!(
            NepaliTime::new(2079, 1, 1, 24, 0, 0, 0),
            Err(TimeError::InvalidTime { hour: 24, .. })
        ));
        assert!(matches!(
            NepaliTime::new(2079, 1, 1, 0, 60, 0, 0),
            Err(TimeError::InvalidTime { minute: 60, .. })
        ));
    }

    #[test]
    fn test_from_english_time_moves_into_kathmandu() {
        // 20:00 UTC is 01:45 the next day in Kathmandu
        let utc = Utc.with_ymd_and_hms(2023, 1, 27, 20, 0, 0).unwrap();
        let time = NepaliTime::from_english_time(&utc).unwrap();
        assert_eq!(time.date(), (2079, 10, 14));
        assert_eq!(time.clock(), (1, 45, 0));
    }

    #[test]
    fn test_from_english_time_out_of_range() {
        let utc = Utc.with_ymd_and_hms(2050, 1, 1, 0, 0, 0).unwrap();
        assert!(NepaliTime::from_english_time(&utc).is_err());
    }

    #[test]
    fn test_round_trip_through_english_time() {
        let time = NepaliTime::new(2080, 12, 15, 9, 30, 0, 500).unwrap();
        let back = NepaliTime::from_english_time(time.english_time()).unwrap();
        assert_eq!(back, time);
    }

    #[test]
    fn test_now_is_in_kathmandu() {
        let now = NepaliTime::now().unwrap();
        assert_eq!(now.english_time().timezone(), nepali_timezone());
    }

    #[test]
    fn test_ordering() {
        let earlier = NepaliTime::new(2079, 10, 14, 9, 0, 0, 0).unwrap();
        let later = NepaliTime::new(2079, 10, 14, 10, 0, 0, 0).unwrap();
        assert!(earlier < later);
        assert!(sample() > later);
    }

    #[test]
    fn test_from_str() {
        let time: NepaliTime = " 2079-10-14 16:23:17 ".parse().unwrap();
        assert_eq!(time, sample());
    }

    #[test]
    fn test_from_str_with_fraction() {
        let time: NepaliTime = "2079-10-14 16:23:17.000500".parse().unwrap();
        assert_eq!(time.nanosecond(), 500);
        assert_eq!(time.to_string(), "2079-10-14 16:23:17");
        assert!(matches!(
            "2079-10-14".parse::<NepaliTime>(),
            Err(ParseError::NoMatch)
        ));
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, "\"2079-10-14 16:23:17.000000\"");
        let parsed: NepaliTime = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());

        let parsed: NepaliTime = serde_json::from_str("\"2079-10-14 16:23:17\"").unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_serde_keeps_nanoseconds() {
        for nanosecond in [500, 123_000, 1_500_000, 999_999_999] {
            let time = NepaliTime::new(2080, 12, 15, 9, 30, 0, nanosecond).unwrap();
            let json = serde_json::to_string(&time).unwrap();
            let back: NepaliTime = serde_json::from_str(&json).unwrap();
            assert_eq!(back, time, "{json}");
            assert_eq!(back.nanosecond(), nanosecond, "{json}");
        }
    }

    #[test]
    fn test_error_display() {
        let err = TimeError::InvalidTime {
            hour: 25,
            minute: 0,
            second: 0,
            nanosecond: 0,
        };
        assert_eq!(err.to_string(), "invalid time of day: 25:00:00.000000000");
        let err = TimeError::from(ConversionError::InvalidMonth {
            calendar: crate::Calendar::Nepali,
            month: 13,
        });
        assert_eq!(err.to_string(), "invalid month: 13 (must be 1-12)");
    }
}
