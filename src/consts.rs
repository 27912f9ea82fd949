use chrono_tz::Tz;

/// Bikram Sambat year of the reference date (2000-01-01 BS)
pub const REFERENCE_NEPALI_YEAR: i32 = 2000;

/// Gregorian date identical to 2000-01-01 BS
pub const REFERENCE_ENGLISH_DATE: (i32, u32, u32) = (1943, 4, 14);

/// Number of Bikram Sambat years covered by the month-length table
pub const NEPALI_CALENDAR_YEARS: usize = 100;

/// Month number for January / Baisakh
pub const MIN_MONTH: u32 = 1;
/// Month number for December / Chaitra
pub const MAX_MONTH: u32 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u32 = 1;

/// Upper day bound applied to Gregorian input regardless of month
pub const MAX_ENGLISH_DAY: u32 = 31;

/// Month number for February
pub const FEBRUARY: u32 = 2;

/// Gregorian month lengths for a common year
pub const ENGLISH_MONTH_DAYS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Gregorian month lengths for a leap year
pub const ENGLISH_LEAP_MONTH_DAYS: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days in a common Gregorian year
pub const DAYS_IN_YEAR: u32 = 365;
/// Days in a leap Gregorian year
pub const DAYS_IN_LEAP_YEAR: u32 = 366;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Nepali month names, Baisakh first
pub const NEPALI_MONTHS: [&str; 12] = [
    "Baisakh", "Jestha", "Ashadh", "Shrawan", "Bhadra", "Ashwin", "Kartik", "Mangsir", "Poush",
    "Magh", "Falgun", "Chaitra",
];

/// Weekday names, Sunday first
pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// IANA name of the Nepali timezone
pub const TIMEZONE: &str = "Asia/Kathmandu";

/// Zone every `NepaliTime` is expressed in
pub const NEPALI_TZ: Tz = chrono_tz::Asia::Kathmandu;

/// Layout used by `Display`/`FromStr` on `NepaliTime`
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `DEFAULT_FORMAT` with the fraction kept, used by serde on `NepaliTime`
pub const PRECISE_FORMAT: &str = "%Y-%m-%d %H:%M:%S.%f";
