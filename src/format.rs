//! strftime-style formatting for [`NepaliTime`].
//!
//! A `-` between `%` and the directive drops zero padding, e.g. `%-d`.
//! Unknown directives are written out unchanged.

use crate::consts::NEPALI_MONTHS;
use crate::time::NepaliTime;
use crate::types::{weekday_abbreviation, weekday_name};

/// Formats a borrowed [`NepaliTime`].
#[derive(Debug, Clone, Copy)]
pub struct NepaliFormatter<'a> {
    time: &'a NepaliTime,
}

impl<'a> NepaliFormatter<'a> {
    /// Wraps `time` for formatting
    pub const fn new(time: &'a NepaliTime) -> Self {
        Self { time }
    }

    /// Expands every directive in `format`.
    ///
    /// | directive | meaning |
    /// |-----------|---------|
    /// | `%a` `%A` | weekday, short / full |
    /// | `%B` | Nepali month name |
    /// | `%d` `%m` | day / month, two digits |
    /// | `%y` `%Y` | year, two digits / full |
    /// | `%H` `%I` `%p` | 24-hour, 12-hour, AM/PM |
    /// | `%M` `%S` | minute / second |
    /// | `%f` | nanosecond field, at least six digits, up to nine |
    /// | `%j` | day of the Nepali year, three digits |
    /// | `%w` | weekday number, Sunday is 0 |
    /// | `%%` | a literal `%` |
    pub fn format(&self, format: &str) -> String {
        let mut out = String::with_capacity(format.len() + 8);
        let mut chars = format.chars();

        while let Some(ch) = chars.next() {
            if ch != '%' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                None => out.push('%'),
                Some('%') => out.push('%'),
                Some('-') => match chars.next() {
                    None => out.push_str("%-"),
                    Some(directive) => match self.expand(directive, false) {
                        Some(value) => out.push_str(&value),
                        None => {
                            out.push_str("%-");
                            out.push(directive);
                        }
                    },
                },
                Some(directive) => match self.expand(directive, true) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('%');
                        out.push(directive);
                    }
                },
            }
        }

        out
    }

    fn expand(&self, directive: char, padded: bool) -> Option<String> {
        let time = self.time;
        let value = match directive {
            'a' => weekday_abbreviation(time.weekday()).to_owned(),
            'A' => weekday_name(time.weekday()).to_owned(),
            'B' => month_name(time.month())?.to_owned(),
            'd' => pad(time.day(), 2, padded),
            'm' => pad(time.month(), 2, padded),
            'y' => format!("{:02}", time.year().rem_euclid(100)),
            'Y' => time.year().to_string(),
            'H' => pad(time.hour(), 2, padded),
            'I' => pad(twelve_hour(time.hour()), 2, padded),
            'p' => (if time.hour() >= 12 { "PM" } else { "AM" }).to_owned(),
            'M' => pad(time.minute(), 2, padded),
            'S' => pad(time.second(), 2, padded),
            'f' => pad(time.nanosecond(), 6, padded),
            'j' => pad(time.day_of_year(), 3, padded),
            'w' => time.weekday().num_days_from_sunday().to_string(),
            _ => return None,
        };
        Some(value)
    }
}

fn pad(value: u32, width: usize, padded: bool) -> String {
    if padded {
        format!("{value:0width$}")
    } else {
        value.to_string()
    }
}

const fn twelve_hour(hour: u32) -> u32 {
    match hour {
        0 => 12,
        13.. => hour - 12,
        _ => hour,
    }
}

fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    NEPALI_MONTHS.get(index).copied()
}
