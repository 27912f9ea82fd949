//! strptime-style parsing into [`NepaliTime`].
//!
//! A format string is translated into an anchored, case-insensitive regex
//! with one named group per directive. Compiled patterns are cached per
//! format string for the life of the process.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::consts::{MIN_DAY, MIN_MONTH, NEPALI_MONTHS};
use crate::time::{NepaliTime, TimeError};

/// Century added to two-digit `%y` years
const CENTURY: i32 = 2000;

/// Digits a short `%f` field is right-padded to
const FRACTION_DIGITS: usize = 6;

static PATTERN_CACHE: Lazy<Mutex<HashMap<String, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Error type for [`parse`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    /// The format uses a directive the parser does not know.
    #[error("the format '%{0}' isn't supported")]
    UnsupportedDirective(String),

    /// The input does not have the shape the format describes.
    #[error("datetime string did not match with given format")]
    NoMatch,

    /// The format has neither `%Y` nor `%y`.
    #[error("format has no year directive (%Y or %y)")]
    MissingYear,

    /// A captured field could not be turned into a number or name.
    #[error("invalid value {value:?} for %{directive}")]
    InvalidValue { directive: char, value: String },

    /// The generated pattern failed to compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),

    /// The parsed fields do not form a valid Nepali time.
    #[error(transparent)]
    Time(#[from] TimeError),
}

/// Parses `input` according to `format` into a [`NepaliTime`].
///
/// Month and day default to 1, clock fields to 0. `%w`, `%j`, `%a` and `%A`
/// must match but do not affect the result.
///
/// # Errors
/// Returns `ParseError::UnsupportedDirective` for an unknown directive,
/// `ParseError::NoMatch` if the input does not fit the format,
/// `ParseError::MissingYear` if the format has no year and
/// `ParseError::Time` if the parsed date or time is invalid.
pub fn parse(input: &str, format: &str) -> Result<NepaliTime, ParseError> {
    let regex = compile(format)?;
    let captures = regex.captures(input).ok_or(ParseError::NoMatch)?;
    let fields = Fields::from_captures(&captures)?;

    Ok(NepaliTime::new(
        fields.year,
        fields.month,
        fields.day,
        fields.hour,
        fields.minute,
        fields.second,
        fields.nanosecond,
    )?)
}

/// Translates a format string into the regex source used to match it.
///
/// # Errors
/// Returns `ParseError::UnsupportedDirective` for an unknown directive.
pub fn pattern(format: &str) -> Result<String, ParseError> {
    let mut out = String::with_capacity(format.len() * 4);
    out.push('^');

    let mut chars = format.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '%' {
            let mut directive = String::with_capacity(2);
            match chars.next() {
                Some('-') => {
                    directive.push('-');
                    directive.extend(chars.next());
                }
                Some(next) => directive.push(next),
                None => {}
            }
            if directive == "%" {
                out.push('%');
                continue;
            }
            let group = directive_pattern(&directive)
                .ok_or(ParseError::UnsupportedDirective(directive))?;
            out.push_str(group);
        } else if ch.is_whitespace() {
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            out.push_str(r"\s+");
        } else {
            out.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4])));
        }
    }

    out.push('$');
    Ok(out)
}

fn directive_pattern(directive: &str) -> Option<&'static str> {
    let group = match directive {
        "d" | "-d" => r"(?P<d>3[0-2]|[1-2]\d|0[1-9]|[1-9]| [1-9])",
        "f" | "-f" => r"(?P<f>[0-9]{1,9})",
        "H" | "-H" => r"(?P<H>2[0-3]|[0-1]\d|\d)",
        "I" | "-I" => r"(?P<I>1[0-2]|0[1-9]|[1-9])",
        "j" | "-j" => r"(?P<j>36[0-6]|3[0-5]\d|[1-2]\d\d|0[1-9]\d|00[1-9]|[1-9]\d|0[1-9]|[1-9])",
        "m" | "-m" => r"(?P<m>1[0-2]|0[1-9]|[1-9])",
        "M" | "-M" => r"(?P<M>[0-5]\d|\d)",
        "S" | "-S" => r"(?P<S>6[0-1]|[0-5]\d|\d)",
        "w" => r"(?P<w>[0-6])",
        "y" => r"(?P<y>\d\d)",
        "Y" => r"(?P<Y>\d\d\d\d)",
        "B" => {
            r"(?P<B>Baisakh|Jestha|Ashadh|Shrawan|Bhadra|Ashwin|Kartik|Mangsir|Poush|Magh|Falgun|Chaitra)"
        }
        "A" => r"(?P<A>Sunday|Monday|Tuesday|Wednesday|Thursday|Friday|Saturday)",
        "a" => r"(?P<a>Sun|Mon|Tue|Wed|Thu|Fri|Sat)",
        "p" => r"(?P<p>AM|PM)",
        _ => return None,
    };
    Some(group)
}

fn compile(format: &str) -> Result<Regex, ParseError> {
    let mut cache = PATTERN_CACHE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(regex) = cache.get(format) {
        return Ok(regex.clone());
    }

    let source = pattern(format)?;
    let regex = Regex::new(&format!("(?i){source}"))?;
    debug!(format, pattern = %source, "compiled datetime format");

    cache.insert(format.to_owned(), regex.clone());
    Ok(regex)
}

/// Numeric fields extracted from a match, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fields {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    nanosecond: u32,
}

impl Fields {
    fn from_captures(captures: &Captures<'_>) -> Result<Self, ParseError> {
        let year = if let Some(year) = number::<i32>(captures, 'Y')? {
            year
        } else if let Some(short) = number::<i32>(captures, 'y')? {
            CENTURY + short
        } else {
            return Err(ParseError::MissingYear);
        };

        let mut month = number(captures, 'm')?.unwrap_or(MIN_MONTH);
        if let Some(name) = captures.name("B") {
            month = month_from_name(name.as_str()).ok_or_else(|| ParseError::InvalidValue {
                directive: 'B',
                value: name.as_str().to_owned(),
            })?;
        }
        let day = number(captures, 'd')?.unwrap_or(MIN_DAY);

        let mut hour = number(captures, 'H')?.unwrap_or(0);
        if let Some(twelve) = number::<u32>(captures, 'I')? {
            let pm = captures
                .name("p")
                .is_some_and(|p| p.as_str().eq_ignore_ascii_case("pm"));
            hour = match (twelve, pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, true) => h + 12,
                (h, false) => h,
            };
        }

        let nanosecond = match captures.name("f") {
            Some(fraction) => {
                let digits = format!("{:0<FRACTION_DIGITS$}", fraction.as_str());
                digits.parse().map_err(|_| ParseError::InvalidValue {
                    directive: 'f',
                    value: fraction.as_str().to_owned(),
                })?
            }
            None => 0,
        };

        Ok(Self {
            year,
            month,
            day,
            hour,
            minute: number(captures, 'M')?.unwrap_or(0),
            second: number(captures, 'S')?.unwrap_or(0),
            nanosecond,
        })
    }
}

fn number<T: FromStr>(captures: &Captures<'_>, directive: char) -> Result<Option<T>, ParseError> {
    let mut name = [0; 4];
    let Some(value) = captures.name(directive.encode_utf8(&mut name)) else {
        return Ok(None);
    };
    value
        .as_str()
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ParseError::InvalidValue {
            directive,
            value: value.as_str().to_owned(),
        })
}

fn month_from_name(name: &str) -> Option<u32> {
    NEPALI_MONTHS
        .iter()
        .zip(MIN_MONTH..)
        .find_map(|(month, number)| month.eq_ignore_ascii_case(name).then_some(number))
}
