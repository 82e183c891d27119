//! Structured decoding of literal tokens.
//!
//! The lexer classifies `T#1h30m` or `DT#2024-01-15-14:30:00` as single
//! tokens. These helpers split such token text into its components without
//! evaluating it against any runtime resolution.

use smol_str::SmolStr;
use thiserror::Error;

use super::TokenKind;

/// Failure to decode literal text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("'{0}' is not a literal token")]
    NotALiteral(SmolStr),
    #[error("invalid integer literal '{0}'")]
    InvalidInteger(SmolStr),
    #[error("integer literal '{0}' does not fit in 64 bits")]
    IntegerOverflow(SmolStr),
    #[error("invalid duration component '{0}'")]
    InvalidDuration(SmolStr),
    #[error("invalid date '{0}'")]
    InvalidDate(SmolStr),
    #[error("invalid time of day '{0}'")]
    InvalidTimeOfDay(SmolStr),
}

/// Unit of one duration component.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Day,
    Hour,
    Minute,
    Second,
    Milli,
    Micro,
    Nano,
}

impl DurationUnit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix.to_ascii_lowercase().as_str() {
            "d" => Self::Day,
            "h" => Self::Hour,
            "m" => Self::Minute,
            "s" => Self::Second,
            "ms" => Self::Milli,
            "us" => Self::Micro,
            "ns" => Self::Nano,
            _ => return None,
        })
    }

    /// Nanoseconds in one unit.
    #[must_use]
    pub fn nanos(self) -> u64 {
        match self {
            Self::Day => 86_400_000_000_000,
            Self::Hour => 3_600_000_000_000,
            Self::Minute => 60_000_000_000,
            Self::Second => 1_000_000_000,
            Self::Milli => 1_000_000,
            Self::Micro => 1_000,
            Self::Nano => 1,
        }
    }
}

/// One `<number><unit>` piece of a duration, e.g. `4h` or `14.7s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationComponent {
    /// Digits as written, separators removed.
    pub value: SmolStr,
    pub unit: DurationUnit,
}

/// `T#`/`TIME#`/`LT#`/`LTIME#` literal split into components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duration {
    /// `LT#`/`LTIME#` prefix.
    pub long: bool,
    pub negative: bool,
    pub components: Vec<DurationComponent>,
}

impl Duration {
    /// Total length in nanoseconds, rounded to the nearest nanosecond.
    #[must_use]
    pub fn total_nanos(&self) -> i128 {
        let total: f64 = self
            .components
            .iter()
            .map(|c| c.value.parse::<f64>().unwrap_or(0.0) * c.unit.nanos() as f64)
            .sum();
        let nanos = total.round() as i128;
        if self.negative {
            -nanos
        } else {
            nanos
        }
    }
}

/// Calendar date part of `D#` and `DT#` literals.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

/// Clock part of `TOD#` and `DT#` literals.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Fractional seconds digits, separators removed.
    pub fraction: Option<SmolStr>,
}

/// A decoded literal token.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Integer { base: u32, value: u64 },
    Duration(Duration),
    Date { long: bool, date: Date },
    TimeOfDay { long: bool, time: TimeOfDay },
    DateAndTime { long: bool, date: Date, time: TimeOfDay },
}

/// Decodes the text of an integer, duration, date or time token.
pub fn decode(kind: TokenKind, text: &str) -> Result<Literal, LiteralError> {
    match kind {
        TokenKind::IntLiteral => {
            let (base, value) = parse_integer(text)?;
            Ok(Literal::Integer { base, value })
        }
        TokenKind::TimeLiteral => parse_duration(text).map(Literal::Duration),
        TokenKind::DateLiteral => {
            let (prefix, rest) = split_prefix(text);
            Ok(Literal::Date {
                long: is_long(prefix),
                date: parse_date(rest, text)?,
            })
        }
        TokenKind::TimeOfDayLiteral => {
            let (prefix, rest) = split_prefix(text);
            Ok(Literal::TimeOfDay {
                long: is_long(prefix),
                time: parse_time_of_day(rest, text)?,
            })
        }
        TokenKind::DateAndTimeLiteral => {
            let (prefix, rest) = split_prefix(text);
            // yyyy-mm-dd-hh:mm:ss; the date is the first three dash fields.
            let split = rest
                .match_indices('-')
                .nth(2)
                .map(|(idx, _)| idx)
                .ok_or_else(|| LiteralError::InvalidDate(text.into()))?;
            Ok(Literal::DateAndTime {
                long: is_long(prefix),
                date: parse_date(&rest[..split], text)?,
                time: parse_time_of_day(&rest[split + 1..], text)?,
            })
        }
        _ => Err(LiteralError::NotALiteral(text.into())),
    }
}

/// Parses `42`, `1_000`, `2#1010`, `8#17` or `16#FF` into `(base, value)`.
pub fn parse_integer(text: &str) -> Result<(u32, u64), LiteralError> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let (base, digits) = match cleaned.split_once('#') {
        Some((base, digits)) => (
            base.parse::<u32>()
                .map_err(|_| LiteralError::InvalidInteger(text.into()))?,
            digits,
        ),
        None => (10, cleaned.as_str()),
    };
    if !matches!(base, 2 | 8 | 10 | 16) || digits.is_empty() {
        return Err(LiteralError::InvalidInteger(text.into()));
    }
    u64::from_str_radix(digits, base)
        .map(|value| (base, value))
        .map_err(|err| match err.kind() {
            std::num::IntErrorKind::PosOverflow => LiteralError::IntegerOverflow(text.into()),
            _ => LiteralError::InvalidInteger(text.into()),
        })
}

/// Splits a duration literal into its `<number><unit>` components.
pub fn parse_duration(text: &str) -> Result<Duration, LiteralError> {
    let invalid = || LiteralError::InvalidDuration(text.into());
    let (prefix, rest) = split_prefix(text);
    if prefix.is_empty() {
        return Err(invalid());
    }
    let (negative, mut rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let mut components = Vec::new();
    while !rest.is_empty() {
        rest = rest.trim_start_matches('_');
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let unit_len = rest[number_len..]
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len() - number_len);
        if number_len == 0 {
            return Err(invalid());
        }
        let unit = DurationUnit::from_suffix(&rest[number_len..number_len + unit_len])
            .ok_or_else(invalid)?;
        components.push(DurationComponent {
            value: rest[..number_len].into(),
            unit,
        });
        rest = &rest[number_len + unit_len..];
    }

    if components.is_empty() {
        return Err(invalid());
    }
    Ok(Duration {
        long: is_long(prefix),
        negative,
        components,
    })
}

fn parse_date(fields: &str, text: &str) -> Result<Date, LiteralError> {
    let invalid = || LiteralError::InvalidDate(text.into());
    let mut parts = fields.split('-');
    let mut next = || -> Result<u16, LiteralError> {
        parts
            .next()
            .and_then(|part| part.parse::<u16>().ok())
            .ok_or_else(invalid)
    };
    let year = next()?;
    let month = u8::try_from(next()?).map_err(|_| invalid())?;
    let day = u8::try_from(next()?).map_err(|_| invalid())?;
    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return Err(invalid());
    }
    Ok(Date { year, month, day })
}

fn parse_time_of_day(fields: &str, text: &str) -> Result<TimeOfDay, LiteralError> {
    let invalid = || LiteralError::InvalidTimeOfDay(text.into());
    let (clock, fraction) = match fields.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction.replace('_', "").into())),
        None => (fields, None),
    };
    let mut parts = clock.split(':').map(|part| part.parse::<u8>().ok());
    let (Some(Some(hour)), Some(Some(minute)), Some(Some(second)), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    if hour > 23 || minute > 59 || second > 59 {
        return Err(invalid());
    }
    Ok(TimeOfDay {
        hour,
        minute,
        second,
        fraction,
    })
}

fn split_prefix(text: &str) -> (&str, &str) {
    text.split_once('#').unwrap_or(("", text))
}

fn is_long(prefix: &str) -> bool {
    prefix.len() > 1 && prefix.as_bytes()[0].eq_ignore_ascii_case(&b'L')
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
