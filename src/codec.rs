//! Conversion between `CalendarDate` and its text forms.
//!
//! Two representations cross the widget boundary: the canonical wire form
//! (`YYYY-MM-DD`) exchanged with the host, and a configurable display form
//! shown in the input boxes. Display formats use the legacy token syntax
//! (`YYYY`, `MM`, `Do`, `dd`, `X`, ...). Month and weekday names come from
//! the [`Locale`] name tables.

use std::convert::Infallible;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::consts::{
    DEFAULT_DISPLAY_FORMAT, DEFAULT_MONTH_FORMAT, JANUARY, MIN_DAY, SECONDS_PER_DAY,
    TWO_DIGIT_YEAR_PIVOT, UNIX_EPOCH_DAYS_FROM_CE, WIRE_FORMAT,
};
use crate::locale::{Locale, NameTable};
use crate::{CalendarDate, ParseError, YearMonth};

/// Layouts accepted after both the display format and ISO-8601 failed.
/// chrono reads the names in these as English.
const PERMISSIVE_LAYOUTS: [&str; 9] = [
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%Y.%m.%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// ISO-8601 date-time layouts; the time of day is dropped.
const ISO_DATETIME_LAYOUTS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Error type for text to date conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Nothing but whitespace was supplied.
    #[error("Empty date string")]
    Empty,

    /// Input diverged from the display format.
    #[error("Expected {expected} at {found:?}")]
    Mismatch { expected: String, found: String },

    /// The display format was satisfied but text remains.
    #[error("Unexpected trailing input: {0:?}")]
    TrailingInput(String),

    /// The display format has no year token.
    #[error("Display format does not determine a year")]
    MissingYear,

    /// No parsing strategy accepted the text.
    #[error("Unrecognized date: {0:?}")]
    Unrecognized(String),

    /// Components were read but do not name a real day.
    #[error(transparent)]
    Invalid(#[from] ParseError),
}

/// A single display-format field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year4,
    Year2,
    MonthName,
    MonthAbbr,
    Month2,
    Month1,
    DayOrdinal,
    Day2,
    Day1,
    WeekdayName,
    WeekdayAbbr,
    WeekdayMin,
    UnixSeconds,
}

/// Legacy tokens, longest first so prefixes never shadow longer tokens.
const LEGACY_TOKENS: [(&str, Field); 13] = [
    ("YYYY", Field::Year4),
    ("YY", Field::Year2),
    ("MMMM", Field::MonthName),
    ("MMM", Field::MonthAbbr),
    ("MM", Field::Month2),
    ("M", Field::Month1),
    ("Do", Field::DayOrdinal),
    ("DD", Field::Day2),
    ("D", Field::Day1),
    ("dddd", Field::WeekdayName),
    ("ddd", Field::WeekdayAbbr),
    ("dd", Field::WeekdayMin),
    ("X", Field::UnixSeconds),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Field(Field),
}

impl Field {
    /// The chrono strftime item for this field, where one exists. chrono
    /// only knows English names.
    const fn strftime(self) -> Option<&'static str> {
        match self {
            Self::Year4 => Some("%Y"),
            Self::Year2 => Some("%y"),
            Self::MonthName => Some("%B"),
            Self::MonthAbbr => Some("%b"),
            Self::Month2 => Some("%m"),
            Self::Month1 => Some("%-m"),
            Self::Day2 => Some("%d"),
            Self::Day1 => Some("%-d"),
            Self::WeekdayName => Some("%A"),
            Self::WeekdayAbbr => Some("%a"),
            Self::DayOrdinal | Self::WeekdayMin | Self::UnixSeconds => None,
        }
    }

    fn render(self, date: CalendarDate, names: &NameTable, out: &mut String) {
        let month = date.month() as usize - 1;
        let weekday = date.weekday() as usize;
        match self {
            Self::Year4 => out.push_str(&format!("{:04}", date.year())),
            Self::Year2 => out.push_str(&format!("{:02}", date.year().rem_euclid(100))),
            Self::MonthName => out.push_str(names.months[month]),
            Self::MonthAbbr => out.push_str(names.months_short[month]),
            Self::Month2 => out.push_str(&format!("{:02}", date.month())),
            Self::Month1 => out.push_str(&date.month().to_string()),
            Self::DayOrdinal => {
                out.push_str(&date.day().to_string());
                out.push_str(ordinal_suffix(date.day()));
            }
            Self::Day2 => out.push_str(&format!("{:02}", date.day())),
            Self::Day1 => out.push_str(&date.day().to_string()),
            Self::WeekdayName => out.push_str(names.weekdays[weekday]),
            Self::WeekdayAbbr => out.push_str(names.weekdays_short[weekday]),
            Self::WeekdayMin => out.push_str(names.weekdays_min[weekday]),
            Self::UnixSeconds => {
                let days = date.naive().num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE;
                out.push_str(&(i64::from(days) * SECONDS_PER_DAY).to_string());
            }
        }
    }

    fn read(
        self,
        cursor: &mut Cursor<'_>,
        names: &NameTable,
        parts: &mut Parts,
    ) -> Result<(), CodecError> {
        match self {
            Self::Year4 => parts.year = Some(cursor.number(4, 4, "four-digit year")?),
            Self::Year2 => {
                let short = cursor.number(2, 2, "two-digit year")?;
                parts.year = Some(expand_two_digit_year(short));
            }
            Self::MonthName | Self::MonthAbbr => {
                let (month, len) = names
                    .match_month(cursor.rest)
                    .ok_or_else(|| cursor.mismatch("month name"))?;
                cursor.advance(len);
                parts.month = Some(month);
            }
            Self::Month2 => parts.month = Some(cursor.number(2, 2, "two-digit month")?),
            Self::Month1 => parts.month = Some(cursor.number(1, 2, "month")?),
            Self::Day2 => parts.day = Some(cursor.number(2, 2, "two-digit day")?),
            Self::Day1 => parts.day = Some(cursor.number(1, 2, "day")?),
            Self::DayOrdinal => {
                parts.day = Some(cursor.number(1, 2, "day")?);
                let suffix = cursor.letters(2, "ordinal suffix")?;
                if !["st", "nd", "rd", "th"]
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(suffix))
                {
                    return Err(CodecError::Mismatch {
                        expected: "ordinal suffix".to_owned(),
                        found: suffix.to_owned(),
                    });
                }
            }
            Self::WeekdayName | Self::WeekdayAbbr | Self::WeekdayMin => {
                // Weekdays are decorative; the day is determined by the other fields.
                let len = names
                    .match_weekday(cursor.rest)
                    .ok_or_else(|| cursor.mismatch("weekday"))?;
                cursor.advance(len);
            }
            Self::UnixSeconds => parts.timestamp = Some(cursor.signed_number("unix timestamp")?),
        }
        Ok(())
    }
}

/// A compiled display format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DisplayFormat {
    source: String,
    tokens: Vec<Token>,
}

impl DisplayFormat {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_owned(),
            tokens: tokenize(source),
        }
    }

    /// Default caption format for month headers
    pub fn month_caption() -> Self {
        Self::new(DEFAULT_MONTH_FORMAT)
    }

    /// The format as configured by the host
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// chrono strftime translation of the format, or `None` when it uses a
    /// token chrono cannot express (`Do`, `dd`, `X`). Names in the result
    /// are English whatever the locale.
    pub fn to_strftime(&self) -> Option<String> {
        let mut pattern = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => pattern.push_str(&text.replace('%', "%%")),
                Token::Field(field) => pattern.push_str(field.strftime()?),
            }
        }
        Some(pattern)
    }
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_FORMAT)
    }
}

impl FromStr for DisplayFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for DisplayFormat {
    fn from(source: String) -> Self {
        Self::new(&source)
    }
}

impl From<DisplayFormat> for String {
    fn from(format: DisplayFormat) -> Self {
        format.source
    }
}

/// Parses user text with the display format, then ISO-8601, then a set of
/// common layouts. Any time of day is discarded.
///
/// # Errors
/// Returns `CodecError::Empty` for blank text and `CodecError::Unrecognized`
/// when no strategy yields a supported date.
pub fn parse(
    text: &str,
    format: &DisplayFormat,
    locale: Locale,
) -> Result<CalendarDate, CodecError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CodecError::Empty);
    }

    match parse_strict(trimmed, format, locale) {
        Ok(date) => return Ok(date),
        Err(err) => trace!("strict parse of {trimmed:?} with {:?} failed: {err}", format.as_str()),
    }

    if let Some(date) = parse_iso(trimmed) {
        return CalendarDate::from_naive(date).map_err(CodecError::from);
    }

    PERMISSIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(trimmed, layout).ok())
        .ok_or_else(|| CodecError::Unrecognized(trimmed.to_owned()))
        .and_then(|date| CalendarDate::from_naive(date).map_err(CodecError::from))
}

/// Parses text strictly against the display format.
///
/// # Errors
/// Returns the first mismatch between the text and the format.
pub fn parse_strict(
    text: &str,
    format: &DisplayFormat,
    locale: Locale,
) -> Result<CalendarDate, CodecError> {
    let mut cursor = Cursor { rest: text.trim() };
    if cursor.rest.is_empty() {
        return Err(CodecError::Empty);
    }

    let names = locale.names();
    let mut parts = Parts::default();
    for token in &format.tokens {
        match token {
            Token::Literal(literal) => cursor.literal(literal)?,
            Token::Field(field) => field.read(&mut cursor, names, &mut parts)?,
        }
    }
    if !cursor.rest.is_empty() {
        return Err(CodecError::TrailingInput(cursor.rest.to_owned()));
    }
    parts.resolve()
}

pub fn format(date: CalendarDate, format: &DisplayFormat, locale: Locale) -> String {
    let names = locale.names();
    let mut out = String::new();
    for token in &format.tokens {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Field(field) => field.render(date, names, &mut out),
        }
    }
    out
}

/// Formats an optional date; a missing date renders as the empty string.
pub fn format_opt(date: Option<CalendarDate>, format: &DisplayFormat, locale: Locale) -> String {
    date.map(|d| self::format(d, format, locale)).unwrap_or_default()
}

/// Renders a month caption such as `June 2024`.
pub fn format_month(month: YearMonth, format: &DisplayFormat, locale: Locale) -> String {
    self::format(month.first_day(), format, locale)
}

/// Canonical `YYYY-MM-DD` form exchanged with the host.
pub fn to_wire(date: CalendarDate) -> String {
    date.naive().format(WIRE_FORMAT).to_string()
}

pub fn to_wire_opt(date: Option<CalendarDate>) -> Option<String> {
    date.map(to_wire)
}

/// Reads a host-supplied date. ISO date-times are accepted and truncated.
///
/// # Errors
/// Returns `CodecError::Unrecognized` when the text is not ISO-8601.
pub fn from_wire(text: &str) -> Result<CalendarDate, CodecError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CodecError::Empty);
    }
    let date = parse_iso(trimmed).ok_or_else(|| CodecError::Unrecognized(trimmed.to_owned()))?;
    Ok(CalendarDate::from_naive(date)?)
}

fn parse_iso(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, WIRE_FORMAT)
        .ok()
        .or_else(|| {
            ISO_DATETIME_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
}

fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = source;

    while let Some(c) = rest.chars().next() {
        // `[...]` escapes literal text
        if c == '[' {
            if let Some(close) = rest.find(']') {
                literal.push_str(&rest[1..close]);
                rest = &rest[close + 1..];
                continue;
            }
        }
        if let Some((pattern, field)) = LEGACY_TOKENS.iter().find(|(p, _)| rest.starts_with(p)) {
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Field(*field));
            rest = &rest[pattern.len()..];
            continue;
        }
        literal.push(c);
        rest = &rest[c.len_utf8()..];
    }
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

/// Components collected while walking a display format.
#[derive(Debug, Default)]
struct Parts {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    timestamp: Option<i64>,
}

impl Parts {
    fn resolve(self) -> Result<CalendarDate, CodecError> {
        if let Some(seconds) = self.timestamp {
            let days = seconds.div_euclid(SECONDS_PER_DAY) + i64::from(UNIX_EPOCH_DAYS_FROM_CE);
            let date = i32::try_from(days)
                .ok()
                .and_then(NaiveDate::from_num_days_from_ce_opt)
                .ok_or_else(|| CodecError::Unrecognized(seconds.to_string()))?;
            return Ok(CalendarDate::from_naive(date)?);
        }
        let year = self.year.ok_or(CodecError::MissingYear)?;
        Ok(CalendarDate::new(
            year,
            self.month.unwrap_or(JANUARY),
            self.day.unwrap_or(MIN_DAY),
        )?)
    }
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn mismatch(&self, expected: &str) -> CodecError {
        CodecError::Mismatch {
            expected: expected.to_owned(),
            found: self.rest.to_owned(),
        }
    }

    fn literal(&mut self, literal: &str) -> Result<(), CodecError> {
        self.rest = self
            .rest
            .strip_prefix(literal)
            .ok_or_else(|| self.mismatch(&format!("{literal:?}")))?;
        Ok(())
    }

    /// Reads between `min` and `max` ASCII digits.
    fn number<T: FromStr>(&mut self, min: usize, max: usize, what: &str) -> Result<T, CodecError> {
        let len = self
            .rest
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if len < min {
            return Err(self.mismatch(what));
        }
        let (digits, rest) = self.rest.split_at(len);
        let value = digits.parse().map_err(|_| self.mismatch(what))?;
        self.rest = rest;
        Ok(value)
    }

    fn signed_number(&mut self, what: &str) -> Result<i64, CodecError> {
        let negative = self.rest.starts_with('-');
        if negative {
            self.rest = &self.rest[1..];
        }
        let value: i64 = self.number(1, 18, what)?;
        Ok(if negative { -value } else { value })
    }

    /// Reads exactly `count` ASCII letters.
    fn letters(&mut self, count: usize, what: &str) -> Result<&'a str, CodecError> {
        let len = self
            .rest
            .bytes()
            .take(count)
            .take_while(u8::is_ascii_alphabetic)
            .count();
        if len < count {
            return Err(self.mismatch(what));
        }
        let (letters, rest) = self.rest.split_at(len);
        self.rest = rest;
        Ok(letters)
    }

    /// Skips `len` bytes already matched by the caller.
    fn advance(&mut self, len: usize) {
        self.rest = self.rest.get(len..).unwrap_or_default();
    }
}

fn expand_two_digit_year(short: u32) -> i32 {
    let century = if short <= TWO_DIGIT_YEAR_PIVOT { 2000 } else { 1900 };
    century + i32::try_from(short).unwrap_or_default()
}

const fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
