use crate::ParseError;
use crate::consts::{
    DAYS_PER_WEEK, DECEMBER, JANUARY, MAX_FIRST_DAY_OF_WEEK, MAX_MONTH, MAX_YEAR, MIN_DAY,
    MIN_YEAR,
};
use crate::prelude::*;
use chrono::{Datelike, Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A whole calendar day in the proleptic Gregorian calendar.
///
/// Years are limited to `MIN_YEAR..=MAX_YEAR` so every value has a
/// four-digit wire representation. Ordering and equality are by day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "_0.year()", "_0.month()", "_0.day()")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date from its components (`month` is 1-based).
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear`, `InvalidMonth` or `InvalidDay` when
    /// the components do not name a real day.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ParseError> {
        validate_year(year)?;
        if !(JANUARY..=MAX_MONTH).contains(&month) {
            return Err(ParseError::InvalidMonth(month));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(ParseError::InvalidDay { year, month, day })
    }

    /// Wraps a chrono date, rejecting years outside the supported range.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` for years outside `MIN_YEAR..=MAX_YEAR`.
    pub fn from_naive(date: NaiveDate) -> Result<Self, ParseError> {
        validate_year(date.year())?;
        Ok(Self(date))
    }

    /// The current day on the local clock
    pub fn today() -> Self {
        Self::from_naive(Local::now().date_naive())
            .unwrap_or_else(|_| Self(first_of_month(1970, JANUARY)))
    }

    #[inline]
    pub const fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month of the year, 1-based
    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Day of the week with Sunday = 0
    pub fn weekday(self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn year_month(self) -> YearMonth {
        YearMonth {
            year: self.year(),
            month: self.month(),
        }
    }

    /// Moves by `delta` days. `None` when the result leaves the supported years.
    pub fn add_days(self, delta: i64) -> Option<Self> {
        let steps = Days::new(delta.unsigned_abs());
        let moved = if delta >= 0 {
            self.0.checked_add_days(steps)
        } else {
            self.0.checked_sub_days(steps)
        }?;
        Self::from_naive(moved).ok()
    }

    /// Moves by `delta` months, clamping the day to the target month's length.
    pub fn add_months(self, delta: i32) -> Option<Self> {
        let steps = Months::new(delta.unsigned_abs());
        let moved = if delta >= 0 {
            self.0.checked_add_months(steps)
        } else {
            self.0.checked_sub_months(steps)
        }?;
        Self::from_naive(moved).ok()
    }

    /// Signed number of days from `self` to `other`
    pub fn days_until(self, other: Self) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        crate::codec::from_wire(&s).map_err(serde::de::Error::custom)
    }
}

/// A calendar month, used to address grids and the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}", year, month)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year/month pair (`month` is 1-based).
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` or `InvalidMonth` when out of range.
    pub fn new(year: i32, month: u32) -> Result<Self, ParseError> {
        validate_year(year)?;
        if !(JANUARY..=MAX_MONTH).contains(&month) {
            return Err(ParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    #[inline]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Adds or subtracts months, carrying into the year.
    /// `None` when the result leaves the supported years.
    pub fn add_months(self, delta: i32) -> Option<Self> {
        let index = i64::from(self.year) * i64::from(MAX_MONTH) + i64::from(self.month - 1)
            + i64::from(delta);
        let year = i32::try_from(index.div_euclid(i64::from(MAX_MONTH))).ok()?;
        let month = u32::try_from(index.rem_euclid(i64::from(MAX_MONTH))).ok()? + 1;
        Self::new(year, month).ok()
    }

    /// Signed number of months from `self` to `other`
    pub fn months_until(self, other: Self) -> i64 {
        (i64::from(other.year) - i64::from(self.year)) * i64::from(MAX_MONTH)
            + i64::from(other.month)
            - i64::from(self.month)
    }

    pub const fn days(self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn first_day(self) -> CalendarDate {
        CalendarDate(first_of_month(self.year, self.month))
    }

    pub fn last_day(self) -> CalendarDate {
        let first = first_of_month(self.year, self.month);
        CalendarDate(
            first
                .checked_add_days(Days::new(u64::from(self.days() - MIN_DAY)))
                .unwrap_or(first),
        )
    }

    pub fn contains(self, date: CalendarDate) -> bool {
        date.year_month() == self
    }
}

impl From<CalendarDate> for YearMonth {
    fn from(date: CalendarDate) -> Self {
        date.year_month()
    }
}

/// The weekday a grid row starts on, with Sunday = 0 and Saturday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FirstDayOfWeek(u8);

impl FirstDayOfWeek {
    /// # Errors
    /// Returns `ParseError::InvalidFirstDayOfWeek` if the value is above 6.
    pub const fn new(value: u8) -> Result<Self, ParseError> {
        if value > MAX_FIRST_DAY_OF_WEEK {
            return Err(ParseError::InvalidFirstDayOfWeek(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Column a weekday (Sunday = 0) lands in when rows start on `self`
    pub const fn column_of(self, weekday: u32) -> usize {
        (weekday as usize + DAYS_PER_WEEK - self.0 as usize) % DAYS_PER_WEEK
    }
}

impl TryFrom<u8> for FirstDayOfWeek {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FirstDayOfWeek> for u8 {
    fn from(value: FirstDayOfWeek) -> Self {
        value.0
    }
}

// Helper functions

fn validate_year(year: i32) -> Result<(), ParseError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(ParseError::InvalidYear(year))
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // Only reached with validated components.
    NaiveDate::from_ymd_opt(year, month, MIN_DAY).unwrap_or(NaiveDate::MIN)
}

pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        JANUARY..=DECEMBER => 31,
        _ => 0,
    }
}
