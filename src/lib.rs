//! Calendar engine behind start/end date range pickers.
//!
//! Hosts configure a picker with [`RangeProps`], feed it user input through
//! [`RangeCalendar`], and receive committed dates back as [`RangeUpdate`]s.
//! Dates cross the boundary as `YYYY-MM-DD` strings.

pub mod codec;
mod consts;
pub mod constraints;
pub mod controller;
pub mod deferred;
pub mod grid;
pub mod locale;
pub mod navigation;
mod prelude;
pub mod props;
mod range;
pub mod render;
pub mod selection;
pub mod single;
mod types;
pub mod window;

pub use codec::{CodecError, DisplayFormat};
pub use consts::*;
pub use controller::{CommitTrigger, Endpoint, FocusTarget, RangeCalendar, reconcile};
pub use locale::Locale;
pub use navigation::GridKey;
pub use props::{DateUpdate, HostCallback, RangeProps, RangeUpdate, SingleProps, UpdateMode};
pub use range::DateRange;
pub use single::SingleDatePicker;
pub use types::{CalendarDate, FirstDayOfWeek, YearMonth, days_in_month, is_leap_year};

use crate::prelude::*;
use std::str::FromStr;

/// Errors for date components that do not name a real calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u32),
    #[display(fmt = "Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },
    #[display(fmt = "Invalid first day of week: {} (must be 0-{})", "_0", MAX_FIRST_DAY_OF_WEEK)]
    InvalidFirstDayOfWeek(u8),
}

impl std::error::Error for ParseError {}

impl FromStr for CalendarDate {
    type Err = CodecError;

    /// Parses the `YYYY-MM-DD` wire form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::from_wire(s)
    }
}
