//! Host-facing configuration and the updates sent back to the host.
//!
//! Props arrive as JSON-like maps with snake_case keys and wire-format date
//! strings (`YYYY-MM-DD` or `null`). Every field is optional; missing ones
//! take the widget defaults.

use serde::{Deserialize, Serialize};

use crate::codec::DisplayFormat;
use crate::consts::{DEFAULT_MONTH_FORMAT, DEFAULT_RANGE_MONTHS, DEFAULT_SINGLE_MONTHS};
use crate::locale::Locale;
use crate::{CalendarDate, DateRange, FirstDayOfWeek};

/// When edits are reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Report each endpoint as soon as it changes
    SingleDate,
    /// Report only complete (or fully cleared) ranges
    #[default]
    BothDates,
}

/// Configuration of the range picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeProps {
    pub start_date:                  Option<CalendarDate>,
    pub end_date:                    Option<CalendarDate>,
    pub min_date_allowed:            Option<CalendarDate>,
    pub max_date_allowed:            Option<CalendarDate>,
    pub disabled_days:               Vec<CalendarDate>,
    pub minimum_nights:              u32,
    pub first_day_of_week:           FirstDayOfWeek,
    pub show_outside_days:           bool,
    pub number_of_months_shown:      usize,
    pub display_format:              DisplayFormat,
    pub month_format:                DisplayFormat,
    pub locale:                      Locale,
    pub initial_visible_month:       Option<CalendarDate>,
    pub updatemode:                  UpdateMode,
    pub clearable:                   bool,
    pub reopen_calendar_on_clear:    bool,
    pub stay_open_on_select:         bool,
    pub disabled:                    bool,
    #[serde(rename = "is_RTL")]
    pub is_rtl:                      bool,
    pub start_date_placeholder_text: Option<String>,
    pub end_date_placeholder_text:   Option<String>,
}

impl Default for RangeProps {
    fn default() -> Self {
        Self {
            start_date:                  None,
            end_date:                    None,
            min_date_allowed:            None,
            max_date_allowed:            None,
            disabled_days:               Vec::new(),
            minimum_nights:              0,
            first_day_of_week:           FirstDayOfWeek::default(),
            show_outside_days:           false,
            number_of_months_shown:      DEFAULT_RANGE_MONTHS,
            display_format:              DisplayFormat::default(),
            month_format:                DisplayFormat::new(DEFAULT_MONTH_FORMAT),
            locale:                      Locale::default(),
            initial_visible_month:       None,
            updatemode:                  UpdateMode::default(),
            clearable:                   false,
            reopen_calendar_on_clear:    false,
            stay_open_on_select:         false,
            disabled:                    false,
            is_rtl:                      false,
            start_date_placeholder_text: None,
            end_date_placeholder_text:   None,
        }
    }
}

impl RangeProps {
    /// The committed range as the host last reported it
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// Configuration of the single-date picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleProps {
    pub date:                     Option<CalendarDate>,
    pub min_date_allowed:         Option<CalendarDate>,
    pub max_date_allowed:         Option<CalendarDate>,
    pub disabled_days:            Vec<CalendarDate>,
    pub first_day_of_week:        FirstDayOfWeek,
    pub show_outside_days:        bool,
    pub number_of_months_shown:   usize,
    pub display_format:           DisplayFormat,
    pub month_format:             DisplayFormat,
    pub locale:                   Locale,
    pub initial_visible_month:    Option<CalendarDate>,
    pub clearable:                bool,
    pub reopen_calendar_on_clear: bool,
    pub stay_open_on_select:      bool,
    pub disabled:                 bool,
    #[serde(rename = "is_RTL")]
    pub is_rtl:                   bool,
    pub placeholder:              Option<String>,
}

impl Default for SingleProps {
    fn default() -> Self {
        Self {
            date:                     None,
            min_date_allowed:         None,
            max_date_allowed:         None,
            disabled_days:            Vec::new(),
            first_day_of_week:        FirstDayOfWeek::default(),
            show_outside_days:        false,
            number_of_months_shown:   DEFAULT_SINGLE_MONTHS,
            display_format:           DisplayFormat::default(),
            month_format:             DisplayFormat::new(DEFAULT_MONTH_FORMAT),
            locale:                   Locale::default(),
            initial_visible_month:    None,
            clearable:                false,
            reopen_calendar_on_clear: false,
            stay_open_on_select:      false,
            disabled:                 false,
            is_rtl:                   false,
            placeholder:              None,
        }
    }
}

/// Prop changes reported by the range picker.
///
/// An outer `None` leaves the key out of the update; `Some(None)` clears it
/// and serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RangeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<CalendarDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date:   Option<Option<CalendarDate>>,
}

impl RangeUpdate {
    pub const fn both(start: Option<CalendarDate>, end: Option<CalendarDate>) -> Self {
        Self {
            start_date: Some(start),
            end_date:   Some(end),
        }
    }

    pub const fn start(start: Option<CalendarDate>) -> Self {
        Self {
            start_date: Some(start),
            end_date:   None,
        }
    }

    pub const fn end(end: Option<CalendarDate>) -> Self {
        Self {
            start_date: None,
            end_date:   Some(end),
        }
    }

    /// No keys set
    pub const fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    /// Writes the reported keys into `props`, as the host would.
    pub fn apply_to(&self, props: &mut RangeProps) {
        if let Some(start) = self.start_date {
            props.start_date = start;
        }
        if let Some(end) = self.end_date {
            props.end_date = end;
        }
    }
}

/// Prop change reported by the single-date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateUpdate {
    pub date: Option<CalendarDate>,
}

impl DateUpdate {
    pub fn apply_to(&self, props: &mut SingleProps) {
        props.date = self.date;
    }
}

/// Receives prop updates from a controller.
///
/// Closures taking the update type implement this directly.
pub trait HostCallback<U> {
    fn set_props(&mut self, update: U);
}

impl<U, F> HostCallback<U> for F
where
    F: FnMut(U),
{
    fn set_props(&mut self, update: U) {
        self(update);
    }
}
