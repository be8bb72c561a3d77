//! The two-endpoint selection state machine.

use tracing::debug;

use crate::constraints::Constraints;
use crate::{CalendarDate, DateRange};

/// Where the selection currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing selected
    Empty,
    /// One endpoint chosen, waiting for the other
    StartOnly(CalendarDate),
    /// Both endpoints chosen, `start <= end`
    Complete(CalendarDate, CalendarDate),
}

impl SelectionState {
    /// Classifies a range. A lone end date behaves like a lone start.
    pub fn of(range: &DateRange) -> Self {
        match range.dates() {
            (Some(start), Some(end)) => Self::Complete(start, end),
            (Some(only), None) | (None, Some(only)) => Self::StartOnly(only),
            (None, None) => Self::Empty,
        }
    }
}

/// Input that may move the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Pointer pressed on `anchor` and released on `release`; a plain click
    /// has both on the same day.
    Endpoint {
        anchor:  CalendarDate,
        release: CalendarDate,
    },
    /// Enter or Space on the focused day.
    KeyboardCommit(CalendarDate),
}

/// Result of an accepted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub range: DateRange,
    /// The calendar should close; the machine only signals it.
    pub close: bool,
}

/// Owns the selected range and enforces `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    range: DateRange,
}

impl Selection {
    pub const fn new(range: DateRange) -> Self {
        Self { range }
    }

    pub const fn range(&self) -> DateRange {
        self.range
    }

    pub fn state(&self) -> SelectionState {
        SelectionState::of(&self.range)
    }

    /// Applies a pointer or keyboard event.
    ///
    /// Returns `None`, leaving the selection untouched, when a date involved
    /// is not allowed by `constraints`.
    pub fn apply(
        &mut self,
        event: SelectionEvent,
        constraints: &Constraints,
        stay_open_on_select: bool,
    ) -> Option<Transition> {
        let next = match event {
            SelectionEvent::Endpoint { anchor, release } => {
                if !constraints.is_allowed(anchor) || !constraints.is_allowed(release) {
                    debug!("ignoring selection {anchor}..{release}: date not allowed");
                    return None;
                }
                match self.state() {
                    SelectionState::Empty | SelectionState::Complete(..) if anchor == release => {
                        DateRange::new(Some(anchor), None)
                    }
                    SelectionState::StartOnly(start) if anchor == release => {
                        DateRange::from((start, release))
                    }
                    _ => DateRange::from((anchor, release)),
                }
            }
            SelectionEvent::KeyboardCommit(date) => {
                if !constraints.is_allowed(date) {
                    debug!("ignoring keyboard commit of {date}: date not allowed");
                    return None;
                }
                match self.state() {
                    SelectionState::StartOnly(start) => DateRange::from((start, date)),
                    SelectionState::Empty | SelectionState::Complete(..) => {
                        DateRange::single(date)
                    }
                }
            }
        };
        self.range = next;
        Some(Transition {
            range: next,
            close: next.end().is_some() && !stay_open_on_select,
        })
    }

    /// Replaces the start (text entry), swapping if the range inverts.
    pub fn set_start(&mut self, start: Option<CalendarDate>) {
        self.range = self.range.with_start(start);
    }

    /// Replaces the end (text entry), swapping if the range inverts.
    pub fn set_end(&mut self, end: Option<CalendarDate>) {
        self.range = self.range.with_end(end);
    }

    pub fn clear(&mut self) {
        self.range = DateRange::empty();
    }

    /// Overwrites the selection with externally supplied values.
    pub fn replace(&mut self, range: DateRange) {
        self.range = range;
    }
}
