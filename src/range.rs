use std::fmt;

use crate::CalendarDate;

/// Placeholder for a missing endpoint in the interval notation
const OPEN_ENDPOINT: &str = "..";

/// A possibly partial date range (inclusive).
///
/// When both endpoints are present `start <= end` always holds: constructors
/// swap inverted endpoints instead of rejecting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateRange {
    start: Option<CalendarDate>,
    end:   Option<CalendarDate>,
}

impl DateRange {
    /// Creates a range, swapping the endpoints if they are inverted.
    pub fn new(start: Option<CalendarDate>, end: Option<CalendarDate>) -> Self {
        match (start, end) {
            (Some(s), Some(e)) if s > e => Self {
                start: Some(e),
                end:   Some(s),
            },
            _ => Self { start, end },
        }
    }

    pub const fn empty() -> Self {
        Self {
            start: None,
            end:   None,
        }
    }

    /// A range covering exactly one day
    pub const fn single(date: CalendarDate) -> Self {
        Self {
            start: Some(date),
            end:   Some(date),
        }
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> Option<CalendarDate> {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> Option<CalendarDate> {
        self.end
    }

    /// Returns both endpoints as a tuple
    pub const fn dates(&self) -> (Option<CalendarDate>, Option<CalendarDate>) {
        (self.start, self.end)
    }

    pub const fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub const fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Replaces the start, re-normalizing the order.
    pub fn with_start(self, start: Option<CalendarDate>) -> Self {
        Self::new(start, self.end)
    }

    /// Replaces the end, re-normalizing the order.
    pub fn with_end(self, end: Option<CalendarDate>) -> Self {
        Self::new(self.start, end)
    }

    /// Checks if a complete range contains a given date
    pub fn contains(&self, date: CalendarDate) -> bool {
        match (self.start, self.end) {
            (Some(s), Some(e)) => s <= date && date <= e,
            _ => false,
        }
    }

    /// True for a date strictly between the endpoints
    pub fn spans(&self, date: CalendarDate) -> bool {
        self.contains(date) && self.start != Some(date) && self.end != Some(date)
    }

    /// Number of nights between the endpoints of a complete range
    pub fn nights(&self) -> Option<i64> {
        Some(self.start?.days_until(self.end?))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(s), Some(e)) => write!(f, "{s}/{e}"),
            (Some(s), None) => write!(f, "{s}/{OPEN_ENDPOINT}"),
            (None, Some(e)) => write!(f, "{OPEN_ENDPOINT}/{e}"),
            (None, None) => write!(f, "{OPEN_ENDPOINT}/{OPEN_ENDPOINT}"),
        }
    }
}

impl From<(CalendarDate, CalendarDate)> for DateRange {
    fn from((start, end): (CalendarDate, CalendarDate)) -> Self {
        Self::new(Some(start), Some(end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_new_range_cases() {
        struct TestCase {
            start:       Option<CalendarDate>,
            end:         Option<CalendarDate>,
            expected:    (Option<CalendarDate>, Option<CalendarDate>),
            description: &'static str,
        }

        let a = date(2024, 6, 5);
        let b = date(2024, 6, 10);
        let cases = [
            TestCase {
                start:       Some(a),
                end:         Some(b),
                expected:    (Some(a), Some(b)),
                description: "ordered endpoints kept",
            },
            TestCase {
                start:       Some(b),
                end:         Some(a),
                expected:    (Some(a), Some(b)),
                description: "inverted endpoints swapped",
            },
            TestCase {
                start:       Some(a),
                end:         Some(a),
                expected:    (Some(a), Some(a)),
                description: "equal endpoints",
            },
            TestCase {
                start:       Some(b),
                end:         None,
                expected:    (Some(b), None),
                description: "open end untouched",
            },
            TestCase {
                start:       None,
                end:         Some(a),
                expected:    (None, Some(a)),
                description: "open start untouched",
            },
        ];

        for case in &cases {
            let range = DateRange::new(case.start, case.end);
            assert_eq!(range.dates(), case.expected, "{}", case.description);
        }
    }

    #[test]
    fn test_with_start_renormalizes() {
        let range = DateRange::from((date(2024, 6, 5), date(2024, 6, 10)));
        let moved = range.with_start(Some(date(2024, 6, 20)));
        assert_eq!(moved.dates(), (Some(date(2024, 6, 10)), Some(date(2024, 6, 20))));

        let moved = range.with_end(Some(date(2024, 6, 1)));
        assert_eq!(moved.dates(), (Some(date(2024, 6, 1)), Some(date(2024, 6, 5))));
    }

    #[test]
    fn test_contains_and_spans() {
        let range = DateRange::from((date(2024, 6, 5), date(2024, 6, 10)));
        assert!(range.contains(date(2024, 6, 5)));
        assert!(range.contains(date(2024, 6, 10)));
        assert!(range.contains(date(2024, 6, 7)));
        assert!(!range.contains(date(2024, 6, 11)));
        assert!(range.spans(date(2024, 6, 7)));
        assert!(!range.spans(date(2024, 6, 5)));

        let partial = DateRange::new(Some(date(2024, 6, 5)), None);
        assert!(!partial.contains(date(2024, 6, 5)));
    }

    #[test]
    fn test_state_predicates() {
        assert!(DateRange::empty().is_empty());
        assert!(DateRange::single(date(2024, 6, 5)).is_complete());
        assert!(!DateRange::new(Some(date(2024, 6, 5)), None).is_complete());
    }

    #[test]
    fn test_nights() {
        let range = DateRange::from((date(2024, 6, 5), date(2024, 6, 10)));
        assert_eq!(range.nights(), Some(5));
        assert_eq!(DateRange::empty().nights(), None);
    }

    #[test]
    fn test_display() {
        let range = DateRange::from((date(2024, 6, 5), date(2024, 6, 10)));
        assert_eq!(range.to_string(), "2024-06-05/2024-06-10");
        assert_eq!(
            DateRange::new(Some(date(2024, 6, 5)), None).to_string(),
            "2024-06-05/.."
        );
        assert_eq!(DateRange::empty().to_string(), "../..");
    }
}
