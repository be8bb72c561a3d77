//! Decides which days may be selected.

use std::collections::BTreeSet;

use crate::{CalendarDate, DateRange};

/// Inclusive `[min, max]` bounds; either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
}

impl Bounds {
    /// Creates bounds, swapping `min` and `max` if they are inverted.
    pub fn new(min: Option<CalendarDate>, max: Option<CalendarDate>) -> Self {
        match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => Self {
                min: Some(hi),
                max: Some(lo),
            },
            _ => Self { min, max },
        }
    }

    pub const fn min(&self) -> Option<CalendarDate> {
        self.min
    }

    pub const fn max(&self) -> Option<CalendarDate> {
        self.max
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.min.is_none_or(|min| min <= date) && self.max.is_none_or(|max| date <= max)
    }

    /// Pulls a date inside the bounds.
    pub fn clamp(&self, date: CalendarDate) -> CalendarDate {
        match (self.min, self.max) {
            (Some(min), _) if date < min => min,
            (_, Some(max)) if date > max => max,
            _ => date,
        }
    }
}

/// Checks a date against bounds and an explicit disabled list.
///
/// The bounds are normalized first, so callers need not order `min` and `max`.
pub fn is_allowed(
    date: CalendarDate,
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
    disabled: &[CalendarDate],
) -> bool {
    Bounds::new(min, max).contains(date) && !disabled.contains(&date)
}

/// Days within `nights` of `start` on either side, excluding `start`.
///
/// Membership is computed from the distance to `start`, so the zone costs the
/// same for any number of nights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimumNightsZone {
    start:  CalendarDate,
    nights: u32,
}

impl MinimumNightsZone {
    /// `None` when `nights` is zero and the zone would be empty.
    pub const fn new(start: CalendarDate, nights: u32) -> Option<Self> {
        if nights == 0 {
            return None;
        }
        Some(Self { start, nights })
    }

    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    pub const fn nights(&self) -> u32 {
        self.nights
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        let distance = self.start.days_until(date).unsigned_abs();
        (1..=u64::from(self.nights)).contains(&distance)
    }
}

/// Days that may not be selected in the current state.
///
/// Recomputed from scratch whenever it is needed; it is never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisabledSet {
    explicit: BTreeSet<CalendarDate>,
    zone:     Option<MinimumNightsZone>,
}

impl DisabledSet {
    /// Combines the explicit list with, while only a start is selected, the
    /// minimum-nights zone around it.
    pub fn derive(explicit: &[CalendarDate], selection: &DateRange, minimum_nights: u32) -> Self {
        let zone = match selection.dates() {
            (Some(start), None) => MinimumNightsZone::new(start, minimum_nights),
            _ => None,
        };
        Self {
            explicit: explicit.iter().copied().collect(),
            zone,
        }
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.explicit.contains(&date) || self.zone.is_some_and(|zone| zone.contains(date))
    }

    pub fn is_empty(&self) -> bool {
        self.explicit.is_empty() && self.zone.is_none()
    }

    /// Days disabled by the host, in order
    pub fn explicit(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.explicit.iter().copied()
    }

    pub const fn zone(&self) -> Option<MinimumNightsZone> {
        self.zone
    }
}

/// Bounds and disabled days evaluated together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    bounds:   Bounds,
    disabled: DisabledSet,
}

impl Constraints {
    pub const fn new(bounds: Bounds, disabled: DisabledSet) -> Self {
        Self { bounds, disabled }
    }

    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub const fn disabled(&self) -> &DisabledSet {
        &self.disabled
    }

    pub fn is_allowed(&self, date: CalendarDate) -> bool {
        self.bounds.contains(date) && !self.disabled.contains(date)
    }

    /// Bounds only; keyboard focus may rest on disabled days.
    pub fn in_bounds(&self, date: CalendarDate) -> bool {
        self.bounds.contains(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let min = Some(date(2024, 6, 1));
        let max = Some(date(2024, 6, 30));
        assert!(is_allowed(date(2024, 6, 1), min, max, &[]));
        assert!(is_allowed(date(2024, 6, 30), min, max, &[]));
        assert!(!is_allowed(date(2024, 5, 31), min, max, &[]));
        assert!(!is_allowed(date(2024, 7, 1), min, max, &[]));
    }

    #[test]
    fn test_inverted_bounds_are_normalized() {
        let min = Some(date(2024, 6, 30));
        let max = Some(date(2024, 6, 1));
        assert!(is_allowed(date(2024, 6, 15), min, max, &[]));
        assert!(!is_allowed(date(2024, 7, 15), min, max, &[]));

        let bounds = Bounds::new(min, max);
        assert_eq!(bounds.min(), Some(date(2024, 6, 1)));
        assert_eq!(bounds.max(), Some(date(2024, 6, 30)));
    }

    #[test]
    fn test_open_bounds() {
        assert!(is_allowed(date(1, 1, 1), None, None, &[]));
        assert!(is_allowed(date(2030, 1, 1), Some(date(2024, 1, 1)), None, &[]));
        assert!(!is_allowed(date(2020, 1, 1), Some(date(2024, 1, 1)), None, &[]));
    }

    #[test]
    fn test_explicit_disabled_days() {
        let disabled = [date(2024, 6, 12)];
        assert!(!is_allowed(date(2024, 6, 12), None, None, &disabled));
        assert!(is_allowed(date(2024, 6, 13), None, None, &disabled));
    }

    #[test]
    fn test_clamp() {
        let bounds = Bounds::new(Some(date(2024, 6, 1)), Some(date(2024, 6, 30)));
        assert_eq!(bounds.clamp(date(2024, 5, 1)), date(2024, 6, 1));
        assert_eq!(bounds.clamp(date(2024, 8, 1)), date(2024, 6, 30));
        assert_eq!(bounds.clamp(date(2024, 6, 9)), date(2024, 6, 9));
    }

    fn disabled_in_june(set: &DisabledSet) -> Vec<CalendarDate> {
        (1..=30)
            .map(|day| date(2024, 6, day))
            .filter(|day| set.contains(*day))
            .collect()
    }

    #[test]
    fn test_minimum_nights_zone_is_symmetric() {
        let start = date(2024, 6, 10);
        let selection = DateRange::new(Some(start), None);
        let set = DisabledSet::derive(&[], &selection, 3);
        let expected = [
            date(2024, 6, 7),
            date(2024, 6, 8),
            date(2024, 6, 9),
            date(2024, 6, 11),
            date(2024, 6, 12),
            date(2024, 6, 13),
        ];
        assert_eq!(disabled_in_june(&set), expected);
        assert!(!set.contains(start));
    }

    #[test]
    fn test_minimum_nights_zone_dropped_once_end_set() {
        let selection = DateRange::from((date(2024, 6, 10), date(2024, 6, 20)));
        assert!(DisabledSet::derive(&[], &selection, 3).is_empty());
        assert!(DisabledSet::derive(&[], &DateRange::empty(), 3).is_empty());
    }

    #[test]
    fn test_minimum_nights_small_values() {
        let selection = DateRange::new(Some(date(2024, 6, 10)), None);
        assert!(DisabledSet::derive(&[], &selection, 0).is_empty());
        let set = DisabledSet::derive(&[], &selection, 1);
        assert_eq!(disabled_in_june(&set), [date(2024, 6, 9), date(2024, 6, 11)]);
    }

    #[test]
    fn test_minimum_nights_huge_value_covers_every_other_day() {
        let start = date(2024, 6, 10);
        let selection = DateRange::new(Some(start), None);
        let set = DisabledSet::derive(&[], &selection, u32::MAX);
        assert!(set.contains(date(1, 1, 1)));
        assert!(set.contains(date(9999, 12, 31)));
        assert!(set.contains(date(2024, 6, 11)));
        assert!(!set.contains(start));
        assert_eq!(set.zone().as_ref().map(MinimumNightsZone::nights), Some(u32::MAX));
    }

    #[test]
    fn test_explicit_and_derived_merge() {
        let selection = DateRange::new(Some(date(2024, 6, 10)), None);
        let set = DisabledSet::derive(&[date(2024, 7, 4), date(2024, 6, 11)], &selection, 2);
        assert_eq!(set.explicit().collect::<Vec<_>>(), [date(2024, 6, 11), date(2024, 7, 4)]);
        assert_eq!(set.zone().as_ref().map(MinimumNightsZone::start), Some(date(2024, 6, 10)));
        assert!(set.contains(date(2024, 6, 8)));
        assert!(set.contains(date(2024, 7, 4)));
        assert!(!set.contains(date(2024, 6, 13)));
    }

    #[test]
    fn test_constraints_focus_ignores_disabled() {
        let constraints = Constraints::new(
            Bounds::new(Some(date(2024, 6, 1)), None),
            DisabledSet::derive(&[date(2024, 6, 5)], &DateRange::empty(), 0),
        );
        assert!(!constraints.is_allowed(date(2024, 6, 5)));
        assert!(constraints.in_bounds(date(2024, 6, 5)));
        assert!(!constraints.in_bounds(date(2024, 5, 31)));
    }
}
