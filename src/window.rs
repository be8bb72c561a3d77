//! The block of consecutive months currently rendered.

use std::iter;

use tracing::trace;

use crate::consts::{DECEMBER, MAX_YEAR};
use crate::{CalendarDate, YearMonth};

/// `N` consecutive months, oldest first.
///
/// The window only ever moves as a whole block; it is never reordered and
/// never changes length after construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibleWindow {
    months: Vec<YearMonth>,
}

impl VisibleWindow {
    /// Builds the initial window around `initial`.
    ///
    /// One month shows exactly `initial`; an even count starts at `initial`;
    /// an odd count puts `count / 2` months on each side of it. Near the last
    /// supported month the window starts early enough to keep all `count`
    /// months. A count of zero yields an empty window on which every
    /// operation is a no-op.
    pub fn centered(initial: YearMonth, count: usize) -> Self {
        let before = if count % 2 == 1 { count / 2 } else { 0 };
        let first = i32::try_from(before)
            .ok()
            .and_then(|before| initial.add_months(-before))
            .unwrap_or(initial);
        let first = latest_first(count).map_or(first, |latest| first.min(latest));
        Self {
            months: consecutive(first, count).collect(),
        }
    }

    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn first(&self) -> Option<YearMonth> {
        self.months.first().copied()
    }

    pub fn last(&self) -> Option<YearMonth> {
        self.months.last().copied()
    }

    pub fn contains(&self, month: YearMonth) -> bool {
        self.months.contains(&month)
    }

    pub fn contains_date(&self, date: CalendarDate) -> bool {
        self.contains(date.year_month())
    }

    pub fn iter(&self) -> impl Iterator<Item = YearMonth> + '_ {
        self.months.iter().copied()
    }

    /// Makes `target` visible, moving the window as little as possible.
    ///
    /// A month already inside the window leaves it untouched. A later month
    /// becomes the last element, an earlier one the first. Returns whether
    /// the window moved.
    pub fn set_visible(&mut self, target: YearMonth) -> bool {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return false;
        };
        if first <= target && target <= last {
            return false;
        }
        let new_first = if target > last {
            i32::try_from(self.len() - 1)
                .ok()
                .and_then(|span| target.add_months(-span))
        } else {
            Some(target)
        };
        new_first.is_some_and(|new_first| self.move_to(new_first))
    }

    /// Moves the whole window by `delta` months (prev/next navigation).
    pub fn shift(&mut self, delta: i32) -> bool {
        self.first()
            .and_then(|first| first.add_months(delta))
            .is_some_and(|new_first| self.move_to(new_first))
    }

    fn move_to(&mut self, first: YearMonth) -> bool {
        let months: Vec<_> = consecutive(first, self.len()).collect();
        // Refuse moves that would run past the last supported month.
        if months.len() != self.len() || months == self.months {
            return false;
        }
        trace!(
            "visible window moved from {:?} to {first}",
            self.first().map(|m| m.to_string())
        );
        self.months = months;
        true
    }
}

/// Latest month a window of `count` months can start on.
fn latest_first(count: usize) -> Option<YearMonth> {
    let span = i32::try_from(count.checked_sub(1)?).ok()?;
    YearMonth::new(MAX_YEAR, DECEMBER).ok()?.add_months(-span)
}

fn consecutive(first: YearMonth, count: usize) -> impl Iterator<Item = YearMonth> {
    iter::successors(Some(first), |month| month.add_months(1)).take(count)
}
