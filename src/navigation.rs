//! Keyboard movement of the focus cursor across the grid.

use tracing::trace;

use crate::consts::DAYS_PER_WEEK;
use crate::constraints::Bounds;
use crate::{CalendarDate, FirstDayOfWeek};

/// Keys the calendar grid reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Space,
    Escape,
}

impl GridKey {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Option<Self> {
        Some(match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Home" => Self::Home,
            "End" => Self::End,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            _ => return None,
        })
    }

    /// Enter and Space select the focused day.
    pub const fn is_commit(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// A focus cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    Days(i64),
    Months(i32),
    WeekStart,
    WeekEnd,
}

impl FocusMove {
    /// The movement a key produces, if any.
    ///
    /// Shift turns month paging into year paging; right-to-left layouts
    /// mirror the horizontal arrows.
    pub const fn for_key(key: GridKey, shift: bool, is_rtl: bool) -> Option<Self> {
        let step = if is_rtl { -1 } else { 1 };
        let page = if shift { 12 } else { 1 };
        Some(match key {
            GridKey::ArrowLeft => Self::Days(-step),
            GridKey::ArrowRight => Self::Days(step),
            GridKey::ArrowUp => Self::Days(-(DAYS_PER_WEEK as i64)),
            GridKey::ArrowDown => Self::Days(DAYS_PER_WEEK as i64),
            GridKey::PageUp => Self::Months(-page),
            GridKey::PageDown => Self::Months(page),
            GridKey::Home => Self::WeekStart,
            GridKey::End => Self::WeekEnd,
            GridKey::Enter | GridKey::Space | GridKey::Escape => return None,
        })
    }
}

/// Applies a movement to `focus`.
///
/// Returns `None` when the target leaves `bounds` or the supported years;
/// the cursor then stays where it is.
pub fn move_focus(
    focus: CalendarDate,
    motion: FocusMove,
    first_day_of_week: FirstDayOfWeek,
    bounds: &Bounds,
) -> Option<CalendarDate> {
    let column = first_day_of_week.column_of(focus.weekday()) as i64;
    let target = match motion {
        FocusMove::Days(delta) => focus.add_days(delta),
        FocusMove::Months(delta) => focus.add_months(delta),
        FocusMove::WeekStart => focus.add_days(-column),
        FocusMove::WeekEnd => focus.add_days(DAYS_PER_WEEK as i64 - 1 - column),
    }?;
    if !bounds.contains(target) {
        trace!("focus move {motion:?} from {focus} refused: {target} out of bounds");
        return None;
    }
    Some(target)
}
