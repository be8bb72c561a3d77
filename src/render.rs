//! Presentation model of the visible months.

use crate::codec::{self, DisplayFormat};
use crate::consts::{DAYS_PER_WEEK, GRID_ROWS};
use crate::constraints::Constraints;
use crate::grid::build_grid;
use crate::locale::Locale;
use crate::window::VisibleWindow;
use crate::{CalendarDate, DateRange, FirstDayOfWeek, YearMonth};

/// One day cell with everything a view needs to style it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date:           CalendarDate,
    /// Belongs to a neighbouring month
    pub outside:        bool,
    pub disabled:       bool,
    pub selected_start: bool,
    pub selected_end:   bool,
    /// Strictly between the two endpoints
    pub in_range:       bool,
    pub focused:        bool,
}

impl DayCell {
    pub const fn is_selected(&self) -> bool {
        self.selected_start || self.selected_end
    }
}

/// A visible month ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMonth {
    pub month:   YearMonth,
    pub caption: String,
    pub rows:    [[Option<DayCell>; DAYS_PER_WEEK]; GRID_ROWS],
}

impl RenderedMonth {
    /// Present cells in row-major order
    pub fn days(&self) -> impl Iterator<Item = &DayCell> + '_ {
        self.rows.iter().flatten().flatten()
    }

    pub fn cell(&self, date: CalendarDate) -> Option<&DayCell> {
        self.days().find(|cell| cell.date == date)
    }
}

/// Everything that styles the cells of a window.
pub(crate) struct RenderContext<'a> {
    pub first_day_of_week: FirstDayOfWeek,
    pub show_outside_days: bool,
    pub month_format:      &'a DisplayFormat,
    pub locale:            Locale,
    pub constraints:       &'a Constraints,
    pub selection:         DateRange,
    pub focus:             Option<CalendarDate>,
}

impl RenderContext<'_> {
    pub fn render(&self, window: &VisibleWindow) -> Vec<RenderedMonth> {
        window.iter().map(|month| self.render_month(month)).collect()
    }

    fn render_month(&self, month: YearMonth) -> RenderedMonth {
        let grid = build_grid(month, self.first_day_of_week, self.show_outside_days);
        let rows = grid
            .rows()
            .map(|row| row.map(|cell| cell.map(|date| self.day_cell(month, date))));
        RenderedMonth {
            month,
            caption: codec::format_month(month, self.month_format, self.locale),
            rows,
        }
    }

    fn day_cell(&self, month: YearMonth, date: CalendarDate) -> DayCell {
        let (start, end) = self.selection.dates();
        DayCell {
            date,
            outside: !month.contains(date),
            disabled: !self.constraints.is_allowed(date),
            selected_start: start == Some(date),
            selected_end: end == Some(date),
            in_range: self.selection.spans(date),
            focused: self.focus == Some(date),
        }
    }
}
