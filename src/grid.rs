//! Fixed-size month grids.

use crate::consts::{DAYS_PER_WEEK, GRID_ROWS};
use crate::locale::Locale;
use crate::{CalendarDate, FirstDayOfWeek, YearMonth};

/// One grid row, `DAYS_PER_WEEK` cells wide.
pub type WeekRow = [Option<CalendarDate>; DAYS_PER_WEEK];

/// A month laid out as `GRID_ROWS` x `DAYS_PER_WEEK` cells.
///
/// Cells belonging to neighbouring months are `None` unless outside days are
/// shown. Rows after the month's last week are always `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: YearMonth,
    rows:  [WeekRow; GRID_ROWS],
}

impl MonthGrid {
    pub const fn month(&self) -> YearMonth {
        self.month
    }

    pub const fn rows(&self) -> &[WeekRow; GRID_ROWS] {
        &self.rows
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Option<CalendarDate>> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// The dates actually present in the grid
    pub fn dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.cells().flatten()
    }

    /// `(row, column)` of a date in the grid
    pub fn position_of(&self, date: CalendarDate) -> Option<(usize, usize)> {
        self.cells()
            .position(|cell| cell == Some(date))
            .map(|index| (index / DAYS_PER_WEEK, index % DAYS_PER_WEEK))
    }
}

/// Lays out `month` with rows starting on `first_day_of_week`.
pub fn build_grid(
    month: YearMonth,
    first_day_of_week: FirstDayOfWeek,
    show_outside_days: bool,
) -> MonthGrid {
    let first = month.first_day();
    let lead = first_day_of_week.column_of(first.weekday()) as i64;
    let weeks = week_count(month, first_day_of_week);

    let mut rows = [[None; DAYS_PER_WEEK]; GRID_ROWS];
    for (index, cell) in rows.iter_mut().flatten().take(weeks * DAYS_PER_WEEK).enumerate() {
        *cell = first
            .add_days(index as i64 - lead)
            .filter(|day| show_outside_days || month.contains(*day));
    }
    MonthGrid { month, rows }
}

/// Number of grid rows the month's own days occupy (4 to 6).
pub fn week_count(month: YearMonth, first_day_of_week: FirstDayOfWeek) -> usize {
    let lead = first_day_of_week.column_of(month.first_day().weekday());
    (lead + month.days() as usize).div_ceil(DAYS_PER_WEEK)
}

/// Two-letter weekday headers starting at `first_day_of_week`.
pub fn weekday_labels(
    first_day_of_week: FirstDayOfWeek,
    locale: Locale,
) -> [&'static str; DAYS_PER_WEEK] {
    let offset = usize::from(first_day_of_week.get());
    let names = &locale.names().weekdays_min;
    std::array::from_fn(|column| names[(offset + column) % DAYS_PER_WEEK])
}
