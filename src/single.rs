//! The single-date picker controller.
//!
//! Same moving parts as [`RangeCalendar`](crate::RangeCalendar) with one
//! date, one input and no update mode: every accepted change is reported.

use tracing::{debug, trace};

use crate::codec;
use crate::constraints::{Bounds, Constraints, DisabledSet};
use crate::consts::DAYS_PER_WEEK;
use crate::controller::{CommitTrigger, DeferredAction, initial_month};
use crate::deferred::{DeferredTask, TaskId};
use crate::grid::weekday_labels;
use crate::navigation::{FocusMove, GridKey, move_focus};
use crate::props::{DateUpdate, HostCallback, SingleProps};
use crate::render::{RenderContext, RenderedMonth};
use crate::window::VisibleWindow;
use crate::{CalendarDate, DateRange, YearMonth};

/// Widget state fed by the `date` prop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SingleState {
    pub date:  Option<CalendarDate>,
    pub input: String,
}

impl SingleState {
    pub fn from_props(props: &SingleProps) -> Self {
        Self {
            date:  props.date,
            input: codec::format_opt(props.date, &props.display_format, props.locale),
        }
    }
}

/// Folds a props change into the single-date state.
pub fn reconcile_single(old: &SingleProps, new: &SingleProps, mut state: SingleState) -> SingleState {
    let date_changed = old.date != new.date;
    if date_changed {
        state.date = new.date;
    }
    let format_changed = old.display_format != new.display_format || old.locale != new.locale;
    if date_changed || format_changed {
        state.input = codec::format_opt(state.date, &new.display_format, new.locale);
    }
    state
}

/// Controller of a single-date picker.
#[derive(Debug)]
pub struct SingleDatePicker<H> {
    props:      SingleProps,
    state:      SingleState,
    window:     VisibleWindow,
    focus:      Option<CalendarDate>,
    grid_focus: bool,
    open:       bool,
    deferred:   DeferredTask<DeferredAction>,
    today:      CalendarDate,
    host:       H,
}

impl<H> SingleDatePicker<H>
where
    H: HostCallback<DateUpdate>,
{
    pub fn new(props: SingleProps, host: H) -> Self {
        Self::with_today(props, host, CalendarDate::today())
    }

    pub fn with_today(props: SingleProps, host: H, today: CalendarDate) -> Self {
        let state = SingleState::from_props(&props);
        let anchor = initial_month(
            props.initial_visible_month,
            props.date,
            &Bounds::new(props.min_date_allowed, props.max_date_allowed),
            today,
        );
        let window = VisibleWindow::centered(anchor, props.number_of_months_shown);
        Self {
            props,
            state,
            window,
            focus: None,
            grid_focus: false,
            open: false,
            deferred: DeferredTask::default(),
            today,
            host,
        }
    }

    pub const fn props(&self) -> &SingleProps {
        &self.props
    }

    pub const fn date(&self) -> Option<CalendarDate> {
        self.state.date
    }

    pub fn input(&self) -> &str {
        &self.state.input
    }

    pub const fn window(&self) -> &VisibleWindow {
        &self.window
    }

    pub const fn focus(&self) -> Option<CalendarDate> {
        self.focus
    }

    /// Keyboard focus is inside the grid
    pub const fn has_grid_focus(&self) -> bool {
        self.grid_focus
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.props.min_date_allowed, self.props.max_date_allowed)
    }

    pub fn constraints(&self) -> Constraints {
        Constraints::new(
            self.bounds(),
            DisabledSet::derive(&self.props.disabled_days, &DateRange::empty(), 0),
        )
    }

    pub fn set_props(&mut self, props: SingleProps) {
        let old = std::mem::replace(&mut self.props, props);
        self.state = reconcile_single(&old, &self.props, std::mem::take(&mut self.state));
        let explicit_changed = old.initial_visible_month != self.props.initial_visible_month;
        if explicit_changed || old.number_of_months_shown != self.props.number_of_months_shown {
            let anchor = if explicit_changed {
                self.props.initial_visible_month.map(YearMonth::from)
            } else {
                self.focus.or(self.state.date).map(YearMonth::from).or_else(|| self.window.first())
            };
            let anchor = anchor
                .unwrap_or_else(|| initial_month(None, self.state.date, &self.bounds(), self.today));
            self.window = VisibleWindow::centered(anchor, self.props.number_of_months_shown);
        }
        if self.props.disabled {
            self.close();
        }
    }

    pub fn set_input_text(&mut self, text: &str) {
        if !self.props.disabled {
            text.clone_into(&mut self.state.input);
        }
    }

    /// Commits the input text; see
    /// [`RangeCalendar::commit_input`](crate::RangeCalendar::commit_input).
    pub fn commit_input(&mut self, trigger: CommitTrigger) -> bool {
        if self.props.disabled {
            return false;
        }
        let text = self.state.input.trim().to_owned();
        if text.is_empty() {
            if self.state.date.is_none() {
                self.state.input.clear();
                return false;
            }
            self.set_date(None);
            return true;
        }
        let accepted = codec::parse(&text, &self.props.display_format, self.props.locale)
            .map_err(|err| debug!("reverting input {text:?} on {trigger:?}: {err}"))
            .ok()
            .filter(|date| self.constraints().is_allowed(*date));
        match accepted {
            Some(date) if Some(date) != self.state.date => {
                self.set_date(Some(date));
                self.reveal(date);
                true
            }
            _ => {
                self.sync_input();
                false
            }
        }
    }

    /// Selects a clicked day.
    pub fn click(&mut self, date: CalendarDate) -> bool {
        if self.props.disabled {
            return false;
        }
        self.pick(date)
    }

    fn pick(&mut self, date: CalendarDate) -> bool {
        if !self.constraints().is_allowed(date) {
            debug!("ignoring selection of {date}: date not allowed");
            return false;
        }
        self.focus = Some(date);
        self.set_date(Some(date));
        if !self.props.stay_open_on_select {
            self.close();
        }
        true
    }

    pub fn key_down(&mut self, key: GridKey, shift: bool) -> bool {
        if self.props.disabled {
            return false;
        }
        if key == GridKey::Escape {
            let was_open = self.open;
            self.close();
            return was_open;
        }
        let Some(focus) = self.focus else {
            return false;
        };
        if key.is_commit() {
            return self.pick(focus);
        }
        let Some(motion) = FocusMove::for_key(key, shift, self.props.is_rtl) else {
            return false;
        };
        let Some(target) = move_focus(focus, motion, self.props.first_day_of_week, &self.bounds())
        else {
            return false;
        };
        self.reveal(target);
        true
    }

    fn set_date(&mut self, date: Option<CalendarDate>) {
        self.state.date = date;
        self.sync_input();
        if self.props.date != date {
            let update = DateUpdate { date };
            debug!("reporting {update:?}");
            update.apply_to(&mut self.props);
            self.host.set_props(update);
        }
    }

    fn sync_input(&mut self) {
        let props = &self.props;
        self.state.input = codec::format_opt(self.state.date, &props.display_format, props.locale);
    }

    pub fn clear(&mut self) -> bool {
        if self.props.disabled || !self.props.clearable {
            return false;
        }
        self.set_date(None);
        if self.props.reopen_calendar_on_clear {
            self.open();
        } else {
            self.close();
        }
        true
    }

    pub fn open(&mut self) -> Option<TaskId> {
        if self.props.disabled {
            return None;
        }
        self.open = true;
        let target = self
            .state
            .date
            .filter(|date| self.window.contains_date(*date))
            .unwrap_or_else(|| {
                let first = self.window.first().map_or(self.today, YearMonth::first_day);
                self.bounds().clamp(first)
            });
        self.focus = Some(target);
        Some(self.deferred.schedule(DeferredAction::FocusGrid(target)))
    }

    pub fn close(&mut self) {
        if self.open {
            trace!("closing calendar");
        }
        self.open = false;
        self.grid_focus = false;
        self.deferred.cancel();
    }

    pub fn run_deferred(&mut self, id: TaskId) -> bool {
        match self.deferred.take(id) {
            Some(DeferredAction::FocusGrid(date)) if self.open => {
                self.focus = Some(date);
                self.grid_focus = true;
                true
            }
            _ => false,
        }
    }

    pub fn focus_date(&mut self, date: CalendarDate) {
        self.reveal(date);
    }

    fn reveal(&mut self, date: CalendarDate) {
        self.window.set_visible(date.year_month());
        self.focus = Some(date);
    }

    pub fn set_visible_date(&mut self, date: CalendarDate) -> bool {
        self.window.set_visible(date.year_month())
    }

    pub fn show_previous_month(&mut self) -> bool {
        self.window.shift(-1)
    }

    pub fn show_next_month(&mut self) -> bool {
        self.window.shift(1)
    }

    pub fn months(&self) -> Vec<RenderedMonth> {
        let constraints = self.constraints();
        RenderContext {
            first_day_of_week: self.props.first_day_of_week,
            show_outside_days: self.props.show_outside_days,
            month_format:      &self.props.month_format,
            locale:            self.props.locale,
            constraints:       &constraints,
            selection:         self.state.date.map_or_else(DateRange::empty, DateRange::single),
            focus:             self.focus,
        }
        .render(&self.window)
    }

    pub fn weekday_labels(&self) -> [&'static str; DAYS_PER_WEEK] {
        weekday_labels(self.props.first_day_of_week, self.props.locale)
    }
}
