//! The range picker controller.
//!
//! Owns the selection, the two text inputs, the visible window and the
//! keyboard focus cursor, and reports committed changes to the host through a
//! [`HostCallback`]. Every entry point returns a plain value: rejected input
//! is logged and reverted, never surfaced as an error.

use tracing::{debug, trace};

use crate::codec;
use crate::constraints::{Bounds, Constraints, DisabledSet};
use crate::consts::DAYS_PER_WEEK;
use crate::deferred::{DeferredTask, TaskId};
use crate::grid::weekday_labels;
use crate::navigation::{FocusMove, GridKey, move_focus};
use crate::props::{HostCallback, RangeProps, RangeUpdate, UpdateMode};
use crate::render::{RenderContext, RenderedMonth};
use crate::selection::{Selection, SelectionEvent, SelectionState};
use crate::window::VisibleWindow;
use crate::{CalendarDate, DateRange, YearMonth};

/// One of the two text inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    End,
}

/// What ended a text edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitTrigger {
    Blur,
    Tab,
    Enter,
}

/// Where keyboard focus sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    StartInput,
    EndInput,
    Grid,
}

impl From<Endpoint> for FocusTarget {
    fn from(endpoint: Endpoint) -> Self {
        match endpoint {
            Endpoint::Start => Self::StartInput,
            Endpoint::End => Self::EndInput,
        }
    }
}

/// Work that waits for the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Move keyboard focus into the grid, onto this day
    FocusGrid(CalendarDate),
}

/// The part of the widget state that props feed into.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeState {
    pub selection:   Selection,
    pub start_input: String,
    pub end_input:   String,
}

impl RangeState {
    /// Fresh state mirroring the props.
    pub fn from_props(props: &RangeProps) -> Self {
        let mut state = Self {
            selection: Selection::new(props.range()),
            ..Self::default()
        };
        state.sync_inputs(props);
        state
    }

    pub fn input(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Start => &self.start_input,
            Endpoint::End => &self.end_input,
        }
    }

    fn input_mut(&mut self, endpoint: Endpoint) -> &mut String {
        match endpoint {
            Endpoint::Start => &mut self.start_input,
            Endpoint::End => &mut self.end_input,
        }
    }

    fn endpoint(&self, endpoint: Endpoint) -> Option<CalendarDate> {
        let range = self.selection.range();
        match endpoint {
            Endpoint::Start => range.start(),
            Endpoint::End => range.end(),
        }
    }

    /// Rewrites one input from the selection.
    fn sync_input(&mut self, endpoint: Endpoint, props: &RangeProps) {
        let date = self.endpoint(endpoint);
        *self.input_mut(endpoint) = codec::format_opt(date, &props.display_format, props.locale);
    }

    fn sync_inputs(&mut self, props: &RangeProps) {
        self.sync_input(Endpoint::Start, props);
        self.sync_input(Endpoint::End, props);
    }
}

/// Folds a props change into the widget state.
///
/// A changed `start_date` or `end_date` overrides whatever the user had
/// selected and resets the matching input text. A changed `display_format`
/// or `locale` reformats both inputs.
pub fn reconcile(old: &RangeProps, new: &RangeProps, mut state: RangeState) -> RangeState {
    let before = state.selection.range();
    let start_changed = old.start_date != new.start_date;
    let end_changed = old.end_date != new.end_date;
    match (start_changed, end_changed) {
        (true, true) => state.selection.replace(new.range()),
        (true, false) => state.selection.set_start(new.start_date),
        (false, true) => state.selection.set_end(new.end_date),
        (false, false) => {}
    }
    let after = state.selection.range();
    let format_changed = old.display_format != new.display_format || old.locale != new.locale;

    if format_changed || start_changed || before.start() != after.start() {
        state.sync_input(Endpoint::Start, new);
    }
    if format_changed || end_changed || before.end() != after.end() {
        state.sync_input(Endpoint::End, new);
    }
    state
}

/// The month the window opens on when nothing else is configured.
pub(crate) fn initial_month(
    explicit: Option<CalendarDate>,
    selected: Option<CalendarDate>,
    bounds: &Bounds,
    today: CalendarDate,
) -> YearMonth {
    explicit
        .or(selected)
        .unwrap_or_else(|| bounds.clamp(today))
        .year_month()
}

/// Controller of a start/end date range picker.
#[derive(Debug)]
pub struct RangeCalendar<H> {
    props:        RangeProps,
    state:        RangeState,
    window:       VisibleWindow,
    focus:        Option<CalendarDate>,
    focus_target: Option<FocusTarget>,
    anchor:       Option<CalendarDate>,
    open:         bool,
    deferred:     DeferredTask<DeferredAction>,
    today:        CalendarDate,
    host:         H,
}

impl<H> RangeCalendar<H>
where
    H: HostCallback<RangeUpdate>,
{
    pub fn new(props: RangeProps, host: H) -> Self {
        Self::with_today(props, host, CalendarDate::today())
    }

    /// Builds a controller with a fixed notion of "today", which only
    /// matters when props name no date to open the window on.
    pub fn with_today(props: RangeProps, host: H, today: CalendarDate) -> Self {
        let state = RangeState::from_props(&props);
        let anchor = initial_month(
            props.initial_visible_month,
            props.start_date.or(props.end_date),
            &Bounds::new(props.min_date_allowed, props.max_date_allowed),
            today,
        );
        let window = VisibleWindow::centered(anchor, props.number_of_months_shown);
        Self {
            props,
            state,
            window,
            focus: None,
            focus_target: None,
            anchor: None,
            open: false,
            deferred: DeferredTask::default(),
            today,
            host,
        }
    }

    pub const fn props(&self) -> &RangeProps {
        &self.props
    }

    pub const fn state(&self) -> &RangeState {
        &self.state
    }

    /// The range as currently selected, which may run ahead of the host.
    pub const fn range(&self) -> DateRange {
        self.state.selection.range()
    }

    pub fn selection_state(&self) -> SelectionState {
        self.state.selection.state()
    }

    pub fn input(&self, endpoint: Endpoint) -> &str {
        self.state.input(endpoint)
    }

    pub fn placeholder(&self, endpoint: Endpoint) -> Option<&str> {
        match endpoint {
            Endpoint::Start => self.props.start_date_placeholder_text.as_deref(),
            Endpoint::End => self.props.end_date_placeholder_text.as_deref(),
        }
    }

    pub const fn window(&self) -> &VisibleWindow {
        &self.window
    }

    pub const fn focus(&self) -> Option<CalendarDate> {
        self.focus
    }

    pub const fn focus_target(&self) -> Option<FocusTarget> {
        self.focus_target
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub fn pending_task(&self) -> Option<TaskId> {
        self.deferred.pending_id()
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.props.min_date_allowed, self.props.max_date_allowed)
    }

    /// Constraints for the current selection, minimum-nights zone included.
    pub fn constraints(&self) -> Constraints {
        self.constraints_for(&self.state.selection.range())
    }

    fn constraints_for(&self, selection: &DateRange) -> Constraints {
        Constraints::new(
            self.bounds(),
            DisabledSet::derive(&self.props.disabled_days, selection, self.props.minimum_nights),
        )
    }

    /// Replaces the props with a new set from the host.
    pub fn set_props(&mut self, props: RangeProps) {
        let old = std::mem::replace(&mut self.props, props);
        self.state = reconcile(&old, &self.props, std::mem::take(&mut self.state));

        let explicit_changed = old.initial_visible_month != self.props.initial_visible_month;
        if explicit_changed || old.number_of_months_shown != self.props.number_of_months_shown {
            let range = self.range();
            let anchor = if explicit_changed {
                self.props.initial_visible_month.map(YearMonth::from)
            } else {
                self.focus
                    .or(range.start())
                    .map(YearMonth::from)
                    .or_else(|| self.window.first())
            };
            let anchor = anchor.unwrap_or_else(|| {
                initial_month(None, range.start(), &self.bounds(), self.today)
            });
            trace!("rebuilding window around {anchor}");
            self.window = VisibleWindow::centered(anchor, self.props.number_of_months_shown);
        }
        if self.props.disabled {
            self.close();
        }
    }

    /// Replaces the text of an input while the user types.
    pub fn set_input_text(&mut self, endpoint: Endpoint, text: &str) {
        if self.props.disabled {
            return;
        }
        text.clone_into(self.state.input_mut(endpoint));
        self.focus_target = Some(endpoint.into());
    }

    /// Commits an input's text on blur, Tab or Enter.
    ///
    /// A parsable, allowed date replaces that endpoint (swapping the
    /// endpoints if the edit inverts the range) and is reported to the host.
    /// Anything else restores the last good value. An empty input clears the
    /// endpoint. Returns whether the selection changed.
    pub fn commit_input(&mut self, endpoint: Endpoint, trigger: CommitTrigger) -> bool {
        if self.props.disabled {
            return false;
        }
        self.focus_target = match trigger {
            CommitTrigger::Blur => None,
            CommitTrigger::Tab => match endpoint {
                Endpoint::Start => Some(FocusTarget::EndInput),
                Endpoint::End => None,
            },
            CommitTrigger::Enter => Some(endpoint.into()),
        };

        let text = self.state.input(endpoint).trim().to_owned();
        let current = self.state.endpoint(endpoint);
        if text.is_empty() {
            if current.is_none() {
                self.state.sync_input(endpoint, &self.props);
                return false;
            }
            debug!("clearing {endpoint:?} from empty input");
            self.set_endpoint(endpoint, None);
            self.emit();
            return true;
        }

        let date = match codec::parse(&text, &self.props.display_format, self.props.locale) {
            Ok(date) => date,
            Err(err) => {
                debug!("reverting {endpoint:?} input {text:?} on {trigger:?}: {err}");
                self.state.sync_input(endpoint, &self.props);
                return false;
            }
        };
        let range = self.range();
        let other_only = match endpoint {
            Endpoint::Start => DateRange::new(None, range.end()),
            Endpoint::End => DateRange::new(range.start(), None),
        };
        if !self.constraints_for(&other_only).is_allowed(date) {
            debug!("reverting {endpoint:?} input {text:?}: {date} is not allowed");
            self.state.sync_input(endpoint, &self.props);
            return false;
        }
        if current == Some(date) {
            self.state.sync_input(endpoint, &self.props);
            return false;
        }

        self.set_endpoint(endpoint, Some(date));
        self.reveal(date);
        self.emit();
        true
    }

    fn set_endpoint(&mut self, endpoint: Endpoint, date: Option<CalendarDate>) {
        match endpoint {
            Endpoint::Start => self.state.selection.set_start(date),
            Endpoint::End => self.state.selection.set_end(date),
        }
        self.state.sync_inputs(&self.props);
    }

    /// Pointer pressed on a day cell.
    pub fn pointer_down(&mut self, date: CalendarDate) {
        if self.props.disabled {
            return;
        }
        self.anchor = Some(date);
    }

    /// Pointer released on a day cell; completes a click or a drag.
    pub fn pointer_up(&mut self, date: CalendarDate) -> bool {
        if self.props.disabled {
            return false;
        }
        let anchor = self.anchor.take().unwrap_or(date);
        self.select(
            SelectionEvent::Endpoint {
                anchor,
                release: date,
            },
            date,
        )
    }

    /// A press and release on the same day.
    pub fn click(&mut self, date: CalendarDate) -> bool {
        self.pointer_down(date);
        self.pointer_up(date)
    }

    fn select(&mut self, event: SelectionEvent, date: CalendarDate) -> bool {
        let constraints = self.constraints();
        let Some(transition) =
            self.state
                .selection
                .apply(event, &constraints, self.props.stay_open_on_select)
        else {
            return false;
        };
        self.state.sync_inputs(&self.props);
        self.focus = Some(date);
        self.emit();
        if transition.close {
            self.close();
        }
        true
    }

    /// Handles a key pressed while the grid has focus. Returns whether the
    /// key was consumed.
    pub fn key_down(&mut self, key: GridKey, shift: bool) -> bool {
        if self.props.disabled {
            return false;
        }
        if key == GridKey::Escape {
            if !self.open {
                return false;
            }
            self.close();
            self.focus_target = Some(FocusTarget::StartInput);
            return true;
        }
        let Some(focus) = self.focus else {
            return false;
        };
        if key.is_commit() {
            return self.select(SelectionEvent::KeyboardCommit(focus), focus);
        }
        let Some(motion) = FocusMove::for_key(key, shift, self.props.is_rtl) else {
            return false;
        };
        match move_focus(focus, motion, self.props.first_day_of_week, &self.bounds()) {
            Some(target) => {
                self.reveal(target);
                true
            }
            None => false,
        }
    }

    /// Reports the selection to the host if it differs from the last
    /// committed values and the update mode allows it.
    fn emit(&mut self) {
        let range = self.range();
        let (start, end) = range.dates();
        let start_changed = start != self.props.start_date;
        let end_changed = end != self.props.end_date;
        if !start_changed && !end_changed {
            return;
        }
        let update = match (self.props.updatemode, start, end) {
            (_, None, None) => RangeUpdate::both(None, None),
            (UpdateMode::BothDates, Some(_), Some(_)) => RangeUpdate::both(start, end),
            (UpdateMode::SingleDate, Some(_), None) if start_changed => RangeUpdate::start(start),
            (UpdateMode::SingleDate, None, Some(_)) if end_changed => RangeUpdate::end(end),
            (UpdateMode::SingleDate, ..) => RangeUpdate {
                start_date: start_changed.then_some(start),
                end_date:   end_changed.then_some(end),
            },
            (UpdateMode::BothDates, ..) => {
                trace!("holding back partial range {range}");
                return;
            }
        };
        debug!("reporting {update:?}");
        update.apply_to(&mut self.props);
        self.host.set_props(update);
    }

    /// Clears both endpoints. Only available when the widget is clearable.
    pub fn clear(&mut self) -> bool {
        if self.props.disabled || !self.props.clearable {
            return false;
        }
        self.state.selection.clear();
        self.state.sync_inputs(&self.props);
        self.anchor = None;
        self.emit();
        self.focus_target = Some(FocusTarget::StartInput);
        if self.props.reopen_calendar_on_clear {
            self.open();
        } else {
            self.close();
        }
        true
    }

    /// Opens the calendar and schedules moving focus into the grid.
    ///
    /// The host runs the returned task on the next frame with
    /// [`run_deferred`](Self::run_deferred).
    pub fn open(&mut self) -> Option<TaskId> {
        if self.props.disabled {
            return None;
        }
        self.open = true;
        let target = self.initial_focus();
        self.focus = Some(target);
        Some(self.deferred.schedule(DeferredAction::FocusGrid(target)))
    }

    fn initial_focus(&self) -> CalendarDate {
        let range = self.range();
        range
            .start()
            .or(range.end())
            .or(self.focus)
            .filter(|date| self.window.contains_date(*date))
            .unwrap_or_else(|| {
                let first = self.window.first().map_or(self.today, YearMonth::first_day);
                self.bounds().clamp(first)
            })
    }

    pub fn close(&mut self) {
        if self.open {
            trace!("closing calendar");
        }
        self.open = false;
        self.anchor = None;
        self.deferred.cancel();
        if self.focus_target == Some(FocusTarget::Grid) {
            self.focus_target = None;
        }
    }

    /// Runs a deferred task. Stale or cancelled ids do nothing.
    pub fn run_deferred(&mut self, id: TaskId) -> bool {
        match self.deferred.take(id) {
            Some(DeferredAction::FocusGrid(date)) if self.open => {
                self.focus = Some(date);
                self.focus_target = Some(FocusTarget::Grid);
                true
            }
            _ => false,
        }
    }

    /// Shows `date` and puts the focus cursor on it.
    pub fn focus_date(&mut self, date: CalendarDate) {
        self.reveal(date);
    }

    fn reveal(&mut self, date: CalendarDate) {
        self.window.set_visible(date.year_month());
        self.focus = Some(date);
    }

    /// Shows the month of `date` without moving the focus cursor.
    pub fn set_visible_date(&mut self, date: CalendarDate) -> bool {
        self.window.set_visible(date.year_month())
    }

    pub fn show_previous_month(&mut self) -> bool {
        self.window.shift(-1)
    }

    pub fn show_next_month(&mut self) -> bool {
        self.window.shift(1)
    }

    /// The visible months with annotated cells.
    pub fn months(&self) -> Vec<RenderedMonth> {
        let constraints = self.constraints();
        RenderContext {
            first_day_of_week: self.props.first_day_of_week,
            show_outside_days: self.props.show_outside_days,
            month_format:      &self.props.month_format,
            locale:            self.props.locale,
            constraints:       &constraints,
            selection:         self.range(),
            focus:             self.focus,
        }
        .render(&self.window)
    }

    pub fn weekday_labels(&self) -> [&'static str; DAYS_PER_WEEK] {
        weekday_labels(self.props.first_day_of_week, self.props.locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::DisplayFormat;
    use crate::locale::Locale;

    #[derive(Debug, Default)]
    struct Recorder(Vec<RangeUpdate>);

    impl HostCallback<RangeUpdate> for Recorder {
        fn set_props(&mut self, update: RangeUpdate) {
            self.0.push(update);
        }
    }

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn june_props() -> RangeProps {
        RangeProps {
            initial_visible_month: Some(date(2024, 6, 1)),
            ..RangeProps::default()
        }
    }

    fn build(props: RangeProps) -> RangeCalendar<Recorder> {
        RangeCalendar::with_today(props, Recorder::default(), date(2024, 6, 15))
    }

    #[test]
    fn test_reconcile_external_change_wins() {
        let old = RangeProps {
            start_date: Some(date(2024, 6, 1)),
            end_date: Some(date(2024, 6, 5)),
            ..RangeProps::default()
        };
        let mut state = RangeState::from_props(&old);
        state.selection.set_start(Some(date(2024, 6, 2)));
        state.start_input = "2024-06-0".to_owned();

        let new = RangeProps {
            start_date: Some(date(2024, 6, 3)),
            ..old.clone()
        };
        let state = reconcile(&old, &new, state);
        assert_eq!(
            state.selection.range(),
            DateRange::from((date(2024, 6, 3), date(2024, 6, 5)))
        );
        assert_eq!(state.start_input, "2024-06-03");
        assert_eq!(state.end_input, "2024-06-05");
    }

    #[test]
    fn test_reconcile_replaces_both_dates_together() {
        let old = RangeProps {
            start_date: Some(date(2024, 6, 1)),
            end_date: Some(date(2024, 6, 5)),
            ..RangeProps::default()
        };
        let new = RangeProps {
            start_date: Some(date(2024, 6, 10)),
            end_date: Some(date(2024, 6, 12)),
            ..RangeProps::default()
        };
        let state = reconcile(&old, &new, RangeState::from_props(&old));
        assert_eq!(state.selection.range(), new.range());
    }

    #[test]
    fn test_reconcile_format_change_reformats() {
        let old = RangeProps {
            start_date: Some(date(2024, 6, 1)),
            end_date: Some(date(2024, 6, 5)),
            ..RangeProps::default()
        };
        let new = RangeProps {
            display_format: DisplayFormat::new("DD/MM/YYYY"),
            ..old.clone()
        };
        let state = reconcile(&old, &new, RangeState::from_props(&old));
        assert_eq!(state.start_input, "01/06/2024");
        assert_eq!(state.end_input, "05/06/2024");
    }

    #[test]
    fn test_reconcile_locale_change_reformats() {
        let old = RangeProps {
            start_date: Some(date(2024, 6, 1)),
            end_date: Some(date(2024, 7, 5)),
            display_format: DisplayFormat::new("D MMM YYYY"),
            ..RangeProps::default()
        };
        let new = RangeProps {
            locale: Locale::Es,
            ..old.clone()
        };
        let state = reconcile(&old, &new, RangeState::from_props(&old));
        assert_eq!(state.start_input, "1 jun 2024");
        assert_eq!(state.end_input, "5 jul 2024");
    }

    #[test]
    fn test_reconcile_keeps_unrelated_typing() {
        let old = RangeProps::default();
        let mut state = RangeState::from_props(&old);
        state.end_input = "2024-0".to_owned();
        let new = RangeProps {
            clearable: true,
            ..old.clone()
        };
        let state = reconcile(&old, &new, state);
        assert_eq!(state.end_input, "2024-0");
    }

    #[test]
    fn test_bothdates_holds_partial_range() {
        let mut calendar = build(june_props());
        assert!(calendar.click(date(2024, 6, 10)));
        assert_eq!(calendar.selection_state(), SelectionState::StartOnly(date(2024, 6, 10)));
        assert!(calendar.host().0.is_empty());

        assert!(calendar.click(date(2024, 6, 14)));
        assert_eq!(
            calendar.host().0,
            vec![RangeUpdate::both(Some(date(2024, 6, 10)), Some(date(2024, 6, 14)))]
        );
        assert_eq!(calendar.input(Endpoint::Start), "2024-06-10");
        assert_eq!(calendar.input(Endpoint::End), "2024-06-14");
    }

    #[test]
    fn test_singledate_emits_changed_keys_only() {
        let mut calendar = build(RangeProps {
            updatemode: UpdateMode::SingleDate,
            start_date: Some(date(2024, 6, 3)),
            end_date: Some(date(2024, 6, 8)),
            ..june_props()
        });
        // Starting over from a complete range reports the new start only.
        calendar.click(date(2024, 6, 12));
        calendar.click(date(2024, 6, 20));
        assert_eq!(
            calendar.host().0,
            vec![
                RangeUpdate::start(Some(date(2024, 6, 12))),
                RangeUpdate::end(Some(date(2024, 6, 20))),
            ]
        );
    }

    #[test]
    fn test_drag_selects_range() {
        let mut calendar = build(june_props());
        calendar.pointer_down(date(2024, 6, 18));
        assert!(calendar.pointer_up(date(2024, 6, 11)));
        assert_eq!(
            calendar.range(),
            DateRange::from((date(2024, 6, 11), date(2024, 6, 18)))
        );
        assert_eq!(calendar.host().0.len(), 1);
    }

    #[test]
    fn test_disabled_day_not_selectable() {
        let mut calendar = build(RangeProps {
            disabled_days: vec![date(2024, 6, 10)],
            min_date_allowed: Some(date(2024, 6, 5)),
            ..june_props()
        });
        assert!(!calendar.click(date(2024, 6, 10)));
        assert!(!calendar.click(date(2024, 6, 4)));
        assert_eq!(calendar.range(), DateRange::empty());
    }

    #[test]
    fn test_minimum_nights_blocks_short_stays() {
        let mut calendar = build(RangeProps {
            minimum_nights: 2,
            ..june_props()
        });
        calendar.click(date(2024, 6, 10));
        assert!(!calendar.click(date(2024, 6, 11)));
        assert!(!calendar.click(date(2024, 6, 8)));
        assert!(calendar.click(date(2024, 6, 13)));
        assert_eq!(
            calendar.range(),
            DateRange::from((date(2024, 6, 10), date(2024, 6, 13)))
        );
    }

    #[test]
    fn test_minimum_nights_at_type_limit() {
        let mut calendar = build(RangeProps {
            minimum_nights: u32::MAX,
            ..june_props()
        });
        assert!(calendar.click(date(2024, 6, 10)));
        let months = calendar.months();
        let enabled: Vec<_> = months
            .iter()
            .flat_map(RenderedMonth::days)
            .filter(|cell| !cell.disabled)
            .map(|cell| cell.date)
            .collect();
        assert_eq!(enabled, [date(2024, 6, 10)]);
        assert!(!calendar.click(date(2024, 7, 31)));
        assert_eq!(calendar.selection_state(), SelectionState::StartOnly(date(2024, 6, 10)));
    }

    #[test]
    fn test_selection_closes_unless_stay_open() {
        let mut calendar = build(june_props());
        calendar.open();
        calendar.click(date(2024, 6, 10));
        assert!(calendar.is_open());
        calendar.click(date(2024, 6, 12));
        assert!(!calendar.is_open());

        let mut calendar = build(RangeProps {
            stay_open_on_select: true,
            ..june_props()
        });
        calendar.open();
        calendar.click(date(2024, 6, 10));
        calendar.click(date(2024, 6, 12));
        assert!(calendar.is_open());
    }

    #[test]
    fn test_text_commit_swaps_inverted_edit() {
        let mut calendar = build(RangeProps {
            start_date: Some(date(2024, 6, 10)),
            end_date: Some(date(2024, 6, 12)),
            ..june_props()
        });
        calendar.set_input_text(Endpoint::End, "2024-06-01");
        assert!(calendar.commit_input(Endpoint::End, CommitTrigger::Enter));
        assert_eq!(
            calendar.range(),
            DateRange::from((date(2024, 6, 1), date(2024, 6, 10)))
        );
        assert_eq!(calendar.input(Endpoint::Start), "2024-06-01");
        assert_eq!(calendar.input(Endpoint::End), "2024-06-10");
        assert_eq!(calendar.focus(), Some(date(2024, 6, 1)));
    }

    #[test]
    fn test_text_commit_recenters_window() {
        let mut calendar = build(june_props());
        calendar.set_input_text(Endpoint::Start, "2024-09-02");
        assert!(calendar.commit_input(Endpoint::Start, CommitTrigger::Tab));
        let months: Vec<_> = calendar.window().iter().map(|m| m.to_string()).collect();
        assert_eq!(months, ["2024-08", "2024-09"]);
        assert_eq!(calendar.focus_target(), Some(FocusTarget::EndInput));
    }

    #[test]
    fn test_text_commit_reverts_disallowed_date() {
        let mut calendar = build(RangeProps {
            start_date: Some(date(2024, 6, 10)),
            max_date_allowed: Some(date(2024, 6, 30)),
            ..june_props()
        });
        calendar.set_input_text(Endpoint::Start, "2024-07-04");
        assert!(!calendar.commit_input(Endpoint::Start, CommitTrigger::Blur));
        assert_eq!(calendar.input(Endpoint::Start), "2024-06-10");
        assert!(calendar.host().0.is_empty());
    }

    #[test]
    fn test_text_commit_empty_clears_endpoint() {
        let mut calendar = build(RangeProps {
            start_date: Some(date(2024, 6, 10)),
            end_date: Some(date(2024, 6, 12)),
            updatemode: UpdateMode::SingleDate,
            ..june_props()
        });
        calendar.set_input_text(Endpoint::End, "  ");
        assert!(calendar.commit_input(Endpoint::End, CommitTrigger::Blur));
        assert_eq!(calendar.range(), DateRange::new(Some(date(2024, 6, 10)), None));
        assert_eq!(calendar.host().0, vec![RangeUpdate::end(None)]);
    }

    #[test]
    fn test_text_commit_reformats_accepted_text() {
        let mut calendar = build(RangeProps {
            display_format: DisplayFormat::new("MM/DD/YYYY"),
            ..june_props()
        });
        calendar.set_input_text(Endpoint::Start, "2024-06-10");
        assert!(calendar.commit_input(Endpoint::Start, CommitTrigger::Blur));
        assert_eq!(calendar.input(Endpoint::Start), "06/10/2024");
    }

    #[test]
    fn test_keyboard_navigation_and_commit() {
        let mut calendar = build(june_props());
        let task = calendar.open().unwrap();
        assert!(calendar.run_deferred(task));
        assert_eq!(calendar.focus_target(), Some(FocusTarget::Grid));
        assert_eq!(calendar.focus(), Some(date(2024, 6, 1)));

        assert!(calendar.key_down(GridKey::ArrowDown, false));
        assert!(calendar.key_down(GridKey::ArrowRight, false));
        assert_eq!(calendar.focus(), Some(date(2024, 6, 9)));
        assert_eq!(calendar.range(), DateRange::empty());

        assert!(calendar.key_down(GridKey::Enter, false));
        assert_eq!(calendar.range(), DateRange::single(date(2024, 6, 9)));
        assert!(!calendar.is_open());
    }

    #[test]
    fn test_keyboard_paging_moves_window() {
        let mut calendar = build(june_props());
        calendar.focus_date(date(2024, 7, 20));
        assert!(calendar.key_down(GridKey::PageDown, false));
        assert_eq!(calendar.focus(), Some(date(2024, 8, 20)));
        let months: Vec<_> = calendar.window().iter().map(|m| m.to_string()).collect();
        assert_eq!(months, ["2024-07", "2024-08"]);
    }

    #[test]
    fn test_keyboard_respects_bounds() {
        let mut calendar = build(RangeProps {
            min_date_allowed: Some(date(2024, 6, 10)),
            ..june_props()
        });
        calendar.focus_date(date(2024, 6, 10));
        assert!(!calendar.key_down(GridKey::ArrowLeft, false));
        assert_eq!(calendar.focus(), Some(date(2024, 6, 10)));
    }

    #[test]
    fn test_escape_closes() {
        let mut calendar = build(june_props());
        let task = calendar.open().unwrap();
        assert!(calendar.key_down(GridKey::Escape, false));
        assert!(!calendar.is_open());
        assert_eq!(calendar.focus_target(), Some(FocusTarget::StartInput));
        assert!(!calendar.run_deferred(task));
        assert!(!calendar.key_down(GridKey::Escape, false));
    }

    #[test]
    fn test_reopening_supersedes_focus_task() {
        let mut calendar = build(june_props());
        let first = calendar.open().unwrap();
        let second = calendar.open().unwrap();
        assert!(!calendar.run_deferred(first));
        assert!(calendar.run_deferred(second));
    }

    #[test]
    fn test_clear() {
        let mut calendar = build(RangeProps {
            start_date: Some(date(2024, 6, 10)),
            end_date: Some(date(2024, 6, 12)),
            ..june_props()
        });
        assert!(!calendar.clear());

        let mut calendar = build(RangeProps {
            start_date: Some(date(2024, 6, 10)),
            end_date: Some(date(2024, 6, 12)),
            clearable: true,
            reopen_calendar_on_clear: true,
            ..june_props()
        });
        assert!(calendar.clear());
        assert_eq!(calendar.range(), DateRange::empty());
        assert_eq!(calendar.input(Endpoint::Start), "");
        assert_eq!(calendar.host().0, vec![RangeUpdate::both(None, None)]);
        assert_eq!(calendar.focus_target(), Some(FocusTarget::StartInput));
        assert!(calendar.is_open());
    }

    #[test]
    fn test_disabled_ignores_interaction() {
        let mut calendar = build(RangeProps {
            disabled: true,
            clearable: true,
            ..june_props()
        });
        assert!(!calendar.click(date(2024, 6, 10)));
        calendar.set_input_text(Endpoint::Start, "2024-06-10");
        assert!(!calendar.commit_input(Endpoint::Start, CommitTrigger::Blur));
        assert_eq!(calendar.input(Endpoint::Start), "");
        assert!(calendar.open().is_none());
        assert!(!calendar.clear());
        assert!(calendar.host().0.is_empty());
    }

    #[test]
    fn test_host_echo_is_quiet() {
        let mut calendar = build(june_props());
        calendar.click(date(2024, 6, 10));
        calendar.click(date(2024, 6, 12));
        let mut echoed = calendar.props().clone();
        calendar.host().0[0].apply_to(&mut echoed);
        calendar.set_props(echoed);
        assert_eq!(
            calendar.range(),
            DateRange::from((date(2024, 6, 10), date(2024, 6, 12)))
        );
        assert_eq!(calendar.host().0.len(), 1);
    }

    #[test]
    fn test_set_props_resizes_window() {
        let mut calendar = build(june_props());
        calendar.set_props(RangeProps {
            number_of_months_shown: 3,
            ..june_props()
        });
        let months: Vec<_> = calendar.window().iter().map(|m| m.to_string()).collect();
        assert_eq!(months, ["2024-05", "2024-06", "2024-07"]);
    }

    #[test]
    fn test_initial_window_falls_back_to_today() {
        let calendar = build(RangeProps::default());
        assert_eq!(calendar.window().first(), Some(YearMonth::new(2024, 6).unwrap()));

        let calendar = RangeCalendar::with_today(
            RangeProps {
                min_date_allowed: Some(date(2025, 3, 1)),
                ..RangeProps::default()
            },
            Recorder::default(),
            date(2024, 6, 15),
        );
        assert_eq!(calendar.window().first(), Some(YearMonth::new(2025, 3).unwrap()));
    }

    #[test]
    fn test_months_render_model() {
        let mut calendar = build(RangeProps {
            minimum_nights: 1,
            ..june_props()
        });
        calendar.click(date(2024, 6, 10));
        let months = calendar.months();
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].caption, "June 2024");
        assert_eq!(months[1].caption, "July 2024");
        assert!(months[0].cell(date(2024, 6, 10)).unwrap().selected_start);
        assert!(months[0].cell(date(2024, 6, 11)).unwrap().disabled);
        assert!(months[0].cell(date(2024, 6, 9)).unwrap().disabled);
        assert!(!months[0].cell(date(2024, 6, 12)).unwrap().disabled);
        assert_eq!(calendar.weekday_labels()[0], "Su");
    }
}
