//! Filter wiring: criterion changes, debounce dispatch, and re-derivation
//! of the visible index set.

use super::model::Model;
use super::types::InputMode;
use crate::predicate;
use crate::record::Record;
use crate::Component;
use bubbletea_rs::Cmd;
use tracing::debug;

impl<R: Record + Send + Sync + 'static> Model<R> {
    /// Re-derives the visible index set from the owned dataset, the
    /// criterion, and the sort state.
    ///
    /// Filtering preserves dataset order; the sort is applied on top of
    /// that order afterwards, so equal keys keep their original relative
    /// position no matter how many times the sort is toggled. The page
    /// count follows the new row count; `reset_page` distinguishes a
    /// criterion change (back to page one) from every other mutation
    /// (clamp only).
    pub(super) fn refresh_visible(&mut self, reset_page: bool) {
        self.visible = predicate::evaluate(&self.records, self.criterion.criterion());
        self.apply_sort();
        self.pages.set_total_items(self.visible.len());
        if reset_page {
            self.pages.first_page();
        }
        debug!(
            visible = self.visible.len(),
            total = self.records.len(),
            page = self.pages.current_page(),
            "visible set refreshed"
        );
    }

    /// Switches the active filter field.
    ///
    /// The previous value is discarded and the visible set immediately
    /// reverts to the full dataset; a field switch is never debounced.
    /// When the new field filters by date range the editor opens on the
    /// range picker, honoring the criterion's UI-intent signal.
    pub fn set_filter_field(&mut self, key: &str) {
        let transition = self.criterion.set_field(key);
        self.after_field_switch(transition);
    }

    /// Switches to the next catalog field (key-driven variant).
    pub(super) fn cycle_filter_field(&mut self) {
        let transition = self.criterion.cycle_field();
        self.after_field_switch(transition);
    }

    fn after_field_switch(&mut self, transition: crate::criterion::Transition) {
        self.filter_input.reset();
        self.range_picker.clear();
        self.debounce.cancel();
        if transition.reverted {
            self.refresh_visible(true);
        }
        if transition.open_range_picker {
            self.enter_range_editor();
        } else if self.mode == InputMode::EditingRange {
            self.enter_query_editor();
        }
    }

    /// Sets the scalar filter value programmatically, as if typed.
    ///
    /// A non-empty value is debounced exactly like keystrokes and the
    /// returned command must be dispatched for evaluation to fire;
    /// clearing evaluates immediately and returns `None`.
    pub fn set_filter_value(&mut self, value: &str) -> Option<Cmd> {
        self.filter_input.set_value(value);
        self.on_query_edited()
    }

    /// Reacts to an edited query value: empty clears instantly, anything
    /// else (re)schedules the debounced evaluation.
    pub(super) fn on_query_edited(&mut self) -> Option<Cmd> {
        if self.filter_input.value().is_empty() {
            self.debounce.cancel();
            self.criterion.set_scalar_value("");
            self.refresh_visible(true);
            None
        } else {
            Some(self.debounce.schedule())
        }
    }

    /// Completes a debounced evaluation: adopt the input's value as the
    /// criterion and re-derive, returning to page one.
    pub(super) fn on_debounce_elapsed(&mut self) {
        self.criterion.set_scalar_value(&self.filter_input.value());
        self.refresh_visible(true);
    }

    /// Applies the range picker's bounds to the criterion and evaluates
    /// immediately. An incomplete pair of bounds is accepted and simply
    /// behaves as "no filter".
    pub fn apply_date_range(&mut self) {
        let (start, end) = self.range_picker.bounds();
        self.set_filter_range(start, end);
    }

    /// Sets the date bounds programmatically and evaluates immediately,
    /// the programmatic equivalent of the range editor's apply action.
    /// Ignored when the active field is not the range field.
    pub fn set_filter_range(
        &mut self,
        start: Option<chrono::NaiveDate>,
        end: Option<chrono::NaiveDate>,
    ) {
        if self.criterion.set_date_range(start, end) {
            self.refresh_visible(true);
        }
    }

    /// Clears the range bounds and evaluates immediately; unlike
    /// applying, clearing must feel instantaneous.
    pub(super) fn clear_date_range(&mut self) {
        self.range_picker.clear();
        self.criterion.set_date_range(None, None);
        self.refresh_visible(true);
    }

    /// Clears the filter entirely: default field, no value, full dataset,
    /// page one. Leaves the controller as freshly mounted.
    pub fn clear_filter(&mut self) {
        self.debounce.cancel();
        self.criterion.clear();
        self.filter_input.reset();
        self.range_picker.clear();
        self.mode = InputMode::Browsing;
        self.filter_input.blur();
        self.range_picker.blur();
        self.refresh_visible(true);
    }

    /// Cancels any pending debounced evaluation; a message already in
    /// flight will be ignored on arrival. Screens call this when
    /// navigating away mid-typing.
    pub fn cancel_pending(&mut self) {
        self.debounce.cancel();
    }

    pub(super) fn enter_query_editor(&mut self) {
        self.mode = InputMode::EditingQuery;
        self.range_picker.blur();
        let _ = self.filter_input.focus();
    }

    pub(super) fn enter_range_editor(&mut self) {
        self.mode = InputMode::EditingRange;
        self.filter_input.blur();
        let _ = self.range_picker.focus();
    }

    pub(super) fn leave_editor(&mut self) {
        self.mode = InputMode::Browsing;
        self.filter_input.blur();
        self.range_picker.blur();
    }
}
