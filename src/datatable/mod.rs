//! Data-table controller with filtering, sorting, and pagination.
//!
//! This module exposes a generic [`Model<R: Record>`](Model) orchestrating
//! everything the tabular screens of a portal need: a full in-memory
//! dataset, a filter criterion with debounced free-text evaluation, an
//! inclusive date-range mode, stable column sorting, page state with an
//! ellipsis-collapsed page control, and a simulated fetch boundary with a
//! stale-result guard.
//!
//! ## Architecture
//!
//! The controller stores only two authoritative pieces of data: the owned
//! record vector and the filter criterion. The visible subset is a
//! memoized vector of indices re-derived whenever records, criterion, or
//! sort change; the page slice and the page-marker sequence are in turn
//! pure projections of that subset. No derived state is ever mutated
//! independently, so the table can never disagree with its inputs.
//!
//! ## State transitions
//!
//! - **Criterion change** (debounce elapsed, range applied, filter
//!   cleared, field switched): re-derive, back to page one.
//! - **Page-size change**: re-derive the page count, clamp the page index.
//! - **Sort toggle**: stable re-sort, page index untouched.
//! - **Refetch completion**: dataset replaced, criterion survives and is
//!   re-evaluated, page index clamped.
//!
//! While a refetch is in flight the controller ignores pagination, sort,
//! and page-size input and renders a loading placeholder. A failed fetch
//! keeps the previous dataset and surfaces the error as its own state.
//!
//! ## Message routing
//!
//! [`Model::update`] handles key messages according to the input mode
//! (browsing, editing the query, editing the range) and consumes the
//! controller's own timer and fetch messages, each carrying generation
//! ids so anything stale dies on arrival.

mod filtering;
mod keys;
mod model;
mod rendering;
mod sorting;
mod style;
mod types;

#[cfg(test)]
mod tests;

pub use keys::TableKeyMap;
pub use model::Model;
pub use style::TableStyles;
pub use types::{Column, InputMode, SortDirection, SortState, PAGE_SIZES};

use crate::debounce;
use crate::fetch;
use crate::record::Record;
use bubbletea_rs::{Cmd, KeyMsg, Msg};

impl<R: Record + Send + Sync + 'static> Model<R> {
    /// Handles a message, returning a command when one must be
    /// dispatched (a debounce timer, a fetch, or quit).
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(complete) = msg.downcast_ref::<fetch::CompleteMsg<R>>() {
            if complete.id == self.request {
                self.replace_records(complete.records.clone());
            }
            return None;
        }

        if let Some(failed) = msg.downcast_ref::<fetch::FailedMsg>() {
            if failed.id == self.request {
                self.load = fetch::LoadState::Failed(failed.error.clone());
            }
            return None;
        }

        if let Some(elapsed) = msg.downcast_ref::<debounce::ElapsedMsg>() {
            if self.debounce.try_elapse(elapsed) {
                self.on_debounce_elapsed();
            }
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return match self.mode {
                InputMode::Browsing => self.update_browsing(key_msg, msg),
                InputMode::EditingQuery => self.update_query_editor(key_msg, msg),
                InputMode::EditingRange => self.update_range_editor(key_msg, msg),
            };
        }

        None
    }

    fn update_browsing(&mut self, key_msg: &KeyMsg, _msg: &Msg) -> Option<Cmd> {
        if self.keymap.quit.matches(key_msg) {
            return Some(bubbletea_rs::quit());
        }
        if self.keymap.filter.matches(key_msg) {
            if self.criterion.field().kind.is_range() {
                self.enter_range_editor();
            } else {
                self.enter_query_editor();
            }
            return None;
        }
        if self.keymap.cycle_field.matches(key_msg) {
            self.cycle_filter_field();
            return None;
        }
        if self.keymap.clear_filter.matches(key_msg) {
            self.clear_filter();
            return None;
        }
        if self.keymap.refetch.matches(key_msg) {
            if self.load.is_loading() {
                return None;
            }
            return Some(self.refetch(self.window()));
        }

        // Everything below assumes a settled dataset.
        if self.guard_loading("navigation") {
            return None;
        }
        if self.keymap.next_page.matches(key_msg) {
            self.pages.next_page();
        } else if self.keymap.prev_page.matches(key_msg) {
            self.pages.prev_page();
        } else if self.keymap.first_page.matches(key_msg) {
            self.pages.first_page();
        } else if self.keymap.last_page.matches(key_msg) {
            self.pages.last_page();
        } else if self.keymap.toggle_sort.matches(key_msg) {
            self.advance_sort();
        } else if self.keymap.cycle_page_size.matches(key_msg) {
            self.cycle_page_size();
        }
        None
    }

    fn update_query_editor(&mut self, key_msg: &KeyMsg, msg: &Msg) -> Option<Cmd> {
        if self.keymap.cancel.matches(key_msg) {
            self.leave_editor();
            return None;
        }
        if self.keymap.apply.matches(key_msg) {
            // Accepting flushes a pending evaluation instead of waiting
            // out the quiet period.
            if self.debounce.is_pending() {
                self.debounce.cancel();
                self.on_debounce_elapsed();
            }
            self.leave_editor();
            return None;
        }
        if self.keymap.cycle_field.matches(key_msg) {
            self.cycle_filter_field();
            return None;
        }
        if self.filter_input.update(msg) {
            return self.on_query_edited();
        }
        None
    }

    fn update_range_editor(&mut self, key_msg: &KeyMsg, msg: &Msg) -> Option<Cmd> {
        if self.keymap.cancel.matches(key_msg) {
            self.leave_editor();
            return None;
        }
        if self.keymap.apply.matches(key_msg) {
            self.apply_date_range();
            self.leave_editor();
            return None;
        }
        if self.keymap.clear_range.matches(key_msg) {
            self.clear_date_range();
            return None;
        }
        self.range_picker.update(msg);
        None
    }

    /// Renders the table: title and filter state, the current page of
    /// rows (or a loading placeholder), counts, the page control, and key
    /// hints.
    pub fn view(&self) -> String {
        let mut sections = Vec::new();

        let header = self.view_header();
        if !header.is_empty() {
            sections.push(header);
        }
        let filter_line = self.view_filter_line();
        if !filter_line.is_empty() {
            sections.push(filter_line);
        }
        sections.push(self.view_body());
        let footer = self.view_footer();
        if !footer.is_empty() {
            sections.push(footer);
        }
        sections.join("\n")
    }

    /// The coarse date window of the last issued (or pending) fetch.
    pub fn window(&self) -> fetch::DateWindow {
        self.window
    }
}
