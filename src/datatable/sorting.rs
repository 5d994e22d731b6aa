//! Column sorting over the derived index set.

use super::model::Model;
use super::types::{SortDirection, SortState};
use crate::record::Record;
use tracing::debug;

impl<R: Record + Send + Sync + 'static> Model<R> {
    /// Sorts the table by a column. Ignored while a fetch is in flight.
    /// Sorting never moves the page.
    pub fn set_sort(&mut self, column: &'static str, direction: SortDirection) {
        if self.guard_loading("set_sort") {
            return;
        }
        self.sort = Some(SortState { column, direction });
        self.refresh_visible(false);
    }

    /// Toggles the sort on a column: ascending first, descending on a
    /// repeat, ascending again after that. Ignored while a fetch is in
    /// flight.
    pub fn toggle_sort(&mut self, column: &'static str) {
        let direction = match self.sort {
            Some(SortState {
                column: current,
                direction,
            }) if current == column => direction.toggled(),
            _ => SortDirection::Ascending,
        };
        self.set_sort(column, direction);
    }

    /// Removes the sort, restoring dataset order. Ignored while a fetch
    /// is in flight.
    pub fn clear_sort(&mut self) {
        if self.guard_loading("clear_sort") {
            return;
        }
        self.sort = None;
        self.refresh_visible(false);
    }

    /// Advances the sort through every column and direction, then back to
    /// unsorted: col₁↑, col₁↓, col₂↑ … none. Drives the single sort key.
    pub(super) fn advance_sort(&mut self) {
        if self.guard_loading("advance_sort") {
            return;
        }
        let next = match self.sort {
            None => self
                .columns
                .first()
                .map(|c| SortState {
                    column: c.key,
                    direction: SortDirection::Ascending,
                }),
            Some(SortState { column, direction }) => {
                if direction == SortDirection::Ascending {
                    Some(SortState {
                        column,
                        direction: SortDirection::Descending,
                    })
                } else {
                    self.columns
                        .iter()
                        .position(|c| c.key == column)
                        .and_then(|i| self.columns.get(i + 1))
                        .map(|c| SortState {
                            column: c.key,
                            direction: SortDirection::Ascending,
                        })
                }
            }
        };
        debug!(?next, "sort advanced");
        self.sort = next;
        self.refresh_visible(false);
    }

    /// Applies the active sort to the visible index set. Callers must
    /// have just re-derived `visible` in dataset order so ties resolve by
    /// original relative position (`sort_by` is stable).
    pub(super) fn apply_sort(&mut self) {
        let Some(SortState { column, direction }) = self.sort else {
            return;
        };
        let records = &self.records;
        self.visible.sort_by(|&a, &b| {
            let ordering = records[a].sort_value(column).cmp(&records[b].sort_value(column));
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}
