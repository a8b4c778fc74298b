use std::collections::BTreeMap;

use crate::state::data_model::RowId;

/// Aggregate selection, rendered by the header checkbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriState {
    Unchecked,
    Checked,
    Indeterminate,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    flags: BTreeMap<RowId, bool>,
    count: usize,
    row_count: usize,
}

impl SelectionTracker {
    pub fn new(rows: impl IntoIterator<Item = RowId>) -> Self {
        let mut tracker = Self::default();
        tracker.rebuild(rows);
        tracker
    }

    /// Drops every association and starts over with `rows`, all unselected.
    pub fn rebuild(&mut self, rows: impl IntoIterator<Item = RowId>) {
        self.flags = rows.into_iter().map(|id| (id, false)).collect();
        self.row_count = self.flags.len();
        self.count = 0;
    }

    /// Returns true when the flag changed.
    pub fn set_row_selected(&mut self, row: RowId, selected: bool) -> bool {
        let Some(flag) = self.flags.get_mut(&row) else {
            return false;
        };
        if *flag == selected {
            return false;
        }

        *flag = selected;
        if selected {
            self.count += 1;
        } else {
            self.count -= 1;
        }
        true
    }

    /// Sets every row to `selected`; returns the rows whose flag changed.
    pub fn select_all(&mut self, selected: bool) -> Vec<RowId> {
        let mut changed = Vec::new();
        for (id, flag) in self.flags.iter_mut() {
            if *flag != selected {
                *flag = selected;
                changed.push(*id);
            }
        }
        self.count = if selected { self.row_count } else { 0 };
        changed
    }

    pub fn is_selected(&self, row: RowId) -> bool {
        self.flags.get(&row).copied().unwrap_or(false)
    }

    pub fn selected_count(&self) -> usize {
        self.count
    }

    pub fn selected_rows(&self) -> Vec<RowId> {
        self.flags
            .iter()
            .filter_map(|(id, flag)| flag.then_some(*id))
            .collect()
    }

    pub fn aggregate_state(&self) -> TriState {
        if self.count == 0 {
            TriState::Unchecked
        } else if self.count == self.row_count {
            TriState::Checked
        } else {
            TriState::Indeterminate
        }
    }
}
