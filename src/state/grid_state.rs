use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::state::config::{GridConfig, RowSelectionPattern};
use crate::state::data_model::{
    ColumnDescriptor, ColumnRecord, IdArena, RowId, RowRecord, TableData,
};
use crate::state::edit_session::{EditSession, FocusEffect, FocusTarget};
use crate::state::events::{CellEdit, GridEvent};
use crate::state::filter::{FilterRegistry, FilterSet};
use crate::state::navigation::{self, Bounds, CellCoord, NavKey};
use crate::state::selection::{SelectionTracker, TriState};
use crate::state::sort::{self, SortDirection, SortState};

/// Custom renderer for data cells: `(content, col_index, row_index) -> content`.
pub type CellRenderer = Rc<dyn Fn(&str, usize, usize) -> String>;

/// What a column position holds once the checkbox offset is accounted for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Checkbox,
    Data(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellContent {
    Text(String),
    Checkbox(bool),
    /// Built-in controls of an actions column.
    Actions { editing: bool },
}

/// The grid model: data, columns, derived view and all interaction state.
#[derive(Clone, Default)]
pub struct GridState {
    config: GridConfig,
    arena: IdArena,
    columns: Vec<ColumnRecord>,
    rows: Vec<RowRecord>,
    view: Vec<usize>,
    sort: SortState,
    selection: SelectionTracker,
    filters: FilterRegistry,
    session: EditSession,
    draft: Option<String>,
    // Set on pointer down inside the grid; cleared by the next click or focus entry.
    pointer_guard: bool,
    renderer: Option<CellRenderer>,
    outbox: Vec<GridEvent>,
}

impl fmt::Debug for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridState")
            .field("config", &self.config)
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("view", &self.view)
            .field("sort", &self.sort)
            .field("selection", &self.selection)
            .field("filters", &self.filters)
            .field("session", &self.session)
            .field("draft", &self.draft)
            .field("pointer_guard", &self.pointer_guard)
            .field("renderer", &self.renderer.is_some())
            .field("outbox", &self.outbox)
            .finish()
    }
}

impl GridState {
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn from_table(config: GridConfig, columns: Vec<ColumnDescriptor>, data: TableData) -> Self {
        let mut state = Self::new(config);
        state.replace_columns(columns);
        state.replace_data(data);
        state
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GridConfig) {
        self.config = config;
        self.close_session_silently();
    }

    /// Wholesale data replacement. Every row gets a fresh identity, so all
    /// selection is dropped. The active cell is left where it was.
    pub fn replace_data(&mut self, data: TableData) {
        self.close_session_silently();
        self.rows = self.arena.row_records(data);
        self.selection.rebuild(self.rows.iter().map(|row| row.id));
        self.recompute_view();
        debug!(rows = self.rows.len(), "grid data replaced");
    }

    pub fn replace_columns(&mut self, columns: Vec<ColumnDescriptor>) {
        self.close_session_silently();
        self.columns = self.arena.column_records(columns);
        self.filters.retain_columns(&self.columns);
        if self.sort.column.is_some_and(|column| column >= self.columns.len()) {
            self.sort = SortState::default();
        }
        self.recompute_view();
        debug!(columns = self.columns.len(), "grid columns replaced");
    }

    pub fn set_cell_renderer(&mut self, renderer: impl Fn(&str, usize, usize) -> String + 'static) {
        self.renderer = Some(Rc::new(renderer));
    }

    pub fn clear_cell_renderer(&mut self) {
        self.renderer = None;
    }

    pub fn columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().map(|column| &column.descriptor)
    }

    pub fn column(&self, data_col: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(data_col).map(|column| &column.descriptor)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.view.len()
    }

    /// Rows in display order.
    pub fn view_rows(&self) -> impl Iterator<Item = &RowRecord> {
        self.view.iter().map(|&idx| &self.rows[idx])
    }

    pub fn view_row(&self, view_row: usize) -> Option<&RowRecord> {
        self.view.get(view_row).map(|&idx| &self.rows[idx])
    }

    pub fn row_position(&self, id: RowId) -> Option<usize> {
        self.view.iter().position(|&idx| self.rows[idx].id == id)
    }

    pub fn bounds(&self) -> Bounds {
        let width = self.columns.len() + self.config.checkbox_offset();
        if width == 0 {
            return Bounds::default();
        }
        Bounds {
            row_count: self.rows.len(),
            max_col_index: width - 1,
        }
    }

    pub fn column_kind(&self, col: usize) -> Option<ColumnKind> {
        let offset = self.config.checkbox_offset();
        if col < offset {
            return Some(ColumnKind::Checkbox);
        }
        let data_col = col - offset;
        (data_col < self.columns.len()).then_some(ColumnKind::Data(data_col))
    }

    /// Grid column position of a data column.
    pub fn grid_col(&self, data_col: usize) -> usize {
        data_col + self.config.checkbox_offset()
    }

    pub fn active_cell(&self) -> CellCoord {
        self.session.active_cell()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_editing()
    }

    /// Generation of the most recently opened editor; see [`GridState::editor_blur`].
    pub fn edit_generation(&self) -> u64 {
        self.session.generation()
    }

    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn sort_direction(&self, data_col: usize) -> SortDirection {
        self.sort.direction_for(data_col)
    }

    pub fn filter_text(&self, data_col: usize) -> &str {
        self.columns
            .get(data_col)
            .map(|column| self.filters.text(column.id))
            .unwrap_or("")
    }

    pub fn filter_set(&self) -> FilterSet {
        self.filters.filter_set(&self.columns)
    }

    pub fn is_row_selected(&self, view_row: usize) -> bool {
        self.view_row(view_row)
            .map(|row| self.selection.is_selected(row.id))
            .unwrap_or(false)
    }

    pub fn is_selected(&self, id: RowId) -> bool {
        self.selection.is_selected(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.selected_count()
    }

    pub fn aggregate_state(&self) -> TriState {
        self.selection.aggregate_state()
    }

    /// Drains the messages produced since the last call.
    pub fn take_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn pending_effect(&self) -> Option<FocusEffect> {
        let mut effect = self.session.pending_effect()?;
        if let FocusTarget::Cell(cell) = effect.target {
            if self.is_roving() {
                effect.target = FocusTarget::Row(cell.row);
            }
        }
        Some(effect)
    }

    pub fn acknowledge_effect(&mut self) -> bool {
        self.session.acknowledge_effect()
    }

    pub fn cell_content(&self, cell: CellCoord) -> Option<CellContent> {
        let row = self.view_row(cell.row)?;
        match self.column_kind(cell.col)? {
            ColumnKind::Checkbox => Some(CellContent::Checkbox(self.selection.is_selected(row.id))),
            ColumnKind::Data(data_col) => {
                if self.columns[data_col].descriptor.actions_column {
                    let editing = self.is_editing() && self.active_cell().row == cell.row;
                    return Some(CellContent::Actions { editing });
                }
                let text = row.cell(data_col);
                let text = match &self.renderer {
                    Some(renderer) => renderer(text, data_col, cell.row),
                    None => text.to_string(),
                };
                Some(CellContent::Text(text))
            }
        }
    }

    /// Handles a key press; returns true when the host should suppress the
    /// key's default action.
    pub fn key_down(&mut self, key: &str) -> bool {
        if self.session.is_editing() {
            return match key {
                "Enter" if !self.config.simple_editable => {
                    self.commit_draft();
                    self.session.exit_edit(true);
                    true
                }
                "Escape" => {
                    self.cancel_edit();
                    true
                }
                _ => false,
            };
        }

        if let Some(nav) = NavKey::from_key_name(key) {
            self.navigate(nav);
            return true;
        }

        match key {
            "Enter" | "F2" if !self.config.simple_editable => self.begin_edit(true),
            " " => {
                let active = self.active_cell();
                if self.is_roving() || self.column_kind(active.col) == Some(ColumnKind::Checkbox) {
                    self.toggle_row(active.row)
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn navigate(&mut self, key: NavKey) {
        let bounds = self.bounds();
        let page_length = self.config.effective_page_length();
        let current = self.active_cell();
        let (next, changed) =
            if self.is_roving() {
                navigation::next_row_only(current, bounds, key, page_length)
            } else {
                navigation::next(current, bounds, key, page_length)
            };

        if changed {
            self.session.move_active_cell(next);
            debug!(?key, from = %current, to = %next, "active cell moved");
        } else {
            trace!(?key, cell = %current, "navigation at boundary");
        }
    }

    /// Click-to-activate, click-again-to-edit.
    pub fn click_cell(&mut self, cell: CellCoord) {
        self.pointer_guard = false;
        if !self.bounds().contains(cell) {
            return;
        }

        let active = self.active_cell();
        if self.session.is_editing() {
            if cell == active {
                return;
            }
            // The editor's blur normally closes the session before the click lands.
            self.commit_draft();
            self.session.exit_edit(false);
        }

        if self.column_kind(cell.col) == Some(ColumnKind::Checkbox) {
            self.session.move_active_cell(cell);
            self.toggle_row(cell.row);
            return;
        }

        if cell == active {
            if !self.config.simple_editable {
                self.begin_edit(true);
            }
            return;
        }

        self.session.move_active_cell(cell);
        debug!(%cell, "active cell clicked");
        if self.config.edit_on_click && !self.config.simple_editable {
            self.begin_edit(true);
        }
    }

    /// Row click under the roving row pattern: the row becomes active and its
    /// selection toggles.
    pub fn click_row(&mut self, view_row: usize) -> bool {
        self.pointer_guard = false;
        if !self.is_roving() || view_row >= self.bounds().row_count {
            return false;
        }

        if self.session.is_editing() {
            self.commit_draft();
            self.session.exit_edit(false);
        }
        let active = self.active_cell();
        self.session.move_active_cell(CellCoord::new(active.col, view_row));
        debug!(row = view_row, "row clicked");
        self.toggle_row(view_row)
    }

    pub fn pointer_down(&mut self) {
        self.pointer_guard = true;
    }

    /// Focus arrived on the grid container. Keyboard entry is redirected to
    /// the active cell; pointer entry is left to the click that follows.
    pub fn focus_enter(&mut self) -> bool {
        if std::mem::take(&mut self.pointer_guard) || self.bounds().is_empty() {
            return false;
        }
        self.session.request_focus();
        true
    }

    pub fn edit_input(&mut self, text: impl Into<String>) {
        if self.session.is_editing() {
            self.draft = Some(text.into());
        }
    }

    /// The editor opened as `generation` lost focus. Inside the grid this
    /// commits; leaving the grid entirely closes the session without saving.
    /// Blurs that arrive after a newer editor opened are dropped.
    pub fn editor_blur(&mut self, generation: u64, focus_inside_grid: bool) -> bool {
        if self.config.simple_editable {
            return false;
        }
        if generation != self.session.generation() {
            trace!(generation, current = self.session.generation(), "stale editor blur");
            return false;
        }
        if !self.session.is_editing() && !self.session.is_save_suppressed() {
            return false;
        }

        if !focus_inside_grid && self.session.is_editing() {
            self.draft = None;
            self.session.exit_edit(false);
            debug!(cell = %self.active_cell(), "edit closed by focus leaving grid");
            return true;
        }

        self.commit_draft();
        if self.session.is_editing() {
            self.session.exit_edit(false);
        }
        true
    }

    pub fn simple_edit(&mut self) -> bool {
        if !self.config.simple_editable || self.session.is_editing() {
            return false;
        }
        self.begin_edit(true)
    }

    pub fn simple_save(&mut self) -> bool {
        if !self.config.simple_editable || !self.session.is_editing() {
            return false;
        }
        self.commit_draft();
        self.session.exit_edit(true);
        true
    }

    pub fn simple_cancel(&mut self) -> bool {
        if !self.config.simple_editable || !self.session.is_editing() {
            return false;
        }
        self.cancel_edit();
        true
    }

    /// Closes the session; the next commit attempt is discarded.
    pub fn cancel_edit(&mut self) {
        self.session.cancel();
        self.draft = None;
        debug!(cell = %self.active_cell(), "edit cancelled");
    }

    pub fn activate_header(&mut self, data_col: usize) -> bool {
        let Some(column) = self.columns.get(data_col) else {
            return false;
        };
        if !column.descriptor.sortable {
            return false;
        }

        self.sort.toggle(data_col);
        self.recompute_view();
        debug!(column = data_col, direction = ?self.sort.direction, "sort toggled");
        true
    }

    pub fn filter_input(&mut self, data_col: usize, text: impl Into<String>) {
        let Some(column) = self.columns.get(data_col) else {
            return;
        };
        self.filters.set_text(column.id, text);
        let set = self.filter_set();
        debug!(active = set.len(), "filter changed");
        self.outbox.push(GridEvent::Filter(set));
    }

    pub fn toggle_row(&mut self, view_row: usize) -> bool {
        let selected = self.is_row_selected(view_row);
        self.set_row_selected(view_row, !selected)
    }

    pub fn set_row_selected(&mut self, view_row: usize, selected: bool) -> bool {
        if self.bounds().is_empty() {
            return false;
        }
        let Some(id) = self.view_row(view_row).map(|row| row.id) else {
            return false;
        };
        if !self.selection.set_row_selected(id, selected) {
            return false;
        }
        self.outbox.push(GridEvent::RowSelect { row: id, selected });
        true
    }

    pub fn select_all(&mut self, selected: bool) {
        if self.bounds().is_empty() {
            return;
        }
        let changed = self.selection.select_all(selected);
        debug!(changed = changed.len(), selected, "bulk selection");
        self.outbox.extend(
            changed
                .into_iter()
                .map(|row| GridEvent::RowSelect { row, selected }),
        );
    }

    /// Header checkbox: anything short of all selected selects all.
    pub fn toggle_all(&mut self) {
        let select = self.aggregate_state() != TriState::Checked;
        self.select_all(select);
    }

    /// Writes a committed value back into the row it was made on.
    pub fn apply_edit(&mut self, edit: &CellEdit) -> bool {
        let Some(row) = self.rows.iter_mut().find(|row| row.id == edit.row_id) else {
            return false;
        };
        if row.cells.len() <= edit.column {
            row.cells.resize(edit.column + 1, String::new());
        }
        if row.cells[edit.column] == edit.value {
            return false;
        }

        row.cells[edit.column] = edit.value.clone();
        self.recompute_view();
        true
    }

    pub fn clamp_active_cell(&mut self) {
        let bounds = self.bounds();
        let clamped = if bounds.is_empty() {
            CellCoord::default()
        } else {
            bounds.clamp(self.active_cell())
        };
        self.session.place_active_cell(clamped);
    }

    pub fn data(&self) -> TableData {
        self.rows.iter().map(|row| row.cells.clone()).collect()
    }

    fn is_roving(&self) -> bool {
        self.config.row_selection_pattern == RowSelectionPattern::AriaRoving
    }

    fn is_editable_cell(&self, cell: CellCoord) -> bool {
        if !self.bounds().contains(cell) {
            return false;
        }
        match self.column_kind(cell.col) {
            Some(ColumnKind::Data(data_col)) => !self.columns[data_col].descriptor.actions_column,
            _ => false,
        }
    }

    fn begin_edit(&mut self, with_focus: bool) -> bool {
        let active = self.active_cell();
        if !self.is_editable_cell(active) {
            return false;
        }
        if !self.session.enter_edit(with_focus, &self.config) {
            return false;
        }

        self.draft = self.cell_text(active).map(str::to_string);
        debug!(cell = %active, "edit started");
        true
    }

    fn commit_draft(&mut self) {
        let value = self.draft.take().unwrap_or_default();
        let Some((cell, value)) = self.session.commit(value) else {
            debug!("commit discarded after cancel");
            return;
        };
        let Some(ColumnKind::Data(column)) = self.column_kind(cell.col) else {
            return;
        };
        let Some(row_id) = self.view_row(cell.row).map(|row| row.id) else {
            return;
        };

        debug!(%cell, "edit committed");
        self.outbox.push(GridEvent::EditCell(CellEdit {
            column,
            row: cell.row,
            row_id,
            value,
        }));
    }

    fn cell_text(&self, cell: CellCoord) -> Option<&str> {
        let row = self.view_row(cell.row)?;
        match self.column_kind(cell.col)? {
            ColumnKind::Data(data_col) => Some(row.cell(data_col)),
            ColumnKind::Checkbox => None,
        }
    }

    fn close_session_silently(&mut self) {
        if self.session.is_editing() {
            self.session.exit_edit(false);
        }
        self.draft = None;
    }

    fn recompute_view(&mut self) {
        self.view = sort::sorted_indices(&self.rows, self.sort);
    }
}
