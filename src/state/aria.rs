use crate::state::config::{GridConfig, GridType, RowSelectionPattern};
use crate::state::navigation::CellCoord;
use crate::state::sort::SortDirection;

pub fn container_role(config: &GridConfig) -> &'static str {
    match config.grid_type {
        GridType::Grid => "grid",
        GridType::Table => "table",
    }
}

/// Role for the wrapper around the grid, when one is wanted.
pub fn application_role(config: &GridConfig) -> Option<&'static str> {
    config.use_application_role.then_some("application")
}

pub fn row_role() -> &'static str {
    "row"
}

pub fn header_role() -> &'static str {
    "columnheader"
}

/// Role for a body cell; `data_col` excludes the checkbox offset.
pub fn cell_role(config: &GridConfig, data_col: Option<usize>) -> &'static str {
    if data_col == Some(config.title_column) {
        return "rowheader";
    }
    match config.grid_type {
        GridType::Grid => "gridcell",
        GridType::Table => "cell",
    }
}

pub fn aria_sort(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "ascending",
        SortDirection::Descending => "descending",
        SortDirection::None => "none",
    }
}

/// Roving tabindex for a cell: only the active cell is in the tab order.
pub fn cell_tabindex(config: &GridConfig, cell: CellCoord, active: CellCoord) -> i32 {
    if config.row_selection_pattern == RowSelectionPattern::AriaRoving {
        return -1;
    }
    if cell == active {
        0
    } else {
        -1
    }
}

/// Roving tabindex for a row container; rows only take focus under the
/// roving row pattern.
pub fn row_tabindex(config: &GridConfig, row: usize, active: CellCoord) -> Option<i32> {
    if config.row_selection_pattern != RowSelectionPattern::AriaRoving {
        return None;
    }
    Some(if row == active.row { 0 } else { -1 })
}

pub fn aria_selected(config: &GridConfig, selected: bool) -> Option<&'static str> {
    match config.row_selection_pattern {
        RowSelectionPattern::None => None,
        RowSelectionPattern::Checkbox | RowSelectionPattern::AriaRoving => {
            Some(if selected { "true" } else { "false" })
        }
    }
}
