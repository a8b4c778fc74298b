//! Keyboard navigation over the grid's cell coordinates.
//!
//! Every move clamps to the current bounds; nothing here fails.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellCoord {
    pub col: usize,
    pub row: usize,
}

impl CellCoord {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    pub row_count: usize,
    pub max_col_index: usize,
}

impl Bounds {
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.row < self.row_count && cell.col <= self.max_col_index
    }

    pub fn clamp(&self, cell: CellCoord) -> CellCoord {
        CellCoord {
            col: cell.col.min(self.max_col_index),
            row: cell.row.min(self.row_count.saturating_sub(1)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
}

impl NavKey {
    /// Parses a host key name (`KeyboardEvent.key` spelling).
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            "PageUp" => Some(Self::PageUp),
            "PageDown" => Some(Self::PageDown),
            _ => None,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(
            self,
            Self::ArrowUp | Self::ArrowDown | Self::PageUp | Self::PageDown
        )
    }
}

/// Computes the cell reached from `current` by `key`.
///
/// Returns the new cell and whether it differs from `current`.
pub fn next(current: CellCoord, bounds: Bounds, key: NavKey, page_length: usize) -> (CellCoord, bool) {
    if bounds.is_empty() {
        return (current, false);
    }

    let last_row = bounds.row_count - 1;
    let mut cell = current;
    match key {
        NavKey::ArrowUp => cell.row = cell.row.saturating_sub(1),
        NavKey::ArrowDown => cell.row = (cell.row + 1).min(last_row),
        NavKey::ArrowLeft => cell.col = cell.col.saturating_sub(1),
        NavKey::ArrowRight => cell.col = (cell.col + 1).min(bounds.max_col_index),
        NavKey::Home => cell.col = 0,
        NavKey::End => cell.col = bounds.max_col_index,
        NavKey::PageUp => cell.row = cell.row.saturating_sub(page_length),
        NavKey::PageDown => cell.row = cell.row.saturating_add(page_length).min(last_row),
    }

    (cell, cell != current)
}

/// Variant used when the row container owns focus: horizontal keys are ignored.
pub fn next_row_only(
    current: CellCoord,
    bounds: Bounds,
    key: NavKey,
    page_length: usize,
) -> (CellCoord, bool) {
    if !key.is_vertical() {
        return (current, false);
    }
    next(current, bounds, key, page_length)
}
