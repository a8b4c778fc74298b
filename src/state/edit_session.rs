//! Active-cell tracking and the edit-mode state machine.
//!
//! Focus can only be applied once the host has rendered the element that
//! should receive it, so transitions never touch focus directly. They raise a
//! pending request instead, which the host reads with
//! [`EditSession::pending_effect`] after its render settles and clears with
//! [`EditSession::acknowledge_effect`].

use crate::state::config::GridConfig;
use crate::state::navigation::CellCoord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FocusTarget {
    /// The non-editing cell element.
    Cell(CellCoord),
    /// The editor element inside the cell.
    Editor(CellCoord),
    /// The row container, under the roving row pattern.
    Row(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusEffect {
    pub target: FocusTarget,
    /// Select all text in the target after focusing it.
    pub select_text: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditSession {
    active_cell: CellCoord,
    editing: bool,
    pending_focus: bool,
    pending_text_select: bool,
    // Set by cancel, consumed by the next commit attempt.
    suppress_save: bool,
    // Bumped each time an editor opens.
    generation: u64,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_cell(&self) -> CellCoord {
        self.active_cell
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_save_suppressed(&self) -> bool {
        self.suppress_save
    }

    /// Identifies the most recently opened editor. Host callbacks that outlive
    /// their editor carry the generation it was opened with.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn move_active_cell(&mut self, next: CellCoord) -> bool {
        if next == self.active_cell {
            return false;
        }
        self.active_cell = next;
        self.pending_focus = true;
        true
    }

    /// Requests focus on the active cell without moving it.
    pub fn request_focus(&mut self) {
        self.pending_focus = true;
    }

    pub fn enter_edit(&mut self, with_focus: bool, config: &GridConfig) -> bool {
        if !config.can_edit() {
            return false;
        }
        self.editing = true;
        self.suppress_save = false;
        self.generation = self.generation.wrapping_add(1);
        self.pending_focus = with_focus;
        self.pending_text_select = with_focus;
        true
    }

    pub fn exit_edit(&mut self, with_focus: bool) {
        self.editing = false;
        self.pending_focus = with_focus;
        self.pending_text_select = false;
    }

    /// Returns the cell and value to emit, or `None` when a cancel swallowed it.
    pub fn commit(&mut self, value: String) -> Option<(CellCoord, String)> {
        if self.suppress_save {
            self.suppress_save = false;
            return None;
        }
        Some((self.active_cell, value))
    }

    pub fn cancel(&mut self) {
        self.suppress_save = true;
        self.exit_edit(true);
    }

    pub fn pending_effect(&self) -> Option<FocusEffect> {
        if !self.pending_focus {
            return None;
        }

        let target = if self.editing {
            FocusTarget::Editor(self.active_cell)
        } else {
            FocusTarget::Cell(self.active_cell)
        };
        Some(FocusEffect {
            target,
            select_text: self.pending_text_select,
        })
    }

    /// Clears the pending request. Returns false when nothing was pending.
    pub fn acknowledge_effect(&mut self) -> bool {
        let had_effect = self.pending_focus;
        self.pending_focus = false;
        self.pending_text_select = false;
        had_effect
    }

    /// Places the active cell without raising a focus request.
    pub(crate) fn place_active_cell(&mut self, cell: CellCoord) {
        self.active_cell = cell;
    }
}
