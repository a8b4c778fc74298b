use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridType {
    #[default]
    Grid,
    Table,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowSelectionPattern {
    #[default]
    None,
    Checkbox,
    AriaRoving,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    pub editable: bool,
    pub edit_on_click: bool,
    /// Editing through explicit edit/save/cancel controls instead of clicks.
    pub simple_editable: bool,
    pub page_length: usize,
    pub title_column: usize,
    pub grid_type: GridType,
    pub row_selection_pattern: RowSelectionPattern,
    pub use_application_role: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            editable: true,
            edit_on_click: false,
            simple_editable: false,
            page_length: 30,
            title_column: 0,
            grid_type: GridType::Grid,
            row_selection_pattern: RowSelectionPattern::None,
            use_application_role: false,
        }
    }
}

impl GridConfig {
    pub fn has_checkbox_column(&self) -> bool {
        self.row_selection_pattern == RowSelectionPattern::Checkbox
    }

    pub fn checkbox_offset(&self) -> usize {
        usize::from(self.has_checkbox_column())
    }

    pub fn can_edit(&self) -> bool {
        self.editable || self.simple_editable
    }

    pub fn effective_page_length(&self) -> usize {
        self.page_length.max(1)
    }
}
