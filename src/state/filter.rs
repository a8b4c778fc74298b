use std::collections::BTreeMap;

use crate::state::data_model::{ColumnId, ColumnRecord};

/// Column index to the raw filter text typed for it.
pub type FilterSet = BTreeMap<usize, String>;

/// Keeps whatever was typed into each column's filter input, verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterRegistry {
    texts: BTreeMap<ColumnId, String>,
}

impl FilterRegistry {
    pub fn set_text(&mut self, column: ColumnId, text: impl Into<String>) {
        self.texts.insert(column, text.into());
    }

    pub fn text(&self, column: ColumnId) -> &str {
        self.texts.get(&column).map(String::as_str).unwrap_or("")
    }

    /// Forgets text for columns that are no longer present.
    pub fn retain_columns(&mut self, columns: &[ColumnRecord]) {
        self.texts
            .retain(|id, _| columns.iter().any(|column| column.id == *id));
    }

    /// Filterable columns with non-blank text; the text is emitted untrimmed.
    pub fn filter_set(&self, columns: &[ColumnRecord]) -> FilterSet {
        columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.descriptor.filterable)
            .filter_map(|(index, column)| {
                let text = self.texts.get(&column.id)?;
                (!text.trim().is_empty()).then(|| (index, text.clone()))
            })
            .collect()
    }
}
