use crate::state::data_model::RowId;
use crate::state::filter::FilterSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellEdit {
    /// Data column index, without the checkbox offset.
    pub column: usize,
    /// Row position in the sorted view at commit time.
    pub row: usize,
    pub row_id: RowId,
    pub value: String,
}

/// Messages produced for the host, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridEvent {
    Filter(FilterSet),
    RowSelect { row: RowId, selected: bool },
    EditCell(CellEdit),
}
