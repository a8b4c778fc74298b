use serde::{Deserialize, Serialize};

pub type Row = Vec<String>;
pub type TableData = Vec<Row>;

/// Synthetic identity of a row, assigned when the row enters the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(u64);

impl RowId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Synthetic identity of a column descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnId(u64);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub filterable: bool,
    #[serde(default)]
    pub actions_column: bool,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sortable: false,
            filterable: false,
            actions_column: false,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn actions(mut self) -> Self {
        self.actions_column = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowRecord {
    pub id: RowId,
    pub cells: Row,
}

impl RowRecord {
    pub fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnRecord {
    pub id: ColumnId,
    pub descriptor: ColumnDescriptor,
}

/// Hands out identifiers that are never reused for the lifetime of a grid.
#[derive(Clone, Debug, Default)]
pub struct IdArena {
    next: u64,
}

impl IdArena {
    pub fn row_records(&mut self, data: TableData) -> Vec<RowRecord> {
        data.into_iter()
            .map(|cells| RowRecord {
                id: RowId(self.bump()),
                cells,
            })
            .collect()
    }

    pub fn column_records(&mut self, columns: Vec<ColumnDescriptor>) -> Vec<ColumnRecord> {
        columns
            .into_iter()
            .map(|descriptor| ColumnRecord {
                id: ColumnId(self.bump()),
                descriptor,
            })
            .collect()
    }

    fn bump(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Names columns for data loaded without descriptors: `Column 1`, `Column 2`, ...
pub fn default_columns(data: &TableData) -> Vec<ColumnDescriptor> {
    let width = data.iter().map(Vec::len).max().unwrap_or(0);
    (1..=width)
        .map(|n| ColumnDescriptor::new(format!("Column {n}")).sortable().filterable())
        .collect()
}

/// Formats a JSON value for display in a table cell.
pub fn display_value(value: &serde_json::Value) -> String {
    use serde_json::Value;

    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
