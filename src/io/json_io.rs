use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use crate::state::data_model::{self, Row, TableData};

pub type Record = BTreeMap<String, Value>;

/// The two layouts a data file may use.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonTable {
    /// `[["a", "b"], ...]`
    Rows(TableData),
    /// `[{"name": "a"}, ...]`
    Records(Vec<Record>),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JsonShape {
    #[default]
    Rows,
    Records,
}

impl JsonTable {
    pub fn shape(&self) -> JsonShape {
        match self {
            JsonTable::Rows(_) => JsonShape::Rows,
            JsonTable::Records(_) => JsonShape::Records,
        }
    }
}

#[derive(Debug)]
pub enum JsonIoError {
    Io(io::Error),
    Parse(serde_json::Error),
    NotAnArray,
    MixedRows,
}

impl std::fmt::Display for JsonIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonIoError::Io(e) => write!(f, "IO error: {e}"),
            JsonIoError::Parse(e) => write!(f, "JSON parse error: {e}"),
            JsonIoError::NotAnArray => write!(f, "JSON root is not an array"),
            JsonIoError::MixedRows => {
                write!(f, "JSON rows must be all arrays or all objects")
            }
        }
    }
}

impl std::error::Error for JsonIoError {}

impl From<io::Error> for JsonIoError {
    fn from(e: io::Error) -> Self {
        JsonIoError::Io(e)
    }
}

impl From<serde_json::Error> for JsonIoError {
    fn from(e: serde_json::Error) -> Self {
        JsonIoError::Parse(e)
    }
}

pub fn load_json(path: &Path) -> Result<JsonTable, JsonIoError> {
    let content = fs::read_to_string(path)?;
    parse_json(&content)
}

pub fn parse_json(content: &str) -> Result<JsonTable, JsonIoError> {
    let Value::Array(items) = serde_json::from_str(content)? else {
        return Err(JsonIoError::NotAnArray);
    };

    if items.iter().all(Value::is_array) {
        let rows = items
            .into_iter()
            .map(|item| match item {
                Value::Array(cells) => cells.iter().map(data_model::display_value).collect(),
                _ => Row::new(),
            })
            .collect();
        return Ok(JsonTable::Rows(rows));
    }

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(map) => records.push(map.into_iter().collect()),
            _ => return Err(JsonIoError::MixedRows),
        }
    }
    Ok(JsonTable::Records(records))
}

/// Returns the sorted union of all keys across all records.
pub fn derive_columns(records: &[Record]) -> Vec<String> {
    let mut cols = BTreeSet::new();
    for record in records {
        for key in record.keys() {
            cols.insert(key.clone());
        }
    }
    cols.into_iter().collect()
}

/// Lays records out as rows in `names` order; missing keys become empty cells.
pub fn project_records(records: &[Record], names: &[String]) -> TableData {
    records
        .iter()
        .map(|record| {
            names
                .iter()
                .map(|name| record.get(name).map(data_model::display_value).unwrap_or_default())
                .collect()
        })
        .collect()
}

pub fn to_json_value(shape: JsonShape, names: &[String], data: &[Row]) -> Value {
    let rows = data.iter().map(|row| match shape {
        JsonShape::Rows => Value::Array(row.iter().cloned().map(Value::String).collect()),
        JsonShape::Records => {
            let map: serde_json::Map<String, Value> = names
                .iter()
                .zip(row.iter())
                .map(|(name, cell)| (name.clone(), Value::String(cell.clone())))
                .collect();
            Value::Object(map)
        }
    });
    Value::Array(rows.collect())
}

pub fn save_json(
    path: &Path,
    shape: JsonShape,
    names: &[String],
    data: &[Row],
) -> Result<(), JsonIoError> {
    let json = serde_json::to_string_pretty(&to_json_value(shape, names, data))?;
    super::atomic_write_string(path, &json)?;
    Ok(())
}
