use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::io::json_io::{self, JsonIoError, JsonShape, JsonTable};
use crate::state::config::GridConfig;
use crate::state::data_model::{self, ColumnDescriptor, TableData};
use crate::state::grid_state::GridState;

#[derive(Debug)]
pub enum GridIoError {
    Json(JsonIoError),
    Io(io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for GridIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::Parse(err) => write!(f, "Grid settings parse error: {err}"),
        }
    }
}

impl std::error::Error for GridIoError {}

impl From<JsonIoError> for GridIoError {
    fn from(value: JsonIoError) -> Self {
        Self::Json(value)
    }
}

impl From<io::Error> for GridIoError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for GridIoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

pub fn sidecar_path_for_json(json_path: &Path) -> PathBuf {
    let mut os: OsString = json_path.as_os_str().to_os_string();
    os.push(".grid");
    PathBuf::from(os)
}

/// On-disk format for `.grid` sidecar files.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GridFile {
    #[serde(default)]
    pub config: GridConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnDescriptor>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadedGrid {
    pub config: GridConfig,
    pub columns: Vec<ColumnDescriptor>,
    pub data: TableData,
    pub shape: JsonShape,
}

impl LoadedGrid {
    pub fn into_state(self) -> GridState {
        GridState::from_table(self.config, self.columns, self.data)
    }
}

pub fn load_sidecar(json_path: &Path) -> Result<GridFile, GridIoError> {
    let path = sidecar_path_for_json(json_path);
    if !path.exists() {
        return Ok(GridFile::default());
    }

    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Loads a data file plus its sidecar. Without declared columns, object keys
/// (or `Column N` names for plain rows) become sortable, filterable columns.
pub fn load_grid(json_path: &Path) -> Result<LoadedGrid, GridIoError> {
    let table = json_io::load_json(json_path)?;
    let sidecar = load_sidecar(json_path)?;
    let shape = table.shape();

    let (columns, data) = match table {
        JsonTable::Rows(data) => {
            let columns = if sidecar.columns.is_empty() {
                data_model::default_columns(&data)
            } else {
                sidecar.columns
            };
            (columns, data)
        }
        JsonTable::Records(records) => {
            let columns = if sidecar.columns.is_empty() {
                json_io::derive_columns(&records)
                    .into_iter()
                    .map(|name| ColumnDescriptor::new(name).sortable().filterable())
                    .collect()
            } else {
                sidecar.columns
            };
            let names: Vec<String> = columns.iter().map(|column| column.name.clone()).collect();
            (columns, json_io::project_records(&records, &names))
        }
    };

    debug!(path = %json_path.display(), rows = data.len(), columns = columns.len(), "grid loaded");
    Ok(LoadedGrid {
        config: sidecar.config,
        columns,
        data,
        shape,
    })
}

/// Writes the grid's data back in `shape`. Actions columns hold no data and
/// are left out.
pub fn save_grid(json_path: &Path, shape: JsonShape, state: &GridState) -> Result<(), GridIoError> {
    let keep: Vec<usize> = state
        .columns()
        .enumerate()
        .filter(|(_, column)| !column.actions_column)
        .map(|(index, _)| index)
        .collect();
    let names: Vec<String> = keep
        .iter()
        .filter_map(|&index| state.column(index).map(|column| column.name.clone()))
        .collect();
    let data: TableData = state
        .data()
        .into_iter()
        .map(|row| {
            keep.iter()
                .map(|&index| row.get(index).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    json_io::save_json(json_path, shape, &names, &data)?;
    debug!(path = %json_path.display(), rows = data.len(), "grid saved");
    Ok(())
}
