use datagrid::io::grid_io::{self, GridIoError};
use datagrid::io::json_io::{self, JsonIoError, JsonShape, JsonTable};
use datagrid::state::config::RowSelectionPattern;
use datagrid::state::data_model::ColumnDescriptor;
use datagrid::state::events::GridEvent;
use datagrid::state::navigation::CellCoord;

#[test]
fn test_load_json_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.json");
    std::fs::write(&path, r#"[["Alice", 30], ["Bob", null, true]]"#).unwrap();

    let table = json_io::load_json(&path).unwrap();
    assert_eq!(
        table,
        JsonTable::Rows(vec![
            vec!["Alice".to_string(), "30".to_string()],
            vec!["Bob".to_string(), String::new(), "true".to_string()],
        ])
    );
}

#[test]
fn test_load_json_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    std::fs::write(&path, r#"[{"name":"Alice","age":30},{"name":"Bob"}]"#).unwrap();

    let JsonTable::Records(records) = json_io::load_json(&path).unwrap() else {
        panic!("expected records");
    };
    assert_eq!(json_io::derive_columns(&records), vec!["age", "name"]);

    let names = vec!["name".to_string(), "age".to_string()];
    assert_eq!(
        json_io::project_records(&records, &names),
        vec![
            vec!["Alice".to_string(), "30".to_string()],
            vec!["Bob".to_string(), String::new()],
        ]
    );
}

#[test]
fn test_load_json_not_array() {
    let err = json_io::parse_json(r#"{"key": "value"}"#).unwrap_err();
    assert!(matches!(err, JsonIoError::NotAnArray));
}

#[test]
fn test_load_json_mixed_rows() {
    let err = json_io::parse_json(r#"[["a"], {"b": 1}]"#).unwrap_err();
    assert!(matches!(err, JsonIoError::MixedRows));

    let err = json_io::parse_json("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, JsonIoError::MixedRows));
}

#[test]
fn test_load_json_invalid_json() {
    let err = json_io::parse_json("not json at all").unwrap_err();
    assert!(matches!(err, JsonIoError::Parse(_)));
}

#[test]
fn test_load_json_file_not_found() {
    let path = std::path::Path::new("/nonexistent/path/file.json");
    let err = json_io::load_json(path).unwrap_err();
    assert!(matches!(err, JsonIoError::Io(_)));
}

#[test]
fn test_load_grid_without_sidecar_derives_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.json");
    std::fs::write(&path, r#"[["b", "1"], ["a", "2", "x"]]"#).unwrap();

    let loaded = grid_io::load_grid(&path).unwrap();
    assert_eq!(loaded.shape, JsonShape::Rows);
    assert_eq!(loaded.columns.len(), 3);
    assert_eq!(loaded.columns[0].name, "Column 1");
    assert!(loaded.columns.iter().all(|c| c.sortable && c.filterable));
    assert_eq!(loaded.config.page_length, 30);
}

#[test]
fn test_load_grid_uses_sidecar_columns_and_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.json");
    std::fs::write(&path, r#"[{"name":"Bob","city":"Oslo"},{"name":"Alice","city":"Bergen"}]"#)
        .unwrap();
    std::fs::write(
        grid_io::sidecar_path_for_json(&path),
        r#"{
            "config": {"rowSelectionPattern": "checkbox", "pageLength": 5},
            "columns": [
                {"name": "city", "sortable": true},
                {"name": "name", "filterable": true},
                {"name": "edit", "actionsColumn": true}
            ]
        }"#,
    )
    .unwrap();

    let loaded = grid_io::load_grid(&path).unwrap();
    assert_eq!(loaded.shape, JsonShape::Records);
    assert_eq!(loaded.config.row_selection_pattern, RowSelectionPattern::Checkbox);
    assert_eq!(loaded.config.page_length, 5);
    assert_eq!(
        loaded.columns[2],
        ColumnDescriptor::new("edit").actions()
    );
    assert_eq!(loaded.data[0], vec!["Oslo", "Bob", ""]);

    let mut state = loaded.into_state();
    assert_eq!(state.bounds().max_col_index, 3);
    assert!(state.activate_header(0));
    assert_eq!(state.view_row(0).unwrap().cells[1], "Alice");
    assert!(!state.activate_header(1));
    state.filter_input(1, "bo");
    assert_eq!(state.take_events().len(), 1);
}

#[test]
fn test_load_grid_bad_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "[]").unwrap();
    std::fs::write(grid_io::sidecar_path_for_json(&path), "{ nope").unwrap();

    let err = grid_io::load_grid(&path).unwrap_err();
    assert!(matches!(err, GridIoError::Parse(_)));
}

#[test]
fn test_save_grid_writes_edits_in_original_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.json");
    std::fs::write(&path, r#"[{"name":"Bob","city":"Oslo"}]"#).unwrap();

    let loaded = grid_io::load_grid(&path).unwrap();
    let shape = loaded.shape;
    let mut state = loaded.into_state();

    // Records columns are derived sorted: city, name.
    state.click_cell(CellCoord::new(1, 0));
    state.click_cell(CellCoord::new(1, 0));
    state.edit_input("Robert");
    state.key_down("Enter");
    for event in state.take_events() {
        if let GridEvent::EditCell(edit) = event {
            assert!(state.apply_edit(&edit));
        }
    }

    grid_io::save_grid(&path, shape, &state).unwrap();
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, serde_json::json!([{"city": "Oslo", "name": "Robert"}]));
}

#[test]
fn test_save_grid_skips_actions_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.json");

    let state = datagrid::state::grid_state::GridState::from_table(
        Default::default(),
        vec![
            ColumnDescriptor::new("a"),
            ColumnDescriptor::new("edit").actions(),
            ColumnDescriptor::new("b"),
        ],
        vec![vec!["1".to_string(), String::new(), "2".to_string()]],
    );

    grid_io::save_grid(&path, JsonShape::Rows, &state).unwrap();
    let table = json_io::load_json(&path).unwrap();
    assert_eq!(
        table,
        JsonTable::Rows(vec![vec!["1".to_string(), "2".to_string()]])
    );
}
