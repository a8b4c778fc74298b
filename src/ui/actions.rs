use dioxus::prelude::*;
use std::path::PathBuf;

use crate::io::grid_io;
use crate::io::json_io::JsonShape;
use crate::state::grid_state::GridState;

pub fn load_into(
    path: PathBuf,
    mut grid: Signal<GridState>,
    mut file_path: Signal<Option<PathBuf>>,
    mut shape: Signal<JsonShape>,
    mut error_message: Signal<Option<String>>,
) {
    match grid_io::load_grid(&path) {
        Ok(loaded) => {
            shape.set(loaded.shape);
            grid.set(loaded.into_state());
            file_path.set(Some(path));
            error_message.set(None);
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to open grid");
            error_message.set(Some(err.to_string()));
        }
    }
}

pub async fn open_file(
    grid: Signal<GridState>,
    file_path: Signal<Option<PathBuf>>,
    shape: Signal<JsonShape>,
    error_message: Signal<Option<String>>,
) {
    let task = rfd::AsyncFileDialog::new()
        .add_filter("JSON", &["json"])
        .pick_file()
        .await;

    if let Some(handle) = task {
        load_into(
            handle.path().to_path_buf(),
            grid,
            file_path,
            shape,
            error_message,
        );
    }
}

pub fn save_file(
    grid: Signal<GridState>,
    file_path: Signal<Option<PathBuf>>,
    shape: Signal<JsonShape>,
    mut error_message: Signal<Option<String>>,
) -> bool {
    let path = {
        let read = file_path.read();
        let Some(path) = read.as_ref() else {
            return false;
        };
        path.clone()
    };

    if let Err(err) = grid_io::save_grid(&path, *shape.read(), &grid.read()) {
        tracing::warn!(path = %path.display(), error = %err, "failed to save grid");
        error_message.set(Some(err.to_string()));
        return false;
    }

    error_message.set(None);
    true
}
