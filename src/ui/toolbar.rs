use dioxus::prelude::*;
use std::path::PathBuf;

use crate::io::json_io::JsonShape;
use crate::state::grid_state::GridState;
use crate::ui::actions;

#[component]
pub fn Toolbar(
    grid: Signal<GridState>,
    file_path: Signal<Option<PathBuf>>,
    shape: Signal<JsonShape>,
    error_message: Signal<Option<String>>,
    save_success: Signal<bool>,
) -> Element {
    let (selected, rows) = {
        let state = grid.read();
        (state.selected_count(), state.row_count())
    };

    rsx! {
        div { class: "toolbar",
            div { class: "toolbar-group",
                button {
                    class: "toolbar-btn",
                    id: "btn-open",
                    onclick: move |_| {
                        spawn(async move {
                            actions::open_file(grid, file_path, shape, error_message).await;
                        });
                    },
                    "Open"
                }
                button {
                    class: "toolbar-btn",
                    id: "btn-save",
                    disabled: file_path.read().is_none(),
                    onclick: move |_| {
                        let success = actions::save_file(grid, file_path, shape, error_message);
                        if success {
                            save_success.set(true);
                            spawn(async move {
                                tokio::time::sleep(std::time::Duration::from_secs(2)).await;
                                save_success.set(false);
                            });
                        }
                    },
                    "Save"
                }
                if *save_success.read() {
                    span { class: "save-success", "Saved" }
                }
            }

            div { class: "toolbar-info",
                span { class: "toolbar-label", id: "label-selection", "{selected} of {rows} selected" }
                if let Some(path) = file_path.read().as_ref() {
                    span { class: "file-path", "{path.display()}" }
                }
                if let Some(err) = error_message.read().as_ref() {
                    span { class: "error-message", role: "alert", "{err}" }
                }
            }
        }
    }
}
