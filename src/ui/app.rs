use dioxus::prelude::*;
use std::path::PathBuf;

use crate::io::json_io::JsonShape;
use crate::state::grid_state::GridState;
use crate::ui::actions;
use crate::ui::grid::Grid;
use crate::ui::toolbar::Toolbar;

const STYLES: Asset = asset!("/assets/styles.css");

#[component]
pub fn App() -> Element {
    let grid = use_signal(GridState::default);
    let file_path = use_signal::<Option<PathBuf>>(|| None);
    let shape = use_signal(JsonShape::default);
    let error_message = use_signal::<Option<String>>(|| None);
    let save_success = use_signal(|| false);

    use_effect(move || {
        if let Ok(path) = std::env::var("DATAGRID_OPEN") {
            actions::load_into(PathBuf::from(path), grid, file_path, shape, error_message);
        }
    });

    rsx! {
        document::Stylesheet { href: STYLES }
        div { class: "app",
            Toolbar { grid, file_path, shape, error_message, save_success }
            Grid { grid }
        }
    }
}
