use std::collections::BTreeMap;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::state::aria;
use crate::state::config::RowSelectionPattern;
use crate::state::data_model::ColumnDescriptor;
use crate::state::edit_session::FocusTarget;
use crate::state::events::GridEvent;
use crate::state::grid_state::{CellContent, ColumnKind, GridState};
use crate::state::navigation::CellCoord;
use crate::state::selection::TriState;
use crate::state::sort::SortDirection;

const GRID_ROOT_ID: &str = "grid-root";

type FocusNodes = BTreeMap<FocusTarget, Rc<MountedData>>;

#[component]
pub fn Grid(grid: Signal<GridState>) -> Element {
    let mut nodes = use_signal(FocusNodes::new);

    // Runs after every render: hand pending focus requests to the element
    // that now exists for them, then acknowledge.
    use_effect(move || {
        let editing = grid.read().is_editing();
        let stale_editor = !editing
            && nodes
                .read()
                .keys()
                .any(|target| matches!(target, FocusTarget::Editor(_)));
        if stale_editor {
            nodes
                .write()
                .retain(|target, _| !matches!(target, FocusTarget::Editor(_)));
        }

        let Some(effect) = grid.read().pending_effect() else {
            return;
        };
        // Target not mounted yet; its onmounted write re-runs this effect.
        let Some(node) = nodes.read().get(&effect.target).cloned() else {
            return;
        };

        dispatch(grid, GridState::acknowledge_effect);
        spawn(async move {
            if let Err(err) = node.set_focus(true).await {
                tracing::warn!("focus request failed: {err:?}");
            }
            if effect.select_text {
                let _ = document::eval("document.activeElement?.select?.()");
            }
        });
    });

    let snapshot = grid.read().clone();
    let config = snapshot.config().clone();
    let columns: Vec<ColumnDescriptor> = snapshot.columns().cloned().collect();

    if columns.is_empty() {
        return rsx! {
            p { class: "empty-message", id: "empty-message", "No data loaded. Click \"Open\" to load a JSON file." }
        };
    }

    let bounds = snapshot.bounds();
    let active = snapshot.active_cell();
    let has_checkbox = config.has_checkbox_column();
    let roving = config.row_selection_pattern == RowSelectionPattern::AriaRoving;
    let aggregate = snapshot.aggregate_state();
    let any_filterable = columns.iter().any(|column| column.filterable);

    rsx! {
        div { class: "table-container", role: aria::application_role(&config),
            if any_filterable {
                div { class: "filter-bar", id: "filter-bar",
                    for (data_col, column) in columns.iter().enumerate() {
                        if column.filterable {
                            input {
                                class: "filter-input",
                                id: format!("filter-{data_col}"),
                                placeholder: format!("Filter {}", column.name),
                                aria_label: format!("Filter {}", column.name),
                                value: "{snapshot.filter_text(data_col)}",
                                oninput: move |evt: FormEvent| {
                                    dispatch(grid, |state| state.filter_input(data_col, evt.value()));
                                }
                            }
                        }
                    }
                }
            }
            div {
                id: GRID_ROOT_ID,
                class: "grid",
                role: aria::container_role(&config),
                tabindex: "-1",
                aria_rowcount: "{snapshot.row_count()}",
                onkeydown: move |evt: KeyboardEvent| {
                    let key = evt.key().to_string();
                    if dispatch(grid, |state| state.key_down(&key)) {
                        evt.prevent_default();
                    }
                },
                onmousedown: move |_| dispatch(grid, GridState::pointer_down),
                onfocus: move |_| {
                    dispatch(grid, |state| {
                        state.focus_enter();
                    });
                },
                div { role: "rowgroup", class: "grid-head",
                    div { role: aria::row_role(), class: "grid-row header-row",
                        if has_checkbox {
                            div { role: aria::header_role(), class: "grid-cell checkbox-cell",
                                input {
                                    r#type: "checkbox",
                                    id: "select-all",
                                    tabindex: "-1",
                                    aria_label: "Select all rows",
                                    aria_checked: tri_state_label(aggregate),
                                    checked: aggregate == TriState::Checked,
                                    onclick: move |_| dispatch(grid, GridState::toggle_all),
                                }
                            }
                        }
                        for (data_col, column) in columns.iter().enumerate() {
                            {header_cell(grid, column, data_col, snapshot.sort_direction(data_col))}
                        }
                    }
                }
                div { role: "rowgroup", class: "grid-body",
                    for view_row in 0..snapshot.row_count() {
                        div {
                            role: aria::row_role(),
                            class: row_class(view_row, snapshot.is_row_selected(view_row)),
                            id: format!("row-{view_row}"),
                            tabindex: aria::row_tabindex(&config, view_row, active).map(|index| index.to_string()),
                            aria_selected: aria::aria_selected(&config, snapshot.is_row_selected(view_row)),
                            aria_rowindex: "{view_row + 1}",
                            onmounted: move |evt: MountedEvent| {
                                nodes.write().insert(FocusTarget::Row(view_row), evt.data());
                            },
                            onclick: move |_| {
                                if roving {
                                    dispatch(grid, |state| state.click_row(view_row));
                                }
                            },
                            for col in 0..=bounds.max_col_index {
                                {render_cell(grid, nodes, &snapshot, CellCoord::new(col, view_row))}
                            }
                        }
                    }
                }
            }
        }
    }
}

fn header_cell(
    grid: Signal<GridState>,
    column: &ColumnDescriptor,
    data_col: usize,
    direction: SortDirection,
) -> Element {
    let name = column.name.clone();
    if !column.sortable {
        return rsx! {
            div { role: aria::header_role(), class: "grid-cell header-cell", "{name}" }
        };
    }

    let indicator = match direction {
        SortDirection::Ascending => " \u{25B2}",
        SortDirection::Descending => " \u{25BC}",
        SortDirection::None => "",
    };
    rsx! {
        div {
            role: aria::header_role(),
            class: "grid-cell header-cell sortable",
            aria_sort: aria::aria_sort(direction),
            button {
                class: "sort-btn",
                id: format!("sort-{data_col}"),
                tabindex: "-1",
                onclick: move |_| {
                    dispatch(grid, |state| state.activate_header(data_col));
                },
                "{name}{indicator}"
            }
        }
    }
}

fn render_cell(
    grid: Signal<GridState>,
    mut nodes: Signal<FocusNodes>,
    state: &GridState,
    coord: CellCoord,
) -> Element {
    let config = state.config();
    let active = state.active_cell();
    let data_col = match state.column_kind(coord.col) {
        Some(ColumnKind::Data(data_col)) => Some(data_col),
        _ => None,
    };
    let role = aria::cell_role(config, data_col);
    let roving = config.row_selection_pattern == RowSelectionPattern::AriaRoving;
    let id = format!("cell-{}-{}", coord.row, coord.col);

    if coord == active && state.is_editing() {
        let draft = state.draft().unwrap_or_default().to_string();
        let generation = state.edit_generation();
        return rsx! {
            div { role, class: "grid-cell editing-cell", id,
                input {
                    class: "cell-input",
                    id: format!("cell-input-{}-{}", coord.row, coord.col),
                    value: "{draft}",
                    onmounted: move |evt: MountedEvent| {
                        nodes.write().insert(FocusTarget::Editor(coord), evt.data());
                    },
                    onclick: move |evt| evt.stop_propagation(),
                    oninput: move |evt: FormEvent| {
                        dispatch(grid, |state| state.edit_input(evt.value()));
                    },
                    onblur: move |_| {
                        spawn(async move {
                            let inside = focus_inside_grid().await;
                            dispatch(grid, |state| state.editor_blur(generation, inside));
                        });
                    }
                }
            }
        };
    }

    let tabindex = aria::cell_tabindex(config, coord, active);
    let class = if coord == active {
        "grid-cell active-cell"
    } else {
        "grid-cell"
    };
    let body = match state.cell_content(coord) {
        Some(CellContent::Text(text)) => rsx! { "{text}" },
        Some(CellContent::Checkbox(selected)) => rsx! {
            input { r#type: "checkbox", tabindex: "-1", aria_label: "Select row", checked: selected }
        },
        Some(CellContent::Actions { editing }) => {
            actions_control(grid, config.simple_editable && coord.row == active.row, editing)
        }
        None => rsx! {},
    };

    rsx! {
        div {
            role,
            class,
            id,
            tabindex: "{tabindex}",
            aria_colindex: "{coord.col + 1}",
            onmounted: move |evt: MountedEvent| {
                nodes.write().insert(FocusTarget::Cell(coord), evt.data());
            },
            onclick: move |_| {
                // Rows take the click under the roving pattern.
                if !roving {
                    dispatch(grid, |state| state.click_cell(coord));
                }
            },
            {body}
        }
    }
}

/// Edit/save/cancel controls of the simple editing mode, shown on the active row.
fn actions_control(grid: Signal<GridState>, enabled: bool, editing: bool) -> Element {
    if !enabled {
        return rsx! { span { class: "actions-placeholder" } };
    }

    if editing {
        rsx! {
            button {
                class: "cell-btn",
                onclick: move |evt| {
                    evt.stop_propagation();
                    dispatch(grid, GridState::simple_save);
                },
                "Save"
            }
            button {
                class: "cell-btn",
                onclick: move |evt| {
                    evt.stop_propagation();
                    dispatch(grid, GridState::simple_cancel);
                },
                "Cancel"
            }
        }
    } else {
        rsx! {
            button {
                class: "cell-btn",
                onclick: move |evt| {
                    evt.stop_propagation();
                    dispatch(grid, GridState::simple_edit);
                },
                "Edit"
            }
        }
    }
}

/// Runs one host event through the grid and applies whatever it emitted.
fn dispatch<R>(mut grid: Signal<GridState>, action: impl FnOnce(&mut GridState) -> R) -> R {
    let result = grid.with_mut(action);
    let events = grid.with_mut(GridState::take_events);
    for event in events {
        match event {
            GridEvent::EditCell(edit) => {
                grid.with_mut(|state| state.apply_edit(&edit));
            }
            GridEvent::Filter(set) => {
                tracing::info!(columns = set.len(), "filter set changed");
            }
            GridEvent::RowSelect { row, selected } => {
                tracing::debug!(row = row.raw(), selected, "row selection changed");
            }
        }
    }
    result
}

async fn focus_inside_grid() -> bool {
    let script = format!(
        "return document.getElementById('{GRID_ROOT_ID}')?.contains(document.activeElement) ?? false;"
    );
    document::eval(&script).join::<bool>().await.unwrap_or(false)
}

fn tri_state_label(state: TriState) -> &'static str {
    match state {
        TriState::Unchecked => "false",
        TriState::Checked => "true",
        TriState::Indeterminate => "mixed",
    }
}

fn row_class(view_row: usize, selected: bool) -> String {
    let parity = if view_row % 2 == 0 { "even" } else { "odd" };
    if selected {
        format!("grid-row {parity} selected-row")
    } else {
        format!("grid-row {parity}")
    }
}
