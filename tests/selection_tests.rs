use datagrid::state::data_model::{IdArena, RowId};
use datagrid::state::selection::{SelectionTracker, TriState};

fn row_ids(count: usize) -> Vec<RowId> {
    let mut arena = IdArena::default();
    arena
        .row_records(vec![Vec::new(); count])
        .into_iter()
        .map(|row| row.id)
        .collect()
}

#[test]
fn test_set_row_selected_adjusts_count() {
    let ids = row_ids(3);
    let mut tracker = SelectionTracker::new(ids.clone());

    assert!(tracker.set_row_selected(ids[0], true));
    assert!(tracker.set_row_selected(ids[2], true));
    assert_eq!(tracker.selected_count(), 2);

    assert!(tracker.set_row_selected(ids[0], false));
    assert_eq!(tracker.selected_count(), 1);
    assert!(!tracker.is_selected(ids[0]));
    assert!(tracker.is_selected(ids[2]));
}

#[test]
fn test_setting_same_value_twice_counts_once() {
    let ids = row_ids(2);
    let mut tracker = SelectionTracker::new(ids.clone());

    assert!(tracker.set_row_selected(ids[1], true));
    assert!(!tracker.set_row_selected(ids[1], true));
    assert_eq!(tracker.selected_count(), 1);

    assert!(!tracker.set_row_selected(ids[0], false));
    assert_eq!(tracker.selected_count(), 1);
}

#[test]
fn test_aggregate_state_tri_state() {
    let ids = row_ids(4);
    let mut tracker = SelectionTracker::new(ids.clone());
    assert_eq!(tracker.aggregate_state(), TriState::Unchecked);

    tracker.select_all(true);
    assert_eq!(tracker.aggregate_state(), TriState::Checked);
    assert_eq!(tracker.selected_count(), 4);

    tracker.set_row_selected(ids[1], false);
    assert_eq!(tracker.aggregate_state(), TriState::Indeterminate);

    tracker.select_all(false);
    assert_eq!(tracker.aggregate_state(), TriState::Unchecked);
    assert_eq!(tracker.selected_count(), 0);
}

#[test]
fn test_select_all_reports_only_changed_rows() {
    let ids = row_ids(3);
    let mut tracker = SelectionTracker::new(ids.clone());
    tracker.set_row_selected(ids[0], true);

    let changed = tracker.select_all(true);
    assert_eq!(changed, vec![ids[1], ids[2]]);
    assert!(tracker.select_all(true).is_empty());
}

#[test]
fn test_unknown_row_is_ignored() {
    let ids = row_ids(2);
    let mut tracker = SelectionTracker::new(ids[..1].to_vec());

    assert!(!tracker.set_row_selected(ids[1], true));
    assert_eq!(tracker.selected_count(), 0);
}

#[test]
fn test_rebuild_drops_previous_selection() {
    let ids = row_ids(4);
    let mut tracker = SelectionTracker::new(ids[..2].to_vec());
    tracker.select_all(true);

    tracker.rebuild(ids[2..].to_vec());
    assert_eq!(tracker.selected_count(), 0);
    assert!(!tracker.is_selected(ids[0]));
    assert!(tracker.selected_rows().is_empty());
}

#[test]
fn test_empty_tracker_is_unchecked() {
    let tracker = SelectionTracker::new(Vec::new());
    assert_eq!(tracker.aggregate_state(), TriState::Unchecked);
}
