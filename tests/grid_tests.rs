use tramline::{
    playback::{DEFAULT_SLOT_MINUTES, TimeGrid},
    schedule::SimWindow,
    shared::time::Time,
};

fn window(start: (u32, u32), end: (u32, u32)) -> SimWindow {
    SimWindow::new(Time::from_hm(start.0, start.1), Time::from_hm(end.0, end.1)).unwrap()
}

fn minutes(grid: &TimeGrid) -> Vec<u32> {
    grid.times().iter().map(Time::as_minutes).collect()
}

#[test]
fn slot_divides_window() {
    let grid = TimeGrid::new(&window((8, 0), (8, 30)), 15);
    assert_eq!(minutes(&grid), vec![480, 495, 510]);
}

#[test]
fn end_is_appended_once() {
    let grid = TimeGrid::new(&window((8, 0), (8, 20)), 15);
    assert_eq!(minutes(&grid), vec![480, 495, 500]);
}

#[test]
fn non_positive_slot_uses_default() {
    for slot in [0, -5] {
        let grid = TimeGrid::new(&window((8, 0), (9, 0)), slot);
        assert_eq!(grid.slot().as_minutes(), DEFAULT_SLOT_MINUTES);
        assert_eq!(minutes(&grid), vec![480, 495, 510, 525, 540]);
    }
}

#[test]
fn zero_length_window_has_one_label() {
    let grid = TimeGrid::new(&window((8, 0), (8, 0)), 5);
    assert_eq!(grid.labels(), vec!["08:00"]);
    assert!(grid.slot_labels().is_empty());
}

#[test]
fn slot_larger_than_window() {
    let grid = TimeGrid::new(&window((8, 0), (8, 10)), 60);
    assert_eq!(minutes(&grid), vec![480, 490]);
}

#[test]
fn grid_reaches_midnight() {
    let grid = TimeGrid::new(&SimWindow::from_hours(23, 24).unwrap(), 30);
    assert_eq!(grid.labels(), vec!["23:00", "23:30", "24:00"]);
}

#[test]
fn labels_and_slot_labels() {
    let grid = TimeGrid::new(&window((8, 0), (8, 20)), 10);
    assert_eq!(grid.labels(), vec!["08:00", "08:10", "08:20"]);
    assert_eq!(grid.slot_labels(), vec!["08:00-08:10", "08:10-08:20"]);
    assert_eq!(grid.len(), 3);
}
