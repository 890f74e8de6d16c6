pub mod geo;
pub mod time;

pub use geo::*;
pub use time::*;

use std::cmp::Ordering;

pub trait Identifiable {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

/// Display order for identifiers: numeric ids first by value, then the rest lexicographically.
/// Ids with the same value, like `007` and `7`, fall back to their text.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    id_key(a).cmp(&id_key(b)).then_with(|| a.cmp(b))
}

fn id_key(id: &str) -> (bool, u64) {
    match id.parse::<u64>() {
        Ok(value) => (false, value),
        Err(_) => (true, 0),
    }
}

#[test]
fn compare_ids_numeric() {
    assert_eq!(compare_ids("2", "10"), Ordering::Less);
    assert_eq!(compare_ids("10", "10"), Ordering::Equal);
}

#[test]
fn compare_ids_lexicographic() {
    assert_eq!(compare_ids("b", "a"), Ordering::Greater);
    assert_eq!(compare_ids("10", "a"), Ordering::Less);
}

#[test]
fn compare_ids_mixed_is_transitive() {
    assert_eq!(compare_ids("9", "10"), Ordering::Less);
    assert_eq!(compare_ids("10", "1a"), Ordering::Less);
    assert_eq!(compare_ids("9", "1a"), Ordering::Less);
    assert_eq!(compare_ids("1a", "9"), Ordering::Greater);
}

#[test]
fn compare_ids_leading_zeros() {
    assert_eq!(compare_ids("007", "7"), Ordering::Less);
    assert_eq!(compare_ids("7", "007"), Ordering::Greater);
    assert_eq!(compare_ids("007", "8"), Ordering::Less);
}
