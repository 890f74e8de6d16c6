use tracing::warn;

use crate::{
    schedule::SimWindow,
    shared::time::{Duration, MINUTES_PER_DAY, Time},
};

pub const DEFAULT_SLOT_MINUTES: u32 = 15;

/// The discrete time labels of a simulation window.
///
/// Runs from the window start in slot sized steps and always ends on the window end, which is
/// appended when the slot size does not divide the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    times: Vec<Time>,
    slot: Duration,
}

impl TimeGrid {
    /// A slot size of zero or less falls back to [`DEFAULT_SLOT_MINUTES`].
    pub fn new(window: &SimWindow, slot_minutes: i64) -> Self {
        let slot_minutes = if slot_minutes <= 0 {
            warn!("Slot size {slot_minutes} is not positive, using {DEFAULT_SLOT_MINUTES} minutes");
            DEFAULT_SLOT_MINUTES
        } else {
            slot_minutes.min(i64::from(MINUTES_PER_DAY)) as u32
        };
        let slot = Duration::from_minutes(slot_minutes);

        let (start, end) = (window.start(), window.end());
        let mut times: Vec<Time> = Vec::new();
        let mut time = start;
        while time <= end {
            times.push(time);
            time += slot;
        }
        if times.last().is_some_and(|last| *last < end) {
            times.push(end);
        }
        Self { times, slot }
    }

    pub fn times(&self) -> &[Time] {
        &self.times
    }

    pub fn slot(&self) -> Duration {
        self.slot
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// `HH:MM` label of every grid point.
    pub fn labels(&self) -> Vec<String> {
        self.times.iter().map(Time::to_hm_string).collect()
    }

    /// `HH:MM-HH:MM` label of every interval between consecutive grid points.
    pub fn slot_labels(&self) -> Vec<String> {
        self.times
            .windows(2)
            .map(|pair| format!("{}-{}", pair[0], pair[1]))
            .collect()
    }
}
