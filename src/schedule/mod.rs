use std::{fmt::Display, io, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod reader;
pub use reader::*;

use crate::shared::time::{MINUTES_PER_DAY, Time};

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0:?} is not a valid HH:MM time")]
    InvalidTime(String),
    #[error("Invalid simulation window: {0}")]
    InvalidWindow(String),
}

/// The simulated period of a day, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SimWindow {
    start: Time,
    end: Time,
}

impl SimWindow {
    pub fn new(start: Time, end: Time) -> Result<Self, Error> {
        if start > end {
            return Err(Error::InvalidWindow(format!(
                "start {start} is after end {end}"
            )));
        }
        if end.as_minutes() > MINUTES_PER_DAY {
            return Err(Error::InvalidWindow(format!("end {end} is past midnight")));
        }
        Ok(Self { start, end })
    }

    /// Builds a window on whole hours, `0 <= start < end <= 24`.
    pub fn from_hours(start_hour: u32, end_hour: u32) -> Result<Self, Error> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(Error::InvalidWindow(format!(
                "hour range {start_hour}-{end_hour}"
            )));
        }
        Self::new(Time::from_hm(start_hour, 0), Time::from_hm(end_hour, 0))
    }

    pub const fn start(&self) -> Time {
        self.start
    }

    pub const fn end(&self) -> Time {
        self.end
    }

    pub fn contains(&self, time: Time) -> bool {
        self.start <= time && time <= self.end
    }
}

impl Display for SimWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for SimWindow {
    type Err = Error;

    /// Parses `HH:MM-HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| Error::InvalidWindow(s.to_string()))?;
        let start = Time::parse_hm(start).ok_or_else(|| Error::InvalidTime(start.to_string()))?;
        let end = Time::parse_hm(end).ok_or_else(|| Error::InvalidTime(end.to_string()))?;
        Self::new(start, end)
    }
}

impl TryFrom<String> for SimWindow {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SimWindow> for String {
    fn from(value: SimWindow) -> Self {
        value.to_string()
    }
}

/// A route's raw departure list as it arrives from the schedule file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub route_id: String,
    pub schedule_list: String,
}

/// Parses a comma separated list of `HH:MM` departures into ascending times.
///
/// Blank tokens are skipped; any other token that is not a 24-hour clock value rejects the
/// whole list.
pub fn parse_schedule(raw: &str) -> Result<Vec<Time>, Error> {
    let mut times = raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            Time::parse_hm(token)
                .filter(|time| time.as_minutes() < MINUTES_PER_DAY)
                .ok_or_else(|| Error::InvalidTime(token.to_string()))
        })
        .collect::<Result<Vec<Time>, Error>>()?;
    times.sort();
    Ok(times)
}

/// Keeps the departures inside the window.
pub fn filter_window(times: &[Time], window: &SimWindow) -> Vec<Time> {
    times
        .iter()
        .copied()
        .filter(|time| window.contains(*time))
        .collect()
}

pub fn parse_schedule_in_window(raw: &str, window: &SimWindow) -> Result<Vec<Time>, Error> {
    Ok(filter_window(&parse_schedule(raw)?, window))
}
