use std::{
    fmt::Display,
    ops::{Add, AddAssign, Sub},
};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Time of day, stored as seconds since midnight.
///
/// Values up to and including `24:00` are representable so a simulation window can end at
/// midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Time(u32);

impl From<u32> for Time {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Sub<Time> for Time {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration(self.0.saturating_sub(rhs.0))
    }
}

impl Add<Duration> for Time {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign<Duration> for Time {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs.0
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hm_string())
    }
}

impl Time {
    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes * 60)
    }

    pub const fn from_hm(hours: u32, minutes: u32) -> Self {
        Self((hours * 60 + minutes) * 60)
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }

    pub const fn as_minutes(&self) -> u32 {
        self.0 / 60
    }

    pub fn to_hm_string(&self) -> String {
        let minutes = self.as_minutes();
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }

    /// Parses a 24-hour `HH:MM` clock value. `24:00` is accepted as the end of the day.
    pub fn parse_hm(time: &str) -> Option<Self> {
        let time = time.trim();
        if time == "24:00" {
            return Some(Self::from_minutes(MINUTES_PER_DAY));
        }
        let parsed = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
        Some(Self(parsed.num_seconds_from_midnight()))
    }
}

#[test]
fn parse_unparse_1() {
    let time = "00:00";
    let stime = Time::parse_hm(time).unwrap();
    assert_eq!(time, stime.to_hm_string())
}

#[test]
fn parse_unparse_2() {
    let time = "08:05";
    let stime = Time::parse_hm(time).unwrap();
    assert_eq!(time, stime.to_hm_string())
}

#[test]
fn parse_unparse_3() {
    let time = "23:59";
    let stime = Time::parse_hm(time).unwrap();
    assert_eq!(time, stime.to_hm_string())
}

#[test]
fn parse_end_of_day() {
    let stime = Time::parse_hm("24:00").unwrap();
    assert_eq!(stime.as_minutes(), MINUTES_PER_DAY);
    assert_eq!("24:00", stime.to_hm_string())
}

#[test]
fn parse_rejects_out_of_range() {
    assert!(Time::parse_hm("25:00").is_none());
    assert!(Time::parse_hm("12:60").is_none());
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Duration(u32);

impl From<u32> for Duration {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Duration {
    pub const ZERO: Duration = Duration(0);

    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes * 60)
    }

    pub const fn from_hours(hours: u32) -> Self {
        Self(hours * 60 * 60)
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }

    pub const fn as_minutes(&self) -> u32 {
        self.0 / 60
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl std::iter::Sum for Duration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Duration::ZERO, |acc, value| acc + value)
    }
}
