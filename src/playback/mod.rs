use std::{collections::HashMap, sync::Arc};

use rayon::prelude::*;
use tracing::{debug, warn};

mod grid;
mod models;
pub use grid::*;
pub use models::*;

use crate::{
    route::Route,
    schedule::{self, ScheduleEntry, SimWindow, parse_schedule_in_window},
    shared::{
        geo::Coordinate,
        time::{Duration, Time},
    },
};

/// Vehicles never reach the last coordinate of their route.
pub const PROGRESS_CAP: f64 = 0.95;

/// Everything the frame engine needs to know about one route for one run.
#[derive(Debug, Clone)]
pub struct PlaybackRoute {
    pub id: Arc<str>,
    pub coordinates: Arc<[Coordinate]>,
    /// Ascending departures inside the simulation window.
    pub departures: Vec<Time>,
    pub travel_time: Option<Duration>,
}

impl PlaybackRoute {
    pub fn new(id: impl Into<Arc<str>>, coordinates: impl Into<Arc<[Coordinate]>>) -> Self {
        Self {
            id: id.into(),
            coordinates: coordinates.into(),
            departures: Vec::new(),
            travel_time: None,
        }
    }

    pub fn with_departures(mut self, mut departures: Vec<Time>) -> Self {
        departures.sort();
        self.departures = departures;
        self
    }

    pub fn with_travel_time(mut self, travel_time: Option<Duration>) -> Self {
        self.travel_time = travel_time;
        self
    }

    pub fn from_route(route: &Route, departures: Vec<Time>) -> Self {
        Self::new(route.id.clone(), route.geometry().clone())
            .with_departures(departures)
            .with_travel_time(route.total_travel_time())
    }

    /// Appends the position of every vehicle that has departed by `time`.
    pub fn positions_at(&self, time: Time, vehicles: &mut Vec<VehiclePosition>) {
        let count = self.coordinates.len();
        if count == 0 {
            return;
        }
        let total = self.departures.len();
        let travel_time = self.travel_time.filter(|travel_time| !travel_time.is_zero());

        for (ordinal, departure) in (1..).zip(self.departures.iter()) {
            if *departure > time {
                break;
            }
            let (progress, position_source) = match travel_time {
                Some(travel_time) => {
                    let elapsed = (time - *departure).as_seconds() as f64;
                    (
                        (elapsed / travel_time.as_seconds() as f64).min(PROGRESS_CAP),
                        PositionSource::TravelTime,
                    )
                }
                None => (
                    (ordinal as f64 / (total as f64 + 1.0)).min(PROGRESS_CAP),
                    PositionSource::EvenSpacing,
                ),
            };
            let index = ((progress * count as f64).floor() as usize).min(count - 1);
            vehicles.push(VehiclePosition {
                id: format!("{}-{}", self.id, ordinal),
                route_id: self.id.clone(),
                coord: self.coordinates[index].to_lat_lon(),
                progress,
                position_source,
            });
        }
    }
}

/// Builds one frame per grid point. Frames are computed in parallel and returned in grid
/// order.
pub fn frames_for(grid: &TimeGrid, routes: &[PlaybackRoute]) -> Vec<PlaybackFrame> {
    grid.times()
        .par_iter()
        .map(|time| {
            let mut vehicles: Vec<VehiclePosition> = Vec::new();
            for route in routes {
                route.positions_at(*time, &mut vehicles);
            }
            PlaybackFrame {
                time_label: time.to_hm_string(),
                time: *time,
                vehicles,
            }
        })
        .collect()
}

/// The inputs of a single playback run: window, slot size and the parsed schedules.
#[derive(Debug, Clone)]
pub struct PlaybackContext {
    window: SimWindow,
    grid: TimeGrid,
    schedules: HashMap<Arc<str>, Vec<Time>>,
}

impl PlaybackContext {
    pub fn new(window: SimWindow, slot_minutes: i64) -> Self {
        Self {
            window,
            grid: TimeGrid::new(&window, slot_minutes),
            schedules: HashMap::new(),
        }
    }

    pub fn window(&self) -> &SimWindow {
        &self.window
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Parses a route's departure list and keeps the departures inside the window. Several
    /// lists for the same route are merged.
    pub fn with_schedule(mut self, route_id: &str, raw: &str) -> Result<Self, schedule::Error> {
        let departures = parse_schedule_in_window(raw, &self.window)?;
        let entry = self.schedules.entry(route_id.into()).or_default();
        entry.extend(departures);
        entry.sort();
        Ok(self)
    }

    pub fn with_entries(self, entries: &[ScheduleEntry]) -> Result<Self, schedule::Error> {
        entries.iter().try_fold(self, |context, entry| {
            context.with_schedule(&entry.route_id, &entry.schedule_list)
        })
    }

    pub fn departures(&self, route_id: &str) -> &[Time] {
        self.schedules
            .get(route_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Playback inputs for every visible route. Routes without a schedule get no departures.
    pub fn playback_routes(&self, routes: &[Route]) -> Vec<PlaybackRoute> {
        for route_id in self.schedules.keys() {
            if !routes.iter().any(|route| route.id == *route_id) {
                warn!("Schedule for unknown route {route_id} is ignored");
            }
        }
        routes
            .iter()
            .filter(|route| !route.hidden)
            .map(|route| PlaybackRoute::from_route(route, self.departures(&route.id).to_vec()))
            .collect()
    }

    pub fn build_frames(&self, routes: &[Route]) -> Vec<PlaybackFrame> {
        let routes = self.playback_routes(routes);
        let frames = frames_for(&self.grid, &routes);
        debug!(
            "Built {} frames for {} routes over {}",
            frames.len(),
            routes.len(),
            self.window
        );
        frames
    }
}

/// Computes the full frame list for a run.
pub fn build_frames(
    routes: &[Route],
    schedule_data: &[ScheduleEntry],
    window: SimWindow,
    slot_minutes: i64,
) -> Result<Vec<PlaybackFrame>, schedule::Error> {
    Ok(PlaybackContext::new(window, slot_minutes)
        .with_entries(schedule_data)?
        .build_frames(routes))
}
