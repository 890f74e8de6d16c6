use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod editor;
pub mod routing;
pub mod stitch;

pub use editor::*;
pub use routing::{RoutePoint, RoutingError, RoutingService, StraightLineRouter};

use crate::shared::{
    Identifiable,
    geo::{Coordinate, Distance, path_length},
    time::Duration,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Route id {0} does not match any entry")]
    UnknownRoute(String),
    #[error("Route id {0} is already in use")]
    DuplicateRoute(String),
    #[error("Station id {0} does not match any entry")]
    UnknownStation(String),
    #[error("Route {0} is hidden, unhide it before editing")]
    RouteHidden(String),
    #[error("Route {0} is locked")]
    RouteLocked(String),
    #[error("No route is in edit mode")]
    NotEditing,
    #[error("Station {0} cannot be added twice in a row")]
    DuplicateConsecutiveStation(String),
    #[error("Not enough stations with coordinates to build route {route}: found {found}")]
    NotEnoughPoints { route: String, found: usize },
    #[error("Stations {from} and {to} are not connected in the network model")]
    NotConnected { from: String, to: String },
    #[error("Expected {expected} segments from the routing service, got {found}")]
    SegmentCount { expected: usize, found: usize },
    #[error("Segment {index} runs {found_from} -> {found_to}, expected {expected_from} -> {expected_to}")]
    SegmentMismatch {
        index: usize,
        expected_from: String,
        expected_to: String,
        found_from: String,
        found_to: String,
    },
    #[error("Routing service failed for route {route}: {source}")]
    Routing {
        route: String,
        #[source]
        source: RoutingError,
    },
    #[error("Edit of route {0} was superseded before the routing response arrived")]
    Superseded(String),
}

/// A directed polyline between two consecutive stations of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub from: Arc<str>,
    pub to: Arc<str>,
    pub coordinates: Vec<Coordinate>,
}

/// A directed edge of a route's visiting sequence, numbered from 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub sequence: u32,
    pub route_id: Arc<str>,
    pub pair_id: Arc<str>,
    pub from: Arc<str>,
    pub to: Arc<str>,
    pub distance: Option<Distance>,
    pub travel_time: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleParameters {
    /// Kilometers a vehicle may run before it is taken out of service.
    pub max_distance: f64,
    /// Kilometers per hour.
    pub speed: f64,
    pub capacity: u32,
    pub max_vehicles: u32,
    /// Operator supplied end-to-end travel time. Takes precedence over the order sum.
    pub travel_time: Option<Duration>,
}

/// An operator defined route.
///
/// Stations, segments, orders and the stitched geometry are only ever replaced together by
/// [`RouteEditor`], so the geometry and the order derived travel time always describe the same
/// visiting sequence.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub color: Arc<str>,
    pub vehicle: VehicleParameters,
    pub hidden: bool,
    pub locked: bool,

    stations: Vec<Arc<str>>,
    segments: Vec<Segment>,
    orders: Vec<Order>,
    geometry: Arc<[Coordinate]>,
}

impl Identifiable for Route {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

const PALETTE: [&str; 9] = [
    "#76218a", "#3a8345", "#49fd36", "#f80512", "#f7bc16", "#fc2898", "#0e16b2", "#83c8f9",
    "#7a644e",
];

impl Route {
    pub fn new(id: impl Into<Arc<str>>, name: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: PALETTE[0].into(),
            vehicle: Default::default(),
            hidden: false,
            locked: false,
            stations: Vec::new(),
            segments: Vec::new(),
            orders: Vec::new(),
            geometry: Arc::from(Vec::new()),
        }
    }

    /// Picks a color from the default palette by position in the route list.
    pub fn with_palette_color(mut self, position: usize) -> Self {
        self.color = PALETTE[position % PALETTE.len()].into();
        self
    }

    pub fn with_vehicle(mut self, vehicle: VehicleParameters) -> Self {
        self.vehicle = vehicle;
        self
    }

    pub fn stations(&self) -> &[Arc<str>] {
        &self.stations
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn geometry(&self) -> &Arc<[Coordinate]> {
        &self.geometry
    }

    pub fn geometry_length(&self) -> Distance {
        path_length(&self.geometry)
    }

    /// End-to-end travel time: the operator override when set, otherwise the order sum.
    /// `None` when neither is known.
    pub fn total_travel_time(&self) -> Option<Duration> {
        if let Some(travel_time) = self.vehicle.travel_time
            && !travel_time.is_zero()
        {
            return Some(travel_time);
        }
        let summed = stitch::total_travel_time(&self.orders);
        (!summed.is_zero()).then_some(summed)
    }

    /// Fractional position of every stop along the route, first at 0 and last at 1.
    pub fn station_progress(&self) -> Vec<(Arc<str>, f64)> {
        let count = self.stations.len();
        self.stations
            .iter()
            .enumerate()
            .map(|(idx, station)| {
                let progress = if count > 1 {
                    idx as f64 / (count - 1) as f64
                } else {
                    0.0
                };
                (station.clone(), progress)
            })
            .collect()
    }

    fn clear_path(&mut self) {
        self.stations.clear();
        self.segments.clear();
        self.orders.clear();
        self.geometry = Arc::from(Vec::new());
    }
}

#[test]
fn station_progress_spreads_evenly() {
    let mut route = Route::new("1", "Line 1");
    route.stations = vec!["a".into(), "b".into(), "c".into()];
    let progress: Vec<f64> = route.station_progress().into_iter().map(|(_, p)| p).collect();
    assert_eq!(progress, vec![0.0, 0.5, 1.0]);
}

#[test]
fn travel_time_override_wins() {
    let route = Route::new("1", "Line 1").with_vehicle(VehicleParameters {
        travel_time: Some(Duration::from_minutes(12)),
        ..Default::default()
    });
    assert_eq!(route.total_travel_time(), Some(Duration::from_seconds(720)));
}

#[test]
fn travel_time_unknown_without_orders() {
    let route = Route::new("1", "Line 1");
    assert_eq!(route.total_travel_time(), None);
}
