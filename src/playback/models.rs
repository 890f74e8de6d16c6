use std::sync::Arc;

use serde::Serialize;

use crate::shared::time::Time;

/// How a vehicle position was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionSource {
    /// Elapsed time since departure over the route's travel time.
    TravelTime,
    /// The route has no travel time; vehicles are spread along the route by ordinal.
    EvenSpacing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePosition {
    /// `<route id>-<ordinal>`, stable within one run.
    pub id: String,
    pub route_id: Arc<str>,
    /// `[lat, lon]`.
    pub coord: [f64; 2],
    pub progress: f64,
    pub position_source: PositionSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackFrame {
    pub time_label: String,
    #[serde(skip)]
    pub time: Time,
    pub vehicles: Vec<VehiclePosition>,
}
