use std::sync::Arc;

use serde::Serialize;

use crate::{
    network::records::{StationPairRecord, StationRecord},
    shared::{
        Identifiable,
        geo::{Coordinate, Distance},
        time::Duration,
    },
};

/// A physical stop that routes can visit.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Station {
    /// The internal index used for O(1) array lookups in the network.
    pub index: u32,
    /// Unique external identifier.
    pub id: Arc<str>,
    /// Human-readable name.
    pub name: Arc<str>,
    pub coordinate: Coordinate,
}

impl Identifiable for Station {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl From<StationRecord> for Station {
    fn from(value: StationRecord) -> Self {
        Self {
            index: 0,
            id: value.station_id.into(),
            name: value.name.into(),
            coordinate: Coordinate {
                latitude: value.lat,
                longitude: value.lon,
            },
        }
    }
}

/// A precomputed edge between two stations, as supplied by the network model.
#[derive(Debug, Default, Clone, Serialize)]
pub struct StationPair {
    pub index: u32,
    pub id: Arc<str>,
    pub fst_station: Arc<str>,
    pub snd_station: Arc<str>,
    pub distance: Option<Distance>,
    pub travel_time: Duration,
}

impl From<StationPairRecord> for StationPair {
    fn from(value: StationPairRecord) -> Self {
        let travel_time = if value.travel_time.is_finite() && value.travel_time > 0.0 {
            Duration::from_seconds(value.travel_time.round() as u32)
        } else {
            Duration::ZERO
        };
        let distance = (value.distance.is_finite() && value.distance >= 0.0)
            .then(|| Distance::from_meters(value.distance));
        Self {
            index: 0,
            id: value.station_pair_id.into(),
            fst_station: value.fst_station_id.into(),
            snd_station: value.snd_station_id.into(),
            distance,
            travel_time,
        }
    }
}

/// A station pair looked up for a specific visiting direction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedPair {
    pub pair_id: Arc<str>,
    pub from: Arc<str>,
    pub to: Arc<str>,
    pub distance: Option<Distance>,
    pub travel_time: Duration,
    /// The stored pair runs the other way.
    pub reversed: bool,
}
