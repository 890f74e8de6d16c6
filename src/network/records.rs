use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StationRecord {
    pub station_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StationPairRecord {
    pub station_pair_id: String,
    pub fst_station_id: String,
    pub snd_station_id: String,
    /// Seconds.
    pub travel_time: f64,
    /// Meters, negative when unknown.
    pub distance: f64,
}
