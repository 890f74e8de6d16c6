use serde::{Deserialize, Serialize};
use tramline::network::Station;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationDto {
    pub id: String,
    pub name: String,
    /// `[lat, lon]`.
    pub coord: [f64; 2],
}

impl StationDto {
    pub fn from(station: &Station) -> Self {
        Self {
            id: station.id.to_string(),
            name: station.name.to_string(),
            coord: station.coordinate.to_lat_lon(),
        }
    }
}
