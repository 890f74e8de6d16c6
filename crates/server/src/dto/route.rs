use serde::{Deserialize, Serialize};
use tramline::{
    route::{Order, Route, VehicleParameters},
    shared::Duration,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteDto {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    #[serde(default)]
    pub vehicle: VehicleDto,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleDto {
    /// Kilometers.
    pub max_distance: f64,
    /// Kilometers per hour.
    pub speed: f64,
    pub capacity: u32,
    pub max_vehicles: u32,
    /// End-to-end travel time override in minutes.
    pub travel_time_minutes: Option<u32>,
}

impl VehicleDto {
    pub fn from(vehicle: &VehicleParameters) -> Self {
        Self {
            max_distance: vehicle.max_distance,
            speed: vehicle.speed,
            capacity: vehicle.capacity,
            max_vehicles: vehicle.max_vehicles,
            travel_time_minutes: vehicle.travel_time.map(|travel_time| travel_time.as_minutes()),
        }
    }

    pub fn parameters(&self) -> VehicleParameters {
        VehicleParameters {
            max_distance: self.max_distance,
            speed: self.speed,
            capacity: self.capacity,
            max_vehicles: self.max_vehicles,
            travel_time: self.travel_time_minutes.map(Duration::from_minutes),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushStationDto {
    /// Station id or display name.
    pub station: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub sequence: u32,
    pub pair_id: String,
    pub from: String,
    pub to: String,
    pub distance_km: Option<f64>,
    pub travel_time_seconds: u32,
}

impl OrderDto {
    pub fn from(order: &Order) -> Self {
        Self {
            sequence: order.sequence,
            pair_id: order.pair_id.to_string(),
            from: order.from.to_string(),
            to: order.to.to_string(),
            distance_km: order.distance.map(|distance| distance.as_kilometers()),
            travel_time_seconds: order.travel_time.as_seconds(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDto {
    pub id: String,
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    pub id: String,
    pub name: String,
    pub color: String,
    pub hidden: bool,
    pub locked: bool,
    pub editing: bool,
    pub stops: Vec<StopDto>,
    pub orders: Vec<OrderDto>,
    /// `[lat, lon]` pairs of the stitched geometry.
    pub coordinates: Vec<[f64; 2]>,
    pub length_km: f64,
    pub travel_time_seconds: Option<u32>,
    pub vehicle: VehicleDto,
}

impl RouteDto {
    pub fn from(route: &Route, editing: bool) -> Self {
        Self {
            id: route.id.to_string(),
            name: route.name.to_string(),
            color: route.color.to_string(),
            hidden: route.hidden,
            locked: route.locked,
            editing,
            stops: route
                .station_progress()
                .into_iter()
                .map(|(id, progress)| StopDto {
                    id: id.to_string(),
                    progress,
                })
                .collect(),
            orders: route.orders().iter().map(OrderDto::from).collect(),
            coordinates: route
                .geometry()
                .iter()
                .map(|coordinate| coordinate.to_lat_lon())
                .collect(),
            length_km: route.geometry_length().as_kilometers(),
            travel_time_seconds: route
                .total_travel_time()
                .map(|travel_time| travel_time.as_seconds()),
            vehicle: VehicleDto::from(&route.vehicle),
        }
    }
}

#[test]
fn vehicle_travel_time_is_read_in_minutes() {
    let body: CreateRouteDto = serde_json::from_str(
        r#"{ "id": "7", "name": "Blue Line", "vehicle": { "speed": 30.0, "maxVehicles": 4, "travelTimeMinutes": 45 } }"#,
    )
    .unwrap();
    let parameters = body.vehicle.parameters();
    assert_eq!(parameters.travel_time, Some(Duration::from_minutes(45)));
    assert_eq!(parameters.max_vehicles, 4);
    assert_eq!(parameters.capacity, 0);
    assert_eq!(VehicleDto::from(&parameters), body.vehicle);
}

#[test]
fn vehicle_defaults_without_override() {
    let body: CreateRouteDto =
        serde_json::from_str(r#"{ "id": "7", "name": "Blue Line", "color": null }"#).unwrap();
    assert_eq!(body.vehicle.parameters(), VehicleParameters::default());
}
