use serde::{Deserialize, Serialize};

/// Response of the external simulation service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationResponse {
    pub result: String,
    pub simulation_result: SimulationResult,
    #[serde(default)]
    pub logs: Vec<SimulationLog>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationLog {
    pub time: String,
    pub component: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SimulationResult {
    #[serde(default)]
    pub result_summary: ResultSummary,
    #[serde(default)]
    pub slot_results: Vec<SlotResult>,
}

/// Whole-run averages. Times are in seconds, utilization is a ratio.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ResultSummary {
    pub average_waiting_time: f64,
    pub average_queue_length: f64,
    pub average_utilization: f64,
    pub average_travel_time: f64,
    pub average_travel_distance: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SlotResult {
    /// `HH:MM-HH:MM`.
    pub slot_name: String,
    #[serde(default)]
    pub result_total_station: TotalStation,
    #[serde(default)]
    pub result_station: Vec<StationResult>,
    #[serde(default)]
    pub result_route: Vec<RouteResult>,
}

impl SlotResult {
    /// Start label of the slot, `08:00` for `08:00-08:15`.
    pub fn start_label(&self) -> &str {
        self.slot_name
            .split_once('-')
            .map(|(start, _)| start)
            .unwrap_or(&self.slot_name)
            .trim()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TotalStation {
    pub average_waiting_time: f64,
    pub average_queue_length: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StationResult {
    pub station_name: String,
    pub average_waiting_time: f64,
    pub average_queue_length: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub route_id: String,
    pub average_utilization: f64,
    pub average_travel_time: f64,
    pub average_travel_distance: f64,
    pub average_waiting_time: f64,
    pub average_queue_length: f64,
    pub customers_count: u64,
}
