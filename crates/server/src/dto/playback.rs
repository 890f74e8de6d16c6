use serde::{Deserialize, Serialize};
use tramline::{
    playback::{DEFAULT_SLOT_MINUTES, PlaybackFrame},
    schedule::{ScheduleRecord, SimWindow},
    statistics::{HeatmapPoint, ResultSummary, RouteSummary, SeriesPoint, StationSummary},
};

fn default_slot_minutes() -> i64 {
    i64::from(DEFAULT_SLOT_MINUTES)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackRequestDto {
    /// `HH:MM-HH:MM`.
    pub sim_window: SimWindow,
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: i64,
    #[serde(default)]
    pub schedule_data: Vec<ScheduleRecord>,
    /// CSV export of the schedule sheet, read in addition to `schedule_data`.
    pub schedule_csv: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackDto {
    pub time_labels: Vec<String>,
    pub slot_labels: Vec<String>,
    pub frames: Vec<PlaybackFrame>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsDto {
    pub summary: ResultSummary,
    pub slot_interval_minutes: u32,
    pub routes: Vec<RouteSummary>,
    pub stations: Vec<StationSummary>,
    pub top_routes: Vec<(String, u64)>,
    pub waiting_time: Vec<SeriesPoint>,
    pub queue_length: Vec<SeriesPoint>,
    pub utilization: Vec<SeriesPoint>,
    pub heatmap: Vec<HeatmapPoint>,
}
