use crate::{dto::StatisticsDto, state::AppState};
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tramline::statistics::{Metric, SimulationResponse, Statistics};

const TOP_ROUTES: usize = 10;

pub async fn statistics(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SimulationResponse>,
) -> Response {
    let statistics = Statistics::new(&body.simulation_result);
    Json(StatisticsDto {
        summary: statistics.summary().clone(),
        slot_interval_minutes: statistics.slot_interval_minutes(),
        routes: statistics.by_route(),
        stations: statistics.by_station(),
        top_routes: statistics.top_routes_by_customers(TOP_ROUTES),
        waiting_time: statistics.series(Metric::WaitingTime),
        queue_length: statistics.series(Metric::QueueLength),
        utilization: statistics.series(Metric::Utilization),
        heatmap: statistics.station_heatmap(&state.network),
    })
    .into_response()
}
