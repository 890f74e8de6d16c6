use crate::{dto::StationDto, state::AppState};
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub async fn stations(State(state): State<Arc<AppState>>) -> Response {
    let stations: Vec<_> = state
        .network
        .stations()
        .iter()
        .map(StationDto::from)
        .collect();
    Json(stations).into_response()
}
