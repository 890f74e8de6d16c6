use crate::{
    api::Rejection,
    dto::{PlaybackDto, PlaybackRequestDto},
    state::AppState,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, warn};
use tramline::{playback::PlaybackContext, schedule::ScheduleReader};

pub async fn playback(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PlaybackRequestDto>,
) -> Result<Response, Rejection> {
    let bad_request = |err: tramline::schedule::Error| {
        warn!("Rejected playback request: {err}");
        (StatusCode::BAD_REQUEST, err.to_string())
    };

    let editor = state.editor.lock().await;
    let routes = editor.routes();

    let mut entries: Vec<_> = body
        .schedule_data
        .into_iter()
        .map(|record| record.resolve(routes))
        .collect();
    if let Some(csv) = body.schedule_csv {
        entries.extend(ScheduleReader::read_entries(csv.as_bytes(), routes).map_err(bad_request)?);
    }

    let context = PlaybackContext::new(body.sim_window, body.slot_minutes)
        .with_entries(&entries)
        .map_err(bad_request)?;
    let frames = context.build_frames(routes);
    info!(
        "Built playback for {} routes over {} with {} frames",
        routes.len(),
        context.window(),
        frames.len()
    );

    Ok(Json(PlaybackDto {
        time_labels: context.grid().labels(),
        slot_labels: context.grid().slot_labels(),
        frames,
    })
    .into_response())
}
