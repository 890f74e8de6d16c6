use crate::{
    api::{Rejection, reject},
    dto::{CreateRouteDto, PushStationDto, RouteDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tramline::route::{Error, Route, RouteEditor};

fn route_dto(editor: &RouteEditor, id: &str) -> Result<Response, Rejection> {
    let route = editor
        .route(id)
        .ok_or_else(|| reject(Error::UnknownRoute(id.to_string())))?;
    Ok(Json(RouteDto::from(route, editor.editing() == Some(id))).into_response())
}

pub async fn list_routes(State(state): State<Arc<AppState>>) -> Response {
    let editor = state.editor.lock().await;
    let routes: Vec<_> = editor
        .routes()
        .iter()
        .map(|route| RouteDto::from(route, editor.editing() == Some(&*route.id)))
        .collect();
    Json(routes).into_response()
}

pub async fn create_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateRouteDto>,
) -> Result<Response, Rejection> {
    let mut editor = state.editor.lock().await;
    let mut route = Route::new(body.id, body.name)
        .with_palette_color(editor.routes().len())
        .with_vehicle(body.vehicle.parameters());
    if let Some(color) = body.color {
        route.color = color.into();
    }
    let route = editor.add_route(route).map_err(reject)?;
    Ok((StatusCode::CREATED, Json(RouteDto::from(route, false))).into_response())
}

pub async fn delete_route(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, Rejection> {
    state
        .editor
        .lock()
        .await
        .remove_route(&id)
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn begin_edit(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, Rejection> {
    let mut editor = state.editor.lock().await;
    editor.begin_edit(&id).map_err(reject)?;
    route_dto(&editor, &id)
}

pub async fn push_station(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<PushStationDto>,
) -> Result<Response, Rejection> {
    let station = state
        .network
        .station_by_key(&body.station)
        .ok_or_else(|| reject(Error::UnknownStation(body.station.clone())))?;

    let mut editor = state.editor.lock().await;
    if editor.editing() != Some(id.as_str()) {
        return Err(reject(Error::NotEditing));
    }
    editor
        .push_station(&state.network, &station.id)
        .map_err(reject)?;
    route_dto(&editor, &id)
}

/// Routes the stations picked so far and commits the result. The editor is unlocked while
/// the routing service works, so a competing edit turns this response stale.
pub async fn confirm_edit(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, Rejection> {
    let request = {
        let mut editor = state.editor.lock().await;
        if editor.editing() != Some(id.as_str()) {
            return Err(reject(Error::NotEditing));
        }
        editor.prepare(&state.network).map_err(reject)?
    };

    let routed = state.router.route_segments(&request.points).await;

    let mut editor = state.editor.lock().await;
    let committed = match routed {
        Ok(segments) => editor.commit(request, segments).map(|_| ()),
        Err(err) => Err(editor.abort(request, err)),
    };
    committed.map_err(reject)?;
    route_dto(&editor, &id)
}

pub async fn cancel_edit(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, Rejection> {
    let mut editor = state.editor.lock().await;
    if editor.editing() != Some(id.as_str()) {
        return Err(reject(Error::NotEditing));
    }
    editor.cancel_edit().map_err(reject)?;
    route_dto(&editor, &id)
}

pub async fn reset_route(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, Rejection> {
    let mut editor = state.editor.lock().await;
    editor.reset_route(&id).map_err(reject)?;
    route_dto(&editor, &id)
}
