mod api;
mod dto;
mod routing;
mod state;

use crate::{routing::HttpRouter, state::AppState};
use axum::routing::{delete, get, post};
use std::{env, sync::Arc, time::Instant};
use tracing::{error, info, warn};
use tramline::{
    network::{Config, Network, NetworkReader},
    route::{RoutingService, StraightLineRouter},
};

const DEFAULT_PORT: u16 = 3000;

fn routing_service() -> Arc<dyn RoutingService> {
    match env::var("TRAMLINE_ROUTING_URL") {
        Ok(url) => match HttpRouter::new(&url) {
            Ok(router) => {
                info!("Routing through {url}");
                Arc::new(router)
            }
            Err(err) => {
                error!("Failed to build routing client: {err}");
                std::process::exit(1);
            }
        },
        Err(_) => {
            warn!("TRAMLINE_ROUTING_URL is not set, routes are drawn as straight lines");
            Arc::new(StraightLineRouter)
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let Some(path) = env::args()
        .nth(1)
        .or_else(|| env::var("TRAMLINE_NETWORK").ok())
    else {
        error!("Missing network zip or directory");
        std::process::exit(1);
    };
    let port = match env::var("PORT").map(|port| port.parse::<u16>()) {
        Ok(Ok(port)) => port,
        Ok(Err(err)) => {
            error!("Invalid PORT: {err}");
            std::process::exit(1);
        }
        Err(_) => DEFAULT_PORT,
    };

    info!("Loading network...");
    let now = Instant::now();
    let reader = NetworkReader::new(Config::default()).from_path(&path);
    let network = match Network::new().load(&reader) {
        Ok(network) => network,
        Err(err) => {
            error!("Failed to load network from {path}: {err}");
            std::process::exit(1);
        }
    };
    info!(
        "Loaded {} stations and {} station pairs in {:?}",
        network.stations().len(),
        network.station_pairs().len(),
        now.elapsed()
    );

    let state = Arc::new(AppState::new(network, routing_service()));
    let app = axum::Router::new()
        .route("/stations", get(api::stations))
        .route("/routes", get(api::list_routes).post(api::create_route))
        .route("/routes/{id}", delete(api::delete_route))
        .route("/routes/{id}/edit", post(api::begin_edit))
        .route("/routes/{id}/stations", post(api::push_station))
        .route("/routes/{id}/confirm", post(api::confirm_edit))
        .route("/routes/{id}/cancel", post(api::cancel_edit))
        .route("/routes/{id}/reset", post(api::reset_route))
        .route("/playback", post(api::playback))
        .route("/statistics", post(api::statistics))
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {port}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}
