mod network;
mod playback;
mod routes;
mod statistics;

pub use network::*;
pub use playback::*;
pub use routes::*;
pub use statistics::*;

use axum::http::StatusCode;
use tracing::{error, warn};
use tramline::route::{self, RoutingError};

pub type Rejection = (StatusCode, String);

fn status_of(err: &route::Error) -> StatusCode {
    use route::Error::*;
    match err {
        UnknownRoute(_) | UnknownStation(_) => StatusCode::NOT_FOUND,
        DuplicateRoute(_)
        | RouteHidden(_)
        | RouteLocked(_)
        | NotEditing
        | DuplicateConsecutiveStation(_)
        | Superseded(_) => StatusCode::CONFLICT,
        NotEnoughPoints { .. } | NotConnected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        Routing {
            source: RoutingError::Timeout,
            ..
        } => StatusCode::GATEWAY_TIMEOUT,
        Routing { .. } | SegmentCount { .. } | SegmentMismatch { .. } => StatusCode::BAD_GATEWAY,
    }
}

pub fn reject(err: route::Error) -> Rejection {
    let status = status_of(&err);
    if status.is_server_error() {
        error!("Route edit failed: {err}");
    } else {
        warn!("Route edit rejected: {err}");
    }
    (status, err.to_string())
}
