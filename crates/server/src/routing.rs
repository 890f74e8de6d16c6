use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use tramline::route::{
    RoutePoint, RoutingError, RoutingService,
    routing::{SegmentFuture, parse_segments},
};

const TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Serialize)]
struct RouteRequest<'a> {
    points: &'a [RoutePoint],
}

/// Routing collaborator reached over HTTP.
pub struct HttpRouter {
    client: Client,
    url: String,
}

impl HttpRouter {
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

fn transport(err: reqwest::Error) -> RoutingError {
    if err.is_timeout() {
        RoutingError::Timeout
    } else {
        RoutingError::Transport(err.to_string())
    }
}

impl RoutingService for HttpRouter {
    fn route_segments<'a>(&'a self, points: &'a [RoutePoint]) -> SegmentFuture<'a> {
        Box::pin(async move {
            debug!("Requesting {} segments from {}", points.len().saturating_sub(1), self.url);
            let response = self
                .client
                .post(&self.url)
                .json(&RouteRequest { points })
                .send()
                .await
                .map_err(transport)?;

            let status = response.status();
            let body = response.text().await.map_err(transport)?;
            if !status.is_success() {
                return Err(RoutingError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            parse_segments(&body)
        })
    }
}
