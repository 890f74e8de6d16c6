use std::sync::Arc;
use tokio::sync::Mutex;
use tramline::{network::Network, route::RouteEditor, route::RoutingService};

pub struct AppState {
    pub network: Network,
    /// Released while a routing call is in flight.
    pub editor: Mutex<RouteEditor>,
    pub router: Arc<dyn RoutingService>,
}

impl AppState {
    pub fn new(network: Network, router: Arc<dyn RoutingService>) -> Self {
        Self {
            network,
            editor: Mutex::new(RouteEditor::new()),
            router,
        }
    }
}
