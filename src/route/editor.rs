use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    network::Network,
    route::{
        Error, Order, Route, RoutePoint, RoutingError, RoutingService, Segment,
        stitch::{self, check_segments, derive_orders},
    },
    shared::geo::Coordinate,
};

#[derive(Debug, Clone)]
struct Snapshot {
    stations: Vec<Arc<str>>,
    segments: Vec<Segment>,
    orders: Vec<Order>,
    geometry: Arc<[Coordinate]>,
}

impl Snapshot {
    fn take(route: &Route) -> Self {
        Self {
            stations: route.stations.clone(),
            segments: route.segments.clone(),
            orders: route.orders.clone(),
            geometry: route.geometry.clone(),
        }
    }

    fn restore(self, route: &mut Route) {
        route.stations = self.stations;
        route.segments = self.segments;
        route.orders = self.orders;
        route.geometry = self.geometry;
    }
}

#[derive(Debug)]
struct EditSession {
    route_id: Arc<str>,
    snapshot: Snapshot,
}

/// A pending routing call for the route in edit mode.
///
/// Only valid while the editor's generation still matches; any later edit, cancel or commit
/// makes it stale.
#[derive(Debug, Clone)]
pub struct StitchRequest {
    pub route_id: Arc<str>,
    pub generation: u64,
    pub points: Vec<RoutePoint>,
    stations: Vec<Arc<str>>,
    orders: Vec<Order>,
}

/// Owns the route collection and runs the edit transaction: snapshot on begin, then either
/// commit the stitched result or restore the snapshot. At most one route is in edit mode.
#[derive(Debug, Default)]
pub struct RouteEditor {
    routes: Vec<Route>,
    session: Option<EditSession>,
    generation: u64,
}

impl RouteEditor {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|route| &*route.id == id)
    }

    /// Mutable access to a route's settings. Stations and geometry stay behind the edit
    /// transaction.
    pub fn route_mut(&mut self, id: &str) -> Result<&mut Route, Error> {
        self.routes
            .iter_mut()
            .find(|route| &*route.id == id)
            .ok_or_else(|| Error::UnknownRoute(id.to_string()))
    }

    pub fn editing(&self) -> Option<&str> {
        self.session.as_ref().map(|session| &*session.route_id)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn add_route(&mut self, route: Route) -> Result<&Route, Error> {
        if self.route(&route.id).is_some() {
            return Err(Error::DuplicateRoute(route.id.to_string()));
        }
        self.routes.push(route);
        Ok(&self.routes[self.routes.len() - 1])
    }

    pub fn remove_route(&mut self, id: &str) -> Result<Route, Error> {
        let index = self.index_of(id)?;
        if self.editing() == Some(id) {
            self.session = None;
            self.generation += 1;
        }
        Ok(self.routes.remove(index))
    }

    /// Puts a route in edit mode, clearing its path. An edit already open on any route is
    /// cancelled first.
    pub fn begin_edit(&mut self, route_id: &str) -> Result<(), Error> {
        let index = self.index_of(route_id)?;
        if self.routes[index].hidden {
            return Err(Error::RouteHidden(route_id.to_string()));
        }
        if self.session.is_some() {
            self.cancel_edit()?;
        }
        let route = &mut self.routes[index];
        let snapshot = Snapshot::take(route);
        route.clear_path();
        self.session = Some(EditSession {
            route_id: route.id.clone(),
            snapshot,
        });
        self.generation += 1;
        debug!("Editing route {route_id}");
        Ok(())
    }

    /// Appends a station to the route in edit mode.
    pub fn push_station(&mut self, network: &Network, station_id: &str) -> Result<(), Error> {
        let index = self.editing_index()?;
        let route = &mut self.routes[index];
        if route.locked {
            return Err(Error::RouteLocked(route.id.to_string()));
        }
        let station = network
            .station_by_id(station_id)
            .ok_or_else(|| Error::UnknownStation(station_id.to_string()))?;
        if route.stations.last() == Some(&station.id) {
            return Err(Error::DuplicateConsecutiveStation(station_id.to_string()));
        }
        route.stations.push(station.id.clone());
        self.generation += 1;
        Ok(())
    }

    /// Restores the route in edit mode to its state before the edit began.
    pub fn cancel_edit(&mut self) -> Result<(), Error> {
        let session = self.session.take().ok_or(Error::NotEditing)?;
        self.generation += 1;
        if let Some(route) = self
            .routes
            .iter_mut()
            .find(|route| route.id == session.route_id)
        {
            session.snapshot.restore(route);
            debug!("Cancelled edit of route {}", route.id);
        }
        Ok(())
    }

    /// Resolves the routing request for the route in edit mode. Fails, and rolls the edit
    /// back, when fewer than two stations have coordinates or a consecutive pair is not
    /// connected in the network.
    pub fn prepare(&mut self, network: &Network) -> Result<StitchRequest, Error> {
        let index = self.editing_index()?;
        let route = &self.routes[index];

        let (stations, points): (Vec<Arc<str>>, Vec<RoutePoint>) = route
            .stations
            .iter()
            .filter_map(|id| {
                let coordinate = network.coordinate_of(id)?;
                Some((id.clone(), RoutePoint::new(id.clone(), coordinate)))
            })
            .unzip();

        if points.len() < 2 {
            let err = Error::NotEnoughPoints {
                route: route.id.to_string(),
                found: points.len(),
            };
            self.cancel_edit()?;
            return Err(err);
        }

        let orders = match derive_orders(&route.id, &stations, network) {
            Ok(orders) => orders,
            Err(err) => {
                self.cancel_edit()?;
                return Err(err);
            }
        };

        Ok(StitchRequest {
            route_id: route.id.clone(),
            generation: self.generation,
            points,
            stations,
            orders,
        })
    }

    pub fn is_current(&self, request: &StitchRequest) -> bool {
        request.generation == self.generation && self.editing() == Some(&*request.route_id)
    }

    /// Installs the routed segments, the stitched geometry and the orders together and leaves
    /// edit mode. A stale request is discarded without touching the route.
    pub fn commit(
        &mut self,
        request: StitchRequest,
        segments: Vec<Segment>,
    ) -> Result<&Route, Error> {
        if !self.is_current(&request) {
            warn!(
                "Discarding routing response for route {}, edit was superseded",
                request.route_id
            );
            return Err(Error::Superseded(request.route_id.to_string()));
        }
        if let Err(err) = check_segments(&request.points, &segments) {
            self.cancel_edit()?;
            return Err(err);
        }

        let index = self.index_of(&request.route_id)?;
        self.session = None;
        self.generation += 1;

        let route = &mut self.routes[index];
        route.geometry = stitch::stitch(&segments).into();
        route.stations = request.stations;
        route.segments = segments;
        route.orders = request.orders;
        info!(
            "Committed route {} with {} orders and {} coordinates",
            route.id,
            route.orders.len(),
            route.geometry.len()
        );
        Ok(&self.routes[index])
    }

    /// Rolls back the edit a failed routing call belonged to, if it is still current, and
    /// returns the failure with the route as context.
    pub fn abort(&mut self, request: StitchRequest, source: RoutingError) -> Error {
        if self.is_current(&request) {
            if let Err(err) = self.cancel_edit() {
                warn!("Failed to roll back route {}: {err}", request.route_id);
            }
        }
        Error::Routing {
            route: request.route_id.to_string(),
            source,
        }
    }

    /// Prepares, awaits the routing service and commits, rolling back on any failure.
    pub async fn confirm_edit<R>(&mut self, network: &Network, router: &R) -> Result<&Route, Error>
    where
        R: RoutingService + ?Sized,
    {
        let request = self.prepare(network)?;
        let routed = router.route_segments(&request.points).await;
        match routed {
            Ok(segments) => self.commit(request, segments),
            Err(err) => Err(self.abort(request, err)),
        }
    }

    /// Clears the path of a route that is not in edit mode.
    pub fn reset_route(&mut self, id: &str) -> Result<(), Error> {
        let index = self.index_of(id)?;
        if self.routes[index].locked {
            return Err(Error::RouteLocked(id.to_string()));
        }
        if self.editing() == Some(id) {
            self.session = None;
        }
        self.routes[index].clear_path();
        self.generation += 1;
        Ok(())
    }

    fn index_of(&self, id: &str) -> Result<usize, Error> {
        self.routes
            .iter()
            .position(|route| &*route.id == id)
            .ok_or_else(|| Error::UnknownRoute(id.to_string()))
    }

    fn editing_index(&self) -> Result<usize, Error> {
        let session = self.session.as_ref().ok_or(Error::NotEditing)?;
        self.index_of(&session.route_id)
    }
}
