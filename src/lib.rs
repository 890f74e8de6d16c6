pub mod network;
pub mod playback;
pub mod route;
pub mod schedule;
pub mod shared;
pub mod statistics;

pub mod prelude {
    pub use crate::network::{Config, Network, NetworkReader, Station, StationPair};
    pub use crate::playback::{
        PlaybackContext, PlaybackFrame, PlaybackRoute, PositionSource, TimeGrid, VehiclePosition,
        build_frames,
    };
    pub use crate::route::{
        Order, Route, RouteEditor, RoutePoint, RoutingError, RoutingService, Segment,
        StraightLineRouter, VehicleParameters,
    };
    pub use crate::schedule::{ScheduleEntry, ScheduleReader, SimWindow};
    pub use crate::shared::{Coordinate, Distance, Duration, Identifiable, Time};
    pub use crate::statistics::{Metric, SimulationResponse, SimulationResult, Statistics};
}
