//! Pluggable routing collaborator.
//!
//! The path geometry between stations comes from an external service. Implementors return
//! typed [`Segment`]s; raw JSON is validated here before anything reaches the stitcher.

use std::{future::Future, pin::Pin, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{route::Segment, shared::geo::Coordinate};

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("Routing transport failed: {0}")]
    Transport(String),
    #[error("Routing request timed out")]
    Timeout,
    #[error("Routing service responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Routing response is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Routing segment {from} -> {to} is invalid: {reason}")]
    InvalidSegment {
        from: String,
        to: String,
        reason: &'static str,
    },
}

/// One station handed to the routing service. `coord` is `[lon, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePoint {
    pub id: Arc<str>,
    pub coord: [f64; 2],
}

impl RoutePoint {
    pub fn new(id: impl Into<Arc<str>>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            coord: coordinate.to_lon_lat(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::from_lon_lat(self.coord)
    }
}

pub type SegmentFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<Segment>, RoutingError>> + Send + 'a>>;

/// Computes one directed segment per consecutive pair of `points`.
pub trait RoutingService: Send + Sync {
    fn route_segments<'a>(&'a self, points: &'a [RoutePoint]) -> SegmentFuture<'a>;
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawSegment {
    pub from: String,
    pub to: String,
    pub coords: Vec<[f64; 2]>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawSegmentResponse {
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

impl TryFrom<RawSegment> for Segment {
    type Error = RoutingError;

    fn try_from(value: RawSegment) -> Result<Self, Self::Error> {
        let invalid = |reason| RoutingError::InvalidSegment {
            from: value.from.clone(),
            to: value.to.clone(),
            reason,
        };
        if value.coords.is_empty() {
            return Err(invalid("no coordinates"));
        }
        let coordinates: Vec<Coordinate> = value
            .coords
            .iter()
            .map(|coord| Coordinate::from_lon_lat(*coord))
            .collect();
        if !coordinates.iter().all(Coordinate::is_valid) {
            return Err(invalid("coordinate out of range"));
        }
        Ok(Self {
            from: value.from.as_str().into(),
            to: value.to.as_str().into(),
            coordinates,
        })
    }
}

impl RawSegmentResponse {
    pub fn into_segments(self) -> Result<Vec<Segment>, RoutingError> {
        self.segments.into_iter().map(Segment::try_from).collect()
    }
}

/// Parses a `{ "segments": [{ "from", "to", "coords": [[lon, lat], ...] }] }` body.
pub fn parse_segments(json: &str) -> Result<Vec<Segment>, RoutingError> {
    let response: RawSegmentResponse = serde_json::from_str(json)?;
    response.into_segments()
}

/// Connects every consecutive pair with a straight line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLineRouter;

impl RoutingService for StraightLineRouter {
    fn route_segments<'a>(&'a self, points: &'a [RoutePoint]) -> SegmentFuture<'a> {
        Box::pin(async move {
            Ok(points
                .windows(2)
                .map(|pair| Segment {
                    from: pair[0].id.clone(),
                    to: pair[1].id.clone(),
                    coordinates: vec![pair[0].coordinate(), pair[1].coordinate()],
                })
                .collect())
        })
    }
}

#[test]
fn parse_segments_swaps_to_lat_lon() {
    let json = r#"{"segments":[{"from":"a","to":"b","coords":[[100.5,13.7],[100.6,13.8]]}]}"#;
    let segments = parse_segments(json).unwrap();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].coordinates[0], Coordinate::from((13.7, 100.5)));
}

#[test]
fn parse_segments_rejects_empty_coords() {
    let json = r#"{"segments":[{"from":"a","to":"b","coords":[]}]}"#;
    assert!(matches!(
        parse_segments(json),
        Err(RoutingError::InvalidSegment { .. })
    ));
}

#[test]
fn parse_segments_rejects_out_of_range() {
    let json = r#"{"segments":[{"from":"a","to":"b","coords":[[200.0,13.7]]}]}"#;
    assert!(parse_segments(json).is_err());
}

#[test]
fn parse_segments_rejects_wrong_shape() {
    let json = r#"{"segments":[{"from":"a","to":"b","coords":[[100.5]]}]}"#;
    assert!(matches!(
        parse_segments(json),
        Err(RoutingError::Malformed(_))
    ));
}
