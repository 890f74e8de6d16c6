//! Joins routed segments into one route geometry and derives the route's orders.

use std::sync::Arc;

use crate::{
    network::Network,
    route::{Error, Order, RoutePoint, Segment},
    shared::{geo::Coordinate, time::Duration},
};

/// Concatenates segment polylines in visiting order, dropping any coordinate equal to the one
/// right before it.
pub fn stitch(segments: &[Segment]) -> Vec<Coordinate> {
    let capacity = segments.iter().map(|segment| segment.coordinates.len()).sum();
    let mut coordinates: Vec<Coordinate> = Vec::with_capacity(capacity);
    for coordinate in segments.iter().flat_map(|segment| segment.coordinates.iter()) {
        if coordinates.last() != Some(coordinate) {
            coordinates.push(*coordinate);
        }
    }
    coordinates
}

/// Builds one order per consecutive station pair, oriented in visiting order and numbered
/// from 1.
pub fn derive_orders(
    route_id: &Arc<str>,
    stations: &[Arc<str>],
    network: &Network,
) -> Result<Vec<Order>, Error> {
    stations
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let (from, to) = (&pair[0], &pair[1]);
            let edge = network
                .pair_between(from, to)
                .ok_or_else(|| Error::NotConnected {
                    from: from.to_string(),
                    to: to.to_string(),
                })?;
            Ok(Order {
                sequence: i as u32 + 1,
                route_id: route_id.clone(),
                pair_id: edge.pair_id,
                from: edge.from,
                to: edge.to,
                distance: edge.distance,
                travel_time: edge.travel_time,
            })
        })
        .collect()
}

pub fn total_travel_time(orders: &[Order]) -> Duration {
    orders.iter().map(|order| order.travel_time).sum()
}

/// Checks that the routing service answered with exactly one segment per consecutive point
/// pair, in the requested direction.
pub fn check_segments(points: &[RoutePoint], segments: &[Segment]) -> Result<(), Error> {
    let expected = points.len().saturating_sub(1);
    if segments.len() != expected {
        return Err(Error::SegmentCount {
            expected,
            found: segments.len(),
        });
    }
    for (index, (pair, segment)) in points.windows(2).zip(segments).enumerate() {
        if pair[0].id != segment.from || pair[1].id != segment.to {
            return Err(Error::SegmentMismatch {
                index,
                expected_from: pair[0].id.to_string(),
                expected_to: pair[1].id.to_string(),
                found_from: segment.from.to_string(),
                found_to: segment.to.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(from: &str, to: &str, coords: &[(f64, f64)]) -> Segment {
        Segment {
            from: from.into(),
            to: to.into(),
            coordinates: coords.iter().map(|c| Coordinate::from(*c)).collect(),
        }
    }

    #[test]
    fn shared_endpoints_are_merged() {
        let segments = vec![
            segment("a", "b", &[(0.0, 0.0), (0.0, 1.0)]),
            segment("b", "c", &[(0.0, 1.0), (1.0, 1.0)]),
        ];
        let stitched = stitch(&segments);
        assert_eq!(stitched.len(), 3);
        assert_eq!(stitched[1], Coordinate::from((0.0, 1.0)));
    }

    #[test]
    fn repeats_inside_a_segment_are_merged() {
        let segments = vec![segment("a", "b", &[(0.0, 0.0), (0.0, 0.0), (0.0, 1.0)])];
        assert_eq!(stitch(&segments).len(), 2);
    }

    #[test]
    fn non_adjacent_repeats_are_kept() {
        let segments = vec![
            segment("a", "b", &[(0.0, 0.0), (0.0, 1.0)]),
            segment("b", "a", &[(0.0, 1.0), (0.0, 0.0)]),
        ];
        assert_eq!(stitch(&segments).len(), 3);
    }

    #[test]
    fn empty_input() {
        assert!(stitch(&[]).is_empty());
    }

    #[test]
    fn segment_direction_is_checked() {
        let points = vec![
            RoutePoint::new("a", Coordinate::from((0.0, 0.0))),
            RoutePoint::new("b", Coordinate::from((0.0, 1.0))),
        ];
        let segments = vec![segment("b", "a", &[(0.0, 1.0), (0.0, 0.0)])];
        assert!(matches!(
            check_segments(&points, &segments),
            Err(Error::SegmentMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn segment_count_is_checked() {
        let points = vec![
            RoutePoint::new("a", Coordinate::from((0.0, 0.0))),
            RoutePoint::new("b", Coordinate::from((0.0, 1.0))),
            RoutePoint::new("c", Coordinate::from((1.0, 1.0))),
        ];
        let segments = vec![segment("a", "b", &[(0.0, 0.0), (0.0, 1.0)])];
        assert!(matches!(
            check_segments(&points, &segments),
            Err(Error::SegmentCount {
                expected: 2,
                found: 1
            })
        ));
    }
}
