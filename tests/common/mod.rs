#![allow(dead_code)]

use tramline::{
    network::{Network, Station, StationPair},
    route::{Route, RouteEditor, Segment},
    shared::{Coordinate, Distance, Duration},
};

pub fn station(id: &str, name: &str, latitude: f64, longitude: f64) -> Station {
    Station {
        id: id.into(),
        name: name.into(),
        coordinate: Coordinate {
            latitude,
            longitude,
        },
        ..Default::default()
    }
}

pub fn pair(id: &str, from: &str, to: &str, travel_time: u32, meters: f64) -> StationPair {
    StationPair {
        id: id.into(),
        fst_station: from.into(),
        snd_station: to.into(),
        distance: Some(Distance::from_meters(meters)),
        travel_time: Duration::from_seconds(travel_time),
        ..Default::default()
    }
}

/// a - b - c - d in a line, c/d stored in reverse, e unconnected.
pub fn network() -> Network {
    let mut network = Network::new();
    network.add_station(station("a", "Alpha", 13.70, 100.50)).unwrap();
    network.add_station(station("b", "Bravo", 13.71, 100.51)).unwrap();
    network.add_station(station("c", "Charlie", 13.72, 100.52)).unwrap();
    network.add_station(station("d", "Delta", 13.73, 100.53)).unwrap();
    network.add_station(station("e", "Echo", 13.80, 100.60)).unwrap();
    network.add_station_pair(pair("ab", "a", "b", 300, 1_000.0)).unwrap();
    network.add_station_pair(pair("bc", "b", "c", 300, 1_200.0)).unwrap();
    network.add_station_pair(pair("dc", "d", "c", 240, 900.0)).unwrap();
    network
}

/// Commits `stations` to route `id` with straight segments, without a routing service.
pub fn commit_straight(
    editor: &mut RouteEditor,
    network: &Network,
    id: &str,
    stations: &[&str],
) -> Route {
    editor.begin_edit(id).unwrap();
    for station in stations {
        editor.push_station(network, station).unwrap();
    }
    let request = editor.prepare(network).unwrap();
    let segments: Vec<Segment> = request
        .points
        .windows(2)
        .map(|pair| Segment {
            from: pair[0].id.clone(),
            to: pair[1].id.clone(),
            coordinates: vec![pair[0].coordinate(), pair[1].coordinate()],
        })
        .collect();
    editor.commit(request, segments).unwrap().clone()
}
