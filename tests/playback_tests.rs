mod common;

use tramline::{
    playback::{
        PROGRESS_CAP, PlaybackContext, PlaybackFrame, PlaybackRoute, PositionSource, TimeGrid,
        build_frames, frames_for,
    },
    route::{Route, RouteEditor},
    schedule::{ScheduleEntry, SimWindow},
    shared::{Coordinate, Duration, Time},
};

fn entry(route_id: &str, schedule_list: &str) -> ScheduleEntry {
    ScheduleEntry {
        route_id: route_id.to_string(),
        schedule_list: schedule_list.to_string(),
    }
}

fn window(raw: &str) -> SimWindow {
    raw.parse().unwrap()
}

fn frame<'a>(frames: &'a [PlaybackFrame], label: &str) -> &'a PlaybackFrame {
    frames.iter().find(|frame| frame.time_label == label).unwrap()
}

/// Route A runs a-b-c in 600 s, route B a-b without a schedule.
fn scenario_routes() -> Vec<Route> {
    let network = common::network();
    let mut editor = RouteEditor::new();
    editor.add_route(Route::new("A", "Route A")).unwrap();
    editor.add_route(Route::new("B", "Route B")).unwrap();
    common::commit_straight(&mut editor, &network, "A", &["a", "b", "c"]);
    common::commit_straight(&mut editor, &network, "B", &["a", "b"]);
    editor.routes().to_vec()
}

fn line(points: usize) -> Vec<Coordinate> {
    (0..points)
        .map(|i| Coordinate::from((13.0 + i as f64 * 0.01, 100.0)))
        .collect()
}

#[test]
fn end_to_end_scenario() {
    let routes = scenario_routes();
    assert_eq!(routes[0].total_travel_time(), Some(Duration::from_seconds(600)));

    let frames = build_frames(
        &routes,
        &[entry("A", "08:00,08:10")],
        window("08:00-08:20"),
        5,
    )
    .unwrap();
    let labels: Vec<&str> = frames.iter().map(|frame| frame.time_label.as_str()).collect();
    assert_eq!(labels, vec!["08:00", "08:05", "08:10", "08:15", "08:20"]);

    let first = frame(&frames, "08:00");
    assert_eq!(first.vehicles.len(), 1);
    assert_eq!(first.vehicles[0].id, "A-1");
    assert_eq!(first.vehicles[0].progress, 0.0);
    assert_eq!(first.vehicles[0].coord, routes[0].geometry()[0].to_lat_lon());

    let middle = frame(&frames, "08:10");
    assert_eq!(middle.vehicles.len(), 2);
    assert_eq!(middle.vehicles[0].progress, PROGRESS_CAP);
    assert_eq!(middle.vehicles[1].progress, 0.0);

    let last = frame(&frames, "08:20");
    assert_eq!(last.vehicles.len(), 2);
    for vehicle in last.vehicles.iter() {
        assert_eq!(&*vehicle.route_id, "A");
        assert!((vehicle.progress - 0.95).abs() < 1e-9);
        assert_eq!(vehicle.position_source, PositionSource::TravelTime);
    }

    let route_b_vehicles = frames
        .iter()
        .flat_map(|frame| frame.vehicles.iter())
        .filter(|vehicle| &*vehicle.route_id == "B")
        .count();
    assert_eq!(route_b_vehicles, 0);
}

#[test]
fn frames_are_deterministic() {
    let routes = scenario_routes();
    let schedules = [entry("A", "08:00,08:07,08:13"), entry("B", "08:02")];
    let first = build_frames(&routes, &schedules, window("08:00-09:00"), 1).unwrap();
    let second = build_frames(&routes, &schedules, window("08:00-09:00"), 1).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 61);
}

#[test]
fn single_departure_progress() {
    let route = PlaybackRoute::new("x", line(20))
        .with_departures(vec![Time::from_hm(8, 0)])
        .with_travel_time(Some(Duration::from_minutes(10)));
    let grid = TimeGrid::new(&window("07:50-08:30"), 5);
    let frames = frames_for(&grid, &[route]);

    for frame in frames.iter() {
        let minutes = frame.time.as_minutes();
        if minutes < 480 {
            assert!(frame.vehicles.is_empty(), "{} has vehicles", frame.time_label);
            continue;
        }
        let progress = frame.vehicles[0].progress;
        match minutes {
            480 => assert_eq!(progress, 0.0),
            485 => assert_eq!(progress, 0.5),
            _ => assert_eq!(progress, PROGRESS_CAP),
        }
        assert!(progress < 1.0);
    }
}

#[test]
fn progress_maps_onto_geometry_index() {
    let coordinates = line(10);
    let route = PlaybackRoute::new("x", coordinates.clone())
        .with_departures(vec![Time::from_hm(8, 0)])
        .with_travel_time(Some(Duration::from_minutes(10)));
    let mut vehicles = Vec::new();
    route.positions_at(Time::from_hm(8, 5), &mut vehicles);
    // floor(0.5 * 10) = 5
    assert_eq!(vehicles[0].coord, coordinates[5].to_lat_lon());

    vehicles.clear();
    route.positions_at(Time::from_hm(9, 0), &mut vehicles);
    // floor(0.95 * 10) = 9, the last coordinate
    assert_eq!(vehicles[0].coord, coordinates[9].to_lat_lon());
}

#[test]
fn even_spacing_without_travel_time() {
    let route = PlaybackRoute::new("x", line(9))
        .with_departures(vec![Time::from_hm(8, 10), Time::from_hm(8, 0)]);
    let mut vehicles = Vec::new();
    route.positions_at(Time::from_hm(8, 30), &mut vehicles);

    assert_eq!(vehicles.len(), 2);
    assert_eq!(vehicles[0].id, "x-1");
    assert!((vehicles[0].progress - 1.0 / 3.0).abs() < 1e-9);
    assert!((vehicles[1].progress - 2.0 / 3.0).abs() < 1e-9);
    for vehicle in vehicles.iter() {
        assert_eq!(vehicle.position_source, PositionSource::EvenSpacing);
    }

    vehicles.clear();
    route.positions_at(Time::from_hm(8, 5), &mut vehicles);
    assert_eq!(vehicles.len(), 1);
}

#[test]
fn zero_travel_time_falls_back_to_even_spacing() {
    let route = PlaybackRoute::new("x", line(4))
        .with_departures(vec![Time::from_hm(8, 0)])
        .with_travel_time(Some(Duration::ZERO));
    let mut vehicles = Vec::new();
    route.positions_at(Time::from_hm(8, 0), &mut vehicles);
    assert_eq!(vehicles[0].position_source, PositionSource::EvenSpacing);
    assert_eq!(vehicles[0].progress, 0.5);
}

#[test]
fn empty_geometry_contributes_nothing() {
    let route = PlaybackRoute::new("x", Vec::<Coordinate>::new()).with_departures(vec![Time::from_hm(8, 0)]);
    let grid = TimeGrid::new(&window("08:00-08:30"), 15);
    let frames = frames_for(&grid, &[route]);
    assert_eq!(frames.len(), 3);
    assert!(frames.iter().all(|frame| frame.vehicles.is_empty()));
}

#[test]
fn hidden_routes_are_skipped() {
    let mut routes = scenario_routes();
    routes[0].hidden = true;
    let frames = build_frames(&routes, &[entry("A", "08:00")], window("08:00-08:10"), 5).unwrap();
    assert!(frames.iter().all(|frame| frame.vehicles.is_empty()));
}

#[test]
fn departures_outside_window_are_dropped() {
    let routes = scenario_routes();
    let context = PlaybackContext::new(window("08:00-08:30"), 15)
        .with_schedule("A", "07:45,08:15,09:00")
        .unwrap()
        .with_schedule("A", "08:05")
        .unwrap();
    let departures: Vec<u32> = context.departures("A").iter().map(Time::as_minutes).collect();
    assert_eq!(departures, vec![485, 495]);
    assert!(context.departures("B").is_empty());

    let frames = context.build_frames(&routes);
    assert_eq!(frame(&frames, "08:00").vehicles.len(), 0);
    assert_eq!(frame(&frames, "08:15").vehicles.len(), 2);
}

#[test]
fn invalid_schedule_is_rejected() {
    let routes = scenario_routes();
    let result = build_frames(&routes, &[entry("A", "08:00,noon")], window("08:00-09:00"), 15);
    assert!(result.is_err());
}

#[test]
fn vehicles_serialize_in_camel_case() {
    let routes = scenario_routes();
    let frames = build_frames(&routes, &[entry("A", "08:00")], window("08:00-08:00"), 5).unwrap();
    let json = serde_json::to_value(&frames[0]).unwrap();
    assert_eq!(json["timeLabel"], "08:00");
    assert_eq!(json["vehicles"][0]["routeId"], "A");
    assert_eq!(json["vehicles"][0]["positionSource"], "travelTime");
    assert!(json.get("time").is_none());
}
