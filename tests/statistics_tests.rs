mod common;

use tramline::statistics::{Metric, SimulationResponse, Statistics};

const RESPONSE: &str = r#"{
  "result": "success",
  "simulation_result": {
    "result_summary": {
      "average_waiting_time": 240.0,
      "average_queue_length": 3.0,
      "average_utilization": 0.6,
      "average_travel_time": 900.0,
      "average_travel_distance": 4.2
    },
    "slot_results": [
      {
        "slot_name": "08:00-08:15",
        "result_total_station": { "average_waiting_time": 200.0, "average_queue_length": 2.0 },
        "result_station": [
          { "station_name": "Alpha", "average_waiting_time": 120.0, "average_queue_length": 2.0 },
          { "station_name": "Unknown Stop", "average_waiting_time": 60.0, "average_queue_length": 1.0 }
        ],
        "result_route": [
          { "route_id": "10", "average_utilization": 0.5, "average_travel_time": 0.0,
            "average_travel_distance": 0.0, "average_waiting_time": 120.0,
            "average_queue_length": 1.0, "customers_count": 4 },
          { "route_id": "2", "average_utilization": 0.25, "average_travel_time": 600.0,
            "average_travel_distance": 3.0, "average_waiting_time": 60.0,
            "average_queue_length": 2.0, "customers_count": 7 }
        ]
      },
      {
        "slot_name": "08:15-08:30",
        "result_total_station": { "average_waiting_time": 280.0, "average_queue_length": 4.0 },
        "result_station": [
          { "station_name": " alpha ", "average_waiting_time": 240.0, "average_queue_length": 4.0 }
        ],
        "result_route": [
          { "route_id": "10", "average_utilization": 0.7, "average_travel_time": 900.0,
            "average_travel_distance": 5.0, "average_waiting_time": 180.0,
            "average_queue_length": 3.0, "customers_count": 3 }
        ]
      }
    ]
  },
  "logs": [{ "time": "08:00", "component": "engine", "message": "started" }]
}"#;

fn response() -> SimulationResponse {
    serde_json::from_str(RESPONSE).unwrap()
}

#[test]
fn by_route_means_and_sums() {
    let response = response();
    let routes = Statistics::new(&response.simulation_result).by_route();

    // Ordered numerically, so 2 comes before 10.
    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0].route_id, "2");
    assert_eq!(routes[1].route_id, "10");

    let ten = &routes[1];
    assert_eq!(ten.slots, 2);
    assert_eq!(ten.customers_count, 7);
    assert_eq!(ten.average_waiting_time, 150.0);
    assert_eq!(ten.average_queue_length, 2.0);
    assert!((ten.average_utilization - 0.6).abs() < 1e-9);
    // The first slot reports no travel data.
    assert_eq!(ten.average_travel_time, 900.0);
    assert_eq!(ten.average_travel_distance, 5.0);
}

#[test]
fn mean_of_one_observation_is_identity() {
    let response = response();
    let routes = Statistics::new(&response.simulation_result).by_route();
    let two = &routes[0];
    assert_eq!(two.slots, 1);
    assert_eq!(two.average_waiting_time, 60.0);
    assert_eq!(two.average_utilization, 0.25);
    assert_eq!(two.average_travel_time, 600.0);
    assert_eq!(two.customers_count, 7);
}

#[test]
fn customer_totals_match_manual_sum() {
    let response = response();
    let statistics = Statistics::new(&response.simulation_result);
    let manual: u64 = response
        .simulation_result
        .slot_results
        .iter()
        .flat_map(|slot| slot.result_route.iter())
        .map(|route| route.customers_count)
        .sum();
    let total: u64 = statistics
        .by_route()
        .iter()
        .map(|route| route.customers_count)
        .sum();
    assert_eq!(total, manual);
}

#[test]
fn top_routes_break_ties_by_id() {
    let response = response();
    let top = Statistics::new(&response.simulation_result).top_routes_by_customers(5);
    assert_eq!(top, vec![("2".to_string(), 7), ("10".to_string(), 7)]);

    let top = Statistics::new(&response.simulation_result).top_routes_by_customers(1);
    assert_eq!(top.len(), 1);
}

fn mixed_id_result() -> SimulationResponse {
    let ids = [("10", 5), ("9", 5), ("1a", 5), ("007", 5), ("b", 9), ("7", 5)];
    let routes: Vec<serde_json::Value> = ids
        .into_iter()
        .map(|(route_id, customers)| {
            serde_json::json!({
                "route_id": route_id,
                "average_utilization": 0.5,
                "average_travel_time": 600.0,
                "average_travel_distance": 3.0,
                "average_waiting_time": 60.0,
                "average_queue_length": 1.0,
                "customers_count": customers,
            })
        })
        .collect();
    serde_json::from_value(serde_json::json!({
        "result": "success",
        "simulation_result": {
            "slot_results": [{ "slot_name": "08:00-08:15", "result_route": routes }]
        }
    }))
    .unwrap()
}

#[test]
fn mixed_route_ids_have_a_stable_order() {
    let response = mixed_id_result();
    for _ in 0..50 {
        let statistics = Statistics::new(&response.simulation_result);
        let ids: Vec<String> = statistics
            .by_route()
            .into_iter()
            .map(|route| route.route_id)
            .collect();
        assert_eq!(ids, vec!["007", "7", "9", "10", "1a", "b"]);

        let top: Vec<String> = statistics
            .top_routes_by_customers(10)
            .into_iter()
            .map(|(route_id, _)| route_id)
            .collect();
        assert_eq!(top, vec!["b", "007", "7", "9", "10", "1a"]);
    }
}

#[test]
fn stations_group_by_normalized_name() {
    let response = response();
    let stations = Statistics::new(&response.simulation_result).by_station();
    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0].station_name, "Alpha");
    assert_eq!(stations[0].slots, 2);
    assert_eq!(stations[0].average_waiting_time, 180.0);
    assert_eq!(stations[0].average_queue_length, 3.0);
}

#[test]
fn series_converts_units() {
    let response = response();
    let statistics = Statistics::new(&response.simulation_result);

    let waiting = statistics.series(Metric::WaitingTime);
    assert_eq!(waiting.len(), 3);
    assert_eq!(waiting[0].slot, "08:00");
    assert_eq!(waiting[0].route_id, "10");
    assert_eq!(waiting[0].value, 2.0);
    assert_eq!(waiting[2].slot, "08:15");

    let utilization = statistics.series(Metric::Utilization);
    assert_eq!(utilization[1].value, 25.0);

    let queue = statistics.series(Metric::QueueLength);
    assert_eq!(queue[2].value, 3.0);
}

#[test]
fn slot_interval() {
    let response = response();
    assert_eq!(
        Statistics::new(&response.simulation_result).slot_interval_minutes(),
        15
    );

    let mut single = response.simulation_result.clone();
    single.slot_results.truncate(1);
    assert_eq!(Statistics::new(&single).slot_interval_minutes(), 15);

    let mut hourly = response.simulation_result.clone();
    hourly.slot_results[1].slot_name = "09:00-10:00".to_string();
    assert_eq!(Statistics::new(&hourly).slot_interval_minutes(), 60);

    let mut unordered = response.simulation_result;
    unordered.slot_results[1].slot_name = "07:00-07:15".to_string();
    assert_eq!(Statistics::new(&unordered).slot_interval_minutes(), 15);
}

#[test]
fn heatmap_joins_network_and_skips_unknown() {
    let network = common::network();
    let response = response();
    let heatmap = Statistics::new(&response.simulation_result).station_heatmap(&network);
    assert_eq!(heatmap.len(), 1);
    let alpha = &heatmap[0];
    assert_eq!(alpha.station_id, "a");
    assert_eq!(alpha.coord, [13.70, 100.50]);
    assert_eq!(alpha.average_waiting_time, 3.0);
}

#[test]
fn empty_result() {
    let response: SimulationResponse =
        serde_json::from_str(r#"{ "result": "success", "simulation_result": {} }"#).unwrap();
    let statistics = Statistics::new(&response.simulation_result);
    assert!(statistics.by_route().is_empty());
    assert!(statistics.series(Metric::WaitingTime).is_empty());
    assert_eq!(statistics.slot_interval_minutes(), 15);
    assert!(response.logs.is_empty());
}
