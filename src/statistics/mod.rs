use std::{cmp::Ordering, collections::HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

mod models;
pub use models::*;

use crate::{
    network::Network,
    shared::{compare_ids, time::Time},
};

/// Slot size assumed when the result carries fewer than two slots.
pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 15;

#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Zero and negative values mean the slot carried no data.
    fn push_positive(&mut self, value: f64) {
        if value > 0.0 {
            self.push(value);
        }
    }

    fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub route_id: String,
    pub average_waiting_time: f64,
    pub average_queue_length: f64,
    pub average_utilization: f64,
    pub average_travel_time: f64,
    pub average_travel_distance: f64,
    pub customers_count: u64,
    pub slots: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSummary {
    /// Name as first reported by the simulation.
    pub station_name: String,
    pub average_waiting_time: f64,
    pub average_queue_length: f64,
    pub slots: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// Minutes.
    WaitingTime,
    QueueLength,
    /// Percent.
    Utilization,
}

impl Metric {
    fn of(&self, route: &RouteResult) -> f64 {
        match self {
            Metric::WaitingTime => route.average_waiting_time / 60.0,
            Metric::QueueLength => route.average_queue_length,
            Metric::Utilization => route.average_utilization * 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub slot: String,
    pub route_id: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapPoint {
    pub station_id: String,
    pub station_name: String,
    /// `[lat, lon]`.
    pub coord: [f64; 2],
    /// Minutes.
    pub average_waiting_time: f64,
    pub average_queue_length: f64,
}

#[derive(Default)]
struct RouteAccumulator {
    waiting_time: Mean,
    queue_length: Mean,
    utilization: Mean,
    travel_time: Mean,
    travel_distance: Mean,
    customers: u64,
    slots: usize,
}

#[derive(Default)]
struct StationAccumulator {
    name: String,
    waiting_time: Mean,
    queue_length: Mean,
}

fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Reduces per-slot simulation results into per-route and per-station summaries.
pub struct Statistics<'a> {
    result: &'a SimulationResult,
}

impl<'a> Statistics<'a> {
    pub fn new(result: &'a SimulationResult) -> Self {
        Self { result }
    }

    pub fn summary(&self) -> &ResultSummary {
        &self.result.result_summary
    }

    pub fn slots(&self) -> &[SlotResult] {
        &self.result.slot_results
    }

    /// Per-route means across slots, ordered by route id.
    pub fn by_route(&self) -> Vec<RouteSummary> {
        let mut accumulators: HashMap<&str, RouteAccumulator> = HashMap::new();
        for route in self.result.slot_results.iter().flat_map(|slot| &slot.result_route) {
            let acc = accumulators.entry(route.route_id.as_str()).or_default();
            acc.waiting_time.push(route.average_waiting_time);
            acc.queue_length.push(route.average_queue_length);
            acc.utilization.push(route.average_utilization);
            acc.travel_time.push_positive(route.average_travel_time);
            acc.travel_distance.push_positive(route.average_travel_distance);
            acc.customers += route.customers_count;
            acc.slots += 1;
        }

        let mut summaries: Vec<RouteSummary> = accumulators
            .into_iter()
            .map(|(route_id, acc)| RouteSummary {
                route_id: route_id.to_string(),
                average_waiting_time: acc.waiting_time.value(),
                average_queue_length: acc.queue_length.value(),
                average_utilization: acc.utilization.value(),
                average_travel_time: acc.travel_time.value(),
                average_travel_distance: acc.travel_distance.value(),
                customers_count: acc.customers,
                slots: acc.slots,
            })
            .collect();
        summaries.sort_by(|a, b| compare_ids(&a.route_id, &b.route_id));
        debug!(
            "Summarized {} routes over {} slots",
            summaries.len(),
            self.result.slot_results.len()
        );
        summaries
    }

    /// Per-station means across slots. Stations are grouped by trimmed, lowercased name.
    pub fn by_station(&self) -> Vec<StationSummary> {
        let mut accumulators: HashMap<String, StationAccumulator> = HashMap::new();
        for station in self.result.slot_results.iter().flat_map(|slot| &slot.result_station) {
            let acc = accumulators
                .entry(normalize(&station.station_name))
                .or_insert_with(|| StationAccumulator {
                    name: station.station_name.clone(),
                    ..Default::default()
                });
            acc.waiting_time.push(station.average_waiting_time);
            acc.queue_length.push(station.average_queue_length);
        }

        let mut summaries: Vec<(String, StationSummary)> = accumulators
            .into_iter()
            .map(|(key, acc)| {
                let summary = StationSummary {
                    station_name: acc.name,
                    average_waiting_time: acc.waiting_time.value(),
                    average_queue_length: acc.queue_length.value(),
                    slots: acc.waiting_time.count,
                };
                (key, summary)
            })
            .collect();
        summaries.sort_by(|(a, _), (b, _)| compare_ids(a, b));
        summaries.into_iter().map(|(_, summary)| summary).collect()
    }

    /// One point per slot and route, in slot order.
    pub fn series(&self, metric: Metric) -> Vec<SeriesPoint> {
        self.result
            .slot_results
            .iter()
            .flat_map(|slot| {
                slot.result_route.iter().map(move |route| SeriesPoint {
                    slot: slot.start_label().to_string(),
                    route_id: route.route_id.clone(),
                    value: metric.of(route),
                })
            })
            .collect()
    }

    /// `(route id, total customers)`, busiest first.
    pub fn top_routes_by_customers(&self, limit: usize) -> Vec<(String, u64)> {
        let mut totals: Vec<(String, u64)> = self
            .by_route()
            .into_iter()
            .map(|summary| (summary.route_id, summary.customers_count))
            .collect();
        totals.sort_by(|(a_id, a), (b_id, b)| match b.cmp(a) {
            Ordering::Equal => compare_ids(a_id, b_id),
            ordering => ordering,
        });
        totals.truncate(limit);
        totals
    }

    /// Minutes between the starts of the first two slots.
    pub fn slot_interval_minutes(&self) -> u32 {
        let start_minutes = |slot: &SlotResult| {
            Time::parse_hm(slot.start_label()).map(|time| time.as_minutes())
        };
        match self.result.slot_results.as_slice() {
            [first, second, ..] => match (start_minutes(first), start_minutes(second)) {
                (Some(first), Some(second)) if second > first => second - first,
                _ => DEFAULT_SLOT_INTERVAL_MINUTES,
            },
            _ => DEFAULT_SLOT_INTERVAL_MINUTES,
        }
    }

    /// Station waiting times placed on the network. Stations are matched by id or name;
    /// unmatched ones are left out.
    pub fn station_heatmap(&self, network: &Network) -> Vec<HeatmapPoint> {
        self.by_station()
            .into_iter()
            .filter_map(|summary| {
                let Some(station) = network.station_by_key(&summary.station_name) else {
                    warn!(
                        "Station {:?} from the simulation result is not in the network",
                        summary.station_name
                    );
                    return None;
                };
                Some(HeatmapPoint {
                    station_id: station.id.to_string(),
                    station_name: station.name.to_string(),
                    coord: station.coordinate.to_lat_lon(),
                    average_waiting_time: summary.average_waiting_time / 60.0,
                    average_queue_length: summary.average_queue_length,
                })
            })
            .collect()
    }
}

#[test]
fn mean_skips_nothing_when_empty() {
    assert_eq!(Mean::default().value(), 0.0);
}

#[test]
fn mean_positive_ignores_empty_slots() {
    let mut mean = Mean::default();
    mean.push_positive(0.0);
    mean.push_positive(120.0);
    mean.push_positive(-1.0);
    mean.push_positive(60.0);
    assert_eq!(mean.value(), 90.0);
}
