use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    schedule::{Error, ScheduleEntry},
    shared::Identifiable,
};

/// One row of an uploaded schedule sheet. `route` may hold a route's display name or its id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScheduleRecord {
    #[serde(alias = "route_id", alias = "route_name", alias = "RoutePathID")]
    pub route: String,
    #[serde(alias = "ScheduleList")]
    pub schedule_list: String,
}

impl ScheduleRecord {
    /// Maps the record onto a known route, matching display names first and otherwise using
    /// the raw value as the route id.
    pub fn resolve<T: Identifiable>(self, routes: &[T]) -> ScheduleEntry {
        let key = self.route.trim();
        let route_id = routes
            .iter()
            .find(|route| route.name() == key)
            .map(|route| route.id().to_string())
            .unwrap_or_else(|| key.to_string());
        ScheduleEntry {
            route_id,
            schedule_list: self.schedule_list,
        }
    }
}

/// Reads `route,schedule_list` rows from a CSV export of the schedule sheet.
pub struct ScheduleReader;

impl ScheduleReader {
    pub fn read<R: Read>(reader: R) -> Result<Vec<ScheduleRecord>, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let records = reader
            .deserialize()
            .collect::<Result<Vec<ScheduleRecord>, csv::Error>>()?;
        debug!("Read {} schedule records", records.len());
        Ok(records)
    }

    /// Reads the sheet and resolves every row against `routes`.
    pub fn read_entries<R: Read, T: Identifiable>(
        reader: R,
        routes: &[T],
    ) -> Result<Vec<ScheduleEntry>, Error> {
        Ok(Self::read(reader)?
            .into_iter()
            .map(|record| record.resolve(routes))
            .collect())
    }
}
