use std::{collections::HashMap, io, sync::Arc, time::Instant};

use thiserror::Error;
use tracing::{debug, warn};

mod config;
mod models;
mod reader;
pub mod records;

pub use config::*;
pub use models::*;
pub use reader::*;

use crate::shared::{Identifiable, geo::Coordinate};

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Csv file {0} is missing header")]
    MissingHeader(String),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
    #[error("Station {0} has an invalid coordinate")]
    InvalidCoordinate(String),
    #[error("Station id {0} is used more than once")]
    DuplicateStation(String),
    #[error("Station id {0} does not match any entry")]
    UnknownStation(String),
}

type PairKey = (Arc<str>, Arc<str>);

/// The station graph routes are assembled from.
#[derive(Debug, Clone, Default)]
pub struct Network {
    stations: Vec<Station>,
    pairs: Vec<StationPair>,

    station_lookup: HashMap<Arc<str>, u32>,
    pair_lookup: HashMap<PairKey, u32>,
}

impl Network {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn load(mut self, reader: &NetworkReader) -> Result<Self, Error> {
        self.load_stations(reader)?;
        self.load_station_pairs(reader)?;
        Ok(self)
    }

    fn load_stations(&mut self, reader: &NetworkReader) -> Result<(), Error> {
        debug!("Loading stations...");
        let now = Instant::now();
        let mut stations: Vec<Station> = Vec::new();
        reader.stream_stations(|(_, record)| stations.push(record.into()))?;
        for station in stations {
            if let Err(err) = self.add_station(station) {
                warn!("Skipping station: {err}");
            }
        }
        debug!(
            "Loading {} stations took {:?}",
            self.stations.len(),
            now.elapsed()
        );
        Ok(())
    }

    fn load_station_pairs(&mut self, reader: &NetworkReader) -> Result<(), Error> {
        debug!("Loading station pairs...");
        let now = Instant::now();
        let mut pairs: Vec<StationPair> = Vec::new();
        reader.stream_station_pairs(|(_, record)| pairs.push(record.into()))?;
        for pair in pairs {
            if let Err(err) = self.add_station_pair(pair) {
                warn!("Skipping station pair: {err}");
            }
        }
        debug!(
            "Loading {} station pairs took {:?}",
            self.pairs.len(),
            now.elapsed()
        );
        Ok(())
    }

    /// Adds a station, rejecting invalid coordinates and duplicate ids.
    pub fn add_station(&mut self, mut station: Station) -> Result<&Station, Error> {
        if !station.coordinate.is_valid() {
            return Err(Error::InvalidCoordinate(station.id.to_string()));
        }
        if self.station_lookup.contains_key(&station.id) {
            return Err(Error::DuplicateStation(station.id.to_string()));
        }
        let index = self.stations.len() as u32;
        station.index = index;
        self.station_lookup.insert(station.id.clone(), index);
        self.stations.push(station);
        Ok(&self.stations[index as usize])
    }

    /// Adds an edge between two known stations. A later pair for the same direction replaces
    /// the earlier lookup entry.
    pub fn add_station_pair(&mut self, mut pair: StationPair) -> Result<&StationPair, Error> {
        for station_id in [&pair.fst_station, &pair.snd_station] {
            if !self.station_lookup.contains_key(station_id) {
                return Err(Error::UnknownStation(station_id.to_string()));
            }
        }
        let index = self.pairs.len() as u32;
        pair.index = index;
        self.pair_lookup
            .insert((pair.fst_station.clone(), pair.snd_station.clone()), index);
        self.pairs.push(pair);
        Ok(&self.pairs[index as usize])
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station_pairs(&self) -> &[StationPair] {
        &self.pairs
    }

    pub fn station_by_id(&self, id: &str) -> Option<&Station> {
        let index = self.station_lookup.get(id)?;
        Some(&self.stations[*index as usize])
    }

    pub fn coordinate_of(&self, id: &str) -> Option<Coordinate> {
        self.station_by_id(id).map(|station| station.coordinate)
    }

    /// Case-insensitive lookup by id first, then by display name.
    pub fn station_by_key(&self, key: &str) -> Option<&Station> {
        if let Some(station) = self.station_by_id(key) {
            return Some(station);
        }
        find_by_key(&self.stations, key)
    }

    /// Finds the edge connecting `from` to `to`, preferring a pair stored in that direction
    /// and falling back to the reverse pair.
    pub fn pair_between(&self, from: &str, to: &str) -> Option<OrientedPair> {
        let key: PairKey = (from.into(), to.into());
        if let Some(index) = self.pair_lookup.get(&key) {
            let pair = &self.pairs[*index as usize];
            return Some(OrientedPair {
                pair_id: pair.id.clone(),
                from: pair.fst_station.clone(),
                to: pair.snd_station.clone(),
                distance: pair.distance,
                travel_time: pair.travel_time,
                reversed: false,
            });
        }
        let key: PairKey = (to.into(), from.into());
        let pair = &self.pairs[*self.pair_lookup.get(&key)? as usize];
        Some(OrientedPair {
            pair_id: pair.id.clone(),
            from: pair.snd_station.clone(),
            to: pair.fst_station.clone(),
            distance: pair.distance,
            travel_time: pair.travel_time,
            reversed: true,
        })
    }
}

/// Matches `key` against ids and names, ignoring case and surrounding whitespace.
pub fn find_by_key<'a, T: Identifiable>(items: &'a [T], key: &str) -> Option<&'a T> {
    let key = key.trim().to_lowercase();
    items
        .iter()
        .find(|item| item.id().to_lowercase() == key)
        .or_else(|| items.iter().find(|item| item.name().trim().to_lowercase() == key))
}
