use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};
use tracing::warn;
use zip::ZipArchive;

use crate::network::{
    self, Config,
    records::{StationPairRecord, StationRecord},
};

#[derive(Default)]
pub enum StorageType {
    #[default]
    None,
    Zip(PathBuf),
    Directory(PathBuf),
}

/// Streams network model records out of a zip archive or a plain directory of CSV files.
#[derive(Default)]
pub struct NetworkReader {
    config: Config,
    storage: StorageType,
}

impl NetworkReader {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            storage: Default::default(),
        }
    }

    pub fn from_zip<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = StorageType::Zip(path.as_ref().to_owned());
        self
    }

    pub fn from_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = StorageType::Directory(path.as_ref().to_owned());
        self
    }

    /// Picks zip or directory storage from what is on disk.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Self {
        if path.as_ref().is_dir() {
            self.from_directory(path)
        } else {
            self.from_zip(path)
        }
    }

    pub fn stream_stations<F>(&self, f: F) -> Result<(), network::Error>
    where
        F: FnMut((usize, StationRecord)),
    {
        self.stream(&self.config.stations_file_name, f)
    }

    pub fn stream_station_pairs<F>(&self, f: F) -> Result<(), network::Error>
    where
        F: FnMut((usize, StationPairRecord)),
    {
        self.stream(&self.config.station_pairs_file_name, f)
    }

    fn stream<T, F>(&self, file_name: &str, f: F) -> Result<(), network::Error>
    where
        T: DeserializeOwned,
        F: FnMut((usize, T)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => {
                let zip_file = File::open(path)?;
                let mut archive = ZipArchive::new(zip_file)?;
                let index = archive
                    .index_for_name(file_name)
                    .ok_or(network::Error::FileNotFound(file_name.to_string()))?;
                let file = archive.by_index(index)?;
                stream_csv(file, file_name, f)
            }
            StorageType::Directory(path) => {
                let full_path = path.join(file_name);
                if !full_path.exists() {
                    return Err(network::Error::FileNotFound(file_name.to_string()));
                }
                stream_csv(File::open(full_path)?, file_name, f)
            }
        }
    }
}

fn stream_csv<R, T, F>(reader: R, file_name: &str, f: F) -> Result<(), network::Error>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    if reader.headers()?.is_empty() {
        return Err(network::Error::MissingHeader(file_name.to_string()));
    }
    reader
        .deserialize()
        .filter_map(|record| match record {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Skipping malformed row in {file_name}: {err}");
                None
            }
        })
        .enumerate()
        .for_each(f);
    Ok(())
}
