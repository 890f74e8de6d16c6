pub struct Config {
    pub stations_file_name: String,
    pub station_pairs_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stations_file_name: "stations.csv".into(),
            station_pairs_file_name: "station_pairs.csv".into(),
        }
    }
}
