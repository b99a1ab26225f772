//! User-facing settings for a [`crate::load_meteo_file`] run: which frequency
//! and period to download, whether to build the weighted national series, and
//! where exports are written.

pub mod error;

use crate::aggregate::aggregator::GlobalPolicy;
use crate::config::error::ConfigurationError;
use crate::types::frequency::Frequency;
use bon::Builder;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Save path key for the merged table export.
pub const SAVE_DIRECTORY: &str = "save directory";
/// Save path key for the station weight side artifact.
pub const STATION_WEIGHTS: &str = "station weights";

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 1, 1).unwrap_or_default()
}

fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default()
}

/// Named output locations. Only the known keys ([`SAVE_DIRECTORY`],
/// [`STATION_WEIGHTS`]) can be changed.
#[derive(Debug, Clone, PartialEq)]
pub struct SavePaths(BTreeMap<String, PathBuf>);

impl Default for SavePaths {
    fn default() -> Self {
        let mut paths = BTreeMap::new();
        paths.insert(
            SAVE_DIRECTORY.to_string(),
            PathBuf::from("./data/swissmeteo.parquet"),
        );
        paths.insert(
            STATION_WEIGHTS.to_string(),
            PathBuf::from("./data/station_weight.csv"),
        );
        SavePaths(paths)
    }
}

impl SavePaths {
    pub fn get(&self, key: &str) -> Option<&Path> {
        self.0.get(key).map(PathBuf::as_path)
    }

    pub fn set(&mut self, key: &str, path: impl Into<PathBuf>) -> Result<(), ConfigurationError> {
        match self.0.get_mut(key) {
            Some(slot) => {
                *slot = path.into();
                Ok(())
            }
            None => Err(ConfigurationError::UnknownSavePath(key.to_string())),
        }
    }
}

/// Settings for downloading and merging MeteoSwiss data.
///
/// # Examples
///
/// ```
/// use swissmeteo::{Config, Frequency};
/// use chrono::NaiveDate;
///
/// let config = Config::builder()
///     .frequency(Frequency::Daily)
///     .start_date(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap())
///     .end_date(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap())
///     .global_meteo(true)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Builder)]
pub struct Config {
    frequency: Frequency,
    #[builder(default = default_start_date())]
    start_date: NaiveDate,
    #[builder(default = default_end_date())]
    end_date: NaiveDate,
    /// Compute the population-weighted `global` columns.
    #[builder(default)]
    global_meteo: bool,
    #[builder(default)]
    global_policy: GlobalPolicy,
    #[builder(default)]
    save_paths: SavePaths,
    #[builder(default = 4)]
    max_concurrent_stations: usize,
    /// Timeout applied to every single HTTP request.
    #[builder(default = Duration::from_secs(30))]
    request_timeout: Duration,
}

impl Config {
    /// Checks the settings that can be wrong independently of the registry.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.start_date > self.end_date {
            return Err(ConfigurationError::InvalidPeriod {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.max_concurrent_stations == 0 {
            return Err(ConfigurationError::ZeroConcurrency);
        }
        Ok(())
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn global_meteo(&self) -> bool {
        self.global_meteo
    }

    pub fn global_policy(&self) -> GlobalPolicy {
        self.global_policy
    }

    pub fn max_concurrent_stations(&self) -> usize {
        self.max_concurrent_stations
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn get_path(&self, key: &str) -> Option<&Path> {
        self.save_paths.get(key)
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
    }

    /// Replaces the period. The config is left untouched if `start > end`.
    pub fn set_period(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), ConfigurationError> {
        if start > end {
            return Err(ConfigurationError::InvalidPeriod { start, end });
        }
        self.start_date = start;
        self.end_date = end;
        Ok(())
    }

    pub fn set_path(&mut self, key: &str, path: impl Into<PathBuf>) -> Result<(), ConfigurationError> {
        self.save_paths.set(key, path)
    }

    pub fn set_global_meteo(&mut self, global_meteo: bool) {
        self.global_meteo = global_meteo;
    }

    pub fn set_global_policy(&mut self, policy: GlobalPolicy) {
        self.global_policy = policy;
    }

    pub fn set_max_concurrent_stations(&mut self, limit: usize) -> Result<(), ConfigurationError> {
        if limit == 0 {
            return Err(ConfigurationError::ZeroConcurrency);
        }
        self.max_concurrent_stations = limit;
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ global_meteo: {}, policy: {:?}, freq: {}, start_date: {}, end_date: {}, save_paths: {:?} }}",
            self.global_meteo,
            self.global_policy,
            self.frequency,
            self.start_date,
            self.end_date,
            self.save_paths.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily() -> Config {
        Config::builder().frequency(Frequency::Daily).build()
    }

    #[test]
    fn test_defaults_match_reference_period() {
        let config = daily();
        assert_eq!(config.start_date(), NaiveDate::from_ymd_opt(2016, 1, 1).unwrap());
        assert_eq!(config.end_date(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert!(!config.global_meteo());
        assert_eq!(config.global_policy(), GlobalPolicy::PartialSum);
        assert_eq!(
            config.get_path(SAVE_DIRECTORY),
            Some(Path::new("./data/swissmeteo.parquet"))
        );
    }

    #[test]
    fn test_set_path_rejects_unknown_key() {
        let mut config = daily();
        assert_eq!(
            config.set_path("cache", "/tmp/x"),
            Err(ConfigurationError::UnknownSavePath("cache".into()))
        );
        config.set_path(STATION_WEIGHTS, "/tmp/w.csv").unwrap();
        assert_eq!(config.get_path(STATION_WEIGHTS), Some(Path::new("/tmp/w.csv")));
        assert_eq!(config.get_path("cache"), None);
    }

    #[test]
    fn test_reversed_period_is_rejected() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();

        let mut config = daily();
        assert!(config.set_period(start, end).is_err());
        assert_eq!(config.start_date(), default_start_date());

        let built = Config::builder()
            .frequency(Frequency::Hourly)
            .start_date(start)
            .end_date(end)
            .build();
        assert_eq!(
            built.validate(),
            Err(ConfigurationError::InvalidPeriod { start, end })
        );
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let config = Config::builder()
            .frequency(Frequency::Monthly)
            .max_concurrent_stations(0)
            .build();
        assert_eq!(config.validate(), Err(ConfigurationError::ZeroConcurrency));
    }

    #[test]
    fn test_display_lists_frequency_and_period() {
        let rendered = daily().to_string();
        assert!(rendered.contains("freq: d"));
        assert!(rendered.contains("2016-01-01"));
    }
}
