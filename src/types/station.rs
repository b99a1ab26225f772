//! Defines the data structures for the configured MeteoSwiss stations and their
//! population figures, plus the weighted form produced by
//! [`crate::compute_weights`].

use serde::{Deserialize, Serialize};

/// A single MeteoSwiss weather station with the population figures used for weighting.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Station {
    /// Human readable station name (e.g. "Bern_Zollikofen").
    pub name: String,
    /// The MeteoSwiss station abbreviation (e.g. "BER").
    pub code: String,
    /// Canton code of the station (e.g. "BE").
    pub canton: String,
    /// Population of the municipality the station represents, if known.
    pub population: Option<u64>,
    /// Population of the surrounding district, if known. Informational only.
    pub district_population: Option<u64>,
    /// Population of the whole canton. Shared by every station in the canton.
    pub canton_population: Option<u64>,
}

/// A [`Station`] together with its share of the national population weight.
///
/// Weights over a full registry sum to 1.0.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeightedStation {
    pub station: Station,
    pub weight: f64,
}

impl WeightedStation {
    pub fn code(&self) -> &str {
        &self.station.code
    }
}
