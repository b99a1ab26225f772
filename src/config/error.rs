use chrono::NaiveDate;
use thiserror::Error;

/// Invalid configuration or registry data. Always fatal, and always raised
/// before any network request is made.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("The station registry is empty")]
    EmptyRegistry,

    #[error("Station code '{0}' appears more than once in the registry")]
    DuplicateStation(String),

    #[error("Canton '{canton}' has no canton population")]
    MissingCantonPopulation { canton: String },

    #[error("Canton '{canton}' has a canton population of zero")]
    ZeroCantonPopulation { canton: String },

    #[error("Canton '{canton}' has inconsistent canton populations ({first} and {second})")]
    InconsistentCantonPopulation {
        canton: String,
        first: u64,
        second: u64,
    },

    #[error("Unknown save path key '{0}'")]
    UnknownSavePath(String),

    #[error("Unknown frequency '{0}', expected one of h, d, m, y")]
    UnknownFrequency(String),

    #[error("Start date {start} is after end date {end}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    #[error("At least one station must be fetched at a time")]
    ZeroConcurrency,
}
