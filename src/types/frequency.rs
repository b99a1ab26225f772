//! Defines the time frequency of MeteoSwiss station data and how it is encoded
//! in catalog asset names and parameter codes.

use crate::config::error::ConfigurationError;
use std::fmt;
use std::str::FromStr;

/// Represents the time frequency or granularity of MeteoSwiss observation data.
///
/// The frequency decides which files are selected from the catalog (asset keys
/// carry a `_h_`, `_d_`, `_m_` or `_y_` token) and which parameter codes are
/// read from those files (`tre200h0` for hourly temperature, `tre200d0` for daily...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// One observation per hour.
    Hourly,
    /// Daily aggregates.
    Daily,
    /// Monthly aggregates.
    Monthly,
    /// Yearly aggregates.
    Yearly,
}

impl Frequency {
    /// The one-letter token used by MeteoSwiss in asset keys and parameter codes.
    pub fn token(&self) -> &'static str {
        match self {
            Frequency::Hourly => "h",
            Frequency::Daily => "d",
            Frequency::Monthly => "m",
            Frequency::Yearly => "y",
        }
    }

    pub(crate) fn asset_marker(&self) -> String {
        format!("_{}_", self.token())
    }
}

/// Formats a `Frequency` as its one-letter token.
///
/// # Examples
///
/// ```
/// use swissmeteo::Frequency;
///
/// assert_eq!(format!("{}", Frequency::Hourly), "h");
/// assert_eq!(Frequency::Yearly.to_string(), "y");
/// ```
impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Parses a frequency token, ignoring case.
///
/// # Examples
///
/// ```
/// use swissmeteo::Frequency;
///
/// assert_eq!("D".parse::<Frequency>().unwrap(), Frequency::Daily);
/// assert!("w".parse::<Frequency>().is_err());
/// ```
impl FromStr for Frequency {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" => Ok(Frequency::Hourly),
            "d" => Ok(Frequency::Daily),
            "m" => Ok(Frequency::Monthly),
            "y" => Ok(Frequency::Yearly),
            _ => Err(ConfigurationError::UnknownFrequency(s.to_string())),
        }
    }
}
