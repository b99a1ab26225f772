//! MeteoSwiss parameter codes and the names they get in the output.

use crate::types::frequency::Frequency;

/// Parameter stems and their semantic names. The full code is the stem followed
/// by the frequency token and `0`, e.g. `tre200` + `h0`.
const PARAMETERS: &[(&str, &str)] = &[
    ("presta", "atmospheric_pressure"),
    ("tre200", "air_temperature"),
    ("rre150", "rainfall"),
    ("ure200", "humidity"),
    ("dkl010", "wind_direction"),
    ("gre000", "global_radiation"),
    ("oli000", "irradiation"),
    ("fkl010", "wind_speed"),
];

/// A single column mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Column header in the MeteoSwiss file.
    pub code: String,
    /// Column name in the resulting series.
    pub name: String,
}

/// Ordered mapping from file column codes to output variable names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableMap {
    variables: Vec<Variable>,
}

impl VariableMap {
    pub fn new<C: Into<String>, N: Into<String>>(pairs: impl IntoIterator<Item = (C, N)>) -> Self {
        Self {
            variables: pairs
                .into_iter()
                .map(|(code, name)| Variable {
                    code: code.into(),
                    name: name.into(),
                })
                .collect(),
        }
    }

    /// The standard set of parameters for a frequency.
    ///
    /// # Examples
    ///
    /// ```
    /// use swissmeteo::{Frequency, VariableMap};
    ///
    /// let daily = VariableMap::for_frequency(Frequency::Daily);
    /// assert_eq!(daily.name_of("tre200d0"), Some("air_temperature"));
    /// assert_eq!(daily.name_of("tre200h0"), None);
    /// ```
    pub fn for_frequency(frequency: Frequency) -> Self {
        Self::new(
            PARAMETERS
                .iter()
                .map(|(stem, name)| (format!("{}{}0", stem, frequency.token()), *name)),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|v| v.code == code)
            .map(|v| v.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourly_codes() {
        let hourly = VariableMap::for_frequency(Frequency::Hourly);
        let codes: Vec<_> = hourly.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(
            codes,
            ["prestah0", "tre200h0", "rre150h0", "ure200h0", "dkl010h0", "gre000h0", "oli000h0", "fkl010h0"]
        );
        assert_eq!(hourly.name_of("fkl010h0"), Some("wind_speed"));
    }

    #[test]
    fn test_yearly_codes() {
        let yearly = VariableMap::for_frequency(Frequency::Yearly);
        assert_eq!(yearly.name_of("rre150y0"), Some("rainfall"));
        assert_eq!(yearly.len(), 8);
    }
}
