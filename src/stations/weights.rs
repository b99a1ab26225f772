//! Population-based station weights.

use crate::config::error::ConfigurationError;
use crate::stations::registry::StationRegistry;
use crate::types::station::WeightedStation;
use std::collections::{HashMap, HashSet};

struct CantonTotals {
    population: u64,
    reported_station_population: u64,
    station_count: usize,
}

/// Computes each station's share of the national population weight.
///
/// * A canton's weight is its population divided by the summed population of
///   all distinct cantons in the registry. Each canton is counted once, however
///   many stations it has.
/// * Inside a canton the weight is split proportionally to the stations' own
///   populations. Stations without a population get nothing when at least one
///   other station in the canton reports one.
/// * If no station in a canton reports a population, the canton weight is split
///   equally.
///
/// The registry is not modified; the same registry always yields the same weights.
///
/// # Errors
///
/// Returns a [`ConfigurationError`] for an empty registry, duplicate station codes,
/// or a canton population that is missing, zero, or different between two
/// stations of the same canton.
///
/// # Examples
///
/// ```
/// use swissmeteo::{compute_weights, StationRegistry};
///
/// let weighted = compute_weights(&StationRegistry::swiss()).unwrap();
/// let total: f64 = weighted.iter().map(|w| w.weight).sum();
/// assert!((total - 1.0).abs() < 1e-9);
/// ```
pub fn compute_weights(
    registry: &StationRegistry,
) -> Result<Vec<WeightedStation>, ConfigurationError> {
    if registry.is_empty() {
        return Err(ConfigurationError::EmptyRegistry);
    }

    let mut seen_codes = HashSet::new();
    let mut cantons: HashMap<&str, CantonTotals> = HashMap::new();

    for station in registry.stations() {
        if !seen_codes.insert(station.code.to_ascii_uppercase()) {
            return Err(ConfigurationError::DuplicateStation(station.code.clone()));
        }

        let population = match station.canton_population {
            None => {
                return Err(ConfigurationError::MissingCantonPopulation {
                    canton: station.canton.clone(),
                })
            }
            Some(0) => {
                return Err(ConfigurationError::ZeroCantonPopulation {
                    canton: station.canton.clone(),
                })
            }
            Some(p) => p,
        };

        let totals = cantons.entry(station.canton.as_str()).or_insert(CantonTotals {
            population,
            reported_station_population: 0,
            station_count: 0,
        });
        if totals.population != population {
            return Err(ConfigurationError::InconsistentCantonPopulation {
                canton: station.canton.clone(),
                first: totals.population,
                second: population,
            });
        }
        totals.reported_station_population += station.population.unwrap_or(0);
        totals.station_count += 1;
    }

    let national_population: u64 = cantons.values().map(|c| c.population).sum();

    let weighted = registry
        .stations()
        .iter()
        .map(|station| {
            let canton = &cantons[station.canton.as_str()];
            let canton_weight = canton.population as f64 / national_population as f64;
            let local_weight = if canton.reported_station_population == 0 {
                1.0 / canton.station_count as f64
            } else {
                station.population.unwrap_or(0) as f64
                    / canton.reported_station_population as f64
            };
            WeightedStation {
                station: station.clone(),
                weight: canton_weight * local_weight,
            }
        })
        .collect();

    Ok(weighted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::station::Station;

    fn station(code: &str, canton: &str, population: Option<u64>, canton_pop: Option<u64>) -> Station {
        Station {
            name: code.to_string(),
            code: code.to_string(),
            canton: canton.to_string(),
            population,
            district_population: None,
            canton_population: canton_pop,
        }
    }

    fn weight_of(weighted: &[WeightedStation], code: &str) -> f64 {
        weighted.iter().find(|w| w.code() == code).unwrap().weight
    }

    #[test]
    fn test_swiss_weights_sum_to_one() {
        let weighted = compute_weights(&StationRegistry::swiss()).unwrap();
        let total: f64 = weighted.iter().map(|w| w.weight).sum();
        assert!((total - 1.0).abs() < 1e-9, "total was {total}");
        assert!(weighted.iter().all(|w| (0.0..=1.0).contains(&w.weight)));
    }

    #[test]
    fn test_swiss_reference_weights() {
        let weighted = compute_weights(&StationRegistry::swiss()).unwrap();
        assert!((weight_of(&weighted, "SIO") - 0.04261799).abs() < 1e-8);
        assert!((weight_of(&weighted, "KLO") - 0.2196808).abs() < 1e-7);
        assert!((weight_of(&weighted, "PIO") - 0.00076329).abs() < 1e-8);
    }

    #[test]
    fn test_canton_counted_once() {
        // Two stations in A must not double A's share.
        let registry = StationRegistry::new(vec![
            station("A1", "A", Some(1), Some(300)),
            station("A2", "A", Some(1), Some(300)),
            station("B1", "B", Some(1), Some(100)),
        ]);
        let weighted = compute_weights(&registry).unwrap();
        assert!((weight_of(&weighted, "A1") - 0.375).abs() < 1e-12);
        assert!((weight_of(&weighted, "A2") - 0.375).abs() < 1e-12);
        assert!((weight_of(&weighted, "B1") - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_equal_split_without_population_data() {
        let registry = StationRegistry::new(vec![
            station("X1", "X", None, Some(600)),
            station("X2", "X", None, Some(600)),
            station("X3", "X", None, Some(600)),
            station("Y1", "Y", Some(50), Some(400)),
        ]);
        let weighted = compute_weights(&registry).unwrap();
        for code in ["X1", "X2", "X3"] {
            assert!((weight_of(&weighted, code) - 0.2).abs() < 1e-12);
        }
        let canton_x: f64 = weighted
            .iter()
            .filter(|w| w.station.canton == "X")
            .map(|w| w.weight)
            .sum();
        assert!((canton_x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_proportional_split_with_unreported_station() {
        let registry = StationRegistry::new(vec![
            station("P1", "P", Some(30), Some(1000)),
            station("P2", "P", Some(10), Some(1000)),
            station("P3", "P", None, Some(1000)),
        ]);
        let weighted = compute_weights(&registry).unwrap();
        assert!((weight_of(&weighted, "P1") - 0.75).abs() < 1e-12);
        assert!((weight_of(&weighted, "P2") - 0.25).abs() < 1e-12);
        assert_eq!(weight_of(&weighted, "P3"), 0.0);
    }

    #[test]
    fn test_weights_are_idempotent() {
        let registry = StationRegistry::swiss();
        let first = compute_weights(&registry).unwrap();
        let second = compute_weights(&registry).unwrap();
        assert_eq!(first, second);
        assert_eq!(registry, StationRegistry::swiss());
    }

    #[test]
    fn test_configuration_errors() {
        assert_eq!(
            compute_weights(&StationRegistry::default()),
            Err(ConfigurationError::EmptyRegistry)
        );
        assert_eq!(
            compute_weights(&StationRegistry::new(vec![station("Z", "Z", None, Some(0))])),
            Err(ConfigurationError::ZeroCantonPopulation { canton: "Z".into() })
        );
        assert_eq!(
            compute_weights(&StationRegistry::new(vec![station("M", "M", Some(3), None)])),
            Err(ConfigurationError::MissingCantonPopulation { canton: "M".into() })
        );
        assert_eq!(
            compute_weights(&StationRegistry::new(vec![
                station("Q1", "Q", None, Some(10)),
                station("Q2", "Q", None, Some(11)),
            ])),
            Err(ConfigurationError::InconsistentCantonPopulation {
                canton: "Q".into(),
                first: 10,
                second: 11
            })
        );
        assert_eq!(
            compute_weights(&StationRegistry::new(vec![
                station("D", "D", None, Some(10)),
                station("d", "D", None, Some(10)),
            ])),
            Err(ConfigurationError::DuplicateStation("d".into()))
        );
    }
}
