//! The fixed set of MeteoSwiss stations this crate works with, together with
//! the municipality, district and canton population figures used for weighting.

use crate::types::station::Station;

struct StationRecord {
    name: &'static str,
    code: &'static str,
    canton: &'static str,
    population: Option<u64>,
    district: Option<u64>,
    canton_population: u64,
}

const fn record(
    name: &'static str,
    code: &'static str,
    canton: &'static str,
    population: Option<u64>,
    district: Option<u64>,
    canton_population: u64,
) -> StationRecord {
    StationRecord {
        name,
        code,
        canton,
        population,
        district,
        canton_population,
    }
}

// Municipality, administrative district and canton populations.
const SWISS_STATIONS: &[StationRecord] = &[
    // Verwaltungskreis Frutigen-Niedersimmental
    record("Adelboden", "ABO", "BE", Some(3340), Some(40674), 1047473),
    // Verwaltungskreis Bern-Mittelland
    record("Bern_Zollikofen", "BER", "BE", Some(10825), Some(418858), 1047473),
    // Verwaltungskreis Interlaken-Oberhasli
    record("Interlaken", "INT", "BE", Some(5821), Some(47811), 1047473),
    // Bezirk Arlesheim
    record("Basel_Binningen", "BAS", "BL", Some(15616), Some(157641), 292817),
    record("Geneve_Cointrin", "GVE", "GE", None, None, 509448),
    // Region Plessur
    record("Chur_Ems", "CHU", "GR", Some(37875), Some(43233), 201376),
    // Region Surselva
    record("Disentis", "DIS", "GR", Some(2033), Some(21438), 201376),
    // Region Praettigau/Davos
    record("Davos", "DAV", "GR", Some(10648), Some(26060), 201376),
    // Region Maloja
    record("Samedan", "SAM", "GR", Some(3035), Some(18236), 201376),
    record("Luzern", "LUZ", "LU", None, None, 420326),
    record("Neuchatel", "NEU", "NE", Some(44485), Some(176166), 176166),
    // Bezirk Aarau
    record("Buchs_Suhr", "BUS", "AG", Some(8270), Some(81275), 703086),
    record("Engelberg", "ENG", "OW", None, None, 38435),
    // Wahlkreis St. Gallen
    record("St_Gallen", "STG", "SG", Some(76328), Some(123274), 519245),
    // Bezirk Schaffhausen
    record("Schaffhausen", "SHA", "SH", Some(37248), Some(55740), 83995),
    // Distretto di Lugano
    record("Lugano", "LUG", "TI", Some(62123), Some(151242), 352181),
    // Distretto di Leventina
    record("Piotta", "PIO", "TI", Some(974), Some(8718), 352181),
    record("Altdorf", "ALT", "UR", None, None, 37047),
    // District de Lavaux-Oron
    record("Pully", "PUY", "VD", Some(18128), Some(64270), 822968),
    // District de Sion
    record("Sion", "SIO", "VS", Some(35259), Some(49023), 353209),
    // District de Viege
    record("Zermatt", "ZER", "VS", Some(5769), Some(28706), 353209),
    record("Zuerich_Kloten", "KLO", "ZH", None, None, 1564662),
];

/// An ordered, read-only collection of [`Station`]s.
///
/// Station order is the iteration order of every downstream step, so it also
/// fixes the column order of the merged table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StationRegistry {
    stations: Vec<Station>,
}

impl StationRegistry {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// The 22 Swiss stations with their 2023 population figures.
    pub fn swiss() -> Self {
        let stations = SWISS_STATIONS
            .iter()
            .map(|r| Station {
                name: r.name.to_string(),
                code: r.code.to_string(),
                canton: r.canton.to_string(),
                population: r.population,
                district_population: r.district,
                canton_population: Some(r.canton_population),
            })
            .collect();
        Self { stations }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn get(&self, code: &str) -> Option<&Station> {
        self.stations
            .iter()
            .find(|s| s.code.eq_ignore_ascii_case(code))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
