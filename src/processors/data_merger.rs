use crate::models::{City, Continent, MasterRecord, Meteorite};
use crate::utils::constants::{UNKNOWN_CONTINENT, UNKNOWN_COUNTRY, UNKNOWN_COUNTRY_CODE};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Counters describing how the joins resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JoinStats {
    pub input_meteorites: usize,
    pub duplicate_city_keys: usize,
    pub duplicate_country_codes: usize,
    pub unmatched_cities: usize,
    pub dropped_missing_geolocation: usize,
    pub unmatched_country_codes: usize,
    pub master_records: usize,
}

/// A meteorite after the city join, before the geolocation filter.
struct CityJoined {
    meteorite: Meteorite,
    country: Option<String>,
}

/// A geo-resolved meteorite with its uppercased country code.
struct Located {
    meteorite: Meteorite,
    geolocation: String,
    code_2: Option<String>,
}

/// Joins cleaned meteorites with the city and continent tables into the
/// master table. Output rows keep the meteorite input order.
pub struct DataMerger;

impl DataMerger {
    pub fn new() -> Self {
        Self
    }

    /// Run the three join steps and fill unresolved fields with sentinels
    pub fn merge(
        &self,
        meteorites: Vec<Meteorite>,
        cities: &[City],
        continents: &[Continent],
        stats: &mut JoinStats,
    ) -> Vec<MasterRecord> {
        stats.input_meteorites = meteorites.len();

        let joined = self.join_cities(meteorites, cities, stats);
        let located = self.drop_unlocated(joined, stats);
        let records = self.join_continents(located, continents, stats);

        stats.master_records = records.len();
        debug!(
            master_records = stats.master_records,
            unmatched_cities = stats.unmatched_cities,
            dropped = stats.dropped_missing_geolocation,
            "built master table"
        );

        records
    }

    /// Map accented city name to country code. The first row for a name wins.
    pub fn build_city_index<'a>(
        &self,
        cities: &'a [City],
        stats: &mut JoinStats,
    ) -> HashMap<&'a str, &'a str> {
        let mut index: HashMap<&'a str, &'a str> = HashMap::with_capacity(cities.len());
        for city in cities {
            match index.entry(city.accent_city.as_str()) {
                Entry::Occupied(_) => stats.duplicate_city_keys += 1,
                Entry::Vacant(slot) => {
                    slot.insert(city.country.as_str());
                }
            }
        }
        index
    }

    /// Map 2-letter code to its country row. The first row for a code wins.
    pub fn build_continent_index<'a>(
        &self,
        continents: &'a [Continent],
        stats: &mut JoinStats,
    ) -> HashMap<&'a str, &'a Continent> {
        let mut index: HashMap<&'a str, &'a Continent> = HashMap::with_capacity(continents.len());
        for continent in continents {
            match index.entry(continent.code_2.trim()) {
                Entry::Occupied(_) => stats.duplicate_country_codes += 1,
                Entry::Vacant(slot) => {
                    slot.insert(continent);
                }
            }
        }
        index
    }

    /// Step 1: left join on the city name
    fn join_cities(
        &self,
        meteorites: Vec<Meteorite>,
        cities: &[City],
        stats: &mut JoinStats,
    ) -> Vec<CityJoined> {
        let index = self.build_city_index(cities, stats);

        meteorites
            .into_iter()
            .map(|meteorite| {
                let country = index
                    .get(meteorite.name.as_str())
                    .map(|code| code.trim())
                    .filter(|code| !code.is_empty())
                    .map(str::to_string);
                if country.is_none() {
                    stats.unmatched_cities += 1;
                }
                CityJoined { meteorite, country }
            })
            .collect()
    }

    /// Step 2: drop rows without geolocation and uppercase the code
    fn drop_unlocated(&self, joined: Vec<CityJoined>, stats: &mut JoinStats) -> Vec<Located> {
        let mut located = Vec::with_capacity(joined.len());

        for row in joined {
            if !row.meteorite.has_geolocation() {
                stats.dropped_missing_geolocation += 1;
                continue;
            }
            let geolocation = row
                .meteorite
                .geolocation
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string();

            located.push(Located {
                code_2: row.country.map(|code| code.to_uppercase()),
                meteorite: row.meteorite,
                geolocation,
            });
        }

        located
    }

    /// Step 3: left join on the code and fill the sentinels
    fn join_continents(
        &self,
        located: Vec<Located>,
        continents: &[Continent],
        stats: &mut JoinStats,
    ) -> Vec<MasterRecord> {
        let index = self.build_continent_index(continents, stats);

        located
            .into_iter()
            .map(|row| {
                let entry = row.code_2.as_deref().and_then(|code| index.get(code));
                if row.code_2.is_some() && entry.is_none() {
                    stats.unmatched_country_codes += 1;
                }

                let country = entry
                    .map(|c| c.country.trim())
                    .filter(|name| !name.is_empty())
                    .unwrap_or(UNKNOWN_COUNTRY)
                    .to_string();
                let continent = entry
                    .map(|c| c.continent.trim())
                    .filter(|name| !name.is_empty())
                    .unwrap_or(UNKNOWN_CONTINENT)
                    .to_string();

                let Meteorite {
                    name,
                    recclass,
                    mass,
                    year,
                    reclat,
                    reclong,
                    ..
                } = row.meteorite;

                MasterRecord::new(
                    name,
                    recclass,
                    mass,
                    year,
                    reclat,
                    reclong,
                    row.geolocation,
                    row.code_2
                        .unwrap_or_else(|| UNKNOWN_COUNTRY_CODE.to_string()),
                    country,
                    continent,
                )
            })
            .collect()
    }
}

impl Default for DataMerger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paris() -> Meteorite {
        Meteorite::new("Paris", "L6", Some(500.0), 1900).with_location(48.85, 2.35)
    }

    #[test]
    fn test_merge_complete_data() {
        let cities = vec![City::new("Paris", "fr")];
        let continents = vec![Continent::new("FR", "France", "Europe")];

        let mut stats = JoinStats::default();
        let records = DataMerger::new().merge(vec![paris()], &cities, &continents, &mut stats);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.city, "Paris");
        assert_eq!(record.code_2, "FR");
        assert_eq!(record.country, "France");
        assert_eq!(record.continent, "Europe");
        assert_eq!(record.mass, Some(500.0));
        assert_eq!(record.year, 1900);
        assert_eq!(stats.master_records, 1);
        assert_eq!(stats.unmatched_cities, 0);
    }

    #[test]
    fn test_unmatched_city_without_geolocation_is_excluded() {
        let mut lost = Meteorite::new("Atlantis", "H5", Some(10.0), 1950);
        lost.geolocation = None;

        let mut stats = JoinStats::default();
        let records = DataMerger::new().merge(
            vec![lost],
            &[City::new("Paris", "fr")],
            &[Continent::new("FR", "France", "Europe")],
            &mut stats,
        );

        assert!(records.is_empty());
        assert_eq!(stats.unmatched_cities, 1);
        assert_eq!(stats.dropped_missing_geolocation, 1);
    }

    #[test]
    fn test_unmatched_city_with_geolocation_gets_sentinels() {
        let stray = Meteorite::new("Nowhere", "H5", None, 1950).with_location(-75.0, 120.0);

        let mut stats = JoinStats::default();
        let records = DataMerger::new().merge(vec![stray], &[], &[], &mut stats);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code_2, "XX");
        assert_eq!(records[0].country, "Unknown");
        assert_eq!(records[0].continent, "Unknown");
        assert_eq!(stats.unmatched_country_codes, 0);
    }

    #[test]
    fn test_unknown_country_code_keeps_code() {
        let cities = vec![City::new("Paris", "zz")];

        let mut stats = JoinStats::default();
        let records = DataMerger::new().merge(vec![paris()], &cities, &[], &mut stats);

        assert_eq!(records[0].code_2, "ZZ");
        assert_eq!(records[0].country, "Unknown");
        assert_eq!(records[0].continent, "Unknown");
        assert_eq!(stats.unmatched_country_codes, 1);
    }

    #[test]
    fn test_blank_continent_becomes_unknown() {
        let cities = vec![City::new("Paris", "aq")];
        let continents = vec![Continent::new("AQ", "Antarctica", "")];

        let mut stats = JoinStats::default();
        let records = DataMerger::new().merge(vec![paris()], &cities, &continents, &mut stats);

        assert_eq!(records[0].country, "Antarctica");
        assert_eq!(records[0].continent, "Unknown");
    }

    #[test]
    fn test_first_city_row_wins() {
        let cities = vec![
            City::new("Paris", "fr"),
            City::new("Paris", "us"),
            City::new("Paris", "ca"),
        ];
        let continents = vec![
            Continent::new("FR", "France", "Europe"),
            Continent::new("US", "United States of America", "Americas"),
        ];

        let mut stats = JoinStats::default();
        let records = DataMerger::new().merge(vec![paris()], &cities, &continents, &mut stats);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code_2, "FR");
        assert_eq!(stats.duplicate_city_keys, 2);
    }

    #[test]
    fn test_left_join_preserves_order_and_count() {
        let meteorites = vec![
            Meteorite::new("B", "L6", None, 1901).with_location(1.0, 1.0),
            Meteorite::new("A", "L6", None, 1902).with_location(2.0, 2.0),
            Meteorite::new("B", "L6", None, 1903).with_location(3.0, 3.0),
        ];
        let cities = vec![City::new("A", "de"), City::new("B", "fr")];

        let mut stats = JoinStats::default();
        let records = DataMerger::new().merge(meteorites, &cities, &[], &mut stats);
        let years: Vec<i32> = records.iter().map(|r| r.year).collect();

        assert_eq!(years, vec![1901, 1902, 1903]);
        assert_eq!(records[1].code_2, "DE");
    }
}
