use crate::config::CleaningConfig;
use crate::models::{City, Continent, Meteorite, RawCity, RawContinent, RawMeteorite};
use serde::Serialize;
use tracing::debug;

/// Row counts removed by each cleaning filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleaningStats {
    pub input_meteorites: usize,
    pub dropped_year_too_late: usize,
    pub dropped_year_too_early: usize,
    pub dropped_year_missing: usize,
    pub dropped_not_found: usize,
    pub kept_meteorites: usize,
    pub cities: usize,
    pub continents: usize,
}

impl CleaningStats {
    pub fn dropped_meteorites(&self) -> usize {
        self.input_meteorites - self.kept_meteorites
    }
}

/// Narrows the three raw tables: prunes unused columns and filters the
/// meteorite rows on year and fall status. Row contents are never modified.
pub struct Cleaner {
    min_year_exclusive: i32,
    max_year_exclusive: i32,
}

impl Cleaner {
    pub fn new() -> Self {
        Self::from_config(&CleaningConfig::default())
    }

    pub fn from_config(config: &CleaningConfig) -> Self {
        Self {
            min_year_exclusive: config.min_year_exclusive,
            max_year_exclusive: config.max_year_exclusive,
        }
    }

    /// Keep rows with `min < year < max` whose fall status is "Found", then
    /// drop `id`, `nametype` and `fall`.
    pub fn clean_meteorites(
        &self,
        raw: Vec<RawMeteorite>,
        stats: &mut CleaningStats,
    ) -> Vec<Meteorite> {
        stats.input_meteorites = raw.len();
        let mut kept = Vec::with_capacity(raw.len());

        for row in raw {
            let year = match row.year {
                Some(year) => year,
                None => {
                    stats.dropped_year_missing += 1;
                    continue;
                }
            };
            if year >= self.max_year_exclusive {
                stats.dropped_year_too_late += 1;
                continue;
            }
            if year <= self.min_year_exclusive {
                stats.dropped_year_too_early += 1;
                continue;
            }
            if !row.is_found() {
                stats.dropped_not_found += 1;
                continue;
            }

            kept.push(Meteorite {
                name: row.name,
                recclass: row.recclass,
                mass: row.mass,
                year,
                reclat: row.reclat,
                reclong: row.reclong,
                geolocation: row.geolocation,
            });
        }

        stats.kept_meteorites = kept.len();
        debug!(
            kept = stats.kept_meteorites,
            dropped = stats.dropped_meteorites(),
            "cleaned meteorites"
        );
        kept
    }

    /// Keep only the accented city name and the country code
    pub fn clean_cities(&self, raw: Vec<RawCity>, stats: &mut CleaningStats) -> Vec<City> {
        stats.cities = raw.len();
        raw.into_iter()
            .map(|row| City {
                accent_city: row.accent_city,
                country: row.country,
            })
            .collect()
    }

    /// Keep only the 2-letter code, country name and continent name
    pub fn clean_continents(
        &self,
        raw: Vec<RawContinent>,
        stats: &mut CleaningStats,
    ) -> Vec<Continent> {
        stats.continents = raw.len();
        raw.into_iter()
            .map(|row| Continent {
                code_2: row.code_2,
                country: row.country,
                continent: row.continent,
            })
            .collect()
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}
