use crate::error::Result;
use crate::models::{RawCity, RawContinent, RawMeteorite};
use crate::readers::{CityReader, ContinentReader, MeteoriteReader};
use crate::utils::constants::{CITIES_FILE, CONTINENTS_FILE, METEORITES_FILE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Locations of the three input tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputPaths {
    pub meteorites: PathBuf,
    pub cities: PathBuf,
    pub continents: PathBuf,
}

impl InputPaths {
    pub fn new(
        meteorites: impl Into<PathBuf>,
        cities: impl Into<PathBuf>,
        continents: impl Into<PathBuf>,
    ) -> Self {
        Self {
            meteorites: meteorites.into(),
            cities: cities.into(),
            continents: continents.into(),
        }
    }

    /// The published file names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            dir.join(METEORITES_FILE),
            dir.join(CITIES_FILE),
            dir.join(CONTINENTS_FILE),
        )
    }
}

impl Default for InputPaths {
    fn default() -> Self {
        Self::new(METEORITES_FILE, CITIES_FILE, CONTINENTS_FILE)
    }
}

/// The three input tables with their columns as delivered.
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub meteorites: Vec<RawMeteorite>,
    pub cities: Vec<RawCity>,
    pub continents: Vec<RawContinent>,
}

pub struct TableLoader {
    use_mmap: bool,
}

impl TableLoader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Load all three tables. The first unreadable file aborts the load.
    pub fn load(&self, paths: &InputPaths) -> Result<RawTables> {
        let meteorites =
            MeteoriteReader::with_mmap(self.use_mmap).read_meteorites(&paths.meteorites)?;
        info!(
            "Loaded {} meteorite rows from {}",
            meteorites.len(),
            paths.meteorites.display()
        );

        let cities = CityReader::with_mmap(self.use_mmap).read_cities(&paths.cities)?;
        info!(
            "Loaded {} city rows from {}",
            cities.len(),
            paths.cities.display()
        );

        let continents =
            ContinentReader::with_mmap(self.use_mmap).read_continents(&paths.continents)?;
        info!(
            "Loaded {} country rows from {}",
            continents.len(),
            paths.continents.display()
        );

        Ok(RawTables {
            meteorites,
            cities,
            continents,
        })
    }
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new()
    }
}
