use crate::error::Result;
use crate::models::RawContinent;
use crate::readers::source::{deserialize_rows, SourceReader};
use std::path::Path;

pub struct ContinentReader {
    source: SourceReader,
}

impl ContinentReader {
    pub fn new() -> Self {
        Self {
            source: SourceReader::new(),
        }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self {
            source: SourceReader::with_mmap(use_mmap),
        }
    }

    /// Read the country to continent mapping from `countryContinent.csv`
    pub fn read_continents(&self, path: &Path) -> Result<Vec<RawContinent>> {
        let text = self.source.read_text(path)?;
        self.parse_continents(&text)
    }

    pub fn parse_continents(&self, text: &str) -> Result<Vec<RawContinent>> {
        deserialize_rows(text, "continents")
    }
}

impl Default for ContinentReader {
    fn default() -> Self {
        Self::new()
    }
}
