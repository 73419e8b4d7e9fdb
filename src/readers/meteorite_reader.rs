use crate::error::Result;
use crate::models::RawMeteorite;
use crate::readers::source::{deserialize_rows, SourceReader};
use std::path::Path;

pub struct MeteoriteReader {
    source: SourceReader,
}

impl MeteoriteReader {
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

    /// Read meteorite landings from `meteorite-landings.csv`
    pub fn read_meteorites(&self, path: &Path) -> Result<Vec<RawMeteorite>> {
        let text = self.source.read_text(path)?;
        self.parse_meteorites(&text)
    }

    pub fn parse_meteorites(&self, text: &str) -> Result<Vec<RawMeteorite>> {
        deserialize_rows(text, "meteorites")
    }
}

impl Default for MeteoriteReader {
    fn default() -> Self {
        Self::new()
    }
}
