use crate::error::Result;
use crate::models::RawCity;
use crate::readers::source::{deserialize_rows, SourceReader};
use std::path::Path;

pub struct CityReader {
    source: SourceReader,
}

impl CityReader {
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

    /// Read world cities from `worldcitiespop.csv` (Latin-1 in the published dump)
    pub fn read_cities(&self, path: &Path) -> Result<Vec<RawCity>> {
        let text = self.source.read_text(path)?;
        self.parse_cities(&text)
    }

    pub fn parse_cities(&self, text: &str) -> Result<Vec<RawCity>> {
        deserialize_rows(text, "cities")
    }
}

impl Default for CityReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_latin1_cities_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(b"Country,City,AccentCity,Region,Population,Latitude,Longitude\n")?;
        temp_file.write_all(b"fr,saint-etienne,Saint-\xC9tienne,B9,,45.433333,4.4\n")?;
        temp_file.write_all(b"fr,paris,Paris,A8,2110694,48.866667,2.333333\n")?;

        let cities = CityReader::new().read_cities(temp_file.path())?;

        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].accent_city, "Saint-Étienne");
        assert_eq!(cities[0].country, "fr");
        assert_eq!(cities[0].population, None);
        assert_eq!(cities[1].population, Some(2110694.0));
        Ok(())
    }
}
