use crate::error::Result;
use crate::models::{MasterRecord, MaterialClass};
use crate::processors::classifier::classify;
use crate::writers::ParquetWriter;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

#[derive(Debug)]
pub struct MeteoriteStatistics {
    pub total_records: usize,
    pub unique_countries: usize,
    /// None when the file holds no records
    pub year_range: Option<(i32, i32)>,
    pub mass_stats: MassStats,
    pub continent_counts: BTreeMap<String, usize>,
    pub class_counts: BTreeMap<MaterialClass, usize>,
    pub unclassified_records: usize,
    pub geographic_bounds: Option<GeographicBounds>,
}

#[derive(Debug)]
pub struct MassStats {
    pub min_mass: Option<f64>,
    pub max_mass: Option<f64>,
    pub mean_mass: Option<f64>,
    pub missing_mass_records: usize,
    /// City and label of the heaviest find
    pub heaviest: Option<(String, String)>,
}

#[derive(Debug)]
pub struct GeographicBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

pub struct MeteoriteAnalyzer;

impl MeteoriteAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_parquet(&self, path: &Path) -> Result<MeteoriteStatistics> {
        self.analyze_parquet_with_limit(path, 0)
    }

    /// Analyze the first `limit` records; 0 reads the whole file
    pub fn analyze_parquet_with_limit(
        &self,
        path: &Path,
        limit: usize,
    ) -> Result<MeteoriteStatistics> {
        let writer = ParquetWriter::new();
        let total_rows = writer.get_file_info(path)?.total_rows as usize;

        let records_to_read = if limit == 0 {
            total_rows
        } else {
            limit.min(total_rows)
        };

        let records = writer.read_sample_records(path, records_to_read)?;
        self.calculate_statistics(&records)
    }

    pub fn calculate_statistics(&self, records: &[MasterRecord]) -> Result<MeteoriteStatistics> {
        let mut countries = HashSet::new();
        let mut year_range: Option<(i32, i32)> = None;

        let mut min_mass: Option<f64> = None;
        let mut max_mass: Option<f64> = None;
        let mut heaviest = None;
        let mut mass_sum = 0.0;
        let mut mass_count = 0usize;
        let mut missing_mass_records = 0;

        let mut continent_counts = BTreeMap::new();
        let mut class_counts = BTreeMap::new();
        let mut unclassified_records = 0;
        let mut bounds: Option<GeographicBounds> = None;

        for record in records {
            countries.insert(record.code_2.as_str());
            year_range = Some(match year_range {
                Some((min, max)) => (min.min(record.year), max.max(record.year)),
                None => (record.year, record.year),
            });

            match record.mass {
                Some(mass) => {
                    mass_sum += mass;
                    mass_count += 1;
                    min_mass = Some(min_mass.map_or(mass, |m| m.min(mass)));
                    if max_mass.map_or(true, |m| mass > m) {
                        max_mass = Some(mass);
                        heaviest = Some((record.city.clone(), record.recclass.clone()));
                    }
                }
                None => missing_mass_records += 1,
            }

            *continent_counts
                .entry(record.continent.clone())
                .or_insert(0) += 1;

            match classify(&record.recclass) {
                Some(class) => *class_counts.entry(class).or_insert(0) += 1,
                None => unclassified_records += 1,
            }

            if let (Some(lat), Some(lon)) = (record.reclat, record.reclong) {
                let b = bounds.get_or_insert(GeographicBounds {
                    min_lat: lat,
                    max_lat: lat,
                    min_lon: lon,
                    max_lon: lon,
                });
                b.min_lat = b.min_lat.min(lat);
                b.max_lat = b.max_lat.max(lat);
                b.min_lon = b.min_lon.min(lon);
                b.max_lon = b.max_lon.max(lon);
            }
        }

        Ok(MeteoriteStatistics {
            total_records: records.len(),
            unique_countries: countries.len(),
            year_range,
            mass_stats: MassStats {
                min_mass,
                max_mass,
                mean_mass: (mass_count > 0).then(|| mass_sum / mass_count as f64),
                missing_mass_records,
                heaviest,
            },
            continent_counts,
            class_counts,
            unclassified_records,
            geographic_bounds: bounds,
        })
    }
}

fn grams(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1} g", v),
        None => "No mass recorded".to_string(),
    }
}

impl MeteoriteStatistics {
    pub fn summary(&self) -> String {
        let coverage = match &self.geographic_bounds {
            Some(b) => format!(
                "{:.1} to {:.1} lat, {:.1} to {:.1} lon",
                b.min_lat, b.max_lat, b.min_lon, b.max_lon
            ),
            None => "No coordinates".to_string(),
        };

        let years = match self.year_range {
            Some((min, max)) => format!("{} to {}", min, max),
            None => "No records".to_string(),
        };

        format!(
            "Records: {} total\n\
            Countries: {} distinct codes\n\
            Year Range: {}\n\
            Mass Range: {} to {}\n\
            Coverage: {}",
            self.total_records,
            self.unique_countries,
            years,
            grams(self.mass_stats.min_mass),
            grams(self.mass_stats.max_mass),
            coverage
        )
    }

    pub fn detailed_summary(&self) -> String {
        let heaviest = match &self.mass_stats.heaviest {
            Some((city, recclass)) => format!(
                "{} ({}) at {}",
                grams(self.mass_stats.max_mass),
                recclass,
                city
            ),
            None => "No mass recorded".to_string(),
        };

        let mut text = format!(
            "{}\n\n\
            Mass:\n\
            - Heaviest: {}\n\
            - Average: {}\n\
            - Without mass: {}/{}\n\n\
            Material Classes:\n",
            self.summary(),
            heaviest,
            grams(self.mass_stats.mean_mass),
            self.mass_stats.missing_mass_records,
            self.total_records
        );

        for class in MaterialClass::ALL {
            text.push_str(&format!(
                "- {}: {}\n",
                class.display_name(),
                self.class_counts.get(&class).copied().unwrap_or(0)
            ));
        }
        text.push_str(&format!("- Unclassified: {}\n", self.unclassified_records));

        text.push_str("\nContinents:\n");
        for (continent, count) in &self.continent_counts {
            text.push_str(&format!("- {}: {}\n", continent, count));
        }

        text
    }
}

impl Default for MeteoriteAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn record(
        city: &str,
        recclass: &str,
        mass: Option<f64>,
        year: i32,
        coords: Option<(f64, f64)>,
        code_2: &str,
        continent: &str,
    ) -> MasterRecord {
        MasterRecord::new(
            city.to_string(),
            recclass.to_string(),
            mass,
            year,
            coords.map(|c| c.0),
            coords.map(|c| c.1),
            "(0.0, 0.0)".to_string(),
            code_2.to_string(),
            "Somewhere".to_string(),
            continent.to_string(),
        )
    }

    fn records() -> Vec<MasterRecord> {
        vec![
            record("Paris", "L6", Some(500.0), 1900, Some((48.85, 2.35)), "FR", "Europe"),
            record("Lyon", "Pallasite", Some(1500.0), 1950, Some((45.76, 4.83)), "FR", "Europe"),
            record("Tokyo", "Iron, IIAB", None, 1975, None, "JP", "Asia"),
            record("Atlantis", "Relict", Some(100.0), 1820, Some((-10.0, -20.0)), "XX", "Unknown"),
        ]
    }

    #[test]
    fn test_statistics() -> Result<()> {
        let stats = MeteoriteAnalyzer::new().calculate_statistics(&records())?;

        assert_eq!(stats.total_records, 4);
        assert_eq!(stats.unique_countries, 3);
        assert_eq!(stats.year_range, Some((1820, 1975)));
        assert_eq!(stats.mass_stats.min_mass, Some(100.0));
        assert_eq!(stats.mass_stats.max_mass, Some(1500.0));
        assert_eq!(stats.mass_stats.mean_mass, Some(700.0));
        assert_eq!(stats.mass_stats.missing_mass_records, 1);
        assert_eq!(
            stats.mass_stats.heaviest,
            Some(("Lyon".to_string(), "Pallasite".to_string()))
        );
        assert_eq!(stats.continent_counts.get("Europe"), Some(&2));
        assert_eq!(stats.class_counts.get(&MaterialClass::Iron), Some(&1));
        assert_eq!(stats.unclassified_records, 1);

        let bounds = stats.geographic_bounds.as_ref().map(|b| (b.min_lat, b.max_lon));
        assert_eq!(bounds, Some((-10.0, 4.83)));
        assert!(stats.detailed_summary().contains("Stony-iron: 1"));
        Ok(())
    }

    #[test]
    fn test_empty_input_reports_zero_counts() -> Result<()> {
        let stats = MeteoriteAnalyzer::new().calculate_statistics(&[])?;

        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.unique_countries, 0);
        assert_eq!(stats.year_range, None);
        assert_eq!(stats.mass_stats.mean_mass, None);
        assert!(stats.geographic_bounds.is_none());
        assert!(stats.summary().contains("Year Range: No records"));
        Ok(())
    }

    #[test]
    fn test_analyze_empty_subset_file() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        ParquetWriter::new().write_records(&[], temp_file.path())?;

        let stats = MeteoriteAnalyzer::new().analyze_parquet(temp_file.path())?;
        assert_eq!(stats.total_records, 0);
        assert!(stats.detailed_summary().contains("- Unclassified: 0"));
        Ok(())
    }

    #[test]
    fn test_analyze_parquet_with_limit() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        ParquetWriter::new().write_records(&records(), temp_file.path())?;

        let analyzer = MeteoriteAnalyzer::new();
        assert_eq!(analyzer.analyze_parquet(temp_file.path())?.total_records, 4);
        assert_eq!(
            analyzer
                .analyze_parquet_with_limit(temp_file.path(), 2)?
                .total_records,
            2
        );
        Ok(())
    }
}
