use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{MasterRecord, MaterialClass};
use crate::processors::aggregator::{Aggregator, LabelCount, YearlyContinentMass, YearlyMean};
use crate::processors::classifier::{ClassificationStats, ClassifiedSubsets, Classifier};
use crate::processors::cleaner::{Cleaner, CleaningStats};
use crate::processors::data_merger::{DataMerger, JoinStats};
use crate::readers::{InputPaths, RawTables, TableLoader};
use crate::utils::progress::ProgressReporter;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Label counts of each material-class subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassLabelCounts {
    pub stony: Vec<LabelCount>,
    pub iron: Vec<LabelCount>,
    pub stony_iron: Vec<LabelCount>,
}

impl ClassLabelCounts {
    pub fn get(&self, class: MaterialClass) -> &[LabelCount] {
        match class {
            MaterialClass::Stony => &self.stony,
            MaterialClass::Iron => &self.iron,
            MaterialClass::StonyIron => &self.stony_iron,
        }
    }
}

/// Chart inputs derived from the master table, exported as `views.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub mass_cap_grams: f64,
    pub yearly_mean_mass: Vec<YearlyMean>,
    pub yearly_continent_mass: Vec<YearlyContinentMass>,
    pub capped_yearly_continent_mass: Vec<YearlyContinentMass>,
    pub label_counts: ClassLabelCounts,
}

/// Everything the presentation layer reads. Built once per run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardViews {
    pub master: Vec<MasterRecord>,
    pub subsets: ClassifiedSubsets,
    pub capped: Vec<MasterRecord>,
    pub charts: ChartSeries,
}

impl DashboardViews {
    /// The subset shown for one material-class selection
    pub fn select(&self, class: MaterialClass) -> &[MasterRecord] {
        self.subsets.get(class)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub views: DashboardViews,
    pub cleaning: CleaningStats,
    pub joins: JoinStats,
    pub classification: ClassificationStats,
}

impl PipelineOutput {
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("=== Pipeline Summary ===\n");
        summary.push_str(&format!(
            "Meteorites: {} read, {} kept after cleaning\n",
            self.cleaning.input_meteorites, self.cleaning.kept_meteorites
        ));
        summary.push_str(&format!(
            "  dropped: {} too late, {} too early, {} without year, {} not found\n",
            self.cleaning.dropped_year_too_late,
            self.cleaning.dropped_year_too_early,
            self.cleaning.dropped_year_missing,
            self.cleaning.dropped_not_found
        ));
        summary.push_str(&format!(
            "Cities: {} ({} duplicate names)\n",
            self.cleaning.cities, self.joins.duplicate_city_keys
        ));
        summary.push_str(&format!(
            "Continents: {} ({} duplicate codes)\n",
            self.cleaning.continents, self.joins.duplicate_country_codes
        ));
        summary.push_str(&format!(
            "Master records: {} ({} unmatched cities, {} without geolocation dropped, {} unmatched codes)\n",
            self.joins.master_records,
            self.joins.unmatched_cities,
            self.joins.dropped_missing_geolocation,
            self.joins.unmatched_country_codes
        ));
        summary.push_str(&format!(
            "Subsets: {} stony, {} iron, {} stony-iron, {} unclassified\n",
            self.classification.stony,
            self.classification.iron,
            self.classification.stony_iron,
            self.classification.unclassified
        ));
        if self.classification.duplicated_rows > 0 {
            summary.push_str(&format!(
                "  duplicated rows: {}\n",
                self.classification.duplicated_rows
            ));
        }
        summary.push_str(&format!(
            "Capped view (< {} g): {} records\n",
            self.views.charts.mass_cap_grams,
            self.views.capped.len()
        ));
        summary
    }
}

/// Runs load, clean, join, classify and aggregate in order.
pub struct Pipeline {
    config: PipelineConfig,
    progress: ProgressReporter,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            progress: ProgressReporter::silent(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the three tables from disk and build the views
    pub fn run(&self, paths: &InputPaths) -> Result<PipelineOutput> {
        self.config.validate_settings()?;

        self.progress.stage("Loading input tables...");
        let tables = TableLoader::with_mmap(self.config.reader.use_mmap).load(paths)?;

        self.run_tables(tables)
    }

    /// Build the views from tables already in memory
    pub fn run_tables(&self, tables: RawTables) -> Result<PipelineOutput> {
        self.config.validate_settings()?;

        self.progress.stage("Cleaning tables...");
        let cleaner = Cleaner::from_config(&self.config.cleaning);
        let mut cleaning = CleaningStats::default();
        let meteorites = cleaner.clean_meteorites(tables.meteorites, &mut cleaning);
        let cities = cleaner.clean_cities(tables.cities, &mut cleaning);
        let continents = cleaner.clean_continents(tables.continents, &mut cleaning);

        self.progress.stage("Joining cities and continents...");
        let mut joins = JoinStats::default();
        let master = DataMerger::new().merge(meteorites, &cities, &continents, &mut joins);

        self.progress.stage("Classifying material types...");
        let (subsets, classification) =
            Classifier::with_mode(self.config.classification.mode).partition(&master);

        self.progress.stage("Aggregating chart series...");
        let aggregator = Aggregator::with_mass_cap(self.config.aggregation.mass_cap_grams);
        let capped = aggregator.capped_mass_view(&master);
        let charts = ChartSeries {
            mass_cap_grams: aggregator.mass_cap(),
            yearly_mean_mass: aggregator.yearly_mean_mass(&master),
            yearly_continent_mass: aggregator.yearly_continent_mass(&master),
            capped_yearly_continent_mass: aggregator.yearly_continent_mass(&capped),
            label_counts: ClassLabelCounts {
                stony: aggregator.label_counts(&subsets.stony),
                iron: aggregator.label_counts(&subsets.iron),
                stony_iron: aggregator.label_counts(&subsets.stony_iron),
            },
        };

        info!(
            master = master.len(),
            capped = capped.len(),
            classified = subsets.total_rows(),
            "pipeline finished"
        );
        self.progress.finish_with_message(&format!(
            "Built {} master records",
            master.len()
        ));

        Ok(PipelineOutput {
            views: DashboardViews {
                master,
                subsets,
                capped,
                charts,
            },
            cleaning,
            joins,
            classification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use crate::models::{RawCity, RawContinent, RawMeteorite};
    use crate::processors::ClassificationMode;
    use pretty_assertions::assert_eq;

    fn meteorite(
        name: &str,
        recclass: &str,
        mass: Option<f64>,
        year: i32,
        geolocation: Option<&str>,
    ) -> RawMeteorite {
        RawMeteorite {
            name: name.to_string(),
            recclass: recclass.to_string(),
            mass,
            fall: "Found".to_string(),
            year: Some(year),
            geolocation: geolocation.map(str::to_string),
            ..Default::default()
        }
    }

    fn city(accent_city: &str, country: &str) -> RawCity {
        RawCity {
            accent_city: accent_city.to_string(),
            country: country.to_string(),
            ..Default::default()
        }
    }

    fn continent(code_2: &str, country: &str, continent: &str) -> RawContinent {
        RawContinent {
            code_2: code_2.to_string(),
            country: country.to_string(),
            continent: continent.to_string(),
            ..Default::default()
        }
    }

    fn tables() -> RawTables {
        RawTables {
            meteorites: vec![
                meteorite("Paris", "L6", Some(500.0), 1900, Some("(48.85, 2.35)")),
                meteorite("Nowhere", "H5", Some(10.0), 1950, None),
                meteorite("Atlantis", "Iron, IIAB", Some(2_000_000.0), 1950, Some("(0.0, 0.0)")),
                meteorite("Lyon", "Pallasite, PMG", Some(999_999.0), 1950, Some("(45.76, 4.83)")),
                meteorite("Lyon", "Eucrite-pmict", None, 1975, Some("(45.76, 4.83)")),
                meteorite("Paris", "Unknown-type", Some(5.0), 2021, Some("(48.85, 2.35)")),
            ],
            cities: vec![city("Paris", "fr"), city("Lyon", "fr")],
            continents: vec![continent("FR", "France", "Europe")],
        }
    }

    #[test]
    fn test_paris_scenario() -> Result<()> {
        let output = Pipeline::new(PipelineConfig::default()).run_tables(RawTables {
            meteorites: vec![meteorite("Paris", "L6", Some(500.0), 1900, Some("(48.85, 2.35)"))],
            cities: vec![city("Paris", "fr")],
            continents: vec![continent("FR", "France", "Europe")],
        })?;

        assert_eq!(
            output.views.master,
            vec![MasterRecord::new(
                "Paris".to_string(),
                "L6".to_string(),
                Some(500.0),
                1900,
                None,
                None,
                "(48.85, 2.35)".to_string(),
                "FR".to_string(),
                "France".to_string(),
                "Europe".to_string(),
            )]
        );
        assert_eq!(output.views.select(MaterialClass::Stony).len(), 1);
        Ok(())
    }

    #[test]
    fn test_full_run() -> Result<()> {
        let output = Pipeline::new(PipelineConfig::default()).run_tables(tables())?;
        let views = &output.views;

        assert_eq!(output.cleaning.dropped_year_too_late, 1);
        assert_eq!(output.joins.dropped_missing_geolocation, 1);
        assert_eq!(views.master.len(), 4);

        let atlantis = &views.master[1];
        assert_eq!(atlantis.code_2, "XX");
        assert_eq!(atlantis.continent, "Unknown");

        let stony_iron: Vec<&str> = views
            .select(MaterialClass::StonyIron)
            .iter()
            .map(|r| r.recclass.as_str())
            .collect();
        assert_eq!(stony_iron, vec!["Pallasite, PMG"]);
        assert_eq!(views.select(MaterialClass::Iron).len(), 1);
        assert_eq!(views.select(MaterialClass::Stony).len(), 2);

        let capped: Vec<&str> = views.capped.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(capped, vec!["Paris", "Lyon"]);

        let years: Vec<i32> = views.charts.yearly_mean_mass.iter().map(|m| m.year).collect();
        assert_eq!(years, vec![1900, 1950, 1975]);
        assert_eq!(views.charts.yearly_mean_mass[2].mean_mass, None);
        assert_eq!(views.charts.label_counts.get(MaterialClass::Iron)[0].count, 1);
        Ok(())
    }

    #[test]
    fn test_rerun_is_identical() -> Result<()> {
        let pipeline = Pipeline::new(PipelineConfig::default());
        let first = pipeline.run_tables(tables())?;
        let second = pipeline.run_tables(tables())?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_rule_concat_mode_duplicates() -> Result<()> {
        let config = PipelineConfig::default().with_mode(ClassificationMode::RuleConcat);
        let output = Pipeline::new(config).run_tables(tables())?;

        let eucrites = output
            .views
            .select(MaterialClass::Stony)
            .iter()
            .filter(|r| r.recclass == "Eucrite-pmict")
            .count();
        assert_eq!(eucrites, 2);
        assert!(output.classification.duplicated_rows >= 1);
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PipelineConfig::default().with_mass_cap(-1.0);
        let result = Pipeline::new(config).run_tables(tables());
        assert!(matches!(result, Err(ProcessingError::Validation(_))));
    }
}
