//! Pipeline configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `METEORITES__SECTION__KEY` environment variables. CLI flags are applied on
//! top by the caller.

use crate::error::{ProcessingError, Result};
use crate::processors::ClassificationMode;
use crate::readers::InputPaths;
use crate::utils::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_MASS_CAP_GRAMS, DEFAULT_MAX_YEAR_EXCLUSIVE,
    DEFAULT_MIN_YEAR_EXCLUSIVE,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub inputs: InputPaths,
    pub cleaning: CleaningConfig,
    pub classification: ClassificationConfig,
    pub aggregation: AggregationConfig,
    pub reader: ReaderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    pub min_year_exclusive: i32,
    pub max_year_exclusive: i32,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            min_year_exclusive: DEFAULT_MIN_YEAR_EXCLUSIVE,
            max_year_exclusive: DEFAULT_MAX_YEAR_EXCLUSIVE,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub mode: ClassificationMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AggregationConfig {
    /// Rows at or above this mass are left out of the capped view
    #[validate(range(min = 1.0))]
    pub mass_cap_grams: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            mass_cap_grams: DEFAULT_MASS_CAP_GRAMS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub use_mmap: bool,
}

impl PipelineConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            debug!(path = %path.display(), "reading configuration file");
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: PipelineConfig = settings.try_deserialize()?;
        config.validate_settings()?;
        Ok(config)
    }

    pub fn validate_settings(&self) -> Result<()> {
        self.aggregation.validate()?;

        if !self.aggregation.mass_cap_grams.is_finite() {
            return Err(ProcessingError::Config(format!(
                "Mass cap must be finite, got {}",
                self.aggregation.mass_cap_grams
            )));
        }

        // At least one year must lie strictly between the bounds
        if self.cleaning.max_year_exclusive <= self.cleaning.min_year_exclusive.saturating_add(1) {
            return Err(ProcessingError::Config(format!(
                "Year bounds ({}, {}) leave no valid year",
                self.cleaning.min_year_exclusive, self.cleaning.max_year_exclusive
            )));
        }

        Ok(())
    }

    pub fn with_mode(mut self, mode: ClassificationMode) -> Self {
        self.classification.mode = mode;
        self
    }

    pub fn with_mass_cap(mut self, mass_cap_grams: f64) -> Self {
        self.aggregation.mass_cap_grams = mass_cap_grams;
        self
    }

    pub fn with_inputs(mut self, inputs: InputPaths) -> Self {
        self.inputs = inputs;
        self
    }
}
