use crate::error::Result;
use crate::models::MaterialClass;
use crate::processors::DashboardViews;
use crate::utils::constants::{CAPPED_PARQUET_FILE, MASTER_PARQUET_FILE, VIEWS_JSON_FILE};
use crate::utils::filename::subset_parquet_filename;
use crate::writers::{JsonWriter, ParquetWriter};
use std::path::{Path, PathBuf};
use tracing::info;

/// Files written by one export, in write order.
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    pub files: Vec<(PathBuf, usize)>,
}

impl ExportSummary {
    pub fn summary(&self) -> String {
        let mut summary = String::from("Exported files:\n");
        for (path, rows) in &self.files {
            summary.push_str(&format!("  {} ({} rows)\n", path.display(), rows));
        }
        summary
    }
}

/// Writes every dashboard view into one output directory.
pub struct DashboardExporter {
    parquet: ParquetWriter,
    json: JsonWriter,
}

impl DashboardExporter {
    pub fn new(parquet: ParquetWriter) -> Self {
        Self {
            parquet,
            json: JsonWriter::new(),
        }
    }

    pub fn export(&self, views: &DashboardViews, output_dir: &Path) -> Result<ExportSummary> {
        std::fs::create_dir_all(output_dir)?;
        let mut summary = ExportSummary::default();

        let master_path = output_dir.join(MASTER_PARQUET_FILE);
        self.parquet.write_records(&views.master, &master_path)?;
        summary.files.push((master_path, views.master.len()));

        let capped_path = output_dir.join(CAPPED_PARQUET_FILE);
        self.parquet.write_records(&views.capped, &capped_path)?;
        summary.files.push((capped_path, views.capped.len()));

        for class in MaterialClass::ALL {
            let subset = views.select(class);
            let path = output_dir.join(subset_parquet_filename(class));
            self.parquet.write_records(subset, &path)?;
            summary.files.push((path, subset.len()));
        }

        let json_path = output_dir.join(VIEWS_JSON_FILE);
        self.json.write_series(&views.charts, &json_path)?;
        summary.files.push((json_path, views.charts.yearly_mean_mass.len()));

        info!(
            "Exported {} files to {}",
            summary.files.len(),
            output_dir.display()
        );
        Ok(summary)
    }
}

impl Default for DashboardExporter {
    fn default() -> Self {
        Self::new(ParquetWriter::new())
    }
}
