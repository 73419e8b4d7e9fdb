use crate::error::Result;
use crate::processors::ChartSeries;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Writes the chart series as one pretty-printed JSON document.
pub struct JsonWriter;

impl JsonWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_series(&self, series: &ChartSeries, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, series)?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_series(&self, path: &Path) -> Result<ChartSeries> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}
