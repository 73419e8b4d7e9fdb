use crate::error::{ProcessingError, Result};
use crate::models::MasterRecord;
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE,
};
use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    fn writer_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build()
    }

    /// Write master-table records to a Parquet file. An empty slice still
    /// produces a file carrying the schema.
    pub fn write_records(&self, records: &[MasterRecord], path: &Path) -> Result<()> {
        let schema = self.create_schema();
        let file = File::create(path)?;
        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(self.writer_properties()))?;

        if !records.is_empty() {
            let batch = self.records_to_batch(records, schema)?;
            writer.write(&batch)?;
        }

        writer.close()?;
        Ok(())
    }

    /// Write records in batches for memory efficiency
    pub fn write_records_batched(
        &self,
        records: &[MasterRecord],
        path: &Path,
        batch_size: usize,
    ) -> Result<()> {
        let schema = self.create_schema();
        let file = File::create(path)?;
        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(self.writer_properties()))?;

        for chunk in records.chunks(batch_size.max(1)) {
            let batch = self.records_to_batch(chunk, schema.clone())?;
            writer.write(&batch)?;
        }

        writer.close()?;
        Ok(())
    }

    /// Arrow schema of the master table
    fn create_schema(&self) -> Arc<Schema> {
        let fields = vec![
            Field::new("city", DataType::Utf8, false),
            Field::new("recclass", DataType::Utf8, false),
            Field::new("mass", DataType::Float64, true),
            Field::new("year", DataType::Int32, false),
            Field::new("reclat", DataType::Float64, true),
            Field::new("reclong", DataType::Float64, true),
            Field::new("geolocation", DataType::Utf8, false),
            Field::new("code_2", DataType::Utf8, false),
            Field::new("country", DataType::Utf8, false),
            Field::new("continent", DataType::Utf8, false),
        ];

        Arc::new(Schema::new(fields))
    }

    fn records_to_batch(&self, records: &[MasterRecord], schema: Arc<Schema>) -> Result<RecordBatch> {
        let strings = |f: fn(&MasterRecord) -> &str| -> ArrayRef {
            Arc::new(StringArray::from_iter_values(records.iter().map(f)))
        };
        let floats = |f: fn(&MasterRecord) -> Option<f64>| -> ArrayRef {
            Arc::new(Float64Array::from(records.iter().map(f).collect::<Vec<_>>()))
        };

        let columns: Vec<ArrayRef> = vec![
            strings(|r| r.city.as_str()),
            strings(|r| r.recclass.as_str()),
            floats(|r| r.mass),
            Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.year))),
            floats(|r| r.reclat),
            floats(|r| r.reclong),
            strings(|r| r.geolocation.as_str()),
            strings(|r| r.code_2.as_str()),
            strings(|r| r.country.as_str()),
            strings(|r| r.continent.as_str()),
        ];

        Ok(RecordBatch::try_new(schema, columns)?)
    }

    /// Read every record of a master-table Parquet file
    pub fn read_records(&self, path: &Path) -> Result<Vec<MasterRecord>> {
        self.read_sample_records(path, usize::MAX)
    }

    /// Read at most `limit` records from the start of the file
    pub fn read_sample_records(&self, path: &Path, limit: usize) -> Result<Vec<MasterRecord>> {
        let file = File::open(path)?;
        let parquet_reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(limit.clamp(1, 8192))
            .build()?;

        let mut records = Vec::new();

        for batch_result in parquet_reader {
            if records.len() >= limit {
                break;
            }
            let batch = batch_result?;

            let cities = typed_column::<StringArray>(&batch, "city")?;
            let recclasses = typed_column::<StringArray>(&batch, "recclass")?;
            let masses = typed_column::<Float64Array>(&batch, "mass")?;
            let years = typed_column::<Int32Array>(&batch, "year")?;
            let latitudes = typed_column::<Float64Array>(&batch, "reclat")?;
            let longitudes = typed_column::<Float64Array>(&batch, "reclong")?;
            let geolocations = typed_column::<StringArray>(&batch, "geolocation")?;
            let codes = typed_column::<StringArray>(&batch, "code_2")?;
            let countries = typed_column::<StringArray>(&batch, "country")?;
            let continents = typed_column::<StringArray>(&batch, "continent")?;

            let to_read = batch.num_rows().min(limit - records.len());
            for i in 0..to_read {
                records.push(MasterRecord::new(
                    cities.value(i).to_string(),
                    recclasses.value(i).to_string(),
                    optional_value(masses, i),
                    years.value(i),
                    optional_value(latitudes, i),
                    optional_value(longitudes, i),
                    geolocations.value(i).to_string(),
                    codes.value(i).to_string(),
                    countries.value(i).to_string(),
                    continents.value(i).to_string(),
                ));
            }
        }

        Ok(records)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let row_groups = metadata.num_row_groups();
        let total_rows = metadata.file_metadata().num_rows();
        let file_size = std::fs::metadata(path)?.len();

        let row_group_sizes = (0..row_groups)
            .map(|i| metadata.row_group(i).num_rows())
            .collect();

        // Column chunks carry the codec actually used
        let compression = if row_groups > 0 && metadata.row_group(0).num_columns() > 0 {
            metadata.row_group(0).column(0).compression()
        } else {
            self.compression
        };

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            row_group_sizes,
            file_size,
            compression,
        })
    }
}

/// Look up a master-table column by name, rejecting files with another layout
fn typed_column<'a, T: Array + 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T> {
    let column = batch.column_by_name(name).ok_or_else(|| {
        ProcessingError::InvalidFormat(format!("Missing {} column in master table file", name))
    })?;

    column.as_any().downcast_ref::<T>().ok_or_else(|| {
        ProcessingError::InvalidFormat(format!(
            "Invalid {} column type: {}",
            name,
            column.data_type()
        ))
    })
}

fn optional_value(array: &Float64Array, i: usize) -> Option<f64> {
    if array.is_null(i) {
        None
    } else {
        Some(array.value(i))
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub row_group_sizes: Vec<i64>,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        let avg_rows = if self.row_groups > 0 {
            self.total_rows as f64 / self.row_groups as f64
        } else {
            0.0
        };

        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} MB\n\
            - Compression: {:?}\n\
            - Avg rows per group: {:.0}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1_048_576.0,
            self.compression,
            avg_rows
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    fn records() -> Vec<MasterRecord> {
        vec![
            MasterRecord::new(
                "Paris".to_string(),
                "L6".to_string(),
                Some(500.0),
                1900,
                Some(48.85),
                Some(2.35),
                "(48.85, 2.35)".to_string(),
                "FR".to_string(),
                "France".to_string(),
                "Europe".to_string(),
            ),
            MasterRecord::new(
                "Atlantis".to_string(),
                "Iron, IIAB".to_string(),
                None,
                1950,
                None,
                None,
                "(0.0, 0.0)".to_string(),
                "XX".to_string(),
                "Unknown".to_string(),
                "Unknown".to_string(),
            ),
        ]
    }

    #[test]
    fn test_write_empty_records() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;

        writer.write_records(&[], temp_file.path())?;

        assert!(writer.read_records(temp_file.path())?.is_empty());
        assert_eq!(writer.get_file_info(temp_file.path())?.total_rows, 0);
        Ok(())
    }

    #[test]
    fn test_round_trip_keeps_absent_values() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;

        writer.write_records(&records(), temp_file.path())?;

        assert_eq!(writer.read_records(temp_file.path())?, records());
        Ok(())
    }

    #[test]
    fn test_batched_write_and_sample_read() -> Result<()> {
        let writer = ParquetWriter::new().with_row_group_size(1);
        let temp_file = NamedTempFile::new()?;

        writer.write_records_batched(&records(), temp_file.path(), 1)?;

        let sample = writer.read_sample_records(temp_file.path(), 1)?;
        assert_eq!(sample.len(), 1);
        assert_eq!(sample[0].city, "Paris");

        let info = writer.get_file_info(temp_file.path())?;
        assert_eq!(info.total_rows, 2);
        assert_eq!(info.row_groups, 2);
        assert_eq!(info.row_group_sizes, vec![1, 1]);
        Ok(())
    }

    #[test]
    fn test_different_compressions() -> Result<()> {
        let compressions = ["snappy", "gzip", "lz4", "zstd", "none"];

        for compression in &compressions {
            let writer = ParquetWriter::new().with_compression(compression)?;
            let temp_file = NamedTempFile::new()?;

            let result = writer.write_records(&records(), temp_file.path());
            assert!(result.is_ok(), "Failed with compression: {}", compression);
        }

        Ok(())
    }

    fn write_single_column(path: &Path, name: &str, column: ArrayRef) -> Result<()> {
        let schema = Arc::new(Schema::new(vec![Field::new(
            name,
            column.data_type().clone(),
            false,
        )]));
        let batch = RecordBatch::try_new(schema.clone(), vec![column])?;
        let mut writer = ArrowWriter::try_new(File::create(path)?, schema, None)?;
        writer.write(&batch)?;
        writer.close()?;
        Ok(())
    }

    #[test]
    fn test_foreign_layout_is_invalid_format() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;

        let stations: ArrayRef = Arc::new(Int32Array::from(vec![1, 2, 3]));
        write_single_column(temp_file.path(), "station", stations)?;

        assert!(matches!(
            writer.read_records(temp_file.path()),
            Err(ProcessingError::InvalidFormat(_))
        ));
        Ok(())
    }

    #[test]
    fn test_wrong_column_type_is_invalid_format() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;

        let cities: ArrayRef = Arc::new(Int32Array::from(vec![7]));
        write_single_column(temp_file.path(), "city", cities)?;

        match writer.read_records(temp_file.path()) {
            Err(ProcessingError::InvalidFormat(message)) => assert!(message.contains("city")),
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_unknown_compression_is_rejected() {
        assert!(matches!(
            ParquetWriter::new().with_compression("brotli9000"),
            Err(ProcessingError::Config(_))
        ));
    }
}
