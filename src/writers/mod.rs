pub mod export;
pub mod json_writer;
pub mod parquet_writer;

pub use export::{DashboardExporter, ExportSummary};
pub use json_writer::JsonWriter;
pub use parquet_writer::{ParquetFileInfo, ParquetWriter};
