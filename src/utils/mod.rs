pub mod constants;
pub mod coordinates;
pub mod fields;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{format_geolocation, parse_geolocation};
pub use filename::{generate_default_output_dir, subset_parquet_filename};
pub use progress::ProgressReporter;
