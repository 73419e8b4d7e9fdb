use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Generate default output directory with format: output/meteorites-{YYMMDD}
pub fn generate_default_output_dir() -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let dirname = format!("meteorites-{:02}{:02}{:02}", year, month, day);
    PathBuf::from("output").join(dirname)
}

/// Parquet file name for one material-class subset, e.g. `stony-iron.parquet`
pub fn subset_parquet_filename(class: crate::models::MaterialClass) -> String {
    format!("{}.parquet", class.as_str())
}
