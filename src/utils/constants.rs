/// Input file names (as published on Kaggle)
pub const METEORITES_FILE: &str = "meteorite-landings.csv";
pub const CITIES_FILE: &str = "worldcitiespop.csv";
pub const CONTINENTS_FILE: &str = "countryContinent.csv";

/// Output file names
pub const MASTER_PARQUET_FILE: &str = "master.parquet";
pub const CAPPED_PARQUET_FILE: &str = "capped.parquet";
pub const VIEWS_JSON_FILE: &str = "views.json";

/// Fall status kept by the cleaner
pub const FALL_FOUND: &str = "Found";

/// Year filter bounds (both exclusive)
pub const DEFAULT_MIN_YEAR_EXCLUSIVE: i32 = 1800;
pub const DEFAULT_MAX_YEAR_EXCLUSIVE: i32 = 2021;

/// One metric ton, in grams
pub const DEFAULT_MASS_CAP_GRAMS: f64 = 1_000_000.0;

/// Sentinel values for unresolved joins
pub const UNKNOWN_COUNTRY_CODE: &str = "XX";
pub const UNKNOWN_COUNTRY: &str = "Unknown";
pub const UNKNOWN_CONTINENT: &str = "Unknown";

/// Processing defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const DEFAULT_SAMPLE_SIZE: usize = 10;
pub const MAX_REPORTED_VIOLATIONS: usize = 10;

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "METEORITES";
