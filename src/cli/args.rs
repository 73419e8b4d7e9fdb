use crate::utils::constants::{DEFAULT_ROW_GROUP_SIZE, DEFAULT_SAMPLE_SIZE};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meteorite-processor")]
#[command(about = "Meteorite landings processor: joins finds with cities and continents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

/// Input tables and pipeline settings shared by every pipeline command.
#[derive(Args, Debug, Clone, Default)]
pub struct PipelineArgs {
    #[arg(long, help = "Meteorite landings CSV [default: meteorite-landings.csv]")]
    pub meteorites: Option<PathBuf>,

    #[arg(long, help = "World cities CSV [default: worldcitiespop.csv]")]
    pub cities: Option<PathBuf>,

    #[arg(long, help = "Country/continent CSV [default: countryContinent.csv]")]
    pub continents: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "Zip archive holding the three tables (overrides the file paths)"
    )]
    pub archive: Option<PathBuf>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Classification mode: exclusive | rule-concat")]
    pub mode: Option<String>,

    #[arg(long, help = "Upper mass bound of the capped view, in grams")]
    pub mass_cap: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the pipeline and export the dashboard views
    Process {
        #[command(flatten)]
        pipeline: PipelineArgs,

        #[arg(
            short,
            long,
            help = "Output directory [default: output/meteorites-{YYMMDD}]"
        )]
        output_dir: Option<PathBuf>,

        #[arg(short, long, default_value = "snappy")]
        compression: String,

        #[arg(long, default_value_t = DEFAULT_ROW_GROUP_SIZE)]
        row_group_size: usize,

        #[arg(long, default_value = "false")]
        validate_only: bool,
    },

    /// Run the pipeline and print the integrity report without writing files
    Validate {
        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Print the records of one material class
    Select {
        #[command(flatten)]
        pipeline: PipelineArgs,

        #[arg(long, default_value = "stony-iron", help = "stony | iron | stony-iron")]
        class: String,

        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_SIZE)]
        limit: usize,
    },

    /// Display information about a master-table Parquet file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_SIZE)]
        sample: usize,

        #[arg(
            long,
            default_value = "0",
            help = "Maximum records to analyze (0 = all records)"
        )]
        analysis_limit: usize,
    },
}
