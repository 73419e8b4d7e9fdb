use crate::analyzers::MeteoriteAnalyzer;
use crate::archive::ArchiveExtractor;
use crate::cli::args::{Cli, Commands, PipelineArgs};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{MasterRecord, MaterialClass};
use crate::processors::{
    ClassificationMode, IntegrityChecker, IntegrityReport, Pipeline, PipelineOutput,
};
use crate::readers::InputPaths;
use crate::utils::constants::MASTER_PARQUET_FILE;
use crate::utils::filename::generate_default_output_dir;
use crate::utils::progress::ProgressReporter;
use crate::writers::{DashboardExporter, ParquetWriter};
use tracing::{debug, info};

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Process {
            pipeline,
            output_dir,
            compression,
            row_group_size,
            validate_only,
        } => {
            // Reject a bad codec before the pipeline runs
            let writer = ParquetWriter::new()
                .with_compression(&compression)?
                .with_row_group_size(row_group_size);
            let output_dir = output_dir.unwrap_or_else(generate_default_output_dir);

            println!("Processing meteorite landings...");
            println!("Output directory: {}", output_dir.display());

            let (output, report) = run_pipeline(pipeline, "Processing data...").await?;

            println!("\n{}", output.summary());
            println!("{}", IntegrityChecker::new().generate_summary(&report));

            if validate_only {
                println!("Validation complete - no output files written");
                return Ok(());
            }

            let exporter = DashboardExporter::new(writer);
            let summary = exporter.export(&output.views, &output_dir)?;
            println!("{}", summary.summary());

            let file_info =
                ParquetWriter::new().get_file_info(&output_dir.join(MASTER_PARQUET_FILE))?;
            println!("{}", file_info.summary());

            println!("Processing complete!");
        }

        Commands::Validate { pipeline } => {
            println!("Validating meteorite landings...");

            let (output, report) = run_pipeline(pipeline, "Validating data...").await?;

            println!("\n{}", output.summary());
            println!("{}", IntegrityChecker::new().generate_summary(&report));

            if report.is_clean() {
                println!("✅ All master records passed validation checks");
            } else {
                println!("⚠️  Found {} validation issues", report.violations.len());
            }
        }

        Commands::Select {
            pipeline,
            class,
            limit,
        } => {
            let class: MaterialClass = class.parse()?;
            let (output, _) = run_pipeline(pipeline, "Building views...").await?;

            let subset = output.views.select(class);
            println!(
                "{} meteorites: {} records (showing {})",
                class.display_name(),
                subset.len(),
                limit.min(subset.len())
            );
            for (i, record) in subset.iter().take(limit).enumerate() {
                println!("{}. {}", i + 1, describe_record(record));
            }

            let labels = output.views.charts.label_counts.get(class);
            if !labels.is_empty() {
                println!("\nClasses:");
                for label in labels {
                    println!("  {}: {}", label.recclass, label.count);
                }
            }
        }

        Commands::Info {
            file,
            sample,
            analysis_limit,
        } => {
            println!("Analyzing Parquet file: {}", file.display());

            let writer = ParquetWriter::new();
            let file_info = writer.get_file_info(&file)?;

            let analyzer = MeteoriteAnalyzer::new();
            let stats = analyzer.analyze_parquet_with_limit(&file, analysis_limit)?;

            println!("\n{}", stats.detailed_summary());

            println!("\nFile Details:");
            println!("{}", file_info.summary());

            if sample > 0 {
                println!("\nSample Records (showing {} records):", sample);
                match writer.read_sample_records(&file, sample) {
                    Ok(records) => {
                        for (i, record) in records.iter().enumerate() {
                            println!("{}. {}", i + 1, describe_record(record));
                        }
                    }
                    Err(e) => println!("Error reading sample data: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// Resolve configuration and inputs, then run the pipeline on a blocking
/// thread. An extracted archive lives until the run has finished.
async fn run_pipeline(
    args: PipelineArgs,
    message: &str,
) -> Result<(PipelineOutput, IntegrityReport)> {
    let config = resolve_config(&args)?;

    let mut extractor = None;
    let paths = match &args.archive {
        Some(archive) => {
            info!("Extracting input tables from {}", archive.display());
            let mut archive_extractor = ArchiveExtractor::new()?;
            let paths = archive_extractor.extract_inputs(archive)?;
            debug!(
                files = ?archive_extractor.list_extracted_files(),
                dir = %archive_extractor.temp_dir_path().display(),
                "archive members extracted"
            );
            extractor = Some(archive_extractor);
            paths
        }
        None => config.inputs.clone(),
    };
    debug!(?paths, mode = config.classification.mode.as_str(), "resolved inputs");

    let progress = ProgressReporter::new_spinner(message, false);
    let output = tokio::task::spawn_blocking(move || {
        let pipeline = Pipeline::new(config).with_progress(progress);
        let output = pipeline.run(&paths)?;
        let report = IntegrityChecker::from_config(&pipeline.config().cleaning)
            .check_integrity(&output.views.master);
        Ok::<_, crate::error::ProcessingError>((output, report))
    })
    .await??;

    drop(extractor);
    Ok(output)
}

/// Layer CLI flags over the file and environment configuration
fn resolve_config(args: &PipelineArgs) -> Result<PipelineConfig> {
    let mut config = PipelineConfig::load(args.config.as_deref())?;

    let defaults = config.inputs.clone();
    config = config.with_inputs(InputPaths::new(
        args.meteorites.clone().unwrap_or(defaults.meteorites),
        args.cities.clone().unwrap_or(defaults.cities),
        args.continents.clone().unwrap_or(defaults.continents),
    ));

    if let Some(mode) = &args.mode {
        config = config.with_mode(mode.parse::<ClassificationMode>()?);
    }
    if let Some(mass_cap) = args.mass_cap {
        config = config.with_mass_cap(mass_cap);
    }

    config.validate_settings()?;
    Ok(config)
}

fn describe_record(record: &MasterRecord) -> String {
    let mass = match record.mass {
        Some(mass) => format!("{:.1} g", mass),
        None => "mass unknown".to_string(),
    };
    format!(
        "{} ({}, {}) {} {}, {} {}",
        record.city,
        record.country,
        record.continent,
        record.year,
        record.recclass,
        mass,
        record.geolocation
    )
}
