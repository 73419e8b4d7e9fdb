use crate::config::CleaningConfig;
use crate::models::MasterRecord;
use crate::utils::constants::{MAX_REPORTED_VIOLATIONS, UNKNOWN_CONTINENT, UNKNOWN_COUNTRY};
use crate::utils::coordinates::parse_geolocation;
use serde::Serialize;
use validator::Validate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize)]
pub struct IntegrityReport {
    pub total_records: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    pub resolved_countries: usize,
    pub unknown_countries: usize,
    pub unknown_continents: usize,
    pub missing_mass_records: usize,
    pub malformed_geolocations: usize,
    pub violations: Vec<RecordViolation>,
    pub continent_counts: BTreeMap<String, usize>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordViolation {
    pub row: usize,
    pub city: String,
    pub violation_type: ViolationType,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationType {
    YearOutOfRange,
    MissingGeolocation,
    MalformedCountryCode,
    MissingCountry,
    MissingContinent,
    CoordinatesOutOfRange,
}

/// Checks the master-table invariants and collects coverage counts.
pub struct IntegrityChecker {
    min_year_exclusive: i32,
    max_year_exclusive: i32,
}

impl IntegrityChecker {
    pub fn new() -> Self {
        Self::from_config(&CleaningConfig::default())
    }

    pub fn from_config(config: &CleaningConfig) -> Self {
        Self {
            min_year_exclusive: config.min_year_exclusive,
            max_year_exclusive: config.max_year_exclusive,
        }
    }

    pub fn check_integrity(&self, records: &[MasterRecord]) -> IntegrityReport {
        let mut report = IntegrityReport {
            total_records: records.len(),
            ..Default::default()
        };

        for (row, record) in records.iter().enumerate() {
            let before = report.violations.len();
            self.check_record(row, record, &mut report);

            if report.violations.len() == before {
                report.valid_records += 1;
            } else {
                report.invalid_records += 1;
            }

            if record.has_resolved_country() {
                report.resolved_countries += 1;
            }
            if record.country == UNKNOWN_COUNTRY {
                report.unknown_countries += 1;
            }
            if record.continent == UNKNOWN_CONTINENT {
                report.unknown_continents += 1;
            }
            if record.mass.is_none() {
                report.missing_mass_records += 1;
            }
            if !record.geolocation.is_empty() && parse_geolocation(&record.geolocation).is_err() {
                report.malformed_geolocations += 1;
            }

            *report
                .continent_counts
                .entry(record.continent.clone())
                .or_default() += 1;
        }

        report
    }

    fn check_record(&self, row: usize, record: &MasterRecord, report: &mut IntegrityReport) {
        let mut push = |violation_type: ViolationType, details: String| {
            report.violations.push(RecordViolation {
                row,
                city: record.city.clone(),
                violation_type,
                details,
            });
        };

        if record.year <= self.min_year_exclusive || record.year >= self.max_year_exclusive {
            push(
                ViolationType::YearOutOfRange,
                format!(
                    "year {} is outside ({}, {})",
                    record.year, self.min_year_exclusive, self.max_year_exclusive
                ),
            );
        }

        // Length is checked by the validator, letter case here
        if record.code_2.len() == 2 && !record.has_valid_country_code() {
            push(
                ViolationType::MalformedCountryCode,
                format!("country code '{}' is not uppercase", record.code_2),
            );
        }

        let field_errors = match record.validate() {
            Ok(()) => return,
            Err(errors) => errors,
        };
        let failed = |field: &str| field_errors.field_errors().contains_key(field);

        if failed("geolocation") {
            push(
                ViolationType::MissingGeolocation,
                "geolocation is empty".to_string(),
            );
        }

        if failed("code_2") {
            push(
                ViolationType::MalformedCountryCode,
                format!("country code '{}' is not two characters long", record.code_2),
            );
        }

        if failed("country") {
            push(ViolationType::MissingCountry, "country is empty".to_string());
        }

        if failed("continent") {
            push(
                ViolationType::MissingContinent,
                "continent is empty".to_string(),
            );
        }

        if failed("reclat") || failed("reclong") {
            push(
                ViolationType::CoordinatesOutOfRange,
                format!(
                    "coordinates ({:?}, {:?}) are outside the valid range",
                    record.reclat, record.reclong
                ),
            );
        }
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let percent = |count: usize| {
            if report.total_records == 0 {
                0.0
            } else {
                100.0 * count as f64 / report.total_records as f64
            }
        };

        let mut summary = String::new();

        summary.push_str("=== Integrity Check Report ===\n");
        summary.push_str(&format!("Total Records: {}\n", report.total_records));
        summary.push_str(&format!(
            "Valid Records: {} ({:.1}%)\n",
            report.valid_records,
            percent(report.valid_records)
        ));
        summary.push_str(&format!(
            "Invalid Records: {} ({:.1}%)\n",
            report.invalid_records,
            percent(report.invalid_records)
        ));
        summary.push_str(&format!(
            "Resolved Countries: {} ({:.1}%)\n",
            report.resolved_countries,
            percent(report.resolved_countries)
        ));
        summary.push_str(&format!(
            "Unknown Continents: {}\n",
            report.unknown_continents
        ));
        summary.push_str(&format!(
            "Records Without Mass: {}\n",
            report.missing_mass_records
        ));
        summary.push_str(&format!(
            "Malformed Geolocations: {}\n",
            report.malformed_geolocations
        ));

        if !report.continent_counts.is_empty() {
            summary.push_str("\nRecords per Continent:\n");
            for (continent, count) in &report.continent_counts {
                summary.push_str(&format!("  {}: {}\n", continent, count));
            }
        }

        summary.push_str(&format!("\nViolations: {}\n", report.violations.len()));

        if !report.violations.is_empty() {
            summary.push_str(&format!("\nTop {} Violations:\n", MAX_REPORTED_VIOLATIONS));
            for (i, violation) in report
                .violations
                .iter()
                .take(MAX_REPORTED_VIOLATIONS)
                .enumerate()
            {
                summary.push_str(&format!(
                    "  {}. Row {} ({}): {}\n",
                    i + 1,
                    violation.row,
                    violation.city,
                    violation.details
                ));
            }
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}
