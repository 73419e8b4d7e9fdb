use crate::models::MasterRecord;
use crate::utils::constants::DEFAULT_MASS_CAP_GRAMS;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Mean mass of one year's records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyMean {
    pub year: i32,
    /// `None` when no record of that year has a mass
    pub mean_mass: Option<f64>,
    pub records: usize,
    pub records_with_mass: usize,
}

/// Total mass found in one year on one continent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyContinentMass {
    pub year: i32,
    pub continent: String,
    pub total_mass: f64,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub recclass: String,
    pub count: usize,
}

pub struct Aggregator {
    mass_cap_grams: f64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            mass_cap_grams: DEFAULT_MASS_CAP_GRAMS,
        }
    }

    pub fn with_mass_cap(mass_cap_grams: f64) -> Self {
        Self { mass_cap_grams }
    }

    pub fn mass_cap(&self) -> f64 {
        self.mass_cap_grams
    }

    /// Arithmetic mean of the present masses, one entry per year, ascending.
    pub fn yearly_mean_mass(&self, records: &[MasterRecord]) -> Vec<YearlyMean> {
        // (records, records with mass, mass sum)
        let mut by_year: BTreeMap<i32, (usize, usize, f64)> = BTreeMap::new();

        for record in records {
            let entry = by_year.entry(record.year).or_insert((0, 0, 0.0));
            entry.0 += 1;
            if let Some(mass) = record.mass {
                entry.1 += 1;
                entry.2 += mass;
            }
        }

        by_year
            .into_iter()
            .map(|(year, (count, with_mass, sum))| YearlyMean {
                year,
                mean_mass: (with_mass > 0).then(|| sum / with_mass as f64),
                records: count,
                records_with_mass: with_mass,
            })
            .collect()
    }

    /// Records strictly lighter than the cap. Records without mass are left out.
    pub fn capped_mass_view(&self, records: &[MasterRecord]) -> Vec<MasterRecord> {
        records
            .iter()
            .filter(|r| r.is_below_mass(self.mass_cap_grams))
            .cloned()
            .collect()
    }

    /// Total mass per (year, continent), ascending by year then continent.
    pub fn yearly_continent_mass(&self, records: &[MasterRecord]) -> Vec<YearlyContinentMass> {
        let mut totals: BTreeMap<(i32, &str), (f64, usize)> = BTreeMap::new();

        for record in records {
            let entry = totals
                .entry((record.year, record.continent.as_str()))
                .or_insert((0.0, 0));
            entry.0 += record.mass.unwrap_or(0.0);
            entry.1 += 1;
        }

        totals
            .into_iter()
            .map(|((year, continent), (total_mass, count))| YearlyContinentMass {
                year,
                continent: continent.to_string(),
                total_mass,
                records: count,
            })
            .collect()
    }

    /// Occurrences of each label, most frequent first, ties by label.
    pub fn label_counts(&self, records: &[MasterRecord]) -> Vec<LabelCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in records {
            *counts.entry(record.recclass.as_str()).or_default() += 1;
        }

        let mut labels: Vec<LabelCount> = counts
            .into_iter()
            .map(|(recclass, count)| LabelCount {
                recclass: recclass.to_string(),
                count,
            })
            .collect();

        labels.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.recclass.cmp(&b.recclass)));
        labels
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
