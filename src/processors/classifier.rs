use crate::error::{ProcessingError, Result};
use crate::models::{MasterRecord, MaterialClass};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// How rows matching several rules are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationMode {
    /// Each row gets at most one class, picked by rule precedence.
    #[default]
    Exclusive,
    /// Every rule selects rows on its own and the selections are appended in
    /// rule order. A row matching two rules of a class appears twice.
    RuleConcat,
}

impl ClassificationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationMode::Exclusive => "exclusive",
            ClassificationMode::RuleConcat => "rule-concat",
        }
    }
}

impl FromStr for ClassificationMode {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "exclusive" => Ok(ClassificationMode::Exclusive),
            "rule-concat" | "rule_concat" => Ok(ClassificationMode::RuleConcat),
            other => Err(ProcessingError::Config(format!(
                "Unknown classification mode: {}",
                other
            ))),
        }
    }
}

/// Case-sensitive test on a `recclass` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPattern {
    Prefix(&'static str),
    Contains(&'static str),
}

impl LabelPattern {
    pub fn matches(&self, label: &str) -> bool {
        match self {
            LabelPattern::Prefix(prefix) => label.starts_with(prefix),
            LabelPattern::Contains(needle) => label.contains(needle),
        }
    }
}

/// In rule-concat mode "Howardite" and "Eucrite*" labels each match two of
/// these rules.
pub const STONY_RULES: &[LabelPattern] = &[
    LabelPattern::Prefix("L"),
    LabelPattern::Prefix("H"),
    LabelPattern::Prefix("E"),
    LabelPattern::Prefix("C"),
    LabelPattern::Contains("Ureilite"),
    LabelPattern::Prefix("Diogenite"),
    LabelPattern::Prefix("Eucrite"),
    LabelPattern::Prefix("Angrite"),
    LabelPattern::Prefix("Aubrite"),
    LabelPattern::Prefix("Howardite"),
    LabelPattern::Prefix("Stone"),
    LabelPattern::Prefix("Martian"),
];

pub const IRON_RULES: &[LabelPattern] = &[LabelPattern::Prefix("Iron")];

pub const STONY_IRON_RULES: &[LabelPattern] = &[
    LabelPattern::Prefix("Pallasite"),
    LabelPattern::Prefix("Mesosiderite"),
];

/// Classes in precedence order for exclusive classification.
const PRECEDENCE: [MaterialClass; 3] = [
    MaterialClass::StonyIron,
    MaterialClass::Iron,
    MaterialClass::Stony,
];

pub fn rules_for(class: MaterialClass) -> &'static [LabelPattern] {
    match class {
        MaterialClass::Stony => STONY_RULES,
        MaterialClass::Iron => IRON_RULES,
        MaterialClass::StonyIron => STONY_IRON_RULES,
    }
}

/// Material class of a label, or `None` when no rule matches.
pub fn classify(label: &str) -> Option<MaterialClass> {
    PRECEDENCE
        .into_iter()
        .find(|class| rules_for(*class).iter().any(|rule| rule.matches(label)))
}

/// The three material-class subsets of the master table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassifiedSubsets {
    pub stony: Vec<MasterRecord>,
    pub iron: Vec<MasterRecord>,
    pub stony_iron: Vec<MasterRecord>,
}

impl ClassifiedSubsets {
    pub fn get(&self, class: MaterialClass) -> &[MasterRecord] {
        match class {
            MaterialClass::Stony => &self.stony,
            MaterialClass::Iron => &self.iron,
            MaterialClass::StonyIron => &self.stony_iron,
        }
    }

    fn get_mut(&mut self, class: MaterialClass) -> &mut Vec<MasterRecord> {
        match class {
            MaterialClass::Stony => &mut self.stony,
            MaterialClass::Iron => &mut self.iron,
            MaterialClass::StonyIron => &mut self.stony_iron,
        }
    }

    pub fn total_rows(&self) -> usize {
        self.stony.len() + self.iron.len() + self.stony_iron.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationStats {
    pub stony: usize,
    pub iron: usize,
    pub stony_iron: usize,
    pub unclassified: usize,
    /// Extra copies appended in rule-concat mode
    pub duplicated_rows: usize,
}

pub struct Classifier {
    mode: ClassificationMode,
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            mode: ClassificationMode::Exclusive,
        }
    }

    pub fn with_mode(mode: ClassificationMode) -> Self {
        Self { mode }
    }

    /// Split the master table into material-class subsets. Unclassified rows
    /// are left out of every subset.
    pub fn partition(&self, records: &[MasterRecord]) -> (ClassifiedSubsets, ClassificationStats) {
        let mut stats = ClassificationStats {
            unclassified: records
                .iter()
                .filter(|r| classify(&r.recclass).is_none())
                .count(),
            ..Default::default()
        };

        let subsets = match self.mode {
            ClassificationMode::Exclusive => self.partition_exclusive(records),
            ClassificationMode::RuleConcat => self.partition_by_rules(records, &mut stats),
        };

        stats.stony = subsets.stony.len();
        stats.iron = subsets.iron.len();
        stats.stony_iron = subsets.stony_iron.len();

        debug!(
            mode = self.mode.as_str(),
            stony = stats.stony,
            iron = stats.iron,
            stony_iron = stats.stony_iron,
            unclassified = stats.unclassified,
            "classified master table"
        );

        (subsets, stats)
    }

    fn partition_exclusive(&self, records: &[MasterRecord]) -> ClassifiedSubsets {
        let mut subsets = ClassifiedSubsets::default();
        for record in records {
            if let Some(class) = classify(&record.recclass) {
                subsets.get_mut(class).push(record.clone());
            }
        }
        subsets
    }

    fn partition_by_rules(
        &self,
        records: &[MasterRecord],
        stats: &mut ClassificationStats,
    ) -> ClassifiedSubsets {
        let mut subsets = ClassifiedSubsets::default();

        for class in MaterialClass::ALL {
            let mut seen = vec![false; records.len()];
            let subset = subsets.get_mut(class);

            for rule in rules_for(class) {
                for (i, record) in records.iter().enumerate() {
                    if rule.matches(&record.recclass) {
                        if seen[i] {
                            stats.duplicated_rows += 1;
                        }
                        seen[i] = true;
                        subset.push(record.clone());
                    }
                }
            }
        }

        subsets
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
