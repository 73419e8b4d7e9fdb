pub mod aggregator;
pub mod classifier;
pub mod cleaner;
pub mod data_merger;
pub mod integrity_checker;
pub mod pipeline;

pub use aggregator::{Aggregator, LabelCount, YearlyContinentMass, YearlyMean};
pub use classifier::{
    ClassificationMode, ClassificationStats, ClassifiedSubsets, Classifier, LabelPattern,
};
pub use cleaner::{Cleaner, CleaningStats};
pub use data_merger::{DataMerger, JoinStats};
pub use integrity_checker::{IntegrityChecker, IntegrityReport, RecordViolation, ViolationType};
pub use pipeline::{ChartSeries, ClassLabelCounts, DashboardViews, Pipeline, PipelineOutput};
