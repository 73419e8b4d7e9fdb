pub mod meteorite_analyzer;

pub use meteorite_analyzer::{MeteoriteAnalyzer, MeteoriteStatistics};
