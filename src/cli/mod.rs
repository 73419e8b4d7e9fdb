pub mod args;
pub mod commands;

pub use args::{Cli, Commands, PipelineArgs};
pub use commands::run;
