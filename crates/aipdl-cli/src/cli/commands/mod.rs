//! CLI command handlers, one file per command.

mod checksum;
mod config;
mod merge;
mod plan;
mod run;

pub use checksum::run_checksum;
pub use config::run_config;
pub use merge::run_merge;
pub use plan::run_plan;
pub use run::{run_pipeline, RunOverrides};
