//! Library half of the `publicize` command: configuration, output paths and
//! the load → rewrite → save pipeline.

pub mod config;
pub mod error;
pub mod run;

pub use config::{PublicizerConfig, DEFAULT_OUTPUT_DIR_NAME, DEFAULT_OUTPUT_SUFFIX};
pub use error::{CliError, CliResult};
pub use run::{process_module, run, RunOptions, RunOutcome};
