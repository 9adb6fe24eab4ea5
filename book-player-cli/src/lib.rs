pub mod infrastructure;

pub use infrastructure::{CliError, LogConfig, ReplayOutcome, ReplayScript, Result};
