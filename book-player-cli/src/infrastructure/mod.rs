pub mod error;
pub mod observability;
pub mod script;

pub use error::{CliError, Result};
pub use observability::LogConfig;
pub use script::{ReplayOutcome, ReplayScript};
