use crate::infrastructure::{CliError, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub default_level: tracing::Level,
    pub show_thread_ids: bool,
    pub show_targets: bool,

    /// Whether anything is written to stderr at all
    pub show_logs: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: tracing::Level::WARN,
            show_thread_ids: false,
            show_targets: true,
            show_logs: true,
        }
    }
}

impl LogConfig {
    /// Verbose, human-readable output
    pub fn dev() -> Self {
        Self {
            default_level: tracing::Level::DEBUG,
            show_thread_ids: true,
            ..Default::default()
        }
    }

    /// Configuration for the `--verbose`, `--log-level` and `--quiet` flags
    pub fn from_flags(verbose: bool, level: Option<tracing::Level>, quiet: bool) -> Self {
        let mut config = if verbose { Self::dev() } else { Self::default() };
        if let Some(level) = level {
            config = config.with_level(level);
        }
        if quiet {
            config = config.without_logs();
        }
        config
    }

    /// Keep stderr clean (report-only runs)
    pub fn without_logs(mut self) -> Self {
        self.show_logs = false;
        self
    }

    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.default_level = level;
        self
    }

    /// Filter used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> Result<EnvFilter> {
        let directive = |target: &str| {
            format!("{}={}", target, self.default_level)
                .parse()
                .map_err(|e| CliError::InvalidConfig(format!("bad log directive: {}", e)))
        };

        Ok(EnvFilter::new("warn")
            .add_directive(directive(&env!("CARGO_PKG_NAME").replace('-', "_"))?)
            .add_directive(directive("book_player_core")?))
    }

    pub fn init(self) -> Result<()> {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => self.default_filter()?,
        };

        let outcome = if self.show_logs {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(self.show_targets)
                .with_thread_ids(self.show_thread_ids);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
        } else {
            tracing_subscriber::registry().with(env_filter).try_init()
        };

        outcome.map_err(|e| CliError::InvalidConfig(format!("Failed to initialize tracing: {}", e)))
    }
}
