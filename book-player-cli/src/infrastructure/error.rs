use book_player_core::PlayerError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Script file not found: {path}")]
    ScriptNotFound { path: PathBuf },

    #[error("Command {index} failed: {source}")]
    Player {
        index: usize,
        #[source]
        source: PlayerError,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CliError {
    pub fn script_not_found(path: PathBuf) -> Self {
        CliError::ScriptNotFound { path }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
