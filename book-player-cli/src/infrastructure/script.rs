use crate::infrastructure::{CliError, Result};
use book_player_core::{Book, BookPlayer, PlayerCommand, PlayerConfig, PlayerEvent, ProgressReport};
use book_player_core::ActivityRegistry;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A scripted reading session
///
/// ```json
/// {
///   "book": { "pages": [ ... ] },
///   "config": { "navigation_queue_capacity": 8 },
///   "commands": [ { "command": "show_page", "index": 1 }, { "command": "next_page" } ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReplayScript {
    pub book: Book,

    #[serde(default)]
    pub config: PlayerConfig,

    #[serde(default)]
    pub commands: Vec<PlayerCommand>,
}

/// What a replay produced
#[derive(Debug, Clone, Serialize)]
pub struct ReplayOutcome {
    pub report: ProgressReport,
    pub events: Vec<PlayerEvent>,
}

impl ReplayScript {
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::script_not_found(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let script: ReplayScript = serde_json::from_str(raw)?;
        if script.config.navigation_queue_capacity == 0 {
            return Err(CliError::InvalidConfig(
                "navigation_queue_capacity must be at least 1".to_string(),
            ));
        }
        Ok(script)
    }

    /// Run every command in order, then close the session
    ///
    /// Stops at the first command the player rejects.
    pub fn run(self) -> Result<ReplayOutcome> {
        let mut player = BookPlayer::new(self.book, ActivityRegistry::with_builtin(), self.config);
        let mut events = Vec::new();

        for (index, command) in self.commands.into_iter().enumerate() {
            tracing::debug!("▶️ Command {}: {:?}", index, command);
            player
                .handle_command(command)
                .map_err(|source| CliError::Player { index, source })?;
            events.extend(player.drain_events());
        }

        player.close();
        events.extend(player.drain_events());

        Ok(ReplayOutcome {
            report: player.progress_report(),
            events,
        })
    }
}
