use crate::domain::{PageIndex, PageInput};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of media that finished playing on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Audio,
    Video,
}

/// Commands a rendering layer (or a replay script) sends to the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PlayerCommand {
    /// Jump to a page
    ShowPage { index: PageIndex },

    NextPage,

    PreviousPage,

    /// Deliver user input to the current page
    Input { input: PageInput },

    /// Media finished playing; `seconds` is added to the session total
    MediaPlayed { kind: MediaKind, seconds: f64 },

    /// Start a new reading pass without ending the session
    RestartReading,

    /// End of session: stop any live activity
    Close,
}
