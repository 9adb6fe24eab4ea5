mod commands;
mod config;
mod context;
mod error;
mod host;
mod player;
mod registry;
pub mod runtime;

pub use commands::{MediaKind, PlayerCommand};
pub use config::PlayerConfig;
pub use context::ActivityContext;
pub use error::{PlayerError, Result};
pub use host::{ActivityHost, InputDisposition, LoadedActivity, StoppedActivity};
pub use player::BookPlayer;
pub use registry::{ActivityFactory, ActivityRegistry};
pub use runtime::{NavigationQueue, QueueError};
