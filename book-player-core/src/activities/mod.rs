//! Activities shipped with the player
//!
//! Both work on plain page markup and are registered by
//! [`ActivityRegistry::with_builtin`](crate::application::ActivityRegistry::with_builtin).

mod choice;
mod drag;

pub use choice::SimpleChoiceActivity;
pub use drag::DragToDestinationActivity;
