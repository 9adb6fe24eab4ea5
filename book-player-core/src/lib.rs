//! Book player core
//!
//! Hosts at most one interactive activity per displayed page and keeps the
//! reading analytics for a book session.

pub mod activities;
pub mod application;
pub mod domain;
pub mod traits;

pub use activities::{DragToDestinationActivity, SimpleChoiceActivity};
pub use application::{
    ActivityContext, ActivityFactory, ActivityHost, ActivityRegistry, BookPlayer,
    InputDisposition, LoadedActivity, MediaKind, NavigationQueue, PlayerCommand, PlayerConfig,
    PlayerError, StoppedActivity,
};
pub use domain::{
    ActivityInstanceId, ActivityRequirements, Book, BookInteraction, BookPage, Direction,
    InputOutcome, InputPolicy, NavKey, PageElement, PageIndex, PageInput, PageKind, PlayerEvent,
    ProgressReport,
};
pub use traits::{
    Activity, ActivityDefinition, ActivityError, ActivityMountError, ActivityRuntimeError,
    NavigationController,
};
