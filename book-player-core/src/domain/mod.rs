pub mod activity;
pub mod book_interaction;
pub mod events;
pub mod page;

pub use activity::{
    ActivityInstanceId, ActivityRequirements, ActivityState, Direction, InputOutcome,
    InputPolicy, NavKey, PageInput,
};
pub use book_interaction::{BookInteraction, PageIndex, ProgressReport};
pub use events::PlayerEvent;
pub use page::{Book, BookPage, EventListener, ListenerKind, PageElement, PageKind};
