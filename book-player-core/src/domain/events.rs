use crate::domain::{ActivityInstanceId, Direction, InputPolicy, PageIndex};
use serde::{Deserialize, Serialize};

/// Events emitted while a book is being read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerEvent {
    /// A page became the current page
    PageShown {
        index: PageIndex,
        numbered: bool,
    },

    /// A new reading pass began (pages shown were cleared)
    ReadingRestarted,

    /// An activity went live on the current page
    ActivityStarted {
        instance_id: ActivityInstanceId,
        activity: String,
        policy: InputPolicy,
    },

    /// An activity was stopped and its page handlers restored
    ActivityStopped {
        instance_id: ActivityInstanceId,
        activity: String,
    },

    /// The page declared an activity that could not be mounted
    ActivityMountFailed { index: PageIndex, reason: String },

    /// An activity failed or panicked inside start/stop
    ActivityFaulted {
        instance_id: ActivityInstanceId,
        reason: String,
    },

    /// Navigation requested through an activity context or default input
    NavigationRequested { direction: Direction },
}
