use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one activity instance (one page visit)
pub type ActivityInstanceId = Uuid;

/// Capabilities an activity needs from the input layer
///
/// Consulted before `start` to decide which default handlers stand down.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct ActivityRequirements {
    pub dragging: bool,
    pub clicking: bool,
    pub typing: bool,
}

impl ActivityRequirements {
    pub const NONE: ActivityRequirements = ActivityRequirements {
        dragging: false,
        clicking: false,
        typing: false,
    };

    pub fn dragging(mut self) -> Self {
        self.dragging = true;
        self
    }

    pub fn clicking(mut self) -> Self {
        self.clicking = true;
        self
    }

    pub fn typing(mut self) -> Self {
        self.typing = true;
        self
    }

    /// True when the activity handles input the default navigation also uses
    pub fn absorbs_navigation_input(&self) -> bool {
        self.dragging || self.typing
    }
}

/// Activity instance lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ActivityState {
    /// Mounted on its page, not yet live
    Constructed,
    /// Live: owns input on its page
    Started,
    /// Terminal
    Stopped,
}

/// Which default handlers stand down while an activity is live
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InputPolicy {
    /// Swipe-to-turn disabled
    pub suppress_gestures: bool,

    /// Arrow-key page turning disabled
    pub suppress_keyboard: bool,

    /// Hint for the rendering layer to hide the prev/next buttons
    pub hide_navigation: bool,
}

impl InputPolicy {
    /// Policy when no activity is live
    pub fn default_navigation() -> Self {
        Self::default()
    }

    pub fn for_requirements(requirements: ActivityRequirements, allow_hiding: bool) -> Self {
        Self {
            suppress_gestures: requirements.dragging,
            suppress_keyboard: requirements.typing,
            hide_navigation: allow_hiding && requirements.absorbs_navigation_input(),
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

/// Keys the default keyboard handler understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Other(char),
}

impl NavKey {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            NavKey::ArrowRight | NavKey::PageDown => Some(Direction::Forward),
            NavKey::ArrowLeft | NavKey::PageUp => Some(Direction::Backward),
            NavKey::Other(_) => None,
        }
    }
}

/// Input delivered to the current page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageInput {
    Swipe { direction: Direction },
    Key { key: NavKey },
    Click { target: String },
    Drag { source: String, target: String },
    Text { text: String },
}

impl PageInput {
    /// Navigation the host performs when nobody else handles this input
    pub fn default_navigation(&self, policy: &InputPolicy) -> Option<Direction> {
        match self {
            PageInput::Swipe { direction } if !policy.suppress_gestures => Some(*direction),
            PageInput::Key { key } if !policy.suppress_keyboard => key.direction(),
            _ => None,
        }
    }
}

/// Whether an activity took an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Consumed,
    Ignored,
}
