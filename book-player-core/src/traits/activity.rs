use crate::application::ActivityContext;
use crate::domain::{
    ActivityInstanceId, ActivityRequirements, InputOutcome, PageElement, PageInput,
};

/// Trait every page activity implements (the instance side)
pub trait Activity: Send {
    /// Registry identifier (e.g., "simple-dom-choice")
    fn activity_id(&self) -> &str;

    /// Unique per page visit
    fn instance_id(&self) -> ActivityInstanceId;

    /// Capability vector, available before `start`
    fn requirements(&self) -> ActivityRequirements;

    /// Go live. The context is the only way to request navigation.
    fn start(&mut self, context: ActivityContext) -> Result<(), ActivityError>;

    /// Release everything acquired in `start` (listeners, timers)
    fn stop(&mut self) -> Result<(), ActivityError>;

    /// Offer an input while started (optional, default = ignore)
    fn handle_input(&mut self, input: &PageInput) -> InputOutcome {
        let _ = input;
        InputOutcome::Ignored
    }

    /// The page subtree this activity owns
    fn page(&self) -> &PageElement;
}

/// Static side of an activity: identifier, requirements, constructor
pub trait ActivityDefinition: Activity + Sized + 'static {
    /// MUST be stable, pages reference it through `data-activity`
    const ID: &'static str;

    fn activity_requirements() -> ActivityRequirements;

    /// Mount on `page`, failing when required sub-elements are missing
    fn construct(
        page: PageElement,
        instance_id: ActivityInstanceId,
    ) -> Result<Self, ActivityMountError>;
}

/// Activity could not be mounted; the page is shown without it
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActivityMountError {
    #[error("Page does not declare an activity")]
    NoActivityDeclared,

    #[error("Unknown activity: {0}")]
    UnknownActivity(String),

    #[error("Activity {activity} requires an element matching {selector}")]
    MissingElement {
        activity: &'static str,
        selector: String,
    },

    #[error("Activity {activity} has an invalid page: {reason}")]
    InvalidPage {
        activity: &'static str,
        reason: String,
    },
}

impl ActivityMountError {
    pub fn missing(activity: &'static str, selector: impl Into<String>) -> Self {
        ActivityMountError::MissingElement {
            activity,
            selector: selector.into(),
        }
    }
}

/// Error an activity reports from `start`/`stop`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActivityError {
    #[error("Invalid activity state: {0}")]
    InvalidState(String),

    #[error("Resource error: {0}")]
    Resource(String),
}

/// Lifecycle phase in which an activity misbehaved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Start,
    Stop,
}

impl std::fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecyclePhase::Start => write!(f, "start"),
            LifecyclePhase::Stop => write!(f, "stop"),
        }
    }
}

/// Fault raised inside a live activity; logged by the host, never propagated
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActivityRuntimeError {
    #[error("Activity failed to start: {0}")]
    StartFailed(#[source] ActivityError),

    #[error("Activity failed to stop: {0}")]
    StopFailed(#[source] ActivityError),

    #[error("Activity panicked during {phase}: {message}")]
    Panicked {
        phase: LifecyclePhase,
        message: String,
    },
}

impl ActivityRuntimeError {
    pub fn from_error(phase: LifecyclePhase, error: ActivityError) -> Self {
        match phase {
            LifecyclePhase::Start => ActivityRuntimeError::StartFailed(error),
            LifecyclePhase::Stop => ActivityRuntimeError::StopFailed(error),
        }
    }
}
