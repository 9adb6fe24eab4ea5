pub mod activity;
pub mod navigation;

pub use activity::{
    Activity, ActivityDefinition, ActivityError, ActivityMountError, ActivityRuntimeError,
    LifecyclePhase,
};
pub use navigation::NavigationController;
