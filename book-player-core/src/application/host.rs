use crate::application::context::{ActivityContext, ContextSeverer};
use crate::application::ActivityRegistry;
use crate::domain::{
    ActivityInstanceId, ActivityRequirements, ActivityState, Direction, InputOutcome, InputPolicy,
    PageElement, PageInput, PlayerEvent,
};
use crate::traits::{
    Activity, ActivityError, ActivityMountError, ActivityRuntimeError, LifecyclePhase,
    NavigationController,
};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Activity mounted on its page but not yet started
pub struct LoadedActivity {
    activity: Box<dyn Activity>,
    requirements: ActivityRequirements,
}

impl LoadedActivity {
    pub fn activity_id(&self) -> &str {
        self.activity.activity_id()
    }

    pub fn instance_id(&self) -> ActivityInstanceId {
        self.activity.instance_id()
    }

    pub fn requirements(&self) -> ActivityRequirements {
        self.requirements
    }

    pub fn state(&self) -> ActivityState {
        ActivityState::Constructed
    }
}

/// Activity after `stop`; there is no way back to `Started`
pub struct StoppedActivity {
    activity: Box<dyn Activity>,
}

impl StoppedActivity {
    pub fn activity_id(&self) -> &str {
        self.activity.activity_id()
    }

    pub fn instance_id(&self) -> ActivityInstanceId {
        self.activity.instance_id()
    }

    pub fn state(&self) -> ActivityState {
        ActivityState::Stopped
    }

    /// Page as the activity left it (for verifying cleanup)
    pub fn page(&self) -> &PageElement {
        self.activity.page()
    }
}

/// The started activity occupying the host's single slot
struct LiveActivity {
    activity: Box<dyn Activity>,
    requirements: ActivityRequirements,
    severer: ContextSeverer,
}

/// What happened to an input offered to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    /// The live activity consumed it
    Activity,
    /// Default navigation requested a page turn
    Navigate(Direction),
    /// Nobody wanted it
    Unhandled,
}

/// Owns at most one started activity and mediates its lifecycle
pub struct ActivityHost {
    registry: ActivityRegistry,

    /// Controller every context is bound to
    controller: Arc<dyn NavigationController>,

    /// Single active-activity slot
    current: Option<LiveActivity>,

    /// Policy in force for the default input handlers
    policy: InputPolicy,

    allow_hiding_navigation: bool,

    /// Outbound events (caller drains these)
    outbound: Vec<PlayerEvent>,
}

impl ActivityHost {
    pub fn new(registry: ActivityRegistry, controller: Arc<dyn NavigationController>) -> Self {
        Self {
            registry,
            controller,
            current: None,
            policy: InputPolicy::default_navigation(),
            allow_hiding_navigation: true,
            outbound: Vec::new(),
        }
    }

    pub fn with_navigation_hiding(mut self, allow: bool) -> Self {
        self.allow_hiding_navigation = allow;
        self
    }

    // ===== Lifecycle =====

    /// Construct the activity `page` declares
    ///
    /// A mount failure leaves the host untouched; the caller shows the page
    /// without interactivity.
    pub fn load_activity(&self, page: PageElement) -> Result<LoadedActivity, ActivityMountError> {
        let factory = self.registry.resolve(&page)?;
        let requirements = factory.requirements();
        let activity = factory.construct(page, uuid::Uuid::new_v4())?;

        tracing::debug!(
            "Constructed activity {} ({})",
            activity.activity_id(),
            activity.instance_id()
        );

        Ok(LoadedActivity {
            activity,
            requirements,
        })
    }

    /// Start `loaded`, stopping whatever was live first
    ///
    /// A failing or panicking `start` is logged; the activity still counts
    /// as live so that `stop` releases what it acquired.
    pub fn start(&mut self, loaded: LoadedActivity) {
        // Ordering: the previous activity is fully stopped before this one starts
        self.stop();

        let LoadedActivity {
            mut activity,
            requirements,
        } = loaded;
        let instance_id = activity.instance_id();
        let activity_id = activity.activity_id().to_string();

        let (context, severer) = ActivityContext::bind(instance_id, self.controller.clone());
        self.policy = InputPolicy::for_requirements(requirements, self.allow_hiding_navigation);

        if !self.policy.is_default() {
            tracing::debug!(
                "Default handlers standing down for {}: {:?}",
                activity_id,
                self.policy
            );
        }

        tracing::info!("▶️  Starting activity {} ({})", activity_id, instance_id);
        let result = guarded(LifecyclePhase::Start, || activity.start(context));

        self.outbound.push(PlayerEvent::ActivityStarted {
            instance_id,
            activity: activity_id,
            policy: self.policy,
        });
        if let Err(e) = result {
            self.report_fault(instance_id, e);
        }

        self.current = Some(LiveActivity {
            activity,
            requirements,
            severer,
        });
    }

    /// Stop the live activity, if any (idempotent)
    ///
    /// Severs its context and restores the default input handlers.
    pub fn stop(&mut self) -> Option<StoppedActivity> {
        let LiveActivity {
            mut activity,
            severer,
            ..
        } = self.current.take()?;

        let instance_id = activity.instance_id();
        let activity_id = activity.activity_id().to_string();

        severer.sever();
        let result = guarded(LifecyclePhase::Stop, || activity.stop());
        self.policy = InputPolicy::default_navigation();

        tracing::info!("⏹️  Stopped activity {} ({})", activity_id, instance_id);
        if let Err(e) = result {
            self.report_fault(instance_id, e);
        }
        self.outbound.push(PlayerEvent::ActivityStopped {
            instance_id,
            activity: activity_id,
        });

        Some(StoppedActivity { activity })
    }

    // ===== Input =====

    /// Offer `input` to the live activity, then to default navigation
    pub fn handle_input(&mut self, input: &PageInput) -> InputDisposition {
        if let Some(live) = self.current.as_mut() {
            let instance_id = live.activity.instance_id();
            let activity = &mut live.activity;
            let mut outcome = InputOutcome::Ignored;

            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                outcome = activity.handle_input(input);
            }));

            match result {
                Ok(()) if outcome == InputOutcome::Consumed => return InputDisposition::Activity,
                Ok(()) => {}
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    tracing::warn!("Activity {} panicked handling input: {}", instance_id, message);
                    self.outbound.push(PlayerEvent::ActivityFaulted {
                        instance_id,
                        reason: message,
                    });
                }
            }
        }

        match input.default_navigation(&self.policy) {
            Some(Direction::Forward) => {
                self.controller.navigate_to_next_page();
                InputDisposition::Navigate(Direction::Forward)
            }
            Some(Direction::Backward) => {
                self.controller.navigate_to_previous_page();
                InputDisposition::Navigate(Direction::Backward)
            }
            None => InputDisposition::Unhandled,
        }
    }

    // ===== Queries =====

    pub fn registry(&self) -> &ActivityRegistry {
        &self.registry
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_activity_id(&self) -> Option<&str> {
        self.current.as_ref().map(|l| l.activity.activity_id())
    }

    pub fn current_instance_id(&self) -> Option<ActivityInstanceId> {
        self.current.as_ref().map(|l| l.activity.instance_id())
    }

    pub fn current_requirements(&self) -> Option<ActivityRequirements> {
        self.current.as_ref().map(|l| l.requirements)
    }

    /// Page of the live activity
    pub fn current_page(&self) -> Option<&PageElement> {
        self.current.as_ref().map(|l| l.activity.page())
    }

    pub fn input_policy(&self) -> InputPolicy {
        self.policy
    }

    /// Drain all emitted events (caller's responsibility)
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.outbound)
    }

    fn report_fault(&mut self, instance_id: ActivityInstanceId, error: ActivityRuntimeError) {
        tracing::warn!("⚠️  Activity {} faulted: {}", instance_id, error);
        self.outbound.push(PlayerEvent::ActivityFaulted {
            instance_id,
            reason: error.to_string(),
        });
    }
}

impl Drop for ActivityHost {
    fn drop(&mut self) {
        // Never abandon a started activity without stopping it
        self.stop();
    }
}

/// Run an activity callback, turning errors and panics into runtime errors
fn guarded<F>(phase: LifecyclePhase, f: F) -> Result<(), ActivityRuntimeError>
where
    F: FnOnce() -> Result<(), ActivityError>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(ActivityRuntimeError::from_error(phase, e)),
        Err(payload) => Err(ActivityRuntimeError::Panicked {
            phase,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
