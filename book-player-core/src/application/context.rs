use crate::domain::ActivityInstanceId;
use crate::traits::NavigationController;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared between the context handed to the activity and the host's severer
struct ContextBinding {
    instance_id: ActivityInstanceId,
    controller: Arc<dyn NavigationController>,
    live: AtomicBool,
}

/// Navigation handle given to an activity in `start`
///
/// Cloning is cheap and every clone shares the same binding. Once the host
/// stops the owning activity, all calls are silent no-ops.
#[derive(Clone)]
pub struct ActivityContext {
    binding: Arc<ContextBinding>,
}

/// Host-side half of a binding
pub(crate) struct ContextSeverer {
    binding: Arc<ContextBinding>,
}

impl ActivityContext {
    /// Bind a fresh context for one activity instance
    pub(crate) fn bind(
        instance_id: ActivityInstanceId,
        controller: Arc<dyn NavigationController>,
    ) -> (Self, ContextSeverer) {
        let binding = Arc::new(ContextBinding {
            instance_id,
            controller,
            live: AtomicBool::new(true),
        });

        (
            Self {
                binding: binding.clone(),
            },
            ContextSeverer { binding },
        )
    }

    pub fn navigate_to_next_page(&self) {
        if self.is_live() {
            self.binding.controller.navigate_to_next_page();
        } else {
            tracing::trace!(
                "Ignoring next-page request from stopped activity {}",
                self.binding.instance_id
            );
        }
    }

    pub fn navigate_to_previous_page(&self) {
        if self.is_live() {
            self.binding.controller.navigate_to_previous_page();
        } else {
            tracing::trace!(
                "Ignoring previous-page request from stopped activity {}",
                self.binding.instance_id
            );
        }
    }

    /// False once the owning activity has been stopped
    pub fn is_live(&self) -> bool {
        self.binding.live.load(Ordering::Acquire)
    }
}

impl fmt::Debug for ActivityContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityContext")
            .field("instance_id", &self.binding.instance_id)
            .field("live", &self.is_live())
            .finish()
    }
}

impl ContextSeverer {
    pub(crate) fn sever(&self) {
        self.binding.live.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use uuid::Uuid;

    #[derive(Default)]
    struct CountingController {
        next: AtomicUsize,
        previous: AtomicUsize,
    }

    impl NavigationController for CountingController {
        fn navigate_to_next_page(&self) {
            self.next.fetch_add(1, Ordering::SeqCst);
        }

        fn navigate_to_previous_page(&self) {
            self.previous.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_context_forwards_while_live() {
        let controller = Arc::new(CountingController::default());
        let (context, _severer) = ActivityContext::bind(Uuid::new_v4(), controller.clone());

        context.navigate_to_next_page();
        context.navigate_to_next_page();
        context.navigate_to_previous_page();

        assert_eq!(controller.next.load(Ordering::SeqCst), 2);
        assert_eq!(controller.previous.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_severed_context_is_noop() {
        let controller = Arc::new(CountingController::default());
        let (context, severer) = ActivityContext::bind(Uuid::new_v4(), controller.clone());
        let kept_clone = context.clone();

        severer.sever();
        context.navigate_to_next_page();
        kept_clone.navigate_to_previous_page();

        assert!(!kept_clone.is_live());
        assert_eq!(controller.next.load(Ordering::SeqCst), 0);
        assert_eq!(controller.previous.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_debug_does_not_expose_controller() {
        let (context, _severer) =
            ActivityContext::bind(Uuid::nil(), Arc::new(CountingController::default()));

        let debug = format!("{:?}", context);
        assert!(debug.contains("ActivityContext"));
        assert!(debug.contains("live: true"));
    }
}
