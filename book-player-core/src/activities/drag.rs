use crate::application::ActivityContext;
use crate::domain::{
    ActivityInstanceId, ActivityRequirements, InputOutcome, ListenerKind, PageElement, PageInput,
};
use crate::traits::{Activity, ActivityDefinition, ActivityError, ActivityMountError};
use std::collections::{BTreeMap, BTreeSet};

/// Drag game: every `.drag-item` must be dropped on the `.drop-target`
/// named by its `data-target` attribute
pub struct DragToDestinationActivity {
    instance_id: ActivityInstanceId,
    page: PageElement,

    /// item id -> destination id
    destinations: BTreeMap<String, String>,

    placed: BTreeSet<String>,
    advance_on_complete: bool,
    context: Option<ActivityContext>,
}

impl DragToDestinationActivity {
    pub fn is_complete(&self) -> bool {
        self.placed.len() == self.destinations.len()
    }

    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    fn drop_item(&mut self, item: &str, target: &str) {
        let correct = self.destinations.get(item).map(String::as_str) == Some(target);

        if let Some(element) = self.page.find_by_id_mut(item) {
            if correct {
                element.remove_class("wrong-drop");
                element.add_class("placed");
            } else {
                element.remove_class("placed");
                element.add_class("wrong-drop");
            }
        }

        if !correct {
            // Moved off its destination: no longer counts as placed
            if self.placed.remove(item) {
                self.page.remove_class("activity-complete");
            }
            return;
        }

        if !self.placed.insert(item.to_string()) || !self.is_complete() {
            return;
        }

        tracing::debug!("Drag activity {} complete", self.instance_id);
        self.page.add_class("activity-complete");
        if self.advance_on_complete {
            if let Some(context) = &self.context {
                context.navigate_to_next_page();
            }
        }
    }
}

impl Activity for DragToDestinationActivity {
    fn activity_id(&self) -> &str {
        Self::ID
    }

    fn instance_id(&self) -> ActivityInstanceId {
        self.instance_id
    }

    fn requirements(&self) -> ActivityRequirements {
        Self::activity_requirements()
    }

    fn start(&mut self, context: ActivityContext) -> Result<(), ActivityError> {
        let owner = self.instance_id;
        for (item, target) in &self.destinations {
            if let Some(element) = self.page.find_by_id_mut(item) {
                element.attach_listener(ListenerKind::Drag, owner);
            }
            if let Some(element) = self.page.find_by_id_mut(target) {
                element.attach_listener(ListenerKind::Drop, owner);
            }
        }
        self.context = Some(context);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ActivityError> {
        self.page.detach_listeners_for(self.instance_id);
        self.context = None;
        Ok(())
    }

    fn handle_input(&mut self, input: &PageInput) -> InputOutcome {
        match input {
            PageInput::Drag { source, target } if self.destinations.contains_key(source) => {
                self.drop_item(source, target);
                InputOutcome::Consumed
            }
            _ => InputOutcome::Ignored,
        }
    }

    fn page(&self) -> &PageElement {
        &self.page
    }
}

impl ActivityDefinition for DragToDestinationActivity {
    const ID: &'static str = "drag-to-destination";

    fn activity_requirements() -> ActivityRequirements {
        ActivityRequirements::NONE.dragging()
    }

    fn construct(
        page: PageElement,
        instance_id: ActivityInstanceId,
    ) -> Result<Self, ActivityMountError> {
        let items = page.find_all_by_class("drag-item");
        if items.is_empty() {
            return Err(ActivityMountError::missing(Self::ID, ".drag-item"));
        }

        let mut destinations = BTreeMap::new();
        for item in items {
            let (Some(id), Some(target)) = (item.id.as_deref(), item.attribute("data-target"))
            else {
                return Err(ActivityMountError::InvalidPage {
                    activity: Self::ID,
                    reason: "drag items need an id and a data-target".to_string(),
                });
            };

            let target_exists = page
                .find_by_id(target)
                .is_some_and(|t| t.has_class("drop-target"));
            if !target_exists {
                return Err(ActivityMountError::missing(
                    Self::ID,
                    format!(".drop-target#{}", target),
                ));
            }
            destinations.insert(id.to_string(), target.to_string());
        }

        let advance_on_complete = page.attribute("data-advance-on-complete") == Some("true");

        Ok(Self {
            instance_id,
            page,
            destinations,
            placed: BTreeSet::new(),
            advance_on_complete,
            context: None,
        })
    }
}
