use crate::application::ActivityContext;
use crate::domain::{
    ActivityInstanceId, ActivityRequirements, InputOutcome, ListenerKind, PageElement, PageInput,
};
use crate::traits::{Activity, ActivityDefinition, ActivityError, ActivityMountError};

const CHOICE_CLASS: &str = "activity-choice";
const CORRECT_CLASS: &str = "correct-answer";

/// Multiple choice on plain page markup
///
/// Every `.activity-choice` element is clickable; exactly one of them is
/// also `.correct-answer`. With `data-advance-on-correct="true"` on the page
/// a correct answer turns to the next page.
pub struct SimpleChoiceActivity {
    instance_id: ActivityInstanceId,
    page: PageElement,
    choice_ids: Vec<String>,
    correct_id: String,
    advance_on_correct: bool,
    context: Option<ActivityContext>,
    answered: bool,
}

impl SimpleChoiceActivity {
    pub fn answered(&self) -> bool {
        self.answered
    }

    fn choose(&mut self, target: &str) {
        let correct = target == self.correct_id;
        if let Some(element) = self.page.find_by_id_mut(target) {
            element.add_class(if correct {
                "chosen-correct"
            } else {
                "chosen-wrong"
            });
        }

        if !correct {
            tracing::debug!("Wrong choice {} on {}", target, self.instance_id);
            return;
        }

        self.answered = true;
        if self.advance_on_correct {
            if let Some(context) = &self.context {
                context.navigate_to_next_page();
            }
        }
    }
}

impl Activity for SimpleChoiceActivity {
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
        if self.context.is_some() {
            return Err(ActivityError::InvalidState("already started".to_string()));
        }

        for id in &self.choice_ids {
            if let Some(element) = self.page.find_by_id_mut(id) {
                element.attach_listener(ListenerKind::Click, self.instance_id);
            }
        }
        self.context = Some(context);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ActivityError> {
        let removed = self.page.detach_listeners_for(self.instance_id);
        tracing::trace!("Detached {} click listeners", removed);
        self.context = None;
        Ok(())
    }

    fn handle_input(&mut self, input: &PageInput) -> InputOutcome {
        match input {
            PageInput::Click { target } if self.choice_ids.contains(target) => {
                self.choose(target);
                InputOutcome::Consumed
            }
            _ => InputOutcome::Ignored,
        }
    }

    fn page(&self) -> &PageElement {
        &self.page
    }
}

impl ActivityDefinition for SimpleChoiceActivity {
    const ID: &'static str = "simple-dom-choice";

    fn activity_requirements() -> ActivityRequirements {
        ActivityRequirements::NONE.clicking()
    }

    fn construct(
        page: PageElement,
        instance_id: ActivityInstanceId,
    ) -> Result<Self, ActivityMountError> {
        let choices = page.find_all_by_class(CHOICE_CLASS);
        if choices.is_empty() {
            return Err(ActivityMountError::missing(Self::ID, ".activity-choice"));
        }

        let mut choice_ids = Vec::with_capacity(choices.len());
        let mut correct_ids = Vec::new();
        for choice in choices {
            let id = choice.id.clone().ok_or_else(|| ActivityMountError::InvalidPage {
                activity: Self::ID,
                reason: "every choice needs an id".to_string(),
            })?;
            if choice.has_class(CORRECT_CLASS) {
                correct_ids.push(id.clone());
            }
            choice_ids.push(id);
        }

        let correct_id = match correct_ids.as_slice() {
            [] => return Err(ActivityMountError::missing(Self::ID, ".correct-answer")),
            [only] => only.clone(),
            _ => {
                return Err(ActivityMountError::InvalidPage {
                    activity: Self::ID,
                    reason: format!("{} choices marked correct", correct_ids.len()),
                })
            }
        };

        let advance_on_correct = page.attribute("data-advance-on-correct") == Some("true");

        Ok(Self {
            instance_id,
            page,
            choice_ids,
            correct_id,
            advance_on_correct,
            context: None,
            answered: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::NavigationQueue;
    use crate::domain::Direction;
    use std::sync::Arc;
    use uuid::Uuid;

    fn page() -> PageElement {
        PageElement::new()
            .with_activity(SimpleChoiceActivity::ID)
            .with_attribute("data-advance-on-correct", "true")
            .with_child(PageElement::new().with_id("red").with_class("activity-choice"))
            .with_child(
                PageElement::new()
                    .with_id("blue")
                    .with_class("activity-choice")
                    .with_class("correct-answer"),
            )
    }

    fn started(page: PageElement) -> (SimpleChoiceActivity, Arc<NavigationQueue>) {
        let queue = Arc::new(NavigationQueue::new(4));
        let mut activity = SimpleChoiceActivity::construct(page, Uuid::new_v4()).unwrap();
        let (context, _severer) = ActivityContext::bind(activity.instance_id(), queue.clone());
        activity.start(context).unwrap();
        (activity, queue)
    }

    fn click(target: &str) -> PageInput {
        PageInput::Click {
            target: target.to_string(),
        }
    }

    #[test]
    fn test_mount_requires_choices() {
        let result = SimpleChoiceActivity::construct(PageElement::new(), Uuid::new_v4());

        assert!(matches!(
            result,
            Err(ActivityMountError::MissingElement { selector, .. })
                if selector == ".activity-choice"
        ));
    }

    #[test]
    fn test_mount_requires_exactly_one_correct() {
        let none = PageElement::new()
            .with_child(PageElement::new().with_id("a").with_class("activity-choice"));
        assert!(matches!(
            SimpleChoiceActivity::construct(none, Uuid::new_v4()),
            Err(ActivityMountError::MissingElement { .. })
        ));

        let two = PageElement::new()
            .with_child(
                PageElement::new()
                    .with_id("a")
                    .with_class("activity-choice")
                    .with_class("correct-answer"),
            )
            .with_child(
                PageElement::new()
                    .with_id("b")
                    .with_class("activity-choice")
                    .with_class("correct-answer"),
            );
        assert!(matches!(
            SimpleChoiceActivity::construct(two, Uuid::new_v4()),
            Err(ActivityMountError::InvalidPage { .. })
        ));
    }

    #[test]
    fn test_choices_need_ids() {
        let page = PageElement::new().with_child(
            PageElement::new()
                .with_class("activity-choice")
                .with_class("correct-answer"),
        );

        assert!(matches!(
            SimpleChoiceActivity::construct(page, Uuid::new_v4()),
            Err(ActivityMountError::InvalidPage { .. })
        ));
    }

    #[test]
    fn test_start_attaches_and_stop_detaches() {
        let (mut activity, _queue) = started(page());
        assert_eq!(activity.page().listener_count(), 2);

        activity.stop().unwrap();

        assert_eq!(activity.page().listener_count(), 0);
    }

    #[test]
    fn test_double_start_rejected() {
        let (mut activity, queue) = started(page());
        let (context, _severer) = ActivityContext::bind(activity.instance_id(), queue);

        assert!(matches!(
            activity.start(context),
            Err(ActivityError::InvalidState(_))
        ));
    }

    #[test]
    fn test_wrong_then_right_choice() {
        let (mut activity, queue) = started(page());

        assert_eq!(activity.handle_input(&click("red")), InputOutcome::Consumed);
        assert!(!activity.answered());
        assert!(queue.is_empty());

        assert_eq!(activity.handle_input(&click("blue")), InputOutcome::Consumed);
        assert!(activity.answered());
        assert_eq!(queue.drain(), vec![Direction::Forward]);

        let page = activity.page();
        assert!(page.find_by_id("red").unwrap().has_class("chosen-wrong"));
        assert!(page.find_by_id("blue").unwrap().has_class("chosen-correct"));
    }

    #[test]
    fn test_no_advance_without_attribute() {
        let mut plain = page();
        plain.attributes.remove("data-advance-on-correct");
        let (mut activity, queue) = started(plain);

        activity.handle_input(&click("blue"));

        assert!(activity.answered());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_unrelated_input_ignored() {
        let (mut activity, _queue) = started(page());

        assert_eq!(activity.handle_input(&click("title")), InputOutcome::Ignored);
        assert_eq!(
            activity.handle_input(&PageInput::Text {
                text: "blue".to_string()
            }),
            InputOutcome::Ignored
        );
    }
}
