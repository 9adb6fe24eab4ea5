use book_player_core::{
    ActivityDefinition, Direction, DragToDestinationActivity, InputDisposition, NavKey,
    PageElement, PageInput, PlayerEvent, SimpleChoiceActivity,
};
use book_player_tests::PlayerWorld;
use cucumber::{given, then, when};

fn choice(id: &str, correct: bool) -> PageElement {
    let element = PageElement::new().with_id(id).with_class("activity-choice");
    if correct {
        element.with_class("correct-answer")
    } else {
        element
    }
}

// ===== Given Steps =====

#[given(expr = "page {int} has a choice activity that advances on the correct answer")]
async fn page_has_choice(world: &mut PlayerWorld, index: usize) {
    world.page_mut(index).element = PageElement::new()
        .with_activity(SimpleChoiceActivity::ID)
        .with_attribute("data-advance-on-correct", "true")
        .with_child(choice("wrong", false))
        .with_child(choice("right", true));
}

#[given(expr = "page {int} has a choice activity without a correct answer")]
async fn page_has_broken_choice(world: &mut PlayerWorld, index: usize) {
    world.page_mut(index).element = PageElement::new()
        .with_activity(SimpleChoiceActivity::ID)
        .with_child(choice("wrong", false));
}

#[given(expr = "page {int} has a drag activity")]
async fn page_has_drag(world: &mut PlayerWorld, index: usize) {
    world.page_mut(index).element = PageElement::new()
        .with_activity(DragToDestinationActivity::ID)
        .with_child(
            PageElement::new()
                .with_id("apple")
                .with_class("drag-item")
                .with_attribute("data-target", "basket"),
        )
        .with_child(PageElement::new().with_id("basket").with_class("drop-target"));
}

// ===== When Steps =====

#[when(expr = "the reader clicks {string}")]
async fn reader_clicks(world: &mut PlayerWorld, target: String) {
    world.send_input(PageInput::Click { target });
}

#[when(expr = "the reader drags {string} onto {string}")]
async fn reader_drags(world: &mut PlayerWorld, source: String, target: String) {
    world.send_input(PageInput::Drag { source, target });
}

#[when("the reader swipes forward")]
async fn reader_swipes_forward(world: &mut PlayerWorld) {
    world.send_input(PageInput::Swipe {
        direction: Direction::Forward,
    });
}

#[when("the reader presses the right arrow")]
async fn reader_presses_right(world: &mut PlayerWorld) {
    world.send_input(PageInput::Key {
        key: NavKey::ArrowRight,
    });
}

// ===== Then Steps =====

#[then(expr = "the activity {string} is live")]
async fn activity_is_live(world: &mut PlayerWorld, activity: String) {
    assert_eq!(
        world.player().host().current_activity_id(),
        Some(activity.as_str())
    );
}

#[then("no activity is live")]
async fn no_activity_live(world: &mut PlayerWorld) {
    assert!(!world.player().host().is_active());
}

#[then(expr = "{int} activities have been started")]
async fn activities_started(world: &mut PlayerWorld, expected: usize) {
    let started = world.count_events(|e| matches!(e, PlayerEvent::ActivityStarted { .. }));
    assert_eq!(started, expected);
}

#[then(expr = "{int} activities have been stopped")]
async fn activities_stopped(world: &mut PlayerWorld, expected: usize) {
    let stopped = world.count_events(|e| matches!(e, PlayerEvent::ActivityStopped { .. }));
    assert_eq!(stopped, expected);
}

#[then(expr = "the current page is {int}")]
async fn current_page_is(world: &mut PlayerWorld, expected: usize) {
    assert_eq!(world.player().current_page(), Some(expected));
}

#[then("the navigation buttons are hidden")]
async fn navigation_hidden(world: &mut PlayerWorld) {
    assert!(world.player().input_policy().hide_navigation);
}

#[then("the navigation buttons are shown")]
async fn navigation_shown(world: &mut PlayerWorld) {
    assert!(!world.player().input_policy().hide_navigation);
}

#[then("the input was left unhandled")]
async fn input_unhandled(world: &mut PlayerWorld) {
    assert_eq!(world.last_disposition, Some(InputDisposition::Unhandled));
}

#[then("the input was taken by the activity")]
async fn input_taken(world: &mut PlayerWorld) {
    assert_eq!(world.last_disposition, Some(InputDisposition::Activity));
}

#[then(expr = "a mount failure is reported for page {int}")]
async fn mount_failure_reported(world: &mut PlayerWorld, page: usize) {
    let failures = world.count_events(
        |e| matches!(e, PlayerEvent::ActivityMountFailed { index, .. } if *index == page),
    );
    assert_eq!(failures, 1);
}
