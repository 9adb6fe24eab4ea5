use book_player_core::MediaKind;
use book_player_tests::PlayerWorld;
use cucumber::{given, then, when};

// ===== Given Steps =====

#[given(expr = "a book with {int} numbered pages")]
async fn book_with_numbered_pages(world: &mut PlayerWorld, count: u32) {
    world.build_book(count);
}

#[given(expr = "page {int} has audio")]
async fn page_has_audio(world: &mut PlayerWorld, index: usize) {
    world.page_mut(index).has_audio = true;
}

#[given(expr = "page {int} has video")]
async fn page_has_video(world: &mut PlayerWorld, index: usize) {
    world.page_mut(index).has_video = true;
}

#[given("returning to the first page does not restart reading")]
async fn reset_disabled(world: &mut PlayerWorld) {
    world.config = world.config.clone().with_reset_on_restart(false);
}

#[given("a fresh interaction")]
async fn fresh_interaction(world: &mut PlayerWorld) {
    world.interaction = Default::default();
}

// ===== When Steps =====

#[when("the reader reads from the first page to the end")]
async fn read_to_end(world: &mut PlayerWorld) {
    loop {
        match world.act(|player| player.next_page()) {
            Ok(true) => continue,
            Ok(false) => break,
            Err(e) => {
                world.last_error = Some(e.to_string());
                break;
            }
        }
    }
}

#[when(expr = "the reader opens page {int}")]
async fn reader_opens_page(world: &mut PlayerWorld, index: usize) {
    world.open_page(index);
}

#[when(expr = "audio plays for {float} seconds")]
async fn audio_plays(world: &mut PlayerWorld, seconds: f64) {
    world.act(|player| player.media_played(MediaKind::Audio, seconds));
}

#[when(expr = "video plays for {float} seconds")]
async fn video_plays(world: &mut PlayerWorld, seconds: f64) {
    world.act(|player| player.media_played(MediaKind::Video, seconds));
}

#[when(expr = "the accumulator records page {int} as shown")]
async fn record_page_shown(world: &mut PlayerWorld, index: usize) {
    world.interaction.page_shown(index);
}

#[when(expr = "the accumulator records page {int} as an audio page")]
async fn record_audio_page(world: &mut PlayerWorld, index: usize) {
    world.interaction.audio_page_shown(index);
}

// ===== Then Steps =====

#[then(expr = "{int} audio pages are reported")]
async fn audio_pages_reported(world: &mut PlayerWorld, expected: usize) {
    assert_eq!(world.player().progress_report().audio_pages, expected);
}

#[then(expr = "{int} non-audio pages are reported")]
async fn non_audio_pages_reported(world: &mut PlayerWorld, expected: i64) {
    assert_eq!(world.player().progress_report().non_audio_pages, expected);
}

#[then(expr = "{int} video pages are reported")]
async fn video_pages_reported(world: &mut PlayerWorld, expected: usize) {
    assert_eq!(world.player().progress_report().video_pages, expected);
}

#[then(expr = "the audio duration is {float} seconds")]
async fn audio_duration_is(world: &mut PlayerWorld, expected: f64) {
    assert_eq!(world.player().progress_report().audio_duration, expected);
}

#[then("the last numbered page is reported as read")]
async fn last_page_read(world: &mut PlayerWorld) {
    assert!(world.player().progress_report().last_numbered_page_read);
}

#[then("the last numbered page is not reported as read")]
async fn last_page_not_read(world: &mut PlayerWorld) {
    assert!(!world.player().progress_report().last_numbered_page_read);
}

#[then(expr = "the accumulator reports {int} non-audio pages")]
async fn accumulator_non_audio(world: &mut PlayerWorld, expected: i64) {
    let report = world.interaction.progress_report_properties_for_analytics();
    assert_eq!(report.non_audio_pages, expected);
}

#[then(expr = "the analytics report contains the field {string}")]
async fn report_has_field(world: &mut PlayerWorld, field: String) {
    let report = world.interaction.progress_report_properties_for_analytics();
    let json = serde_json::to_value(report).expect("report serializes");
    assert!(
        json.get(&field).is_some(),
        "field {} missing from {}",
        field,
        json
    );
}
