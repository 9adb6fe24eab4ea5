use book_player_cli::{CliError, ReplayScript};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_script(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const CHOICE_BOOK: &str = r#"{
    "book": { "pages": [
        { "kind": "front_matter", "element": {} },
        { "kind": { "numbered": 1 }, "element": {
            "attributes": {
                "data-activity": "simple-dom-choice",
                "data-advance-on-correct": "true"
            },
            "children": [
                { "id": "no", "classes": ["activity-choice"] },
                { "id": "yes", "classes": ["activity-choice", "correct-answer"] }
            ]
        } },
        { "kind": { "numbered": 2 }, "element": {}, "has_video": true },
        { "kind": "back_matter", "element": {} }
    ] },
    "commands": [
        { "command": "show_page", "index": 1 },
        { "command": "input", "input": { "type": "click", "target": "yes" } },
        { "command": "media_played", "kind": "video", "seconds": 12.0 }
    ]
}"#;

#[test]
fn test_replay_from_file() {
    let file = write_script(CHOICE_BOOK);

    let outcome = ReplayScript::from_file(file.path()).unwrap().run().unwrap();

    assert_eq!(outcome.report.non_audio_pages, 2);
    assert_eq!(outcome.report.video_pages, 1);
    assert_eq!(outcome.report.video_duration, 12.0);
    assert!(outcome.report.last_numbered_page_read);
}

#[test]
fn test_replay_events_serialize() {
    let file = write_script(CHOICE_BOOK);
    let outcome = ReplayScript::from_file(file.path()).unwrap().run().unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    let kinds: Vec<&str> = json["events"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|event| event["type"].as_str())
        .collect();

    assert!(kinds.contains(&"ActivityStarted"));
    assert!(kinds.contains(&"NavigationRequested"));
    assert!(kinds.contains(&"ActivityStopped"));
    assert_eq!(json["report"]["videoPages"], 1);
}

#[test]
fn test_missing_script() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    assert!(matches!(
        ReplayScript::from_file(&path),
        Err(CliError::ScriptNotFound { .. })
    ));
}

#[test]
fn test_malformed_script() {
    let file = write_script("{ \"book\": 3 }");

    assert!(matches!(
        ReplayScript::from_file(file.path()),
        Err(CliError::Json(_))
    ));
}
