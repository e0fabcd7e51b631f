//! Loading question feeds from disk

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use quiztree::application::{build_store, load_feed, load_feed_or_builtin, ApplicationError};
use quiztree::domain::{Choice, DomainError};
use quiztree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const TWO_QUESTIONS: &str = r#"
[[questions]]
question = "Trilogy (2012)"
img = "img/trilogy.png"
a = "Frank Ocean"
b = "Chris Brown"
c = "The Weeknd"
d = "Drake"
answer = "C"

[[questions]]
question = "Blond (2016)"
a = "The Weeknd"
b = "Frank Ocean"
c = "Steve Lacy"
d = "Tyler, The Creator"
answer = "B"
"#;

#[test]
fn given_feed_file_when_loading_then_reads_all_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("feed.toml");
    fs::write(&path, TWO_QUESTIONS).unwrap();

    let questions = load_feed(&path).unwrap();

    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].img.as_deref(), Some("img/trilogy.png"));
    assert_eq!(questions[0].answer, Choice::C);
    assert_eq!(questions[1].img, None);
    assert_eq!(questions[1].choice_text(Choice::D), "Tyler, The Creator");
}

#[test]
fn given_feed_file_when_building_store_then_sorted_by_question() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("feed.toml");
    fs::write(&path, TWO_QUESTIONS).unwrap();

    let store = build_store(load_feed_or_builtin(Some(path.as_path())).unwrap()).unwrap();
    assert_eq!(
        store.keys().collect::<Vec<_>>(),
        ["Blond (2016)", "Trilogy (2012)"]
    );
}

#[test]
fn given_missing_file_when_loading_then_operation_failed_with_path() {
    let err = load_feed(Path::new("/nonexistent/quiz.toml")).unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("/nonexistent/quiz.toml"));
}

#[test]
fn given_malformed_toml_when_loading_then_feed_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[questions]\nquestion = ").unwrap();

    let err = load_feed(&path).unwrap_err();
    assert!(matches!(err, ApplicationError::Feed { .. }));
}

#[test]
fn given_record_without_question_when_building_store_then_invalid_entry() {
    let content = r#"
[[questions]]
question = "Blond (2016)"
a = "1"
b = "2"
c = "3"
d = "4"
answer = "B"

[[questions]]
a = "1"
b = "2"
c = "3"
d = "4"
answer = "A"
"#;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("feed.toml");
    fs::write(&path, content).unwrap();

    let questions = load_feed(&path).unwrap();
    let err = build_store(questions).unwrap_err();

    match err {
        ApplicationError::Domain(DomainError::InvalidEntry { reason }) => {
            assert!(reason.starts_with("record 2"), "got {}", reason)
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn given_no_path_when_loading_then_builtin_feed() {
    let questions = load_feed_or_builtin(None).unwrap();
    assert_eq!(questions.len(), 10);
}
