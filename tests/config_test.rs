//! Integration tests for Settings layered loading.
//!
//! These tests pass config files explicitly, so no user config is involved.
//! The override layer gets an explicit variable map, except in the one test
//! that exercises the real process environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rstest::rstest;
use tempfile::TempDir;

use quiztree::application::ApplicationError;
use quiztree::config::Settings;
use quiztree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn no_vars() -> Vec<(String, String)> {
    Vec::new()
}

// ============================================================
// File layers
// ============================================================

#[test]
fn given_no_files_when_loading_then_defaults() {
    let settings = Settings::load_from_env(None, None, no_vars()).expect("load settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.points_per_correct, 10);
}

#[test]
fn given_global_and_explicit_when_loading_then_explicit_wins_per_field() {
    let dir = TempDir::new().unwrap();
    let global = write(
        &dir,
        "global.toml",
        "points_per_correct = 5\nshow_media = false\n",
    );
    let explicit = write(&dir, "explicit.toml", "points_per_correct = 20\n");

    let settings = Settings::load_from_env(
        Some(global.as_path()),
        Some(explicit.as_path()),
        no_vars(),
    )
    .unwrap();

    assert_eq!(settings.points_per_correct, 20);
    assert!(!settings.show_media, "unspecified field inherited from global");
}

#[test]
fn given_missing_explicit_file_when_loading_then_config_error() {
    let err = Settings::load_from_env(
        None,
        Some(Path::new("/nonexistent/quiztree.toml")),
        no_vars(),
    )
    .unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("config file not found"));
}

#[test]
fn given_unknown_key_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.toml", "point_per_correct = 3\n");

    let err = Settings::load_from_env(None, Some(path.as_path()), no_vars()).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_feed_with_tilde_when_loading_then_expands_home() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "feed.toml", "feed = \"~/quiz/albums.toml\"\n");

    let settings = Settings::load_from_env(None, Some(path.as_path()), no_vars()).unwrap();
    let feed = settings.feed.unwrap();

    assert!(!feed.to_string_lossy().starts_with('~'));
    assert!(feed.ends_with("quiz/albums.toml"));
}

#[test]
fn given_settings_when_rendering_toml_then_parses_back() {
    let settings = Settings {
        points_per_correct: 3,
        show_media: false,
        feed: Some(PathBuf::from("/tmp/feed.toml")),
    };
    let rendered = settings.to_toml().unwrap();

    let dir = TempDir::new().unwrap();
    let path = write(&dir, "roundtrip.toml", &rendered);
    assert_eq!(
        Settings::load_from_env(None, Some(path.as_path()), no_vars()).unwrap(),
        settings
    );
}

// ============================================================
// Environment overrides
// ============================================================

#[test]
fn given_env_vars_when_loading_then_override_defaults() {
    let settings = Settings::load_from_env(
        None,
        None,
        vars(&[
            ("QUIZTREE_POINTS_PER_CORRECT", "7"),
            ("QUIZTREE_SHOW_MEDIA", "false"),
            ("QUIZTREE_FEED", "/srv/quiz/feed.toml"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.points_per_correct, 7);
    assert!(!settings.show_media);
    assert_eq!(settings.feed, Some(PathBuf::from("/srv/quiz/feed.toml")));
}

#[test]
fn given_env_vars_and_both_files_when_loading_then_env_wins_over_each() {
    let dir = TempDir::new().unwrap();
    let global = write(&dir, "global.toml", "show_media = true\n");
    let explicit = write(&dir, "explicit.toml", "points_per_correct = 20\n");

    let settings = Settings::load_from_env(
        Some(global.as_path()),
        Some(explicit.as_path()),
        vars(&[
            ("QUIZTREE_POINTS_PER_CORRECT", "3"),
            ("QUIZTREE_SHOW_MEDIA", "false"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.points_per_correct, 3, "env beats explicit file");
    assert!(!settings.show_media, "env beats global file");
}

#[test]
fn given_foreign_prefix_when_loading_then_not_an_override() {
    let settings = Settings::load_from_env(
        None,
        None,
        vars(&[
            ("OTHER_POINTS_PER_CORRECT", "4"),
            ("QUIZTREEPOINTS_PER_CORRECT", "4"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.points_per_correct, 10);
}

#[rstest]
#[case("QUIZTREE_POINTS_PER_CORRECT", "abc")]
#[case("QUIZTREE_SHOW_MEDIA", "maybe")]
fn given_unparsable_env_var_when_loading_then_config_error(
    #[case] name: &str,
    #[case] value: &str,
) {
    let err = Settings::load_from_env(None, None, vars(&[(name, value)])).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("environment override"), "got {}", err);
}

#[test]
fn given_process_env_vars_when_loading_then_applied_and_gone_after_removal() {
    env::set_var("QUIZTREE_POINTS_PER_CORRECT", "7");
    env::set_var("QUIZTREE_SHOW_MEDIA", "false");
    let with_vars = Settings::load_from(None, None);
    env::remove_var("QUIZTREE_POINTS_PER_CORRECT");
    env::remove_var("QUIZTREE_SHOW_MEDIA");

    let with_vars = with_vars.unwrap();
    assert_eq!(with_vars.points_per_correct, 7);
    assert!(!with_vars.show_media);

    let without_vars = Settings::load_from(None, None).unwrap();
    assert_eq!(without_vars, Settings::default());
}
