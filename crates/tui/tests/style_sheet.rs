use std::io::Write;
use std::time::Duration;

use ratatui::style::Color;
use stepline_tui::{ProgressBarConfig, RawStep, STYLE_PATH_ENV, StyleError, StyleSheet};

fn load_fixture() -> StyleSheet {
    let raw = include_str!("data/styles_ok.json");
    StyleSheet::from_json_str(raw).expect("load stylesheet from fixture")
}

fn fixture_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp stylesheet");
    file.write_all(include_str!("data/styles_ok.json").as_bytes())
        .expect("write temp stylesheet");
    file
}

#[test]
fn reads_a_complete_progress_config() {
    let sheet = load_fixture();
    let config = ProgressBarConfig::from_styles(&sheet).expect("all attributes present");
    assert_eq!(config.active_tint, Color::Rgb(0xFF, 0xB8, 0x6C));
    assert_eq!(config.inactive_tint, Color::Rgb(0x62, 0x72, 0xA4));
    assert_eq!(config.animation, Duration::from_millis(250));
}

#[test]
fn reads_a_sheet_from_disk() {
    let file = fixture_file();
    let sheet = StyleSheet::from_path(file.path()).expect("load stylesheet from disk");
    let config = ProgressBarConfig::from_styles(&sheet).expect("all attributes present");
    assert_eq!(config.animation, Duration::from_millis(250));
}

#[test]
fn environment_override_takes_precedence() {
    let file = fixture_file();
    temp_env::with_var(STYLE_PATH_ENV, Some(file.path()), || {
        let sheet = StyleSheet::load();
        let config = ProgressBarConfig::from_styles(&sheet).expect("override sheet is complete");
        assert_eq!(config.animation, Duration::from_millis(250));
    });
}

#[test]
fn unreadable_override_falls_back_to_the_embedded_sheet() {
    temp_env::with_var(STYLE_PATH_ENV, Some("/nonexistent/stepline.json"), || {
        let sheet = StyleSheet::load();
        let config = ProgressBarConfig::from_styles(&sheet).expect("embedded sheet is complete");
        assert_eq!(config.animation, Duration::from_millis(400));
    });
}

#[test]
fn broken_files_report_a_document_error() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp stylesheet");
    file.write_all(b"{ not json").expect("write temp stylesheet");
    let err = StyleSheet::from_path(file.path()).expect_err("malformed document");
    assert!(matches!(err, StyleError::Document(_)), "got {err}");
}

#[test]
fn each_required_attribute_fails_construction_on_its_own() {
    for key in ["active_tint", "inactive_tint", "duration"] {
        let mut section = serde_json::json!({
            "active_tint": "#50FA7B",
            "inactive_tint": "#44475A",
            "duration": 500
        });
        section.as_object_mut().expect("object").remove(key);
        let doc = serde_json::json!({ "step_progress": section });
        let sheet = StyleSheet::from_json_str(&doc.to_string()).expect("well-formed json");

        let err = ProgressBarConfig::from_styles(&sheet).expect_err("attribute is required");
        assert!(
            matches!(&err, StyleError::MissingAttribute { key: k, .. } if k == key),
            "unexpected error for {key}: {err}"
        );
    }
}

#[test]
fn step_lists_deserialize_into_descriptors() {
    #[derive(serde::Deserialize)]
    struct DemoSection {
        steps: Vec<RawStep>,
    }

    let sheet = load_fixture();
    let section = sheet
        .section::<DemoSection>("demo")
        .expect("section is well-formed")
        .expect("section is present");
    assert_eq!(section.steps.len(), 2);

    let first = section.steps[0].to_descriptor().expect("valid colors");
    assert_eq!(first.icon, '○');
    assert_eq!(first.active_tint, Color::Rgb(0x8B, 0xE9, 0xFD));
}
