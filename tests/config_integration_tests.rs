//! Integration tests for config loading from fixture files.
//!
//! These tests verify that the sample config file has the expected structure.

use std::fs;
use std::path::Path;

use lab_sort::labs::UnparsedPolicy;

/// Read the sample config file content.
fn read_sample_config() -> String {
    let config_path = Path::new("tests/fixtures/sample_config.toml");
    fs::read_to_string(config_path).expect("Failed to read sample config file")
}

#[test]
fn sample_config_file_exists() {
    let config_path = Path::new("tests/fixtures/sample_config.toml");
    assert!(config_path.exists(), "Sample config file should exist");
}

#[test]
fn sample_config_is_valid_toml() {
    let config_content = read_sample_config();
    let result: Result<toml::Value, _> = toml::from_str(&config_content);
    assert!(result.is_ok(), "Sample config should be valid TOML: {:?}", result.err());
}

#[test]
fn lab_sort_section_has_expected_structure() {
    let config_content = read_sample_config();
    let value: toml::Value = toml::from_str(&config_content).expect("should parse");

    let section = value.get("lab_sort").expect("should have lab_sort section");

    for key in [
        "source",
        "dest",
        "temp",
        "delay_ms",
        "unparsed",
        "unparsed_dir",
        "auto",
        "debug",
        "dryrun",
        "log",
        "verbose",
    ] {
        assert!(section.get(key).is_some(), "lab_sort section should have {key}");
    }
}

#[test]
fn lab_sort_section_values_have_correct_types() {
    let config_content = read_sample_config();
    let value: toml::Value = toml::from_str(&config_content).expect("should parse");
    let section = value.get("lab_sort").expect("should have lab_sort section");

    assert!(section.get("source").and_then(toml::Value::as_str).is_some());
    assert!(section.get("dest").and_then(toml::Value::as_str).is_some());
    assert!(section.get("delay_ms").and_then(toml::Value::as_integer).is_some());
    assert!(section.get("log").and_then(toml::Value::as_bool).is_some());
}

#[test]
fn unparsed_policy_value_is_known() {
    #[derive(serde::Deserialize)]
    struct Section {
        unparsed: UnparsedPolicy,
    }
    #[derive(serde::Deserialize)]
    struct Wrapper {
        lab_sort: Section,
    }

    let config_content = read_sample_config();
    let wrapper: Wrapper = toml::from_str(&config_content).expect("should parse");
    assert_eq!(wrapper.lab_sort.unparsed, UnparsedPolicy::Bucket);
}
