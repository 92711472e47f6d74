//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Merge Semantics:
//! - Defaults → Global: REPLACE (global defines the real baseline)
//! - Global → Project: UNION with negation support
//! - Any → Env vars: REPLACE (explicit user override)
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test project config merging with defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use recipe_lint::application::ApplicationError;
use recipe_lint::config::{project_config_path, Settings};

#[test]
fn given_project_config_with_classes_when_load_then_unions_with_defaults() {
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join(".recipe-lint.toml"),
        "admonition_classes = [\"callout\"]\n",
    )
    .unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    for class in ["note", "warning", "notecard", "callout"] {
        assert!(
            settings.admonition_classes.contains(&class.to_string()),
            "should contain {}",
            class
        );
    }
    assert_eq!(settings.admonition_classes.len(), 4);
}

#[test]
fn given_project_config_with_negation_when_load_then_removes_negated_item() {
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join(".recipe-lint.toml"),
        "admonition_classes = [\"!notecard\"]\n",
    )
    .unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert!(!settings.admonition_classes.contains(&"notecard".to_string()));
    assert_eq!(settings.admonition_classes.len(), 2);
}

#[test]
fn given_project_config_with_scalars_when_load_then_overrides_defaults() {
    let project = TempDir::new().unwrap();
    let config = r#"
content_dir = "files/en-us"
document_file_name = "index.md"
interactive_example_macro = "InteractiveExample"
"#;
    fs::write(project.path().join(".recipe-lint.toml"), config).unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert_eq!(settings.content_dir, PathBuf::from("files/en-us"));
    assert_eq!(settings.document_file_name, "index.md");
    assert_eq!(settings.interactive_example_macro, "InteractiveExample");
    // untouched
    assert_eq!(settings.recipes_dir, PathBuf::from("recipes"));
}

#[test]
fn given_no_project_config_when_load_then_defaults_apply() {
    let project = TempDir::new().unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert_eq!(settings.document_file_name, "docs.md");
    assert_eq!(settings.recipes_dir, PathBuf::from("recipes"));
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(project.path().join(".recipe-lint.toml"), "content_dir = [").unwrap();

    let result = Settings::load(Some(project.path()));

    match result {
        Err(ApplicationError::Config { message }) => assert!(message.contains(".recipe-lint.toml")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn given_project_dir_when_resolving_config_path_then_dotfile_in_project() {
    let path = project_config_path(std::path::Path::new("/srv/mdn"));
    assert_eq!(path, PathBuf::from("/srv/mdn/.recipe-lint.toml"));
}
