//! Integration tests for the `check` command.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p elemguide-cli --test check_command
//! ```

use elemguide_cli::commands::check::{build_report, run, CheckOptions, CheckStatus, OutputFormat};
use elemguide_cli::commands::{exit_code, SETUP_ERROR_EXIT};
use elemguide_lint::{Outcome, TextOptions};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

const CLEAN_BUTTON: &str = r#"{
  "tagName": "org-button",
  "attributes": [
    { "name": "disabled", "type": "boolean" },
    { "name": "variant", "type": "string" }
  ],
  "events": ["org-press"],
  "slots": ["icon", "label"]
}"#;

const MANIFEST: &str = r#"{
  "schemaVersion": "2.1.0",
  "modules": [
    {
      "kind": "javascript-module",
      "path": "src/dialog.js",
      "declarations": [
        {
          "kind": "class",
          "name": "OrgDialog",
          "customElement": true,
          "tagName": "org-dialog",
          "attributes": [{ "name": "title", "type": { "text": "string" } }],
          "members": [
            { "kind": "field", "name": "open", "type": { "text": "boolean" } },
            { "kind": "method", "name": "show", "parameters": [] }
          ],
          "events": [{ "name": "close" }],
          "slots": [{ "name": "" }, { "name": "footer" }]
        }
      ]
    }
  ]
}"#;

#[test]
fn test_clean_definitions_pass() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "button.element.json", CLEAN_BUTTON);

    let (report, status) = build_report(tmp.path(), &CheckOptions::default()).unwrap();
    assert_eq!(status, CheckStatus::Passed);
    assert!(report.ok);
    assert_eq!(report.summary.components, 1);
    assert_eq!(report.summary.fail_count, 0);
    assert_eq!(report.summary.warn_count, 0);
}

#[test]
fn test_manifest_failures_fail_the_run() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "custom-elements.json", MANIFEST);

    let (report, status) = build_report(tmp.path(), &CheckOptions::default()).unwrap();
    assert_eq!(status, CheckStatus::Failed);

    let dialog = &report.components[0];
    assert_eq!(dialog.component, "org-dialog");
    let outcomes: Vec<(&str, Outcome)> = dialog
        .results
        .iter()
        .filter(|r| r.outcome != Outcome::Pass)
        .map(|r| (r.rule_id.as_str(), r.outcome))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("slots/named-when-multiple", Outcome::Fail),
            ("api/reserved-member", Outcome::Warn),
            ("events/prefixed-name", Outcome::Warn),
        ]
    );
    assert_eq!(report.failures().count(), 1);
}

#[test]
fn test_warnings_pass_unless_strict() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "input.element.json",
        r#"{ "tagName": "org-input", "attributes": [{ "name": "title", "type": "string" }] }"#,
    );

    let (_, status) = build_report(tmp.path(), &CheckOptions::default()).unwrap();
    assert_eq!(status, CheckStatus::Passed);

    let strict = CheckOptions {
        strict: true,
        ..CheckOptions::default()
    };
    let (_, status) = build_report(tmp.path(), &strict).unwrap();
    assert_eq!(status, CheckStatus::Failed);
}

#[test]
fn test_malformed_definition_fails_but_others_are_checked() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a/button.element.json", CLEAN_BUTTON);
    write(tmp.path(), "b/legacy.element.yaml", "tagName: legacybutton\n");

    let (report, status) = build_report(tmp.path(), &CheckOptions::default()).unwrap();
    assert_eq!(status, CheckStatus::Failed);
    assert_eq!(report.summary.components, 1);
    assert_eq!(report.malformed.len(), 1);
    assert_eq!(report.malformed[0].component, "legacybutton");
}

#[test]
fn test_config_file_in_scan_root_is_applied() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "menu.element.json",
        r#"{ "tagName": "ui-menu", "events": ["acme-select"], "attributes": [{ "name": "title", "type": "string" }] }"#,
    );

    let (report, _) = build_report(tmp.path(), &CheckOptions::default()).unwrap();
    assert_eq!(report.summary.warn_count, 2);

    write(
        tmp.path(),
        "elemguide.json",
        r#"{ "prefix": "acme", "allowReserved": ["title"] }"#,
    );
    let (report, status) = build_report(tmp.path(), &CheckOptions::default()).unwrap();
    assert_eq!(status, CheckStatus::Passed);
    assert_eq!(report.summary.warn_count, 0);
}

#[test]
fn test_cli_overrides_select_rules() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "button.element.json", CLEAN_BUTTON);

    let options = CheckOptions {
        only_rules: Some("tag/hyphenated-name,slots/unique-names".to_string()),
        ..CheckOptions::default()
    };
    let (report, _) = build_report(tmp.path(), &options).unwrap();
    let ids: Vec<&str> = report.components[0]
        .results
        .iter()
        .map(|r| r.rule_id.as_str())
        .collect();
    assert_eq!(ids, vec!["tag/hyphenated-name", "slots/unique-names"]);
}

#[test]
fn test_unknown_rule_id_is_a_setup_error() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "button.element.json", CLEAN_BUTTON);

    let options = CheckOptions {
        disable_rules: vec!["tag/nope".to_string()],
        ..CheckOptions::default()
    };
    assert!(build_report(tmp.path(), &options).is_err());
}

#[test]
fn test_missing_path_is_an_error() {
    let tmp = TempDir::new().unwrap();
    assert!(build_report(&tmp.path().join("missing"), &CheckOptions::default()).is_err());
}

#[test]
fn test_tag_defined_twice_is_reported_once_as_malformed() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "a.element.json",
        r#"[{"tagName":"org-a"},{"tagName":"org-a","slots":["x",""]}]"#,
    );

    let (report, status) = build_report(tmp.path(), &CheckOptions::default()).unwrap();
    assert_eq!(status, CheckStatus::Failed);
    assert_eq!(report.summary.components, 1);
    assert_eq!(report.components.len(), 1);
    assert!(report.components[0]
        .results
        .iter()
        .all(|r| r.outcome == Outcome::Pass));
    assert_eq!(report.malformed.len(), 1);
    assert_eq!(report.malformed[0].component, "org-a");
    assert!(report.malformed[0].reason.starts_with("tag is already defined in"));
}

#[test]
fn test_run_setup_error_maps_to_exit_code_two() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing");

    let result = run(
        &missing.to_string_lossy(),
        &CheckOptions::default(),
        OutputFormat::Json,
        TextOptions::default(),
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Path not found"));

    let code = exit_code(run(
        &missing.to_string_lossy(),
        &CheckOptions::default(),
        OutputFormat::Text,
        TextOptions::default(),
    ));
    assert_eq!(code, ExitCode::from(SETUP_ERROR_EXIT));
}
