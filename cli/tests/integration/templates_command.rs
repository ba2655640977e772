//! Integration tests for `afs templates`.

#![allow(clippy::expect_used)]

use predicates::prelude::*;

use crate::cli_tests::afs;

#[test]
fn test_templates_lists_embedded_templates() {
    afs()
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("actor"))
        .stdout(predicate::str::contains("basic"))
        .stdout(predicate::str::contains("arithmetic sample methods"));
}

#[test]
fn test_templates_json_is_sorted_array() {
    let output = afs()
        .args(["templates", "--json"])
        .output()
        .expect("spawn afs");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    let names: Vec<&str> = value
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(names, vec!["actor", "basic"]);
    assert!(value[0]["files"]
        .as_array()
        .expect("files")
        .iter()
        .any(|f| f == "server.py"));
}
