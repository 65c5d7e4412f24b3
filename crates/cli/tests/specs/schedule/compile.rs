// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule compilation specs
//!
//! Verify cron expressions compile to per-field lists without a config.

use crate::prelude::*;

fn compile(expr: &str) -> serde_json::Value {
    let temp = Project::empty();
    let out = temp.filer().args(&["schedule", expr]).passes();
    serde_json::from_str(&out.stdout).unwrap()
}

#[test]
fn single_minute() {
    let json = compile("5 * * * *");
    assert_eq!(json["minutes"], serde_json::json!([5]));
    assert_eq!(json["hours"], serde_json::json!([]));
}

#[test]
fn lists_and_ranges() {
    let json = compile("0 1,2 11 1-3 *");
    assert_eq!(json["minutes"], serde_json::json!([0]));
    assert_eq!(json["hours"], serde_json::json!([1, 2]));
    assert_eq!(json["days"], serde_json::json!([11]));
    assert_eq!(json["months"], serde_json::json!([1, 2, 3]));
}

#[test]
fn out_of_range_hour_is_clamped() {
    let json = compile("0 99 * * *");
    assert_eq!(json["hours"], serde_json::json!([23]));
}

#[test]
fn name_flag_names_the_schedule() {
    let temp = Project::empty();
    temp.filer()
        .args(&["schedule", "5 * * * *", "--name", "nightly"])
        .passes()
        .stdout_has("\"nightly\"");
}

#[test]
fn step_syntax_is_rejected() {
    let temp = Project::empty();

    temp.filer()
        .args(&["schedule", "*/5 * * * *"])
        .fails()
        .stderr_has("wrong cron format */5 detected");
}
