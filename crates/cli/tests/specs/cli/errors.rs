// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error reporting specs
//!
//! Verify failures exit non-zero with a readable message.

use crate::prelude::*;

#[test]
fn missing_inventory_is_reported() {
    let temp = Project::empty();

    temp.filer()
        .args(&["targets"])
        .fails()
        .stderr_has("failed to load inventory from filer.yaml");
}

#[test]
fn inventory_without_address_is_rejected() {
    let temp = Project::with_inventory("targets:\n  c1:\n    username: admin\n");

    temp.filer()
        .args(&["targets"])
        .fails()
        .stderr_has("missing required field 'addr'");
}

#[test]
fn call_on_unknown_cluster_fails() {
    let temp = Project::with_inventory(TWO_CLUSTERS);

    temp.filer()
        .args(&["call", "list_volumes", "--args", r#"{"cluster_name":"nope"}"#])
        .fails()
        .stderr_has("error: cluster nope not found");
}

#[test]
fn call_with_invalid_json_fails() {
    let temp = Project::with_inventory(TWO_CLUSTERS);

    temp.filer()
        .args(&["call", "list_volumes", "--args", "{not json"])
        .fails()
        .stderr_has("--args is not valid JSON");
}

#[test]
fn validation_errors_exit_non_zero() {
    let temp = Project::with_inventory(TWO_CLUSTERS);

    temp.filer()
        .args(&[
            "call",
            "create_volume",
            "--args",
            r#"{"cluster_name":"alpha","volume_name":"vol1"}"#,
        ])
        .fails()
        .stderr_has("error: SVM name is required");
}

#[test]
fn unknown_subcommand_fails() {
    let temp = Project::empty();

    temp.filer().args(&["frobnicate"]).fails();
}
