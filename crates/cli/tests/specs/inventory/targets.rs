// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Target listing specs
//!
//! Verify registered clusters are listed from the inventory.

use crate::prelude::*;

#[test]
fn targets_are_listed_sorted() {
    let temp = Project::with_inventory(TWO_CLUSTERS);

    let out = temp.filer().args(&["targets"]).passes();
    assert_eq!(out.stdout, "alpha\nzeta\n");
}

#[test]
fn targets_as_json() {
    let temp = Project::with_inventory(TWO_CLUSTERS);

    let out = temp.filer().args(&["targets", "--format", "json"]).passes();
    let names: Vec<String> = serde_json::from_str(&out.stdout).unwrap();
    assert_eq!(names, vec!["alpha", "zeta"]);
}

#[test]
fn config_flag_selects_inventory() {
    let temp = Project::empty();
    temp.file("other.yaml", TWO_CLUSTERS);

    temp.filer()
        .args(&["--config", "other.yaml", "targets"])
        .passes()
        .stdout_has("alpha");
}

#[test]
fn registered_clusters_tool_joins_names() {
    let temp = Project::with_inventory(TWO_CLUSTERS);

    temp.filer()
        .args(&["call", "list_registered_clusters"])
        .passes()
        .stdout_has("alpha,zeta");
}
