// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool listing specs
//!
//! Verify the tool catalogue and read-only filtering.

use crate::prelude::*;

#[test]
fn tools_lists_mutations_by_default() {
    let temp = Project::empty();

    temp.filer()
        .args(&["tools"])
        .passes()
        .stdout_has("list_volumes")
        .stdout_has("create_volume")
        .stdout_has("update_qos_policy")
        .stdout_has("create_schedule")
        .stdout_has("create_nfs_export_policies_rules")
        .stdout_has("delete_cifs_share");
}

#[test]
fn read_only_hides_mutations() {
    let temp = Project::empty();

    temp.filer()
        .args(&["--read-only", "tools"])
        .passes()
        .stdout_has("list_volumes")
        .stdout_has("list_cifs_share")
        .stdout_lacks("create_volume")
        .stdout_lacks("update_nfs_export_policies")
        .stdout_lacks("delete_qos_policy");
}

#[test]
fn read_only_refuses_mutating_calls() {
    let temp = Project::with_inventory(TWO_CLUSTERS);

    temp.filer()
        .args(&[
            "--read-only",
            "call",
            "delete_volume",
            "--args",
            r#"{"cluster_name":"alpha","svm_name":"vs0","volume_name":"vol1"}"#,
        ])
        .fails()
        .stderr_has("unknown tool: delete_volume");
}
