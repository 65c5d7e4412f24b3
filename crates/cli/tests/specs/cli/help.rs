// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help output specs
//!
//! Verify the top-level help lists every subcommand.

use crate::prelude::*;
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    let temp = Project::empty();

    temp.filer()
        .args(&["--help"])
        .passes()
        .stdout_has("tools")
        .stdout_has("targets")
        .stdout_has("call")
        .stdout_has("schedule");
}

#[test]
fn help_documents_global_flags() {
    let temp = Project::empty();

    temp.filer()
        .args(&["--help"])
        .passes()
        .stdout_has("--config")
        .stdout_has("--read-only");
}

#[test]
fn version_flag_prints_version() {
    Command::cargo_bin("filer")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("filer "));
}

#[test]
fn subcommand_is_required() {
    Command::cargo_bin("filer")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
