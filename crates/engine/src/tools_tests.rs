// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use yare::parameterized;

#[test]
fn full_registry_has_every_tool() {
    let registry = ToolRegistry::new(false);
    assert_eq!(registry.len(), CATALOGUE.len());
    assert_eq!(registry.len(), 24);
    assert!(registry.get(DELETE_VOLUME).is_some());
}

#[test]
fn read_only_registry_keeps_only_reads() {
    let registry = ToolRegistry::new(true);
    let names: Vec<_> = registry.iter().map(|spec| spec.name).collect();
    assert_eq!(
        names,
        vec![
            LIST_CLUSTERS,
            LIST_VOLUMES,
            LIST_SNAPSHOT_POLICIES,
            LIST_QOS_POLICIES,
            LIST_EXPORT_POLICIES,
            LIST_CIFS_SHARES
        ]
    );
    assert!(registry.get(CREATE_SCHEDULE).is_none());
}

#[parameterized(
    list = { LIST_VOLUMES, Annotations::READ_ONLY },
    create = { CREATE_VOLUME, Annotations::CREATE },
    update = { UPDATE_QOS_POLICY, Annotations::UPDATE },
    delete = { DELETE_SNAPSHOT_POLICY, Annotations::DELETE },
    schedule = { CREATE_SCHEDULE, Annotations::CREATE },
    export_rule = { UPDATE_EXPORT_RULE, Annotations::UPDATE },
    share = { DELETE_CIFS_SHARE, Annotations::DELETE },
)]
fn tools_carry_annotations(name: &str, expected: Annotations) {
    let registry = ToolRegistry::new(false);
    assert_eq!(registry.get(name).unwrap().annotations, expected);
}

#[test]
fn annotations_serialize_with_hint_names() {
    assert_eq!(
        serde_json::to_value(Annotations::DELETE).unwrap(),
        json!({ "readOnlyHint": false, "destructiveHint": true, "idempotentHint": true })
    );
    assert_eq!(
        serde_json::to_value(Annotations::READ_ONLY).unwrap(),
        json!({ "readOnlyHint": true, "idempotentHint": false })
    );
}

#[test]
fn tool_names_are_unique() {
    let mut names: Vec<_> = CATALOGUE.iter().map(|spec| spec.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), CATALOGUE.len());
}
