// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool catalogue exposed to callers

use serde::Serialize;

/// Behaviour hints published with each tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotations {
    pub read_only_hint: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destructive_hint: Option<bool>,
    pub idempotent_hint: bool,
}

impl Annotations {
    pub const READ_ONLY: Self = Self {
        read_only_hint: true,
        destructive_hint: None,
        idempotent_hint: false,
    };
    pub const CREATE: Self = Self {
        read_only_hint: false,
        destructive_hint: Some(false),
        idempotent_hint: false,
    };
    pub const UPDATE: Self = Self {
        read_only_hint: false,
        destructive_hint: Some(true),
        idempotent_hint: true,
    };
    pub const DELETE: Self = Self {
        read_only_hint: false,
        destructive_hint: Some(true),
        idempotent_hint: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub annotations: Annotations,
}

const fn tool(name: &'static str, description: &'static str, annotations: Annotations) -> ToolSpec {
    ToolSpec {
        name,
        description,
        annotations,
    }
}

pub(crate) const LIST_CLUSTERS: &str = "list_registered_clusters";
pub(crate) const LIST_VOLUMES: &str = "list_volumes";
pub(crate) const CREATE_VOLUME: &str = "create_volume";
pub(crate) const UPDATE_VOLUME: &str = "update_volume";
pub(crate) const DELETE_VOLUME: &str = "delete_volume";
pub(crate) const LIST_SNAPSHOT_POLICIES: &str = "list_snapshot_policies";
pub(crate) const CREATE_SNAPSHOT_POLICY: &str = "create_snapshot_policy";
pub(crate) const DELETE_SNAPSHOT_POLICY: &str = "delete_snapshot_policy";
pub(crate) const CREATE_SCHEDULE: &str = "create_schedule";
pub(crate) const LIST_QOS_POLICIES: &str = "list_qos_policies";
pub(crate) const CREATE_QOS_POLICY: &str = "create_qos_policy";
pub(crate) const UPDATE_QOS_POLICY: &str = "update_qos_policy";
pub(crate) const DELETE_QOS_POLICY: &str = "delete_qos_policy";
pub(crate) const LIST_EXPORT_POLICIES: &str = "list_nfs_export_policies";
pub(crate) const CREATE_EXPORT_POLICY: &str = "create_nfs_export_policies";
pub(crate) const UPDATE_EXPORT_POLICY: &str = "update_nfs_export_policies";
pub(crate) const DELETE_EXPORT_POLICY: &str = "delete_nfs_export_policies";
pub(crate) const CREATE_EXPORT_RULE: &str = "create_nfs_export_policies_rules";
pub(crate) const UPDATE_EXPORT_RULE: &str = "update_nfs_export_policies_rules";
pub(crate) const DELETE_EXPORT_RULE: &str = "delete_nfs_export_policies_rules";
pub(crate) const LIST_CIFS_SHARES: &str = "list_cifs_share";
pub(crate) const CREATE_CIFS_SHARE: &str = "create_cifs_share";
pub(crate) const UPDATE_CIFS_SHARE: &str = "update_cifs_share";
pub(crate) const DELETE_CIFS_SHARE: &str = "delete_cifs_share";

const CATALOGUE: &[ToolSpec] = &[
    tool(
        LIST_CLUSTERS,
        "List all clusters registered in the server configuration.",
        Annotations::READ_ONLY,
    ),
    tool(
        LIST_VOLUMES,
        "List volumes on a cluster by cluster name.",
        Annotations::READ_ONLY,
    ),
    tool(
        CREATE_VOLUME,
        "Create a volume on a cluster by cluster name.",
        Annotations::CREATE,
    ),
    tool(
        UPDATE_VOLUME,
        "Update volume name, size, or state of a volume on a cluster by cluster name.",
        Annotations::UPDATE,
    ),
    tool(
        DELETE_VOLUME,
        "Delete a volume on a cluster by cluster name.",
        Annotations::DELETE,
    ),
    tool(
        LIST_SNAPSHOT_POLICIES,
        "List snapshot policies on a cluster by cluster name.",
        Annotations::READ_ONLY,
    ),
    tool(
        CREATE_SNAPSHOT_POLICY,
        "Create a snapshot policy on a cluster by cluster name.",
        Annotations::CREATE,
    ),
    tool(
        DELETE_SNAPSHOT_POLICY,
        "Delete a snapshot policy on a cluster by cluster name.",
        Annotations::DELETE,
    ),
    tool(
        CREATE_SCHEDULE,
        "Create a cron schedule on a cluster by cluster name. Ex: 5 1 * * * triggers at 01:05 every day.",
        Annotations::CREATE,
    ),
    tool(
        LIST_QOS_POLICIES,
        "List QoS policies on a cluster by cluster name.",
        Annotations::READ_ONLY,
    ),
    tool(
        CREATE_QOS_POLICY,
        "Create a QoS policy on a cluster by cluster name.",
        Annotations::CREATE,
    ),
    tool(
        UPDATE_QOS_POLICY,
        "Update a QoS policy on a cluster by cluster name.",
        Annotations::UPDATE,
    ),
    tool(
        DELETE_QOS_POLICY,
        "Delete a QoS policy on a cluster by cluster name.",
        Annotations::DELETE,
    ),
    tool(
        LIST_EXPORT_POLICIES,
        "List NFS export policies on a cluster by cluster name.",
        Annotations::READ_ONLY,
    ),
    tool(
        CREATE_EXPORT_POLICY,
        "Create an NFS export policy, optionally with one rule, on a cluster by cluster name.",
        Annotations::CREATE,
    ),
    tool(
        UPDATE_EXPORT_POLICY,
        "Rename an NFS export policy or replace its rules on a cluster by cluster name.",
        Annotations::UPDATE,
    ),
    tool(
        DELETE_EXPORT_POLICY,
        "Delete an NFS export policy on a cluster by cluster name.",
        Annotations::DELETE,
    ),
    tool(
        CREATE_EXPORT_RULE,
        "Add a rule to an NFS export policy on a cluster by cluster name.",
        Annotations::CREATE,
    ),
    tool(
        UPDATE_EXPORT_RULE,
        "Update the NFS export policy rule matching the old client, ro rule or rw rule.",
        Annotations::UPDATE,
    ),
    tool(
        DELETE_EXPORT_RULE,
        "Delete the NFS export policy rule matching the client, ro rule or rw rule.",
        Annotations::DELETE,
    ),
    tool(
        LIST_CIFS_SHARES,
        "List CIFS shares on a cluster by cluster name.",
        Annotations::READ_ONLY,
    ),
    tool(
        CREATE_CIFS_SHARE,
        "Create a CIFS share on a cluster by cluster name.",
        Annotations::CREATE,
    ),
    tool(
        UPDATE_CIFS_SHARE,
        "Update the path of a CIFS share on a cluster by cluster name.",
        Annotations::UPDATE,
    ),
    tool(
        DELETE_CIFS_SHARE,
        "Delete a CIFS share on a cluster by cluster name.",
        Annotations::DELETE,
    ),
];

/// The tools a caller may invoke
///
/// In read-only mode every tool without the read-only hint is left out, so
/// a call naming it fails as an unknown tool.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
}

impl ToolRegistry {
    pub fn new(read_only: bool) -> Self {
        let tools = CATALOGUE
            .iter()
            .filter(|spec| {
                let keep = !read_only || spec.annotations.read_only_hint;
                if !keep {
                    tracing::warn!(
                        tool = spec.name,
                        "skipping registration of destructive tool in read-only mode"
                    );
                }
                keep
            })
            .copied()
            .collect();
        Self { tools }
    }

    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|spec| spec.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolSpec> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
#[path = "tools_tests.rs"]
mod tests;
