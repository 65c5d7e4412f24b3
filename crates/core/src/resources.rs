// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Appliance resource payloads
//!
//! Field names follow the appliance's JSON schema. Unset optional fields are
//! left out of request bodies so a PATCH only touches what was given.

use serde::{Deserialize, Serialize};

/// Reference to another object by name and/or uuid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameAndUuid {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
}

impl NameAndUuid {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uuid: String::new(),
        }
    }
}

/// One row of a collection GET
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub svm: Option<NameAndUuid>,
    /// Numeric key of export policies
    #[serde(default)]
    pub id: u64,
    /// Position of an export rule within its policy
    #[serde(default)]
    pub index: u64,
}

/// Body of a collection GET
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default)]
    pub num_records: usize,
}

impl Collection {
    pub fn names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svm: Option<NameAndUuid>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aggregates: Vec<NameAndUuid>,
    /// error, mixed, offline, online, restricted
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCopy {
    pub count: u32,
    pub schedule: ScheduleRef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svm: Option<NameAndUuid>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub copies: Vec<SnapshotCopy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QosFixed {
    pub max_throughput_iops: u64,
    pub min_throughput_iops: u64,
    #[serde(default)]
    pub capacity_shared: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QosAdaptive {
    pub expected_iops: u64,
    pub peak_iops: u64,
    pub absolute_min_iops: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QosPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svm: Option<NameAndUuid>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<QosFixed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adaptive: Option<QosAdaptive>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMatch {
    #[serde(rename = "match")]
    pub pattern: String,
}

/// One export rule: which clients get read-only and read-write access
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRule {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clients: Vec<ClientMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ro_rule: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rw_rule: Vec<String>,
}

impl ExportRule {
    /// Rule for one client match with comma-separated rule lists
    pub fn new(client: &str, ro_rule: &str, rw_rule: &str) -> Self {
        Self {
            clients: vec![ClientMatch {
                pattern: client.to_string(),
            }],
            ro_rule: split_rules(ro_rule),
            rw_rule: split_rules(rw_rule),
        }
    }
}

/// `"sys,krb5"` as `["sys", "krb5"]`; empty input yields no entries
pub fn split_rules(rules: &str) -> Vec<String> {
    if rules.is_empty() {
        return Vec::new();
    }
    rules.split(',').map(str::to_string).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svm: Option<NameAndUuid>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ExportRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CifsShare {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svm: Option<NameAndUuid>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}
