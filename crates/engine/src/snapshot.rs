// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot policy tools

use crate::app::{list_names, lookup_one, svm_filter, App};
use crate::error::OpError;
use filer_core::resources::{Collection, NameAndUuid, ScheduleRef, SnapshotCopy, SnapshotPolicy};
use reqwest::Method;
use serde::Deserialize;

const POLICIES: &str = "/api/storage/snapshot-policies";
pub(crate) const SCHEDULES: &str = "/api/cluster/schedules";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SnapshotPolicyArgs {
    pub cluster_name: String,
    pub svm_name: String,
    /// Snapshot policy name
    pub name: String,
    /// Name of an existing schedule
    pub schedule: String,
    /// Number of snapshot copies to keep
    pub count: u32,
}

impl SnapshotPolicyArgs {
    fn require_svm_and_name(&self) -> Result<(), OpError> {
        if self.svm_name.is_empty() {
            return Err(OpError::validation("SVM name is required"));
        }
        if self.name.is_empty() {
            return Err(OpError::validation("snapshot policy name is required"));
        }
        Ok(())
    }

    fn create_body(&self) -> Result<SnapshotPolicy, OpError> {
        self.require_svm_and_name()?;
        if self.schedule.is_empty() {
            return Err(OpError::validation("schedule is required"));
        }
        if self.count == 0 {
            return Err(OpError::validation("snapshot copies count is required"));
        }
        Ok(SnapshotPolicy {
            svm: Some(NameAndUuid::named(&self.svm_name)),
            name: self.name.clone(),
            copies: vec![SnapshotCopy {
                count: self.count,
                schedule: ScheduleRef {
                    name: self.schedule.clone(),
                },
            }],
        })
    }
}

impl App {
    pub async fn list_snapshot_policies(&self, args: SnapshotPolicyArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.locks().read_lock(&args.cluster_name).await;

        let svm = args.svm_name.as_str();
        list_names(client, POLICIES, &svm_filter(svm), || {
            if svm.is_empty() {
                "no snapshot policies found in the cluster".to_string()
            } else {
                format!("no snapshot policies found on svm: {}", svm)
            }
        })
        .await
    }

    /// Create a policy keeping `count` copies on an existing schedule
    pub async fn create_snapshot_policy(
        &self,
        args: SnapshotPolicyArgs,
    ) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        let body = args.create_body()?;
        let schedules: Collection = client
            .get_json(
                SCHEDULES,
                &[
                    ("return_records", "false"),
                    ("fields", "name"),
                    ("name", args.schedule.as_str()),
                ],
            )
            .await?;
        match schedules.num_records {
            0 => {
                return Err(OpError::NotFound(format!(
                    "no schedule {} found",
                    args.schedule
                )))
            }
            1 => {}
            n => {
                return Err(OpError::validation(format!(
                    "failed to create snapshot policy={} on svm={} because there are {} schedules named {}",
                    args.name, args.svm_name, n, args.schedule
                )))
            }
        }

        let job = client.submit(Method::POST, POLICIES, &body).await?;
        self.finish(client, job).await?;
        Ok("Snapshot policy created successfully".to_string())
    }

    pub async fn delete_snapshot_policy(
        &self,
        args: SnapshotPolicyArgs,
    ) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        args.require_svm_and_name()?;
        let (name, svm) = (args.name.as_str(), args.svm_name.as_str());
        let record = lookup_one(
            client,
            POLICIES,
            &[("fields", "uuid"), ("name", name), ("svm", svm)],
            || {
                format!(
                    "failed to delete snapshot policy={} on svm={} because it does not exist",
                    name, svm
                )
            },
            |n| {
                format!(
                    "failed to delete snapshot policy={} on svm={} because there are {} matching records",
                    name, svm, n
                )
            },
        )
        .await?;

        let job = client
            .delete(&format!("{}/{}", POLICIES, record.uuid))
            .await?;
        self.finish(client, job).await?;
        Ok("Snapshot policy deleted successfully".to_string())
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
