// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! QoS policy tools

use crate::app::{list_names, lookup_one, svm_filter, App};
use crate::error::OpError;
use filer_core::parse_size;
use filer_core::resources::{NameAndUuid, QosAdaptive, QosFixed, QosPolicy};
use reqwest::Method;
use serde::Deserialize;

const POLICIES: &str = "/api/storage/qos/policies";

/// Arguments shared by every QoS tool
///
/// Limits are given as sizes (`5000`, `10K`) and parsed the same way as
/// volume sizes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QosArgs {
    pub cluster_name: String,
    pub svm_name: String,
    pub name: String,
    pub new_name: String,
    pub max_throughput_iops: String,
    pub min_throughput_iops: String,
    pub expected_iops: String,
    pub peak_iops: String,
    pub absolute_min_iops: String,
    pub capacity_shared: bool,
}

impl QosArgs {
    fn require_svm_and_name(&self) -> Result<(), OpError> {
        if self.svm_name.is_empty() {
            return Err(OpError::validation("SVM name is required"));
        }
        if self.name.is_empty() {
            return Err(OpError::validation("qos policy name is required"));
        }
        Ok(())
    }

    fn wants_fixed(&self) -> bool {
        !self.max_throughput_iops.is_empty() || !self.min_throughput_iops.is_empty()
    }

    fn wants_adaptive(&self) -> bool {
        !self.expected_iops.is_empty()
            || !self.peak_iops.is_empty()
            || !self.absolute_min_iops.is_empty()
    }

    fn fixed(&self) -> Result<QosFixed, OpError> {
        Ok(QosFixed {
            max_throughput_iops: required(&self.max_throughput_iops, "max throughput iops")?,
            min_throughput_iops: required(&self.min_throughput_iops, "min throughput iops")?,
            capacity_shared: self.capacity_shared,
        })
    }

    fn adaptive(&self) -> Result<QosAdaptive, OpError> {
        Ok(QosAdaptive {
            expected_iops: required(&self.expected_iops, "expected iops")?,
            peak_iops: required(&self.peak_iops, "peak iops")?,
            absolute_min_iops: required(&self.absolute_min_iops, "absolute min iops")?,
        })
    }

    /// A new policy is fixed when any fixed limit is given, adaptive otherwise
    fn create_body(&self) -> Result<QosPolicy, OpError> {
        self.require_svm_and_name()?;
        let (fixed, adaptive) = if self.wants_fixed() {
            (Some(self.fixed()?), None)
        } else {
            (None, Some(self.adaptive()?))
        };
        Ok(QosPolicy {
            svm: Some(NameAndUuid::named(&self.svm_name)),
            name: self.name.clone(),
            fixed,
            adaptive,
        })
    }

    /// Only the limits that were given are sent
    fn update_body(&self) -> Result<QosPolicy, OpError> {
        self.require_svm_and_name()?;
        let mut body = QosPolicy {
            name: self.new_name.clone(),
            ..Default::default()
        };
        if self.wants_fixed() {
            body.fixed = Some(self.fixed()?);
        } else if self.wants_adaptive() {
            body.adaptive = Some(self.adaptive()?);
        }
        Ok(body)
    }
}

fn required(value: &str, what: &str) -> Result<u64, OpError> {
    if value.is_empty() {
        return Err(OpError::validation(format!("{} is required", what)));
    }
    Ok(parse_size(value)?)
}

impl App {
    pub async fn list_qos_policies(&self, args: QosArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.locks().read_lock(&args.cluster_name).await;

        let svm = args.svm_name.as_str();
        list_names(client, POLICIES, &svm_filter(svm), || {
            if svm.is_empty() {
                "no qos policies found in the cluster".to_string()
            } else {
                format!("no qos policies found on svm: {}", svm)
            }
        })
        .await
    }

    pub async fn create_qos_policy(&self, args: QosArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        let body = args.create_body()?;
        let job = client.submit(Method::POST, POLICIES, &body).await?;
        self.finish(client, job).await?;
        Ok("QoS Policy created successfully".to_string())
    }

    /// Rename a policy or replace its limits
    pub async fn update_qos_policy(&self, args: QosArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        let body = args.update_body()?;
        let uuid = self.qos_uuid(&args, "update").await?;
        let job = client
            .submit(Method::PATCH, &format!("{}/{}", POLICIES, uuid), &body)
            .await?;
        self.finish(client, job).await?;
        Ok("QoS Policy updated successfully".to_string())
    }

    pub async fn delete_qos_policy(&self, args: QosArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        args.require_svm_and_name()?;
        let uuid = self.qos_uuid(&args, "delete").await?;
        let job = client.delete(&format!("{}/{}", POLICIES, uuid)).await?;
        self.finish(client, job).await?;
        Ok("QoS policy deleted successfully".to_string())
    }

    async fn qos_uuid(&self, args: &QosArgs, action: &str) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let (name, svm) = (args.name.as_str(), args.svm_name.as_str());
        let record = lookup_one(
            client,
            POLICIES,
            &[("fields", "uuid"), ("name", name), ("svm", svm)],
            || {
                format!(
                    "failed to {} qos policy {} on svm {} because it does not exist",
                    action, name, svm
                )
            },
            |n| {
                format!(
                    "failed to {} qos policy {} on svm {} because there are {} matching records",
                    action, name, svm, n
                )
            },
        )
        .await?;
        Ok(record.uuid)
    }
}

#[cfg(test)]
#[path = "qos_tests.rs"]
mod tests;
