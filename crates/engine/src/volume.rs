// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Volume tools

use crate::app::{list_names, lookup_one, svm_filter, App};
use crate::error::OpError;
use filer_core::parse_size;
use filer_core::resources::{NameAndUuid, Volume};
use reqwest::Method;
use serde::Deserialize;

const VOLUMES: &str = "/api/storage/volumes";

/// Arguments shared by every volume tool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VolumeArgs {
    pub cluster_name: String,
    pub svm_name: String,
    pub volume_name: String,
    pub aggregate_name: String,
    pub new_volume_name: String,
    /// e.g. `100GB`, `1TB`, or raw bytes
    pub size: String,
    /// e.g. `online`, `offline`
    pub new_state: String,
}

impl VolumeArgs {
    fn require_svm_and_name(&self) -> Result<(), OpError> {
        if self.svm_name.is_empty() {
            return Err(OpError::validation("SVM name is required"));
        }
        if self.volume_name.is_empty() {
            return Err(OpError::validation("volume name is required"));
        }
        Ok(())
    }

    fn create_body(&self) -> Result<Volume, OpError> {
        self.require_svm_and_name()?;
        if self.aggregate_name.is_empty() {
            return Err(OpError::validation("aggregate name is required"));
        }
        Ok(Volume {
            svm: Some(NameAndUuid::named(&self.svm_name)),
            name: self.volume_name.clone(),
            aggregates: vec![NameAndUuid::named(&self.aggregate_name)],
            size: self.size_bytes()?,
            ..Default::default()
        })
    }

    fn update_body(&self) -> Result<Volume, OpError> {
        self.require_svm_and_name()?;
        Ok(Volume {
            name: self.new_volume_name.clone(),
            state: self.new_state.clone(),
            size: self.size_bytes()?,
            ..Default::default()
        })
    }

    fn size_bytes(&self) -> Result<Option<u64>, OpError> {
        if self.size.is_empty() {
            return Ok(None);
        }
        Ok(Some(parse_size(&self.size)?))
    }
}

impl App {
    /// Comma-joined volume names, optionally limited to one SVM
    pub async fn list_volumes(&self, args: VolumeArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.locks().read_lock(&args.cluster_name).await;

        let svm = args.svm_name.as_str();
        list_names(client, VOLUMES, &svm_filter(svm), || {
            if svm.is_empty() {
                "no volumes found in the cluster".to_string()
            } else {
                format!("no volumes found on svm: {}", svm)
            }
        })
        .await
    }

    pub async fn create_volume(&self, args: VolumeArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        let body = args.create_body()?;
        let job = client.submit(Method::POST, VOLUMES, &body).await?;
        self.finish(client, job).await?;
        Ok("Volume created successfully".to_string())
    }

    /// Rename, resize or change the state of a volume
    pub async fn update_volume(&self, args: VolumeArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        let body = args.update_body()?;
        let uuid = self.volume_uuid(&args, "update").await?;
        let job = client
            .submit(Method::PATCH, &format!("{}/{}", VOLUMES, uuid), &body)
            .await?;
        self.finish(client, job).await?;
        Ok("Volume updated successfully".to_string())
    }

    pub async fn delete_volume(&self, args: VolumeArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        args.require_svm_and_name()?;
        let uuid = self.volume_uuid(&args, "delete").await?;
        let job = client.delete(&format!("{}/{}", VOLUMES, uuid)).await?;
        self.finish(client, job).await?;
        Ok("Volume deleted successfully".to_string())
    }

    async fn volume_uuid(&self, args: &VolumeArgs, action: &str) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let (name, svm) = (args.volume_name.as_str(), args.svm_name.as_str());
        let record = lookup_one(
            client,
            VOLUMES,
            &[("fields", "uuid"), ("name", name), ("svm", svm)],
            || {
                format!(
                    "failed to {} volume={} on svm={} because it does not exist",
                    action, name, svm
                )
            },
            |n| {
                format!(
                    "failed to {} volume={} on svm={} because there are {} matching records",
                    action, name, svm, n
                )
            },
        )
        .await?;
        Ok(record.uuid)
    }
}

#[cfg(test)]
#[path = "volume_tests.rs"]
mod tests;
