// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CIFS share tools

use crate::app::{list_names, lookup_one, svm_filter, App};
use crate::error::OpError;
use filer_core::resources::{CifsShare, NameAndUuid};
use reqwest::Method;
use serde::Deserialize;

const SHARES: &str = "/api/protocols/cifs/shares";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CifsShareArgs {
    pub cluster_name: String,
    pub svm_name: String,
    pub name: String,
    pub path: String,
}

impl CifsShareArgs {
    fn require_svm_and_name(&self) -> Result<(), OpError> {
        if self.svm_name.is_empty() {
            return Err(OpError::validation("SVM name is required"));
        }
        if self.name.is_empty() {
            return Err(OpError::validation("cifs share name is required"));
        }
        Ok(())
    }

    fn create_body(&self) -> Result<CifsShare, OpError> {
        self.require_svm_and_name()?;
        if self.path.is_empty() {
            return Err(OpError::validation("cifs share path is required"));
        }
        Ok(CifsShare {
            svm: Some(NameAndUuid::named(&self.svm_name)),
            name: self.name.clone(),
            path: self.path.clone(),
        })
    }
}

impl App {
    pub async fn list_cifs_shares(&self, args: CifsShareArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.locks().read_lock(&args.cluster_name).await;

        let svm = args.svm_name.as_str();
        list_names(client, SHARES, &svm_filter(svm), || {
            if svm.is_empty() {
                "no cifs share found in the cluster".to_string()
            } else {
                format!("no cifs share found on svm: {}", svm)
            }
        })
        .await
    }

    pub async fn create_cifs_share(&self, args: CifsShareArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        let body = args.create_body()?;
        let job = client.submit(Method::POST, SHARES, &body).await?;
        self.finish(client, job).await?;
        Ok("CIFS share created successfully".to_string())
    }

    /// Change the path a share exports
    pub async fn update_cifs_share(&self, args: CifsShareArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        args.require_svm_and_name()?;
        let body = CifsShare {
            path: args.path.clone(),
            ..Default::default()
        };
        let location = self.share_location(&args, "update").await?;
        let job = client.submit(Method::PATCH, &location, &body).await?;
        self.finish(client, job).await?;
        Ok("CIFS share updated successfully".to_string())
    }

    pub async fn delete_cifs_share(&self, args: CifsShareArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        args.require_svm_and_name()?;
        let location = self.share_location(&args, "delete").await?;
        let job = client.delete(&location).await?;
        self.finish(client, job).await?;
        Ok("CIFS share deleted successfully".to_string())
    }

    /// Shares are keyed by owning svm uuid and share name
    async fn share_location(&self, args: &CifsShareArgs, action: &str) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let (name, svm) = (args.name.as_str(), args.svm_name.as_str());
        let record = lookup_one(
            client,
            SHARES,
            &[("fields", "svm"), ("name", name), ("svm", svm)],
            || {
                format!(
                    "failed to {} cifs share {} on svm {} because it does not exist",
                    action, name, svm
                )
            },
            |n| {
                format!(
                    "failed to {} cifs share {} on svm {} because there are {} matching records",
                    action, name, svm, n
                )
            },
        )
        .await?;

        let svm_uuid = record
            .svm
            .map(|owner| owner.uuid)
            .filter(|uuid| !uuid.is_empty())
            .ok_or_else(|| {
                OpError::NotFound(format!(
                    "failed to {} cifs share {} because its svm uuid is unknown",
                    action, name
                ))
            })?;
        Ok(format!("{}/{}/{}", SHARES, svm_uuid, name))
    }
}

#[cfg(test)]
#[path = "cifs_tests.rs"]
mod tests;
