// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! NFS export policy and export rule tools
//!
//! Policies are addressed by a numeric id and rules by their index within
//! the policy. Both are looked up from the names and match criteria the
//! caller gives.

use crate::app::{list_names, lookup_one, svm_filter, App};
use crate::error::OpError;
use filer_adapters::RestClient;
use filer_core::resources::{split_rules, ClientMatch, ExportPolicy, ExportRule, NameAndUuid};
use reqwest::Method;
use serde::Deserialize;

const POLICIES: &str = "/api/protocols/nfs/export-policies";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExportPolicyArgs {
    pub cluster_name: String,
    pub svm_name: String,
    pub export_policy: String,
    pub new_export_policy: String,
    pub client_match: String,
    pub ro_rule: String,
    pub rw_rule: String,
}

impl ExportPolicyArgs {
    /// The optional initial rule; all three parts are needed once any is given
    fn rule(&self) -> Result<Option<ExportRule>, OpError> {
        if self.client_match.is_empty() && self.ro_rule.is_empty() && self.rw_rule.is_empty() {
            return Ok(None);
        }
        require_rule_parts(&self.client_match, &self.ro_rule, &self.rw_rule)?;
        Ok(Some(ExportRule::new(
            &self.client_match,
            &self.ro_rule,
            &self.rw_rule,
        )))
    }

    fn create_body(&self) -> Result<ExportPolicy, OpError> {
        if self.svm_name.is_empty() {
            return Err(OpError::validation("SVM name is required"));
        }
        if self.export_policy.is_empty() {
            return Err(OpError::validation("nfs export policy name is required"));
        }
        Ok(ExportPolicy {
            svm: Some(NameAndUuid::named(&self.svm_name)),
            name: self.export_policy.clone(),
            rules: self.rule()?.into_iter().collect(),
        })
    }

    fn update_body(&self) -> Result<ExportPolicy, OpError> {
        require_policy_name(&self.export_policy)?;
        Ok(ExportPolicy {
            svm: None,
            name: self.new_export_policy.clone(),
            rules: self.rule()?.into_iter().collect(),
        })
    }
}

/// Arguments of the export rule tools
///
/// `old_*` fields select the rule to update; the unprefixed fields carry
/// new values, and select the rule to delete.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExportRuleArgs {
    pub cluster_name: String,
    pub export_policy: String,
    pub old_client: String,
    pub client: String,
    pub old_ro_rule: String,
    pub ro_rule: String,
    pub old_rw_rule: String,
    pub rw_rule: String,
}

impl ExportRuleArgs {
    fn create_body(&self) -> Result<ExportRule, OpError> {
        require_rule_parts(&self.client, &self.ro_rule, &self.rw_rule)?;
        require_policy_name(&self.export_policy)?;
        Ok(ExportRule::new(&self.client, &self.ro_rule, &self.rw_rule))
    }

    fn update_body(&self) -> Result<ExportRule, OpError> {
        require_policy_name(&self.export_policy)?;
        if self.old_client.is_empty() && self.old_ro_rule.is_empty() && self.old_rw_rule.is_empty()
        {
            return Err(OpError::validation(
                "old client match OR ro rule OR rw rules are required",
            ));
        }
        let mut body = ExportRule {
            ro_rule: split_rules(&self.ro_rule),
            rw_rule: split_rules(&self.rw_rule),
            ..Default::default()
        };
        if !self.client.is_empty() {
            body.clients = vec![ClientMatch {
                pattern: self.client.clone(),
            }];
        }
        Ok(body)
    }

    fn validate_delete(&self) -> Result<(), OpError> {
        require_policy_name(&self.export_policy)?;
        if self.client.is_empty() && self.ro_rule.is_empty() && self.rw_rule.is_empty() {
            return Err(OpError::validation(
                "client match OR ro rule OR rw rules are required",
            ));
        }
        Ok(())
    }
}

fn require_policy_name(name: &str) -> Result<(), OpError> {
    if name.is_empty() {
        return Err(OpError::validation("export policy name is required"));
    }
    Ok(())
}

fn require_rule_parts(client: &str, ro_rule: &str, rw_rule: &str) -> Result<(), OpError> {
    if client.is_empty() {
        return Err(OpError::validation("client match is required"));
    }
    if ro_rule.is_empty() {
        return Err(OpError::validation("read only rules are required"));
    }
    if rw_rule.is_empty() {
        return Err(OpError::validation("read write rules are required"));
    }
    Ok(())
}

/// Query selecting rules by whichever criteria are non-empty
fn rule_filter<'a>(
    client: &'a str,
    ro_rule: &'a str,
    rw_rule: &'a str,
) -> Vec<(&'static str, &'a str)> {
    let mut query = vec![("fields", "index")];
    for (key, value) in [("clients.match", client), ("ro_rule", ro_rule), ("rw_rule", rw_rule)] {
        if !value.is_empty() {
            query.push((key, value));
        }
    }
    query
}

impl App {
    pub async fn list_nfs_export_policies(
        &self,
        args: ExportPolicyArgs,
    ) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.locks().read_lock(&args.cluster_name).await;

        let svm = args.svm_name.as_str();
        list_names(client, POLICIES, &svm_filter(svm), || {
            if svm.is_empty() {
                "no nfs export policies found in the cluster".to_string()
            } else {
                format!("no nfs export policies found on svm: {}", svm)
            }
        })
        .await
    }

    pub async fn create_nfs_export_policy(
        &self,
        args: ExportPolicyArgs,
    ) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        let body = args.create_body()?;
        let job = client.submit(Method::POST, POLICIES, &body).await?;
        self.finish(client, job).await?;
        Ok("NFS Export Policy created successfully".to_string())
    }

    /// Rename a policy and/or replace its rules
    pub async fn update_nfs_export_policy(
        &self,
        args: ExportPolicyArgs,
    ) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        let body = args.update_body()?;
        let id = policy_id(client, &args.export_policy, &args.svm_name).await?;
        let job = client
            .submit(Method::PATCH, &format!("{}/{}", POLICIES, id), &body)
            .await?;
        self.finish(client, job).await?;
        Ok("NFS Export Policy updated successfully".to_string())
    }

    pub async fn delete_nfs_export_policy(
        &self,
        args: ExportPolicyArgs,
    ) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        require_policy_name(&args.export_policy)?;
        let id = policy_id(client, &args.export_policy, &args.svm_name).await?;
        let job = client.delete(&format!("{}/{}", POLICIES, id)).await?;
        self.finish(client, job).await?;
        Ok("NFS Export Policy deleted successfully".to_string())
    }

    pub async fn create_nfs_export_rule(&self, args: ExportRuleArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        let body = args.create_body()?;
        let id = policy_id(client, &args.export_policy, "").await?;
        let job = client
            .submit(Method::POST, &format!("{}/{}/rules", POLICIES, id), &body)
            .await?;
        self.finish(client, job).await?;
        Ok("NFS Export Policy Rules created successfully".to_string())
    }

    pub async fn update_nfs_export_rule(&self, args: ExportRuleArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        let body = args.update_body()?;
        let id = policy_id(client, &args.export_policy, "").await?;
        let filter = rule_filter(&args.old_client, &args.old_ro_rule, &args.old_rw_rule);
        let index = rule_index(client, id, &filter).await?;
        let job = client
            .submit(
                Method::PATCH,
                &format!("{}/{}/rules/{}", POLICIES, id, index),
                &body,
            )
            .await?;
        self.finish(client, job).await?;
        Ok("NFS Export Policy Rules updated successfully".to_string())
    }

    pub async fn delete_nfs_export_rule(&self, args: ExportRuleArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        args.validate_delete()?;
        let id = policy_id(client, &args.export_policy, "").await?;
        let filter = rule_filter(&args.client, &args.ro_rule, &args.rw_rule);
        let index = rule_index(client, id, &filter).await?;
        let job = client
            .delete(&format!("{}/{}/rules/{}", POLICIES, id, index))
            .await?;
        self.finish(client, job).await?;
        Ok("NFS Export Policy Rules deleted successfully".to_string())
    }
}

async fn policy_id(client: &RestClient, name: &str, svm: &str) -> Result<u64, OpError> {
    let mut query = vec![("fields", "id"), ("name", name)];
    query.extend(svm_filter(svm));
    let record = lookup_one(
        client,
        POLICIES,
        &query,
        || {
            format!(
                "failed to get detail of export policy {} because it does not exist",
                name
            )
        },
        |n| {
            format!(
                "failed to get detail of export policy {} because there are {} matching records",
                name, n
            )
        },
    )
    .await?;
    Ok(record.id)
}

async fn rule_index(client: &RestClient, id: u64, filter: &[(&str, &str)]) -> Result<u64, OpError> {
    let record = lookup_one(
        client,
        &format!("{}/{}/rules", POLICIES, id),
        filter,
        || "failed to get detail of export policy rule because it does not exist".to_string(),
        |n| {
            format!(
                "failed to get detail of export policy rule because there are {} matching records",
                n
            )
        },
    )
    .await?;
    Ok(record.index)
}

#[cfg(test)]
#[path = "nfs_tests.rs"]
mod tests;
