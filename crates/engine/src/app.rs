// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application state shared by every tool call

use crate::error::OpError;
use crate::tools::{self, ToolRegistry};
use filer_adapters::{CredentialResolver, JobPoller, RestClient};
use filer_core::resources::{Collection, Record};
use filer_core::{Inventory, JobHandle, LockRegistry, WriteGuard, DEFAULT_JOB_TIMEOUT, DEFAULT_POLL_INTERVAL};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Knobs that apply to every handler
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub read_only: bool,
    pub job_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            read_only: false,
            job_timeout: DEFAULT_JOB_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl AppOptions {
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_job_timeout(mut self, timeout: Duration) -> Self {
        self.job_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Result of one tool call as shown to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Inventory, clients and locks, built once at startup
///
/// Clients share one credential resolver, so the credential cache spans
/// every target.
#[derive(Debug)]
pub struct App {
    clients: BTreeMap<String, RestClient>,
    locks: LockRegistry,
    tools: ToolRegistry,
    options: AppOptions,
}

impl App {
    pub fn new(
        inventory: &Inventory,
        resolver: CredentialResolver,
        options: AppOptions,
    ) -> Result<Self, OpError> {
        let mut clients = BTreeMap::new();
        for target in inventory.iter() {
            let client = RestClient::new(target.clone(), resolver.clone()).map_err(|source| {
                OpError::Client {
                    cluster: target.name.clone(),
                    source,
                }
            })?;
            clients.insert(target.name.clone(), client);
        }
        Ok(Self {
            clients,
            locks: LockRegistry::new(),
            tools: ToolRegistry::new(options.read_only),
            options,
        })
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn locks(&self) -> &LockRegistry {
        &self.locks
    }

    /// Registered target names, sorted and comma-joined
    pub fn list_targets(&self) -> String {
        self.clients.keys().cloned().collect::<Vec<_>>().join(",")
    }

    /// Run a tool by name until it finishes or `cancel` fires
    ///
    /// Cancellation drops the in-flight handler, which kills any running
    /// credential script, aborts the HTTP request and releases the lock.
    pub async fn call(
        &self,
        name: &str,
        args: serde_json::Value,
        cancel: &CancellationToken,
    ) -> ToolOutput {
        let cluster = args
            .get("cluster_name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();
        let span = tracing::info_span!("tool", tool = name, cluster);
        async {
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(OpError::Cancelled),
                result = self.dispatch(name, args) => result,
            };
            match result {
                Ok(text) => {
                    tracing::info!("tool succeeded");
                    ToolOutput::text(text)
                }
                Err(err) => {
                    tracing::warn!(kind = %err.kind(), error = %err, "tool failed");
                    ToolOutput::error(err.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn dispatch(&self, name: &str, args: serde_json::Value) -> Result<String, OpError> {
        if self.tools.get(name).is_none() {
            return Err(OpError::UnknownTool(name.to_string()));
        }
        match name {
            tools::LIST_CLUSTERS => Ok(self.list_targets()),
            tools::LIST_VOLUMES => self.list_volumes(parse(name, args)?).await,
            tools::CREATE_VOLUME => self.create_volume(parse(name, args)?).await,
            tools::UPDATE_VOLUME => self.update_volume(parse(name, args)?).await,
            tools::DELETE_VOLUME => self.delete_volume(parse(name, args)?).await,
            tools::LIST_SNAPSHOT_POLICIES => self.list_snapshot_policies(parse(name, args)?).await,
            tools::CREATE_SNAPSHOT_POLICY => self.create_snapshot_policy(parse(name, args)?).await,
            tools::DELETE_SNAPSHOT_POLICY => self.delete_snapshot_policy(parse(name, args)?).await,
            tools::CREATE_SCHEDULE => self.create_schedule(parse(name, args)?).await,
            tools::LIST_QOS_POLICIES => self.list_qos_policies(parse(name, args)?).await,
            tools::CREATE_QOS_POLICY => self.create_qos_policy(parse(name, args)?).await,
            tools::UPDATE_QOS_POLICY => self.update_qos_policy(parse(name, args)?).await,
            tools::DELETE_QOS_POLICY => self.delete_qos_policy(parse(name, args)?).await,
            tools::LIST_EXPORT_POLICIES => self.list_nfs_export_policies(parse(name, args)?).await,
            tools::CREATE_EXPORT_POLICY => self.create_nfs_export_policy(parse(name, args)?).await,
            tools::UPDATE_EXPORT_POLICY => self.update_nfs_export_policy(parse(name, args)?).await,
            tools::DELETE_EXPORT_POLICY => self.delete_nfs_export_policy(parse(name, args)?).await,
            tools::CREATE_EXPORT_RULE => self.create_nfs_export_rule(parse(name, args)?).await,
            tools::UPDATE_EXPORT_RULE => self.update_nfs_export_rule(parse(name, args)?).await,
            tools::DELETE_EXPORT_RULE => self.delete_nfs_export_rule(parse(name, args)?).await,
            tools::LIST_CIFS_SHARES => self.list_cifs_shares(parse(name, args)?).await,
            tools::CREATE_CIFS_SHARE => self.create_cifs_share(parse(name, args)?).await,
            tools::UPDATE_CIFS_SHARE => self.update_cifs_share(parse(name, args)?).await,
            tools::DELETE_CIFS_SHARE => self.delete_cifs_share(parse(name, args)?).await,
            other => Err(OpError::UnknownTool(other.to_string())),
        }
    }

    pub(crate) fn client(&self, cluster: &str) -> Result<&RestClient, OpError> {
        self.clients
            .get(cluster)
            .ok_or_else(|| OpError::UnknownTarget(cluster.to_string()))
    }

    /// Take the cluster's write lock or fail fast
    pub(crate) fn write_lock(&self, cluster: &str) -> Result<WriteGuard, OpError> {
        self.locks
            .try_lock(cluster)
            .ok_or_else(|| OpError::WriteInProgress(cluster.to_string()))
    }

    /// Wait for the job a mutation started, if it started one
    pub(crate) async fn finish(
        &self,
        client: &RestClient,
        job: Option<JobHandle>,
    ) -> Result<(), OpError> {
        let Some(job) = job else {
            return Ok(());
        };
        JobPoller::new(client)
            .with_interval(self.options.poll_interval)
            .wait(job, self.options.job_timeout)
            .await?;
        Ok(())
    }
}

/// Find the single record a name refers to
///
/// Zero matches and several matches are both errors; the caller supplies
/// the wording for each.
pub(crate) async fn lookup_one(
    client: &RestClient,
    path: &str,
    query: &[(&str, &str)],
    missing: impl FnOnce() -> String,
    ambiguous: impl FnOnce(usize) -> String,
) -> Result<Record, OpError> {
    let found: Collection = client.get_json(path, query).await?;
    match found.num_records {
        0 => Err(OpError::NotFound(missing())),
        1 => found
            .records
            .into_iter()
            .next()
            .ok_or_else(|| OpError::NotFound(missing())),
        n => Err(OpError::Validation(ambiguous(n))),
    }
}

/// Names in a collection, or `empty` when there are none
pub(crate) async fn list_names(
    client: &RestClient,
    path: &str,
    query: &[(&str, &str)],
    empty: impl FnOnce() -> String,
) -> Result<String, OpError> {
    let found: Collection = client.get_json(path, query).await?;
    if found.num_records == 0 {
        return Err(OpError::NotFound(empty()));
    }
    Ok(found.names().join(","))
}

fn parse<T: DeserializeOwned>(tool: &str, args: serde_json::Value) -> Result<T, OpError> {
    // Tools without arguments may be called with `null`
    let args = if args.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|source| OpError::Arguments {
        tool: tool.to_string(),
        source,
    })
}

/// Optional `svm` query filter
pub(crate) fn svm_filter(svm: &str) -> Vec<(&'static str, &str)> {
    if svm.is_empty() {
        Vec::new()
    } else {
        vec![("svm", svm)]
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
