// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential resolution and caching
//!
//! Sources are tried in priority order: credentials script, credentials
//! file, inline login. Only script results are cached.

use crate::script::{ProcessScriptRunner, ScriptRunner};
use crate::traced::TracedScriptRunner;
use dashmap::DashMap;
use filer_core::target::{CredentialsFile, CredentialsScript};
use filer_core::{CredentialError, Credentials, RefreshSchedule, TargetDescriptor};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct Cached {
    credentials: Credentials,
    resolved_at: Instant,
}

type Entry = Arc<Mutex<Option<Cached>>>;

/// Resolves credentials for targets, caching script output per target
///
/// Construct once and clone into every client; clones share the cache.
#[derive(Clone)]
pub struct CredentialResolver {
    runner: Arc<dyn ScriptRunner>,
    cache: Arc<DashMap<String, Entry>>,
}

impl std::fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("cached_targets", &self.cache.len())
            .finish()
    }
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new(TracedScriptRunner::new(ProcessScriptRunner::new()))
    }
}

impl CredentialResolver {
    pub fn new(runner: impl ScriptRunner) -> Self {
        Self {
            runner: Arc::new(runner),
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Resolve credentials for `target`
    pub async fn resolve(&self, target: &TargetDescriptor) -> Result<Credentials, CredentialError> {
        if let Some(script) = target
            .credentials_script
            .as_ref()
            .filter(|s| !s.path.as_os_str().is_empty())
        {
            return self.resolve_script(target, script).await;
        }

        if let Some(path) = target
            .credentials_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
        {
            return load_file_credentials(path, target).await;
        }

        Ok(Credentials::password(
            target.inline_username().map(str::to_string),
            target.password.clone().unwrap_or_default(),
        ))
    }

    fn entry(&self, name: &str) -> Entry {
        if let Some(entry) = self.cache.get(name) {
            return Arc::clone(entry.value());
        }
        Arc::clone(self.cache.entry(name.to_string()).or_default().value())
    }

    async fn resolve_script(
        &self,
        target: &TargetDescriptor,
        script: &CredentialsScript,
    ) -> Result<Credentials, CredentialError> {
        let schedule = RefreshSchedule::parse(&script.schedule);
        let entry = self.entry(&target.name);

        // Held across the script run so one refresh serves every waiter
        let mut cached = entry.lock().await;
        if let Some(hit) = cached.as_ref() {
            if schedule.is_fresh(hit.resolved_at, Instant::now()) {
                tracing::debug!(cluster = %target.name, "using cached credentials");
                return Ok(hit.credentials.clone());
            }
        }

        let output = self
            .runner
            .run(script, &target.addr, target.inline_username())
            .await?;
        let credentials = output.into_credentials(target.inline_username());
        *cached = Some(Cached {
            credentials: credentials.clone(),
            resolved_at: Instant::now(),
        });
        Ok(credentials)
    }
}

/// Read login fields for `target` from a credentials file
///
/// The file is re-read on every call.
pub async fn load_file_credentials(
    path: &Path,
    target: &TargetDescriptor,
) -> Result<Credentials, CredentialError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CredentialError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
    let file = CredentialsFile::from_yaml(&content).map_err(|source| CredentialError::FileParse {
        path: path.to_path_buf(),
        source,
    })?;
    let entry = file
        .get(&target.name)
        .ok_or_else(|| CredentialError::TargetNotInFile {
            target: target.name.clone(),
            path: path.to_path_buf(),
        })?;

    let username = entry
        .username
        .as_deref()
        .filter(|u| !u.is_empty())
        .or(target.inline_username())
        .map(str::to_string);
    Ok(Credentials::password(
        username,
        entry.password.clone().unwrap_or_default(),
    ))
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;
