// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child-process script runner

use super::ScriptRunner;
use async_trait::async_trait;
use filer_core::{CredentialError, CredentialsScript, ScriptOutput};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Applied when the script block sets no timeout
pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs the script as a child process
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessScriptRunner;

impl ProcessScriptRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScriptRunner for ProcessScriptRunner {
    async fn run(
        &self,
        script: &CredentialsScript,
        addr: &str,
        username: Option<&str>,
    ) -> Result<ScriptOutput, CredentialError> {
        let timeout = script.timeout.unwrap_or(DEFAULT_SCRIPT_TIMEOUT);

        let mut cmd = Command::new(&script.path);
        cmd.arg(addr);
        if let Some(username) = username {
            cmd.arg(username);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|source| CredentialError::ScriptSpawn {
            path: script.path.clone(),
            source,
        })?;

        // Timing out drops the child, which kills it
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| CredentialError::ScriptSpawn {
                path: script.path.clone(),
                source,
            })?,
            Err(_) => {
                return Err(CredentialError::ScriptTimeout {
                    path: script.path.clone(),
                    timeout,
                })
            }
        };

        if !output.status.success() {
            return Err(CredentialError::ScriptFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        ScriptOutput::parse(&String::from_utf8_lossy(&output.stdout))
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
