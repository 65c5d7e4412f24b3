// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake script runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::ScriptRunner;
use async_trait::async_trait;
use filer_core::{CredentialError, CredentialsScript, ScriptOutput};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Recorded script invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCall {
    pub path: PathBuf,
    pub addr: String,
    pub username: Option<String>,
}

/// Script runner that answers from a queue of canned outputs
///
/// Each call pops the next queued output; once the queue is empty the last
/// output is repeated. With nothing queued every call fails with
/// `MissingSecret`.
#[derive(Clone, Default)]
pub struct FakeScriptRunner {
    outputs: Arc<Mutex<VecDeque<ScriptOutput>>>,
    last: Arc<Mutex<Option<ScriptOutput>>>,
    calls: Arc<Mutex<Vec<ScriptCall>>>,
}

impl FakeScriptRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a password for the next call
    pub fn push_password(&self, password: &str) {
        self.push(ScriptOutput {
            password: Some(password.to_string()),
            ..Default::default()
        });
    }

    pub fn push(&self, output: ScriptOutput) {
        self.outputs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(output);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ScriptCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl ScriptRunner for FakeScriptRunner {
    async fn run(
        &self,
        script: &CredentialsScript,
        addr: &str,
        username: Option<&str>,
    ) -> Result<ScriptOutput, CredentialError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ScriptCall {
                path: script.path.clone(),
                addr: addr.to_string(),
                username: username.map(str::to_string),
            });

        let next = self
            .outputs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(output) = next {
            *last = Some(output);
        }
        last.clone().ok_or(CredentialError::MissingSecret)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
