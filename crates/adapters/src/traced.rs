// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::script::ScriptRunner;
use async_trait::async_trait;
use filer_core::{CredentialError, CredentialsScript, ScriptOutput};
use tracing::Instrument;

/// Wrapper that adds tracing to any ScriptRunner
#[derive(Clone)]
pub struct TracedScriptRunner<S> {
    inner: S,
}

impl<S> TracedScriptRunner<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: ScriptRunner> ScriptRunner for TracedScriptRunner<S> {
    async fn run(
        &self,
        script: &CredentialsScript,
        addr: &str,
        username: Option<&str>,
    ) -> Result<ScriptOutput, CredentialError> {
        let span = tracing::info_span!("credentials.script", path = %script.path.display(), addr);

        async {
            tracing::debug!(with_username = username.is_some(), "running");

            let start = std::time::Instant::now();
            let result = self.inner.run(script, addr, username).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(_) => tracing::info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    "credentials refreshed"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "credentials script failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
