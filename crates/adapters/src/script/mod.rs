// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credentials script adapters

mod process;

pub use process::{ProcessScriptRunner, DEFAULT_SCRIPT_TIMEOUT};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeScriptRunner, ScriptCall};

use async_trait::async_trait;
use filer_core::{CredentialError, CredentialsScript, ScriptOutput};

/// Runs a credentials script for one target
///
/// The script receives the target address and, when configured, the inline
/// username. Dropping the returned future must stop the script.
#[async_trait]
pub trait ScriptRunner: Send + Sync + 'static {
    async fn run(
        &self,
        script: &CredentialsScript,
        addr: &str,
        username: Option<&str>,
    ) -> Result<ScriptOutput, CredentialError>;
}
