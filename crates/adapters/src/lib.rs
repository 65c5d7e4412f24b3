// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: credential scripts and files, the appliance
//! REST API, and job polling

pub mod credentials;
pub mod poller;
pub mod rest;
pub mod script;
pub mod traced;

#[cfg(test)]
mod testing;

pub use credentials::CredentialResolver;
pub use poller::{JobError, JobPoller};
pub use rest::{RestClient, RestError};
pub use script::{ProcessScriptRunner, ScriptRunner, DEFAULT_SCRIPT_TIMEOUT};
pub use traced::TracedScriptRunner;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use script::{FakeScriptRunner, ScriptCall};
