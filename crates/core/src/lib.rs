// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! filer-core: domain model for the storage appliance orchestration layer
//!
//! This crate provides:
//! - The target inventory and its validation
//! - Credential types and refresh rules
//! - The per-target write-lock registry
//! - The asynchronous job state machine
//! - The schedule compiler
//! - Resource payloads and remote errors

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod credentials;
pub mod job;
pub mod lock;
pub mod remote;
pub mod resources;
pub mod schedule;
pub mod size;
pub mod target;

pub use credentials::{CredentialError, Credentials, RefreshSchedule, ScriptOutput, Secret};
pub use job::{
    JobFailure, JobHandle, JobLinkError, JobOutcome, JobRecord, JobState, DEFAULT_JOB_TIMEOUT,
    DEFAULT_POLL_INTERVAL,
};
pub use lock::{LockRegistry, ReadGuard, WriteGuard};
pub use remote::RemoteError;
pub use schedule::{compile, ScheduleError, ScheduleSpec};
pub use size::{parse_size, SizeError};
pub use target::{ConfigError, CredentialsFile, CredentialsScript, Inventory, TargetDescriptor};
