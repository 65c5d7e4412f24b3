// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Filer operation handlers and tool catalogue

mod app;
mod cifs;
mod error;
mod nfs;
mod qos;
mod schedule;
mod snapshot;
mod tools;
mod volume;

#[cfg(test)]
mod testing;

pub use app::{App, AppOptions, ToolOutput};
pub use cifs::CifsShareArgs;
pub use error::{ErrorKind, OpError};
pub use nfs::{ExportPolicyArgs, ExportRuleArgs};
pub use qos::QosArgs;
pub use schedule::ScheduleArgs;
pub use snapshot::SnapshotPolicyArgs;
pub use tools::{Annotations, ToolRegistry, ToolSpec};
pub use volume::VolumeArgs;
