// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `filer schedule` - Compile a cron expression offline

use anyhow::Result;
use clap::Args;
use filer_core::compile;

#[derive(Args)]
pub struct ScheduleArgs {
    /// Five-field cron expression, e.g. "5 1 * * *"
    pub expr: String,

    /// Name to give the compiled schedule
    #[arg(long, default_value = "schedule")]
    pub name: String,
}

/// The compiled per-field lists as pretty JSON
pub fn handle(args: &ScheduleArgs) -> Result<String> {
    let spec = compile(&args.name, &args.expr)?;
    Ok(serde_json::to_string_pretty(&spec)?)
}
