// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `filer call` - Invoke one tool against the inventory

use anyhow::{Context, Result};
use clap::Args;
use filer_adapters::CredentialResolver;
use filer_core::Inventory;
use filer_engine::{App, AppOptions, ToolOutput};
use tokio_util::sync::CancellationToken;

#[derive(Args)]
pub struct CallArgs {
    /// Tool name, as listed by `filer tools`
    pub tool: String,

    /// Tool arguments as a JSON object
    #[arg(long, default_value = "{}")]
    pub args: String,
}

pub async fn handle(args: &CallArgs, inventory: &Inventory, read_only: bool) -> Result<ToolOutput> {
    let input: serde_json::Value = serde_json::from_str(&args.args)
        .with_context(|| format!("--args is not valid JSON: {}", args.args))?;

    let options = AppOptions::default().with_read_only(read_only);
    let app = App::new(inventory, CredentialResolver::default(), options)?;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nCancelling...");
        interrupt.cancel();
    })?;

    Ok(app.call(&args.tool, input, &cancel).await)
}
