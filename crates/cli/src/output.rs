// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render a list of items, one per line or as a JSON array
pub fn render_list<T, F>(items: &[T], format: OutputFormat, line: F) -> anyhow::Result<String>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    match format {
        OutputFormat::Text => Ok(items.iter().map(line).collect::<Vec<_>>().join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
    }
}

/// Print a rendered block, skipping empty output
pub fn print_block(block: &str) {
    if !block.is_empty() {
        println!("{}", block);
    }
}
