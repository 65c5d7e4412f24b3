// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `filer tools` and `filer targets`

use crate::output::{render_list, OutputFormat};
use anyhow::Result;
use filer_core::Inventory;
use filer_engine::{ToolRegistry, ToolSpec};

/// Registered tools with their descriptions
pub fn tools(read_only: bool, format: OutputFormat) -> Result<String> {
    let registry = ToolRegistry::new(read_only);
    let specs: Vec<ToolSpec> = registry.iter().copied().collect();
    render_list(&specs, format, |spec| {
        format!("{:<26} {}", spec.name, spec.description)
    })
}

/// Target names from the inventory, sorted
pub fn targets(inventory: &Inventory, format: OutputFormat) -> Result<String> {
    let names = inventory.names();
    render_list(&names, format, |name| name.to_string())
}
