// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! filer - Storage appliance management tools

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{call, schedule, tools};
use filer_core::Inventory;
use output::{print_block, OutputFormat};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "filer",
    version,
    about = "Filer - Storage appliance management tools"
)]
struct Cli {
    /// Inventory of managed clusters
    #[arg(long, global = true, default_value = "filer.yaml")]
    config: PathBuf,

    /// Only expose tools that do not modify a cluster
    #[arg(long, global = true)]
    read_only: bool,

    /// Output format for listings
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available tools
    Tools,
    /// List the registered clusters
    Targets,
    /// Invoke a tool
    Call(call::CallArgs),
    /// Compile a cron expression and print the schedule lists
    Schedule(schedule::ScheduleArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging();

    match &cli.command {
        // Neither needs the inventory
        Commands::Tools => print_block(&tools::tools(cli.read_only, cli.format)?),
        Commands::Schedule(args) => print_block(&schedule::handle(args)?),

        Commands::Targets => {
            let inventory = load_inventory(&cli.config)?;
            print_block(&tools::targets(&inventory, cli.format)?);
        }
        Commands::Call(args) => {
            let inventory = load_inventory(&cli.config)?;
            let output = call::handle(args, &inventory, cli.read_only).await?;
            if output.is_error {
                eprintln!("error: {}", output.text);
                return Ok(ExitCode::FAILURE);
            }
            print_block(&output.text);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_inventory(path: &Path) -> Result<Inventory> {
    let inventory = Inventory::load(path)
        .with_context(|| format!("failed to load inventory from {}", path.display()))?;
    tracing::debug!(targets = inventory.len(), path = %path.display(), "inventory loaded");
    Ok(inventory)
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
