// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron schedule tool

use crate::app::App;
use crate::error::OpError;
use crate::snapshot::SCHEDULES;
use filer_core::compile;
use reqwest::Method;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleArgs {
    pub cluster_name: String,
    pub name: String,
    /// Five-field cron expression, e.g. `5 1 * * *`
    pub cron_expression: String,
}

impl App {
    /// Compile `cron_expression` and create the schedule on the cluster
    pub async fn create_schedule(&self, args: ScheduleArgs) -> Result<String, OpError> {
        let client = self.client(&args.cluster_name)?;
        let _guard = self.write_lock(&args.cluster_name)?;

        if args.name.is_empty() {
            return Err(OpError::validation("schedule name is required"));
        }
        if args.cron_expression.is_empty() {
            return Err(OpError::validation("schedule cron expression is required"));
        }
        let spec = compile(&args.name, &args.cron_expression)?;
        tracing::debug!(cluster = %args.cluster_name, schedule = %spec, "compiled schedule");

        let job = client
            .submit(Method::POST, SCHEDULES, &spec.request_body())
            .await?;
        self.finish(client, job).await?;
        Ok("Schedule created successfully".to_string())
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
