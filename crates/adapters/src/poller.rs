// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Waits for appliance jobs to finish

use crate::rest::{RestClient, RestError};
use filer_core::{JobFailure, JobHandle, JobOutcome, JobRecord, DEFAULT_POLL_INTERVAL};
use std::time::Duration;
use thiserror::Error;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::Instrument;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("{0}")]
    Failed(JobFailure),
    #[error("job {location} did not finish within {}", humantime::format_duration(*timeout))]
    DeadlineExceeded { location: String, timeout: Duration },
    #[error(transparent)]
    Rest(#[from] RestError),
}

/// Polls a job at a fixed interval until it is terminal
///
/// The job is fetched once immediately and then once per interval. A
/// request error ends the wait at once.
#[derive(Debug, Clone, Copy)]
pub struct JobPoller<'a> {
    client: &'a RestClient,
    interval: Duration,
}

impl<'a> JobPoller<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self {
            client,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Wait for `job` to succeed, fail, or outlive `timeout`
    pub async fn wait(&self, job: JobHandle, timeout: Duration) -> Result<(), JobError> {
        let span = tracing::info_span!("job.wait", job = %job, cluster = %self.client.target().name);
        let deadline = Instant::now() + timeout;

        async {
            match tokio::time::timeout_at(deadline, self.poll(&job)).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(timeout = %humantime::format_duration(timeout), "job deadline exceeded");
                    Err(JobError::DeadlineExceeded {
                        location: job.location().to_string(),
                        timeout,
                    })
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn poll(&self, job: &JobHandle) -> Result<(), JobError> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            let record: JobRecord = self.client.get_json(job.location(), &[]).await?;
            match record.outcome() {
                JobOutcome::Succeeded => {
                    tracing::info!("job succeeded");
                    return Ok(());
                }
                JobOutcome::Failed(failure) => {
                    tracing::warn!(code = %failure.code, message = %failure.message, "job failed");
                    return Err(JobError::Failed(failure));
                }
                JobOutcome::Pending(state) => {
                    tracing::debug!(%state, "job pending");
                }
            }
            ticker.tick().await;
        }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
