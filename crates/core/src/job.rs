// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Asynchronous job resource
//!
//! Mutations the appliance processes in the background return a job
//! reference. The job moves through `queued`, `running` and `paused` until
//! it reaches `success` or `failure`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Overall deadline used by every handler that waits on a job
pub const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(3 * 60);

/// Fixed poll interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// State of a job as reported by the appliance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Running,
    Paused,
    Success,
    Failure,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Success | JobState::Failure)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobState::Queued => write!(f, "queued"),
            JobState::Running => write!(f, "running"),
            JobState::Paused => write!(f, "paused"),
            JobState::Success => write!(f, "success"),
            JobState::Failure => write!(f, "failure"),
        }
    }
}

/// Nested error object on a failed job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Body of `GET /api/cluster/jobs/{uuid}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub description: String,
    pub state: JobState,
    #[serde(default, deserialize_with = "code_as_string")]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JobErrorDetail>,
}

/// The appliance reports job codes as numbers; keep them as text
fn code_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Terminal failure of a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFailure {
    pub code: String,
    pub message: String,
}

impl fmt::Display for JobFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            write!(f, "job failed: {}", self.message)
        } else {
            write!(f, "job failed: {} (code {})", self.message, self.code)
        }
    }
}

/// What one observation of a job means for the waiter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Pending(JobState),
    Succeeded,
    Failed(JobFailure),
}

impl JobRecord {
    /// Evaluate the state machine for this observation
    ///
    /// A failure prefers the nested error's code and message over the
    /// top-level pair when the nested object carries any.
    pub fn outcome(&self) -> JobOutcome {
        match self.state {
            JobState::Success => JobOutcome::Succeeded,
            JobState::Failure => {
                let failure = match &self.error {
                    Some(detail) if !detail.code.is_empty() || !detail.message.is_empty() => {
                        JobFailure {
                            code: detail.code.clone(),
                            message: detail.message.clone(),
                        }
                    }
                    _ => JobFailure {
                        code: self.code.clone(),
                        message: self.message.clone(),
                    },
                };
                JobOutcome::Failed(failure)
            }
            state => JobOutcome::Pending(state),
        }
    }
}

/// Reference to a job created by a mutation
///
/// Waiting consumes the handle, so a job observed terminal cannot be
/// polled again through it.
#[derive(Debug, PartialEq, Eq)]
pub struct JobHandle {
    location: String,
}

/// A 201/202 body that does not name a job
#[derive(Debug, Error)]
pub enum JobLinkError {
    #[error("invalid job reference: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no job uuid in response")]
    Missing,
}

#[derive(Debug, Deserialize)]
struct JobLink {
    uuid: String,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    job: Option<JobLink>,
}

impl JobHandle {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// Handle for a job uuid on the cluster jobs collection
    pub fn for_uuid(uuid: &str) -> Self {
        Self::new(format!("/api/cluster/jobs/{}", uuid))
    }

    /// Extract the job from a 201/202 response body
    pub fn from_response(body: &[u8]) -> Result<Self, JobLinkError> {
        let response: SubmitResponse = serde_json::from_slice(body)?;
        response
            .job
            .filter(|job| !job.uuid.is_empty())
            .map(|job| Self::for_uuid(&job.uuid))
            .ok_or(JobLinkError::Missing)
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.location)
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
