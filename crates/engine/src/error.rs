// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for operation handlers

use filer_adapters::{JobError, RestError};
use filer_core::{CredentialError, JobFailure, RemoteError, ScheduleError, SizeError};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors that end a tool call
#[derive(Debug, Error)]
pub enum OpError {
    #[error("cluster {0} not found")]
    UnknownTarget(String),
    #[error("failed to build client for cluster {cluster}: {source}")]
    Client {
        cluster: String,
        #[source]
        source: RestError,
    },
    #[error("{0}")]
    Validation(String),
    #[error("invalid arguments for {tool}: {source}")]
    Arguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error(transparent)]
    Size(#[from] SizeError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    /// The appliance has no object matching the request
    #[error("{0}")]
    NotFound(String),
    #[error("another write operation is in progress on cluster {0}, please try again")]
    WriteInProgress(String),
    #[error(transparent)]
    Credentials(CredentialError),
    #[error(transparent)]
    Remote(RemoteError),
    #[error("{0}")]
    Job(JobFailure),
    #[error("job {location} did not finish within {}", humantime::format_duration(*timeout))]
    Deadline { location: String, timeout: Duration },
    #[error("operation cancelled")]
    Cancelled,
    #[error(transparent)]
    Transport(RestError),
}

/// Failure classes a caller can act on differently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Validation,
    Credentials,
    Contention,
    Remote,
    JobFailure,
    Deadline,
    Cancelled,
    Transport,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Config => "config",
            ErrorKind::Validation => "validation",
            ErrorKind::Credentials => "credentials",
            ErrorKind::Contention => "contention",
            ErrorKind::Remote => "remote",
            ErrorKind::JobFailure => "job_failure",
            ErrorKind::Deadline => "deadline",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Transport => "transport",
        };
        write!(f, "{}", name)
    }
}

impl OpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OpError::UnknownTarget(_) | OpError::Client { .. } => ErrorKind::Config,
            OpError::Validation(_)
            | OpError::Arguments { .. }
            | OpError::UnknownTool(_)
            | OpError::Size(_)
            | OpError::Schedule(_) => ErrorKind::Validation,
            OpError::WriteInProgress(_) => ErrorKind::Contention,
            OpError::Credentials(_) => ErrorKind::Credentials,
            OpError::Remote(_) | OpError::NotFound(_) => ErrorKind::Remote,
            OpError::Job(_) => ErrorKind::JobFailure,
            OpError::Deadline { .. } => ErrorKind::Deadline,
            OpError::Cancelled => ErrorKind::Cancelled,
            OpError::Transport(_) => ErrorKind::Transport,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        OpError::Validation(message.into())
    }
}

impl From<RestError> for OpError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Credentials(err) => OpError::Credentials(err),
            RestError::Remote(err) => OpError::Remote(err),
            other => OpError::Transport(other),
        }
    }
}

impl From<JobError> for OpError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::Failed(failure) => OpError::Job(failure),
            JobError::DeadlineExceeded { location, timeout } => {
                OpError::Deadline { location, timeout }
            }
            JobError::Rest(err) => err.into(),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
