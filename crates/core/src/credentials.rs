// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential material and the rules for refreshing it
//!
//! This module is pure: it knows what a resolved credential looks like, how
//! to read a credentials script's output, and when a cached value is still
//! fresh. Running scripts and reading files live in the adapters crate.

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Refresh interval used when a schedule string cannot be parsed
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(24 * 60 * 60);

/// Errors from resolving credentials
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credentials_script {path} could not be started: {source}")]
    ScriptSpawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("credentials_script timed out after {}", humantime::format_duration(*timeout))]
    ScriptTimeout { path: PathBuf, timeout: Duration },
    #[error("credentials_script execution failed: {status} (stderr: {stderr})")]
    ScriptFailed { status: ExitStatus, stderr: String },
    #[error("failed to parse credentials_script YAML output: {0}")]
    ScriptOutput(#[source] serde_saphyr::Error),
    #[error("credentials_script must return either 'password' or 'authToken' field")]
    MissingSecret,
    #[error("failed to read credentials_file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse credentials_file {path}: {source}")]
    FileParse {
        path: PathBuf,
        #[source]
        source: serde_saphyr::Error,
    },
    #[error("target '{target}' not found in credentials_file {path}")]
    TargetNotInFile { target: String, path: PathBuf },
}

/// The secret half of a credential
#[derive(Clone, PartialEq, Eq)]
pub enum Secret {
    Password(String),
    Token(String),
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Secret::Password(_) => write!(f, "Password(***)"),
            Secret::Token(_) => write!(f, "Token(***)"),
        }
    }
}

/// Credentials ready to attach to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub secret: Secret,
}

impl Credentials {
    pub fn password(username: Option<String>, password: impl Into<String>) -> Self {
        Self {
            username,
            secret: Secret::Password(password.into()),
        }
    }

    pub fn token(username: Option<String>, token: impl Into<String>) -> Self {
        Self {
            username,
            secret: Secret::Token(token.into()),
        }
    }

    /// Username for basic auth, empty when none is known
    pub fn username_or_empty(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }
}

/// Document printed on stdout by a credentials script
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScriptOutput {
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, rename = "authToken")]
    pub auth_token: Option<String>,
}

impl ScriptOutput {
    pub fn parse(stdout: &str) -> Result<Self, CredentialError> {
        let output: ScriptOutput =
            serde_saphyr::from_str(stdout).map_err(CredentialError::ScriptOutput)?;
        if non_empty(&output.password).is_none() && non_empty(&output.auth_token).is_none() {
            return Err(CredentialError::MissingSecret);
        }
        Ok(output)
    }

    /// Combine with the descriptor's inline username
    ///
    /// A token takes precedence over a password when both are printed.
    pub fn into_credentials(self, inline_username: Option<&str>) -> Credentials {
        let username = non_empty(&self.username)
            .map(str::to_string)
            .or_else(|| inline_username.map(str::to_string));
        match (non_empty(&self.auth_token), non_empty(&self.password)) {
            (Some(token), _) => Credentials::token(username, token),
            (None, password) => Credentials::password(username, password.unwrap_or_default()),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// How long script-derived credentials stay cached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshSchedule {
    /// Run the script on every resolution
    Always,
    /// Reuse the cached value while younger than this
    Every(Duration),
}

impl RefreshSchedule {
    /// `always` or empty means every call; anything else is a duration,
    /// falling back to 24 hours when unparsable
    ///
    /// Fractional amounts such as `1.5h` are accepted alongside the
    /// humantime forms.
    pub fn parse(schedule: &str) -> Self {
        let schedule = schedule.trim();
        if schedule.is_empty() || schedule == "always" {
            return RefreshSchedule::Always;
        }
        match humantime::parse_duration(schedule) {
            Ok(duration) => RefreshSchedule::Every(duration),
            Err(e) => match parse_fractional(schedule) {
                Some(duration) => RefreshSchedule::Every(duration),
                None => {
                    tracing::warn!(schedule, error = %e, "invalid refresh schedule, using 24h");
                    RefreshSchedule::Every(DEFAULT_REFRESH)
                }
            },
        }
    }

    /// A value resolved at `resolved_at` may be served at `now`
    pub fn is_fresh(&self, resolved_at: Instant, now: Instant) -> bool {
        match self {
            RefreshSchedule::Always => false,
            RefreshSchedule::Every(max_age) => now.saturating_duration_since(resolved_at) < *max_age,
        }
    }
}

/// Sum of `<number><unit>` terms where the number may carry a fraction
fn parse_fractional(input: &str) -> Option<Duration> {
    let mut total = 0.0_f64;
    let mut rest = input;
    while !rest.is_empty() {
        let split = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(split);
        let amount: f64 = number.parse().ok()?;
        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);
        let seconds = match unit {
            "ns" => 1e-9,
            "us" | "µs" => 1e-6,
            "ms" => 1e-3,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            _ => return None,
        };
        total += amount * seconds;
        rest = next;
    }
    Duration::try_from_secs_f64(total).ok()
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;
