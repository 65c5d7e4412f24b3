// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors reported by the appliance itself

use serde::Deserialize;
use thiserror::Error;

/// An HTTP status of 400 or above, with the appliance's error object
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP {status}: message: {message} code: {code}")]
pub struct RemoteError {
    pub status: u16,
    pub code: String,
    pub message: String,
    /// Field or object the appliance blames, when it names one
    pub target: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<ErrorObject>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorObject {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: String,
    #[serde(default)]
    target: String,
}

impl RemoteError {
    /// Decode `{"error": {...}}`, falling back to the raw body as the message
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(ErrorBody {
                error: Some(object),
            }) => Self {
                status,
                code: object.code,
                message: object.message,
                target: object.target,
            },
            _ => Self {
                status,
                code: String::new(),
                message: String::from_utf8_lossy(body).trim().to_string(),
                target: String::new(),
            },
        }
    }
}
