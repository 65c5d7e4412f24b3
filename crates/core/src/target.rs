// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Managed-system inventory
//!
//! The inventory is the YAML document that enumerates every storage system
//! the operator has registered. It is loaded once at startup and shared
//! read-only with everything else.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading or validating the inventory
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error unmarshalling config: {0}")]
    Yaml(#[from] serde_saphyr::Error),
    #[error("target '{target}' is missing required field '{field}'")]
    MissingField { target: String, field: &'static str },
}

/// External program that prints credentials for a target
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsScript {
    #[serde(default)]
    pub path: PathBuf,
    /// Refresh schedule: `always`, empty, or a duration such as `1h`
    #[serde(default)]
    pub schedule: String,
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

/// One managed storage system
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    /// Target name (injected from map key)
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub addr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_script: Option<CredentialsScript>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_file: Option<PathBuf>,
    #[serde(default)]
    pub use_insecure_tls: bool,
}

impl TargetDescriptor {
    pub fn new(name: impl Into<String>, addr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            addr: addr.into(),
            ..Default::default()
        }
    }

    pub fn with_login(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_script(mut self, script: CredentialsScript) -> Self {
        self.credentials_script = Some(script);
        self
    }

    pub fn with_credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    /// Inline username, treating an empty string as absent
    pub fn inline_username(&self) -> Option<&str> {
        self.username.as_deref().filter(|u| !u.is_empty())
    }

    /// Base URL for the management API
    ///
    /// Bare addresses get `https://`; an address that already names a
    /// scheme is used as-is.
    pub fn base_url(&self) -> String {
        let addr = self.addr.trim_end_matches('/');
        if addr.starts_with("http://") || addr.starts_with("https://") {
            addr.to_string()
        } else {
            format!("https://{}", addr)
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.addr.trim().is_empty() {
            return Err(ConfigError::MissingField {
                target: self.name.clone(),
                field: "addr",
            });
        }
        if let Some(script) = &self.credentials_script {
            if script.path.as_os_str().is_empty() {
                return Err(ConfigError::MissingField {
                    target: self.name.clone(),
                    field: "credentials_script.path",
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawInventory {
    #[serde(default, alias = "Pollers")]
    targets: BTreeMap<String, TargetDescriptor>,
}

/// All registered targets, keyed by name
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    targets: BTreeMap<String, TargetDescriptor>,
}

impl Inventory {
    /// Parse and validate an inventory document
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawInventory = serde_saphyr::from_str(content)?;
        let mut targets = raw.targets;
        for (name, target) in targets.iter_mut() {
            target.name = name.clone();
            target.validate()?;
        }
        Ok(Self { targets })
    }

    /// Read and parse an inventory file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_targets(targets: impl IntoIterator<Item = TargetDescriptor>) -> Self {
        Self {
            targets: targets.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TargetDescriptor> {
        self.targets.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetDescriptor> {
        self.targets.values()
    }

    /// Target names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.targets.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Credentials stored in a sibling credentials file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileCredentials {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCredentialsFile {
    #[serde(default, alias = "Pollers")]
    targets: BTreeMap<String, FileCredentials>,
}

/// A credentials file: same document shape as the inventory, only the
/// login fields are read
#[derive(Debug, Clone, Default)]
pub struct CredentialsFile {
    entries: BTreeMap<String, FileCredentials>,
}

impl CredentialsFile {
    pub fn from_yaml(content: &str) -> Result<Self, serde_saphyr::Error> {
        let raw: RawCredentialsFile = serde_saphyr::from_str(content)?;
        Ok(Self {
            entries: raw.targets,
        })
    }

    /// Look up a target by exact name
    pub fn get(&self, target: &str) -> Option<&FileCredentials> {
        self.entries.get(target)
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
