// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human size strings (`100MB`, `1.5T`, raw bytes)

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    #[error("size is empty")]
    Empty,
    #[error("invalid size unit '{0}'. Supported: KB, MB, GB, TB (or K, M, G, T), or raw bytes")]
    InvalidUnit(String),
    #[error("invalid size format '{0}'. Use '100MB', '2GB', '1TB', or raw bytes")]
    InvalidFormat(String),
}

const KIB: f64 = 1024.0;

/// Parse a size in bytes
///
/// Units are 1024-based and case-insensitive. A number with a unit may be
/// fractional; raw byte counts must be whole.
pub fn parse_size(input: &str) -> Result<u64, SizeError> {
    let size = input.trim();
    if size.is_empty() {
        return Err(SizeError::Empty);
    }

    let split = size
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(size.len());
    let (number, unit) = size.split_at(split);
    let number = number.trim();
    let unit = unit.trim();

    if unit.is_empty() {
        return number
            .parse::<u64>()
            .map_err(|_| SizeError::InvalidFormat(size.to_string()));
    }

    let value: f64 = number
        .parse()
        .map_err(|_| SizeError::InvalidFormat(size.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(SizeError::InvalidFormat(size.to_string()));
    }
    let multiplier = match unit.to_ascii_uppercase().as_str() {
        "K" | "KB" => KIB,
        "M" | "MB" => KIB * KIB,
        "G" | "GB" => KIB * KIB * KIB,
        "T" | "TB" => KIB * KIB * KIB * KIB,
        _ => return Err(SizeError::InvalidUnit(unit.to_string())),
    };
    Ok((value * multiplier) as u64)
}
