// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Error types for SVC layer planning.

use thiserror::Error;

/// Errors that can occur while planning spatial layers.
#[derive(Debug, Error)]
pub enum SvcError {
    /// A planning argument was outside its valid range.
    #[error("invalid argument '{name}': {value} (must be greater than zero)")]
    InvalidArgument { name: &'static str, value: u64 },

    /// Planner configuration failed validation.
    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),

    /// Failed to parse a TOML planner configuration.
    #[error("failed to parse planner config TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type alias for SVC planning operations.
pub type Result<T> = std::result::Result<T, SvcError>;

/// Reject a zero-valued argument.
pub(crate) fn require_positive(name: &'static str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(SvcError::InvalidArgument {
            name,
            value: u64::from(value),
        });
    }
    Ok(())
}
