// File: errors.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VhostError {
    #[error("Cannot read input file {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed entry '{line}': {reason}")]
    MalformedEntry { line: String, reason: String },

    #[error("Scanner failure: {0}")]
    ScannerFailure(String),

    #[error("Failed to start scanner: {0}")]
    ScannerSpawn(#[source] std::io::Error),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl VhostError {
    pub fn malformed(line: &str, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    /// Fatal errors abort the run before or during the scan phase.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::MalformedEntry { .. })
    }
}

pub type VhostResult<T> = Result<T, VhostError>;
