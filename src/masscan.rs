// File: masscan.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ConfigParameter;
use crate::endpoint::{parse_endpoint, read_lines, Endpoint};
use crate::errors::{VhostError, VhostResult};
use log::{debug, info, trace};
use std::path::{Path, PathBuf};
use tokio::process::Command;

const OPEN_MARKER: &str = "open";

/// Runs the external port scanner and collects the open endpoints it reports.
#[derive(Debug, Clone)]
pub struct MasscanRunner {
    binary: String,
    port_range: String,
    rate: u32,
    output_file: PathBuf,
}

impl MasscanRunner {
    pub fn new(binary: &str, port_range: &str, rate: u32, output_file: &Path) -> Self {
        MasscanRunner {
            binary: binary.to_string(),
            port_range: port_range.to_string(),
            rate,
            output_file: output_file.to_path_buf(),
        }
    }

    pub fn from_config(config: &ConfigParameter) -> Self {
        Self::new(
            config.scanner_binary(),
            config.port_range(),
            config.scanner_rate(),
            config.scan_output(),
        )
    }

    pub fn args(&self, input_file: &Path) -> Vec<String> {
        vec![
            "-iL".to_string(),
            input_file.display().to_string(),
            format!("-p{}", self.port_range),
            "--rate".to_string(),
            self.rate.to_string(),
            "-oL".to_string(),
            self.output_file.display().to_string(),
        ]
    }

    pub async fn run(&self, input_file: &Path) -> VhostResult<Vec<Endpoint>> {
        info!("Scanning all IPs from {} with {}", input_file.display(), self.binary);
        let args = self.args(input_file);
        debug!("Scanner command: {} {}", self.binary, args.join(" "));

        let status = Command::new(&self.binary)
            .args(&args)
            .status()
            .await
            .map_err(VhostError::ScannerSpawn)?;

        if !status.success() {
            return Err(VhostError::ScannerFailure(format!(
                "{} exited with {}",
                self.binary, status
            )));
        }

        let lines = read_lines(&self.output_file).map_err(|e| {
            VhostError::ScannerFailure(format!("scanner output unavailable: {}", e))
        })?;
        let endpoints = parse_scanner_output(lines);
        info!("Scan completed. Found {} open ports.", endpoints.len());
        Ok(endpoints)
    }
}

/// Extracts endpoints from list-format scanner output.
///
/// Relevant lines look like `open tcp 443 10.0.0.1 1700000000`; everything else is skipped.
pub fn parse_scanner_output<I, S>(lines: I) -> Vec<Endpoint>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref();
            if !line.starts_with(OPEN_MARKER) {
                return None;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                trace!("Ignoring short scanner line: {}", line);
                return None;
            }
            match parse_endpoint(&format!("{}:{}", fields[3], fields[2])) {
                Ok(endpoint) => Some(endpoint),
                Err(e) => {
                    debug!("Ignoring scanner line '{}': {}", line, e);
                    None
                }
            }
        })
        .collect()
}
