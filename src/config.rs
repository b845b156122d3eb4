// File: config.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::report::ReportFormat;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ConfigParameter {
    timeout: u64,
    connect_timeout: u64,
    verify_certificates: bool,
    workers: usize,
    vhost_workers: usize,
    format: ReportFormat,
    offline: bool,
    scanner_binary: String,
    scanner_rate: u32,
    port_range: String,
    scan_output: PathBuf,
    save_endpoints: Option<PathBuf>,
    suppress_stats: bool,
    show_unresponsive: bool,
    user_agent: String,
}

impl Default for ConfigParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParameter {
    pub fn new() -> Self {
        Self {
            timeout: 5,
            connect_timeout: 3,
            verify_certificates: false,
            workers: 10,
            vhost_workers: 10,
            format: ReportFormat::Text,
            offline: false,
            scanner_binary: "masscan".to_string(),
            scanner_rate: 50000,
            port_range: "1-65535".to_string(),
            scan_output: PathBuf::from("masscan_output.txt"),
            save_endpoints: None,
            suppress_stats: false,
            show_unresponsive: false,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn set_timeout(&mut self, timeout: u64) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn set_connect_timeout(&mut self, connect_timeout: u64) {
        self.connect_timeout = connect_timeout;
    }

    pub fn connect_timeout(&self) -> u64 {
        self.connect_timeout
    }

    pub fn connect_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn set_verify_certificates(&mut self, verify_certificates: bool) {
        self.verify_certificates = verify_certificates;
    }

    pub fn verify_certificates(&self) -> bool {
        self.verify_certificates
    }

    pub fn set_workers(&mut self, workers: usize) {
        self.workers = workers.max(1);
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn set_vhost_workers(&mut self, vhost_workers: usize) {
        self.vhost_workers = vhost_workers.max(1);
    }

    pub fn vhost_workers(&self) -> usize {
        self.vhost_workers
    }

    pub fn set_format(&mut self, format: ReportFormat) {
        self.format = format;
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn offline(&self) -> bool {
        self.offline
    }

    pub fn set_scanner_binary(&mut self, scanner_binary: &str) {
        self.scanner_binary = scanner_binary.to_string();
    }

    pub fn scanner_binary(&self) -> &str {
        &self.scanner_binary
    }

    pub fn set_scanner_rate(&mut self, scanner_rate: u32) {
        self.scanner_rate = scanner_rate;
    }

    pub fn scanner_rate(&self) -> u32 {
        self.scanner_rate
    }

    pub fn set_port_range(&mut self, port_range: &str) {
        self.port_range = port_range.to_string();
    }

    pub fn port_range(&self) -> &str {
        &self.port_range
    }

    pub fn set_scan_output(&mut self, scan_output: &Path) {
        self.scan_output = scan_output.to_path_buf();
    }

    pub fn scan_output(&self) -> &Path {
        &self.scan_output
    }

    pub fn set_save_endpoints(&mut self, save_endpoints: Option<PathBuf>) {
        self.save_endpoints = save_endpoints;
    }

    pub fn save_endpoints(&self) -> Option<&Path> {
        self.save_endpoints.as_deref()
    }

    pub fn suppress_stats(&self) -> bool {
        self.suppress_stats
    }

    pub fn set_suppress_stats(&mut self, suppress_stats: bool) {
        self.suppress_stats = suppress_stats;
    }

    pub fn show_unresponsive(&self) -> bool {
        self.show_unresponsive
    }

    pub fn set_show_unresponsive(&mut self, show_unresponsive: bool) {
        self.show_unresponsive = show_unresponsive;
    }

    pub fn set_user_agent(&mut self, user_agent: &str) {
        self.user_agent = user_agent.to_string();
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
