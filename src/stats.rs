// File: stats.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022-2025
// - Volker Schwaberow <volker@schwaberow.de>

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Run-wide counters shared by all workers.
#[derive(Debug, Default)]
pub struct ScanStats {
    total_endpoints: AtomicU64,
    unreachable_endpoints: AtomicU64,
    failed_baselines: AtomicU64,
    reported_endpoints: AtomicU64,
    divergences: AtomicU64,
    successful_probes: AtomicU64,
    failed_probes: AtomicU64,
    start_time: Mutex<Option<DateTime<Utc>>>,
    end_time: Mutex<Option<DateTime<Utc>>>,
}

impl ScanStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self, total_endpoints: u64) {
        self.total_endpoints.store(total_endpoints, Ordering::Relaxed);
        if let Ok(mut start) = self.start_time.lock() {
            *start = Some(Utc::now());
        }
    }

    pub fn finish(&self) {
        if let Ok(mut end) = self.end_time.lock() {
            *end = Some(Utc::now());
        }
    }

    pub fn add_unreachable(&self) {
        self.unreachable_endpoints.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_failed_baseline(&self) {
        self.failed_baselines.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_report(&self, divergences: u64) {
        self.reported_endpoints.fetch_add(1, Ordering::Relaxed);
        self.divergences.fetch_add(divergences, Ordering::Relaxed);
    }

    pub fn add_probes(&self, successful: u64, failed: u64) {
        self.successful_probes.fetch_add(successful, Ordering::Relaxed);
        self.failed_probes.fetch_add(failed, Ordering::Relaxed);
    }

    pub fn total_endpoints(&self) -> u64 {
        self.total_endpoints.load(Ordering::Relaxed)
    }

    pub fn unreachable_endpoints(&self) -> u64 {
        self.unreachable_endpoints.load(Ordering::Relaxed)
    }

    pub fn failed_baselines(&self) -> u64 {
        self.failed_baselines.load(Ordering::Relaxed)
    }

    pub fn reported_endpoints(&self) -> u64 {
        self.reported_endpoints.load(Ordering::Relaxed)
    }

    pub fn divergences(&self) -> u64 {
        self.divergences.load(Ordering::Relaxed)
    }

    pub fn successful_probes(&self) -> u64 {
        self.successful_probes.load(Ordering::Relaxed)
    }

    pub fn failed_probes(&self) -> u64 {
        self.failed_probes.load(Ordering::Relaxed)
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time.lock().ok().and_then(|t| *t)
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time.lock().ok().and_then(|t| *t)
    }

    pub fn elapsed_ms(&self) -> i64 {
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => (end - start).num_milliseconds(),
            _ => 0,
        }
    }
}

impl fmt::Display for ScanStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} endpoints. Reported: {}. Unreachable: {}. Baseline failed: {}. Divergent vhosts: {}. Probes ok: {}. Probes failed: {}. {} ms.",
            self.total_endpoints(),
            self.reported_endpoints(),
            self.unreachable_endpoints(),
            self.failed_baselines(),
            self.divergences(),
            self.successful_probes(),
            self.failed_probes(),
            self.elapsed_ms()
        )
    }
}
