// File: differ.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::detector::Protocol;
use crate::endpoint::Endpoint;
use crate::http::{Probe, ProbeResult};
use futures::stream::{self, StreamExt};
use log::{debug, warn};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Divergence {
    pub vhost: String,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifferenceReport {
    pub endpoint: Endpoint,
    pub protocol: Protocol,
    pub url: String,
    pub baseline_size: usize,
    pub divergences: Vec<Divergence>,
    pub failed_probes: usize,
}

impl DifferenceReport {
    pub fn divergence(&self, vhost: &str) -> Option<usize> {
        self.divergences
            .iter()
            .find(|d| d.vhost == vhost)
            .map(|d| d.size)
    }

    pub fn has_divergences(&self) -> bool {
        !self.divergences.is_empty()
    }
}

/// Compares per-vhost response sizes against the no-override baseline of one endpoint.
pub struct Differencer {
    prober: Arc<dyn Probe>,
    concurrency: usize,
}

impl Differencer {
    pub fn new(prober: Arc<dyn Probe>, concurrency: usize) -> Self {
        Differencer {
            prober,
            concurrency: concurrency.max(1),
        }
    }

    /// Returns `None` when the protocol is unavailable or the baseline probe fails.
    pub async fn diff(
        &self,
        endpoint: &Endpoint,
        protocol: Protocol,
        candidates: &[String],
    ) -> Option<DifferenceReport> {
        let url = protocol.url_for(endpoint)?;

        let baseline_size = match self.prober.probe(&url, None).await {
            ProbeResult::Size(size) => size,
            ProbeResult::Failed(reason) => {
                warn!("Baseline request to {} failed: {}", url, reason);
                return None;
            }
        };
        debug!("Baseline for {}: {} bytes", url, baseline_size);

        // buffered() yields in input order, so divergences follow the candidate list.
        let results: Vec<(String, ProbeResult)> = stream::iter(candidates.iter().cloned())
            .map(|vhost| {
                let prober = Arc::clone(&self.prober);
                let url = url.clone();
                async move {
                    let result = prober.probe(&url, Some(&vhost)).await;
                    (vhost, result)
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut divergences = Vec::new();
        let mut failed_probes = 0;
        for (vhost, result) in results {
            match result {
                ProbeResult::Size(size) if size != baseline_size => {
                    divergences.push(Divergence { vhost, size });
                }
                ProbeResult::Size(_) => {}
                ProbeResult::Failed(reason) => {
                    debug!("Probe of {} on {} failed: {}", vhost, url, reason);
                    failed_probes += 1;
                }
            }
        }

        Some(DifferenceReport {
            endpoint: *endpoint,
            protocol,
            url,
            baseline_size,
            divergences,
            failed_probes,
        })
    }
}
