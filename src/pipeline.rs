// File: pipeline.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ConfigParameter;
use crate::detector::{Protocol, ProtocolDetector, TcpPortCheck};
use crate::differ::{DifferenceReport, Differencer};
use crate::endpoint::Endpoint;
use crate::errors::VhostResult;
use crate::http::{HttpProber, ProbeOptions};
use crate::report::Reporter;
use crate::stats::ScanStats;
use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use log::{error, info, warn};
use std::fmt::Write;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

/// Bounded worker pool running detection and differencing per endpoint.
///
/// Workers push finished reports into a channel drained by a single reporter, so output is
/// never interleaved. Endpoints share nothing but the read-only candidate list.
#[derive(Clone)]
pub struct Pipeline {
    detector: Arc<ProtocolDetector>,
    differ: Arc<Differencer>,
    candidates: Arc<Vec<String>>,
    workers: usize,
    stats: Arc<ScanStats>,
    show_progress: bool,
}

impl Pipeline {
    pub fn new(
        detector: ProtocolDetector,
        differ: Differencer,
        candidates: Vec<String>,
        workers: usize,
    ) -> Self {
        Pipeline {
            detector: Arc::new(detector),
            differ: Arc::new(differ),
            candidates: Arc::new(candidates),
            workers: workers.max(1),
            stats: Arc::new(ScanStats::new()),
            show_progress: false,
        }
    }

    pub fn from_config(config: &ConfigParameter, candidates: Vec<String>) -> VhostResult<Self> {
        let prober = Arc::new(HttpProber::new(ProbeOptions::from_config(config))?);
        let port_check = Arc::new(TcpPortCheck::new(config.connect_timeout_duration()));
        let detector = ProtocolDetector::new(port_check, prober.clone());
        let differ = Differencer::new(prober, config.vhost_workers());
        Ok(Self::new(detector, differ, candidates, config.workers()))
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn stats(&self) -> Arc<ScanStats> {
        Arc::clone(&self.stats)
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub async fn process(&self, endpoint: &Endpoint) -> Option<DifferenceReport> {
        let protocol = self.detector.detect(endpoint).await;
        if protocol == Protocol::Unavailable {
            warn!("Endpoint {} unreachable over HTTPS and HTTP, skipping", endpoint);
            self.stats.add_unreachable();
            return None;
        }

        match self.differ.diff(endpoint, protocol, &self.candidates).await {
            Some(report) => {
                let failed = report.failed_probes as u64;
                let succeeded = (self.candidates.len() as u64 + 1).saturating_sub(failed);
                self.stats.add_probes(succeeded, failed);
                self.stats.add_report(report.divergences.len() as u64);
                Some(report)
            }
            None => {
                self.stats.add_probes(0, 1);
                self.stats.add_failed_baseline();
                None
            }
        }
    }

    /// Processes every endpoint and hands each report to `reporter`. Returns the report count.
    pub async fn run(&self, endpoints: Vec<Endpoint>, reporter: &mut dyn Reporter) -> usize {
        self.stats.start(endpoints.len() as u64);
        info!(
            "Probing {} endpoints with {} vhost candidates",
            endpoints.len(),
            self.candidates.len()
        );

        let pb = self.progress_bar(endpoints.len() as u64);
        let (tx, mut rx) = mpsc::channel::<DifferenceReport>(self.workers * 2);

        let producer = {
            let pipeline = self.clone();
            let pb = pb.clone();
            tokio::spawn(async move {
                let semaphore = Arc::new(Semaphore::new(pipeline.workers));
                for endpoint in endpoints {
                    let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                        break;
                    };
                    let pipeline = pipeline.clone();
                    let tx = tx.clone();
                    let pb = pb.clone();
                    tokio::spawn(async move {
                        let _permit = permit;
                        if let Some(report) = pipeline.process(&endpoint).await {
                            if tx.send(report).await.is_err() {
                                warn!("Report channel closed, dropping result for {}", endpoint);
                            }
                        }
                        pb.inc(1);
                    });
                }
            })
        };

        let mut emitted = 0;
        while let Some(report) = rx.recv().await {
            if let Err(e) = pb.suspend(|| reporter.report(&report)) {
                error!("Failed to write report for {}: {}", report.endpoint, e);
                continue;
            }
            emitted += 1;
        }

        if let Err(e) = producer.await {
            warn!("Endpoint dispatcher failed: {}", e);
        }
        if let Err(e) = reporter.finish() {
            error!("Failed to flush reports: {}", e);
        }
        pb.finish_and_clear();
        self.stats.finish();
        emitted
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
        ) {
            pb.set_style(
                style
                    .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
                        let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                    })
                    .progress_chars("█▉▊▋▌▍▎▏  "),
            );
        }
        pb
    }
}
