// File: common/mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use vhostprobe::differ::{DifferenceReport, Differencer};
use vhostprobe::endpoint::{parse_endpoint, Endpoint};
use vhostprobe::errors::VhostResult;
use vhostprobe::http::{HttpProber, ProbeOptions};
use vhostprobe::pipeline::Pipeline;
use vhostprobe::report::Reporter;
use vhostprobe::{PortCheck, ProtocolDetector};
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn body(size: usize) -> String {
    "x".repeat(size)
}

/// Serves `baseline` bytes for any request and `size` bytes when the Host header matches.
pub async fn setup_vhost_server(baseline: usize, vhosts: &[(&str, usize)]) -> MockServer {
    let server = MockServer::start().await;
    for (host, size) in vhosts {
        Mock::given(method("GET"))
            .and(header("host", *host))
            .respond_with(ResponseTemplate::new(200).set_body_string(body(*size)))
            .with_priority(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body(baseline)))
        .mount(&server)
        .await;
    server
}

pub fn server_endpoint(server: &MockServer) -> Endpoint {
    parse_endpoint(&server.address().to_string()).unwrap()
}

pub fn test_prober(timeout: Duration) -> Arc<HttpProber> {
    Arc::new(
        HttpProber::new(ProbeOptions {
            timeout,
            ..ProbeOptions::default()
        })
        .unwrap(),
    )
}

/// Reports a fixed set of well-known ports as open regardless of address.
pub struct StubPorts(pub HashSet<u16>);

impl StubPorts {
    pub fn open(ports: &[u16]) -> Arc<Self> {
        Arc::new(StubPorts(ports.iter().copied().collect()))
    }
}

#[async_trait]
impl PortCheck for StubPorts {
    async fn is_open(&self, _ip: IpAddr, port: u16) -> bool {
        self.0.contains(&port)
    }
}

pub fn test_pipeline(
    open_ports: &[u16],
    timeout: Duration,
    vhosts: &[&str],
    workers: usize,
) -> Pipeline {
    let prober = test_prober(timeout);
    let detector = ProtocolDetector::new(StubPorts::open(open_ports), prober.clone());
    let differ = Differencer::new(prober, 4);
    Pipeline::new(
        detector,
        differ,
        vhosts.iter().map(|v| v.to_string()).collect(),
        workers,
    )
}

#[derive(Default)]
pub struct CapturingReporter {
    pub reports: Vec<DifferenceReport>,
    pub finished: bool,
}

impl Reporter for CapturingReporter {
    fn report(&mut self, report: &DifferenceReport) -> VhostResult<()> {
        self.reports.push(report.clone());
        Ok(())
    }

    fn finish(&mut self) -> VhostResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_setup() {
        let server = setup_vhost_server(10, &[]).await;
        assert!(!server.uri().is_empty());
        assert_eq!(server_endpoint(&server).port(), server.address().port());
    }
}
