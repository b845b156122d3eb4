// File: http_integration_tests.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

mod common;

use common::*;
use serial_test::serial;
use std::time::Duration;
use vhostprobe::http::{Probe, ProbeFailure, ProbeResult};
use vhostprobe::{Protocol, ProtocolDetector};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
#[serial]
async fn test_probe_measures_body_length() {
    let server = setup_vhost_server(1234, &[]).await;
    let prober = test_prober(Duration::from_secs(5));

    let result = prober.probe(&server.uri(), None).await;
    assert_eq!(result, ProbeResult::Size(1234));
}

#[tokio::test]
#[serial]
async fn test_probe_overrides_host_header() {
    let server = setup_vhost_server(100, &[("admin.example.com", 321)]).await;
    let prober = test_prober(Duration::from_secs(5));

    assert_eq!(
        prober.probe(&server.uri(), Some("admin.example.com")).await,
        ProbeResult::Size(321)
    );
    assert_eq!(
        prober.probe(&server.uri(), Some("other.example.com")).await,
        ProbeResult::Size(100)
    );
}

#[tokio::test]
#[serial]
async fn test_error_status_is_still_measured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(header("host", "app.example.com"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .with_priority(1)
        .mount(&server)
        .await;

    let prober = test_prober(Duration::from_secs(5));
    assert_eq!(prober.probe(&server.uri(), None).await, ProbeResult::Size(9));
    assert_eq!(
        prober.probe(&server.uri(), Some("app.example.com")).await,
        ProbeResult::Size(19)
    );
}

#[tokio::test]
#[serial]
async fn test_redirects_are_not_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(302)
                .append_header("location", "/landing")
                .set_body_string("moved"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body(4096)))
        .mount(&server)
        .await;

    let prober = test_prober(Duration::from_secs(5));
    assert_eq!(
        prober.probe(&format!("{}/", server.uri()), None).await,
        ProbeResult::Size(5)
    );
}

#[tokio::test]
#[serial]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let prober = test_prober(Duration::from_millis(300));
    assert_eq!(
        prober.probe(&server.uri(), None).await,
        ProbeResult::Failed(ProbeFailure::Timeout)
    );
}

#[tokio::test]
#[serial]
async fn test_https_against_plain_http_fails() {
    let server = setup_vhost_server(10, &[]).await;
    let prober = test_prober(Duration::from_secs(2));

    let url = format!("https://{}/", server.address());
    assert!(!prober.probe(&url, None).await.success());
}

#[tokio::test]
#[serial]
async fn test_detector_keeps_https_choice_on_nonstandard_port() {
    let server = setup_vhost_server(10, &[]).await;
    let prober = test_prober(Duration::from_secs(2));
    let detector = ProtocolDetector::new(StubPorts::open(&[443, 80]), prober);

    let protocol = detector.detect(&server_endpoint(&server)).await;
    assert_eq!(protocol, Protocol::Unavailable);
}

#[tokio::test]
#[serial]
async fn test_detector_uses_http_on_nonstandard_port_when_443_closed() {
    let server = setup_vhost_server(10, &[]).await;
    let prober = test_prober(Duration::from_secs(2));
    let detector = ProtocolDetector::new(StubPorts::open(&[80]), prober);

    let protocol = detector.detect(&server_endpoint(&server)).await;
    assert_eq!(protocol, Protocol::Http);
}

#[tokio::test]
#[serial]
async fn test_detector_without_open_well_known_ports() {
    let server = setup_vhost_server(10, &[]).await;
    let prober = test_prober(Duration::from_secs(2));
    let detector = ProtocolDetector::new(StubPorts::open(&[]), prober);

    let protocol = detector.detect(&server_endpoint(&server)).await;
    assert_eq!(protocol, Protocol::Unavailable);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
