// File: detector.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::endpoint::Endpoint;
use crate::http::{Probe, ProbeResult};
use async_trait::async_trait;
use log::debug;
use serde::Serialize;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

pub const HTTPS_PORT: u16 = 443;
pub const HTTP_PORT: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
    Unavailable,
}

impl Protocol {
    pub fn scheme(&self) -> Option<&'static str> {
        match self {
            Protocol::Http => Some("http"),
            Protocol::Https => Some("https"),
            Protocol::Unavailable => None,
        }
    }

    /// Base URL for `endpoint`, without a trailing slash.
    pub fn url_for(&self, endpoint: &Endpoint) -> Option<String> {
        self.scheme()
            .map(|scheme| format!("{}://{}", scheme, endpoint.socket_addr()))
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme().unwrap_or("none"))
    }
}

#[async_trait]
pub trait PortCheck: Send + Sync {
    async fn is_open(&self, ip: IpAddr, port: u16) -> bool;
}

/// Plain TCP connect probe.
#[derive(Debug, Clone)]
pub struct TcpPortCheck {
    connect_timeout: Duration,
}

impl TcpPortCheck {
    pub fn new(connect_timeout: Duration) -> Self {
        TcpPortCheck { connect_timeout }
    }
}

#[async_trait]
impl PortCheck for TcpPortCheck {
    async fn is_open(&self, ip: IpAddr, port: u16) -> bool {
        let addr = SocketAddr::new(ip, port);
        matches!(
            timeout(self.connect_timeout, TcpStream::connect(addr)).await,
            Ok(Ok(_))
        )
    }
}

pub struct ProtocolDetector {
    port_check: Arc<dyn PortCheck>,
    prober: Arc<dyn Probe>,
}

impl ProtocolDetector {
    pub fn new(port_check: Arc<dyn PortCheck>, prober: Arc<dyn Probe>) -> Self {
        ProtocolDetector { port_check, prober }
    }

    /// HTTPS is chosen when the port is 443, or when the host answers on 443 and the port is
    /// not 80. Otherwise HTTP is chosen when the port is 80 or the host answers on 80. The
    /// chosen protocol only counts once a GET against the endpoint itself gets any response;
    /// an endpoint that picked HTTPS is never retried over HTTP.
    pub async fn detect(&self, endpoint: &Endpoint) -> Protocol {
        let ip = endpoint.ip();
        let port = endpoint.port();

        let candidate = if port == HTTPS_PORT
            || (port != HTTP_PORT && self.port_check.is_open(ip, HTTPS_PORT).await)
        {
            Protocol::Https
        } else if port == HTTP_PORT || self.port_check.is_open(ip, HTTP_PORT).await {
            Protocol::Http
        } else {
            return Protocol::Unavailable;
        };

        if self.confirm(candidate, endpoint).await {
            candidate
        } else {
            Protocol::Unavailable
        }
    }

    async fn confirm(&self, protocol: Protocol, endpoint: &Endpoint) -> bool {
        let Some(base) = protocol.url_for(endpoint) else {
            return false;
        };
        let result = self.prober.probe(&format!("{}/", base), None).await;
        if let ProbeResult::Failed(reason) = result {
            debug!("{} not confirmed on {}: {}", protocol, endpoint, reason);
        }
        result.success()
    }
}
