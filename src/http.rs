// File: http.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ConfigParameter;
use crate::errors::VhostResult;
use async_trait::async_trait;
use log::trace;
use reqwest::header::HOST;
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeFailure {
    Timeout,
    Connect,
    Tls,
    Body,
    Request,
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ProbeFailure::Timeout => "timed out",
            ProbeFailure::Connect => "connection failed",
            ProbeFailure::Tls => "TLS handshake failed",
            ProbeFailure::Body => "failed to read body",
            ProbeFailure::Request => "request failed",
        };
        f.write_str(text)
    }
}

/// Outcome of a single GET: the body length in bytes, or why no length is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    Size(usize),
    Failed(ProbeFailure),
}

impl ProbeResult {
    pub fn size(&self) -> Option<usize> {
        match self {
            ProbeResult::Size(size) => Some(*size),
            ProbeResult::Failed(_) => None,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, ProbeResult::Size(_))
    }
}

#[async_trait]
pub trait Probe: Send + Sync {
    /// Issues one GET to `url`, overriding the `Host` header when `host_header` is given.
    async fn probe(&self, url: &str, host_header: Option<&str>) -> ProbeResult;
}

#[derive(Debug, Clone)]
pub struct ProbeOptions {
    pub timeout: Duration,
    pub verify_certificates: bool,
    pub user_agent: String,
}

impl ProbeOptions {
    pub fn from_config(config: &ConfigParameter) -> Self {
        ProbeOptions {
            timeout: config.timeout_duration(),
            verify_certificates: config.verify_certificates(),
            user_agent: config.user_agent().to_string(),
        }
    }
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self::from_config(&ConfigParameter::default())
    }
}

#[derive(Debug, Clone)]
pub struct HttpProber {
    options: ProbeOptions,
    client: reqwest::Client,
}

impl HttpProber {
    pub fn new(options: ProbeOptions) -> VhostResult<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!options.verify_certificates)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(options.user_agent.clone())
            .build()?;
        Ok(HttpProber { options, client })
    }

    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(&self, url: &str, host_header: Option<&str>) -> ProbeResult {
        let mut request = self.client.get(url).timeout(self.options.timeout);
        if let Some(host) = host_header {
            request = request.header(HOST, host);
        }

        let response = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                trace!("GET {} (Host: {:?}) failed: {}", url, host_header, e);
                return ProbeResult::Failed(classify_error(&e));
            }
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => {
                trace!(
                    "GET {} (Host: {:?}) -> {} with {} bytes",
                    url,
                    host_header,
                    status,
                    body.len()
                );
                ProbeResult::Size(body.len())
            }
            Err(e) => {
                trace!("Reading body of {} failed: {}", url, e);
                if e.is_timeout() {
                    ProbeResult::Failed(ProbeFailure::Timeout)
                } else {
                    ProbeResult::Failed(ProbeFailure::Body)
                }
            }
        }
    }
}

fn classify_error(error: &reqwest::Error) -> ProbeFailure {
    if error.is_timeout() {
        return ProbeFailure::Timeout;
    }
    if mentions_tls(error) {
        return ProbeFailure::Tls;
    }
    if error.is_connect() {
        return ProbeFailure::Connect;
    }
    if error.is_body() || error.is_decode() {
        return ProbeFailure::Body;
    }
    ProbeFailure::Request
}

fn mentions_tls(error: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = error.source();
    while let Some(err) = source {
        let text = err.to_string().to_lowercase();
        if text.contains("tls") || text.contains("ssl") || text.contains("certificate") {
            return true;
        }
        source = err.source();
    }
    false
}
