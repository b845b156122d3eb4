// File: endpoint.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::errors::{VhostError, VhostResult};
use log::warn;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::Write;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

/// A single `ip:port` probing target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    ip: IpAddr,
    port: u16,
}

impl Endpoint {
    pub fn new(ip: IpAddr, port: u16) -> Self {
        Endpoint { ip, port }
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.socket_addr())
    }
}

impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parses one `ip:port` entry. IPv6 addresses may be bracketed (`[::1]:443`).
pub fn parse_endpoint(line: &str) -> VhostResult<Endpoint> {
    let entry = line.trim();
    let (host, port) = entry
        .rsplit_once(':')
        .ok_or_else(|| VhostError::malformed(entry, "missing ':' separator"))?;

    let port: u16 = port
        .parse()
        .map_err(|_| VhostError::malformed(entry, format!("invalid port '{}'", port)))?;
    if port == 0 {
        return Err(VhostError::malformed(entry, "port must be in 1-65535"));
    }

    let host = host.trim_start_matches('[').trim_end_matches(']');
    let ip: IpAddr = host
        .parse()
        .map_err(|_| VhostError::malformed(entry, format!("invalid IP address '{}'", host)))?;

    Ok(Endpoint::new(ip, port))
}

/// Parses every non-blank line, skipping malformed entries with a warning.
pub fn read_endpoints<I, S>(raw_lines: I) -> Vec<Endpoint>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw_lines
        .into_iter()
        .filter(|line| !line.as_ref().trim().is_empty())
        .filter_map(|line| match parse_endpoint(line.as_ref()) {
            Ok(endpoint) => Some(endpoint),
            Err(e) => {
                warn!("Skipping entry: {}", e);
                None
            }
        })
        .collect()
}

/// Trims hostnames, drops blank lines and repeated names (first occurrence wins).
pub fn read_vhosts<I, S>(raw_lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw_lines
        .into_iter()
        .filter_map(|line| {
            let name = line.as_ref().trim();
            if name.is_empty() || !seen.insert(name.to_string()) {
                None
            } else {
                Some(name.to_string())
            }
        })
        .collect()
}

pub fn read_lines(path: &Path) -> VhostResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| VhostError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.lines().map(str::to_string).collect())
}

pub fn load_endpoints(path: &Path) -> VhostResult<Vec<Endpoint>> {
    Ok(read_endpoints(read_lines(path)?))
}

pub fn load_vhosts(path: &Path) -> VhostResult<Vec<String>> {
    Ok(read_vhosts(read_lines(path)?))
}

pub fn save_endpoints(path: &Path, endpoints: &[Endpoint]) -> VhostResult<()> {
    let mut file = fs::File::create(path)?;
    for endpoint in endpoints {
        writeln!(file, "{}", endpoint)?;
    }
    Ok(())
}
