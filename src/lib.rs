// File: lib.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::bool_assert_comparison)]

pub mod cli;
pub mod config;
pub mod detector;
pub mod differ;
pub mod endpoint;
pub mod errors;
pub mod http;
pub mod masscan;
pub mod pipeline;
pub mod report;
pub mod stats;


pub use detector::{PortCheck, Protocol, ProtocolDetector, TcpPortCheck};
pub use differ::{DifferenceReport, Differencer, Divergence};
pub use endpoint::Endpoint;
pub use errors::{VhostError, VhostResult};
pub use http::{HttpProber, Probe, ProbeFailure, ProbeOptions, ProbeResult};
pub use pipeline::Pipeline;
