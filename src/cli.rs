// File: cli.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ConfigParameter;
use crate::report::ReportFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    after_help = "Without --offline the endpoints file holds one IP per line and is handed to the \
                  port scanner. With --offline it must already contain ip:port pairs."
)]
pub struct Cli {
    #[arg(help = "File with IP addresses (or ip:port pairs with --offline), one per line")]
    pub endpoints_file: PathBuf,

    #[arg(help = "File with candidate virtual host names, one per line")]
    pub vhosts_file: PathBuf,

    #[arg(long = "offline", help = "Skip the port scanner, read ip:port pairs directly")]
    pub offline: bool,

    #[arg(
        short = 't',
        long = "timeout",
        default_value_t = 5,
        help = "HTTP request timeout in seconds"
    )]
    pub timeout: u64,

    #[arg(
        long = "connect-timeout",
        default_value_t = 3,
        help = "TCP connection probe timeout in seconds"
    )]
    pub connect_timeout: u64,

    #[arg(short = 'w', long = "workers", default_value_t = 10)]
    pub workers: usize,

    #[arg(
        long = "vhost-workers",
        default_value_t = 10,
        help = "Concurrent vhost probes per endpoint"
    )]
    pub vhost_workers: usize,

    #[arg(long = "verify-certs", help = "Validate TLS certificates")]
    pub verify_certs: bool,

    #[arg(short = 'f', long = "format", value_enum, default_value = "text")]
    pub format: ReportFormat,

    #[arg(short = 'o', long = "output", help = "Write reports to a file instead of stdout")]
    pub output: Option<PathBuf>,

    #[arg(long = "scanner", default_value = "masscan")]
    pub scanner: String,

    #[arg(short = 'r', long = "rate", default_value_t = 50000, help = "Scanner packet rate")]
    pub rate: u32,

    #[arg(short = 'p', long = "ports", default_value = "1-65535")]
    pub ports: String,

    #[arg(long = "scan-output", default_value = "masscan_output.txt")]
    pub scan_output: PathBuf,

    #[arg(long = "save-endpoints", help = "Write discovered ip:port pairs to this file")]
    pub save_endpoints: Option<PathBuf>,

    #[arg(long = "user-agent")]
    pub user_agent: Option<String>,

    #[arg(
        short = 'S',
        long = "show-unresponsive",
        help = "Report how many vhost probes failed per endpoint"
    )]
    pub show_unresponsive: bool,

    #[arg(
        short = 's',
        long = "suppress-stats",
        help = "Suppress scan summary and statistics"
    )]
    pub suppress_stats: bool,

    #[arg(long = "no-progress", help = "Hide the progress bar")]
    pub no_progress: bool,

    #[arg(long = "no-color", help = "Disable colored output")]
    pub no_color: bool,

    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,

    #[arg(short = 'v', long = "verbose", help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short = 'q', long = "quiet", help = "Reduce output verbosity")]
    pub quiet: bool,
}

impl Cli {
    pub fn to_config(&self) -> ConfigParameter {
        let mut config = ConfigParameter::new();
        config.set_timeout(self.timeout);
        config.set_connect_timeout(self.connect_timeout);
        config.set_workers(self.workers);
        config.set_vhost_workers(self.vhost_workers);
        config.set_verify_certificates(self.verify_certs);
        config.set_format(self.format);
        config.set_offline(self.offline);
        config.set_scanner_binary(&self.scanner);
        config.set_scanner_rate(self.rate);
        config.set_port_range(&self.ports);
        config.set_scan_output(&self.scan_output);
        config.set_save_endpoints(self.save_endpoints.clone());
        config.set_suppress_stats(self.suppress_stats);
        config.set_show_unresponsive(self.show_unresponsive);
        if let Some(user_agent) = &self.user_agent {
            config.set_user_agent(user_agent);
        }
        config
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            return log::LevelFilter::Debug;
        }
        if self.quiet {
            return log::LevelFilter::Error;
        }
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::Warn)
    }

    pub fn show_progress(&self) -> bool {
        !self.no_progress && !self.quiet
    }
}
