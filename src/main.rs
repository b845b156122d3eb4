// File: main.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::*;
use log::{error, info};
use simple_logger::SimpleLogger;
use vhostprobe::cli::Cli;
use vhostprobe::config::ConfigParameter;
use vhostprobe::endpoint::{load_endpoints, load_vhosts, save_endpoints, Endpoint};
use vhostprobe::masscan::MasscanRunner;
use vhostprobe::pipeline::Pipeline;
use vhostprobe::report::create_reporter;

fn usage_exit(message: &str) -> ! {
    eprintln!("{}", message.red());
    eprintln!();
    eprintln!("{}", Cli::command().render_help());
    std::process::exit(1);
}

async fn collect_endpoints(cli: &Cli, config: &ConfigParameter) -> Result<Vec<Endpoint>> {
    let endpoints = if config.offline() {
        load_endpoints(&cli.endpoints_file)?
    } else {
        MasscanRunner::from_config(config)
            .run(&cli.endpoints_file)
            .await
            .context("Port scan failed")?
    };

    if let Some(path) = config.save_endpoints() {
        save_endpoints(path, &endpoints)
            .with_context(|| format!("Failed to write endpoint list to {}", path.display()))?;
        info!("Saved {} endpoints to {}", endpoints.len(), path.display());
    }
    Ok(endpoints)
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.to_config();

    let vhosts = load_vhosts(&cli.vhosts_file)?;
    let endpoints = collect_endpoints(&cli, &config).await?;
    if vhosts.is_empty() {
        info!("Vhost list is empty, only baselines will be reported");
    }

    let mut reporter = create_reporter(
        config.format(),
        cli.output.as_deref(),
        !cli.no_color,
        config.show_unresponsive(),
    )?;

    let pipeline = Pipeline::from_config(&config, vhosts)?.with_progress(cli.show_progress());
    pipeline.run(endpoints, reporter.as_mut()).await;

    if !config.suppress_stats() {
        eprintln!();
        eprintln!("{}", pipeline.stats());
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                std::process::exit(0);
            }
            _ => usage_exit(&e.to_string()),
        },
    };

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = SimpleLogger::new().with_level(cli.log_level()).init() {
        eprintln!("Failed to initialise logger: {}", e);
    }

    if !cli.endpoints_file.exists() || !cli.vhosts_file.exists() {
        usage_exit("[-] Error: One or both input files do not exist.");
    }

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("{} {:#}", "[-]".red(), e);
        std::process::exit(1);
    }
}
