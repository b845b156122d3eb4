// File: report.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::differ::DifferenceReport;
use crate::errors::VhostResult;
use clap::ValueEnum;
use colored::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    #[value(name = "jsonl")]
    JsonLines,
}

pub trait Reporter: Send {
    fn report(&mut self, report: &DifferenceReport) -> VhostResult<()>;

    fn finish(&mut self) -> VhostResult<()> {
        Ok(())
    }
}

/// Human-readable lines in the classic `[+] Page size ...` layout.
pub struct TextReporter<W: Write + Send> {
    writer: W,
    color: bool,
    show_unresponsive: bool,
}

impl<W: Write + Send> TextReporter<W> {
    pub fn new(writer: W, color: bool, show_unresponsive: bool) -> Self {
        TextReporter {
            writer,
            color,
            show_unresponsive,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn marker(&self, text: &'static str) -> String {
        if !self.color {
            return text.to_string();
        }
        match text {
            "[+]" => text.green().bold().to_string(),
            "[!]" => text.bright_red().bold().to_string(),
            _ => text.yellow().to_string(),
        }
    }
}

impl<W: Write + Send> Reporter for TextReporter<W> {
    fn report(&mut self, report: &DifferenceReport) -> VhostResult<()> {
        let ok = self.marker("[+]");
        writeln!(
            self.writer,
            "{} Page size for {} without VHost: {} bytes",
            ok, report.url, report.baseline_size
        )?;

        let hit = self.marker("[!]");
        for divergence in &report.divergences {
            let vhost = if self.color {
                divergence.vhost.bright_white().bold().to_string()
            } else {
                divergence.vhost.clone()
            };
            writeln!(
                self.writer,
                "{} Page size for {} on {}: {} bytes",
                hit, vhost, report.url, divergence.size
            )?;
        }

        if self.show_unresponsive && report.failed_probes > 0 {
            let warn = self.marker("[-]");
            writeln!(
                self.writer,
                "{} {} VHost probes failed on {}",
                warn, report.failed_probes, report.url
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> VhostResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// One JSON object per line for pipeline consumption.
pub struct JsonLinesReporter<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonLinesReporter<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesReporter { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Reporter for JsonLinesReporter<W> {
    fn report(&mut self, report: &DifferenceReport) -> VhostResult<()> {
        let line = serde_json::to_string(report)?;
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn finish(&mut self) -> VhostResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Builds the reporter for `format`, writing to `output` or stdout.
pub fn create_reporter(
    format: ReportFormat,
    output: Option<&Path>,
    color: bool,
    show_unresponsive: bool,
) -> VhostResult<Box<dyn Reporter>> {
    let writer: Box<dyn Write + Send> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };
    let color = color && output.is_none();

    Ok(match format {
        ReportFormat::Text => Box::new(TextReporter::new(writer, color, show_unresponsive)),
        ReportFormat::JsonLines => Box::new(JsonLinesReporter::new(writer)),
    })
}
