//! chartdoc: extract parameter documentation from an annotated values file.
//!
//! Reads the `## @param` / `## @section` / `## @skip` / `## @extra` tags and
//! the YAML body of a values file, joins them by parameter name, optionally
//! adds entries for the chart's dependencies, and prints the resulting
//! records as JSON.

use anyhow::{Context, Result};
use chartdoc::dependencies::EnrichReport;
use chartdoc::{check, dependencies, parser, Config, Parameter};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "chartdoc",
    about = "Extract parameter documentation from annotated Helm values files"
)]
struct Cli {
    /// Annotated values file
    #[arg(short = 'v', long)]
    values: PathBuf,

    /// JSON config overriding comment format, tags and modifiers
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Chart.yaml whose dependencies get documentation entries
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Fail when values and metadata are out of sync
    #[arg(long)]
    check: bool,

    /// Write JSON here instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chartdoc=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let params = extract(&cli, &config).await?;

    let json = serde_json::to_string_pretty(&params).context("failed to serialize parameters")?;
    match &cli.output {
        Some(path) => fs::write(path, format!("{json}\n"))
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}

/// Scan, flatten, check, merge, enrich.
async fn extract(cli: &Cli, config: &Config) -> Result<Vec<Parameter>> {
    let metadata = parser::parse_metadata_file(&cli.values, config)?;
    let values = parser::parse_values_file(&cli.values)?;

    if cli.check {
        check::validate(&values, &metadata)?;
    }

    let mut params = parser::merge::merge(metadata, &values, &config.modifiers);

    if let Some(chart) = &cli.chart {
        let report =
            dependencies::append_dependencies(chart, &mut params, config.dependencies.timeout())
                .await
                .with_context(|| {
                    format!("failed to document dependencies of {}", chart.display())
                })?;
        log_report(&report);
    }

    Ok(params)
}

fn log_report(report: &EnrichReport) {
    if !report.unmatched.is_empty() {
        info!(dependencies = ?report.unmatched, "no documented parameters for dependencies");
    }
    if !report.skipped.is_empty() {
        info!(dependencies = ?report.skipped, "dependencies without an HTTP repository");
    }
}
