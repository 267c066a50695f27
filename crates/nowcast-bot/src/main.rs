//! Command-line entry point: one invocation per nowcast event.

use anyhow::Context;
use clap::Parser;
use nowcast_bot::{InvocationResult, Pipeline};
use nowcast_common::init_logging;
use nowcast_config::{Config, ConfigLoader, ConfigValidator};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Render, post and archive one rain nowcast.
#[derive(Debug, Parser)]
#[command(name = "nowcast-notice", version, about)]
struct Cli {
    /// Event JSON file; read from stdin when omitted or "-".
    #[arg(short, long)]
    event: Option<PathBuf>,

    /// Configuration file (YAML or TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the chart images are written to.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Render and compose only; nothing is posted or archived.
    #[arg(long)]
    dry_run: bool,

    /// Log filter, e.g. "debug" or "nowcast_bot=trace".
    #[arg(long)]
    log_level: Option<String>,
}

fn read_event(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read event file {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("cannot read event from stdin")?;
            Ok(input)
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = ConfigLoader::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.output_dir {
        config.charts.output_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    Ok(config)
}

fn report(result: InvocationResult) -> ExitCode {
    match serde_json::to_string(&result) {
        Ok(line) => println!("{}", line),
        Err(_) => println!("{{\"statusCode\":{}}}", result.status_code),
    }
    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            return report(InvocationResult::FAILED);
        }
    };

    let _guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return report(InvocationResult::FAILED);
        }
    };
    info!(dry_run = cli.dry_run, "Starting Nowcast Notice");

    let setup = ConfigValidator::validate(&config, !cli.dry_run)
        .and_then(|()| Pipeline::from_config(&config, cli.dry_run))
        .map_err(anyhow::Error::from)
        .and_then(|pipeline| Ok((pipeline, read_event(cli.event.as_ref())?)));
    let (pipeline, event) = match setup {
        Ok(ready) => ready,
        Err(e) => {
            error!("Setup failed: {:#}", e);
            return report(InvocationResult::FAILED);
        }
    };

    let outcome = pipeline.run_str(&event).await;
    if let Ok(run) = &outcome {
        for chart in &run.charts {
            info!(path = %chart.display(), "Chart written");
        }
        info!(text = %run.summary.text, "Summary");
    }
    report(InvocationResult::from(&outcome))
}
