mod config;
mod logging;

use std::path::{Path, PathBuf};
use std::time::Instant;

use circusgen_generate::generators::EnumRegistry;
use circusgen_generate::{GenerationEngine, GenerationError, GenerationReport, RunConfig};
use clap::Parser;
use config::{ConfigError, Overrides, resolve_config};
use logging::{LoggingError, init_logging};
use thiserror::Error;

const REPORT_FILE: &str = "generation_report.json";

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
}

#[derive(Parser, Debug)]
#[command(name = "circusgen", version, about = "Generate random circus data.")]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,
    /// TOML file with run settings; command-line flags take precedence.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Write generation_report.json next to the tables.
    #[arg(long, default_value_t = false)]
    report: bool,
    /// Append JSON logs to this file instead of logging to stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Print the payment and show type vocabularies and exit.
    #[arg(long, default_value_t = false)]
    list_enums: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    if cli.list_enums {
        list_enums();
        return Ok(());
    }

    init_logging(cli.log_file.as_deref())?;
    let config = resolve_config(cli.config.as_deref(), &cli.overrides)?;
    run_generate(config, cli.report)
}

fn run_generate(config: RunConfig, write_report: bool) -> Result<(), CliError> {
    let timer = Instant::now();
    let engine = GenerationEngine::new(config);
    let report = engine.run()?;

    if write_report {
        let path = save_report(&engine.config().out_dir, &report)?;
        tracing::info!(path = %path.display(), "report written");
    }

    let config = engine.config();
    println!(
        "Generated: {} cities, {} shows, {} tickets, {} viewers",
        config.cities, config.shows, config.tickets, config.viewers
    );
    println!("Execution time: {:.5} seconds", timer.elapsed().as_secs_f64());
    Ok(())
}

fn save_report(out_dir: &Path, report: &GenerationReport) -> Result<PathBuf, CliError> {
    let path = out_dir.join(REPORT_FILE);
    report.write_json(&path)?;
    Ok(path)
}

fn list_enums() {
    for provider in EnumRegistry::providers() {
        let labels = EnumRegistry::labels(provider).unwrap_or_default();
        println!("{provider}: {}", labels.join(", "));
    }
}
