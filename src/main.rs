//! climate-stash CLI - download the CO2 and global temperature feeds and stash them as CSV.

use anyhow::{Context, Result};
use clap::Parser;
use climate_stash::{Config, DatasetReport, pipeline, registry};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "climate-stash")]
#[command(version)]
#[command(about = "Fetch climate data feeds and serialize them as CSV")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root storage directory (overrides the config file)
    #[arg(short, long)]
    stash_dir: Option<PathBuf>,

    /// Verbose output (ignores RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

/// `-v` wins over `RUST_LOG`; an unset or unparsable `RUST_LOG` means `info`
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn setup_logging(verbose: bool) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::default(),
    };

    if let Some(dir) = &cli.stash_dir {
        config.stash_dir = dir.clone();
    }

    Ok(config)
}

fn print_report(report: &DatasetReport) {
    println!("Working on: {}", report.name);
    println!("\tDownloaded from: {}", report.source_url);
    println!("\tSaved to: {}", report.raw_path.display());
    println!("\tWrangled: {} records", report.record_count);
    println!("\tWrote records to: {}", report.csv_path.display());
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let datasets = registry::builtin_datasets().context("Built-in dataset table is invalid")?;

    let reports = pipeline::run(&config, &datasets)
        .await
        .context("Stash run failed")?;
    for report in &reports {
        print_report(report);
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            let code = e
                .downcast_ref::<climate_stash::Error>()
                .map_or(1, climate_stash::Error::exit_code);
            ExitCode::from(code)
        }
    }
}
