extern crate magfield_golden as lib;

use clap::Parser;
use lib::configuration::{GeneratorConfiguration, SuiteName};
use lib::oracle::FieldOracle;
use lib::scenario::run_all;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Writes the golden point and field datasets.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML configuration file. Defaults apply to anything it leaves out.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured output directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Generates only the named suites. May be repeated.
    #[arg(long, value_enum)]
    suite: Vec<SuiteName>,
}

fn configure(args: Args) -> lib::Result<GeneratorConfiguration> {
    let mut config = match args.config {
        Some(path) => GeneratorConfiguration::load(&path)?,
        None => GeneratorConfiguration::default(),
    };
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if !args.suite.is_empty() {
        config.suites = args.suite;
    }
    Ok(config)
}

#[cfg(feature = "magpylib")]
fn oracle() -> lib::Result<Box<dyn FieldOracle>> {
    info!("evaluating fields with magpylib");
    Ok(Box::new(lib::oracle::MagpylibOracle::new()?))
}

#[cfg(not(feature = "magpylib"))]
fn oracle() -> lib::Result<Box<dyn FieldOracle>> {
    info!("evaluating fields with the built-in analytic oracle");
    Ok(Box::new(lib::oracle::AnalyticOracle))
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = match configure(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match oracle().and_then(|oracle| run_all(&config, oracle.as_ref())) {
        Ok(reports) => {
            let written: usize = reports.iter().map(|r| r.artifacts.len()).sum();
            info!(
                files = written,
                dir = %config.output_dir.display(),
                "golden datasets written"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
