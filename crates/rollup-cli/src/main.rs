//! rollup - pipeline status from a job snapshot

mod pipeline;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rollup_core::{ResolverBuilder, Scope, Status, StatusCounts};

use crate::pipeline::Pipeline;

#[derive(Parser)]
#[command(
    name = "rollup",
    version,
    about = "Composite status of pipeline stages"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Status of each stage and of the whole pipeline
    Status {
        /// Pipeline document ("-" for stdin)
        file: PathBuf,

        /// Status reported for a stage with no jobs
        #[arg(long)]
        empty_status: Option<Status>,
    },
    /// List jobs in a scope (cancelable, finished, relevant, a status name, ...)
    Scope {
        scope: Scope,

        /// Pipeline document ("-" for stdin)
        file: PathBuf,
    },
    /// Number of jobs per status
    Counts {
        /// Pipeline document ("-" for stdin)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Status { file, empty_status } => {
            let pipeline = load(&file)?;
            let mut builder = ResolverBuilder::from_config(pipeline.resolver);
            if let Some(status) = empty_status {
                builder = builder.empty_status(status);
            }
            let resolver = builder.build()?;
            let report = pipeline.report(&resolver);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for stage in &report.stages {
                    println!("{:<20} {:<10} ({} jobs)", stage.name, stage.status, stage.jobs);
                }
                println!("pipeline: {}", report.status);
            }
        }
        Commands::Scope { scope, file } => {
            let pipeline = load(&file)?;
            let names = pipeline.select(scope);
            tracing::debug!(%scope, matched = names.len(), "selected jobs");

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
        Commands::Counts { file } => {
            let pipeline = load(&file)?;
            let counts = StatusCounts::collect(pipeline.jobs().map(|(_, job)| job));

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&counts)?);
            } else {
                for status in Status::ALL {
                    println!("{:<10} {}", status, counts.get(status));
                }
                println!("{:<10} {}", "tolerated", counts.tolerated);
            }
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<Pipeline> {
    let input = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read pipeline from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    let pipeline = Pipeline::from_json(&input)
        .with_context(|| format!("invalid pipeline document: {}", path.display()))?;
    tracing::debug!(stages = pipeline.stages.len(), "loaded pipeline");
    Ok(pipeline)
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
