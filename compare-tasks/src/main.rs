mod commands;
mod output;

use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use commands::compare::{self, CompareArgs};

/// Diff PublishPipelineArtifact tasks between two Azure DevOps pipelines
#[derive(Parser, Debug)]
#[command(name = "compare-tasks", version, about)]
struct Cli {
    #[command(flatten)]
    compare: CompareArgs,

    /// Log comparison details to stderr (overridden by RUST_LOG)
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    compare::execute(cli.compare)
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        "pipeline_compare=debug,compare_tasks=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
