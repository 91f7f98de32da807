use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod input;
mod report;

use commands::{EvaluateArgs, ScanArgs};

#[derive(Parser)]
#[command(name = "depth-arb")]
#[command(about = "Execution-aware arbitrage between correlated prediction markets", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, default_value = "config/Config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single pair of market order books
    Evaluate(EvaluateArgs),
    /// Evaluate many market pairs from one input file
    Scan(ScanArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = depth_arb_core::ConfigLoader::load_from(&cli.config)?;

    match cli.command {
        Commands::Evaluate(args) => {
            commands::run_evaluate(args, &config).await?;
        }
        Commands::Scan(args) => {
            commands::run_scan(args, &config).await?;
        }
    }

    Ok(())
}
