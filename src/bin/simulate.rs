//! Balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 200 runs to floor 10
//!   cargo run --bin simulate -- -n 100 -f 5     # 100 runs to floor 5
//!   cargo run --bin simulate -- --seed 42       # Reproducible run

use anyhow::{Context, Result};
use clap::Parser;
use delve::simulator::{run_simulation, SimConfig};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

/// Delve balance simulator
#[derive(Parser)]
#[command(name = "simulate")]
#[command(about = "Run automated crawls and report balance statistics", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of simulation runs
    #[arg(short = 'n', long, default_value_t = 200)]
    runs: u32,

    /// Floor to reach before a run counts as complete
    #[arg(short, long, default_value_t = 10)]
    floor: u32,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Max actions per run
    #[arg(short = 'a', long, default_value_t = 50_000)]
    max_actions: u64,

    /// Quick check (25 runs, 10k actions)
    #[arg(long)]
    quick: bool,

    /// Print a line per run
    #[arg(short, long)]
    verbose: bool,

    /// Write the JSON report to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

impl Cli {
    fn sim_config(&self) -> SimConfig {
        let base = if self.quick {
            SimConfig::quick(self.floor)
        } else {
            SimConfig {
                num_runs: self.runs,
                target_floor: self.floor,
                max_actions_per_run: self.max_actions,
                ..SimConfig::default()
            }
        };
        SimConfig {
            seed: self.seed,
            verbosity: if self.verbose { 2 } else { 1 },
            ..base
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.sim_config();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              DELVE BALANCE SIMULATOR                          ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Target Floor:   {}", config.target_floor);
    println!("  Max Actions:    {}", config.max_actions_per_run);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config).await;

    println!("{}", report.to_text());

    if let Some(path) = cli.json {
        std::fs::write(&path, report.to_json())
            .with_context(|| format!("failed to write JSON report to {}", path.display()))?;
        println!("JSON report saved to: {}", path.display());
    }

    Ok(())
}
