//! bigsky: catalog build CLI
//!
//! Reads the raw Tycho-2, Hipparcos, OpenNGC and WDS files and writes the
//! consolidated catalog as CSV or SQLite.

mod cli;

use anyhow::Context;
use bigsky_catalog::{pipeline, RunSummary};
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let summary = match &cli.command {
        Commands::Stars(args) => {
            let config = args.to_config();
            pipeline::run_csv(&config)
                .with_context(|| format!("CSV build from {:?} failed", config.data_path))?
        }
        Commands::Database(args) => {
            let config = args.to_config();
            pipeline::run_database(&config)
                .with_context(|| format!("database build from {:?} failed", config.data_path))?
        }
    };

    print_summary(&summary);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "bigsky=debug" } else { "bigsky=info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn print_summary(summary: &RunSummary) {
    println!("\n=== Summary ===");
    for (label, stats) in [
        ("Tycho-2 main", summary.primary),
        ("Tycho-2 supplement", summary.supplement),
        ("Total", summary.total()),
    ] {
        println!(
            "{:<20} read {:>9}  emitted {:>9}  mag-limited {:>8}  no position {:>6}  errors {:>5}",
            label, stats.read, stats.emitted, stats.secondary, stats.no_position, stats.errors
        );
    }
    if let Some(dso) = &summary.deep_sky {
        println!(
            "Deep-sky objects: {} loaded, {} without position, {} unknown designations, {} errors",
            dso.loaded, dso.no_position, dso.unknown_designation, dso.errors
        );
    }
    if let Some(wds) = &summary.double_stars {
        println!(
            "Double stars: {} loaded, {} duplicates, {} without position, {} errors",
            wds.loaded, wds.duplicates, wds.no_position, wds.errors
        );
    }
    for path in &summary.outputs {
        println!("Wrote {:?}", path);
    }
}
