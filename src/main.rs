// Renders the Part D charts comparing the two-copy, one-copy and zero-copy
// client/server implementations.
//
// # Procedure
// 1. Build the dataset from the measurements embedded in `measurement`
// 2. Render each chart into the current working directory, one after another
//
// Any failure aborts the whole run; there are no partial reports.

mod config;
mod error;
mod measurement;
mod plots;
mod statistics;

use crate::config::ReportConfig;
use crate::measurement::Dataset;
use anyhow::Context;
use tracing::{info, Level};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let output_dir = std::env::current_dir().context("couldn't get current dir")?;
    let config = ReportConfig::new(output_dir);
    let dataset = Dataset::embedded().context("embedded measurements are inconsistent")?;
    anyhow::ensure!(!dataset.is_empty(), "no embedded measurements");
    info!(records = dataset.len(), "embedded measurements loaded");

    println!("Generating Part D plots...");
    println!("{}", "=".repeat(50));

    plots::throughput_by_size(&config, &dataset).context("throughput plot failed")?;
    plots::latency_by_threads(&config, &dataset).context("latency plot failed")?;
    plots::cache_misses_by_size(&config, &dataset).context("cache miss plot failed")?;
    plots::cycles_per_byte(&config, &dataset).context("cycles per byte plot failed")?;

    println!("{}", "=".repeat(50));
    println!("All plots generated successfully!");

    Ok(())
}
