//! orbitrail - ISS position tracker
//!
//! `orbitrail` with no subcommand runs the gate and, if it opens, one
//! fetch → append → render cycle.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use orbitrail_core::OrbitrailConfig;
use orbitrail_core::app::AppBuilder;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "orbitrail")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (defaults apply when it does not exist)
    #[arg(short, long, default_value = "orbitrail.toml", global = true)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask the gate, publish the decision, fetch if it says run
    Run,

    /// Ask the gate and publish the decision only
    Gate,

    /// Fetch, append and render regardless of the gate
    Fetch,

    /// Show today's progress against the daily target
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let config = OrbitrailConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    let app = AppBuilder::from_config(&config)
        .context("failed to wire application")?
        .build()
        .context("failed to build application")?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let report = app.run().context("invocation failed")?;
            tracing::debug!(run_id = %report.run_id, run = report.decision.run, "{}", report.decision);
        }
        Commands::Gate => {
            let decision = app.gate().context("failed to publish decision")?;
            tracing::debug!(run = decision.run, "{decision}");
        }
        Commands::Fetch => {
            let report = app.fetch().context("fetch cycle failed")?;
            println!(
                "map updated with {} points, latest at {}",
                report.points, report.latest.ts
            );
        }
        Commands::Status { json } => {
            let summary = app.summary().context("failed to read observation store")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "{}: {}/{} observations today, {} total",
                    summary.date, summary.today_points, summary.target_today, summary.total_points
                );
                if let Some(latest) = summary.latest {
                    println!("latest: {} ({:.4}, {:.4})", latest.ts, latest.lat, latest.lon);
                }
            }
        }
    }

    Ok(())
}
