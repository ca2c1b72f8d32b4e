//! Tournament planner CLI.
//!
//! Plans the built-in EURO 2024 instance, or a tournament described by a
//! JSON reference file, and prints the calendar.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_tournament::cp::SolverConfig;
use u_tournament::models::ReferenceData;
use u_tournament::render::render_calendar;
use u_tournament::scheduler::VenuePolicy;
use u_tournament::tournament::{PlanConfig, Tournament};

#[derive(Parser)]
#[command(name = "u-tournament")]
#[command(about = "Draw groups and schedule a tournament calendar", long_about = None)]
struct Cli {
    /// Reference data JSON file (defaults to the built-in EURO 2024 data)
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Random seed for a reproducible calendar
    #[arg(long)]
    seed: Option<u64>,

    /// Venue selection: random, first-free
    #[arg(long, default_value = "random")]
    venues: VenuePolicy,

    /// Search node limit for the draw and round-robin solves
    #[arg(long, default_value = "100000")]
    node_limit: u64,

    /// Print the calendar as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Write the built-in reference data as JSON and exit
    #[arg(long)]
    dump_reference: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let reference = match &cli.reference {
        Some(path) => ReferenceData::from_json_file(path)
            .with_context(|| format!("loading reference data from {}", path.display()))?,
        None => ReferenceData::euro_2024(),
    };

    if cli.dump_reference {
        println!("{}", reference.to_json_string()?);
        return Ok(());
    }

    let mut config = PlanConfig::default()
        .with_venue_policy(cli.venues)
        .with_solver(SolverConfig::default().with_node_limit(cli.node_limit));
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    info!(tournament = %reference.name, seed = ?cli.seed, venues = %cli.venues, "planning");
    let calendar = Tournament::new(&reference, config)
        .plan()
        .context("planning the tournament")?;

    if cli.json {
        println!("{}", calendar.to_json_string()?);
    } else {
        print!("{}", render_calendar(&calendar));
        let kpi = calendar.kpi();
        if kpi.dropped() > 0 {
            eprintln!(
                "warning: {} fixture(s) could not be scheduled ({:.1}% complete)",
                kpi.dropped(),
                kpi.completion_rate * 100.0
            );
        }
    }

    Ok(())
}
