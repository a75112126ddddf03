//! Coverage analysis pipeline.
//!
//! Loads collision and facility points from GeoJSON, builds the coverage
//! region, classifies collisions, tallies nearest-facility demand, scores an
//! optional siting proposal, and prints a JSON report.

mod input;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use triage::coverage::{self, CoverageRegion};
use triage::models::{Crs, CrsUnit};
use triage::nearest::{demand_counts, NearestIndex};
use triage::proposal::{evaluate_proposal, ProposedSite};

use crate::input::load_features;
use crate::report::Report;

#[derive(Parser, Debug)]
#[command(name = "analyze")]
#[command(about = "Coverage analysis over collision and facility point data")]
struct Args {
    /// Collision points (GeoJSON with projected coordinates)
    #[arg(long)]
    collisions: PathBuf,

    /// Facility points (GeoJSON, same CRS as the collisions)
    #[arg(long)]
    facilities: PathBuf,

    /// EPSG code of the input coordinates (linear units required)
    #[arg(long, default_value = "2263")]
    epsg: u32,

    /// Linear unit of the CRS
    #[arg(long, value_enum, default_value = "foot")]
    unit: UnitArg,

    /// Coverage radius in CRS units
    #[arg(long, default_value = "10000")]
    radius: f64,

    /// Target uncovered percentage for proposal evaluation
    #[arg(long, default_value = "10.0")]
    target: f64,

    /// Proposed facility site as "x,y" in CRS units (repeatable)
    #[arg(long = "propose", value_parser = parse_site)]
    propose: Vec<ProposedSite>,

    /// Property key holding the facility name
    #[arg(long, default_value = "name")]
    name_key: String,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum UnitArg {
    Metre,
    Foot,
}

impl From<UnitArg> for CrsUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Metre => CrsUnit::Metre,
            UnitArg::Foot => CrsUnit::Foot,
        }
    }
}

fn parse_site(raw: &str) -> Result<ProposedSite, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(format!("expected \"x,y\", got \"{}\"", raw));
    }
    let x = parts[0]
        .parse()
        .map_err(|_| format!("bad x coordinate: {}", parts[0]))?;
    let y = parts[1]
        .parse()
        .map_err(|_| format!("bad y coordinate: {}", parts[1]))?;
    Ok(ProposedSite::new(x, y))
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let crs = Crs::new(args.epsg, args.unit.into());

    info!("Triage coverage analysis");
    info!("Collisions: {}", args.collisions.display());
    info!("Facilities: {}", args.facilities.display());

    let collisions = load_features(&args.collisions, crs, &args.name_key)
        .context("Failed to load collision data")?;
    let facilities = load_features(&args.facilities, crs, &args.name_key)
        .context("Failed to load facility data")?;

    info!(
        "Loaded {} collisions and {} facilities in {}",
        collisions.len(),
        facilities.len(),
        crs
    );

    let region = CoverageRegion::build(&facilities, args.radius)?;
    let split = coverage::partition(&collisions, &region)?;
    let percentage = split.uncovered_percentage();

    info!(
        "{}% of collisions are more than {} {:?} from the closest facility",
        percentage, args.radius, args.unit
    );

    let lookup = NearestIndex::build(&facilities);
    let demand = demand_counts(&split.uncovered, &facilities, &lookup)?;
    let highest_demand = demand.highest_demand().and_then(|row| row.name.clone());

    if let Some(ref name) = highest_demand {
        info!("Highest-demand facility: {}", name);
    }

    let proposal = if args.propose.is_empty() {
        None
    } else {
        Some(evaluate_proposal(
            &args.propose,
            args.radius,
            &split.uncovered,
            collisions.len(),
            args.target,
        ))
    };

    let report = Report {
        crs,
        radius: args.radius,
        collisions_total: collisions.len(),
        facilities_total: facilities.len(),
        uncovered_count: split.uncovered.len(),
        uncovered_percentage: percentage,
        demand: &demand,
        highest_demand,
        proposal,
        uncovered: split.uncovered.features(),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
