//! `pathmap` — shortest route between two points on a GeoJSON road network.
//!
//! ```text
//! pathmap --network demos/city_block.geojson --from 44.8850,38.8400 --to 44.8860,38.8420
//! ```
//!
//! Coordinates are `lat,lon`.  The route is printed to stdout as a GeoJSON
//! `Feature`; logs go to stderr (filter with `RUST_LOG`).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pm_core::{GeoPoint, PlannerConfig};
use pm_routing::geojson::{load_geojson, route_to_geojson_string};
use pm_routing::{DijkstraRouter, RoadNetwork, RoutePlanner};

#[derive(Parser, Debug)]
#[command(name = "pathmap", version, about = "Shortest route along a GeoJSON road network")]
struct Args {
    /// GeoJSON file holding the road network (LineString features).
    #[arg(short, long)]
    network: PathBuf,

    /// Start point as "lat,lon".
    #[arg(long, allow_hyphen_values = true)]
    from: GeoPoint,

    /// End point as "lat,lon".
    #[arg(long, allow_hyphen_values = true)]
    to: GeoPoint,

    /// Nearest network nodes tried per endpoint.
    #[arg(short, long, default_value_t = PlannerConfig::DEFAULT_CANDIDATE_COUNT)]
    candidates: usize,

    /// Pretty-print the GeoJSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    println!("{}", run(&args)?);
    Ok(())
}

/// Load the network, plan the route and render it as a GeoJSON `Feature`.
fn run(args: &Args) -> Result<String> {
    let planner = RoutePlanner::new(DijkstraRouter, PlannerConfig::new(args.candidates))
        .context("invalid planner configuration")?;

    let t0 = Instant::now();
    let geometries = load_geojson(&args.network)
        .with_context(|| format!("failed to load network {}", args.network.display()))?;
    let network = RoadNetwork::from_geometries(&geometries).context("failed to build network")?;
    info!(
        nodes = network.node_count(),
        roads = network.undirected_edge_count(),
        candidates = planner.config().candidate_count,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "network ready"
    );

    let route = planner
        .plan_points(&network, &[args.from, args.to])
        .context("route planning failed")?;

    if route.is_empty() {
        warn!(from = %args.from, to = %args.to, "no route found");
    } else {
        info!(nodes = route.len(), length_m = route.length_m, "route found");
    }

    Ok(route_to_geojson_string(&route, args.pretty)?)
}
