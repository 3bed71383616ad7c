use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wayloop_lib::{
    compute_loop_with, compute_routes_with, load_graph, Graph, RoutePath, RouteRequest,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "wayloop route generation utilities")]
struct Cli {
    /// Node snapshot CSV with `id,lat,lon` rows.
    #[arg(long)]
    nodes: PathBuf,

    /// Edge snapshot CSV with `from,to` rows.
    #[arg(long)]
    edges: PathBuf,

    /// Node-merge threshold applied during simplification, in meters.
    #[arg(long, default_value_t = 20.0)]
    merge_threshold: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate point-to-point routes approximating the target distance.
    Routes(GenerateArgs),
    /// Generate round-trip loops approximating the target distance.
    Loop(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Latitude of the requested center, in degrees.
    #[arg(long)]
    lat: f64,

    /// Longitude of the requested center, in degrees.
    #[arg(long)]
    lon: f64,

    /// Target travel distance in meters.
    #[arg(long)]
    distance: f64,

    /// Refinement factor; higher is slower and tighter.
    #[arg(long, default_value_t = 1)]
    precision: u32,

    /// Seed for candidate sampling, for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut graph = load_graph(&cli.nodes, &cli.edges)
        .context("failed to load the graph snapshot")?;
    graph.simplify(cli.merge_threshold);

    match &cli.command {
        Command::Routes(args) => run(&graph, args, false),
        Command::Loop(args) => run(&graph, args, true),
    }
}

fn run(graph: &Graph, args: &GenerateArgs, loops: bool) -> Result<()> {
    let Some(start) = graph.nearest_node(args.lat, args.lon) else {
        bail!("graph snapshot contains no nodes");
    };
    let request = RouteRequest::new(start, args.distance, args.precision);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let results = if loops {
        compute_loop_with(graph, &request, &mut rng)?
    } else {
        compute_routes_with(graph, &request, &mut rng)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No routes found for the requested distance.");
        return Ok(());
    }
    for (index, route) in results.iter().enumerate() {
        print_route(index, route);
    }
    Ok(())
}

fn print_route(index: usize, route: &RoutePath) {
    println!(
        "#{} {:.0} m over {} nodes",
        index + 1,
        route.length_m,
        route.nodes.len()
    );
    for point in &route.points {
        println!("  {:.6}, {:.6}", point.lat, point.lon);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
