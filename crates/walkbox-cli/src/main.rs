//! Walkbox CLI - walk-box navigation meshes from the command line.
//!
//! Single binary that provides:
//! - `walkbox inspect` - polygon/node/edge summary of a mesh
//! - `walkbox path` - route between two points
//! - `walkbox walk` - simulate an agent following a route

mod asset;
mod config;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use walkbox_nav::{NavGraph, NodeKind, PathFollower, Vec2};

use crate::config::WalkboxConfig;

#[derive(Parser)]
#[command(name = "walkbox")]
#[command(about = "Walk-box navigation meshes", version)]
struct Cli {
    /// Walk-box asset (overrides `mesh` from the config)
    #[arg(short, long, global = true)]
    mesh: Option<PathBuf>,

    /// Config file (defaults to ./walkbox.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the mesh built from the asset
    Inspect {
        /// Also list every node
        #[arg(long)]
        nodes: bool,
    },

    /// Find a route between two points
    Path {
        /// Start point as `x,y`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Vec2,

        /// Destination as `x,y`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Vec2,

        /// Print the waypoints as JSON
        #[arg(long)]
        json: bool,
    },

    /// Walk an agent along the route and print its position each frame
    Walk {
        /// Start point as `x,y`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Vec2,

        /// Destination as `x,y`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Vec2,

        /// World units per second (overrides the config)
        #[arg(long)]
        speed: Option<f32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => WalkboxConfig::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            WalkboxConfig::load_from_dir(&cwd)?
        }
    };

    let Some(mesh_path) = cli.mesh.clone().or_else(|| config.mesh.clone()) else {
        bail!("No walk-box asset given; pass --mesh or set `mesh` in {}", config::CONFIG_FILE);
    };

    let polygons = asset::load_polygons(&mesh_path, &config.asset)?;
    let mut graph = NavGraph::new(polygons)
        .with_context(|| format!("Invalid walk boxes in {}", mesh_path.display()))?;
    tracing::info!(
        mesh = %mesh_path.display(),
        polygons = graph.polygons().len(),
        nodes = graph.mesh_node_count(),
        "Loaded walk-box mesh"
    );

    match cli.command {
        Commands::Inspect { nodes } => inspect(&graph, nodes),
        Commands::Path { from, to, json } => find_path(&mut graph, from, to, json),
        Commands::Walk { from, to, speed } => walk(&mut graph, &config, from, to, speed),
    }
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got {s:?}"))?;
    let x: f32 = x
        .trim()
        .parse()
        .map_err(|e| format!("invalid x coordinate {x:?}: {e}"))?;
    let y: f32 = y
        .trim()
        .parse()
        .map_err(|e| format!("invalid y coordinate {y:?}: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn inspect(graph: &NavGraph, list_nodes: bool) -> Result<()> {
    println!("Polygons: {}", graph.polygons().len());
    for (i, poly) in graph.polygons().iter().enumerate() {
        let c = poly.centroid();
        println!(
            "  [{i}] {} vertices, {} nodes, centroid ({:.2}, {:.2})",
            poly.len(),
            graph.polygon_nodes(i).len(),
            c.x,
            c.y
        );
    }
    println!("Nodes: {}", graph.mesh_node_count());
    println!("Edges: {}", graph.edge_count());

    if list_nodes {
        for (id, node) in graph.nodes() {
            let kind = match node.kind() {
                NodeKind::Mesh => "mesh",
                NodeKind::Query => "query",
            };
            let p = node.position();
            println!(
                "  #{:<4} {kind:<5} ({:.2}, {:.2}) degree {}",
                id.0,
                p.x,
                p.y,
                node.degree()
            );
        }
    }
    Ok(())
}

fn find_path(graph: &mut NavGraph, from: Vec2, to: Vec2, json: bool) -> Result<()> {
    let path = graph.find_path(from, to);

    if json {
        println!("{}", serde_json::to_string_pretty(&path)?);
        return Ok(());
    }

    match path {
        Some(path) => {
            println!("Waypoints: {} (length {:.2})", path.points.len(), path.length());
            for p in &path.points {
                println!("  ({:.2}, {:.2})", p.x, p.y);
            }
        }
        None => println!("No path"),
    }
    Ok(())
}

fn walk(
    graph: &mut NavGraph,
    config: &WalkboxConfig,
    from: Vec2,
    to: Vec2,
    speed: Option<f32>,
) -> Result<()> {
    let Some(path) = graph.find_path(from, to) else {
        println!("No path; staying at ({:.2}, {:.2})", from.x, from.y);
        return Ok(());
    };

    let speed = speed.unwrap_or(config.walk.speed);
    if speed <= 0.0 || config.walk.frame_dt <= 0.0 {
        bail!("Walk speed and frame_dt must be positive");
    }

    let mut position = path.points.first().copied().unwrap_or(from);
    let mut follower = PathFollower::new(path, speed);

    for frame in 1..=config.walk.max_frames {
        let step = follower.advance(position, config.walk.frame_dt);
        position = step.position;
        println!("{frame:>5} ({:.2}, {:.2})", position.x, position.y);
        if step.arrived {
            tracing::info!(frames = frame, "Arrived");
            return Ok(());
        }
    }

    tracing::warn!(
        max_frames = config.walk.max_frames,
        "Stopped before reaching the destination"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points_with_whitespace_and_signs() {
        assert_eq!(parse_point("1.5,-2"), Ok(Vec2::new(1.5, -2.0)));
        assert_eq!(parse_point(" -300 , 40.25 "), Ok(Vec2::new(-300.0, 40.25)));
        assert!(parse_point("1.5").is_err());
        assert!(parse_point("a,2").is_err());
    }

    #[test]
    fn cli_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "walkbox", "--mesh", "m.json", "path", "--from", "-1,-2", "--to", "3,4",
        ])
        .expect("parse");
        match cli.command {
            Commands::Path { from, to, json } => {
                assert_eq!(from, Vec2::new(-1.0, -2.0));
                assert_eq!(to, Vec2::new(3.0, 4.0));
                assert!(!json);
            }
            _ => panic!("expected path command"),
        }
    }
}
