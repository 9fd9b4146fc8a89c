use std::error::Error;
use std::fs;

use bmssp::graph::Graph;
use bmssp::{sssp, AdjacencyGraph, Dijkstra, ShortestPathAlgorithm};
use clap::Parser;
use log::info;
use ordered_float::OrderedFloat;

#[derive(Parser, Debug)]
#[command(name = "sssp")]
#[command(about = "Run a single-source shortest path algorithm over an edge-list file.", long_about = None)]
struct Cli {
    /// Path to the graph file: first line `n m`, then `m` lines `u v w`
    #[arg(short, long)]
    input: String,

    /// Source vertex to run from
    #[arg(short, long, default_value_t = 0)]
    source: usize,

    #[arg(short, long, default_value_t = String::from("bmssp"))]
    algorithm: String,

    /// Disable diagnostic logging
    #[arg(long, default_value_t = false)]
    no_log: bool,
}

fn parse_graph(text: &str) -> Result<AdjacencyGraph<OrderedFloat<f64>>, Box<dyn Error>> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header = lines.next().ok_or("empty graph file")?;
    let mut fields = header.split_whitespace();
    let n: usize = fields.next().ok_or("missing vertex count")?.parse()?;
    let m: usize = fields.next().ok_or("missing edge count")?.parse()?;

    let mut edges = Vec::with_capacity(m);
    for line in lines {
        let mut fields = line.split_whitespace();
        let from: usize = fields.next().ok_or("missing edge source")?.parse()?;
        let to: usize = fields.next().ok_or("missing edge target")?.parse()?;
        let weight: f64 = fields.next().ok_or("missing edge weight")?.parse()?;
        edges.push((from, to, OrderedFloat(weight)));
    }
    if edges.len() != m {
        return Err(format!("expected {} edges, found {}", m, edges.len()).into());
    }

    Ok(AdjacencyGraph::from_edges(n, &edges)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !cli.no_log {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let text = fs::read_to_string(&cli.input)?;
    let graph = parse_graph(&text)?;
    info!(
        "loaded graph from {}: {} vertices, {} edges",
        cli.input,
        graph.vertex_count(),
        graph.edge_count()
    );

    let distances: Vec<OrderedFloat<f64>> = match cli.algorithm.as_str() {
        "bmssp" => sssp(&graph, cli.source)?,
        "dijkstra" => {
            let result = Dijkstra::new().compute_shortest_paths(&graph, cli.source)?;
            result
                .distances
                .into_iter()
                .map(|d| d.unwrap_or(OrderedFloat(f64::INFINITY)))
                .collect()
        }
        other => {
            return Err(format!(
                "unknown algorithm {other:?}, possible options are: (\"bmssp\", \"dijkstra\")"
            )
            .into())
        }
    };

    for (vertex, distance) in distances.iter().enumerate() {
        if distance.is_finite() {
            println!("{} {}", vertex, distance.into_inner());
        } else {
            println!("{} inf", vertex);
        }
    }

    Ok(())
}
