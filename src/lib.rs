//! Deterministic sub-sorting single-source shortest paths.
//!
//! This library implements the algorithm described in "Breaking the Sorting
//! Barrier for Directed Single-Source Shortest Paths" by Duan, Mao, Mao, Shu
//! and Yin (2025).
//!
//! The algorithm computes exact shortest-path distances on directed graphs
//! with real non-negative edge weights in deterministic O(m log^(2/3) n)
//! time. Instead of maintaining a totally ordered frontier the way Dijkstra
//! does, it recursively partitions the distance range (BMSSP), prunes each
//! frontier with a bounded Bellman-Ford pass (pivot finding), and keeps the
//! pending frontier in a partial-sort container that only ever orders items
//! up to a block boundary.

pub mod algorithm;
pub mod data_structures;
pub mod graph;

pub use algorithm::{
    bmssp::{Bmssp, BmsspParams},
    dijkstra::Dijkstra,
    ShortestPathAlgorithm, ShortestPathResult,
};
/// Re-export main types for convenient use
pub use graph::adjacency::AdjacencyGraph;

use num_traits::{Float, Zero};
use std::fmt::Debug;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Invalid edge: from {0} to {1}")]
    InvalidEdge(usize, usize),

    #[error("Negative edge weight: {0}")]
    NegativeWeight(f64),

    #[error("Source vertex not found in graph")]
    SourceNotFound,
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Computes shortest-path distances from `source` to every vertex of `graph`.
///
/// Unreachable vertices are reported as `W::infinity()`. Input is validated
/// before any computation: the source must be a vertex of the graph, every
/// adjacency target must be a vertex of the graph, and every weight must be
/// non-negative.
pub fn sssp<W, G>(graph: &G, source: usize) -> Result<Vec<W>>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: graph::Graph<W>,
{
    let result = Bmssp::new().compute_shortest_paths(graph, source)?;
    Ok(result
        .distances
        .into_iter()
        .map(|d| d.unwrap_or_else(W::infinity))
        .collect())
}
