pub mod bmssp;
pub mod dijkstra;
pub mod traits;

pub use traits::{ShortestPathAlgorithm, ShortestPathResult};

use crate::graph::Graph;
use crate::{Error, Result};
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// Validates an SSSP input before any computation: the source must exist,
/// every adjacency target must be a vertex of the graph, and every weight
/// must be non-negative.
pub(crate) fn validate_input<W, G>(graph: &G, source: usize) -> Result<()>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    if !graph.has_vertex(source) {
        return Err(Error::SourceNotFound);
    }
    let n = graph.vertex_count();
    for u in 0..n {
        for (v, weight) in graph.outgoing_edges(u) {
            if v >= n {
                return Err(Error::InvalidEdge(u, v));
            }
            if weight < W::zero() {
                return Err(Error::NegativeWeight(weight.to_f64().unwrap_or(f64::NAN)));
            }
        }
    }
    Ok(())
}
