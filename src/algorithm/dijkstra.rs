use num_traits::{Float, Zero};
use std::fmt::Debug;

use crate::algorithm::{validate_input, ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::AddressableHeap;
use crate::graph::Graph;
use crate::Result;

/// Classic Dijkstra's algorithm with a decrease-key heap.
///
/// Serves as the reference oracle for the sub-sorting algorithm and as a
/// selectable algorithm in the CLI.
#[derive(Debug, Default)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        validate_input(graph, source)?;

        let n = graph.vertex_count();
        let mut distances: Vec<Option<W>> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];

        distances[source] = Some(W::zero());
        let mut heap = AddressableHeap::with_capacity(n);
        heap.insert(source, W::zero());

        while let Some((u, dist_u)) = heap.extract_min() {
            for (v, weight) in graph.outgoing_edges(u) {
                let candidate = dist_u + weight;
                let improved = match distances[v] {
                    None => true,
                    Some(current) => candidate < current,
                };
                if improved {
                    if heap.contains(v) {
                        heap.decrease_key(v, candidate);
                    } else {
                        heap.insert(v, candidate);
                    }
                    distances[v] = Some(candidate);
                    predecessors[v] = Some(u);
                }
            }
        }

        Ok(ShortestPathResult {
            distances,
            predecessors,
            source,
        })
    }
}
