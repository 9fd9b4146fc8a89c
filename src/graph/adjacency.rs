use crate::graph::traits::Graph;
use crate::{Error, Result};
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// A directed graph stored as dense adjacency lists.
///
/// Vertices are integer indices `0..n`. The representation is append-only;
/// once handed to an algorithm the graph is treated as immutable.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Outgoing edges for each vertex: `adjacency[u] = [(v, weight), ...]`
    adjacency: Vec<Vec<(usize, W)>>,

    /// Number of edges in the graph
    edge_count: usize,
}

impl<W> AdjacencyGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates a graph with `vertices` vertices and no edges
    pub fn new(vertices: usize) -> Self {
        AdjacencyGraph {
            adjacency: vec![Vec::new(); vertices],
            edge_count: 0,
        }
    }

    /// Builds a graph from an edge list, validating endpoints and weights
    pub fn from_edges(vertices: usize, edges: &[(usize, usize, W)]) -> Result<Self> {
        let mut graph = AdjacencyGraph::new(vertices);
        for &(from, to, weight) in edges {
            graph.try_add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    /// Adds a directed edge. Returns `false` (and adds nothing) if either
    /// endpoint is out of range or the weight is negative.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: W) -> bool {
        self.try_add_edge(from, to, weight).is_ok()
    }

    /// Adds a directed edge, reporting why it was rejected
    pub fn try_add_edge(&mut self, from: usize, to: usize, weight: W) -> Result<()> {
        if from >= self.adjacency.len() {
            return Err(Error::InvalidVertex(from));
        }
        if to >= self.adjacency.len() {
            return Err(Error::InvalidEdge(from, to));
        }
        if weight < W::zero() {
            return Err(Error::NegativeWeight(weight.to_f64().unwrap_or(f64::NAN)));
        }
        self.adjacency[from].push((to, weight));
        self.edge_count += 1;
        Ok(())
    }
}

impl<W> Graph<W> for AdjacencyGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.adjacency.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }
}
