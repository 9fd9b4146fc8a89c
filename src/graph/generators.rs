use crate::graph::AdjacencyGraph;
use ordered_float::OrderedFloat;
use rand::prelude::*;

/// Generates a random directed graph with `n` vertices and approximately
/// `edge_factor * n` edges, weights uniform in `[1, 100)`.
///
/// Seeded so that tests and benchmarks are reproducible.
pub fn random_digraph(n: usize, edge_factor: f64, seed: u64) -> AdjacencyGraph<OrderedFloat<f64>> {
    let mut graph = AdjacencyGraph::new(n);
    let mut rng = StdRng::seed_from_u64(seed);

    let num_edges = (edge_factor * n as f64) as usize;
    for _ in 0..num_edges {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        // Avoid self-loops
        if u != v {
            let weight = OrderedFloat(rng.gen_range(1.0..100.0));
            graph.add_edge(u, v, weight);
        }
    }

    graph
}

/// Generates a directed grid graph with unit-ish weights: each cell connects
/// to its right and down neighbors with a small random perturbation so that
/// many near-equal path sums exist.
pub fn grid_digraph(width: usize, height: usize, seed: u64) -> AdjacencyGraph<OrderedFloat<f64>> {
    let mut graph = AdjacencyGraph::new(width * height);
    let mut rng = StdRng::seed_from_u64(seed);

    for y in 0..height {
        for x in 0..width {
            let v = y * width + x;
            if x + 1 < width {
                let weight = OrderedFloat(1.0 + rng.gen_range(0.0..0.01));
                graph.add_edge(v, v + 1, weight);
            }
            if y + 1 < height {
                let weight = OrderedFloat(1.0 + rng.gen_range(0.0..0.01));
                graph.add_edge(v, v + width, weight);
            }
        }
    }

    graph
}

/// Generates a star-burst graph: `hubs` high-degree hubs hanging off the
/// source, each fanning out to `spokes` leaves. Frontier expansion from the
/// source is much larger than the frontier itself, which is the shape that
/// makes pivot finding give up and keep the whole frontier as pivots.
pub fn starburst_digraph(hubs: usize, spokes: usize) -> AdjacencyGraph<OrderedFloat<f64>> {
    let n = 1 + hubs + hubs * spokes;
    let mut graph = AdjacencyGraph::new(n);

    for h in 0..hubs {
        let hub = 1 + h;
        graph.add_edge(0, hub, OrderedFloat(1.0 + h as f64));
        for s in 0..spokes {
            let leaf = 1 + hubs + h * spokes + s;
            graph.add_edge(hub, leaf, OrderedFloat(1.0 + s as f64));
        }
    }

    graph
}
