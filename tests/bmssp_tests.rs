use bmssp::graph::generators::{grid_digraph, random_digraph, starburst_digraph};
use bmssp::graph::Graph;
use bmssp::{AdjacencyGraph, Bmssp, BmsspParams, Dijkstra, ShortestPathAlgorithm};
use ordered_float::OrderedFloat;
use rand::prelude::*;

fn assert_agrees_with_dijkstra(graph: &AdjacencyGraph<OrderedFloat<f64>>, source: usize) {
    let expected = Dijkstra::new().compute_shortest_paths(graph, source).unwrap();
    let actual = Bmssp::new().compute_shortest_paths(graph, source).unwrap();
    assert_eq!(
        expected.distances, actual.distances,
        "distance mismatch on graph with {} vertices from source {}",
        graph.vertex_count(),
        source
    );
}

#[test]
fn parameters_are_clamped_for_tiny_graphs() {
    for n in 0..4 {
        let params = BmsspParams::from_vertex_count(n);
        assert!(params.k >= 1);
        assert!(params.t >= 1);
        assert!(params.levels >= 1);
    }
}

#[test]
fn parameters_follow_the_log_powers() {
    // L = 10 for n = 1024: k = ⌊10^(1/3)⌋, t = ⌊10^(2/3)⌋, levels = ⌈10/t⌉.
    let params = BmsspParams::from_vertex_count(1024);
    assert_eq!(params.k, 2);
    assert_eq!(params.t, 4);
    assert_eq!(params.levels, 3);
}

#[test]
fn agrees_with_dijkstra_on_random_graphs() {
    for (seed, n) in [(1u64, 30), (2, 60), (3, 120), (4, 250), (5, 400)] {
        let graph = random_digraph(n, 3.0, seed);
        assert_agrees_with_dijkstra(&graph, 0);
    }
}

#[test]
fn agrees_with_dijkstra_from_every_source_of_a_small_graph() {
    let graph = random_digraph(40, 2.5, 77);
    for source in 0..40 {
        assert_agrees_with_dijkstra(&graph, source);
    }
}

#[test]
fn agrees_on_grids_with_many_near_equal_paths() {
    let graph = grid_digraph(12, 12, 9);
    assert_agrees_with_dijkstra(&graph, 0);
}

#[test]
fn agrees_when_pivot_finding_aborts_on_frontier_blowup() {
    // Every hub fans out far past k * |frontier|, forcing the abort branch
    // that keeps the whole frontier as the pivot set.
    let graph = starburst_digraph(8, 32);
    assert_agrees_with_dijkstra(&graph, 0);
}

#[test]
fn agrees_on_all_equal_weights() {
    // Uniform weights make every comparison a tie on the distance component.
    let mut graph = AdjacencyGraph::new(16);
    for u in 0..16usize {
        for v in [(u * 7 + 1) % 16, (u * 3 + 5) % 16] {
            if u != v {
                graph.add_edge(u, v, OrderedFloat(1.0));
            }
        }
    }
    assert_agrees_with_dijkstra(&graph, 0);
}

#[test]
fn explicit_params_override_is_honored() {
    let graph = random_digraph(200, 3.0, 11);
    let expected = Dijkstra::new().compute_shortest_paths(&graph, 0).unwrap();
    for (k, t, levels) in [(1, 1, 8), (2, 2, 4), (3, 5, 2)] {
        let solver = Bmssp::with_params(BmsspParams { k, t, levels });
        let actual = solver.compute_shortest_paths(&graph, 0).unwrap();
        assert_eq!(
            expected.distances, actual.distances,
            "mismatch under params k={k} t={t} levels={levels}"
        );
    }
}

#[test]
fn relabeling_vertices_permutes_distances() {
    let n = 80;
    let graph = random_digraph(n, 3.0, 21);

    let mut permutation: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(99);
    permutation.shuffle(&mut rng);

    let mut relabeled = AdjacencyGraph::new(n);
    for u in 0..n {
        for (v, weight) in graph.outgoing_edges(u) {
            relabeled.add_edge(permutation[u], permutation[v], weight);
        }
    }

    let source = 0;
    let original = Bmssp::new().compute_shortest_paths(&graph, source).unwrap();
    let permuted = Bmssp::new()
        .compute_shortest_paths(&relabeled, permutation[source])
        .unwrap();

    for v in 0..n {
        assert_eq!(
            original.distances[v], permuted.distances[permutation[v]],
            "distance of vertex {v} changed under relabeling"
        );
    }
}

#[test]
fn long_chain_exercises_many_recursion_levels() {
    let n = 600;
    let mut graph = AdjacencyGraph::new(n);
    for v in 0..n - 1 {
        graph.add_edge(v, v + 1, OrderedFloat(1.0 + (v % 3) as f64));
    }
    // A few shortcuts so the frontier is not always a single vertex.
    for v in (0..n - 10).step_by(37) {
        graph.add_edge(v, v + 10, OrderedFloat(4.0));
    }
    assert_agrees_with_dijkstra(&graph, 0);
}
