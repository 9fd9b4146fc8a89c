use bmssp::graph::Graph;
use bmssp::{sssp, AdjacencyGraph, Bmssp, Dijkstra, Error, ShortestPathAlgorithm};
use ordered_float::OrderedFloat;

fn graph_from(n: usize, edges: &[(usize, usize, f64)]) -> AdjacencyGraph<OrderedFloat<f64>> {
    let edges: Vec<_> = edges
        .iter()
        .map(|&(u, v, w)| (u, v, OrderedFloat(w)))
        .collect();
    AdjacencyGraph::from_edges(n, &edges).unwrap()
}

fn distances(graph: &AdjacencyGraph<OrderedFloat<f64>>, source: usize) -> Vec<f64> {
    sssp(graph, source)
        .unwrap()
        .into_iter()
        .map(|d| d.into_inner())
        .collect()
}

#[test]
fn linear_chain() {
    let graph = graph_from(4, &[(0, 1, 1.0), (1, 2, 2.0), (2, 3, 1.0)]);
    assert_eq!(distances(&graph, 0), vec![0.0, 1.0, 3.0, 4.0]);
}

#[test]
fn parallel_paths() {
    let graph = graph_from(
        4,
        &[
            (0, 1, 1.0),
            (0, 2, 4.0),
            (1, 2, 2.0),
            (1, 3, 5.0),
            (2, 3, 1.0),
        ],
    );
    assert_eq!(distances(&graph, 0), vec![0.0, 1.0, 3.0, 4.0]);
}

#[test]
fn unreachable_vertex() {
    let graph = graph_from(3, &[(0, 1, 7.0)]);
    let dist = distances(&graph, 0);
    assert_eq!(dist[0], 0.0);
    assert_eq!(dist[1], 7.0);
    assert!(dist[2].is_infinite());
}

#[test]
fn zero_weight_edge() {
    let graph = graph_from(3, &[(0, 1, 0.0), (1, 2, 5.0)]);
    assert_eq!(distances(&graph, 0), vec![0.0, 0.0, 5.0]);
}

#[test]
fn diamond_with_equal_cost_paths() {
    let graph = graph_from(4, &[(0, 1, 2.0), (0, 2, 2.0), (1, 3, 3.0), (2, 3, 3.0)]);
    assert_eq!(distances(&graph, 0), vec![0.0, 2.0, 2.0, 5.0]);
}

#[test]
fn singleton_graph() {
    let graph: AdjacencyGraph<OrderedFloat<f64>> = AdjacencyGraph::new(1);
    assert_eq!(distances(&graph, 0), vec![0.0]);
}

#[test]
fn zero_weight_cycle() {
    let graph = graph_from(3, &[(0, 1, 0.0), (1, 0, 0.0), (1, 2, 1.0)]);
    assert_eq!(distances(&graph, 0), vec![0.0, 0.0, 1.0]);
}

#[test]
fn source_distance_is_zero_and_runs_are_idempotent() {
    let graph = graph_from(
        5,
        &[
            (0, 1, 1.5),
            (1, 2, 0.5),
            (2, 0, 1.0),
            (2, 3, 2.5),
            (3, 4, 0.25),
            (4, 1, 9.0),
        ],
    );
    let first = distances(&graph, 0);
    let second = distances(&graph, 0);
    assert_eq!(first[0], 0.0);
    assert_eq!(first, second);
}

#[test]
fn source_out_of_range_is_rejected() {
    let graph = graph_from(3, &[(0, 1, 1.0)]);
    let result = sssp(&graph, 3);
    assert!(matches!(result, Err(Error::SourceNotFound)));
}

#[test]
fn every_finite_distance_is_witnessed_by_an_edge() {
    let graph = graph_from(
        6,
        &[
            (0, 1, 1.0),
            (0, 2, 2.0),
            (1, 3, 2.0),
            (2, 3, 1.0),
            (3, 4, 0.0),
            (1, 4, 3.5),
            (4, 5, 1.0),
        ],
    );
    let result = Bmssp::new().compute_shortest_paths(&graph, 0).unwrap();
    for v in 0..6 {
        let Some(dist_v) = result.distances[v] else {
            continue;
        };
        if v == 0 {
            assert_eq!(dist_v, OrderedFloat(0.0));
            continue;
        }
        let pred = result.predecessors[v].expect("reachable vertex has a predecessor");
        let dist_pred = result.distances[pred].expect("predecessor is reachable");
        let witnessed = graph
            .outgoing_edges(pred)
            .any(|(target, weight)| target == v && dist_pred + weight == dist_v);
        assert!(witnessed, "no edge from {pred} witnesses d[{v}] = {dist_v}");
    }
}

/// A graph oracle that performs no validation of its own, so invalid inputs
/// reach the algorithms intact.
#[derive(Debug)]
struct RawGraph {
    n: usize,
    edges: Vec<Vec<(usize, OrderedFloat<f64>)>>,
}

impl Graph<OrderedFloat<f64>> for RawGraph {
    fn vertex_count(&self) -> usize {
        self.n
    }

    fn edge_count(&self) -> usize {
        self.edges.iter().map(|e| e.len()).sum()
    }

    fn outgoing_edges(
        &self,
        vertex: usize,
    ) -> Box<dyn Iterator<Item = (usize, OrderedFloat<f64>)> + '_> {
        match self.edges.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }
}

#[test]
fn negative_weight_is_rejected_before_computation() {
    let graph = RawGraph {
        n: 2,
        edges: vec![vec![(1, OrderedFloat(-1.0))], vec![]],
    };
    assert!(matches!(sssp(&graph, 0), Err(Error::NegativeWeight(_))));
}

#[test]
fn dangling_edge_target_is_rejected() {
    let graph = RawGraph {
        n: 2,
        edges: vec![vec![(5, OrderedFloat(1.0))], vec![]],
    };
    assert!(matches!(sssp(&graph, 0), Err(Error::InvalidEdge(0, 5))));
}

#[test]
fn get_path_reconstructs_the_linear_chain() {
    let graph = graph_from(4, &[(0, 1, 1.0), (1, 2, 2.0), (2, 3, 1.0)]);
    let algorithm = Bmssp::new();
    let result = algorithm.compute_shortest_paths(&graph, 0).unwrap();

    let path = <Bmssp as ShortestPathAlgorithm<OrderedFloat<f64>, AdjacencyGraph<OrderedFloat<f64>>>>::get_path(&algorithm, &result, 3);
    assert_eq!(path, Some(vec![0, 1, 2, 3]));
}

#[test]
fn get_path_resolves_the_equal_cost_diamond_deterministically() {
    let graph = graph_from(4, &[(0, 1, 2.0), (0, 2, 2.0), (1, 3, 3.0), (2, 3, 3.0)]);
    let algorithm = Bmssp::new();
    let result = algorithm.compute_shortest_paths(&graph, 0).unwrap();

    // Both arms cost 5; the tie-break keeps the smaller predecessor id.
    let path = <Bmssp as ShortestPathAlgorithm<OrderedFloat<f64>, AdjacencyGraph<OrderedFloat<f64>>>>::get_path(&algorithm, &result, 3).unwrap();
    assert_eq!(path, vec![0, 1, 3]);
    for pair in path.windows(2) {
        assert!(
            graph.outgoing_edges(pair[0]).any(|(target, _)| target == pair[1]),
            "path step {} -> {} is not an edge",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn get_path_returns_none_for_unreachable_targets() {
    let graph = graph_from(3, &[(0, 1, 7.0)]);
    let algorithm = Bmssp::new();
    let result = algorithm.compute_shortest_paths(&graph, 0).unwrap();

    let path = <Bmssp as ShortestPathAlgorithm<OrderedFloat<f64>, AdjacencyGraph<OrderedFloat<f64>>>>::get_path(&algorithm, &result, 2);
    assert_eq!(path, None);
}

#[test]
fn get_path_walks_out_of_a_weight_cycle() {
    // The graph contains a cycle, but the predecessor tree never does.
    let graph = graph_from(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0), (2, 3, 2.0)]);
    let algorithm = Bmssp::new();
    let result = algorithm.compute_shortest_paths(&graph, 0).unwrap();

    let path = <Bmssp as ShortestPathAlgorithm<OrderedFloat<f64>, AdjacencyGraph<OrderedFloat<f64>>>>::get_path(&algorithm, &result, 3);
    assert_eq!(path, Some(vec![0, 1, 2, 3]));
}

#[test]
fn dijkstra_agrees_on_handwritten_graph() {
    let graph = graph_from(
        11,
        &[
            (0, 1, 0.0),
            (0, 2, 1.0),
            (0, 7, 5.0),
            (1, 3, 3.0),
            (1, 4, 2.0),
            (2, 4, 3.0),
            (2, 5, 2.0),
            (3, 6, 2.0),
            (4, 6, 2.0),
            (6, 8, 3.0),
            (7, 9, 2.0),
            (8, 10, 1.0),
            (9, 10, 2.0),
        ],
    );
    let expected = Dijkstra::new().compute_shortest_paths(&graph, 0).unwrap();
    let actual = Bmssp::new().compute_shortest_paths(&graph, 0).unwrap();
    assert_eq!(expected.distances, actual.distances);
}
