use std::collections::HashSet;
use std::fmt::Debug;

use log::{debug, trace};
use num_traits::{Float, Zero};

use crate::algorithm::{validate_input, ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::{AddressableHeap, BlockList};
use crate::graph::Graph;
use crate::Result;

/// Sentinel predecessor for vertices without one
const NO_PRED: usize = usize::MAX;

/// Recursion parameters derived from the vertex count: with `L = log2 n`,
/// `k = ⌊L^(1/3)⌋`, `t = ⌊L^(2/3)⌋`, and `⌈L/t⌉` recursion levels. All three
/// are clamped to at least 1 so small graphs stay well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmsspParams {
    /// Relaxation depth of pivot finding and extraction cap of the base case
    pub k: usize,

    /// Level-to-level shrink exponent of the pull block size
    pub t: usize,

    /// Top recursion level
    pub levels: usize,
}

impl BmsspParams {
    /// Derives the standard parameters for a graph with `n` vertices
    pub fn from_vertex_count(n: usize) -> Self {
        let log_n = (n.max(2) as f64).log2();
        let k = (log_n.powf(1.0 / 3.0).floor() as usize).max(1);
        let t = (log_n.powf(2.0 / 3.0).floor() as usize).max(1);
        let levels = ((log_n / t as f64).ceil() as usize).max(1);
        BmsspParams { k, t, levels }
    }

    /// Pull block size `M = 2^((l-1)·t)` for a frame at `level >= 1`, capped
    /// by the vertex count since a pull can never return more live items
    fn pull_capacity(&self, level: usize, n: usize) -> usize {
        pow2_saturating((level - 1).saturating_mul(self.t)).min(n.max(1))
    }

    /// Completion budget `k · 2^(l·t)` for a frame at `level`
    fn frame_budget(&self, level: usize) -> usize {
        self.k
            .saturating_mul(pow2_saturating(level.saturating_mul(self.t)))
    }
}

/// Tentative path record for one vertex.
///
/// The derived ordering is the lexicographic `(dist, depth, pred)` tie-break
/// applied on every relaxation, in pivot finding, the base case, and the
/// BMSSP loop alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PathLabel<W> {
    dist: W,
    depth: u32,
    pred: usize,
}

impl<W> PathLabel<W>
where
    W: Float,
{
    fn unreached() -> Self {
        PathLabel {
            dist: W::infinity(),
            depth: u32::MAX,
            pred: NO_PRED,
        }
    }
}

/// The value a vertex carries through the partial-sort container, the
/// base-case heap, and every frame boundary: `(dist, depth, vertex)`,
/// ordered lexicographically.
///
/// Together with the relaxation tie-break this restores the paper's
/// distinct-path-weights assumption: two different vertices never compare
/// equal, so boundary cuts always make progress even when summed weights
/// tie (zero-weight edges, equal-cost parallel paths).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PathValue<W> {
    dist: W,
    depth: u32,
    vertex: usize,
}

impl<W> PathValue<W>
where
    W: Float,
{
    fn infinity() -> Self {
        PathValue {
            dist: W::infinity(),
            depth: u32::MAX,
            vertex: usize::MAX,
        }
    }
}

/// Outcome of offering a candidate path record to a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relaxed {
    /// The candidate was strictly smaller and replaced the stored record
    Better,
    /// The candidate equals the stored record exactly
    Equal,
    /// The stored record wins; nothing changed
    Worse,
}

/// Offers the path through `u` to `v` under the tie-break order, committing
/// on strict improvement. Returns the candidate record either way.
fn relax<W>(labels: &mut [PathLabel<W>], u: usize, v: usize, weight: W) -> (PathLabel<W>, Relaxed)
where
    W: Float + Zero + Debug + Copy + Ord,
{
    let candidate = PathLabel {
        dist: labels[u].dist + weight,
        depth: labels[u].depth.saturating_add(1),
        pred: u,
    };
    let outcome = commit(labels, v, candidate);
    (candidate, outcome)
}

/// Compares a prebuilt candidate record against a vertex's stored record,
/// committing on strict improvement
fn commit<W>(labels: &mut [PathLabel<W>], v: usize, candidate: PathLabel<W>) -> Relaxed
where
    W: Float + Zero + Debug + Copy + Ord,
{
    if candidate < labels[v] {
        labels[v] = candidate;
        Relaxed::Better
    } else if candidate == labels[v] {
        Relaxed::Equal
    } else {
        Relaxed::Worse
    }
}

/// One BMSSP execution: borrows the graph and owns the label array shared by
/// every recursive frame.
struct Solver<'a, W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    graph: &'a G,
    params: BmsspParams,
    labels: Vec<PathLabel<W>>,
}

impl<'a, W, G> Solver<'a, W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn new(graph: &'a G, source: usize, params: BmsspParams) -> Self {
        let mut labels = vec![PathLabel::unreached(); graph.vertex_count()];
        labels[source] = PathLabel {
            dist: W::zero(),
            depth: 0,
            pred: NO_PRED,
        };
        Solver {
            graph,
            params,
            labels,
        }
    }

    fn solve(&mut self, source: usize) {
        debug!(
            "bmssp: n={} k={} t={} levels={}",
            self.graph.vertex_count(),
            self.params.k,
            self.params.t,
            self.params.levels
        );
        let top = self.params.levels;
        let (_, completed) = self.bmssp(top, PathValue::infinity(), &[source]);
        debug!("bmssp: top-level frame completed {} vertices", completed.len());
    }

    fn value_of(&self, vertex: usize) -> PathValue<W> {
        let label = self.labels[vertex];
        PathValue {
            dist: label.dist,
            depth: label.depth,
            vertex,
        }
    }

    /// One recursive frame: prune the frontier to pivots, then repeatedly
    /// pull a near-minimum block from the container, complete it at the
    /// level below, and route the resulting relaxations back into the
    /// container until the completion budget is spent or the container
    /// drains.
    ///
    /// Returns `(B', U)` where `B' <= bound` and `U` is the set of vertices
    /// whose distance was finalized strictly below `B'`.
    fn bmssp(
        &mut self,
        level: usize,
        bound: PathValue<W>,
        frontier: &[usize],
    ) -> (PathValue<W>, Vec<usize>) {
        if frontier.is_empty() {
            return (bound, Vec::new());
        }
        if level == 0 {
            return self.base_case(bound, frontier);
        }

        let (pivots, workset) = self.find_pivots(bound, frontier);

        let capacity = self.params.pull_capacity(level, self.graph.vertex_count());
        let mut queue: BlockList<usize, PathValue<W>> = BlockList::new(capacity, bound);
        for &x in &pivots {
            queue.insert(x, self.value_of(x));
        }

        let budget = self.params.frame_budget(level);
        let mut completed: HashSet<usize> = HashSet::new();
        let mut last_bound = bound;

        while completed.len() < budget && !queue.is_empty() {
            let (inner_bound, block) = queue.pull();
            trace!("level {level}: pulled block of {}", block.len());
            let (block_bound, block_completed) = self.bmssp(level - 1, inner_bound, &block);
            last_bound = block_bound;

            let mut prepend: Vec<(usize, PathValue<W>)> = Vec::new();
            let graph = self.graph;
            for &u in &block_completed {
                // A vertex completed by an earlier pull already relaxed
                // outward; only first-time completions do.
                if !completed.insert(u) {
                    continue;
                }
                for (v, weight) in graph.outgoing_edges(u) {
                    let (candidate, outcome) = relax(&mut self.labels, u, v, weight);
                    // An equal record means this frame's subtree produced the
                    // path that is current; the target still needs requeuing.
                    if outcome == Relaxed::Worse {
                        continue;
                    }
                    let value = PathValue {
                        dist: candidate.dist,
                        depth: candidate.depth,
                        vertex: v,
                    };
                    if inner_bound <= value && value < bound {
                        queue.insert(v, value);
                    } else if block_bound <= value && value < inner_bound {
                        prepend.push((v, value));
                    }
                }
            }
            // Pulled vertices the child could not finalize fall back into the
            // just-processed interval and are retried as near-front items.
            for &x in &block {
                let value = self.value_of(x);
                if block_bound <= value && value < inner_bound {
                    prepend.push((x, value));
                }
            }
            queue.batch_prepend(prepend);
        }

        debug!(
            "level {level}: frame completed {} vertices (budget {budget}, bound {:?})",
            completed.len(),
            bound
        );

        let final_bound = if last_bound < bound { last_bound } else { bound };
        let mut completed: Vec<usize> = completed.into_iter().collect();
        let mut in_completed: HashSet<usize> = completed.iter().copied().collect();
        for &x in &workset {
            if self.value_of(x) < final_bound && in_completed.insert(x) {
                completed.push(x);
            }
        }
        (final_bound, completed)
    }

    /// Level-0 frame: Dijkstra from the pulled singleton, stopping after at
    /// most `k + 1` extractions and never following an edge on or past the
    /// bound.
    fn base_case(&mut self, bound: PathValue<W>, frontier: &[usize]) -> (PathValue<W>, Vec<usize>) {
        debug_assert!(frontier.len() <= 1, "level-0 frames take singleton frontiers");

        let mut heap: AddressableHeap<PathValue<W>> =
            AddressableHeap::with_capacity(self.params.k + 2);
        for &x in frontier {
            let value = self.value_of(x);
            if value < bound {
                heap.insert(x, value);
            }
        }

        let cap = self.params.k + 1;
        let mut settled: Vec<usize> = Vec::with_capacity(cap);
        let mut settled_set: HashSet<usize> = HashSet::with_capacity(cap);

        while let Some((u, _)) = heap.extract_min() {
            settled.push(u);
            settled_set.insert(u);
            // The (k+1)-th extraction only serves to cut the boundary.
            if settled.len() == cap {
                break;
            }
            let graph = self.graph;
            let reach = self.labels[u];
            for (v, weight) in graph.outgoing_edges(u) {
                let candidate = PathLabel {
                    dist: reach.dist + weight,
                    depth: reach.depth.saturating_add(1),
                    pred: u,
                };
                let value = PathValue {
                    dist: candidate.dist,
                    depth: candidate.depth,
                    vertex: v,
                };
                // Unlike pivot finding, relaxations on or past the bound are
                // skipped entirely here; the label stays untouched.
                if value >= bound {
                    continue;
                }
                let outcome = commit(&mut self.labels, v, candidate);
                if outcome == Relaxed::Worse || settled_set.contains(&v) {
                    continue;
                }
                if heap.contains(v) {
                    heap.decrease_key(v, value);
                } else {
                    heap.insert(v, value);
                }
            }
        }

        if settled.len() <= self.params.k {
            return (bound, settled);
        }
        let cut = self.value_of(settled[self.params.k]);
        let kept = settled
            .into_iter()
            .filter(|&v| self.value_of(v) < cut)
            .collect();
        (cut, kept)
    }

    /// Bounded Bellman-Ford pruning pass.
    ///
    /// Runs `k` synchronous rounds from the frontier, collecting every vertex
    /// reached below the bound into the workset. Aborts once the workset
    /// outgrows `k · |frontier|`, in which case the frontier itself is the
    /// pivot set; otherwise every workset vertex is a pivot. Successful
    /// relaxations commit to the shared labels even when the result lands on
    /// or past the bound; the bound only stops layer growth.
    fn find_pivots(
        &mut self,
        bound: PathValue<W>,
        frontier: &[usize],
    ) -> (Vec<usize>, Vec<usize>) {
        let mut workset: Vec<usize> = frontier.to_vec();
        let mut in_workset: HashSet<usize> = frontier.iter().copied().collect();
        let limit = self.params.k.saturating_mul(frontier.len());

        let mut current: Vec<usize> = frontier.to_vec();
        for _ in 0..self.params.k {
            let mut next: Vec<usize> = Vec::new();
            let mut in_next: HashSet<usize> = HashSet::new();
            let graph = self.graph;
            for &u in &current {
                for (v, weight) in graph.outgoing_edges(u) {
                    let (candidate, outcome) = relax(&mut self.labels, u, v, weight);
                    if outcome != Relaxed::Better {
                        continue;
                    }
                    let value = PathValue {
                        dist: candidate.dist,
                        depth: candidate.depth,
                        vertex: v,
                    };
                    if value < bound && in_next.insert(v) {
                        next.push(v);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            for &v in &next {
                if in_workset.insert(v) {
                    workset.push(v);
                }
            }
            if workset.len() > limit {
                trace!(
                    "pivots: workset {} outgrew limit {}, keeping frontier as pivots",
                    workset.len(),
                    limit
                );
                return (frontier.to_vec(), workset);
            }
            current = next;
        }

        (workset.clone(), workset)
    }
}

#[inline]
fn pow2_saturating(exp: usize) -> usize {
    if exp >= usize::BITS as usize {
        usize::MAX
    } else {
        1usize << exp
    }
}

/// Implementation of the O(m log^(2/3) n) single-source shortest path
/// algorithm from "Breaking the Sorting Barrier for Directed Single-Source
/// Shortest Paths" (Duan, Mao, Mao, Shu, Yin 2025).
#[derive(Debug, Default)]
pub struct Bmssp {
    /// Parameter override; derived from the vertex count when absent
    params: Option<BmsspParams>,
}

impl Bmssp {
    /// Creates a new instance with parameters derived per graph
    pub fn new() -> Self {
        Bmssp { params: None }
    }

    /// Creates a new instance with explicit parameters
    pub fn with_params(params: BmsspParams) -> Self {
        Bmssp {
            params: Some(params),
        }
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Bmssp
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "BMSSP (O(m log^(2/3) n))"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        validate_input(graph, source)?;

        let n = graph.vertex_count();
        // Nothing to recurse on for a single vertex.
        if n <= 1 {
            return Ok(ShortestPathResult {
                distances: vec![Some(W::zero()); n],
                predecessors: vec![None; n],
                source,
            });
        }

        let params = self
            .params
            .unwrap_or_else(|| BmsspParams::from_vertex_count(n));
        // Caller-supplied parameters get the same clamping as derived ones.
        let params = BmsspParams {
            k: params.k.max(1),
            t: params.t.max(1),
            levels: params.levels.max(1),
        };
        let mut solver = Solver::new(graph, source, params);
        solver.solve(source);

        let mut distances = Vec::with_capacity(n);
        let mut predecessors = Vec::with_capacity(n);
        for label in &solver.labels {
            if label.dist.is_finite() {
                distances.push(Some(label.dist));
                predecessors.push((label.pred != NO_PRED).then_some(label.pred));
            } else {
                distances.push(None);
                predecessors.push(None);
            }
        }

        Ok(ShortestPathResult {
            distances,
            predecessors,
            source,
        })
    }
}
