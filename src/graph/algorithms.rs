//! Traversal algorithms over the finished co-authorship graph

use crate::graph::CoauthorGraph;
use rayon::prelude::*;
use std::collections::{HashMap, VecDeque};

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Rank/size of each set (for union by rank)
    rank: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        let mut parent = Vec::with_capacity(size);
        let mut rank = Vec::with_capacity(size);

        // Initialize each node as its own set
        for i in 0..size {
            parent.push(i as u32);
            rank.push(1);
        }

        Self { parent, rank }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let px = self.parent[x as usize];
        if px != x {
            // Path compression: set parent to root
            self.parent[x as usize] = self.find(px);
        }
        self.parent[x as usize]
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return; // Already in the same set
        }

        // Union by rank: attach smaller tree under root of larger tree
        let rank_x = self.rank[root_x as usize];
        let rank_y = self.rank[root_y as usize];

        if rank_x > rank_y {
            self.parent[root_y as usize] = root_x;
            self.rank[root_x as usize] += self.rank[root_y as usize];
        } else {
            self.parent[root_x as usize] = root_y;
            self.rank[root_y as usize] += self.rank[root_x as usize];
        }
    }

    /// Get the size of the set containing x
    pub fn size(&mut self, x: u32) -> u32 {
        let root = self.find(x);
        self.rank[root as usize]
    }
}

/// Connected components in discovery order (by lowest member index).
///
/// Members within a component come back sorted ascending, which makes
/// downstream community id assignment deterministic.
pub fn connected_components(graph: &CoauthorGraph) -> Vec<Vec<u32>> {
    let node_count = graph.node_count();
    let mut sets = DisjointSets::new(node_count);

    for node in 0..node_count as u32 {
        for &(neighbor, _) in graph.neighbors(node) {
            sets.union(node, neighbor);
        }
    }

    let mut root_to_pos: HashMap<u32, usize> = HashMap::new();
    let mut components: Vec<Vec<u32>> = Vec::new();

    for node in 0..node_count as u32 {
        let root = sets.find(node);
        let pos = *root_to_pos.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[pos].push(node);
    }

    components
}

/// Unweighted (hop-count) shortest-path distances from a source node.
/// Unreachable nodes come back as `None`.
pub fn bfs_distances(graph: &CoauthorGraph, source: u32) -> Vec<Option<u32>> {
    let mut dist = vec![None; graph.node_count()];
    dist[source as usize] = Some(0);

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(node) = queue.pop_front() {
        let d = dist[node as usize].unwrap_or(0);
        for &(neighbor, _) in graph.neighbors(node) {
            if dist[neighbor as usize].is_none() {
                dist[neighbor as usize] = Some(d + 1);
                queue.push_back(neighbor);
            }
        }
    }

    dist
}

/// Normalized betweenness centrality via Brandes' algorithm.
///
/// Shortest paths are by hop count; co-authorship weights play no role
/// as distance cost. Per-source dependency accumulation is independent,
/// so sources run in parallel and partial sums are reduced at the end.
/// Undirected normalization: raw sums over ordered pairs divided by
/// (n-1)(n-2), equivalent to the conventional 2/((n-1)(n-2)) scale on
/// unordered pairs. All zeros when n <= 2.
pub fn betweenness_centrality(graph: &CoauthorGraph) -> Vec<f64> {
    let n = graph.node_count();
    if n <= 2 {
        return vec![0.0; n];
    }

    let raw = (0..n as u32)
        .into_par_iter()
        .map(|source| single_source_dependencies(graph, source))
        .reduce(
            || vec![0.0; n],
            |mut acc, partial| {
                for (a, p) in acc.iter_mut().zip(partial) {
                    *a += p;
                }
                acc
            },
        );

    let scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
    raw.into_iter().map(|value| value * scale).collect()
}

/// One Brandes iteration: dependency of every node on shortest paths
/// starting at `source`.
fn single_source_dependencies(graph: &CoauthorGraph, source: u32) -> Vec<f64> {
    let n = graph.node_count();
    let mut sigma = vec![0.0f64; n];
    let mut dist: Vec<i64> = vec![-1; n];
    let mut predecessors: Vec<Vec<u32>> = vec![Vec::new(); n];
    let mut order: Vec<u32> = Vec::with_capacity(n);
    let mut queue = VecDeque::new();

    sigma[source as usize] = 1.0;
    dist[source as usize] = 0;
    queue.push_back(source);

    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &(neighbor, _) in graph.neighbors(node) {
            let ni = neighbor as usize;
            if dist[ni] < 0 {
                dist[ni] = dist[node as usize] + 1;
                queue.push_back(neighbor);
            }
            if dist[ni] == dist[node as usize] + 1 {
                sigma[ni] += sigma[node as usize];
                predecessors[ni].push(node);
            }
        }
    }

    let mut delta = vec![0.0f64; n];
    let mut dependencies = vec![0.0f64; n];

    while let Some(node) = order.pop() {
        let ni = node as usize;
        for &pred in &predecessors[ni] {
            let pi = pred as usize;
            delta[pi] += sigma[pi] / sigma[ni] * (1.0 + delta[ni]);
        }
        if node != source {
            dependencies[ni] = delta[ni];
        }
    }

    dependencies
}
