//! Per-author centrality metrics and graph-level statistics

use crate::graph::algorithms::{betweenness_centrality, bfs_distances, connected_components};
use crate::graph::CoauthorGraph;
use rayon::prelude::*;
use serde::Serialize;

/// Structural importance metrics for one author, alongside the node's
/// stored attributes. Metric values are rounded to 4 decimal places.
#[derive(Debug, Clone, Serialize)]
pub struct CentralityRecord {
    pub paper_count: u32,
    pub affiliation: String,
    pub degree_centrality: f64,
    pub betweenness_centrality: f64,
    pub closeness_centrality: f64,
    pub clustering_coefficient: f64,
}

/// Graph-level snapshot computed once per analysis request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworkStats {
    pub nodes: usize,
    pub edges: usize,
    pub density: f64,
    pub connected_components: usize,
    pub largest_component_size: usize,
    pub avg_clustering: f64,
}

/// Compute all four centrality metrics per node plus network statistics.
///
/// Empty graph yields an empty record list and all-zero stats. Records
/// are indexed by node; the report layer attaches author keys.
pub fn compute_centralities(graph: &CoauthorGraph) -> (Vec<CentralityRecord>, NetworkStats) {
    let n = graph.node_count();
    if n == 0 {
        return (Vec::new(), NetworkStats::default());
    }

    let betweenness = betweenness_centrality(graph);
    let closeness = closeness_centrality(graph);
    let clustering = clustering_coefficients(graph);

    let degree_scale = if n > 1 { 1.0 / (n - 1) as f64 } else { 0.0 };

    let records = (0..n as u32)
        .map(|node| {
            let attrs = graph.attributes(node);
            CentralityRecord {
                paper_count: attrs.paper_count,
                affiliation: attrs.affiliation.clone(),
                degree_centrality: round4(graph.degree(node) as f64 * degree_scale),
                betweenness_centrality: round4(betweenness[node as usize]),
                closeness_centrality: round4(closeness[node as usize]),
                clustering_coefficient: round4(clustering[node as usize]),
            }
        })
        .collect();

    let components = connected_components(graph);
    let largest = components.iter().map(|c| c.len()).max().unwrap_or(0);
    let density = if n > 1 {
        2.0 * graph.edge_count() as f64 / (n as f64 * (n - 1) as f64)
    } else {
        0.0
    };
    let avg_clustering = clustering.iter().sum::<f64>() / n as f64;

    let stats = NetworkStats {
        nodes: n,
        edges: graph.edge_count(),
        density: round4(density),
        connected_components: components.len(),
        largest_component_size: largest,
        avg_clustering: round4(avg_clustering),
    };

    (records, stats)
}

/// Closeness centrality with the component-size correction for
/// disconnected graphs: ((r-1)/Σd) · ((r-1)/(n-1)) where r counts the
/// nodes reachable from v. The correction keeps values in [0,1] and
/// ranks nodes of small components below equally-placed nodes of large
/// ones; isolated nodes score 0.
fn closeness_centrality(graph: &CoauthorGraph) -> Vec<f64> {
    let n = graph.node_count();
    if n <= 1 {
        return vec![0.0; n];
    }

    (0..n as u32)
        .into_par_iter()
        .map(|node| {
            let mut reachable = 0u64;
            let mut distance_sum = 0u64;
            for d in bfs_distances(graph, node).into_iter().flatten() {
                reachable += 1;
                distance_sum += u64::from(d);
            }
            if distance_sum == 0 {
                return 0.0;
            }
            let others = (reachable - 1) as f64;
            (others / distance_sum as f64) * (others / (n - 1) as f64)
        })
        .collect()
}

/// Weighted clustering coefficient per node.
///
/// For a node with degree d >= 2, sums the geometric mean of the three
/// edge weights of each closed triangle through the node, with weights
/// normalized by the graph's maximum edge weight, then scales by
/// 2/(d·(d-1)). Degenerates to the unweighted coefficient when all
/// weights are equal. Nodes with degree < 2 score 0.
fn clustering_coefficients(graph: &CoauthorGraph) -> Vec<f64> {
    let n = graph.node_count();
    let max_weight = graph.max_edge_weight().unwrap_or(1) as f64;

    (0..n as u32)
        .map(|node| {
            let neighbors = graph.neighbors(node);
            let d = neighbors.len();
            if d < 2 {
                return 0.0;
            }

            let mut triangle_sum = 0.0;
            for i in 0..neighbors.len() {
                let (v, w_uv) = neighbors[i];
                for &(w, w_uw) in &neighbors[i + 1..] {
                    if let Some(w_vw) = graph.edge_weight(v, w) {
                        let product = (w_uv as f64 / max_weight)
                            * (w_uw as f64 / max_weight)
                            * (w_vw as f64 / max_weight);
                        triangle_sum += product.cbrt();
                    }
                }
            }

            2.0 * triangle_sum / (d as f64 * (d - 1) as f64)
        })
        .collect()
}

/// Round to 4 decimal digits, the precision exposed in result records.
pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
