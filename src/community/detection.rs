//! Greedy modularity community detection
//!
//! Each connected component is partitioned independently so that
//! modularity optimization never mixes unrelated subgraphs. Components
//! too small for a meaningful partition, and components on which the
//! grouping procedure fails, collapse to a single community.

use crate::community::CommunityAssignment;
use crate::graph::algorithms::connected_components;
use crate::graph::CoauthorGraph;
use std::collections::{BTreeMap, HashMap};

/// Minimum component size for running the modularity search
const MIN_MODULARITY_SIZE: usize = 3;

/// Partition the graph into communities. Returns an empty assignment
/// for an empty graph.
pub fn detect_communities(graph: &CoauthorGraph) -> CommunityAssignment {
    let node_count = graph.node_count();
    if node_count == 0 {
        return CommunityAssignment::default();
    }

    let mut ids = vec![0u32; node_count];
    let mut next_id: u32 = 0;

    for component in connected_components(graph) {
        if component.len() < MIN_MODULARITY_SIZE {
            for &node in &component {
                ids[node as usize] = next_id;
            }
            next_id += 1;
            continue;
        }

        match greedy_modularity_groups(graph, &component) {
            Some(groups) => {
                for group in groups {
                    for node in group {
                        ids[node as usize] = next_id;
                    }
                    next_id += 1;
                }
            }
            None => {
                // Fail-soft: the component becomes one community and
                // detection continues with the rest of the graph.
                log::warn!(
                    "Modularity grouping failed on a component of {} nodes; using a single community",
                    component.len()
                );
                for &node in &component {
                    ids[node as usize] = next_id;
                }
                next_id += 1;
            }
        }
    }

    log::info!("Detected {} communities", next_id);
    CommunityAssignment::new(ids, next_id as usize)
}

/// Greedy modularity maximization (CNM-style) over one component's
/// induced subgraph.
///
/// Starts from singleton communities and repeatedly merges the pair of
/// connected communities with the largest modularity gain until no
/// merge improves modularity. Inter-community edge counts live in a
/// `BTreeMap` so the scan order, and therefore tie-breaking, is
/// deterministic. Returns `None` if the component's local structure is
/// inconsistent, which callers treat as a fallback signal.
fn greedy_modularity_groups(graph: &CoauthorGraph, members: &[u32]) -> Option<Vec<Vec<u32>>> {
    let n = members.len();
    let position: HashMap<u32, usize> = members
        .iter()
        .enumerate()
        .map(|(local, &node)| (node, local))
        .collect();

    // Local unweighted degree and inter-community edge counts. The
    // modularity score intentionally ignores co-authorship weights,
    // matching the unweighted greedy grouping of the reference metric.
    let mut degree = vec![0.0f64; n];
    let mut between: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    let mut edge_total = 0.0f64;

    for (local, &node) in members.iter().enumerate() {
        for &(neighbor, _) in graph.neighbors(node) {
            let &other = position.get(&neighbor)?;
            if local < other {
                *between.entry((local, other)).or_insert(0.0) += 1.0;
                degree[local] += 1.0;
                degree[other] += 1.0;
                edge_total += 1.0;
            }
        }
    }

    if edge_total == 0.0 {
        return None;
    }

    // Community state: every local node starts as its own community.
    let mut membership: Vec<usize> = (0..n).collect();
    let mut total_degree = degree;

    loop {
        let mut best: Option<(f64, (usize, usize))> = None;
        for (&pair, &edges) in &between {
            let (ci, cj) = pair;
            let gain = edges / edge_total
                - 2.0 * (total_degree[ci] / (2.0 * edge_total))
                    * (total_degree[cj] / (2.0 * edge_total));
            if best.map_or(true, |(best_gain, _)| gain > best_gain) {
                best = Some((gain, pair));
            }
        }

        let (gain, (ci, cj)) = match best {
            Some(found) => found,
            None => break,
        };
        if gain <= 0.0 {
            break;
        }

        // Merge cj into ci and reroute cj's inter-community edges.
        total_degree[ci] += total_degree[cj];
        total_degree[cj] = 0.0;

        let stale: Vec<((usize, usize), f64)> = between
            .iter()
            .filter(|&(&(a, b), _)| a == cj || b == cj)
            .map(|(&key, &value)| (key, value))
            .collect();

        for (key, value) in stale {
            between.remove(&key);
            let other = if key.0 == cj { key.1 } else { key.0 };
            if other == ci {
                continue; // now internal to the merged community
            }
            let rerouted = if other < ci { (other, ci) } else { (ci, other) };
            *between.entry(rerouted).or_insert(0.0) += value;
        }

        for community in membership.iter_mut() {
            if *community == cj {
                *community = ci;
            }
        }
    }

    // Groups ordered by their smallest global member.
    let mut representative_to_group: HashMap<usize, usize> = HashMap::new();
    let mut groups: Vec<Vec<u32>> = Vec::new();
    for (local, &node) in members.iter().enumerate() {
        let representative = membership[local];
        let index = *representative_to_group
            .entry(representative)
            .or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
        groups[index].push(node);
    }

    Some(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ArticleRecord, AuthorRecord};
    use crate::graph::builder::build_coauthor_graph;

    fn graph_from_author_lists(lists: &[&[&str]]) -> CoauthorGraph {
        let articles: Vec<ArticleRecord> = lists
            .iter()
            .map(|authors| ArticleRecord {
                pmid: String::new(),
                title: String::new(),
                year: String::new(),
                journal: String::new(),
                authors: authors
                    .iter()
                    .map(|last| AuthorRecord {
                        last_name: last.to_string(),
                        first_name: String::new(),
                        affiliation: String::new(),
                    })
                    .collect(),
            })
            .collect();
        build_coauthor_graph(&articles)
    }

    #[test]
    fn empty_graph_yields_empty_assignment() {
        let graph = build_coauthor_graph(&[]);
        let assignment = detect_communities(&graph);
        assert!(assignment.is_empty());
        assert_eq!(assignment.community_count(), 0);
    }

    #[test]
    fn disjoint_pairs_get_one_community_each() {
        let graph = graph_from_author_lists(&[&["A", "B"], &["C", "D"]]);
        let assignment = detect_communities(&graph);

        assert_eq!(assignment.community_count(), 2);

        let a = graph.index_of("A").unwrap();
        let b = graph.index_of("B").unwrap();
        let c = graph.index_of("C").unwrap();
        let d = graph.index_of("D").unwrap();

        assert_eq!(assignment.id_of(a), assignment.id_of(b));
        assert_eq!(assignment.id_of(c), assignment.id_of(d));
        assert_ne!(assignment.id_of(a), assignment.id_of(c));

        // Every node belongs to exactly one community.
        let total: usize = assignment.groups().values().map(|g| g.len()).sum();
        assert_eq!(total, graph.node_count());
    }

    #[test]
    fn a_triangle_stays_one_community() {
        let graph = graph_from_author_lists(&[&["A", "B", "C"]]);
        let assignment = detect_communities(&graph);
        assert_eq!(assignment.community_count(), 1);
    }

    #[test]
    fn bridged_triangles_split_into_two_communities() {
        let graph = graph_from_author_lists(&[
            &["A", "B", "C"],
            &["D", "E", "F"],
            &["C", "D"],
        ]);
        let assignment = detect_communities(&graph);
        assert_eq!(assignment.community_count(), 2);

        let a = graph.index_of("A").unwrap();
        let c = graph.index_of("C").unwrap();
        let d = graph.index_of("D").unwrap();
        let f = graph.index_of("F").unwrap();

        assert_eq!(assignment.id_of(a), assignment.id_of(c));
        assert_eq!(assignment.id_of(d), assignment.id_of(f));
        assert_ne!(assignment.id_of(c), assignment.id_of(d));
    }

    #[test]
    fn detection_is_deterministic() {
        let graph = graph_from_author_lists(&[
            &["A", "B", "C"],
            &["C", "D"],
            &["D", "E", "F"],
            &["G", "H"],
            &["I"],
        ]);
        let first = detect_communities(&graph);
        let second = detect_communities(&graph);
        assert_eq!(first, second);
    }

    #[test]
    fn ids_increase_across_components_in_discovery_order() {
        // Component of A,B discovered before component of C (singleton).
        let graph = graph_from_author_lists(&[&["A", "B"], &["C"]]);
        let assignment = detect_communities(&graph);

        let a = graph.index_of("A").unwrap();
        let c = graph.index_of("C").unwrap();
        assert_eq!(assignment.id_of(a), 0);
        assert_eq!(assignment.id_of(c), 1);
        assert_eq!(assignment.community_count(), 2);
    }
}
