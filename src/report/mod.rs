//! Per-author result assembly
//!
//! Pure merge of node attributes, centrality metrics and community
//! assignment into presentation-ready rows. Both inputs are always
//! computed from the same graph instance within one request, so a
//! missing entry is a programming error rather than a runtime failure.

use crate::centrality::CentralityRecord;
use crate::community::CommunityAssignment;
use crate::graph::CoauthorGraph;
use serde::Serialize;

/// Sentinel community id for a node the detector never saw. Should not
/// appear in practice; kept so release builds degrade visibly instead
/// of panicking.
pub const UNASSIGNED_COMMUNITY: u32 = u32::MAX;

/// One row of the final author table.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorSummary {
    pub author: String,
    pub paper_count: u32,
    pub affiliation: String,
    pub degree_centrality: f64,
    pub betweenness_centrality: f64,
    pub closeness_centrality: f64,
    pub clustering_coefficient: f64,
    pub community: u32,
}

/// Merge centrality records with community ids, one row per node,
/// sorted by degree centrality descending (author key breaks ties).
pub fn assemble_author_summaries(
    graph: &CoauthorGraph,
    records: &[CentralityRecord],
    communities: &CommunityAssignment,
) -> Vec<AuthorSummary> {
    debug_assert_eq!(records.len(), graph.node_count());
    debug_assert_eq!(communities.len(), graph.node_count());

    let mut rows: Vec<AuthorSummary> = records
        .iter()
        .enumerate()
        .map(|(node, record)| {
            let node = node as u32;
            let community = if (node as usize) < communities.len() {
                communities.id_of(node)
            } else {
                UNASSIGNED_COMMUNITY
            };
            AuthorSummary {
                author: graph.key(node).to_string(),
                paper_count: record.paper_count,
                affiliation: record.affiliation.clone(),
                degree_centrality: record.degree_centrality,
                betweenness_centrality: record.betweenness_centrality,
                closeness_centrality: record.closeness_centrality,
                clustering_coefficient: record.clustering_coefficient,
                community,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.degree_centrality
            .partial_cmp(&a.degree_centrality)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.author.cmp(&b.author))
    });

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centrality::compute_centralities;
    use crate::community::detection::detect_communities;
    use crate::data::{ArticleRecord, AuthorRecord};
    use crate::graph::builder::build_coauthor_graph;

    fn sample_graph() -> CoauthorGraph {
        let authors = |names: &[&str]| -> Vec<AuthorRecord> {
            names
                .iter()
                .map(|last| AuthorRecord {
                    last_name: last.to_string(),
                    first_name: String::new(),
                    affiliation: format!("{} University", last),
                })
                .collect()
        };
        let articles = vec![
            ArticleRecord {
                pmid: "1".into(),
                title: String::new(),
                year: String::new(),
                journal: String::new(),
                authors: authors(&["A", "B"]),
            },
            ArticleRecord {
                pmid: "2".into(),
                title: String::new(),
                year: String::new(),
                journal: String::new(),
                authors: authors(&["B", "C"]),
            },
        ];
        build_coauthor_graph(&articles)
    }

    #[test]
    fn rows_merge_metrics_and_community_ids() {
        let graph = sample_graph();
        let (records, _) = compute_centralities(&graph);
        let communities = detect_communities(&graph);

        let rows = assemble_author_summaries(&graph, &records, &communities);
        assert_eq!(rows.len(), 3);

        // All three share one component, hence one community id.
        let ids: Vec<u32> = rows.iter().map(|r| r.community).collect();
        assert!(ids.iter().all(|&id| id == ids[0]));
        assert!(ids.iter().all(|&id| id != UNASSIGNED_COMMUNITY));

        let b = rows.iter().find(|r| r.author == "B").unwrap();
        assert_eq!(b.paper_count, 2);
        assert_eq!(b.affiliation, "B University");
    }

    #[test]
    fn rows_sort_by_degree_centrality_descending() {
        let graph = sample_graph();
        let (records, _) = compute_centralities(&graph);
        let communities = detect_communities(&graph);

        let rows = assemble_author_summaries(&graph, &records, &communities);
        // B has degree 2, A and C degree 1; ties resolve by key.
        assert_eq!(rows[0].author, "B");
        assert_eq!(rows[1].author, "A");
        assert_eq!(rows[2].author, "C");
    }

    #[test]
    fn empty_graph_assembles_to_no_rows() {
        let graph = build_coauthor_graph(&[]);
        let (records, _) = compute_centralities(&graph);
        let communities = detect_communities(&graph);
        let rows = assemble_author_summaries(&graph, &records, &communities);
        assert!(rows.is_empty());
    }
}
