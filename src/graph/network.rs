//! Weighted undirected adjacency-list graph of author collaborations

use serde::{Deserialize, Serialize};

/// Fixed attributes stored per author node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeAttributes {
    /// Number of distinct articles this author key appeared on
    pub paper_count: u32,

    /// First non-empty affiliation observed for this key
    pub affiliation: String,
}

/// Weighted undirected co-authorship graph.
///
/// Nodes are canonical author keys interned as `u32` indices; keys and
/// attributes live in parallel vectors. Each undirected edge is stored
/// in both endpoints' adjacency lists, sorted by neighbor index so that
/// weight lookups can binary search. Instances are frozen: all analyses
/// operate on a finished graph and never mutate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoauthorGraph {
    keys: Vec<String>,
    attributes: Vec<NodeAttributes>,
    /// Sorted adjacency lists of (neighbor index, co-authorship weight)
    adjacency: Vec<Vec<(u32, u32)>>,
    edge_count: usize,
}

impl CoauthorGraph {
    pub(crate) fn new(
        keys: Vec<String>,
        attributes: Vec<NodeAttributes>,
        adjacency: Vec<Vec<(u32, u32)>>,
        edge_count: usize,
    ) -> Self {
        debug_assert_eq!(keys.len(), attributes.len());
        debug_assert_eq!(keys.len(), adjacency.len());
        Self {
            keys,
            attributes,
            adjacency,
            edge_count,
        }
    }

    /// Number of author nodes
    pub fn node_count(&self) -> usize {
        self.keys.len()
    }

    /// Number of undirected co-authorship edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Canonical author key for a node index
    pub fn key(&self, node: u32) -> &str {
        &self.keys[node as usize]
    }

    /// Stored attributes for a node index
    pub fn attributes(&self, node: u32) -> &NodeAttributes {
        &self.attributes[node as usize]
    }

    /// Neighbors of a node as (neighbor index, weight), sorted by index
    pub fn neighbors(&self, node: u32) -> &[(u32, u32)] {
        &self.adjacency[node as usize]
    }

    /// Number of distinct co-authors of a node
    pub fn degree(&self, node: u32) -> usize {
        self.adjacency[node as usize].len()
    }

    /// Co-authorship weight between two nodes, if they share an edge
    pub fn edge_weight(&self, a: u32, b: u32) -> Option<u32> {
        let list = &self.adjacency[a as usize];
        list.binary_search_by_key(&b, |&(n, _)| n)
            .ok()
            .map(|i| list[i].1)
    }

    /// Largest edge weight in the graph, if any edge exists
    pub fn max_edge_weight(&self) -> Option<u32> {
        self.adjacency
            .iter()
            .flat_map(|list| list.iter().map(|&(_, w)| w))
            .max()
    }

    /// Iterate every undirected edge once as (a, b, weight) with a < b
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(a, list)| {
            let a = a as u32;
            list.iter()
                .filter(move |&&(b, _)| a < b)
                .map(move |&(b, w)| (a, b, w))
        })
    }

    /// Node index for an author key, if present
    pub fn index_of(&self, key: &str) -> Option<u32> {
        self.keys.iter().position(|k| k == key).map(|i| i as u32)
    }
}
