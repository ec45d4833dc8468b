//! Graph construction from article records

use crate::data::{ArticleRecord, AuthorRecord};
use crate::graph::network::NodeAttributes;
use crate::graph::CoauthorGraph;
use itertools::Itertools;
use std::collections::HashMap;

/// Canonicalize an author record into a stable node key: "Last FM".
///
/// Initials are the first letter of each whitespace-separated token of
/// the given name; with no usable given name the key is the surname
/// alone. Authors sharing surname and initials collapse to one node,
/// which is an intentional, lossy disambiguation.
pub fn author_key(author: &AuthorRecord) -> String {
    let initials: String = author
        .first_name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect();

    if initials.is_empty() {
        author.last_name.clone()
    } else {
        format!("{} {}", author.last_name, initials)
    }
}

/// Accumulates nodes and weighted edges article by article, then
/// freezes into a `CoauthorGraph`.
pub struct GraphBuilder {
    key_to_index: HashMap<String, u32>,
    keys: Vec<String>,
    attributes: Vec<NodeAttributes>,
    /// Undirected edge weights keyed by (low index, high index)
    edge_weights: HashMap<(u32, u32), u32>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            key_to_index: HashMap::new(),
            keys: Vec::new(),
            attributes: Vec::new(),
            edge_weights: HashMap::new(),
        }
    }

    /// Get or create the node index for an author key
    fn get_or_create_node(&mut self, key: &str) -> u32 {
        if let Some(&idx) = self.key_to_index.get(key) {
            return idx;
        }

        let idx = self.keys.len() as u32;
        self.key_to_index.insert(key.to_string(), idx);
        self.keys.push(key.to_string());
        self.attributes.push(NodeAttributes::default());
        idx
    }

    /// Fold one article into the accumulating graph.
    ///
    /// Every author resolves to a key in list order. A key's paper count
    /// rises once per article even if the key appears twice in the same
    /// author list, and the first non-empty affiliation seen for a key
    /// sticks. All C(k,2) pairs of distinct keys on the article get
    /// their edge weight bumped; identical keys never pair, so the graph
    /// stays free of self-loops.
    pub fn add_article(&mut self, article: &ArticleRecord) {
        let mut article_keys: Vec<u32> = Vec::with_capacity(article.authors.len());

        for author in &article.authors {
            let key = author_key(author);
            let idx = self.get_or_create_node(&key);

            let attrs = &mut self.attributes[idx as usize];
            if attrs.affiliation.is_empty() && !author.affiliation.is_empty() {
                attrs.affiliation = author.affiliation.clone();
            }

            if !article_keys.contains(&idx) {
                article_keys.push(idx);
                attrs.paper_count += 1;
            }
        }

        for (a, b) in article_keys.iter().copied().tuple_combinations() {
            let pair = if a < b { (a, b) } else { (b, a) };
            *self.edge_weights.entry(pair).or_insert(0) += 1;
        }
    }

    /// Freeze the accumulated state into an immutable graph
    pub fn build(self) -> CoauthorGraph {
        let node_count = self.keys.len();
        let edge_count = self.edge_weights.len();

        let mut adjacency: Vec<Vec<(u32, u32)>> = vec![Vec::new(); node_count];
        for ((a, b), weight) in self.edge_weights {
            adjacency[a as usize].push((b, weight));
            adjacency[b as usize].push((a, weight));
        }

        // Sort for binary search on edge lookups
        for list in &mut adjacency {
            list.sort_unstable_by_key(|&(n, _)| n);
        }

        CoauthorGraph::new(self.keys, self.attributes, adjacency, edge_count)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the co-authorship graph for a full article set.
pub fn build_coauthor_graph(articles: &[ArticleRecord]) -> CoauthorGraph {
    let mut builder = GraphBuilder::new();
    for article in articles {
        builder.add_article(article);
    }

    let graph = builder.build();
    log::info!(
        "Built co-authorship graph with {} authors and {} edges from {} articles",
        graph.node_count(),
        graph.edge_count(),
        articles.len()
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(last: &str, first: &str, affiliation: &str) -> AuthorRecord {
        AuthorRecord {
            last_name: last.to_string(),
            first_name: first.to_string(),
            affiliation: affiliation.to_string(),
        }
    }

    fn article(pmid: &str, authors: Vec<AuthorRecord>) -> ArticleRecord {
        ArticleRecord {
            pmid: pmid.to_string(),
            title: String::new(),
            year: String::new(),
            journal: String::new(),
            authors,
        }
    }

    #[test]
    fn author_key_concatenates_initials() {
        assert_eq!(author_key(&author("Yamanaka", "Shinya", "")), "Yamanaka S");
        assert_eq!(
            author_key(&author("Kitanishi", "Yusuke Taro", "")),
            "Kitanishi YT"
        );
    }

    #[test]
    fn author_key_degrades_to_surname() {
        assert_eq!(author_key(&author("Sato", "", "")), "Sato");
        // Whitespace-only given names contribute no initials.
        assert_eq!(author_key(&author("Sato", "   ", "")), "Sato");
    }

    #[test]
    fn accumulates_weights_and_paper_counts() {
        // Three articles: (A,B), (B,C), (A,B,C)
        let articles = vec![
            article("1", vec![author("A", "", ""), author("B", "", "")]),
            article("2", vec![author("B", "", ""), author("C", "", "")]),
            article(
                "3",
                vec![author("A", "", ""), author("B", "", ""), author("C", "", "")],
            ),
        ];

        let graph = build_coauthor_graph(&articles);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);

        let a = graph.index_of("A").unwrap();
        let b = graph.index_of("B").unwrap();
        let c = graph.index_of("C").unwrap();

        assert_eq!(graph.edge_weight(a, b), Some(2));
        assert_eq!(graph.edge_weight(b, c), Some(1));
        assert_eq!(graph.edge_weight(a, c), Some(1));
        assert_eq!(graph.edge_weight(b, a), Some(2));

        assert_eq!(graph.attributes(a).paper_count, 2);
        assert_eq!(graph.attributes(b).paper_count, 3);
        assert_eq!(graph.attributes(c).paper_count, 2);
    }

    #[test]
    fn duplicate_key_on_one_article_counts_once_and_adds_no_self_loop() {
        // "Tanaka Hiroshi" and "Tanaka Hanako" collapse to "Tanaka H".
        let articles = vec![article(
            "1",
            vec![
                author("Tanaka", "Hiroshi", ""),
                author("Tanaka", "Hanako", ""),
                author("Mori", "K", ""),
            ],
        )];

        let graph = build_coauthor_graph(&articles);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);

        let tanaka = graph.index_of("Tanaka H").unwrap();
        assert_eq!(graph.attributes(tanaka).paper_count, 1);
        assert_eq!(graph.edge_weight(tanaka, tanaka), None);
    }

    #[test]
    fn first_non_empty_affiliation_sticks() {
        let articles = vec![
            article("1", vec![author("A", "", ""), author("B", "", "Org B")]),
            article("2", vec![author("A", "", "Org A1"), author("B", "", "Org B2")]),
            article("3", vec![author("A", "", "Org A2")]),
        ];

        let graph = build_coauthor_graph(&articles);
        let a = graph.index_of("A").unwrap();
        let b = graph.index_of("B").unwrap();
        assert_eq!(graph.attributes(a).affiliation, "Org A1");
        assert_eq!(graph.attributes(b).affiliation, "Org B");
    }

    #[test]
    fn empty_article_list_yields_empty_graph() {
        let graph = build_coauthor_graph(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }
}
