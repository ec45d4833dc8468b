//! Results persistence module

use crate::centrality::NetworkStats;
use crate::community::CommunityAssignment;
use crate::data::ArticleRecord;
use crate::graph::CoauthorGraph;
use crate::report::AuthorSummary;
use anyhow::Result;
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Save analysis results to the specified directory
pub fn save_results(
    articles: &[ArticleRecord],
    graph: &CoauthorGraph,
    summaries: &[AuthorSummary],
    stats: &NetworkStats,
    communities: &CommunityAssignment,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving analysis results to {}", output_dir);

    fs::create_dir_all(output_dir)?;

    save_summary(stats, communities, output_dir)?;
    save_authors(summaries, output_dir)?;
    save_communities(graph, communities, output_dir)?;
    save_articles(articles, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save network statistics plus community count
fn save_summary(
    stats: &NetworkStats,
    communities: &CommunityAssignment,
    output_dir: &str,
) -> Result<()> {
    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let summary = json!({
        "network_stats": stats,
        "community_count": communities.community_count(),
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save the author table as both JSON and CSV
fn save_authors(summaries: &[AuthorSummary], output_dir: &str) -> Result<()> {
    let json_path = Path::new(output_dir).join("authors.json");
    let mut file = File::create(json_path)?;
    file.write_all(to_string_pretty(&summaries)?.as_bytes())?;

    let csv_path = Path::new(output_dir).join("authors.csv");
    let mut writer = csv::Writer::from_path(csv_path)?;
    for summary in summaries {
        writer.serialize(summary)?;
    }
    writer.flush()?;

    Ok(())
}

/// Save community membership, grouped by id with sorted member keys
fn save_communities(
    graph: &CoauthorGraph,
    communities: &CommunityAssignment,
    output_dir: &str,
) -> Result<()> {
    let path = Path::new(output_dir).join("communities.json");
    let mut file = File::create(path)?;

    let groups = communities
        .groups()
        .into_iter()
        .map(|(id, members)| {
            let mut names: Vec<String> = members
                .iter()
                .map(|&node| graph.key(node).to_string())
                .collect();
            names.sort();
            json!({
                "id": id,
                "size": names.len(),
                "members": names,
            })
        })
        .collect::<Vec<_>>();

    let payload = json!({ "communities": groups });
    file.write_all(to_string_pretty(&payload)?.as_bytes())?;

    Ok(())
}

/// Save the article set that produced the graph
fn save_articles(articles: &[ArticleRecord], output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("articles.json");
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(&articles)?.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centrality::compute_centralities;
    use crate::community::detection::detect_communities;
    use crate::data::AuthorRecord;
    use crate::graph::builder::build_coauthor_graph;
    use crate::report::assemble_author_summaries;

    #[test]
    fn writes_all_artifacts() {
        let articles = vec![ArticleRecord {
            pmid: "1".into(),
            title: "T".into(),
            year: "2020".into(),
            journal: "J".into(),
            authors: vec![
                AuthorRecord {
                    last_name: "A".into(),
                    first_name: String::new(),
                    affiliation: String::new(),
                },
                AuthorRecord {
                    last_name: "B".into(),
                    first_name: String::new(),
                    affiliation: String::new(),
                },
            ],
        }];

        let graph = build_coauthor_graph(&articles);
        let (records, stats) = compute_centralities(&graph);
        let communities = detect_communities(&graph);
        let summaries = assemble_author_summaries(&graph, &records, &communities);

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();
        save_results(&articles, &graph, &summaries, &stats, &communities, out).unwrap();

        for name in ["summary.json", "authors.json", "authors.csv", "communities.json", "articles.json"] {
            assert!(dir.path().join(name).exists(), "missing {}", name);
        }

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(summary["network_stats"]["nodes"], 2);
        assert_eq!(summary["community_count"], 1);

        let comms: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("communities.json")).unwrap())
                .unwrap();
        assert_eq!(comms["communities"][0]["size"], 2);
    }
}
