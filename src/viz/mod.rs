//! Interactive network visualization
//!
//! Renders the co-authorship graph to a standalone HTML page backed by
//! vis-network with a Barnes-Hut physics layout. The minimum
//! co-authorship filter is applied as a view over the finished graph;
//! stored weights are never modified.

use crate::community::CommunityAssignment;
use crate::graph::CoauthorGraph;
use anyhow::Result;
use serde_json::json;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Fixed palette; community ids map onto it modulo its length.
pub const COMMUNITY_COLORS: [&str; 17] = [
    "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4",
    "#42d4f4", "#f032e6", "#bfef45", "#fabed4", "#469990",
    "#dcbeff", "#9A6324", "#800000", "#aaffc3", "#808000",
    "#000075", "#a9a9a9",
];

/// Deterministic color for a community id
pub fn community_color(id: u32) -> &'static str {
    COMMUNITY_COLORS[id as usize % COMMUNITY_COLORS.len()]
}

/// Generate the interactive HTML page for the network view.
///
/// Edges below `min_coauthor` weight are excluded, along with any node
/// left without a visible edge. An empty filtered view yields a short
/// placeholder document instead of an empty canvas.
pub fn generate_network_html(
    graph: &CoauthorGraph,
    communities: &CommunityAssignment,
    min_coauthor: u32,
) -> String {
    let filtered_edges: Vec<(u32, u32, u32)> = graph
        .edges()
        .filter(|&(_, _, weight)| weight >= min_coauthor)
        .collect();

    let mut visible_nodes: HashSet<u32> = HashSet::new();
    for &(a, b, _) in &filtered_edges {
        visible_nodes.insert(a);
        visible_nodes.insert(b);
    }

    if visible_nodes.is_empty() {
        return "<p>No nodes to display with the current filter.</p>".to_string();
    }

    let max_papers = visible_nodes
        .iter()
        .map(|&node| graph.attributes(node).paper_count)
        .max()
        .unwrap_or(1)
        .max(1) as f64;

    let mut sorted_nodes: Vec<u32> = visible_nodes.into_iter().collect();
    sorted_nodes.sort_unstable();

    let node_data: Vec<serde_json::Value> = sorted_nodes
        .iter()
        .map(|&node| {
            let attrs = graph.attributes(node);
            let key = graph.key(node);
            let community = communities.id_of(node);
            let size = 10.0 + 30.0 * (attrs.paper_count as f64 / max_papers).sqrt();

            let mut title = format!(
                "<b>{}</b><br>Papers: {}<br>Community: {}",
                key, attrs.paper_count, community
            );
            if !attrs.affiliation.is_empty() {
                let short: String = attrs.affiliation.chars().take(100).collect();
                title.push_str(&format!("<br>Affiliation: {}", short));
            }

            json!({
                "id": node,
                "label": key,
                "size": size,
                "color": community_color(community),
                "title": title,
            })
        })
        .collect();

    let max_weight = filtered_edges
        .iter()
        .map(|&(_, _, w)| w)
        .max()
        .unwrap_or(1) as f64;

    let edge_data: Vec<serde_json::Value> = filtered_edges
        .iter()
        .map(|&(a, b, weight)| {
            let width = 1.0 + 4.0 * (weight as f64 / max_weight);
            json!({
                "from": a,
                "to": b,
                "value": weight,
                "width": width,
                "title": format!("Co-authored: {}", weight),
            })
        })
        .collect();

    render_page(&node_data, &edge_data)
}

/// Write the network page into `<output_dir>/network.html`
pub fn write_network_html(
    graph: &CoauthorGraph,
    communities: &CommunityAssignment,
    min_coauthor: u32,
    output_dir: &str,
) -> Result<()> {
    log::info!(
        "Generating network visualization (min co-authorship weight {})",
        min_coauthor
    );

    fs::create_dir_all(output_dir)?;
    let path = Path::new(output_dir).join("network.html");
    let mut file = File::create(path)?;
    file.write_all(generate_network_html(graph, communities, min_coauthor).as_bytes())?;

    Ok(())
}

fn render_page(nodes: &[serde_json::Value], edges: &[serde_json::Value]) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Co-authorship Network</title>
  <script src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
  <style>
    body {{ font-family: Arial, sans-serif; margin: 0; background-color: #ffffff; }}
    #network {{ width: 100%; height: 650px; border: 1px solid #ddd; }}
  </style>
</head>
<body>
  <div id="network"></div>
  <script>
    const nodes = new vis.DataSet({nodes});
    const edges = new vis.DataSet({edges});
    const container = document.getElementById("network");
    const options = {{
      "nodes": {{ "shape": "dot", "font": {{ "color": "#333333" }} }},
      "interaction": {{
        "hover": true,
        "tooltipDelay": 100,
        "navigationButtons": true
      }},
      "physics": {{
        "barnesHut": {{
          "gravitationalConstant": -3000,
          "centralGravity": 0.3,
          "springLength": 100,
          "damping": 0.09
        }},
        "stabilization": {{ "iterations": 150 }}
      }}
    }};
    new vis.Network(container, {{ nodes: nodes, edges: edges }}, options);
  </script>
</body>
</html>
"##,
        nodes = serde_json::Value::Array(nodes.to_vec()),
        edges = serde_json::Value::Array(edges.to_vec()),
    )
}
