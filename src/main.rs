use anyhow::{bail, Result};
use clap::Parser;
use std::path::Path;

use coauthor_network_analyzer::centrality;
use coauthor_network_analyzer::community;
use coauthor_network_analyzer::config::Config;
use coauthor_network_analyzer::data::{self, pubmed::PubMedClient, ArticleRecord};
use coauthor_network_analyzer::graph;
use coauthor_network_analyzer::report;
use coauthor_network_analyzer::storage;
use coauthor_network_analyzer::viz;

#[derive(Parser, Debug)]
#[clap(
    name = "coauthor-network-analyzer",
    about = "Co-authorship network construction and analysis from PubMed data"
)]
struct Cli {
    /// Author name to search on PubMed (e.g. "Yamanaka S")
    #[clap(long, conflicts_with = "input")]
    query: Option<String>,

    /// Path to a pre-fetched articles JSON file
    #[clap(long)]
    input: Option<String>,

    /// Maximum number of articles to retrieve for a query
    #[clap(long, default_value = "30")]
    max_results: usize,

    /// Minimum co-authorship weight for edges in the visualization
    #[clap(long, default_value = "1")]
    min_coauthor: u32,

    /// Output directory for results
    #[clap(long, default_value = "network_results")]
    output_dir: String,

    /// Skip the HTML visualization
    #[clap(long)]
    skip_viz: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting co-authorship network analysis");

    let config = Config {
        max_results: args.max_results,
        min_coauthor: args.min_coauthor,
        ..Config::default()
    };

    // 1. Obtain article records
    let articles = load_article_set(&args, &config)?;
    if articles.is_empty() {
        bail!("No articles with author data found");
    }
    log::info!("Analyzing {} articles", articles.len());

    // 2. Build the co-authorship graph
    let graph = graph::builder::build_coauthor_graph(&articles);

    // 3. Detect communities and compute centralities (read-only passes)
    let communities = community::detection::detect_communities(&graph);
    let (records, stats) = centrality::compute_centralities(&graph);

    log::info!(
        "{} authors, {} co-authorship edges, {} communities, density {}",
        stats.nodes,
        stats.edges,
        communities.community_count(),
        stats.density
    );

    // 4. Assemble and save results
    let summaries = report::assemble_author_summaries(&graph, &records, &communities);
    storage::save_results(
        &articles,
        &graph,
        &summaries,
        &stats,
        &communities,
        &args.output_dir,
    )?;

    // 5. Generate the visualization if requested
    if !args.skip_viz {
        viz::write_network_html(&graph, &communities, config.min_coauthor, &args.output_dir)?;
    }

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}

/// Fetch articles from PubMed or load them from a local JSON file.
fn load_article_set(args: &Cli, config: &Config) -> Result<Vec<ArticleRecord>> {
    match (&args.query, &args.input) {
        (Some(query), _) => {
            let client = PubMedClient::new(config)?;
            let pmids = client.search_author(query, config.max_results)?;
            if pmids.is_empty() {
                bail!("No articles found for author query {:?}", query);
            }
            Ok(client.fetch_articles(&pmids)?)
        }
        (None, Some(input)) => Ok(data::load_articles(Path::new(input))?),
        (None, None) => bail!("Either --query or --input is required"),
    }
}
