//! Configuration defaults for the co-authorship network analyzer

/// Default configuration for one analysis run
pub struct Config {
    /// Maximum number of articles to retrieve for a query
    pub max_results: usize,

    /// Minimum co-authorship weight for an edge to appear in the visualization
    pub min_coauthor: u32,

    /// Number of PMIDs hydrated per efetch request
    pub batch_size: usize,

    /// Seconds to wait before each efetch request (NCBI courtesy limit)
    pub rate_limit_secs: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_results: 30,
            min_coauthor: 1,
            batch_size: 50,
            rate_limit_secs: 8.0,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        max_results: usize,
        min_coauthor: u32,
        batch_size: usize,
        rate_limit_secs: f64,
    ) -> Self {
        Self {
            max_results,
            min_coauthor,
            batch_size,
            rate_limit_secs,
        }
    }
}
