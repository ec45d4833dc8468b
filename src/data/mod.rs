//! Article and author records plus input loading

pub mod pubmed;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One author entry as it appears on a single article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub last_name: String,

    /// Given name(s); may be empty
    #[serde(default)]
    pub first_name: String,

    /// Affiliation text; may be empty
    #[serde(default)]
    pub affiliation: String,
}

/// A bibliographic record with its ordered author list.
///
/// Articles reaching the analysis core always carry at least one author;
/// the PubMed parser and the JSON loader both drop authorless records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(default)]
    pub pmid: String,

    #[serde(default)]
    pub title: String,

    /// Publication year as text (may be empty when PubMed omits it)
    #[serde(default)]
    pub year: String,

    #[serde(default)]
    pub journal: String,

    pub authors: Vec<AuthorRecord>,
}

/// Load a pre-fetched article set from a JSON file.
///
/// Records without any author are dropped so the graph builder's
/// precondition holds regardless of where the file came from.
pub fn load_articles(path: &Path) -> Result<Vec<ArticleRecord>> {
    let text = fs::read_to_string(path)?;
    let articles: Vec<ArticleRecord> = serde_json::from_str(&text)?;
    let total = articles.len();
    let articles: Vec<ArticleRecord> = articles
        .into_iter()
        .filter(|a| !a.authors.is_empty())
        .collect();

    if articles.len() < total {
        log::warn!(
            "Dropped {} authorless article(s) from {}",
            total - articles.len(),
            path.display()
        );
    }

    Ok(articles)
}
