//! PubMed E-utilities client
//!
//! Resolves an author query into PMIDs via esearch, then hydrates
//! article metadata in batches via efetch. Requests are spaced out to
//! stay well under NCBI's unauthenticated rate limit.

use crate::config::Config;
use crate::data::{ArticleRecord, AuthorRecord};
use crate::error::{DataSourceError, Result};
use std::thread;
use std::time::Duration;

const BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
const USER_AGENT: &str = concat!("coauthor-network-analyzer/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the NCBI E-utilities endpoints.
pub struct PubMedClient {
    client: reqwest::blocking::Client,
    batch_size: usize,
    rate_limit: Duration,
}

impl PubMedClient {
    /// Create a client configured with the run's batch size and rate limit.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            batch_size: config.batch_size.max(1),
            rate_limit: Duration::from_secs_f64(config.rate_limit_secs),
        })
    }

    /// Search PubMed for an author and return matching PMIDs.
    ///
    /// The query is restricted to the Author field, matching how the
    /// tool is meant to be used (e.g. "Yamanaka S").
    pub fn search_author(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        let term = format!("{}[Author]", query);
        let retmax = max_results.to_string();
        log::info!("Searching PubMed for {:?} (retmax {})", term, max_results);

        let response = self
            .client
            .get(format!("{}/esearch.fcgi", BASE_URL))
            .query(&[
                ("db", "pubmed"),
                ("term", term.as_str()),
                ("retmax", retmax.as_str()),
                ("retmode", "json"),
            ])
            .send()?
            .error_for_status()?;

        let body: serde_json::Value = response.json()?;
        let idlist = body
            .pointer("/esearchresult/idlist")
            .and_then(|v| v.as_array())
            .ok_or_else(|| DataSourceError::Api("esearch response missing idlist".into()))?;

        let pmids = idlist
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect::<Vec<_>>();

        log::info!("Found {} PMIDs", pmids.len());
        Ok(pmids)
    }

    /// Fetch article details for a list of PMIDs in batches.
    pub fn fetch_articles(&self, pmids: &[String]) -> Result<Vec<ArticleRecord>> {
        let mut articles = Vec::with_capacity(pmids.len());

        for batch in pmids.chunks(self.batch_size) {
            thread::sleep(self.rate_limit);
            log::debug!("Fetching batch of {} articles", batch.len());

            let response = self
                .client
                .get(format!("{}/efetch.fcgi", BASE_URL))
                .query(&[
                    ("db", "pubmed"),
                    ("id", batch.join(",").as_str()),
                    ("retmode", "xml"),
                ])
                .send()?
                .error_for_status()?;

            let xml = response.text()?;
            articles.extend(parse_articles_xml(&xml)?);
        }

        log::info!("Hydrated {} articles with author data", articles.len());
        Ok(articles)
    }
}

/// Parse a PubMed efetch XML payload into article records.
///
/// Articles without a parseable author list are dropped here, which is
/// the precondition the graph builder relies on.
pub fn parse_articles_xml(xml: &str) -> Result<Vec<ArticleRecord>> {
    let doc = roxmltree::Document::parse(xml)?;

    let articles = doc
        .descendants()
        .filter(|n| n.has_tag_name("PubmedArticle"))
        .filter_map(parse_single_article)
        .filter(|a| !a.authors.is_empty())
        .collect();

    Ok(articles)
}

fn parse_single_article(elem: roxmltree::Node) -> Option<ArticleRecord> {
    let medline = child(elem, "MedlineCitation")?;
    let article = child(medline, "Article")?;

    let pmid = child_text(medline, "PMID");
    let title = child_text(article, "ArticleTitle");
    let journal = child(article, "Journal");
    let journal_title = journal.map(|j| child_text(j, "Title")).unwrap_or_default();

    let year = journal
        .and_then(|j| child(j, "JournalIssue"))
        .and_then(|issue| child(issue, "PubDate"))
        .map(parse_year)
        .unwrap_or_default();

    let authors = child(article, "AuthorList")
        .map(|list| {
            list.children()
                .filter(|n| n.has_tag_name("Author"))
                .filter_map(parse_author)
                .collect()
        })
        .unwrap_or_default();

    Some(ArticleRecord {
        pmid,
        title,
        year,
        journal: journal_title,
        authors,
    })
}

fn parse_author(elem: roxmltree::Node) -> Option<AuthorRecord> {
    // Entries without a surname (e.g. CollectiveName groups) are skipped.
    let last_name = child(elem, "LastName")?.text()?.to_string();
    let first_name = child_text(elem, "ForeName");
    let affiliation = child(elem, "AffiliationInfo")
        .map(|info| child_text(info, "Affiliation"))
        .unwrap_or_default();

    Some(AuthorRecord {
        last_name,
        first_name,
        affiliation,
    })
}

/// Year element when present, otherwise the first four characters of a
/// MedlineDate value such as "1998 Dec-1999 Jan".
fn parse_year(pub_date: roxmltree::Node) -> String {
    if let Some(year) = child(pub_date, "Year") {
        return year.text().unwrap_or_default().to_string();
    }
    child(pub_date, "MedlineDate")
        .and_then(|n| n.text())
        .map(|t| t.chars().take(4).collect())
        .unwrap_or_default()
}

fn child<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    tag: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(tag))
}

fn child_text(node: roxmltree::Node, tag: &str) -> String {
    child(node, tag)
        .and_then(|c| c.text())
        .unwrap_or_default()
        .to_string()
}
