//! Preprint-archive connector: arXiv Atom API.
//!
//! One query per category expression; entries are Atom, parsed with feed-rs.
//! The first listed author becomes the publisher. Preprints don't declare an
//! access model, so entries are recorded as open source, which is what an
//! arXiv model release practically is.

use async_trait::async_trait;
use feed_rs::parser;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use super::{absorb, http_client, UNKNOWN_PUBLISHER};
use crate::contract::Connector;
use crate::enrich::RunContext;
use crate::error::ScoutError;
use crate::model::{AccessType, CandidateModel, SourceKind};

const API_BASE: &str = "http://export.arxiv.org";
const DOMAIN: &str = "export.arxiv.org";
// arXiv asks automated clients for no more than one request every three
// seconds.
const MIN_INTERVAL: Duration = Duration::from_millis(3000);
const MAX_RESULTS: u8 = 25;

const CATEGORY_QUERIES: &[&str] = &[
    "cat:cs.CL AND all:\"large language model\"",
    "cat:cs.LG AND all:\"foundation model\"",
];

pub struct ArxivConnector {
    http: Client,
    base_url: String,
}

impl ArxivConnector {
    pub fn new() -> Result<Self, ScoutError> {
        Ok(Self {
            http: http_client()?,
            base_url: API_BASE.to_string(),
        })
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ScoutError> {
        Ok(Self {
            http: http_client()?,
            base_url: base_url.into(),
        })
    }

    async fn fetch(&self, ctx: &RunContext) -> Result<Vec<CandidateModel>, ScoutError> {
        let mut models = Vec::new();
        for query in CATEGORY_QUERIES {
            ctx.rate_limiter.wait(DOMAIN, MIN_INTERVAL).await;
            let url = format!("{}/api/query", self.base_url);
            debug!(query, "arXiv Atom query");
            let body = self
                .http
                .get(&url)
                .query(&[
                    ("search_query", query.to_string()),
                    ("start", "0".to_string()),
                    ("max_results", MAX_RESULTS.to_string()),
                ])
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?;
            let feed = parser::parse(body.as_ref())
                .map_err(|e| ScoutError::Parse(format!("arXiv Atom feed: {e}")))?;
            models.extend(feed.entries.into_iter().filter_map(normalise));
        }
        info!(count = models.len(), "arXiv connector finished");
        Ok(models)
    }
}

fn normalise(entry: feed_rs::model::Entry) -> Option<CandidateModel> {
    let name = entry.title.map(|t| t.content)?;
    let source_url = entry
        .links
        .first()
        .map(|l| l.href.clone())
        .unwrap_or_else(|| entry.id.clone());
    let publisher = entry
        .authors
        .first()
        .map(|a| a.name.clone())
        .unwrap_or_else(|| UNKNOWN_PUBLISHER.to_string());
    Some(CandidateModel {
        name,
        publisher,
        source: SourceKind::PreprintArchive,
        source_url,
        access_type: AccessType::OpenSource,
        country: None,
        model_size: None,
        created_at: entry.published,
        discovery_timestamp: None,
        agent_version: None,
        validation_status: None,
    })
}

#[async_trait]
impl Connector for ArxivConnector {
    fn name(&self) -> &'static str {
        "arxiv"
    }

    async fn discover(&self, ctx: &RunContext) -> Vec<CandidateModel> {
        absorb(self.name(), self.fetch(ctx).await)
    }
}
