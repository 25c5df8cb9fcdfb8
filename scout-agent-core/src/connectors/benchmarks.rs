//! Benchmark-index connector: Papers with Code search API.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::{absorb, http_client, UNKNOWN_PUBLISHER};
use crate::contract::Connector;
use crate::enrich::RunContext;
use crate::error::ScoutError;
use crate::model::{AccessType, CandidateModel, SourceKind};

const API_BASE: &str = "https://paperswithcode.com";
const DOMAIN: &str = "paperswithcode.com";
const MIN_INTERVAL: Duration = Duration::from_millis(1000);

const SEARCH_QUERIES: &[&str] = &["large language model", "llm benchmark"];

#[derive(Debug, Deserialize)]
struct SearchPage {
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    paper: PaperRecord,
}

/// Raw benchmark-index paper record. `published` is a bare `YYYY-MM-DD`
/// date, not a datetime.
#[derive(Debug, Deserialize)]
struct PaperRecord {
    title: String,
    url_abs: Option<String>,
    authors: Option<Vec<String>>,
    published: Option<NaiveDate>,
}

fn published_to_timestamp(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

pub struct BenchmarkIndexConnector {
    http: Client,
    base_url: String,
}

impl BenchmarkIndexConnector {
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
        for query in SEARCH_QUERIES {
            ctx.rate_limiter.wait(DOMAIN, MIN_INTERVAL).await;
            let url = format!("{}/api/v1/search/", self.base_url);
            debug!(query, "Benchmark index search");
            let page: SearchPage = self
                .http
                .get(&url)
                .query(&[("q", query)])
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            models.extend(page.results.into_iter().map(|hit| normalise(hit.paper)));
        }
        info!(count = models.len(), "Benchmark index connector finished");
        Ok(models)
    }
}

fn normalise(paper: PaperRecord) -> CandidateModel {
    let publisher = paper
        .authors
        .as_ref()
        .and_then(|authors| authors.first().cloned())
        .unwrap_or_else(|| UNKNOWN_PUBLISHER.to_string());
    CandidateModel {
        name: paper.title,
        publisher,
        source: SourceKind::BenchmarkIndex,
        source_url: paper.url_abs.unwrap_or_default(),
        access_type: AccessType::OpenSource,
        country: None,
        model_size: None,
        created_at: paper.published.and_then(published_to_timestamp),
        discovery_timestamp: None,
        agent_version: None,
        validation_status: None,
    }
}

#[async_trait]
impl Connector for BenchmarkIndexConnector {
    fn name(&self) -> &'static str {
        "benchmarks"
    }

    async fn discover(&self, ctx: &RunContext) -> Vec<CandidateModel> {
        absorb(self.name(), self.fetch(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_author_becomes_publisher() {
        let model = normalise(PaperRecord {
            title: "HELM: Holistic Evaluation of Language Models".into(),
            url_abs: Some("https://paperswithcode.com/paper/helm".into()),
            authors: Some(vec!["Percy Liang".into(), "Rishi Bommasani".into()]),
            published: None,
        });
        assert_eq!(model.publisher, "Percy Liang");
        assert_eq!(model.source, SourceKind::BenchmarkIndex);
    }

    #[test]
    fn missing_authors_fall_back_to_placeholder() {
        let model = normalise(PaperRecord {
            title: "Anonymous benchmark".into(),
            url_abs: None,
            authors: None,
            published: None,
        });
        assert_eq!(model.publisher, "unknown");
        assert_eq!(model.source_url, "");
    }
}
