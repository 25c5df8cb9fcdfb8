//! Code-hosting connector: GitHub repository search.
//!
//! Issues one search per topic query and merges the pages. Repositories are
//! open source by definition here; the owner login becomes the publisher,
//! falling back to the shared placeholder when GitHub omits it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::{absorb, http_client, UNKNOWN_PUBLISHER};
use crate::contract::Connector;
use crate::enrich::RunContext;
use crate::error::ScoutError;
use crate::model::{AccessType, CandidateModel, SourceKind};

const API_BASE: &str = "https://api.github.com";
const DOMAIN: &str = "api.github.com";
// GitHub's unauthenticated search quota is tight; one call a second keeps
// a full run inside it.
const MIN_INTERVAL: Duration = Duration::from_millis(1000);
const PER_QUERY_LIMIT: u8 = 20;

const TOPIC_QUERIES: &[&str] = &[
    "large-language-model",
    "LLM foundation model",
    "open-source language model weights",
];

#[derive(Debug, Deserialize)]
struct SearchPage {
    items: Vec<RepoRecord>,
}

/// Raw GitHub repository record, reduced to the fields we normalise.
#[derive(Debug, Deserialize)]
struct RepoRecord {
    name: String,
    owner: Option<RepoOwner>,
    html_url: String,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct RepoOwner {
    login: String,
}

pub struct GithubConnector {
    http: Client,
    base_url: String,
}

impl GithubConnector {
    pub fn new() -> Result<Self, ScoutError> {
        Ok(Self {
            http: http_client()?,
            base_url: API_BASE.to_string(),
        })
    }

    /// Test constructor pointing at a local fixture server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ScoutError> {
        Ok(Self {
            http: http_client()?,
            base_url: base_url.into(),
        })
    }

    async fn fetch(&self, ctx: &RunContext) -> Result<Vec<CandidateModel>, ScoutError> {
        let mut models = Vec::new();
        for query in TOPIC_QUERIES {
            ctx.rate_limiter.wait(DOMAIN, MIN_INTERVAL).await;
            let url = format!("{}/search/repositories", self.base_url);
            debug!(query, "GitHub repository search");
            let page: SearchPage = self
                .http
                .get(&url)
                .query(&[
                    ("q", query.to_string()),
                    ("sort", "stars".to_string()),
                    ("order", "desc".to_string()),
                    ("per_page", PER_QUERY_LIMIT.to_string()),
                ])
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            models.extend(page.items.into_iter().map(normalise));
        }
        info!(count = models.len(), "GitHub connector finished");
        Ok(models)
    }
}

fn normalise(repo: RepoRecord) -> CandidateModel {
    CandidateModel {
        name: repo.name,
        publisher: repo
            .owner
            .map(|o| o.login)
            .unwrap_or_else(|| UNKNOWN_PUBLISHER.to_string()),
        source: SourceKind::CodeHosting,
        source_url: repo.html_url,
        access_type: AccessType::OpenSource,
        country: None,
        model_size: None,
        created_at: repo.created_at,
        discovery_timestamp: None,
        agent_version: None,
        validation_status: None,
    }
}

#[async_trait]
impl Connector for GithubConnector {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn discover(&self, ctx: &RunContext) -> Vec<CandidateModel> {
        absorb(self.name(), self.fetch(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_owner_falls_back_to_placeholder() {
        let model = normalise(RepoRecord {
            name: "nanoGPT".into(),
            owner: None,
            html_url: "https://github.com/karpathy/nanoGPT".into(),
            created_at: None,
        });
        assert_eq!(model.publisher, "unknown");
        assert_eq!(model.source, SourceKind::CodeHosting);
        assert_eq!(model.access_type, AccessType::OpenSource);
    }
}
