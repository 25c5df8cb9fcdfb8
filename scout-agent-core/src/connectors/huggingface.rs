//! Model-hub connector: Hugging Face models listing, sorted by downloads.
//!
//! The hub's `modelId` is a `publisher/name` path; a bare id (no slash)
//! keeps its full id as the name and the placeholder publisher.

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

const API_BASE: &str = "https://huggingface.co";
const DOMAIN: &str = "huggingface.co";
const MIN_INTERVAL: Duration = Duration::from_millis(500);
const LISTING_LIMIT: u8 = 30;

const SEARCH_TERMS: &[&str] = &["llm", "instruct"];

/// Raw hub listing entry. The API exposes far more; only what the shared
/// record needs is deserialized.
#[derive(Debug, Deserialize)]
struct HubModel {
    #[serde(rename = "modelId", alias = "id")]
    model_id: String,
    #[serde(rename = "createdAt")]
    created_at: Option<DateTime<Utc>>,
}

pub struct HuggingFaceConnector {
    http: Client,
    base_url: String,
}

impl HuggingFaceConnector {
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
        for term in SEARCH_TERMS {
            ctx.rate_limiter.wait(DOMAIN, MIN_INTERVAL).await;
            let url = format!("{}/api/models", self.base_url);
            debug!(term, "Hugging Face listing query");
            let listing: Vec<HubModel> = self
                .http
                .get(&url)
                .query(&[
                    ("search", term.to_string()),
                    ("sort", "downloads".to_string()),
                    ("direction", "-1".to_string()),
                    ("limit", LISTING_LIMIT.to_string()),
                ])
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            models.extend(
                listing
                    .into_iter()
                    .map(|raw| normalise(raw, &self.base_url)),
            );
        }
        info!(count = models.len(), "Hugging Face connector finished");
        Ok(models)
    }
}

fn normalise(raw: HubModel, base_url: &str) -> CandidateModel {
    let (publisher, name) = match raw.model_id.split_once('/') {
        Some((owner, name)) => (owner.to_string(), name.to_string()),
        None => (UNKNOWN_PUBLISHER.to_string(), raw.model_id.clone()),
    };
    CandidateModel {
        name,
        publisher,
        source: SourceKind::ModelHub,
        source_url: format!("{}/{}", base_url, raw.model_id),
        access_type: AccessType::OpenSource,
        country: None,
        model_size: None,
        created_at: raw.created_at,
        discovery_timestamp: None,
        agent_version: None,
        validation_status: None,
    }
}

#[async_trait]
impl Connector for HuggingFaceConnector {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    async fn discover(&self, ctx: &RunContext) -> Vec<CandidateModel> {
        absorb(self.name(), self.fetch(ctx).await)
    }
}
