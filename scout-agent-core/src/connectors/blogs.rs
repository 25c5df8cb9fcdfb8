//! Blog-feed connector: vendor announcement feeds.
//!
//! A curated set of vendor blogs, each with a known publisher, country and
//! access model. Feed entries are filtered to announcement-looking titles;
//! the entry title becomes the candidate name as-is, which is what the
//! aggregation side expects from blog-sourced entries.

use async_trait::async_trait;
use feed_rs::parser;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{absorb, http_client};
use crate::contract::Connector;
use crate::enrich::RunContext;
use crate::error::ScoutError;
use crate::model::{AccessType, CandidateModel, SourceKind};

const MIN_INTERVAL: Duration = Duration::from_millis(500);

const MODEL_KEYWORDS: &[&str] = &[
    "model", "gpt", "claude", "gemini", "llama", "launch", "introducing",
];

/// One curated vendor feed.
pub struct VendorFeed {
    pub publisher: &'static str,
    pub country: &'static str,
    pub access_type: AccessType,
    pub feed_url: String,
    pub domain: &'static str,
}

pub fn default_feeds() -> Vec<VendorFeed> {
    vec![
        VendorFeed {
            publisher: "OpenAI",
            country: "USA",
            access_type: AccessType::Commercial,
            feed_url: "https://openai.com/blog/rss.xml".into(),
            domain: "openai.com",
        },
        VendorFeed {
            publisher: "Google",
            country: "USA",
            access_type: AccessType::Commercial,
            feed_url: "https://blog.google/technology/ai/rss/".into(),
            domain: "blog.google",
        },
        VendorFeed {
            publisher: "Hugging Face",
            country: "USA",
            access_type: AccessType::FreeTier,
            feed_url: "https://huggingface.co/blog/feed.xml".into(),
            domain: "huggingface.co",
        },
    ]
}

pub struct BlogConnector {
    http: Client,
    feeds: Vec<VendorFeed>,
}

impl BlogConnector {
    pub fn new() -> Result<Self, ScoutError> {
        Ok(Self {
            http: http_client()?,
            feeds: default_feeds(),
        })
    }

    /// Test constructor with caller-supplied feeds.
    pub fn with_feeds(feeds: Vec<VendorFeed>) -> Result<Self, ScoutError> {
        Ok(Self {
            http: http_client()?,
            feeds,
        })
    }

    async fn fetch(&self, ctx: &RunContext) -> Result<Vec<CandidateModel>, ScoutError> {
        let mut models = Vec::new();
        for feed_cfg in &self.feeds {
            ctx.rate_limiter.wait(feed_cfg.domain, MIN_INTERVAL).await;
            debug!(publisher = feed_cfg.publisher, url = %feed_cfg.feed_url, "Fetching vendor feed");
            // A single unreachable feed should not void the other vendors'
            // contributions, so per-feed failures are contained here too.
            let body = match self
                .http
                .get(&feed_cfg.feed_url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
            {
                Ok(resp) => match resp.bytes().await {
                    Ok(body) => body,
                    Err(e) => {
                        warn!(publisher = feed_cfg.publisher, error = %e, "Vendor feed body read failed, skipping");
                        continue;
                    }
                },
                Err(e) => {
                    warn!(publisher = feed_cfg.publisher, error = %e, "Vendor feed unavailable, skipping");
                    continue;
                }
            };
            let feed = match parser::parse(body.as_ref()) {
                Ok(feed) => feed,
                Err(e) => {
                    warn!(publisher = feed_cfg.publisher, error = %e, "Vendor feed unparseable, skipping");
                    continue;
                }
            };
            models.extend(
                feed.entries
                    .into_iter()
                    .filter_map(|entry| normalise(entry, feed_cfg)),
            );
        }
        info!(count = models.len(), "Blog connector finished");
        Ok(models)
    }
}

fn looks_like_model_announcement(title: &str) -> bool {
    let lowered = title.to_lowercase();
    MODEL_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

fn normalise(entry: feed_rs::model::Entry, feed_cfg: &VendorFeed) -> Option<CandidateModel> {
    let title = entry.title.map(|t| t.content)?;
    if !looks_like_model_announcement(&title) {
        return None;
    }
    let source_url = entry
        .links
        .first()
        .map(|l| l.href.clone())
        .unwrap_or_else(|| entry.id.clone());
    Some(CandidateModel {
        name: title,
        publisher: feed_cfg.publisher.to_string(),
        source: SourceKind::Blog,
        source_url,
        access_type: feed_cfg.access_type,
        country: Some(feed_cfg.country.to_string()),
        model_size: None,
        created_at: entry.published,
        discovery_timestamp: None,
        agent_version: None,
        validation_status: None,
    })
}

#[async_trait]
impl Connector for BlogConnector {
    fn name(&self) -> &'static str {
        "blogs"
    }

    async fn discover(&self, ctx: &RunContext) -> Vec<CandidateModel> {
        absorb(self.name(), self.fetch(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
  <title>Vendor blog</title>
  <item>
    <title>Introducing our next frontier model</title>
    <link>https://vendor.example.com/announcement</link>
    <guid>https://vendor.example.com/announcement</guid>
  </item>
  <item>
    <title>Quarterly earnings call recap</title>
    <link>https://vendor.example.com/earnings</link>
    <guid>https://vendor.example.com/earnings</guid>
  </item>
</channel></rss>"#;

    fn fixture_feed() -> VendorFeed {
        VendorFeed {
            publisher: "Vendor",
            country: "USA",
            access_type: AccessType::Commercial,
            feed_url: "https://vendor.example.com/rss".into(),
            domain: "vendor.example.com",
        }
    }

    #[test]
    fn only_announcement_titles_become_candidates() {
        let feed = parser::parse(RSS_FIXTURE.as_bytes()).unwrap();
        let cfg = fixture_feed();
        let models: Vec<_> = feed
            .entries
            .into_iter()
            .filter_map(|e| normalise(e, &cfg))
            .collect();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "Introducing our next frontier model");
        assert_eq!(models[0].publisher, "Vendor");
        assert_eq!(models[0].country.as_deref(), Some("USA"));
        assert_eq!(models[0].source, SourceKind::Blog);
    }
}
