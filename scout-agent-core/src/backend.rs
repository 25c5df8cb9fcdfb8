//! Backend delivery: one authenticated POST of the finished report to the
//! remote aggregation endpoint.
//!
//! The client is deliberately dumb: no retry, no queueing. A non-2xx answer
//! or a transport failure is surfaced to the caller, who already holds the
//! local snapshot and decides what a remotely-failed run means.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{error, info};

use crate::contract::{TransmitOutcome, Transmitter};
use crate::enrich::AGENT_VERSION;
use crate::error::ScoutError;
use crate::model::Report;

/// Placeholder base URL meaning "no backend configured". Transmission is
/// skipped without a network call and the run still counts as successful.
pub const BACKEND_URL_PLACEHOLDER: &str = "https://your-backend.example.com";

const TRANSMIT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

pub struct BackendClient {
    base_url: String,
    auth_token: String,
    http: Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>) -> Result<Self, ScoutError> {
        let http = Client::builder()
            .timeout(TRANSMIT_TIMEOUT)
            .user_agent(format!("askme-scout-agent/{AGENT_VERSION}"))
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            auth_token: auth_token.into(),
            http,
        })
    }

    fn is_configured(&self) -> bool {
        self.base_url != BACKEND_URL_PLACEHOLDER
    }
}

#[async_trait]
impl Transmitter for BackendClient {
    async fn post_report(&self, report: &Report) -> Result<TransmitOutcome, ScoutError> {
        if !self.is_configured() {
            info!(
                run_id = %report.metadata.run_id,
                "Backend URL is the unconfigured placeholder, skipping transmission"
            );
            return Ok(TransmitOutcome::Skipped);
        }

        let url = format!("{}/api/llms", self.base_url.trim_end_matches('/'));
        let body = json!({
            "models": report.models,
            "metadata": report.metadata,
        });
        info!(
            url = %url,
            run_id = %report.metadata.run_id,
            models = report.models.len(),
            "Transmitting report to backend"
        );

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.auth_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, url = %url, "Backend request failed");
                ScoutError::Http(e)
            })?;

        let status = response.status();
        if status.is_success() {
            info!(status = status.as_u16(), "Backend accepted report");
            Ok(TransmitOutcome::Delivered {
                status: status.as_u16(),
            })
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to decode response body>"));
            error!(status = status.as_u16(), body = %body, "Backend rejected report");
            Err(ScoutError::Backend {
                status: status.as_u16(),
                body,
            })
        }
    }
}
