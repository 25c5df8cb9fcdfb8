//! # connectors: per-catalog integrations
//!
//! One module per external catalog kind. Every connector follows the same
//! shape: issue one or more scoped queries through the run's rate-limit
//! gate, deserialize the source-specific raw payload, and normalise it into
//! [`CandidateModel`] at the boundary. Downstream stages never see a
//! source-specific field.
//!
//! Failure containment is the contract: a connector's `discover` never
//! raises. The fallible fetch lives in a private `fetch` function and the
//! trait implementation absorbs its error into an empty list with a warning,
//! so one catalog's outage degrades the run to partial coverage.
//!
//! ## Adding a connector
//! - Add a module with raw payload structs and a `fetch(ctx)` returning
//!   `Result<Vec<CandidateModel>, ScoutError>`.
//! - Implement [`Connector`] by delegating through [`absorb`].
//! - Register it in the CLI's connector assembly.

pub mod arxiv;
pub mod benchmarks;
pub mod blogs;
pub mod github;
pub mod huggingface;

use std::time::Duration;

use reqwest::Client;
use tracing::warn;

use crate::error::ScoutError;
use crate::model::CandidateModel;

/// Upper bound on any single catalog call, matching the transmitter's bound.
/// Connectors fail closed (empty result) rather than hang the run.
pub(crate) const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Placeholder publisher when the source record carries no owner.
pub(crate) const UNKNOWN_PUBLISHER: &str = "unknown";

pub(crate) fn http_client() -> Result<Client, ScoutError> {
    Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(format!(
            "askme-scout-agent/{}",
            crate::enrich::AGENT_VERSION
        ))
        .build()
        .map_err(ScoutError::Http)
}

/// Collapse a fetch failure into the connector contract's empty contribution.
pub(crate) fn absorb(
    connector: &'static str,
    result: Result<Vec<CandidateModel>, ScoutError>,
) -> Vec<CandidateModel> {
    match result {
        Ok(models) => models,
        Err(e) => {
            warn!(connector, error = %e, "Connector fetch failed, contributing empty result");
            Vec::new()
        }
    }
}
