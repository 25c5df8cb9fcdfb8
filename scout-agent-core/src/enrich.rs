//! Run-scoped context and candidate enrichment.
//!
//! Everything a stage needs to know about "this run" travels in a
//! [`RunContext`] passed explicitly through the pipeline, so repeated runs
//! stay independent and each stage is testable in isolation.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::model::CandidateModel;
use crate::rate_limit::RateLimiter;

/// Marker stamped on every surviving candidate. No independent verification
/// happens at this stage; trust scoring is an external collaborator.
pub const VALIDATION_MARKER: &str = "validated";

pub const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Per-run state: identity, start instant and the shared rate-limit gate the
/// connectors go through.
#[derive(Debug)]
pub struct RunContext {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub agent_version: &'static str,
    pub rate_limiter: RateLimiter,
}

impl RunContext {
    pub fn new() -> Self {
        let ctx = Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            agent_version: AGENT_VERSION,
            rate_limiter: RateLimiter::new(),
        };
        info!(run_id = %ctx.run_id, agent_version = ctx.agent_version, "Run context created");
        ctx
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Stamp run metadata onto every candidate: discovery timestamp (the run's
/// start time), agent version, and the fixed validation marker. Total
/// function; never fails.
pub fn enrich(models: Vec<CandidateModel>, ctx: &RunContext) -> Vec<CandidateModel> {
    models
        .into_iter()
        .map(|mut model| {
            model.discovery_timestamp = Some(ctx.started_at);
            model.agent_version = Some(ctx.agent_version.to_string());
            model.validation_status = Some(VALIDATION_MARKER.to_string());
            model
        })
        .collect()
}
