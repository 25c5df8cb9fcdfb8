#![allow(unused_imports)]

//! # contract: trait seams of the discovery pipeline
//!
//! Two traits define the pluggable edges of a run:
//!
//! - [`Connector`] — one external catalog integration. Its contract is
//!   infallible: any underlying network/API failure is absorbed inside the
//!   implementation and surfaces as an empty candidate list, so one source's
//!   outage degrades a run to partial coverage instead of aborting it.
//! - [`Transmitter`] — delivery of a finished report to the aggregation
//!   backend. Unlike connectors this one is allowed to fail, and the caller
//!   decides what a locally-complete but remotely-failed run means.
//!
//! Both traits are annotated for `mockall` so the pipeline can be exercised
//! deterministically in tests; the mocks are exported behind the
//! `test-export-mocks` feature.

use async_trait::async_trait;

use mockall::{automock, predicate::*};

use crate::enrich::RunContext;
use crate::error::ScoutError;
use crate::model::{CandidateModel, Report};

/// Result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransmitOutcome {
    /// The backend accepted the report with the given 2xx status.
    Delivered { status: u16 },
    /// The backend URL is the unconfigured placeholder; no network call was
    /// made and the run counts as successful.
    Skipped,
}

/// One per-catalog integration producing raw candidates.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Connector: Send + Sync {
    /// Stable connector name, used in logs and run summaries.
    fn name(&self) -> &'static str;

    /// Fetch and normalise this catalog's listings. Never fails: network
    /// errors, non-2xx responses and malformed payloads all collapse to an
    /// empty list. Output may contain cross-source duplicates; the pipeline
    /// deduplicates after the fan-in.
    async fn discover(&self, ctx: &RunContext) -> Vec<CandidateModel>;
}

/// Delivery of a finished report to the remote aggregation endpoint.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Transmitter: Send + Sync {
    /// Deliver the report. Exactly one POST when the backend is configured,
    /// zero when it is not. Non-2xx and transport failures are surfaced as
    /// [`ScoutError`]; retry policy belongs to the caller.
    async fn post_report(&self, report: &Report) -> Result<TransmitOutcome, ScoutError>;
}
