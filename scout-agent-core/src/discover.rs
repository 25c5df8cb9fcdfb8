//! Top-level orchestration: one discovery run from fan-out to delivery.
//!
//! The run is a single linear sequence: connectors (concurrent) → merge →
//! deduplicate → enrich → build report → persist → transmit (optional).
//! Each stage applies its own failure policy: connector failures are already
//! absorbed at the connector boundary, a persistence failure aborts the run,
//! and a transmission failure is handed back next to the locally-complete
//! result instead of masking it.

use std::path::PathBuf;

use futures::future::join_all;
use tracing::{error, info};

use crate::contract::{Connector, TransmitOutcome, Transmitter};
use crate::dedup::dedupe;
use crate::enrich::{enrich, RunContext};
use crate::error::ScoutError;
use crate::model::{CandidateModel, Report};
use crate::report::build_report;
use crate::store::ReportStore;

/// What one run produced. `transmission` is `None` when no transmitter was
/// supplied; an `Err` inside means the local snapshot exists but the backend
/// rejected or never received the report.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub report: Report,
    pub snapshot_path: PathBuf,
    pub transmission: Option<Result<TransmitOutcome, ScoutError>>,
}

/// Fan-out over all connectors, fan-in in declaration order. Never fails:
/// every connector is individually fault-contained, so the worst case is an
/// empty merged list.
pub async fn run_discovery(
    connectors: &[Box<dyn Connector>],
    ctx: &RunContext,
) -> Vec<CandidateModel> {
    let results = join_all(connectors.iter().map(|c| c.discover(ctx))).await;
    let mut merged = Vec::new();
    for (connector, models) in connectors.iter().zip(results) {
        info!(
            connector = connector.name(),
            count = models.len(),
            "Connector contribution merged"
        );
        merged.extend(models);
    }
    merged
}

/// Run the whole pipeline once. Errors only on persistence failure; see
/// [`PipelineOutcome`] for how transmission failures are reported.
pub async fn run_pipeline(
    connectors: &[Box<dyn Connector>],
    ctx: &RunContext,
    store: &ReportStore,
    transmitter: Option<&dyn Transmitter>,
) -> Result<PipelineOutcome, ScoutError> {
    info!(run_id = %ctx.run_id, connectors = connectors.len(), "Discovery run starting");

    let raw = run_discovery(connectors, ctx).await;
    let unique = dedupe(raw);
    let enriched = enrich(unique, ctx);
    let report = build_report(enriched, ctx);

    let snapshot_path = store.save(&report)?;

    let transmission = match transmitter {
        Some(transmitter) => {
            let result = transmitter.post_report(&report).await;
            match &result {
                Ok(TransmitOutcome::Delivered { status }) => {
                    info!(status = *status, "Report delivered to backend")
                }
                Ok(TransmitOutcome::Skipped) => info!("Backend transmission skipped"),
                Err(e) => {
                    error!(error = %e, "Backend transmission failed; local snapshot is kept")
                }
            }
            Some(result)
        }
        None => None,
    };

    info!(
        run_id = %ctx.run_id,
        total_models = report.metadata.total_models,
        "Discovery run finished"
    );
    Ok(PipelineOutcome {
        report,
        snapshot_path,
        transmission,
    })
}
