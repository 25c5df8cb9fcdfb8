//! Report assembly: metadata and summary counts over the enriched candidates.

use tracing::info;

use crate::enrich::RunContext;
use crate::model::{CandidateModel, Report, ReportMetadata, ReportSummary};

/// Aggregate the enriched candidate list into one versioned report. An empty
/// input produces a well-formed zero-count report.
pub fn build_report(models: Vec<CandidateModel>, ctx: &RunContext) -> Report {
    let mut sources = Vec::new();
    let mut summary = ReportSummary::default();
    for model in &models {
        if !sources.contains(&model.source) {
            sources.push(model.source);
        }
        *summary
            .by_source
            .entry(model.source.as_str().to_string())
            .or_insert(0) += 1;
        *summary
            .by_access_type
            .entry(model.access_type.as_str().to_string())
            .or_insert(0) += 1;
    }

    let report = Report {
        metadata: ReportMetadata {
            run_id: ctx.run_id.to_string(),
            timestamp: ctx.started_at,
            total_models: models.len(),
            sources,
        },
        models,
        summary,
    };
    info!(
        run_id = %report.metadata.run_id,
        total_models = report.metadata.total_models,
        sources = report.metadata.sources.len(),
        "Report assembled"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccessType, SourceKind};

    fn candidate(name: &str, source: SourceKind, access: AccessType) -> CandidateModel {
        CandidateModel {
            name: name.into(),
            publisher: "org".into(),
            source,
            source_url: format!("https://example.com/{name}"),
            access_type: access,
            country: None,
            model_size: None,
            created_at: None,
            discovery_timestamp: None,
            agent_version: None,
            validation_status: None,
        }
    }

    #[test]
    fn empty_input_yields_zero_count_report() {
        let ctx = RunContext::new();
        let report = build_report(Vec::new(), &ctx);
        assert_eq!(report.metadata.total_models, 0);
        assert!(report.metadata.sources.is_empty());
        assert!(report.models.is_empty());
        assert!(report.summary.by_source.is_empty());
        assert!(report.summary.by_access_type.is_empty());
    }

    #[test]
    fn summary_counts_match_model_list() {
        let ctx = RunContext::new();
        let report = build_report(
            vec![
                candidate("a", SourceKind::ModelHub, AccessType::OpenSource),
                candidate("b", SourceKind::ModelHub, AccessType::Commercial),
                candidate("c", SourceKind::Blog, AccessType::OpenSource),
            ],
            &ctx,
        );
        assert_eq!(report.metadata.total_models, 3);
        assert_eq!(report.summary.by_source["model-hub"], 2);
        assert_eq!(report.summary.by_source["blog"], 1);
        assert_eq!(report.summary.by_access_type["open-source"], 2);
        assert_eq!(report.summary.by_access_type["commercial"], 1);
        // Distinct sources in first-seen order.
        assert_eq!(
            report.metadata.sources,
            vec![SourceKind::ModelHub, SourceKind::Blog]
        );
    }
}
