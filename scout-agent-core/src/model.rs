//! Data model for one discovery run: candidate records, report metadata and
//! summary counts.
//!
//! Field names serialize in camelCase so on-disk snapshots and the backend
//! request body keep the wire format the aggregation service already accepts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The external catalog kind a candidate was discovered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    CodeHosting,
    ModelHub,
    PreprintArchive,
    BenchmarkIndex,
    Blog,
}

impl SourceKind {
    /// Stable label used as a key in summary maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::CodeHosting => "code-hosting",
            SourceKind::ModelHub => "model-hub",
            SourceKind::PreprintArchive => "preprint-archive",
            SourceKind::BenchmarkIndex => "benchmark-index",
            SourceKind::Blog => "blog",
        }
    }
}

/// How a discovered model can be accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessType {
    OpenSource,
    FreeTier,
    Commercial,
}

impl AccessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::OpenSource => "open-source",
            AccessType::FreeTier => "free-tier",
            AccessType::Commercial => "commercial",
        }
    }
}

/// One externally discovered AI model entry, normalised at the connector
/// boundary. The enrichment fields stay `None` until [`crate::enrich::enrich`]
/// stamps them; within a finalized report the (name, publisher) pair is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateModel {
    pub name: String,
    /// Owning organization or account; connectors fall back to "unknown"
    /// when the source record does not carry an owner.
    pub publisher: String,
    pub source: SourceKind,
    pub source_url: String,
    pub access_type: AccessType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_size: Option<String>,
    /// Origin-reported creation timestamp, when the catalog exposes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovery_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_status: Option<String>,
}

impl CandidateModel {
    /// Deduplication key: exact (name, publisher) pair, case-sensitive.
    /// Whether case-folding belongs here is deliberately left open; see
    /// DESIGN.md.
    pub fn dedup_key(&self) -> (String, String) {
        (self.name.clone(), self.publisher.clone())
    }
}

/// Run-level metadata attached to every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub run_id: String,
    pub timestamp: DateTime<Utc>,
    pub total_models: usize,
    /// Distinct source kinds observed, in first-seen order.
    pub sources: Vec<SourceKind>,
}

/// Count maps over the final model list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub by_source: BTreeMap<String, usize>,
    pub by_access_type: BTreeMap<String, usize>,
}

/// The versioned output of one discovery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    /// First-seen order after deduplication.
    pub models: Vec<CandidateModel>,
    pub summary: ReportSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&SourceKind::PreprintArchive).unwrap();
        assert_eq!(json, "\"preprint-archive\"");
    }

    #[test]
    fn candidate_serializes_camel_case_and_skips_empty_options() {
        let model = CandidateModel {
            name: "llama-3".into(),
            publisher: "meta-llama".into(),
            source: SourceKind::ModelHub,
            source_url: "https://huggingface.co/meta-llama/llama-3".into(),
            access_type: AccessType::OpenSource,
            country: None,
            model_size: Some("70B".into()),
            created_at: None,
            discovery_timestamp: None,
            agent_version: None,
            validation_status: None,
        };
        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["sourceUrl"], "https://huggingface.co/meta-llama/llama-3");
        assert_eq!(value["accessType"], "open-source");
        assert_eq!(value["modelSize"], "70B");
        assert!(value.get("country").is_none());
        assert!(value.get("discoveryTimestamp").is_none());
    }
}
