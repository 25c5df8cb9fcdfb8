//! Deduplication of the merged candidate list.

use std::collections::HashSet;

use tracing::debug;

use crate::model::CandidateModel;

/// Remove repeats from the concatenated connector output, keyed by the exact
/// (name, publisher) pair. First occurrence wins and first-seen order is
/// preserved. Matching is case-sensitive: the original pipeline never folded
/// case, and folding would merge entries that only differ by publisher
/// casing conventions.
pub fn dedupe(models: Vec<CandidateModel>) -> Vec<CandidateModel> {
    let before = models.len();
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(before);
    let mut unique = Vec::with_capacity(before);
    for model in models {
        if seen.insert(model.dedup_key()) {
            unique.push(model);
        }
    }
    debug!(before, after = unique.len(), "Deduplicated candidate list");
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccessType, SourceKind};

    fn candidate(name: &str, publisher: &str, source: SourceKind) -> CandidateModel {
        CandidateModel {
            name: name.into(),
            publisher: publisher.into(),
            source,
            source_url: format!("https://example.com/{publisher}/{name}"),
            access_type: AccessType::OpenSource,
            country: None,
            model_size: None,
            created_at: None,
            discovery_timestamp: None,
            agent_version: None,
            validation_status: None,
        }
    }

    #[test]
    fn first_occurrence_wins_and_order_is_preserved() {
        let input = vec![
            candidate("a", "org1", SourceKind::CodeHosting),
            candidate("b", "org1", SourceKind::ModelHub),
            candidate("a", "org1", SourceKind::ModelHub),
            candidate("c", "org2", SourceKind::Blog),
        ];
        let out = dedupe(input);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].name, "a");
        // The survivor is the first-seen copy, from code hosting.
        assert_eq!(out[0].source, SourceKind::CodeHosting);
        assert_eq!(out[1].name, "b");
        assert_eq!(out[2].name, "c");
    }

    #[test]
    fn same_name_different_publisher_is_kept() {
        let input = vec![
            candidate("mistral-7b", "mistralai", SourceKind::ModelHub),
            candidate("mistral-7b", "some-fork", SourceKind::CodeHosting),
        ];
        assert_eq!(dedupe(input).len(), 2);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let input = vec![
            candidate("LLaMA", "meta", SourceKind::Blog),
            candidate("llama", "meta", SourceKind::ModelHub),
        ];
        assert_eq!(dedupe(input).len(), 2);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(dedupe(Vec::new()).is_empty());
    }
}
