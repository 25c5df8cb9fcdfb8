//! Local snapshot persistence and CSV projection.
//!
//! Each run writes two JSON artifacts into the output directory: a
//! timestamped `llm-discovery-{runId}.json` that is never touched again, and
//! `latest.json`, overwritten every run to mirror the most recent report.
//! Reads of `latest.json` are deliberately forgiving: a missing or corrupt
//! file means "no prior run", not a hard failure.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::error::ScoutError;
use crate::model::{CandidateModel, Report};

pub const LATEST_SNAPSHOT: &str = "latest.json";
pub const SNAPSHOT_PREFIX: &str = "llm-discovery";
pub const EMPTY_CSV_SENTINEL: &str = "No models to export";

/// Scoped handle on the output directory. Construction creates the directory;
/// a failure there is surfaced, since no snapshot guarantee can be met
/// without it.
#[derive(Debug, Clone)]
pub struct ReportStore {
    output_dir: PathBuf,
}

impl ReportStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, ScoutError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| {
            error!(error = ?e, path = %output_dir.display(), "Failed to create output directory");
            ScoutError::io(output_dir.display().to_string(), e)
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write_json(&self, file_name: &str, report: &Report) -> Result<PathBuf, ScoutError> {
        let path = self.output_dir.join(file_name);
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&path, json).map_err(|e| {
            error!(error = ?e, path = %path.display(), "Failed to write snapshot");
            ScoutError::io(path.display().to_string(), e)
        })?;
        Ok(path)
    }

    /// Persist the report: the timestamped snapshot first, then `latest.json`
    /// overwritten with the same content. Either write failing is an error;
    /// nothing is silently dropped.
    pub fn save(&self, report: &Report) -> Result<PathBuf, ScoutError> {
        let snapshot_name = format!("{}-{}.json", SNAPSHOT_PREFIX, report.metadata.run_id);
        let snapshot_path = self.write_json(&snapshot_name, report)?;
        self.write_json(LATEST_SNAPSHOT, report)?;
        info!(
            run_id = %report.metadata.run_id,
            path = %snapshot_path.display(),
            "Report persisted (snapshot + latest)"
        );
        Ok(snapshot_path)
    }

    /// Read back the most recent persisted report. `None` when no prior run
    /// exists or the file cannot be parsed; callers can tell "no prior run"
    /// apart from a hard IO failure elsewhere in the pipeline.
    pub fn latest(&self) -> Option<Report> {
        let path = self.output_dir.join(LATEST_SNAPSHOT);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                info!(path = %path.display(), error = ?e, "No latest snapshot available");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(path = %path.display(), error = ?e, "Latest snapshot unreadable, treating as absent");
                None
            }
        }
    }

    /// Project the candidates to CSV and write the artifact into the output
    /// directory. Returns the written path.
    pub fn write_csv(
        &self,
        file_name: &str,
        models: &[CandidateModel],
    ) -> Result<PathBuf, ScoutError> {
        let path = self.output_dir.join(file_name);
        fs::write(&path, to_csv(models)).map_err(|e| {
            error!(error = ?e, path = %path.display(), "Failed to write CSV export");
            ScoutError::io(path.display().to_string(), e)
        })?;
        info!(path = %path.display(), rows = models.len(), "CSV export written");
        Ok(path)
    }
}

/// Fixed projection of the candidate list: header row `name,publisher,country`
/// then one row per model in input order. Fields are comma-joined without
/// quoting or escaping, matching the format downstream tooling already
/// parses; values containing commas will break it. Known gap, see DESIGN.md.
pub fn to_csv(models: &[CandidateModel]) -> String {
    if models.is_empty() {
        return EMPTY_CSV_SENTINEL.to_string();
    }
    let mut out = String::from("name,publisher,country\n");
    for model in models {
        out.push_str(&model.name);
        out.push(',');
        out.push_str(&model.publisher);
        out.push(',');
        out.push_str(model.country.as_deref().unwrap_or(""));
        out.push('\n');
    }
    out
}
