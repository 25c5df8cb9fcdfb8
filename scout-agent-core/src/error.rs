//! Error taxonomy for the discovery pipeline.
//!
//! Connector failures never appear here: the connector contract absorbs them
//! into an empty contribution. What remains is what the top-level invoker has
//! to decide about — local persistence failures and backend delivery failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoutError {
    /// Local directory creation or snapshot/CSV write failure. The run is
    /// incomplete: no snapshot guarantee was met.
    #[error("io failure at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Network or timeout failure while talking to the backend.
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status. The local snapshot written
    /// earlier in the run is not rolled back.
    #[error("backend rejected report: status {status}: {body}")]
    Backend { status: u16, body: String },

    /// A report could not be serialized or a snapshot could not be encoded.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A source payload (feed XML, unexpected JSON shape) could not be parsed.
    #[error("payload parse failed: {0}")]
    Parse(String),
}

impl ScoutError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ScoutError::Io {
            path: path.into(),
            source,
        }
    }
}
